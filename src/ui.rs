use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType,
        Paragraph, Row, Table,
    },
    Frame, Terminal,
};

use crate::app::{App, StatusLevel};
use crate::filter::series;
use crate::model::{DashboardLayout, Metric};
use crate::util::{chart_ceiling, format_reading, format_trend, share_bar};

pub fn run(mut app: App, shutdown: Arc<AtomicBool>) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let res = run_in_terminal(&mut app, &shutdown);

    // Cleanup, whatever happened after raw mode was entered
    app.shutdown();
    let restored = restore_terminal(&mut io::stdout(), disable_raw_mode);

    res?;
    restored.context("failed to restore terminal")
}

fn run_in_terminal(app: &mut App, shutdown: &AtomicBool) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to set up terminal")?;

    run_app_loop(&mut terminal, app, shutdown).context("dashboard loop failed")
}

/// Runs every restore step, then reports the first failure.
fn restore_terminal<W: Write>(
    out: &mut W,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let raw = disable_raw();
    let screen = execute!(out, LeaveAlternateScreen, Show);
    raw.and(screen)
}

fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    shutdown: &AtomicBool,
) -> io::Result<()> {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            return Ok(());
        }

        terminal.draw(|f| draw(f, app))?;

        // Block on input until the next tick is due
        let timeout = app.next_timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key, Instant::now()) {
                    return Ok(());
                }
            }
        }
        app.advance(Instant::now());
    }
}

/// Applies one key press to the app. Returns true when the user asked to quit.
pub fn handle_key(app: &mut App, key: KeyEvent, clock: Instant) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_running(clock),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('1') => {
            app.toggle_metric(Metric::Cpu);
        }
        KeyCode::Char('2') => {
            app.toggle_metric(Metric::Memory);
        }
        KeyCode::Char('3') => {
            app.toggle_metric(Metric::Network);
        }
        KeyCode::Char('4') => {
            app.toggle_metric(Metric::Disk);
        }
        KeyCode::Char('t') => app.cycle_time_range(),
        KeyCode::Char('g') => app.toggle_layout(),
        _ => {}
    }
    false
}

fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::Cpu => Color::Rgb(59, 130, 246),
        Metric::Memory => Color::Rgb(16, 185, 129),
        Metric::Network => Color::Rgb(245, 158, 11),
        Metric::Disk => Color::Rgb(139, 92, 246),
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

pub fn draw(f: &mut Frame, app: &App) {
    // ============= whole screen layout ============
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),  // Header
                Constraint::Length(3),  // Metric toggles
                Constraint::Length(5),  // Stat cards
                Constraint::Min(10),    // Metrics over time
                Constraint::Length(14), // Secondary panels
                Constraint::Length(1),  // Status bar
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_header(f, app, main_chunks[0]);
    draw_toggles(f, app, main_chunks[1]);
    draw_stat_cards(f, app, main_chunks[2]);
    draw_metrics_chart(f, app, main_chunks[3]);

    let direction = match app.layout {
        DashboardLayout::Grid => Direction::Horizontal,
        DashboardLayout::List => Direction::Vertical,
    };
    let panels = Layout::default()
        .direction(direction)
        .constraints([Constraint::Ratio(1, 3); 3].as_ref())
        .split(main_chunks[4]);
    draw_distribution(f, app, panels[0]);
    draw_weekly(f, app, panels[1]);
    draw_network_area(f, app, panels[2]);

    draw_status_bar(f, app, main_chunks[5]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let badge = Style::default().add_modifier(Modifier::BOLD);
    let state = if app.is_running() {
        Span::styled(" ● LIVE ", badge.bg(Color::Green).fg(Color::Black))
    } else {
        Span::styled(" ‖ PAUSED ", badge.bg(Color::DarkGray).fg(Color::White))
    };
    let header = Line::from(vec![
        state,
        Span::raw("  "),
        Span::styled(app.time_range.label(), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(
                "  window {}/{}  layout: {}",
                app.samples().len(),
                app.capacity(),
                app.layout.label()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            "   space pause · r refresh · 1-4 metrics · t range · g layout · q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let block = panel("Analytics Dashboard").border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(header).block(block), area);
}

fn draw_toggles(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (i, (metric, visible)) in app.visibility().iter().enumerate() {
        let style = if visible {
            Style::default().bg(metric_color(metric)).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" [{}] {} ", i + 1, metric.name().to_uppercase()), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(panel("Metrics")), area);
}

fn draw_stat_cards(f: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4].as_ref())
        .split(area);

    let latest = app.latest();
    for (metric, chunk) in Metric::ALL.iter().zip(cards.iter()) {
        let trend = app.trend(*metric);
        let trend_color = if trend > 0.0 { Color::Green } else { Color::Red };
        let text = vec![
            Line::from(Span::styled(
                format_reading(latest.map(|s| s.value(*metric)), metric.unit()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format_trend(trend), Style::default().fg(trend_color))),
        ];
        let block = panel(metric.title()).border_style(Style::default().fg(metric_color(*metric)));
        f.render_widget(Paragraph::new(text).block(block), *chunk);
    }
}

fn draw_metrics_chart(f: &mut Frame, app: &App, area: Rect) {
    let records = app.projected();
    let lines: Vec<(Metric, Vec<(f64, f64)>)> = Metric::ALL
        .iter()
        .filter(|m| app.visibility().is_visible(**m))
        .map(|m| (*m, series(&records, *m)))
        .collect();

    let y_max = chart_ceiling(lines.iter().flat_map(|(_, pts)| pts.iter().map(|(_, y)| y)), 100.0);
    let x_max = records.len().saturating_sub(1).max(1) as f64;

    let datasets = lines
        .iter()
        .map(|(metric, points)| {
            Dataset::default()
                .name(format!("{} {}", metric.name(), metric.unit()))
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(metric_color(*metric)))
                .data(points)
        })
        .collect::<Vec<_>>();

    let first = records.first().map(|r| r.time.clone()).unwrap_or_default();
    let last = records.last().map(|r| r.time.clone()).unwrap_or_default();
    let span_secs = match (records.first(), records.last()) {
        (Some(a), Some(b)) => (b.timestamp - a.timestamp) / 1000,
        _ => 0,
    };
    let title = format!("System Metrics Over Time ({}m {}s)", span_secs / 60, span_secs % 60);

    let chart = Chart::new(datasets)
        .block(panel(&title))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );
    f.render_widget(chart, area);
}

fn draw_distribution(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.distribution.iter().map(|share| {
        Row::new(vec![
            Cell::from(share.name),
            Cell::from(share_bar(share.value, 20)).style(Style::default().fg(share.color)),
            Cell::from(format!("{}%", share.value)).style(Style::default().fg(Color::Gray)),
        ])
        .height(1)
    });
    let table = Table::new(
        rows,
        [Constraint::Length(10), Constraint::Min(5), Constraint::Length(5)],
    )
    .block(panel("Resource Distribution"));
    f.render_widget(table, area);
}

fn draw_weekly(f: &mut Frame, app: &App, area: Rect) {
    let max = app.weekly.iter().map(|d| d.success.max(d.failed)).max().unwrap_or(1);
    let mut chart = BarChart::default()
        .block(panel("Weekly Performance"))
        .bar_width(2)
        .bar_gap(0)
        .group_gap(1)
        .max(max);
    for day in &app.weekly {
        chart = chart.data(BarGroup::default().label(Line::from(day.day)).bars(&[
            Bar::default()
                .value(day.success)
                .text_value(String::new())
                .style(Style::default().fg(Color::Green)),
            Bar::default()
                .value(day.failed)
                .text_value(String::new())
                .style(Style::default().fg(Color::Red)),
        ]));
    }
    f.render_widget(chart, area);
}

fn draw_network_area(f: &mut Frame, app: &App, area: Rect) {
    let records = app.projected();
    let points = series(&records, Metric::Network);
    let y_max = chart_ceiling(points.iter().map(|(_, y)| y), 100.0);
    let x_limit = records.len().max(1) as f64;

    let load = app
        .latest()
        .map(|s| format!(" · {} req · {} err", s.requests, s.errors))
        .unwrap_or_default();
    let title = if app.visibility().is_visible(Metric::Network) {
        format!("Network Traffic{}", load)
    } else {
        format!("Network Traffic (hidden){}", load)
    };
    let canvas = Canvas::default()
        .block(panel(&title))
        .marker(Marker::Braille)
        .x_bounds([0.0, x_limit])
        .y_bounds([0.0, y_max])
        .paint(|ctx| {
            for &(x, y) in &points {
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: 0.0,
                    x2: x,
                    y2: y,
                    color: metric_color(Metric::Network),
                });
            }
        });
    f.render_widget(canvas, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " SYSTEM STATUS ",
        Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD),
    )];
    for entry in app.status().into_iter().filter(|e| e.active) {
        let color = match entry.level {
            StatusLevel::Healthy => Color::Green,
            StatusLevel::Warning => Color::Yellow,
            StatusLevel::Scheduled => Color::Gray,
            StatusLevel::Info => Color::Blue,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("● ", Style::default().fg(color)));
        spans.push(Span::raw(entry.label));
    }
    let status_bar =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(status_bar, area);
}
