use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::cli::DashboardConfig;
use crate::constants::{HIGH_CPU_THRESHOLD, IDLE_POLL_MS, MAX_CAPACITY};
use crate::datasets::{resource_distribution, weekly_outcomes, DailyOutcome, ResourceShare};
use crate::filter::{project, ProjectedRecord};
use crate::generator::Generator;
use crate::model::{DashboardLayout, Metric, MetricVisibility, Sample, TimeRange};
use crate::ticker::Ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Healthy,
    Warning,
    Scheduled,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub label: &'static str,
    pub level: StatusLevel,
    pub active: bool,
}

// Main application state: the sliding window plus every dashboard toggle
pub struct App {
    generator: Generator,
    buffer: VecDeque<Sample>,
    capacity: usize,
    visibility: MetricVisibility,
    ticker: Ticker,

    pub time_range: TimeRange,
    pub layout: DashboardLayout,

    // Built once at startup, never mutated
    pub distribution: Vec<ResourceShare>,
    pub weekly: Vec<DailyOutcome>,
}

impl App {
    pub fn new(config: &DashboardConfig) -> App {
        App::new_at(config, Local::now(), Instant::now())
    }

    pub fn new_at(config: &DashboardConfig, now: DateTime<Local>, clock: Instant) -> App {
        let capacity = config.capacity.clamp(1, MAX_CAPACITY);
        let mut app = App {
            generator: Generator::new(config.rng_seed),
            buffer: VecDeque::with_capacity(capacity + 1),
            capacity,
            visibility: MetricVisibility::default(),
            ticker: Ticker::new(config.tick_rate),
            time_range: TimeRange::default(),
            layout: DashboardLayout::default(),
            distribution: resource_distribution(),
            weekly: weekly_outcomes(),
        };
        app.initialize_at(now);
        if config.start_live {
            app.start_at(clock);
        }
        app
    }

    /// Replaces the window with a fresh seeded history ending at `now`.
    pub fn initialize_at(&mut self, now: DateTime<Local>) {
        self.buffer.clear();
        self.buffer.extend(self.generator.seed(self.capacity, now));
    }

    pub fn refresh(&mut self) {
        self.initialize_at(Local::now());
        info!(samples = self.buffer.len(), running = self.is_running(), "window reseeded");
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn start_at(&mut self, clock: Instant) {
        if self.ticker.start(clock) {
            info!(period_ms = self.ticker.period().as_millis() as u64, "live updates started");
        }
    }

    pub fn stop(&mut self) {
        if self.ticker.stop() {
            info!("live updates paused");
        }
    }

    pub fn toggle_running(&mut self, clock: Instant) {
        if self.is_running() {
            self.stop();
        } else {
            self.start_at(clock);
        }
    }

    /// Applies every tick that came due by `clock` and returns how many did.
    pub fn advance(&mut self, clock: Instant) -> u32 {
        let due = self.ticker.poll(clock);
        // Anything past one full window would be evicted straight away.
        let applied = (due as usize).min(self.capacity);
        for _ in 0..applied {
            self.on_tick();
        }
        due
    }

    pub fn next_timeout(&self, clock: Instant) -> Duration {
        self.ticker.timeout(clock, Duration::from_millis(IDLE_POLL_MS))
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Local::now());
    }

    pub fn on_tick_at(&mut self, now: DateTime<Local>) {
        // Timestamps must stay strictly increasing even if the clock stalls.
        let now = match self.buffer.back() {
            Some(last) if now.timestamp_millis() <= last.timestamp => {
                now + chrono::Duration::milliseconds(last.timestamp + 1 - now.timestamp_millis())
            }
            _ => now,
        };

        let sample = self.generator.tick(now);
        debug!(timestamp = sample.timestamp, cpu = sample.cpu, "tick");
        self.buffer.push_back(sample);
        while self.buffer.len() > self.capacity {
            self.buffer.pop_front();
        }
    }

    pub fn toggle_metric(&mut self, metric: Metric) -> bool {
        let visible = self.visibility.toggle(metric);
        info!(metric = metric.name(), visible, "metric toggled");
        visible
    }

    pub fn visibility(&self) -> &MetricVisibility {
        &self.visibility
    }

    pub fn samples(&self) -> &VecDeque<Sample> {
        &self.buffer
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.buffer.back()
    }

    pub fn projected(&self) -> Vec<ProjectedRecord> {
        project(&self.buffer, &self.visibility)
    }

    /// Percent change of `metric` across the window, one decimal.
    pub fn trend(&self, metric: Metric) -> f64 {
        let (Some(first), Some(last)) = (self.buffer.front(), self.buffer.back()) else {
            return 0.0;
        };
        let base = first.value(metric);
        if self.buffer.len() < 2 || base == 0.0 {
            return 0.0;
        }
        let change = (last.value(metric) - base) / base * 100.0;
        (change * 10.0).round() / 10.0
    }

    pub fn status(&self) -> Vec<StatusEntry> {
        let high_cpu = self.latest().is_some_and(|s| s.cpu >= HIGH_CPU_THRESHOLD);
        let entry = |label, level, active| StatusEntry { label, level, active };
        vec![
            entry("All Systems Operational", StatusLevel::Healthy, !high_cpu),
            entry("High CPU Usage", StatusLevel::Warning, high_cpu),
            entry("Maintenance Scheduled", StatusLevel::Scheduled, true),
            entry("Updates Available", StatusLevel::Info, true),
        ]
    }

    pub fn cycle_time_range(&mut self) {
        self.time_range = self.time_range.next();
        debug!(range = self.time_range.label(), "time range changed");
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggled();
        debug!(layout = self.layout.label(), "layout changed");
    }

    pub fn shutdown(&mut self) {
        self.stop();
        info!(samples = self.buffer.len(), "dashboard closed");
    }
}
