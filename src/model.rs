use chrono::{DateTime, Local};

// One timestamped observation of every tracked metric
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time: String,
    pub timestamp: i64,
    pub cpu: f64,
    pub memory: f64,
    pub network: f64,
    pub disk: f64,
    pub requests: u32,
    pub errors: u32,
}

impl Sample {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Memory => self.memory,
            Metric::Network => self.network,
            Metric::Disk => self.disk,
        }
    }
}

pub fn display_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// The toggleable chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Memory,
    Network,
    Disk,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Cpu, Metric::Memory, Metric::Network, Metric::Disk];

    pub fn index(self) -> usize {
        match self {
            Metric::Cpu => 0,
            Metric::Memory => 1,
            Metric::Network => 2,
            Metric::Disk => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Memory => "memory",
            Metric::Network => "network",
            Metric::Disk => "disk",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU Usage",
            Metric::Memory => "Memory Usage",
            Metric::Network => "Network I/O",
            Metric::Disk => "Disk Usage",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Network => "MB/s",
            _ => "%",
        }
    }
}

/// Which metrics the charts currently show. Every metric always has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricVisibility {
    shown: [bool; 4],
}

impl Default for MetricVisibility {
    fn default() -> Self {
        Self { shown: [true; 4] }
    }
}

impl MetricVisibility {
    pub fn is_visible(&self, metric: Metric) -> bool {
        self.shown[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, visible: bool) {
        self.shown[metric.index()] = visible;
    }

    /// Flips the metric and returns its new state.
    pub fn toggle(&mut self, metric: Metric) -> bool {
        let visible = !self.is_visible(metric);
        self.set(metric, visible);
        visible
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, bool)> + '_ {
        Metric::ALL.iter().map(move |m| (*m, self.is_visible(*m)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    FiveMinutes,
    #[default]
    OneHour,
    SixHours,
    OneDay,
    SevenDays,
}

impl TimeRange {
    pub fn next(self) -> Self {
        match self {
            TimeRange::FiveMinutes => TimeRange::OneHour,
            TimeRange::OneHour => TimeRange::SixHours,
            TimeRange::SixHours => TimeRange::OneDay,
            TimeRange::OneDay => TimeRange::SevenDays,
            TimeRange::SevenDays => TimeRange::FiveMinutes,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::FiveMinutes => "Last 5 minutes",
            TimeRange::OneHour => "Last hour",
            TimeRange::SixHours => "Last 6 hours",
            TimeRange::OneDay => "Last 24 hours",
            TimeRange::SevenDays => "Last 7 days",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardLayout {
    #[default]
    Grid,
    List,
}

impl DashboardLayout {
    pub fn toggled(self) -> Self {
        match self {
            DashboardLayout::Grid => DashboardLayout::List,
            DashboardLayout::List => DashboardLayout::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DashboardLayout::Grid => "grid",
            DashboardLayout::List => "list",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_defaults_to_all_shown() {
        let vis = MetricVisibility::default();
        assert!(Metric::ALL.iter().all(|m| vis.is_visible(*m)));
        assert_eq!(vis.iter().count(), 4);
    }

    #[test]
    fn toggle_returns_new_state() {
        let mut vis = MetricVisibility::default();
        assert!(!vis.toggle(Metric::Disk));
        assert!(!vis.is_visible(Metric::Disk));
        assert!(vis.is_visible(Metric::Cpu));
        assert!(vis.toggle(Metric::Disk));
    }

    #[test]
    fn time_range_cycles_back_to_start() {
        let mut range = TimeRange::default();
        assert_eq!(range, TimeRange::OneHour);
        for _ in 0..5 {
            range = range.next();
        }
        assert_eq!(range, TimeRange::OneHour);
    }
}
