use ratatui::style::Color;

// Share of load per subsystem, in percent
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceShare {
    pub name: &'static str,
    pub value: u64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyOutcome {
    pub day: &'static str,
    pub success: u64,
    pub failed: u64,
}

pub fn resource_distribution() -> Vec<ResourceShare> {
    vec![
        ResourceShare { name: "API Calls", value: 35, color: Color::Rgb(59, 130, 246) },
        ResourceShare { name: "Database", value: 25, color: Color::Rgb(16, 185, 129) },
        ResourceShare { name: "Frontend", value: 20, color: Color::Rgb(245, 158, 11) },
        ResourceShare { name: "Cache", value: 15, color: Color::Rgb(239, 68, 68) },
        ResourceShare { name: "Other", value: 5, color: Color::Rgb(139, 92, 246) },
    ]
}

pub fn weekly_outcomes() -> Vec<DailyOutcome> {
    [
        ("Mon", 240, 12),
        ("Tue", 380, 18),
        ("Wed", 320, 8),
        ("Thu", 450, 22),
        ("Fri", 380, 15),
        ("Sat", 290, 9),
        ("Sun", 220, 6),
    ]
    .into_iter()
    .map(|(day, success, failed)| DailyOutcome { day, success, failed })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_sums_to_hundred() {
        let total: u64 = resource_distribution().iter().map(|s| s.value).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        let week = weekly_outcomes();
        assert_eq!(week.len(), 7);
        assert_eq!(week.first().map(|d| d.day), Some("Mon"));
        assert_eq!(week.last().map(|d| d.day), Some("Sun"));
        assert!(week.iter().all(|d| d.failed < d.success));
    }
}
