// Stat card figure; a missing sample renders as a placeholder
pub fn format_reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1} {}", v, unit),
        None => format!("-- {}", unit),
    }
}

pub fn format_trend(percent: f64) -> String {
    if percent > 0.0 {
        format!("+{:.1}%", percent)
    } else {
        format!("{:.1}%", percent)
    }
}

pub fn share_bar(percent: u64, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    "█".repeat(filled)
}

// Upper y bound for a chart: the largest value with headroom, at least `floor`
pub fn chart_ceiling<'a>(values: impl IntoIterator<Item = &'a f64>, floor: f64) -> f64 {
    let max = values.into_iter().cloned().fold(floor, f64::max);
    (max + max / 10.0).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_placeholder_when_empty() {
        assert_eq!(format_reading(None, "%"), "-- %");
        assert_eq!(format_reading(Some(42.26), "MB/s"), "42.3 MB/s");
    }

    #[test]
    fn trend_sign() {
        assert_eq!(format_trend(2.3), "+2.3%");
        assert_eq!(format_trend(-1.2), "-1.2%");
        assert_eq!(format_trend(0.0), "0.0%");
    }

    #[test]
    fn share_bar_scales_to_width() {
        assert_eq!(share_bar(50, 10).chars().count(), 5);
        assert_eq!(share_bar(100, 8).chars().count(), 8);
        assert_eq!(share_bar(0, 8), "");
        assert_eq!(share_bar(250, 4).chars().count(), 4);
    }

    #[test]
    fn ceiling_has_headroom() {
        assert_eq!(chart_ceiling(&[10.0, 90.0], 1.0), 99.0);
        assert_eq!(chart_ceiling(std::iter::empty(), 100.0), 110.0);
    }
}
