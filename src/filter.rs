use crate::model::{Metric, MetricVisibility, Sample};

/// A sample narrowed to the metrics currently visible.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRecord {
    pub time: String,
    pub timestamp: i64,
    values: [Option<f64>; 4],
}

impl ProjectedRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values[metric.index()]
    }
}

pub fn project<'a, I>(buffer: I, visibility: &MetricVisibility) -> Vec<ProjectedRecord>
where
    I: IntoIterator<Item = &'a Sample>,
{
    buffer
        .into_iter()
        .map(|sample| {
            let mut values = [None; 4];
            for metric in Metric::ALL {
                if visibility.is_visible(metric) {
                    values[metric.index()] = Some(sample.value(metric));
                }
            }
            ProjectedRecord {
                time: sample.time.clone(),
                timestamp: sample.timestamp,
                values,
            }
        })
        .collect()
}

// Chart points (position, value); empty when the metric is hidden.
pub fn series(records: &[ProjectedRecord], metric: Metric) -> Vec<(f64, f64)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.value(metric).map(|v| (i as f64, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use chrono::Local;
    use proptest::prelude::*;

    fn buffer(n: usize) -> Vec<Sample> {
        Generator::new(Some(5)).seed(n, Local::now())
    }

    #[test]
    fn hidden_metric_is_absent_everywhere() {
        let samples = buffer(10);
        let mut vis = MetricVisibility::default();
        vis.set(Metric::Memory, false);

        let records = project(&samples, &vis);
        assert_eq!(records.len(), samples.len());
        for (record, sample) in records.iter().zip(&samples) {
            assert_eq!(record.timestamp, sample.timestamp);
            assert_eq!(record.time, sample.time);
            assert_eq!(record.value(Metric::Memory), None);
            assert_eq!(record.value(Metric::Cpu), Some(sample.cpu));
        }
        assert!(series(&records, Metric::Memory).is_empty());
        assert_eq!(series(&records, Metric::Disk).len(), 10);
    }

    #[test]
    fn empty_buffer_projects_to_nothing() {
        let records = project(&Vec::<Sample>::new(), &MetricVisibility::default());
        assert!(records.is_empty());
    }

    #[test]
    fn toggling_leaves_source_untouched() {
        let samples = buffer(20);
        let before = samples.clone();
        let mut vis = MetricVisibility::default();
        vis.toggle(Metric::Network);
        let _ = project(&samples, &vis);
        vis.toggle(Metric::Network);
        let _ = project(&samples, &vis);
        assert_eq!(samples, before);
    }

    proptest! {
        #[test]
        fn prop_fields_follow_visibility(
            n in 0usize..60,
            mask in prop::array::uniform4(any::<bool>()),
        ) {
            let samples = buffer(n);
            let mut vis = MetricVisibility::default();
            for (metric, shown) in Metric::ALL.iter().zip(mask) {
                vis.set(*metric, shown);
            }

            let records = project(&samples, &vis);
            prop_assert_eq!(records.len(), samples.len());
            for (record, sample) in records.iter().zip(&samples) {
                prop_assert_eq!(record.timestamp, sample.timestamp);
                for metric in Metric::ALL {
                    prop_assert_eq!(record.value(metric).is_some(), vis.is_visible(metric));
                }
            }
        }
    }
}
