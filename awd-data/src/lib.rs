//! Data processing for wildfire observations.
//!
//! This crate turns a filtered slice of observations into the per-month
//! series the dashboard charts draw.

/// Per-month mean of a metric.
pub mod aggregation {
    use awd_core::observation::{Metric, Observation};
    use awd_utils::months::{month_name, month_number};
    use serde::Serialize;
    use std::collections::BTreeMap;

    /// Mean value of one metric for one calendar month.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct MonthlyMean {
        /// Month number, 1 = January.
        pub month: u32,
        /// English month name, used as the chart category.
        pub month_name: &'static str,
        pub value: f64,
        /// Number of observations averaged.
        pub samples: usize,
    }

    /// Month-ordered means of one metric over a filtered subset.
    ///
    /// Only months present in the input appear; missing months are absent,
    /// not zero.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct AggregateSeries {
        pub metric: Metric,
        pub months: Vec<MonthlyMean>,
    }

    impl AggregateSeries {
        /// Month names in calendar order.
        pub fn labels(&self) -> Vec<&'static str> {
            self.months.iter().map(|m| m.month_name).collect()
        }

        /// Mean values aligned with [`labels`](Self::labels).
        pub fn values(&self) -> Vec<f64> {
            self.months.iter().map(|m| m.value).collect()
        }

        /// Mean for a month by name, if that month is present.
        pub fn get(&self, month_name: &str) -> Option<f64> {
            let month = month_number(month_name)?;
            self.months
                .iter()
                .find(|m| m.month == month)
                .map(|m| m.value)
        }

        pub fn len(&self) -> usize {
            self.months.len()
        }

        pub fn is_empty(&self) -> bool {
            self.months.is_empty()
        }
    }

    /// Group `observations` by month and average `metric` within each group.
    ///
    /// Pure and deterministic: the result depends only on the input slice,
    /// and grouping by month number fixes the output order.
    pub fn aggregate(observations: &[Observation], metric: Metric) -> AggregateSeries {
        let mut groups: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for obs in observations {
            let entry = groups.entry(obs.month).or_insert((0.0, 0));
            entry.0 += obs.metric(metric);
            entry.1 += 1;
        }

        let months = groups
            .into_iter()
            .filter_map(|(month, (sum, samples))| {
                month_name(month).map(|name| MonthlyMean {
                    month,
                    month_name: name,
                    value: sum / samples as f64,
                    samples,
                })
            })
            .collect();

        AggregateSeries { metric, months }
    }

}
