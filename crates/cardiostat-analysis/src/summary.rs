//! Summary records produced by [`TabularAggregator`](crate::aggregate::TabularAggregator)
//!
//! Three shapes are produced, one per chart family:
//!
//! - [`GroupSummary`]: outcome counts for one category (grouped and stacked bars)
//! - [`BinSummary`]: outcome counts for one interval of a continuous field (histograms)
//! - [`QuartileSummary`]: five-number summary for one category (box plots)
//!
//! # Zero vs. no data
//!
//! An empty group is reported with zero counts and `total == 0`; its
//! percentages are 0 by the [`percentage`] contract. An empty box-plot
//! partition is reported with `summary == None`, because a zero quartile
//! would be a misleading statistic. Consumers that need to tell an empty
//! group apart from a real 0% can check [`GroupSummary::is_empty`].

use std::ops::Range;

use cardiostat_stats::{descriptive::DescriptiveStats, percentiles::Quartiles};
use serde::Serialize;

use crate::domain::Domain;

/// Share of `count` in `total`, in percent.
///
/// Returns `0.0` when `total` is zero instead of dividing by zero. This is the
/// contract for empty groups, not a fallback for bad input.
///
/// # Examples
///
/// ```
/// use cardiostat_analysis::summary::percentage;
///
/// assert_eq!(percentage(1, 2), 50.0);
/// assert_eq!(percentage(0, 0), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentage(count: u64, total: u64) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub outcome: String,
    pub count: u64,
}

/// Per-outcome counts in outcome-domain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutcomeCounts {
    counts: Vec<OutcomeCount>,
}

impl OutcomeCounts {
    /// One zero count per label of `domain`.
    #[must_use]
    pub fn zeroed(domain: &Domain) -> Self {
        Self {
            counts: domain
                .iter()
                .map(|outcome| OutcomeCount {
                    outcome: outcome.to_owned(),
                    count: 0,
                })
                .collect(),
        }
    }

    pub(crate) fn increment(&mut self, index: usize) {
        self.counts[index].count += 1;
    }

    /// Count for `outcome`, or `None` if it is not in the domain.
    #[must_use]
    pub fn get(&self, outcome: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|c| c.outcome == outcome)
            .map(|c| c.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutcomeCount> {
        self.counts.iter()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[OutcomeCount] {
        &self.counts
    }
}

/// Outcome counts for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub counts: OutcomeCounts,
    /// Sum of `counts`; zero for a group absent from the data.
    pub total: u64,
}

impl GroupSummary {
    #[must_use]
    pub fn new(group: String, counts: OutcomeCounts) -> Self {
        let total = counts.total();
        Self {
            group,
            counts,
            total,
        }
    }

    #[must_use]
    pub fn count(&self, outcome: &str) -> Option<u64> {
        self.counts.get(outcome)
    }

    /// Percentage of `outcome` within this group, or `None` if `outcome` is not
    /// in the domain.
    #[must_use]
    pub fn percentage(&self, outcome: &str) -> Option<f64> {
        self.count(outcome).map(|count| percentage(count, self.total))
    }

    /// `(outcome, percentage)` pairs in outcome-domain order.
    pub fn percentages(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts
            .iter()
            .map(|c| (c.outcome.as_str(), percentage(c.count, self.total)))
    }

    /// Returns `true` if no record fell into this group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Outcome counts for one interval `[x0, x1)` of a continuous field.
///
/// The last bin of a sequence is closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinSummary {
    pub x0: f64,
    pub x1: f64,
    pub counts: OutcomeCounts,
    pub total: u64,
}

impl BinSummary {
    #[must_use]
    pub fn new(range: Range<f64>, counts: OutcomeCounts) -> Self {
        let total = counts.total();
        Self {
            x0: range.start,
            x1: range.end,
            counts,
            total,
        }
    }

    #[must_use]
    pub fn range(&self) -> Range<f64> {
        self.x0..self.x1
    }

    #[must_use]
    pub fn count(&self, outcome: &str) -> Option<u64> {
        self.counts.get(outcome)
    }
}

/// Result of binning a continuous field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedOutcomes {
    /// Bins in ascending order of `x0`; empty if no value was defined.
    pub bins: Vec<BinSummary>,
    /// Outcome counts of records whose value was NaN or infinite.
    pub not_a_number: OutcomeCounts,
}

impl BinnedOutcomes {
    /// Total count of `outcome` across all bins and the NaN tally.
    #[must_use]
    pub fn outcome_total(&self, outcome: &str) -> u64 {
        self.bins
            .iter()
            .filter_map(|bin| bin.count(outcome))
            .chain(self.not_a_number.get(outcome))
            .sum()
    }
}

/// Box-plot statistics for one partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl BoxSummary {
    /// Computes the summary from values sorted by [`f64::total_cmp`].
    ///
    /// Returns `None` for an empty partition. NaN anywhere in the input makes
    /// every field NaN.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let quartiles = Quartiles::from_sorted(sorted_values)?;
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        Some(Self {
            min: quartiles.min,
            q1: quartiles.q1,
            median: quartiles.median,
            q3: quartiles.q3,
            max: quartiles.max,
            mean: stats.mean,
        })
    }
}

/// Box-plot statistics for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuartileSummary {
    pub group: String,
    /// Number of records in the partition, NaN values included.
    pub count: usize,
    /// `None` when the partition is empty ("no data").
    pub summary: Option<BoxSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes_no() -> Domain {
        Domain::new(["Yes", "No"])
    }

    #[test]
    fn test_zeroed_counts_follow_domain() {
        let counts = OutcomeCounts::zeroed(&yes_no());
        let outcomes = counts.iter().map(|c| c.outcome.as_str()).collect::<Vec<_>>();
        assert_eq!(outcomes, ["Yes", "No"]);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_empty_group_percentages_are_zero() {
        let summary = GroupSummary::new("Male".into(), OutcomeCounts::zeroed(&yes_no()));
        assert!(summary.is_empty());
        assert!(summary.percentages().all(|(_, p)| p == 0.0));
        assert_eq!(summary.percentage("Maybe"), None);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let mut counts = OutcomeCounts::zeroed(&Domain::new(["Healthy", "At risk", "Dangerous"]));
        for idx in [0, 1, 1, 2, 2, 2] {
            counts.increment(idx);
        }
        let summary = GroupSummary::new("Female".into(), counts);
        assert_eq!(summary.total, 6);
        let sum = summary.percentages().map(|(_, p)| p).sum::<f64>();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_box_summary_empty_is_none() {
        assert_eq!(BoxSummary::from_sorted(&[]), None);
    }

    #[test]
    fn test_box_summary_mean() {
        let summary = BoxSummary::from_sorted(&[10.0, 12.0, 14.0, 16.0, 18.0, 20.0]).unwrap();
        assert!((summary.mean - 15.0).abs() < 1e-12);
        assert_eq!(summary.median, 15.0);
    }

    #[test]
    fn test_group_summary_json_shape() {
        let mut counts = OutcomeCounts::zeroed(&yes_no());
        counts.increment(0);
        let summary = GroupSummary::new("Female".into(), counts);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "group": "Female",
                "counts": [{"outcome": "Yes", "count": 1}, {"outcome": "No", "count": 0}],
                "total": 1,
            })
        );
    }
}
