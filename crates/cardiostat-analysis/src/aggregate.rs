//! Grouping, binning, and quartile aggregation over tabular records
//!
//! [`TabularAggregator`] turns raw [`Record`]s into the summary shapes of
//! [`summary`](crate::summary). It borrows the records and keeps no state,
//! so every call recomputes its result from scratch and calling it twice with
//! the same arguments yields the same output.
//!
//! # Filtering
//!
//! Each operation first drops records that are missing any field it needs
//! (absent or blank). Dropping is a filtering policy, not an error.
//! Malformed numbers are *not* dropped: they are NaN and propagate into
//! the summaries.
//!
//! # Examples
//!
//! ```
//! use cardiostat_analysis::{aggregate::TabularAggregator, domain::Domain, record::Record};
//!
//! let records = [
//!     Record::from_iter([("Gender", "Female"), ("Heart Disease Status", "Yes")]),
//!     Record::from_iter([("Gender", "Female"), ("Heart Disease Status", "No")]),
//!     Record::from_iter([("Gender", "Male"), ("Heart Disease Status", "Yes")]),
//! ];
//! let summaries = TabularAggregator::new(&records).group_by_category(
//!     "Gender",
//!     "Heart Disease Status",
//!     &Domain::new(["Female", "Male"]),
//!     &Domain::new(["Yes", "No"]),
//! );
//!
//! assert_eq!(summaries[0].total, 2);
//! assert_eq!(summaries[0].percentage("Yes"), Some(50.0));
//! assert_eq!(summaries[1].percentage("Yes"), Some(100.0));
//! assert_eq!(summaries[1].percentage("No"), Some(0.0));
//! ```

use cardiostat_stats::histogram::BinEdges;

use crate::{
    domain::Domain,
    record::Record,
    summary::{BinSummary, BinnedOutcomes, BoxSummary, GroupSummary, OutcomeCounts, QuartileSummary},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AggregateError {
    #[display("bin count must be at least 1")]
    ZeroBinCount,
}

/// Stateless aggregation over a borrowed slice of records.
#[derive(Debug, Clone, Copy)]
pub struct TabularAggregator<'a> {
    records: &'a [Record],
}

impl<'a> TabularAggregator<'a> {
    #[must_use]
    pub fn new(records: &'a [Record]) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    /// Counts outcomes per category.
    ///
    /// Returns one [`GroupSummary`] per label of `group_domain`, in domain
    /// order. Groups that never occur are reported with zero counts and
    /// `total == 0`. Outcome values outside `outcome_domain` and group values
    /// outside `group_domain` are not counted.
    #[must_use]
    pub fn group_by_category(
        &self,
        group_field: &str,
        outcome_field: &str,
        group_domain: &Domain,
        outcome_domain: &Domain,
    ) -> Vec<GroupSummary> {
        let mut counts = group_domain
            .iter()
            .map(|_| OutcomeCounts::zeroed(outcome_domain))
            .collect::<Vec<_>>();

        let mut filtered = 0;
        for record in self.records {
            let (Some(group), Some(outcome)) =
                (record.category(group_field), record.category(outcome_field))
            else {
                continue;
            };
            filtered += 1;
            if let (Some(group_idx), Some(outcome_idx)) =
                (group_domain.position(&group), outcome_domain.position(&outcome))
            {
                counts[group_idx].increment(outcome_idx);
            }
        }
        tracing::debug!(
            group_field,
            outcome_field,
            records = self.records.len(),
            filtered,
            "grouped records by category"
        );

        group_domain
            .iter()
            .zip(counts)
            .map(|(group, counts)| GroupSummary::new(group.to_owned(), counts))
            .collect()
    }

    /// Splits a continuous field into `bin_count` equal-width bins and counts
    /// outcomes in each.
    ///
    /// The bins span `[min, max]` of the finite values. All bins are half-open
    /// except the last, which includes `max`. If every finite value is equal,
    /// a single bin `[min, min]` holds them all. If there is no finite value,
    /// `bins` is empty. Records whose value is NaN (or infinite) are tallied
    /// in [`BinnedOutcomes::not_a_number`] instead of a bin.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::{aggregate::TabularAggregator, domain::Domain, record::Record};
    ///
    /// let records = [(18.0, "No"), (22.0, "No"), (30.0, "Yes"), (38.0, "Yes")]
    ///     .map(|(bmi, status)| {
    ///         Record::new().with_field("BMI", bmi).with_field("Heart Disease Status", status)
    ///     });
    /// let binned = TabularAggregator::new(&records)
    ///     .bin_continuous("BMI", "Heart Disease Status", 2, &Domain::new(["Yes", "No"]))
    ///     .unwrap();
    ///
    /// assert_eq!(binned.bins.len(), 2);
    /// assert_eq!(binned.bins[0].range(), 18.0..28.0);
    /// assert_eq!(binned.bins[0].count("No"), Some(2));
    /// assert_eq!(binned.bins[1].count("Yes"), Some(2));
    /// ```
    pub fn bin_continuous(
        &self,
        value_field: &str,
        outcome_field: &str,
        bin_count: usize,
        outcome_domain: &Domain,
    ) -> Result<BinnedOutcomes, AggregateError> {
        if bin_count == 0 {
            return Err(AggregateError::ZeroBinCount);
        }

        let observations = self
            .records
            .iter()
            .filter_map(|record| {
                let value = record.number(value_field)?;
                let outcome = record.category(outcome_field)?;
                Some((value, outcome_domain.position(&outcome)))
            })
            .collect::<Vec<_>>();

        let edges = BinEdges::from_values(
            observations
                .iter()
                .map(|(value, _)| *value)
                .filter(|value| value.is_finite()),
            bin_count,
        );

        let mut bin_counts = edges.as_ref().map_or_else(Vec::new, |edges| {
            vec![OutcomeCounts::zeroed(outcome_domain); edges.num_bins()]
        });
        let mut not_a_number = OutcomeCounts::zeroed(outcome_domain);

        for (value, outcome_idx) in &observations {
            let Some(outcome_idx) = *outcome_idx else {
                continue;
            };
            match edges.as_ref().and_then(|edges| edges.bin_index(*value)) {
                Some(bin_idx) => bin_counts[bin_idx].increment(outcome_idx),
                None => not_a_number.increment(outcome_idx),
            }
        }
        tracing::debug!(
            value_field,
            outcome_field,
            bin_count,
            filtered = observations.len(),
            edges = ?edges.as_ref().map(BinEdges::as_slice),
            "binned continuous field"
        );

        let bins = match &edges {
            Some(edges) => edges
                .ranges()
                .zip(bin_counts)
                .map(|(range, counts)| BinSummary::new(range, counts))
                .collect(),
            None => vec![],
        };
        Ok(BinnedOutcomes { bins, not_a_number })
    }

    /// Computes box-plot statistics of `value_field` per category.
    ///
    /// Returns one [`QuartileSummary`] per label of `group_domain`, in domain
    /// order. Quartiles use linear interpolation between order statistics. An
    /// empty partition has `summary == None`; a partition containing NaN has
    /// an all-NaN summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::{aggregate::TabularAggregator, domain::Domain, record::Record};
    ///
    /// let records = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0]
    ///     .map(|level| Record::new().with_field("Status", "Yes").with_field("Cholesterol", level));
    /// let summaries = TabularAggregator::new(&records)
    ///     .quartiles_by_category("Status", "Cholesterol", &Domain::new(["Yes", "No"]));
    ///
    /// let yes = summaries[0].summary.unwrap();
    /// assert_eq!((yes.min, yes.q1, yes.median, yes.q3, yes.max), (10.0, 12.5, 15.0, 17.5, 20.0));
    /// assert_eq!(summaries[1].count, 0);
    /// assert!(summaries[1].summary.is_none());
    /// ```
    #[must_use]
    pub fn quartiles_by_category(
        &self,
        group_field: &str,
        value_field: &str,
        group_domain: &Domain,
    ) -> Vec<QuartileSummary> {
        let mut partitions = vec![Vec::<f64>::new(); group_domain.len()];
        for record in self.records {
            let (Some(group), Some(value)) = (record.category(group_field), record.number(value_field))
            else {
                continue;
            };
            if let Some(group_idx) = group_domain.position(&group) {
                partitions[group_idx].push(value);
            }
        }
        tracing::debug!(
            group_field,
            value_field,
            partitioned = partitions.iter().map(Vec::len).sum::<usize>(),
            "partitioned values by category"
        );

        group_domain
            .iter()
            .zip(partitions)
            .map(|(group, mut values)| {
                values.sort_by(f64::total_cmp);
                QuartileSummary {
                    group: group.to_owned(),
                    count: values.len(),
                    summary: BoxSummary::from_sorted(&values),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Heart Disease Status";

    fn yes_no() -> Domain {
        Domain::new(["Yes", "No"])
    }

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn bmi_records(values: &[(f64, &str)]) -> Vec<Record> {
        values
            .iter()
            .map(|&(bmi, status)| Record::new().with_field("BMI", bmi).with_field(STATUS, status))
            .collect()
    }

    #[test]
    fn test_gender_scenario() {
        let records = [
            record(&[("Gender", "Female"), (STATUS, "Yes")]),
            record(&[("Gender", "Female"), (STATUS, "No")]),
            record(&[("Gender", "Male"), (STATUS, "Yes")]),
        ];
        let summaries = TabularAggregator::new(&records).group_by_category(
            "Gender",
            STATUS,
            &Domain::new(["Female", "Male"]),
            &yes_no(),
        );

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].group, "Female");
        assert_eq!(summaries[0].count("Yes"), Some(1));
        assert_eq!(summaries[0].count("No"), Some(1));
        assert_eq!(summaries[0].total, 2);
        assert_eq!(summaries[1].group, "Male");
        assert_eq!(summaries[1].count("Yes"), Some(1));
        assert_eq!(summaries[1].count("No"), Some(0));
        assert_eq!(summaries[1].total, 1);

        let female = summaries[0].percentages().collect::<Vec<_>>();
        assert_eq!(female, [("Yes", 50.0), ("No", 50.0)]);
        let male = summaries[1].percentages().collect::<Vec<_>>();
        assert_eq!(male, [("Yes", 100.0), ("No", 0.0)]);
    }

    #[test]
    fn test_empty_records_yield_zero_filled_groups() {
        let groups = Domain::new(["Low", "Medium", "High"]);
        let summaries =
            TabularAggregator::new(&[]).group_by_category("Exercise Habits", STATUS, &groups, &yes_no());

        assert_eq!(
            summaries.iter().map(|s| s.group.as_str()).collect::<Vec<_>>(),
            ["Low", "Medium", "High"]
        );
        for summary in &summaries {
            assert_eq!(summary.total, 0);
            assert!(summary.percentages().all(|(_, p)| p == 0.0));
        }
    }

    #[test]
    fn test_missing_fields_are_filtered() {
        let records = [
            record(&[("Smoking", "Yes"), (STATUS, "Yes")]),
            record(&[("Smoking", ""), (STATUS, "Yes")]),
            record(&[("Smoking", "No")]),
            record(&[("Smoking", "No"), (STATUS, "  ")]),
            record(&[("Smoking", "No"), (STATUS, "No")]),
        ];
        let summaries = TabularAggregator::new(&records).group_by_category(
            "Smoking",
            STATUS,
            &yes_no(),
            &yes_no(),
        );
        assert_eq!(summaries[0].total, 1);
        assert_eq!(summaries[1].total, 1);
    }

    #[test]
    fn test_out_of_domain_values_are_not_counted() {
        let records = [
            record(&[("Exercise Habits", "Low"), (STATUS, "Yes")]),
            record(&[("Exercise Habits", "Extreme"), (STATUS, "Yes")]),
            record(&[("Exercise Habits", "Low"), (STATUS, "Unknown")]),
        ];
        let summaries = TabularAggregator::new(&records).group_by_category(
            "Exercise Habits",
            STATUS,
            &Domain::new(["Low", "Medium", "High"]),
            &yes_no(),
        );
        assert_eq!(summaries[0].total, 1);
        assert_eq!(summaries[0].count("Yes"), Some(1));
        assert!(summaries[1].is_empty());
        assert!(summaries[2].is_empty());
    }

    #[test]
    fn test_group_percentages_sum_to_hundred() {
        let statuses = ["Yes", "No", "No", "Yes", "No", "No", "No"];
        let records = statuses
            .iter()
            .map(|status| record(&[("Gender", "Female"), (STATUS, status)]))
            .collect::<Vec<_>>();
        let summaries = TabularAggregator::new(&records).group_by_category(
            "Gender",
            STATUS,
            &Domain::new(["Female"]),
            &yes_no(),
        );
        let sum = summaries[0].percentages().map(|(_, p)| p).sum::<f64>();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = bmi_records(&[(18.2, "No"), (25.0, "Yes"), (31.9, "Yes"), (f64::NAN, "No")]);
        let aggregator = TabularAggregator::new(&records);
        let first = aggregator.bin_continuous("BMI", STATUS, 3, &yes_no()).unwrap();
        let second = aggregator.bin_continuous("BMI", STATUS, 3, &yes_no()).unwrap();
        assert_eq!(first, second);

        let groups = aggregator.group_by_category("BMI", STATUS, &Domain::new(["25"]), &yes_no());
        assert_eq!(
            groups,
            aggregator.group_by_category("BMI", STATUS, &Domain::new(["25"]), &yes_no())
        );
    }

    #[test]
    fn test_single_bin_spans_extent() {
        let records = bmi_records(&[(21.0, "No"), (35.5, "Yes"), (18.5, "Yes"), (40.0, "No")]);
        let binned = TabularAggregator::new(&records)
            .bin_continuous("BMI", STATUS, 1, &yes_no())
            .unwrap();

        assert_eq!(binned.bins.len(), 1);
        assert_eq!(binned.bins[0].range(), 18.5..40.0);
        assert_eq!(binned.bins[0].total, 4);
    }

    #[test]
    fn test_bin_counts_preserve_outcome_totals() {
        let values = (0..57)
            .map(|i| {
                let bmi = 15.0 + f64::from(i) * 0.731;
                (bmi, if i % 3 == 0 { "Yes" } else { "No" })
            })
            .collect::<Vec<_>>();
        let records = bmi_records(&values);
        for bin_count in [1, 2, 5, 7, 10, 33] {
            let binned = TabularAggregator::new(&records)
                .bin_continuous("BMI", STATUS, bin_count, &yes_no())
                .unwrap();
            assert_eq!(binned.bins.len(), bin_count);
            let yes = binned.bins.iter().filter_map(|b| b.count("Yes")).sum::<u64>();
            let no = binned.bins.iter().filter_map(|b| b.count("No")).sum::<u64>();
            assert_eq!(yes, 19);
            assert_eq!(no, 38);
            for pair in binned.bins.windows(2) {
                assert_eq!(pair[0].x1, pair[1].x0);
            }
        }
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let records = bmi_records(&[(10.0, "No"), (20.0, "Yes")]);
        let binned = TabularAggregator::new(&records)
            .bin_continuous("BMI", STATUS, 4, &yes_no())
            .unwrap();
        assert_eq!(binned.bins[0].count("No"), Some(1));
        assert_eq!(binned.bins[3].count("Yes"), Some(1));
        assert_eq!(binned.bins[3].x1, 20.0);
    }

    #[test]
    fn test_extreme_values_keep_ordered_bounds() {
        let records = bmi_records(&[(-1e308, "No"), (1e308, "Yes")]);
        let binned = TabularAggregator::new(&records)
            .bin_continuous("BMI", STATUS, 2, &yes_no())
            .unwrap();
        assert_eq!(binned.bins[0].range(), -1e308..0.0);
        assert_eq!(binned.bins[1].range(), 0.0..1e308);
        assert_eq!(binned.bins[0].count("No"), Some(1));
        assert_eq!(binned.bins[1].count("Yes"), Some(1));
        assert_eq!(binned.not_a_number.total(), 0);
    }

    #[test]
    fn test_degenerate_domain_single_bin() {
        let records = bmi_records(&[(24.0, "No"), (24.0, "Yes"), (24.0, "Yes")]);
        let binned = TabularAggregator::new(&records)
            .bin_continuous("BMI", STATUS, 10, &yes_no())
            .unwrap();
        assert_eq!(binned.bins.len(), 1);
        assert_eq!(binned.bins[0].range(), 24.0..24.0);
        assert_eq!(binned.bins[0].count("Yes"), Some(2));
        assert_eq!(binned.bins[0].count("No"), Some(1));
    }

    #[test]
    fn test_nan_values_are_tallied_separately() {
        let records = bmi_records(&[(20.0, "No"), (f64::NAN, "Yes"), (30.0, "Yes")]);
        let binned = TabularAggregator::new(&records)
            .bin_continuous("BMI", STATUS, 2, &yes_no())
            .unwrap();
        assert_eq!(binned.not_a_number.get("Yes"), Some(1));
        assert_eq!(binned.bins.iter().map(|b| b.total).sum::<u64>(), 2);
        assert_eq!(binned.outcome_total("Yes"), 2);
        assert_eq!(binned.outcome_total("No"), 1);
    }

    #[test]
    fn test_bins_without_defined_values() {
        let aggregator_input = bmi_records(&[(f64::NAN, "No")]);
        let binned = TabularAggregator::new(&aggregator_input)
            .bin_continuous("BMI", STATUS, 3, &yes_no())
            .unwrap();
        assert!(binned.bins.is_empty());
        assert_eq!(binned.not_a_number.get("No"), Some(1));

        let empty = TabularAggregator::new(&[])
            .bin_continuous("BMI", STATUS, 3, &yes_no())
            .unwrap();
        assert!(empty.bins.is_empty());
        assert_eq!(empty.not_a_number.total(), 0);
    }

    #[test]
    fn test_zero_bin_count_is_rejected() {
        let records = bmi_records(&[(20.0, "No")]);
        let result = TabularAggregator::new(&records).bin_continuous("BMI", STATUS, 0, &yes_no());
        assert!(matches!(result, Err(AggregateError::ZeroBinCount)));
    }

    #[test]
    fn test_quartiles_scenario() {
        let records = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0]
            .map(|v| Record::new().with_field("Gender", "Male").with_field("Cholesterol Level", v));
        let summaries = TabularAggregator::new(&records).quartiles_by_category(
            "Gender",
            "Cholesterol Level",
            &Domain::new(["Male"]),
        );
        let summary = summaries[0].summary.unwrap();
        assert_eq!(summaries[0].count, 6);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 20.0);
        assert_eq!(summary.median, 15.0);
        assert!(summary.min <= summary.q1);
        assert!(summary.q1 <= summary.median);
        assert!(summary.median <= summary.q3);
        assert!(summary.q3 <= summary.max);
        assert_eq!(summary.q1, 12.5);
        assert_eq!(summary.q3, 17.5);
    }

    #[test]
    fn test_quartiles_propagate_nan() {
        let records = [
            record(&[(STATUS, "Yes"), ("Cholesterol Level", "210")]),
            record(&[(STATUS, "Yes"), ("Cholesterol Level", "high")]),
            record(&[(STATUS, "No"), ("Cholesterol Level", "180")]),
            record(&[(STATUS, "No"), ("Cholesterol Level", "")]),
        ];
        let summaries = TabularAggregator::new(&records).quartiles_by_category(
            STATUS,
            "Cholesterol Level",
            &yes_no(),
        );
        assert_eq!(summaries[0].count, 2);
        assert!(summaries[0].summary.unwrap().median.is_nan());
        assert_eq!(summaries[1].count, 1);
        assert_eq!(summaries[1].summary.unwrap().median, 180.0);
    }
}
