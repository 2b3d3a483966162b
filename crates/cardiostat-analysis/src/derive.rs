//! Categorical fields derived from numeric thresholds
//!
//! Several charts group by a classification of a continuous field rather than
//! by a raw column: age brackets, or cholesterol risk levels. A [`Bucketing`]
//! is an ordered list of [`BucketRule`]s; the first rule whose interval
//! contains a value gives its label.
//!
//! Use [`Dataset::with_bucketed_field`](crate::record::Dataset::with_bucketed_field)
//! to materialize the classification as a new field, and [`Bucketing::labels`]
//! as the group domain for it.

use std::ops::{Bound, RangeBounds as _};

use crate::domain::Domain;

/// A labelled interval.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRule {
    pub label: String,
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl BucketRule {
    #[must_use]
    pub fn new(label: impl Into<String>, lower: Bound<f64>, upper: Bound<f64>) -> Self {
        Self {
            label: label.into(),
            lower,
            upper,
        }
    }

    /// Returns `true` if `value` lies in the interval. NaN is never contained.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        !value.is_nan() && (self.lower, self.upper).contains(&value)
    }
}

/// Ordered threshold rules turning a number into a category label.
///
/// # Examples
///
/// ```
/// use cardiostat_analysis::derive::Bucketing;
///
/// let risk = Bucketing::cholesterol_risk();
/// assert_eq!(risk.classify(185.0), Some("Healthy"));
/// assert_eq!(risk.classify(200.0), Some("At risk"));
/// assert_eq!(risk.classify(240.0), Some("Dangerous"));
/// assert_eq!(risk.classify(f64::NAN), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bucketing {
    rules: Vec<BucketRule>,
}

impl Bucketing {
    #[must_use]
    pub fn new(rules: Vec<BucketRule>) -> Self {
        Self { rules }
    }

    /// Age brackets `18–35`, `36–55`, and `>55`, with both ends of the first
    /// two brackets inclusive. Ages under 18 get no bracket.
    #[must_use]
    pub fn age_brackets() -> Self {
        use Bound::{Excluded, Included, Unbounded};
        Self::new(vec![
            BucketRule::new("18–35", Included(18.0), Included(35.0)),
            BucketRule::new("36–55", Included(36.0), Included(55.0)),
            BucketRule::new(">55", Excluded(55.0), Unbounded),
        ])
    }

    /// Total cholesterol levels: `Healthy` below 200, `At risk` below 240,
    /// `Dangerous` from 240 up. NaN matches no level rather than falling
    /// through to `Dangerous`.
    #[must_use]
    pub fn cholesterol_risk() -> Self {
        use Bound::{Excluded, Included, Unbounded};
        Self::new(vec![
            BucketRule::new("Healthy", Unbounded, Excluded(200.0)),
            BucketRule::new("At risk", Included(200.0), Excluded(240.0)),
            BucketRule::new("Dangerous", Included(240.0), Unbounded),
        ])
    }

    /// Label of the first rule containing `value`.
    #[must_use]
    pub fn classify(&self, value: f64) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.contains(value))
            .map(|rule| rule.label.as_str())
    }

    /// Rule labels in rule order, suitable as a group domain.
    #[must_use]
    pub fn labels(&self) -> Domain {
        self.rules.iter().map(|rule| rule.label.as_str()).collect()
    }

    #[must_use]
    pub fn rules(&self) -> &[BucketRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bracket_boundaries() {
        let ages = Bucketing::age_brackets();
        assert_eq!(ages.classify(17.0), None);
        assert_eq!(ages.classify(18.0), Some("18–35"));
        assert_eq!(ages.classify(35.0), Some("18–35"));
        assert_eq!(ages.classify(35.5), None);
        assert_eq!(ages.classify(36.0), Some("36–55"));
        assert_eq!(ages.classify(55.0), Some("36–55"));
        assert_eq!(ages.classify(55.5), Some(">55"));
        assert_eq!(ages.classify(56.0), Some(">55"));
        assert_eq!(ages.classify(90.0), Some(">55"));
    }

    #[test]
    fn test_cholesterol_boundaries() {
        let risk = Bucketing::cholesterol_risk();
        assert_eq!(risk.classify(199.9), Some("Healthy"));
        assert_eq!(risk.classify(239.99), Some("At risk"));
        assert_eq!(risk.classify(400.0), Some("Dangerous"));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        use Bound::{Included, Unbounded};
        let bucketing = Bucketing::new(vec![
            BucketRule::new("low", Unbounded, Included(10.0)),
            BucketRule::new("any", Unbounded, Unbounded),
        ]);
        assert_eq!(bucketing.classify(5.0), Some("low"));
        assert_eq!(bucketing.classify(50.0), Some("any"));
        assert_eq!(bucketing.classify(f64::NAN), None);
    }

    #[test]
    fn test_labels_domain() {
        assert_eq!(
            Bucketing::cholesterol_risk().labels().labels(),
            ["Healthy", "At risk", "Dangerous"]
        );
    }
}
