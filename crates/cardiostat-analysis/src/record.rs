//! Tabular records and datasets
//!
//! A [`Record`] is one row of a survey table: a mapping from column name to
//! [`Value`]. A [`Dataset`] is the ordered collection of records produced by a
//! single load, together with the column names in header order.
//!
//! # Missing vs. malformed values
//!
//! The two cases are kept apart on purpose:
//!
//! - A **missing** value is an absent field or blank text. Aggregations skip
//!   such records for the fields they need.
//! - A **malformed** number is stored as `Value::Number(f64::NAN)`. It is
//!   present, so aggregations keep the record and carry the NaN into their
//!   summaries.
//!
//! # Examples
//!
//! ```
//! use cardiostat_analysis::record::{Record, Value};
//!
//! let record = Record::from_iter([
//!     ("Gender", Value::from("Female")),
//!     ("BMI", Value::parse_number("not measured")),
//!     ("Smoking", Value::from("  ")),
//! ]);
//!
//! assert_eq!(record.category("Gender").as_deref(), Some("Female"));
//! assert!(record.number("BMI").unwrap().is_nan());
//! assert!(record.is_missing("Smoking"));
//! assert!(record.is_missing("Age"));
//! ```

use std::{borrow::Cow, collections::BTreeMap};

use serde::Serialize;

use crate::{aggregate::TabularAggregator, derive::Bucketing};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    /// A numeric value; `NaN` marks text that failed to parse.
    Number(f64),
}

impl Value {
    /// Coerces text to a number.
    ///
    /// Surrounding whitespace is ignored. Text that does not parse as a finite
    /// number becomes `NaN`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::record::Value;
    ///
    /// assert_eq!(Value::parse_number(" 27.5 "), Value::Number(27.5));
    /// assert!(matches!(Value::parse_number("n/a"), Value::Number(v) if v.is_nan()));
    /// ```
    #[must_use]
    pub fn parse_number(text: &str) -> Self {
        Self::Number(coerce_number(text))
    }

    /// Returns `true` for blank text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Returns the value as a category label, or `None` if it is blank.
    ///
    /// Numbers are rendered with their shortest display form (`55.0` becomes `"55"`).
    #[must_use]
    pub fn as_category(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then_some(Cow::Borrowed(text))
            }
            Self::Number(number) => Some(Cow::Owned(number.to_string())),
        }
    }

    /// Returns the value as a number, or `None` if it is blank.
    ///
    /// Non-blank text is coerced with the same rules as [`Value::parse_number`].
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => Some(coerce_number(text)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

fn coerce_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// One row of a tabular dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this record with `field` set to `value`.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if `field` is absent or blank.
    #[must_use]
    pub fn is_missing(&self, field: &str) -> bool {
        self.get(field).is_none_or(Value::is_blank)
    }

    /// Returns `field` as a category label, or `None` if it is missing.
    #[must_use]
    pub fn category(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).and_then(Value::as_category)
    }

    /// Returns `field` as a number, or `None` if it is missing.
    ///
    /// Present but malformed values yield `Some(NaN)`.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_number)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// The records produced by one load, with their column names in header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn aggregator(&self) -> TabularAggregator<'_> {
        TabularAggregator::new(&self.records)
    }

    /// Returns a new dataset with a categorical `target` field derived from the
    /// numeric `source` field.
    ///
    /// Records whose source is missing, NaN, or matched by no rule are kept but
    /// lack `target`, so aggregations over `target` skip them. A NaN source is
    /// never guessed into a bucket; the number of such records is logged as a
    /// warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::{derive::Bucketing, record::{Dataset, Record}};
    ///
    /// let dataset = Dataset::new(
    ///     vec!["Age".into()],
    ///     vec![
    ///         Record::new().with_field("Age", 30.0),
    ///         Record::new().with_field("Age", 12.0),
    ///     ],
    /// );
    /// let derived = dataset.with_bucketed_field("Age", "Age Group", &Bucketing::age_brackets());
    ///
    /// assert_eq!(derived.columns(), ["Age", "Age Group"]);
    /// assert_eq!(derived.records()[0].category("Age Group").as_deref(), Some("18–35"));
    /// assert!(derived.records()[1].is_missing("Age Group"));
    /// ```
    #[must_use]
    pub fn with_bucketed_field(&self, source: &str, target: &str, bucketing: &Bucketing) -> Self {
        let mut columns = self.columns.clone();
        if !columns.iter().any(|column| column == target) {
            columns.push(target.to_owned());
        }
        let mut not_a_number = 0_usize;
        let records = self
            .records
            .iter()
            .map(|record| {
                let mut derived = record.clone();
                derived.fields.remove(target);
                let value = record.number(source);
                if value.is_some_and(f64::is_nan) {
                    not_a_number += 1;
                }
                match value.and_then(|v| bucketing.classify(v)) {
                    Some(label) => derived.with_field(target, label),
                    None => derived,
                }
            })
            .collect::<Vec<_>>();
        if not_a_number > 0 {
            tracing::warn!(
                source,
                target,
                not_a_number,
                "non-numeric source values left unclassified"
            );
        }
        tracing::debug!(
            source,
            target,
            classified = records.iter().filter(|r| !r.is_missing(target)).count(),
            total = records.len(),
            "derived bucketed field"
        );
        Self { columns, records }
    }

    /// Keeps only `fields`, dropping every record that is missing any of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::record::{Dataset, Record};
    ///
    /// let dataset = Dataset::new(
    ///     vec!["Family Heart Disease".into(), "Heart Disease Status".into(), "BMI".into()],
    ///     vec![
    ///         Record::from_iter([("Family Heart Disease", "Yes"), ("Heart Disease Status", "No"), ("BMI", "24")]),
    ///         Record::from_iter([("Family Heart Disease", ""), ("Heart Disease Status", "Yes")]),
    ///     ],
    /// );
    /// let projected = dataset.project(&["Family Heart Disease", "Heart Disease Status"]);
    ///
    /// assert_eq!(projected.len(), 1);
    /// assert!(projected.records()[0].get("BMI").is_none());
    /// ```
    #[must_use]
    pub fn project<S>(&self, fields: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let records = self
            .records
            .iter()
            .filter(|record| fields.iter().all(|f| !record.is_missing(f.as_ref())))
            .map(|record| {
                fields
                    .iter()
                    .filter_map(|f| Some((f.as_ref(), record.get(f.as_ref())?.clone())))
                    .collect::<Record>()
            })
            .collect();
        Self {
            columns: fields.iter().map(|f| f.as_ref().to_owned()).collect(),
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_category_display() {
        assert_eq!(Value::Number(55.0).as_category().as_deref(), Some("55"));
        assert_eq!(Value::Number(55.5).as_category().as_deref(), Some("55.5"));
    }

    #[test]
    fn test_text_is_trimmed_for_category() {
        let record = Record::new().with_field("Gender", " Male ");
        assert_eq!(record.category("Gender").as_deref(), Some("Male"));
    }

    #[test]
    fn test_text_number_coercion() {
        let record = Record::from_iter([("Age", "42"), ("BMI", "abc"), ("Chol", "")]);
        assert_eq!(record.number("Age"), Some(42.0));
        assert!(record.number("BMI").unwrap().is_nan());
        assert_eq!(record.number("Chol"), None);
    }

    #[test]
    fn test_non_finite_text_is_nan() {
        assert!(Value::parse_number("inf").as_number().unwrap().is_nan());
        assert!(Value::parse_number("NaN").as_number().unwrap().is_nan());
    }

    #[test]
    fn test_nan_is_present_not_missing() {
        let record = Record::new().with_field("BMI", f64::NAN);
        assert!(!record.is_missing("BMI"));
    }

    #[test]
    fn test_record_serializes_as_flat_object() {
        let record = Record::from_iter([
            ("Gender", Value::from("Male")),
            ("Age", Value::from(40.0)),
        ]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"Age": 40.0, "Gender": "Male"}));
    }

    #[test]
    fn test_bucketed_field_leaves_nan_unclassified() {
        let dataset = Dataset::new(
            vec!["Cholesterol Level".into()],
            vec![
                Record::new().with_field("Cholesterol Level", Value::parse_number("high")),
                Record::new().with_field("Cholesterol Level", 250.0),
                Record::new(),
            ],
        );
        let derived =
            dataset.with_bucketed_field("Cholesterol Level", "Risk", &Bucketing::cholesterol_risk());

        assert_eq!(derived.len(), 3);
        assert!(derived.records()[0].is_missing("Risk"));
        assert!(derived.records()[0].number("Cholesterol Level").unwrap().is_nan());
        assert_eq!(derived.records()[1].category("Risk").as_deref(), Some("Dangerous"));
        assert!(derived.records()[2].is_missing("Risk"));
    }

    #[test]
    fn test_project_keeps_field_order_in_columns() {
        let dataset = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![Record::from_iter([("a", "1"), ("b", "2")])],
        );
        let projected = dataset.project(&["b", "a"]);
        assert_eq!(projected.columns(), ["b", "a"]);
        assert_eq!(projected.len(), 1);
    }
}
