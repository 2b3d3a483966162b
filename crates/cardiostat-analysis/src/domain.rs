//! Ordered category domains
//!
//! A [`Domain`] fixes which category labels an aggregation reports and in
//! which order. Charts need stable ordering (`Low`, `Medium`, `High` rather
//! than whatever order the data happens to be in), and groups that never
//! occur in the data must still be reported.

use serde::Serialize;

use crate::record::Record;

/// An ordered, de-duplicated list of category labels.
///
/// # Examples
///
/// ```
/// use cardiostat_analysis::domain::Domain;
///
/// let domain = Domain::new(["Low", "Medium", "High", "Low"]);
/// assert_eq!(domain.labels(), ["Low", "Medium", "High"]);
/// assert_eq!(domain.position("High"), Some(2));
/// assert_eq!(domain.position("Extreme"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Domain {
    labels: Vec<String>,
}

impl Domain {
    /// Builds a domain from labels, keeping the first occurrence of duplicates.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain = Self::default();
        for label in labels {
            domain.push(label.into());
        }
        domain
    }

    /// Builds a domain from the values of `field`, in order of first appearance.
    ///
    /// Records missing `field` are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::{domain::Domain, record::Record};
    ///
    /// let records = [
    ///     Record::from_iter([("Family Heart Disease", "No")]),
    ///     Record::from_iter([("Family Heart Disease", "")]),
    ///     Record::from_iter([("Family Heart Disease", "Yes")]),
    ///     Record::from_iter([("Family Heart Disease", "No")]),
    /// ];
    /// let domain = Domain::observed(&records, "Family Heart Disease");
    /// assert_eq!(domain.labels(), ["No", "Yes"]);
    /// ```
    #[must_use]
    pub fn observed(records: &[Record], field: &str) -> Self {
        let mut domain = Self::default();
        for record in records {
            if let Some(label) = record.category(field)
                && domain.position(&label).is_none()
            {
                domain.labels.push(label.into_owned());
            }
        }
        domain
    }

    fn push(&mut self, label: String) {
        if self.position(&label).is_none() {
            self.labels.push(label);
        }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }
}

impl<S> FromIterator<S> for Domain
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
