//! Line series read from pivot tables
//!
//! A pivot table has one x column and one value column per series, e.g.
//!
//! ```text
//! Healthy Lifestyle Score,<35,36-55,55+
//! 1,12.5,20.1,31.0
//! 2,10.0,18.4,27.9
//! ```

use cardiostat_stats::histogram::value_extent;
use serde::Serialize;

use crate::record::Record;

/// One named sequence of `(x, y)` points, ascending by `x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl LineSeries {
    /// Builds one series per entry of `series_fields`, in that order.
    ///
    /// Rows missing `x_field` or the series' field are skipped for that series.
    /// Malformed numbers are kept as NaN. Points are sorted by `x` with ties
    /// keeping row order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::{record::Record, series::LineSeries};
    ///
    /// let rows = [
    ///     Record::from_iter([("Score", "2"), ("<35", "10.0"), ("55+", "27.9")]),
    ///     Record::from_iter([("Score", "1"), ("<35", "12.5"), ("55+", "")]),
    /// ];
    /// let series = LineSeries::from_pivot(&rows, "Score", &["<35", "55+"]);
    ///
    /// assert_eq!(series[0].name, "<35");
    /// assert_eq!(series[0].points, [(1.0, 12.5), (2.0, 10.0)]);
    /// assert_eq!(series[1].points, [(2.0, 27.9)]);
    /// ```
    #[must_use]
    pub fn from_pivot<S>(records: &[Record], x_field: &str, series_fields: &[S]) -> Vec<Self>
    where
        S: AsRef<str>,
    {
        series_fields
            .iter()
            .map(|field| {
                let field = field.as_ref();
                let mut points = records
                    .iter()
                    .filter_map(|record| Some((record.number(x_field)?, record.number(field)?)))
                    .collect::<Vec<_>>();
                points.sort_by(|a, b| a.0.total_cmp(&b.0));
                Self {
                    name: field.to_owned(),
                    points,
                }
            })
            .collect()
    }

    pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, y)| y)
    }
}

/// `(min, max)` over the non-NaN `y` values of every series.
///
/// # Examples
///
/// ```
/// use cardiostat_analysis::series::{LineSeries, series_extent};
///
/// let series = [
///     LineSeries { name: "a".into(), points: vec![(1.0, 4.0), (2.0, f64::NAN)] },
///     LineSeries { name: "b".into(), points: vec![(1.0, 9.0)] },
/// ];
/// assert_eq!(series_extent(&series), Some((4.0, 9.0)));
/// assert_eq!(series_extent(&[]), None);
/// ```
#[must_use]
pub fn series_extent(series: &[LineSeries]) -> Option<(f64, f64)> {
    value_extent(series.iter().flat_map(LineSeries::y_values))
}
