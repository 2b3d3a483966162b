//! Interpolated percentiles and five-number summaries

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest order statistics.
/// With `n` values and `h = (n - 1) * percentile / 100`, the result is
/// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
///
/// The percentile is clamped to `0.0..=100.0`.
///
/// # Returns
///
/// The interpolated value. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use cardiostat_stats::percentiles::compute_percentile;
///
/// let values = vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
///
/// assert_eq!(compute_percentile(&values, 0.0), 10.0);
/// assert_eq!(compute_percentile(&values, 50.0), 15.0);
/// assert_eq!(compute_percentile(&values, 75.0), 17.5);
/// assert_eq!(compute_percentile(&values, 100.0), 20.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(&last) = sorted_values.last() else {
        return f64::NAN;
    };
    let h = (sorted_values.len() - 1) as f64 * (percentile.clamp(0.0, 100.0) / 100.0);
    let lower = h.floor() as usize;
    if lower + 1 >= sorted_values.len() {
        return last;
    }
    let lo = sorted_values[lower];
    let hi = sorted_values[lower + 1];
    lo + (h - h.floor()) * (hi - lo)
}

/// Five-number summary of a dataset: min, first quartile, median, third quartile, max.
///
/// If any input value is NaN, every field is NaN.
///
/// # Examples
///
/// ```
/// use cardiostat_stats::percentiles::Quartiles;
///
/// let q = Quartiles::new([20.0, 10.0, 14.0, 12.0, 18.0, 16.0]).unwrap();
/// assert_eq!(q.min, 10.0);
/// assert_eq!(q.q1, 12.5);
/// assert_eq!(q.median, 15.0);
/// assert_eq!(q.q3, 17.5);
/// assert_eq!(q.max, 20.0);
///
/// assert!(Quartiles::new(Vec::new()).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Quartiles {
    /// All-NaN summary.
    pub const NAN: Self = Self {
        min: f64::NAN,
        q1: f64::NAN,
        median: f64::NAN,
        q3: f64::NAN,
        max: f64::NAN,
    };

    /// Computes the summary from unsorted values.
    ///
    /// Returns `None` for an empty dataset.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes the summary from values sorted by [`f64::total_cmp`].
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }
        if sorted_values.iter().any(|v| v.is_nan()) {
            return Some(Self::NAN);
        }
        Some(Self {
            min: sorted_values[0],
            q1: compute_percentile(sorted_values, 25.0),
            median: compute_percentile(sorted_values, 50.0),
            q3: compute_percentile(sorted_values, 75.0),
            max: sorted_values[sorted_values.len() - 1],
        })
    }
}
