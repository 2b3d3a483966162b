use std::ops::Range;

/// Boundaries of equal-width histogram bins over a closed interval `[min, max]`.
///
/// Every bin is half-open (`[x0, x1)`) except the last one, which is closed on
/// the right so that `max` itself belongs to it. When `min == max` the edges
/// describe a single zero-width bin holding exactly that value.
///
/// # Examples
///
/// ```
/// use cardiostat_stats::histogram::BinEdges;
///
/// let edges = BinEdges::equal_width(0.0, 10.0, 4).unwrap();
/// assert_eq!(edges.num_bins(), 4);
/// assert_eq!(edges.bin_range(1), 2.5..5.0);
///
/// assert_eq!(edges.bin_index(0.0), Some(0));
/// assert_eq!(edges.bin_index(2.5), Some(1));
/// assert_eq!(edges.bin_index(10.0), Some(3));
/// assert_eq!(edges.bin_index(10.5), None);
/// assert_eq!(edges.bin_index(f64::NAN), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    /// `num_bins + 1` ascending boundaries; the first is `min` and the last is `max`.
    edges: Vec<f64>,
}

impl BinEdges {
    /// Splits `[min, max]` into `num_bins` intervals of equal width.
    ///
    /// Returns `None` if `num_bins` is zero, if either bound is not finite, or
    /// if `min > max`. A degenerate interval (`min == max`) always yields a
    /// single bin regardless of `num_bins`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn equal_width(min: f64, max: f64, num_bins: usize) -> Option<Self> {
        if num_bins == 0 || !min.is_finite() || !max.is_finite() || min > max {
            return None;
        }
        if max - min <= 0.0 {
            return Some(Self {
                edges: vec![min, max],
            });
        }

        // Weighted form: `max - min` overflows for extents wider than `f64::MAX`.
        // Each edge is computed from its index to avoid accumulating rounding error.
        let mut edges = (0..num_bins)
            .map(|i| {
                let t = i as f64 / num_bins as f64;
                f64::min(min * (1.0 - t) + max * t, max)
            })
            .collect::<Vec<_>>();
        edges.push(max);
        Some(Self { edges })
    }

    /// Builds edges spanning the finite extent of `values`.
    ///
    /// NaN values are ignored when computing the extent. Returns `None` when no
    /// value is defined or `num_bins` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_stats::histogram::BinEdges;
    ///
    /// let edges = BinEdges::from_values([3.0, f64::NAN, 1.0, 5.0], 2).unwrap();
    /// assert_eq!(edges.min(), 1.0);
    /// assert_eq!(edges.max(), 5.0);
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I, num_bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = value_extent(values)?;
        Self::equal_width(min, max, num_bins)
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.edges.len() - 1
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    /// Returns the bounds of the bin at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_bins()`.
    #[must_use]
    pub fn bin_range(&self, index: usize) -> Range<f64> {
        self.edges[index]..self.edges[index + 1]
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<f64>> + '_ {
        self.edges.windows(2).map(|w| w[0]..w[1])
    }

    /// Finds the bin containing `value`.
    ///
    /// Returns `None` for NaN and for values outside `[min, max]`.
    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if value.is_nan() || value < self.min() || value > self.max() {
            return None;
        }
        let inner = &self.edges[1..self.edges.len() - 1];
        Some(inner.partition_point(|edge| *edge <= value))
    }
}

/// Returns `(min, max)` over the non-NaN values, or `None` if there are none.
///
/// # Examples
///
/// ```
/// use cardiostat_stats::histogram::value_extent;
///
/// assert_eq!(value_extent([4.0, f64::NAN, -1.0]), Some((-1.0, 4.0)));
/// assert_eq!(value_extent([f64::NAN]), None);
/// ```
#[must_use]
pub fn value_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
        })
}
