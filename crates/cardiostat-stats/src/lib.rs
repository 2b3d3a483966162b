//! Numeric building blocks for the cardiostat aggregation pipeline.
//!
//! This crate provides a collection of statistical tools including:
//!
//! - **Descriptive statistics**: count, min, max, mean, median, variance, standard deviation
//! - **Percentiles**: linearly interpolated percentiles and five-number summaries
//! - **Histogram binning**: equal-width bin edges over a closed interval
//!
//! None of these functions drop NaN silently. Descriptive statistics and
//! quartiles turn NaN-contaminated input into NaN output, while bin lookup
//! reports NaN as belonging to no bin so callers can tally it separately.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and quartile summaries
//! - [`histogram`]: Equal-width bin edges and value extents
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use cardiostat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing a box-plot summary
//!
//! ```
//! use cardiostat_stats::percentiles::Quartiles;
//!
//! let q = Quartiles::new([10.0, 12.0, 14.0, 16.0, 18.0, 20.0]).unwrap();
//! assert_eq!(q.median, 15.0);
//! assert!(q.min <= q.q1 && q.q1 <= q.median && q.median <= q.q3 && q.q3 <= q.max);
//! ```
//!
//! ## Binning values
//!
//! ```
//! use cardiostat_stats::histogram::BinEdges;
//!
//! let edges = BinEdges::from_values([18.5, 22.0, 31.7, 40.0], 4).unwrap();
//! let counts = [18.5, 22.0, 31.7, 40.0]
//!     .into_iter()
//!     .filter_map(|v| edges.bin_index(v))
//!     .fold(vec![0; edges.num_bins()], |mut counts, idx| {
//!         counts[idx] += 1;
//!         counts
//!     });
//! assert_eq!(counts.iter().sum::<i32>(), 4);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod percentiles;
