//! Tabular aggregation of heart-disease survey data
//!
//! This crate turns flat CSV records into the summary records that grouped
//! bar charts, stacked bars, histograms, box plots, and line charts are drawn
//! from. It does not render anything.
//!
//! # Overview
//!
//! ## Aggregation Workflow
//!
//! 1. **Load** ([`load::load_csv`]): Read a CSV file into a [`record::Dataset`]
//! 2. **Derive** ([`derive::Bucketing`]): Optionally classify a numeric field
//!    into categories (age brackets, cholesterol risk)
//! 3. **Choose Domains** ([`domain::Domain`]): Fix the categories reported and
//!    their order
//! 4. **Aggregate** ([`aggregate::TabularAggregator`]): Produce
//!    [`summary::GroupSummary`], [`summary::BinnedOutcomes`], or
//!    [`summary::QuartileSummary`] records
//!
//! ## Pivot Table Workflow
//!
//! Pre-pivoted tables (one x column, one column per series) are read with the
//! same loader and turned into [`series::LineSeries`].
//!
//! # Examples
//!
//! ```
//! use cardiostat_analysis::{
//!     derive::Bucketing,
//!     domain::Domain,
//!     load::{LoadOptions, parse_csv_str},
//! };
//!
//! let csv = "\
//! Age,Cholesterol Level,Heart Disease Status
//! 29,180,No
//! 47,236,Yes
//! 63,251,Yes
//! 71,199,No
//! ";
//! let options = LoadOptions::new().with_numeric_fields(["Age", "Cholesterol Level"]);
//! let dataset = parse_csv_str(csv, &options)?
//!     .with_bucketed_field("Age", "Age Group", &Bucketing::age_brackets());
//!
//! let outcomes = Domain::new(["Yes", "No"]);
//! let groups = dataset.aggregator().group_by_category(
//!     "Age Group",
//!     "Heart Disease Status",
//!     &Bucketing::age_brackets().labels(),
//!     &outcomes,
//! );
//! assert_eq!(groups[2].group, ">55");
//! assert_eq!(groups[2].percentage("Yes"), Some(50.0));
//!
//! let binned = dataset
//!     .aggregator()
//!     .bin_continuous("Cholesterol Level", "Heart Disease Status", 5, &outcomes)?;
//! assert_eq!(binned.bins.len(), 5);
//! assert_eq!(binned.bins.iter().map(|b| b.total).sum::<u64>(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod derive;
pub mod domain;
pub mod load;
pub mod naming;
pub mod record;
pub mod series;
pub mod summary;
