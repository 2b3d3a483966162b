//! JSON documents written by the subcommands

use cardiostat_analysis::{
    series::{LineSeries, series_extent},
    summary::{GroupSummary, percentage},
};
use serde::Serialize;

/// One group of the `groups` output, with percentages alongside the counts.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    pub group: String,
    pub total: u64,
    pub counts: Vec<OutcomeShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeShare {
    pub outcome: String,
    pub count: u64,
    pub percentage: f64,
}

impl From<GroupSummary> for GroupRow {
    fn from(summary: GroupSummary) -> Self {
        let counts = summary
            .counts
            .iter()
            .map(|c| OutcomeShare {
                outcome: c.outcome.clone(),
                count: c.count,
                percentage: percentage(c.count, summary.total),
            })
            .collect();
        Self {
            group: summary.group,
            total: summary.total,
            counts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesDocument {
    /// `[min, max]` of every y value, `null` if there is none.
    pub extent: Option<(f64, f64)>,
    pub series: Vec<LineSeries>,
}

impl SeriesDocument {
    pub fn new(series: Vec<LineSeries>) -> Self {
        Self {
            extent: series_extent(&series),
            series,
        }
    }
}
