use clap::{Parser, Subcommand};

use self::{
    bins::BinsArg, groups::GroupsArg, project::ProjectArg, quartiles::QuartilesArg,
    series::SeriesArg,
};

mod bins;
mod groups;
mod project;
mod quartiles;
mod series;

const DEFAULT_OUTCOME_FIELD: &str = "Heart Disease Status";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Aggregation to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Count outcomes per category (grouped and stacked bar charts)
    Groups(#[clap(flatten)] GroupsArg),
    /// Count outcomes per equal-width bin of a numeric field (histograms)
    Bins(#[clap(flatten)] BinsArg),
    /// Five-number summary of a numeric field per category (box plots)
    Quartiles(#[clap(flatten)] QuartilesArg),
    /// Read line series from a pivot table
    Series(#[clap(flatten)] SeriesArg),
    /// Keep only some fields, dropping rows missing any of them
    Project(#[clap(flatten)] ProjectArg),
}

pub async fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Groups(arg) => groups::run(&arg).await?,
        Mode::Bins(arg) => bins::run(&arg).await?,
        Mode::Quartiles(arg) => quartiles::run(&arg).await?,
        Mode::Series(arg) => series::run(&arg).await?,
        Mode::Project(arg) => project::run(&arg).await?,
    }
    Ok(())
}
