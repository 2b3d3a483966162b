use cardiostat_analysis::series::LineSeries;

use crate::{schema::SeriesDocument, util::InputArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SeriesArg {
    #[clap(flatten)]
    input: InputArg,
    /// Column holding the x values
    #[arg(long, default_value = "Healthy Lifestyle Score")]
    x_field: String,
    /// Columns to read as series, in order
    #[arg(long, value_delimiter = ',', required = true)]
    series: Vec<String>,
}

pub(crate) async fn run(arg: &SeriesArg) -> anyhow::Result<()> {
    let SeriesArg {
        input,
        x_field,
        series,
    } = arg;

    let x_field = input.field(x_field);
    let series_fields = series.iter().map(|s| input.field(s)).collect::<Vec<_>>();

    let dataset = input
        .load(std::iter::once(&x_field).chain(&series_fields).cloned())
        .await?;
    let document = SeriesDocument::new(LineSeries::from_pivot(
        dataset.records(),
        &x_field,
        &series_fields,
    ));
    input.save_json(&document)?;
    Ok(())
}
