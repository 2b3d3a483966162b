use anyhow::Context as _;
use cardiostat_analysis::domain::Domain;

use crate::util::InputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BinsArg {
    #[clap(flatten)]
    input: InputArg,
    /// Numeric field to bin
    #[arg(long)]
    value_field: String,
    /// Categorical outcome field
    #[arg(long, default_value = super::DEFAULT_OUTCOME_FIELD)]
    outcome_field: String,
    /// Number of equal-width bins
    #[arg(long, default_value_t = 10)]
    bins: usize,
    /// Outcome labels in report order
    #[arg(long, value_delimiter = ',', default_value = "Yes,No")]
    outcomes: Vec<String>,
}

pub(crate) async fn run(arg: &BinsArg) -> anyhow::Result<()> {
    let BinsArg {
        input,
        value_field,
        outcome_field,
        bins,
        outcomes,
    } = arg;

    let value_field = input.field(value_field);
    let outcome_field = input.field(outcome_field);
    let outcome_domain = Domain::new(outcomes.iter().map(String::as_str));

    let dataset = input.load([value_field.as_str()]).await?;
    let binned = dataset
        .aggregator()
        .bin_continuous(&value_field, &outcome_field, *bins, &outcome_domain)
        .with_context(|| format!("Failed to bin field: {value_field}"))?;
    if binned.not_a_number.total() > 0 {
        tracing::warn!(
            field = %value_field,
            count = binned.not_a_number.total(),
            "records with non-numeric values were left out of the bins"
        );
    }
    input.save_json(&binned)?;
    Ok(())
}
