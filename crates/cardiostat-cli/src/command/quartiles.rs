use crate::util::{InputArg, domain_or_observed};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct QuartilesArg {
    #[clap(flatten)]
    input: InputArg,
    /// Categorical field to partition by
    #[arg(long, default_value = super::DEFAULT_OUTCOME_FIELD)]
    group_field: String,
    /// Numeric field to summarize
    #[arg(long)]
    value_field: String,
    /// Group labels in report order (defaults to the values found in the data)
    #[arg(long, value_delimiter = ',')]
    groups: Option<Vec<String>>,
}

pub(crate) async fn run(arg: &QuartilesArg) -> anyhow::Result<()> {
    let QuartilesArg {
        input,
        group_field,
        value_field,
        groups,
    } = arg;

    let group_field = input.field(group_field);
    let value_field = input.field(value_field);

    let dataset = input.load([value_field.as_str()]).await?;
    let group_domain = domain_or_observed(groups.as_deref(), &dataset, &group_field);
    let summaries =
        dataset
            .aggregator()
            .quartiles_by_category(&group_field, &value_field, &group_domain);
    input.save_json(&summaries)?;
    Ok(())
}
