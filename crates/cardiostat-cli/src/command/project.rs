use crate::util::InputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProjectArg {
    #[clap(flatten)]
    input: InputArg,
    /// Fields to keep
    #[arg(long, value_delimiter = ',', required = true)]
    fields: Vec<String>,
}

pub(crate) async fn run(arg: &ProjectArg) -> anyhow::Result<()> {
    let fields = arg
        .fields
        .iter()
        .map(|f| arg.input.field(f))
        .collect::<Vec<_>>();

    let dataset = arg.input.load(Vec::<String>::new()).await?;
    let projected = dataset.project(&fields);
    tracing::info!(
        kept = projected.len(),
        dropped = dataset.len() - projected.len(),
        "projected fields"
    );
    arg.input.save_json(&projected.records())?;
    Ok(())
}
