use anyhow::bail;
use cardiostat_analysis::{derive::Bucketing, domain::Domain};

use crate::{
    schema::GroupRow,
    util::{InputArg, domain_or_observed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum BucketKind {
    Age,
    Cholesterol,
}

impl BucketKind {
    fn bucketing(self) -> Bucketing {
        match self {
            BucketKind::Age => Bucketing::age_brackets(),
            BucketKind::Cholesterol => Bucketing::cholesterol_risk(),
        }
    }

    fn default_source(self) -> &'static str {
        match self {
            BucketKind::Age => "Age",
            BucketKind::Cholesterol => "Cholesterol Level",
        }
    }

    fn target(self) -> &'static str {
        match self {
            BucketKind::Age => "Age Group",
            BucketKind::Cholesterol => "Cholesterol Risk",
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GroupsArg {
    #[clap(flatten)]
    input: InputArg,
    /// Categorical field to group by
    #[arg(long)]
    group_field: Option<String>,
    /// Categorical outcome field
    #[arg(long, default_value = super::DEFAULT_OUTCOME_FIELD)]
    outcome_field: String,
    /// Group labels in report order (defaults to the values found in the data)
    #[arg(long, value_delimiter = ',')]
    groups: Option<Vec<String>>,
    /// Outcome labels in report order
    #[arg(long, value_delimiter = ',', default_value = "Yes,No")]
    outcomes: Vec<String>,
    /// Group by a classification of a numeric field instead (age, cholesterol)
    #[arg(long)]
    bucket: Option<BucketKind>,
    /// Numeric field classified by `--bucket` (defaults to `Age` or `Cholesterol Level`)
    #[arg(long, requires = "bucket")]
    bucket_source: Option<String>,
}

pub(crate) async fn run(arg: &GroupsArg) -> anyhow::Result<()> {
    let GroupsArg {
        input,
        group_field,
        outcome_field,
        groups,
        outcomes,
        bucket,
        bucket_source,
    } = arg;

    let outcome_field = input.field(outcome_field);
    let outcome_domain = Domain::new(outcomes.iter().map(String::as_str));

    let (dataset, group_field, group_domain) = match (group_field, bucket) {
        (Some(group_field), None) => {
            let group_field = input.field(group_field);
            let dataset = input.load(Vec::<String>::new()).await?;
            let group_domain = domain_or_observed(groups.as_deref(), &dataset, &group_field);
            (dataset, group_field, group_domain)
        }
        (None, Some(kind)) => {
            let source = input.field(bucket_source.as_deref().unwrap_or(kind.default_source()));
            let target = input.field(kind.target());
            let bucketing = kind.bucketing();
            let dataset = input
                .load([source.as_str()])
                .await?
                .with_bucketed_field(&source, &target, &bucketing);
            let group_domain = match groups {
                Some(labels) => Domain::new(labels.iter().map(String::as_str)),
                None => bucketing.labels(),
            };
            (dataset, target, group_domain)
        }
        (Some(_), Some(_)) => bail!("--group-field cannot be combined with --bucket"),
        (None, None) => bail!("either --group-field or --bucket is required"),
    };

    let rows = dataset
        .aggregator()
        .group_by_category(&group_field, &outcome_field, &group_domain, &outcome_domain)
        .into_iter()
        .map(GroupRow::from)
        .collect::<Vec<_>>();
    input.save_json(&rows)?;
    Ok(())
}
