use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context;
use cardiostat_analysis::{
    domain::Domain,
    load::{self, LoadOptions},
    naming::ColumnNaming,
    record::Dataset,
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        tracing::info!(output = %output.display_path(), "wrote JSON");
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Arguments shared by every subcommand: where to read and where to write.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InputArg {
    /// CSV file to read
    csv: PathBuf,
    /// Normalize column names to snake_case (e.g. `heart_disease_status`)
    #[arg(long)]
    snake_case_columns: bool,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl InputArg {
    pub fn naming(&self) -> ColumnNaming {
        if self.snake_case_columns {
            ColumnNaming::Snake
        } else {
            ColumnNaming::Verbatim
        }
    }

    /// Converts a field name given on the command line to the loaded naming
    /// convention, so `--group-field "Heart Disease Status"` also works with
    /// `--snake-case-columns`.
    pub fn field(&self, name: &str) -> String {
        self.naming().apply(name)
    }

    pub async fn load<I, S>(&self, numeric_fields: I) -> anyhow::Result<Dataset>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = LoadOptions::new()
            .with_naming(self.naming())
            .with_numeric_fields(numeric_fields);
        tracing::info!(path = %self.csv.display(), "Loading CSV...");
        let dataset = load::load_csv(&self.csv, &options)
            .await
            .with_context(|| format!("Failed to load CSV file: {}", self.csv.display()))?;
        tracing::info!("Loaded {} records", dataset.len());
        Ok(dataset)
    }

    pub fn save_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        Output::save_json(value, self.output.clone())
    }
}

/// Uses the labels given on the command line, or the values observed in
/// `field` when none were given.
pub fn domain_or_observed(labels: Option<&[String]>, dataset: &Dataset, field: &str) -> Domain {
    match labels {
        Some(labels) => Domain::new(labels.iter().map(String::as_str)),
        None => {
            let domain = Domain::observed(dataset.records(), field);
            tracing::debug!(field, labels = ?domain.labels(), "using observed domain");
            domain
        }
    }
}
