use crate::core::aggregator::aggregate_rows;
use crate::core::renderer::TableRenderer;
use crate::core::{ConfigProvider, CrosstabReport, Pipeline, Rows, SourceTables, Storage};
use crate::utils::error::Result;
use csv::ReaderBuilder;

/// Reads the jobs and professions files, counts postings by contract and
/// category, and writes the grid.
pub struct CrosstabPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CrosstabPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_table(&self, path: &str) -> Result<Rows> {
        tracing::debug!("Reading {}", path);
        let bytes = self.storage.read_file(path).await?;
        let rows = parse_rows(&bytes, self.config.delimiter())?;
        tracing::debug!("Parsed {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}

/// Parses raw CSV bytes into string rows. The header is kept as row 0.
pub fn parse_rows(data: &[u8], delimiter: u8) -> Result<Rows> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Expands `{timestamp}` in an output file name.
pub fn expand_output_name(template: &str) -> String {
    if template.contains("{timestamp}") {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        template.replace("{timestamp}", &stamp)
    } else {
        template.to_string()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CrosstabPipeline<S, C> {
    async fn extract(&self) -> Result<SourceTables> {
        let jobs = self.read_table(self.config.jobs_file()).await?;
        let professions = self.read_table(self.config.professions_file()).await?;

        Ok(SourceTables { jobs, professions })
    }

    async fn transform(&self, data: SourceTables) -> Result<CrosstabReport> {
        let job_count = data.jobs.len().saturating_sub(1);
        let matrix = aggregate_rows(&data.jobs, &data.professions)?;
        let rendered = TableRenderer::new(&matrix).render();

        Ok(CrosstabReport {
            matrix,
            rendered,
            job_count,
        })
    }

    async fn load(&self, report: CrosstabReport) -> Result<String> {
        match self.config.output_file() {
            Some(template) => {
                let name = expand_output_name(template);
                tracing::debug!("Writing grid ({} bytes) to {}", report.rendered.len(), name);
                self.storage
                    .write_file(&name, report.rendered.as_bytes())
                    .await?;
                Ok(name)
            }
            None => {
                print!("{}", report.rendered);
                Ok("stdout".to_string())
            }
        }
    }
}
