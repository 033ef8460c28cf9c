use crate::config::INPUT_EXTENSIONS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "contract-crosstab")]
#[command(about = "Count job postings by contract type and profession category")]
pub struct CliConfig {
    #[arg(long, default_value = "technical-test-jobs.csv")]
    pub jobs: String,

    #[arg(long, default_value = "technical-test-professions.csv")]
    pub professions: String,

    /// Write the grid to this file instead of stdout; `{timestamp}` is expanded
    #[arg(long)]
    pub output: Option<String>,

    /// Directory that relative paths are resolved against
    #[arg(long, default_value = ".")]
    pub output_dir: String,

    #[arg(long, default_value = ",")]
    pub delimiter: char,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process memory between phases")]
    pub monitor: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            jobs: "technical-test-jobs.csv".to_string(),
            professions: "technical-test-professions.csv".to_string(),
            output: None,
            output_dir: ".".to_string(),
            delimiter: ',',
            verbose: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn jobs_file(&self) -> &str {
        &self.jobs
    }

    fn professions_file(&self) -> &str {
        &self.professions
    }

    fn output_file(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn delimiter(&self) -> u8 {
        // validate() rejects anything that is not ASCII
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("jobs", &self.jobs)?;
        validation::validate_file_extension("jobs", &self.jobs, INPUT_EXTENSIONS)?;
        validation::validate_path("professions", &self.professions)?;
        validation::validate_file_extension("professions", &self.professions, INPUT_EXTENSIONS)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        validation::validate_delimiter("delimiter", self.delimiter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_file_names() {
        let config = CliConfig::parse_from(["contract-crosstab"]);

        assert_eq!(config.jobs_file(), "technical-test-jobs.csv");
        assert_eq!(config.professions_file(), "technical-test-professions.csv");
        assert_eq!(config.output_file(), None);
        assert_eq!(config.delimiter(), b',');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::parse_from([
            "contract-crosstab",
            "--jobs",
            "data/jobs.tsv",
            "--professions",
            "data/professions.tsv",
            "--delimiter",
            "\t",
            "--output",
            "report_{timestamp}.txt",
            "--verbose",
        ]);

        assert_eq!(config.jobs_file(), "data/jobs.tsv");
        assert_eq!(config.delimiter(), b'\t');
        assert_eq!(config.output_file(), Some("report_{timestamp}.txt"));
        assert!(config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let config = CliConfig {
            jobs: "jobs.json".to_string(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            delimiter: '"',
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
