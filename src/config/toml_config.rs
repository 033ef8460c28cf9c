use crate::config::INPUT_EXTENSIONS;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub jobs_file: String,
    pub professions_file: String,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Directory that relative paths are resolved against
    pub base_path: Option<String>,
    /// Grid file name; stdout when absent
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        validation::validate_path("source.jobs_file", &self.source.jobs_file)?;
        validation::validate_file_extension("source.jobs_file", &self.source.jobs_file, INPUT_EXTENSIONS)?;
        validation::validate_path("source.professions_file", &self.source.professions_file)?;
        validation::validate_file_extension(
            "source.professions_file",
            &self.source.professions_file,
            INPUT_EXTENSIONS,
        )?;
        self.delimiter_byte()?;

        if let Some(base_path) = &self.load.base_path {
            validation::validate_path("load.base_path", base_path)?;
        }
        if let Some(output_file) = &self.load.output_file {
            validation::validate_path("load.output_file", output_file)?;
        }

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            if LogFormat::parse(format).is_none() {
                return Err(EtlError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Supported formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    fn delimiter_byte(&self) -> Result<u8> {
        let Some(raw) = self.source.delimiter.as_deref() else {
            return Ok(b',');
        };

        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => validation::validate_delimiter("source.delimiter", c),
            _ => Err(EtlError::InvalidConfigValueError {
                field: "source.delimiter".to_string(),
                value: raw.to_string(),
                reason: "Delimiter must be exactly one character".to_string(),
            }),
        }
    }

    pub fn base_path(&self) -> &str {
        self.load.base_path.as_deref().unwrap_or(".")
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn log_format(&self) -> LogFormat {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn jobs_file(&self) -> &str {
        &self.source.jobs_file
    }

    fn professions_file(&self) -> &str {
        &self.source.professions_file
    }

    fn output_file(&self) -> Option<&str> {
        self.load.output_file.as_deref()
    }

    fn delimiter(&self) -> u8 {
        self.delimiter_byte().unwrap_or(b',')
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
