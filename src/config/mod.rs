#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// Extensions accepted for the two input files.
pub const INPUT_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];
