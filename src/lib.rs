pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::LocalStorage;
pub use crate::core::{
    aggregator::{aggregate, aggregate_rows},
    etl::EtlEngine,
    pipeline::CrosstabPipeline,
    renderer::TableRenderer,
    resolver::CategoryResolver,
};
pub use crate::domain::model::{CountCell, CrosstabMatrix, JobRecord, ProfessionEntry, OTHER, TOTAL};
pub use crate::utils::error::{EtlError, Result};
