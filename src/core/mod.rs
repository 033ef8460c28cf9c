pub mod aggregator;
pub mod etl;
pub mod pipeline;
pub mod renderer;
pub mod resolver;

pub use crate::domain::model::{CrosstabMatrix, CrosstabReport, Rows, SourceTables};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
