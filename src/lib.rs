pub mod error;
pub mod output;
pub mod pipeline;
pub mod stats;
pub mod table;

pub use error::PipelineError;
pub use pipeline::{PipelineConfig, RunSummary, run};
