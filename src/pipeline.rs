//! One train/evaluate/persist run.

mod config;
mod orchestrator;

pub use config::PipelineConfig;
pub use orchestrator::{Pipeline, RunSummary};
