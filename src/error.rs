//! Error types shared by every stage of the pipeline.
//!
//! Each component returns [`Result`] and propagates lower-level failures
//! unchanged. Only the binary decides how a failure is reported.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for `costwise` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the train/evaluate/persist pipeline can report.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed command-line invocation.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// A dataset file is missing or cannot be parsed.
    #[error("Failed to load dataset {path:?}: {reason}")]
    DatasetLoad {
        /// The file that was being read.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The class attribute is unset or cannot be used for classification.
    #[error("Incompatible schema: {0}")]
    IncompatibleSchema(String),

    /// The test schema differs from the schema the model was fit on.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// There is nothing to learn from.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// `predict` was called before a successful `fit`.
    #[error("Model not fitted")]
    NotFitted,

    /// A malformed cost matrix.
    #[error("Invalid cost matrix: {0}")]
    InvalidCostMatrix(String),

    /// I/O or (de)serialization failure while saving/loading a model.
    #[error("Failed to persist model at {path:?}: {reason}")]
    Persistence {
        /// The model file or directory involved.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// An unreadable or inconsistent pipeline configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}


impl Error {
    pub(crate) fn dataset_load<P, S>(path: P, reason: S) -> Self
        where P: Into<PathBuf>,
              S: ToString,
    {
        Self::DatasetLoad { path: path.into(), reason: reason.to_string() }
    }


    pub(crate) fn persistence<P, S>(path: P, reason: S) -> Self
        where P: Into<PathBuf>,
              S: ToString,
    {
        Self::Persistence { path: path.into(), reason: reason.to_string() }
    }
}


impl From<polars::error::PolarsError> for Error {
    fn from(err: polars::error::PolarsError) -> Self {
        Error::IncompatibleSchema(err.to_string())
    }
}
