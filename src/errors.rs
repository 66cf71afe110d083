// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

use crate::dag::graph::CycleError;
use crate::dag::scheduler::TaskId;

/// Error type a task closure may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum RundagError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cycle detected in task graph: {0}")]
    DagCycle(String),

    #[error("unknown dependency: {0:?} was not registered with this scheduler")]
    UnknownDependency(TaskId),

    #[error("task '{name}' failed: {source}")]
    Task {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CycleError<TaskId>> for RundagError {
    fn from(err: CycleError<TaskId>) -> Self {
        RundagError::DagCycle(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RundagError>;
