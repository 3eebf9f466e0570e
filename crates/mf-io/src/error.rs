//! Instance file errors.

use std::path::PathBuf;

use mf_flow::FlowError;
use mf_graph::GraphError;
use thiserror::Error;

pub type IoResult<T> = Result<T, IoError>;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Unknown instance format: {0}")]
    UnknownFormat(String),

    #[error("Unknown edge direction: {0} (expected single or double)")]
    UnknownEdgeDirection(String),

    #[error("Missing instance file: {}", .0.display())]
    MissingFile(PathBuf),

    /// `line` and `column` are 1-based.
    #[error("{}:{line}:{column}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
