//! Error types for MCF construction.

use mf_graph::GraphError;
use thiserror::Error;

/// Errors raised while assembling an MCF instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Demand {index} has negative amount {amount}")]
    NegativeDemand { index: usize, amount: String },

    #[error("Demand {index} ({src} -> {dst}) references a vertex outside 1..={nv}")]
    InvalidDemandEndpoint {
        index: usize,
        src: String,
        dst: String,
        nv: usize,
    },
}

pub type FlowResult<T> = Result<T, FlowError>;
