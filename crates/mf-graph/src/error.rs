//! Graph-specific error types.

use mf_core::CoreError;
use thiserror::Error;

use crate::feature::FeatureDim;

pub type GraphResult<T> = Result<T, GraphError>;

/// Feature graph construction and query errors.
///
/// Re-adding an existing edge is not an error: `add_edge` reports it with
/// `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A feature's shape differs from the graph's feature dimension.
    #[error("Expected feature dimension {expected} got {actual}")]
    DimensionMismatch {
        expected: FeatureDim,
        actual: FeatureDim,
    },

    /// Parallel input sequences disagree in length.
    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A feature coordinate beyond the feature dimension was requested.
    #[error("Feature index {index} out of range for feature dimension {dim}")]
    FeatureIndexOutOfRange { index: usize, dim: FeatureDim },

    /// The feature dimension cannot be inferred from an empty edge list.
    #[error("Cannot infer feature dimension from an empty edge list")]
    NoEdges,

    #[error(transparent)]
    Core(#[from] CoreError),
}
