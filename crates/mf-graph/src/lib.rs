//! mf-graph: directed graphs with fixed-shape edge features.
//!
//! Provides:
//! - `FeatureGraph`, a directed graph storing one feature (scalar or vector) per arc
//! - Sparse, stacked and dense matrix snapshots of any feature coordinate
//! - The `GraphView` capability trait for algorithms
//! - Adapters from `petgraph` graphs
//!
//! # Example
//!
//! ```
//! use mf_graph::FeatureGraph;
//!
//! let g = FeatureGraph::from_scalars(vec![1_u32, 2, 3], vec![2, 3, 1], vec![5.0, 5.0, 5.0]).unwrap();
//! let w = g.weight_matrix().unwrap();
//!
//! assert_eq!((g.nv(), g.ne()), (3, 3));
//! assert_eq!(w.get(0, 1), Some(&5.0));
//! ```

pub mod convert;
pub mod error;
pub mod feature;
pub mod graph;
pub mod matrix;
pub mod view;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use feature::{Feature, FeatureDim};
pub use graph::{EdgeRef, FeatureGraph};
pub use matrix::FeatureStack;
pub use view::{GraphView, adjacency_matrix};

pub use nalgebra::DMatrix;
pub use sprs::CsMat;
