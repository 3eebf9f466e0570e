//! mf-flow: multi-commodity flow instances on top of feature graphs.
//!
//! An [`Mcf`] owns a [`FeatureGraph`](mf_graph::FeatureGraph) whose arcs carry
//! `[cost, capacity]` and an ordered list of [`Demand`]s.
//!
//! # Example
//!
//! ```
//! use mf_flow::{Demand, Mcf};
//!
//! let pb = Mcf::from_arcs(vec![1_u32], vec![2], &[1.0], &[2.0], vec![Demand::new(1, 2, 1.0)]).unwrap();
//! let scaled = pb.scale(1.5, 3.0);
//!
//! assert_eq!(scaled.costs(), vec![1.5]);
//! assert_eq!(scaled.capacities(), vec![6.0]);
//! assert_eq!(scaled.demands()[0].amount(), 3.0);
//! ```

pub mod demand;
pub mod error;
pub mod mcf;
pub mod transform;

pub use demand::Demand;
pub use error::{FlowError, FlowResult};
pub use mcf::{CAPACITY, COST, MCF_FEATURE_DIM, Mcf};
