//! mf-core: shared foundation for multiflows.
//!
//! Contains:
//! - numeric (feature element trait + tolerances + float helpers)
//! - ids (vertex identifier trait and slot mapping)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
