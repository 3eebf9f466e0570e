use core::fmt;

use num_traits::{Float, Num};

use crate::error::CoreError;

/// Floating point type used by the instance readers and the CLI.
pub type Real = f64;

/// Element type of an edge feature.
///
/// Any copyable number works: integers for unit-weight graphs, floats for
/// cost/capacity instances. Operations that divide (normalization) ask for
/// `num_traits::Float` on top of this.
pub trait Scalar: Num + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> Scalar for T where T: Num + Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Absolute-or-relative float comparison for any `Float` width.
pub fn nearly_equal<F: Float>(a: F, b: F, tol: Tolerances) -> bool {
    let abs = F::from(tol.abs).unwrap_or_else(F::epsilon);
    let rel = F::from(tol.rel).unwrap_or_else(F::epsilon);
    let diff = (a - b).abs();
    if diff <= abs {
        return true;
    }
    diff <= rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Largest element of a slice under `PartialOrd`, `None` when empty.
///
/// Incomparable values (NaN) never replace the running maximum.
pub fn max_of<F: Scalar>(values: &[F]) -> Option<F> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |acc, v| if v > acc { v } else { acc }))
}
