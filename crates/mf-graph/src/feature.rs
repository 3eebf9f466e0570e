//! Edge feature values and their shape.

use core::fmt;

use mf_core::Scalar;

/// Shape shared by every edge feature of one graph.
///
/// Displays like an array shape: `()` for scalars, `(k,)` for vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureDim {
    Scalar,
    Vector(usize),
}

impl FeatureDim {
    /// Number of stored coordinates per edge (1 for scalars).
    pub fn width(self) -> usize {
        match self {
            FeatureDim::Scalar => 1,
            FeatureDim::Vector(k) => k,
        }
    }

    pub fn is_scalar(self) -> bool {
        matches!(self, FeatureDim::Scalar)
    }
}

impl fmt::Display for FeatureDim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureDim::Scalar => write!(f, "()"),
            FeatureDim::Vector(k) => write!(f, "({k},)"),
        }
    }
}

/// Feature attached to one edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature<F> {
    Scalar(F),
    Vector(Vec<F>),
}

impl<F: Scalar> Feature<F> {
    pub fn dim(&self) -> FeatureDim {
        match self {
            Feature::Scalar(_) => FeatureDim::Scalar,
            Feature::Vector(values) => FeatureDim::Vector(values.len()),
        }
    }

    /// Coordinates in storage order; a scalar is a one-element slice.
    pub fn as_slice(&self) -> &[F] {
        match self {
            Feature::Scalar(value) => core::slice::from_ref(value),
            Feature::Vector(values) => values,
        }
    }

    /// Rebuild a feature of the given shape from stored coordinates.
    pub(crate) fn from_parts(dim: FeatureDim, values: &[F]) -> Self {
        match dim {
            FeatureDim::Scalar => Feature::Scalar(values[0]),
            FeatureDim::Vector(_) => Feature::Vector(values.to_vec()),
        }
    }
}

impl<F> From<Vec<F>> for Feature<F> {
    fn from(values: Vec<F>) -> Self {
        Feature::Vector(values)
    }
}

impl<F, const N: usize> From<[F; N]> for Feature<F> {
    fn from(values: [F; N]) -> Self {
        Feature::Vector(values.into())
    }
}

impl<F: Clone> From<&[F]> for Feature<F> {
    fn from(values: &[F]) -> Self {
        Feature::Vector(values.to_vec())
    }
}
