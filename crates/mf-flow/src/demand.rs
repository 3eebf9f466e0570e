//! Origin-destination demands.

use core::fmt;

use mf_core::Scalar;

/// Request to route `amount` units of flow from `src` to `dst`.
///
/// Demands do not know which graph they belong to; endpoint validity is
/// checked by whoever consumes them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand<V, N> {
    src: V,
    dst: V,
    amount: N,
}

impl<V: Copy, N: Copy> Demand<V, N> {
    pub fn new(src: V, dst: V, amount: N) -> Self {
        Self { src, dst, amount }
    }

    pub fn src(&self) -> V {
        self.src
    }

    pub fn dst(&self) -> V {
        self.dst
    }

    pub fn amount(&self) -> N {
        self.amount
    }
}

impl<V: Copy, N: Scalar> Demand<V, N> {
    /// Same endpoints, amount multiplied by `factor`.
    pub fn scaled(&self, factor: N) -> Self {
        Self::new(self.src, self.dst, self.amount * factor)
    }
}

impl<V: fmt::Display, N: fmt::Display> fmt::Display for Demand<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Demand({}, {}, {})", self.src, self.dst, self.amount)
    }
}
