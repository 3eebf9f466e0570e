//! Value-returning scaling and normalization of MCF instances.
//!
//! None of these touch `self`; each returns an independently owned result.

use mf_core::{Scalar, Tolerances, VertexId, max_of, nearly_equal};
use num_traits::Float;

use crate::demand::Demand;
use crate::mcf::{COST, Mcf};

impl<V: VertexId, F: Scalar> Mcf<V, F> {
    /// New instance with costs times `cost_factor`, and capacities and demand
    /// amounts times `capacity_factor`.
    ///
    /// Capacity and demand share a factor so that feasibility is preserved.
    /// `capacity_factor` must be nonnegative: demand amounts stay nonnegative
    /// only then.
    pub fn scale(&self, cost_factor: F, capacity_factor: F) -> Self {
        debug_assert!(
            capacity_factor >= F::zero(),
            "capacity factor must be nonnegative"
        );
        let graph = self.graph.map_features(|k, x| {
            if k == COST {
                x * cost_factor
            } else {
                x * capacity_factor
            }
        });
        Self {
            graph,
            demands: self.scale_demands(capacity_factor),
        }
    }

    /// `scale(cost_factor, 1)`.
    pub fn scale_costs(&self, cost_factor: F) -> Self {
        self.scale(cost_factor, F::one())
    }

    /// `scale(1, capacity_factor)`.
    pub fn scale_capacities(&self, capacity_factor: F) -> Self {
        self.scale(F::one(), capacity_factor)
    }

    /// Demands with every amount multiplied by `factor`; the graph is untouched.
    ///
    /// A negative `factor` yields negative amounts, which [`Mcf::new`] rejects.
    pub fn scale_demands(&self, factor: F) -> Vec<Demand<V, F>> {
        self.demands.iter().map(|d| d.scaled(factor)).collect()
    }
}

impl<V: VertexId, F: Scalar + Float> Mcf<V, F> {
    /// New instance with costs divided by the largest cost, and capacities and
    /// demand amounts divided by the largest of all capacities and amounts.
    ///
    /// The caller must ensure both maxima are nonzero; a zero maximum yields
    /// non-finite values.
    pub fn normalize(&self) -> Self {
        let cmax = max_of(&self.costs()).unwrap_or_else(F::zero);
        let dmax = match (max_of(&self.capacities()), max_of(&self.amounts())) {
            (Some(c), Some(a)) => c.max(a),
            (Some(m), None) | (None, Some(m)) => m,
            (None, None) => F::zero(),
        };
        tracing::debug!(cmax = %cmax, dmax = %dmax, "normalizing MCF instance");
        let tol = Tolerances::default();
        if nearly_equal(cmax, F::zero(), tol) || nearly_equal(dmax, F::zero(), tol) {
            tracing::warn!(cmax = %cmax, dmax = %dmax, "zero maximum, normalized values are not finite");
        }

        let graph = self
            .graph
            .map_features(|k, x| if k == COST { x / cmax } else { x / dmax });
        let demands = self
            .demands
            .iter()
            .map(|d| Demand::new(d.src(), d.dst(), d.amount() / dmax))
            .collect();
        Self { graph, demands }
    }
}
