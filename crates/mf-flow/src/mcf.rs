//! Multi-commodity flow instance container.

use std::fmt;

use mf_core::{Scalar, VertexId};
use mf_graph::{EdgeRef, FeatureDim, FeatureGraph, GraphError, GraphResult, GraphView};
use nalgebra::DMatrix;
use petgraph::EdgeType;
use petgraph::graph::{Graph, IndexType};
use sprs::CsMat;

use crate::demand::Demand;
use crate::error::{FlowError, FlowResult};

/// Feature coordinate holding an arc's cost.
pub const COST: usize = 0;

/// Feature coordinate holding an arc's capacity.
pub const CAPACITY: usize = 1;

/// Feature dimension every MCF graph carries: `[cost, capacity]`.
pub const MCF_FEATURE_DIM: FeatureDim = FeatureDim::Vector(2);

/// Multi-commodity flow problem: a capacitated network plus demands.
///
/// Every arc carries the feature `[cost, capacity]`. Demands are kept in
/// insertion order and may repeat an (src, dst) pair.
#[derive(Debug, Clone)]
pub struct Mcf<V, F> {
    pub(crate) graph: FeatureGraph<V, F>,
    pub(crate) demands: Vec<Demand<V, F>>,
}

impl<V: VertexId, F: Scalar> Mcf<V, F> {
    /// Wrap a graph whose features are `[cost, capacity]`.
    ///
    /// Demand amounts must be nonnegative and demand endpoints must be
    /// vertices of `graph`.
    pub fn new(graph: FeatureGraph<V, F>, demands: Vec<Demand<V, F>>) -> FlowResult<Self> {
        if graph.feature_dim() != MCF_FEATURE_DIM {
            return Err(GraphError::DimensionMismatch {
                expected: MCF_FEATURE_DIM,
                actual: graph.feature_dim(),
            }
            .into());
        }
        if let Some((index, d)) = demands
            .iter()
            .enumerate()
            .find(|(_, d)| d.amount() < F::zero())
        {
            return Err(FlowError::NegativeDemand {
                index,
                amount: d.amount().to_string(),
            });
        }
        let nv = graph.nv();
        let in_graph = |v: V| v.slot().is_some_and(|s| s < nv);
        if let Some((index, d)) = demands
            .iter()
            .enumerate()
            .find(|(_, d)| !in_graph(d.src()) || !in_graph(d.dst()))
        {
            return Err(FlowError::InvalidDemandEndpoint {
                index,
                src: d.src().to_string(),
                dst: d.dst().to_string(),
                nv,
            });
        }
        Ok(Self { graph, demands })
    }

    /// Build from a petgraph graph with per-edge cost and capacity.
    ///
    /// Edge `i` of `graph` (in edge-index order) receives `[cost[i], capacity[i]]`.
    pub fn from_petgraph<N, E, Ty: EdgeType, Ix: IndexType>(
        graph: &Graph<N, E, Ty, Ix>,
        cost: &[F],
        capacity: &[F],
        demands: Vec<Demand<V, F>>,
    ) -> FlowResult<Self> {
        let table = cost_capacity_table(graph.edge_count(), cost, capacity)?;
        Self::new(FeatureGraph::from_petgraph(graph, &table)?, demands)
    }

    /// Build from explicit arc lists with per-arc cost and capacity.
    pub fn from_arcs(
        src: Vec<V>,
        dst: Vec<V>,
        cost: &[F],
        capacity: &[F],
        demands: Vec<Demand<V, F>>,
    ) -> FlowResult<Self> {
        let table = cost_capacity_table(src.len(), cost, capacity)?;
        Self::new(FeatureGraph::from_rows(src, dst, &table)?, demands)
    }

    pub fn graph(&self) -> &FeatureGraph<V, F> {
        &self.graph
    }

    pub fn demands(&self) -> &[Demand<V, F>] {
        &self.demands
    }

    pub fn into_parts(self) -> (FeatureGraph<V, F>, Vec<Demand<V, F>>) {
        (self.graph, self.demands)
    }

    /// Number of vertices.
    pub fn nv(&self) -> usize {
        self.graph.nv()
    }

    /// Number of arcs.
    pub fn ne(&self) -> usize {
        self.graph.ne()
    }

    /// Number of demands.
    pub fn nk(&self) -> usize {
        self.demands.len()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeRef<'_, V, F>> + Clone + '_ {
        self.graph.edges()
    }

    /// Arc costs in insertion order.
    pub fn costs(&self) -> Vec<F> {
        self.column(COST)
    }

    /// Arc capacities in insertion order.
    pub fn capacities(&self) -> Vec<F> {
        self.column(CAPACITY)
    }

    /// Demand amounts in insertion order.
    pub fn amounts(&self) -> Vec<F> {
        self.demands.iter().map(Demand::amount).collect()
    }

    fn column(&self, idx: usize) -> Vec<F> {
        self.graph.edges().map(|e| e.feature()[idx]).collect()
    }

    /// Sparse `nv x nv` matrix of arc costs.
    pub fn cost_matrix(&self) -> GraphResult<CsMat<F>> {
        self.graph.feature_matrix(COST)
    }

    /// Sparse `nv x nv` matrix of arc capacities.
    pub fn capacity_matrix(&self) -> GraphResult<CsMat<F>> {
        self.graph.feature_matrix(CAPACITY)
    }

    /// Sparse `nv x nv` matrix of feature coordinate `idx` ([`COST`] or [`CAPACITY`]).
    pub fn weight_matrix(&self, idx: usize) -> GraphResult<CsMat<F>> {
        self.graph.feature_matrix(idx)
    }

    /// Weight matrix used by path algorithms when none is chosen: the costs.
    pub fn default_weight_matrix(&self) -> GraphResult<CsMat<F>> {
        self.weight_matrix(COST)
    }

    /// Check if some demand goes from `src` to `dst`.
    pub fn has_demand(&self, src: V, dst: V) -> bool {
        self.demands
            .iter()
            .any(|d| d.src() == src && d.dst() == dst)
    }
}

fn cost_capacity_table<F: Scalar>(ne: usize, cost: &[F], capacity: &[F]) -> GraphResult<DMatrix<F>> {
    for (what, len) in [("cost", cost.len()), ("capacity", capacity.len())] {
        if len != ne {
            return Err(GraphError::LengthMismatch {
                what,
                expected: ne,
                actual: len,
            });
        }
    }
    Ok(DMatrix::from_fn(ne, 2, |i, j| {
        if j == COST { cost[i] } else { capacity[i] }
    }))
}

impl<V: VertexId, F: Scalar> GraphView for Mcf<V, F> {
    type Vertex = V;
    type Weight = F;

    fn nv(&self) -> usize {
        self.graph.nv()
    }

    fn ne(&self) -> usize {
        self.graph.ne()
    }

    fn arcs(&self) -> impl Iterator<Item = (V, V)> + '_ {
        GraphView::arcs(&self.graph)
    }

    fn out_neighbors(&self, v: V) -> &[V] {
        self.graph.out_neighbors(v)
    }

    fn in_neighbors(&self, v: V) -> &[V] {
        self.graph.in_neighbors(v)
    }

    fn has_edge(&self, src: V, dst: V) -> bool {
        self.graph.has_edge(src, dst)
    }

    fn weights(&self, idx: usize) -> GraphResult<CsMat<F>> {
        self.weight_matrix(idx)
    }
}

impl<V: VertexId, F: Scalar> PartialEq for Mcf<V, F> {
    fn eq(&self, other: &Self) -> bool {
        self.graph == other.graph && self.demands == other.demands
    }
}

impl<V: VertexId, F: Scalar> fmt::Display for Mcf<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MCF(nv = {}, ne = {}, nk = {})", self.nv(), self.ne(), self.nk())?;
        for d in &self.demands {
            write!(f, "\n\t{d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_graph::Feature;
    use petgraph::graph::UnGraph;

    /// 3x2 grid: 1-2-3 on top, 4-5-6 below, edges in the same order as a
    /// row-major grid generator would emit them.
    fn grid() -> UnGraph<(), ()> {
        UnGraph::from_edges([(0_u32, 1_u32), (0, 3), (1, 2), (1, 4), (2, 5), (3, 4), (4, 5)])
    }

    #[test]
    fn new_requires_two_features() {
        let g = FeatureGraph::from_scalars(vec![1_u32, 2], vec![2, 3], vec![1.0, 1.0]).unwrap();
        let err = Mcf::new(g, vec![]).unwrap_err();
        assert_eq!(
            err,
            FlowError::Graph(GraphError::DimensionMismatch {
                expected: FeatureDim::Vector(2),
                actual: FeatureDim::Scalar,
            })
        );
    }

    #[test]
    fn new_rejects_negative_demands() {
        let g = FeatureGraph::from_rows(vec![1_u32], vec![2], &DMatrix::from_element(1, 2, 1.0))
            .unwrap();
        let err = Mcf::new(g, vec![Demand::new(1, 2, 1.0), Demand::new(2, 1, -1.0)]).unwrap_err();
        assert!(matches!(err, FlowError::NegativeDemand { index: 1, .. }));
    }

    #[test]
    fn new_rejects_demands_outside_graph() {
        let g = FeatureGraph::from_rows(vec![1_u32], vec![2], &DMatrix::from_element(1, 2, 1.0))
            .unwrap();
        let err = Mcf::new(g, vec![Demand::new(1, 3, 1.0)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Demand 0 (1 -> 3) references a vertex outside 1..=2"
        );
    }

    #[test]
    fn from_petgraph_counts() {
        let pb = Mcf::<u32, f64>::from_petgraph(&grid(), &[1.0; 7], &[2.0; 7], vec![Demand::new(1, 6, 1.0)])
            .unwrap();
        assert_eq!((pb.nv(), pb.ne(), pb.nk()), (6, 7, 1));
        let arcs: Vec<_> = pb.edges().map(|e| (e.src, e.dst)).collect();
        assert_eq!(arcs, vec![(1, 2), (1, 4), (2, 3), (2, 5), (3, 6), (4, 5), (5, 6)]);
    }

    #[test]
    fn from_petgraph_checks_lengths() {
        let err = Mcf::<u32, f64>::from_petgraph(&grid(), &[1.0; 7], &[2.0; 6], vec![]).unwrap_err();
        assert_eq!(
            err,
            FlowError::Graph(GraphError::LengthMismatch {
                what: "capacity",
                expected: 7,
                actual: 6,
            })
        );
    }

    #[test]
    fn cost_and_capacity_views() {
        let pb = Mcf::<u32, f64>::from_petgraph(&grid(), &[1.0; 7], &[2.0; 7], vec![]).unwrap();
        let cost = pb.cost_matrix().unwrap();
        let cap = pb.capacity_matrix().unwrap();
        assert_eq!(cost.shape(), (6, 6));
        assert_eq!(cost.nnz(), 7);
        assert_eq!(cost.get(0, 1), Some(&1.0));
        assert_eq!(cap.get(0, 3), Some(&2.0));
        assert_eq!(cap.get(1, 0), None);
        assert_eq!(pb.default_weight_matrix().unwrap().data(), cost.data());
        assert_eq!(pb.weight_matrix(CAPACITY).unwrap().data(), cap.data());
        assert!(pb.weight_matrix(2).is_err());
        assert_eq!(pb.costs(), vec![1.0; 7]);
        assert_eq!(pb.capacities(), vec![2.0; 7]);
    }

    #[test]
    fn has_demand_counts_duplicates() {
        let pb = Mcf::from_arcs(
            vec![1_u32, 2],
            vec![2, 3],
            &[1.0, 1.0],
            &[1.0, 1.0],
            vec![Demand::new(1, 3, 1.0), Demand::new(1, 3, 2.0)],
        )
        .unwrap();
        assert!(pb.has_demand(1, 3));
        assert!(!pb.has_demand(3, 1));
        assert_eq!(pb.nk(), 2);
        assert_eq!(pb.amounts(), vec![1.0, 2.0]);
    }

    #[test]
    fn display_lists_demands() {
        let g = FeatureGraph::<u32, f64>::new(
            vec![1, 2, 3, 1],
            vec![2, 3, 1, 3],
            vec![Feature::from([1.0, 1.0]); 4],
        )
        .unwrap();
        let pb = Mcf::new(g, vec![Demand::new(1, 2, 1.0)]).unwrap();
        assert_eq!(pb.to_string(), "MCF(nv = 3, ne = 4, nk = 1)\n\tDemand(1, 2, 1)");
    }

    #[test]
    fn mcf_is_a_graph_view() {
        fn count_arcs<G: GraphView>(g: &G) -> usize {
            g.arcs().count()
        }
        let pb = Mcf::<u32, f64>::from_petgraph(&grid(), &[1.0; 7], &[2.0; 7], vec![]).unwrap();
        assert_eq!(count_arcs(&pb), 7);
        assert_eq!(GraphView::out_neighbors(&pb, 2), &[3, 5]);
    }
}
