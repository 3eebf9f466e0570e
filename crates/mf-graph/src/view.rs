//! Capability interface for graph algorithms.
//!
//! Shortest-path and flow code is written against [`GraphView`] rather than
//! a concrete graph type. Implementations expose structure plus a sparse
//! weight snapshot for any feature coordinate.

use mf_core::{Scalar, VertexId};
use sprs::CsMat;

use crate::error::GraphResult;
use crate::graph::FeatureGraph;

/// Read-only directed graph with weighted arcs.
pub trait GraphView {
    /// Vertex identifier (1-based).
    type Vertex: VertexId;

    /// Weight element type.
    type Weight: Scalar;

    /// Number of vertices.
    fn nv(&self) -> usize;

    /// Number of arcs.
    fn ne(&self) -> usize;

    fn is_directed(&self) -> bool {
        true
    }

    /// All vertex ids, `1..=nv`.
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_ {
        (0..self.nv()).filter_map(Self::Vertex::from_slot)
    }

    /// Arcs as (src, dst) pairs in a stable order.
    fn arcs(&self) -> impl Iterator<Item = (Self::Vertex, Self::Vertex)> + '_;

    fn out_neighbors(&self, v: Self::Vertex) -> &[Self::Vertex];

    fn in_neighbors(&self, v: Self::Vertex) -> &[Self::Vertex];

    fn has_edge(&self, src: Self::Vertex, dst: Self::Vertex) -> bool;

    /// Sparse `nv x nv` snapshot of weight coordinate `idx`.
    fn weights(&self, idx: usize) -> GraphResult<CsMat<Self::Weight>>;
}

impl<V: VertexId, F: Scalar> GraphView for FeatureGraph<V, F> {
    type Vertex = V;
    type Weight = F;

    fn nv(&self) -> usize {
        FeatureGraph::nv(self)
    }

    fn ne(&self) -> usize {
        FeatureGraph::ne(self)
    }

    fn arcs(&self) -> impl Iterator<Item = (V, V)> + '_ {
        self.edges().map(|e| (e.src, e.dst))
    }

    fn out_neighbors(&self, v: V) -> &[V] {
        FeatureGraph::out_neighbors(self, v)
    }

    fn in_neighbors(&self, v: V) -> &[V] {
        FeatureGraph::in_neighbors(self, v)
    }

    fn has_edge(&self, src: V, dst: V) -> bool {
        FeatureGraph::has_edge(self, src, dst)
    }

    fn weights(&self, idx: usize) -> GraphResult<CsMat<F>> {
        self.feature_matrix(idx)
    }
}

/// 0/1 sparse adjacency pattern of any graph view.
pub fn adjacency_matrix<G: GraphView>(graph: &G) -> CsMat<u8> {
    let n = graph.nv();
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (s, d) in graph.arcs() {
        if let (Some(s), Some(d)) = (s.slot(), d.slot()) {
            rows[s].push(d);
        }
    }

    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::with_capacity(graph.ne());
    indptr.push(0);
    for mut row in rows {
        row.sort_unstable();
        row.dedup();
        indices.extend_from_slice(&row);
        indptr.push(indices.len());
    }
    let data = vec![1_u8; indices.len()];
    CsMat::new((n, n), indptr, indices, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reachable<G: GraphView>(graph: &G, from: G::Vertex) -> Vec<G::Vertex> {
        let mut seen = vec![from];
        let mut stack = vec![from];
        while let Some(v) = stack.pop() {
            for &u in graph.out_neighbors(v) {
                if !seen.contains(&u) {
                    seen.push(u);
                    stack.push(u);
                }
            }
        }
        seen.sort();
        seen
    }

    #[test]
    fn generic_traversal_runs_on_feature_graph() {
        let g = FeatureGraph::from_scalars(vec![1_u32, 2, 4], vec![2, 3, 1], vec![1.0, 1.0, 1.0])
            .unwrap();
        assert_eq!(reachable(&g, 1), vec![1, 2, 3]);
        assert_eq!(reachable(&g, 4), vec![1, 2, 3, 4]);
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(GraphView::is_directed(&g));
    }

    #[test]
    fn adjacency_pattern() {
        let g = FeatureGraph::from_scalars(vec![1_u32, 1, 3], vec![2, 3, 3], vec![4, 5, 6]).unwrap();
        let adj = adjacency_matrix(&g);
        assert_eq!(adj.nnz(), 3);
        assert_eq!(adj.get(0, 1), Some(&1));
        assert_eq!(adj.get(2, 2), Some(&1));
        assert_eq!(adj.get(1, 0), None);
    }
}
