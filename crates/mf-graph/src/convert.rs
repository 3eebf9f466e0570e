//! Adapting `petgraph` graphs into feature graphs.

use mf_core::{Scalar, VertexId, vertex_at};
use nalgebra::DMatrix;
use petgraph::graph::{Graph, IndexType};
use petgraph::EdgeType;

use crate::error::{GraphError, GraphResult};
use crate::feature::FeatureDim;
use crate::graph::FeatureGraph;

/// Arc endpoints of a petgraph graph as 0-based slots, in edge-index order.
///
/// Undirected edges are oriented from the lower to the higher node index.
pub fn petgraph_arcs<N, E, Ty: EdgeType, Ix: IndexType>(
    graph: &Graph<N, E, Ty, Ix>,
) -> Vec<(usize, usize)> {
    graph
        .raw_edges()
        .iter()
        .map(|edge| {
            let (a, b) = (edge.source().index(), edge.target().index());
            if graph.is_directed() { (a, b) } else { (a.min(b), a.max(b)) }
        })
        .collect()
}

impl<V: VertexId, F: Scalar> FeatureGraph<V, F> {
    /// Adapt the edge set of `graph`, pairing edge `i` with row `i` of `table`.
    ///
    /// Node index `i` becomes vertex `i + 1`, so the vertex count equals the
    /// petgraph node count. Parallel edges keep the first one, so `ne()` can be
    /// smaller than `graph.edge_count()`.
    pub fn from_petgraph<N, E, Ty: EdgeType, Ix: IndexType>(
        graph: &Graph<N, E, Ty, Ix>,
        table: &DMatrix<F>,
    ) -> GraphResult<Self> {
        if table.nrows() != graph.edge_count() {
            return Err(GraphError::LengthMismatch {
                what: "arc_features",
                expected: graph.edge_count(),
                actual: table.nrows(),
            });
        }
        let mut fg = Self::with_vertices(graph.node_count(), FeatureDim::Vector(table.ncols()));
        for (row, (s, d)) in petgraph_arcs(graph).into_iter().enumerate() {
            let values: Vec<F> = table.row(row).iter().copied().collect();
            if !fg.insert(vertex_at(s)?, vertex_at(d)?, &values)? {
                tracing::debug!(edge = row, src = s + 1, dst = d + 1, "parallel edge ignored");
            }
        }
        Ok(fg)
    }

    /// Adapt the edge set of `graph` with one scalar feature per edge.
    ///
    /// Parallel edges keep the first one, as in [`FeatureGraph::from_petgraph`].
    pub fn from_petgraph_scalars<N, E, Ty: EdgeType, Ix: IndexType>(
        graph: &Graph<N, E, Ty, Ix>,
        values: &[F],
    ) -> GraphResult<Self> {
        if values.len() != graph.edge_count() {
            return Err(GraphError::LengthMismatch {
                what: "arc_features",
                expected: graph.edge_count(),
                actual: values.len(),
            });
        }
        let mut fg = Self::with_vertices(graph.node_count(), FeatureDim::Scalar);
        for (edge, ((s, d), value)) in petgraph_arcs(graph).into_iter().zip(values).enumerate() {
            if !fg.insert(vertex_at(s)?, vertex_at(d)?, core::slice::from_ref(value))? {
                tracing::debug!(edge, src = s + 1, dst = d + 1, "parallel edge ignored");
            }
        }
        Ok(fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, UnGraph};

    #[test]
    fn undirected_edges_are_oriented_low_to_high() {
        let g = UnGraph::<(), ()>::from_edges([(1_u32, 0_u32), (2, 1)]);
        let fg = FeatureGraph::<u32, f64>::from_petgraph(&g, &DMatrix::from_element(2, 2, 1.0))
            .unwrap();
        let arcs: Vec<_> = fg.edges().map(|e| (e.src, e.dst)).collect();
        assert_eq!(arcs, vec![(1, 2), (2, 3)]);
        assert_eq!(fg.feature_dim(), FeatureDim::Vector(2));
    }

    #[test]
    fn isolated_nodes_count_as_vertices() {
        let mut g = DiGraph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_node(());
        g.add_edge(b, a, ());
        let fg = FeatureGraph::<u16, i32>::from_petgraph_scalars(&g, &[7]).unwrap();
        assert_eq!(fg.nv(), 3);
        assert_eq!(fg.feature_of(2, 1), Some(&[7][..]));
    }

    #[test]
    fn parallel_edges_keep_first() {
        let mut g = DiGraph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_edge(a, b, ());
        g.add_edge(a, b, ());
        g.add_edge(b, a, ());
        let table = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 5.0, 5.0, 3.0, 4.0]);
        let fg = FeatureGraph::<u32, f64>::from_petgraph(&g, &table).unwrap();
        assert_eq!(fg.ne(), 2);
        assert_eq!(fg.feature_of(1, 2), Some(&[1.0, 2.0][..]));
        assert_eq!(fg.feature_of(2, 1), Some(&[3.0, 4.0][..]));

        let fg = FeatureGraph::<u32, i32>::from_petgraph_scalars(&g, &[1, 9, 2]).unwrap();
        assert_eq!(fg.ne(), 2);
        assert_eq!(fg.feature_of(1, 2), Some(&[1][..]));
    }

    #[test]
    fn table_rows_must_match_edge_count() {
        let g = DiGraph::<(), ()>::from_edges([(0_u32, 1_u32)]);
        let err = FeatureGraph::<u32, f64>::from_petgraph(&g, &DMatrix::from_element(2, 2, 1.0))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::LengthMismatch {
                what: "arc_features",
                expected: 1,
                actual: 2,
            }
        );
    }
}
