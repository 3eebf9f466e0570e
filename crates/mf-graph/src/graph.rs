//! Core feature graph storage.

use std::collections::HashMap;
use std::fmt;

use mf_core::{Scalar, VertexId, vertex_slot};
use nalgebra::DMatrix;

use crate::error::{GraphError, GraphResult};
use crate::feature::{Feature, FeatureDim};

/// Borrowed view of one stored edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRef<'a, V, F> {
    pub src: V,
    pub dst: V,
    dim: FeatureDim,
    values: &'a [F],
}

impl<'a, V: VertexId, F: Scalar> EdgeRef<'a, V, F> {
    /// Feature coordinates in storage order.
    pub fn feature(&self) -> &'a [F] {
        self.values
    }

    /// Owned copy of the feature with the graph's shape.
    pub fn to_feature(&self) -> Feature<F> {
        Feature::from_parts(self.dim, self.values)
    }
}

/// Directed graph with a fixed-shape feature on every edge.
///
/// The graph stores:
/// - Edges in insertion order, with features in one flat table (`width` values per edge).
/// - A pair index for O(1) `has_edge` and position lookup.
/// - Out- and in-neighbor lists per vertex, appended to as edges arrive.
///
/// Vertex ids are 1-based; the vertex count is the largest id seen (or an
/// explicit count, whichever is larger).
#[derive(Debug, Clone)]
pub struct FeatureGraph<V, F> {
    pub(crate) dim: FeatureDim,
    pub(crate) nv: usize,
    pub(crate) src: Vec<V>,
    pub(crate) dst: Vec<V>,
    pub(crate) features: Vec<F>,
    positions: HashMap<(V, V), usize>,
    out_adj: Vec<Vec<V>>,
    in_adj: Vec<Vec<V>>,
}

impl<V: VertexId, F: Scalar> FeatureGraph<V, F> {
    /// Edgeless graph with no vertices.
    pub fn empty(dim: FeatureDim) -> Self {
        Self::with_vertices(0, dim)
    }

    /// Edgeless graph with `nv` isolated vertices.
    pub fn with_vertices(nv: usize, dim: FeatureDim) -> Self {
        Self {
            dim,
            nv,
            src: Vec::new(),
            dst: Vec::new(),
            features: Vec::new(),
            positions: HashMap::new(),
            out_adj: vec![Vec::new(); nv],
            in_adj: vec![Vec::new(); nv],
        }
    }

    /// Build a graph from parallel source, destination and feature lists.
    ///
    /// The feature dimension is taken from the first feature. A repeated
    /// (src, dst) pair keeps its first occurrence.
    pub fn new(src: Vec<V>, dst: Vec<V>, features: Vec<Feature<F>>) -> GraphResult<Self> {
        check_len("dstnodes", src.len(), dst.len())?;
        check_len("arc_features", src.len(), features.len())?;
        let dim = features.first().ok_or(GraphError::NoEdges)?.dim();
        if let Some(bad) = features.iter().find(|f| f.dim() != dim) {
            return Err(GraphError::DimensionMismatch {
                expected: dim,
                actual: bad.dim(),
            });
        }

        let mut graph = Self::empty(dim);
        for ((s, d), feature) in src.into_iter().zip(dst).zip(&features) {
            graph.insert(s, d, feature.as_slice())?;
        }
        tracing::trace!(nv = graph.nv, ne = graph.ne(), dim = %dim, "built feature graph");
        Ok(graph)
    }

    /// Build a graph with one scalar feature per edge.
    pub fn from_scalars(src: Vec<V>, dst: Vec<V>, values: Vec<F>) -> GraphResult<Self> {
        Self::new(src, dst, values.into_iter().map(Feature::Scalar).collect())
    }

    /// Build a graph whose edge `i` carries row `i` of `table` as a vector feature.
    ///
    /// Unlike [`FeatureGraph::new`], an empty edge list is accepted: the
    /// dimension comes from the table's column count.
    pub fn from_rows(src: Vec<V>, dst: Vec<V>, table: &DMatrix<F>) -> GraphResult<Self> {
        check_len("dstnodes", src.len(), dst.len())?;
        check_len("arc_features", src.len(), table.nrows())?;

        let mut graph = Self::empty(FeatureDim::Vector(table.ncols()));
        for (row, (s, d)) in src.into_iter().zip(dst).enumerate() {
            let values: Vec<F> = table.row(row).iter().copied().collect();
            graph.insert(s, d, &values)?;
        }
        Ok(graph)
    }

    /// Add arc (src, dst) with the given feature.
    ///
    /// Returns `Ok(false)` and leaves the graph untouched if the arc already
    /// exists. Fails with [`GraphError::DimensionMismatch`] if the feature's
    /// shape differs from [`FeatureGraph::feature_dim`].
    pub fn add_edge(&mut self, src: V, dst: V, feature: impl Into<Feature<F>>) -> GraphResult<bool> {
        let feature = feature.into();
        if feature.dim() != self.dim {
            return Err(GraphError::DimensionMismatch {
                expected: self.dim,
                actual: feature.dim(),
            });
        }
        self.insert(src, dst, feature.as_slice())
    }

    /// Insert an arc whose coordinates already have the graph's width.
    pub(crate) fn insert(&mut self, src: V, dst: V, values: &[F]) -> GraphResult<bool> {
        debug_assert_eq!(values.len(), self.dim.width());
        let s = vertex_slot(src)?;
        let d = vertex_slot(dst)?;
        if self.positions.contains_key(&(src, dst)) {
            return Ok(false);
        }
        self.push_edge(src, s, dst, d, values);
        Ok(true)
    }

    fn push_edge(&mut self, src: V, s: usize, dst: V, d: usize, values: &[F]) {
        let needed = s.max(d) + 1;
        if needed > self.nv {
            self.nv = needed;
            self.out_adj.resize_with(needed, Vec::new);
            self.in_adj.resize_with(needed, Vec::new);
        }

        let pos = self.src.len();
        self.src.push(src);
        self.dst.push(dst);
        self.features.extend_from_slice(values);
        self.positions.insert((src, dst), pos);
        self.out_adj[s].push(dst);
        self.in_adj[d].push(src);
    }

    /// Check if the graph contains arc (src, dst).
    pub fn has_edge(&self, src: V, dst: V) -> bool {
        self.positions.contains_key(&(src, dst))
    }

    /// Insertion position of arc (src, dst).
    pub fn edge_position(&self, src: V, dst: V) -> Option<usize> {
        self.positions.get(&(src, dst)).copied()
    }

    /// Vertices `u` with an arc (v, u), in insertion order.
    pub fn out_neighbors(&self, v: V) -> &[V] {
        v.slot()
            .and_then(|s| self.out_adj.get(s))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Vertices `u` with an arc (u, v), in insertion order.
    pub fn in_neighbors(&self, v: V) -> &[V] {
        v.slot()
            .and_then(|s| self.in_adj.get(s))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of vertices.
    pub fn nv(&self) -> usize {
        self.nv
    }

    /// Number of arcs.
    pub fn ne(&self) -> usize {
        self.src.len()
    }

    /// Always true.
    pub fn is_directed(&self) -> bool {
        true
    }

    pub fn feature_dim(&self) -> FeatureDim {
        self.dim
    }

    /// Arcs in insertion order. Call again to restart.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeRef<'_, V, F>> + Clone + '_ {
        (0..self.ne()).map(move |pos| self.edge_ref(pos))
    }

    /// Arc stored at an insertion position.
    pub fn edge(&self, pos: usize) -> Option<EdgeRef<'_, V, F>> {
        (pos < self.ne()).then(|| self.edge_ref(pos))
    }

    fn edge_ref(&self, pos: usize) -> EdgeRef<'_, V, F> {
        EdgeRef {
            src: self.src[pos],
            dst: self.dst[pos],
            dim: self.dim,
            values: self.values_at(pos),
        }
    }

    pub(crate) fn values_at(&self, pos: usize) -> &[F] {
        let width = self.dim.width();
        &self.features[pos * width..(pos + 1) * width]
    }

    /// Feature coordinates of arc (src, dst).
    pub fn feature_of(&self, src: V, dst: V) -> Option<&[F]> {
        self.edge_position(src, dst).map(|pos| self.values_at(pos))
    }

    /// Full `(ne, width)` feature table in insertion order.
    ///
    /// Scalar features give a single column.
    pub fn arc_features(&self) -> DMatrix<F> {
        DMatrix::from_row_slice(self.ne(), self.dim.width(), &self.features)
    }

    /// Coordinate `idx` of every arc's feature, in insertion order.
    pub fn arc_features_at(&self, idx: usize) -> GraphResult<Vec<F>> {
        self.check_index(idx)?;
        let width = self.dim.width();
        Ok(self.features.iter().skip(idx).step_by(width).copied().collect())
    }

    pub(crate) fn check_index(&self, idx: usize) -> GraphResult<()> {
        if idx < self.dim.width() {
            Ok(())
        } else {
            Err(GraphError::FeatureIndexOutOfRange {
                index: idx,
                dim: self.dim,
            })
        }
    }

    /// For each arc (u, v) without a reverse, add (v, u) with a copy of its feature.
    ///
    /// Existing reverse arcs are left as they are. Returns the number of arcs added.
    pub fn double_edges(&mut self) -> usize {
        let existing = self.src.len();
        let mut added = 0;
        for pos in 0..existing {
            let (u, v) = (self.src[pos], self.dst[pos]);
            if self.has_edge(v, u) {
                continue;
            }
            let (Some(s), Some(d)) = (v.slot(), u.slot()) else {
                continue;
            };
            let values = self.values_at(pos).to_vec();
            self.push_edge(v, s, u, d, &values);
            added += 1;
        }
        tracing::debug!(added, ne = self.src.len(), "mirrored arcs");
        added
    }

    /// Multiply every feature elementwise by `factor`, in place.
    pub fn scale_features(&mut self, factor: &Feature<F>) -> GraphResult<()> {
        if factor.dim() != self.dim {
            return Err(GraphError::DimensionMismatch {
                expected: self.dim,
                actual: factor.dim(),
            });
        }
        let factor = factor.as_slice();
        if factor.is_empty() {
            return Ok(());
        }
        for chunk in self.features.chunks_mut(factor.len()) {
            for (x, &f) in chunk.iter_mut().zip(factor) {
                *x = *x * f;
            }
        }
        Ok(())
    }

    /// Copy of the graph with every feature multiplied elementwise by `factor`.
    pub fn scaled_features(&self, factor: &Feature<F>) -> GraphResult<Self> {
        let mut scaled = self.clone();
        scaled.scale_features(factor)?;
        Ok(scaled)
    }

    /// Copy of the graph with `f(coordinate, value)` applied to every feature value.
    pub fn map_features(&self, f: impl Fn(usize, F) -> F) -> Self {
        let width = self.dim.width();
        let mut mapped = self.clone();
        for (i, x) in mapped.features.iter_mut().enumerate() {
            *x = f(i % width, *x);
        }
        mapped
    }
}

// Adjacency and the pair index are derived from the arc list.
impl<V: VertexId, F: Scalar> PartialEq for FeatureGraph<V, F> {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim
            && self.nv == other.nv
            && self.src == other.src
            && self.dst == other.dst
            && self.features == other.features
    }
}

impl<V: VertexId, F: Scalar> fmt::Display for FeatureGraph<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeatureGraph(nv = {}, ne = {}, feature_dim = {})",
            self.nv,
            self.ne(),
            self.dim
        )
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> GraphResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(GraphError::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> FeatureGraph<u32, f64> {
        FeatureGraph::from_rows(
            vec![1, 2, 3],
            vec![2, 3, 1],
            &DMatrix::from_element(3, 2, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn scalar_graph_counts() {
        let g = FeatureGraph::from_scalars(vec![1_u32, 2, 3], vec![2, 3, 1], vec![5.0, 5.0, 5.0])
            .unwrap();
        assert_eq!(g.nv(), 3);
        assert_eq!(g.ne(), 3);
        assert_eq!(g.feature_dim(), FeatureDim::Scalar);
        assert!(g.is_directed());
    }

    #[test]
    fn new_rejects_mixed_dimensions() {
        let err = FeatureGraph::<u32, f64>::new(
            vec![1, 2],
            vec![2, 3],
            vec![Feature::from([1.0, 1.0]), Feature::from([1.0])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::DimensionMismatch {
                expected: FeatureDim::Vector(2),
                actual: FeatureDim::Vector(1),
            }
        );
    }

    #[test]
    fn new_rejects_length_mismatch_and_empty() {
        let err = FeatureGraph::<u32, f64>::from_scalars(vec![1, 2], vec![2], vec![1.0, 1.0])
            .unwrap_err();
        assert!(matches!(err, GraphError::LengthMismatch { what: "dstnodes", .. }));

        let err = FeatureGraph::<u32, f64>::new(vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err, GraphError::NoEdges);
    }

    #[test]
    fn add_edge_extends_vertices() {
        let mut g = triangle();
        assert!(g.add_edge(1, 4, [2.0, 2.0]).unwrap());
        assert!(!g.add_edge(1, 2, [3.0, 3.0]).unwrap());
        assert_eq!((g.nv(), g.ne()), (4, 4));
        assert_eq!(g.feature_of(1, 2), Some(&[1.0, 1.0][..]));
    }

    #[test]
    fn add_edge_wrong_shape_leaves_graph_unchanged() {
        let mut g = triangle();
        let before = g.clone();
        let err = g.add_edge(1, 4, [1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err.to_string(), "Expected feature dimension (2,) got (3,)");
        assert_eq!(g, before);
    }

    #[test]
    fn zero_vertex_is_rejected() {
        let mut g = triangle();
        assert!(matches!(
            g.add_edge(0, 1, [1.0, 1.0]),
            Err(GraphError::Core(_))
        ));
        assert_eq!(g.ne(), 3);
    }

    #[test]
    fn neighbors_follow_insertion_order() {
        let g = FeatureGraph::from_scalars(vec![1_u32, 2, 3, 1], vec![2, 3, 1, 4], vec![1, 1, 1, 2])
            .unwrap();
        assert_eq!(g.out_neighbors(1), &[2, 4]);
        assert_eq!(g.in_neighbors(1), &[3]);
        assert!(g.out_neighbors(4).is_empty());
        assert!(g.out_neighbors(99).is_empty());
    }

    #[test]
    fn with_vertices_keeps_isolated_vertices() {
        let mut g = FeatureGraph::<u32, i64>::with_vertices(6, FeatureDim::Scalar);
        g.add_edge(1, 2, Feature::Scalar(3)).unwrap();
        assert_eq!(g.nv(), 6);
        assert!(g.in_neighbors(6).is_empty());
    }

    #[test]
    fn edges_iterator_restarts() {
        let g = triangle();
        let edges = g.edges();
        let first: Vec<_> = edges.clone().map(|e| (e.src, e.dst)).collect();
        let second: Vec<_> = edges.map(|e| (e.src, e.dst)).collect();
        assert_eq!(first, vec![(1, 2), (2, 3), (3, 1)]);
        assert_eq!(first, second);
        assert_eq!(g.edges().len(), 3);
        assert!(g.edge(3).is_none());
    }

    #[test]
    fn arc_features_table_and_projection() {
        let table = DMatrix::from_row_slice(4, 2, &[3.0, 4.0, 3.0, 4.0, 3.0, 4.0, 3.0, 4.0]);
        let g = FeatureGraph::<u32, f64>::from_rows(vec![1, 2, 3, 1], vec![2, 3, 1, 4], &table)
            .unwrap();
        assert_eq!(g.arc_features(), table);
        assert_eq!(g.arc_features_at(0).unwrap(), vec![3.0; 4]);
        assert_eq!(g.arc_features_at(1).unwrap(), vec![4.0; 4]);
        assert!(matches!(
            g.arc_features_at(2),
            Err(GraphError::FeatureIndexOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn double_edges_copies_features() {
        let mut g = FeatureGraph::<u32, i32>::new(
            vec![1, 2, 3, 1],
            vec![2, 3, 1, 3],
            vec![
                Feature::from([1, 1]),
                Feature::from([1, 1]),
                Feature::from([1, 1]),
                Feature::from([4, 1]),
            ],
        )
        .unwrap();
        assert_eq!(g.double_edges(), 2);
        let arcs: Vec<_> = g.edges().map(|e| (e.src, e.dst)).collect();
        assert_eq!(arcs, vec![(1, 2), (2, 3), (3, 1), (1, 3), (2, 1), (3, 2)]);
        // (3, 1) already existed, so the (1, 3) feature stays put
        assert_eq!(g.feature_of(1, 3), Some(&[4, 1][..]));
        assert_eq!(g.feature_of(3, 1), Some(&[1, 1][..]));
        assert_eq!(g.double_edges(), 0);
    }

    fn mirror(g: &mut FeatureGraph<u32, f64>) -> usize {
        g.double_edges()
    }

    #[test]
    fn double_edges_through_mutable_borrow() {
        let mut g = triangle();
        assert_eq!(mirror(&mut g), 3);
        assert_eq!(g.ne(), 6);
        assert_eq!(mirror(&mut g), 0);
        assert_eq!(FeatureGraph::ne(&g), 6);
    }

    #[test]
    fn self_loops_are_not_mirrored() {
        let mut g = FeatureGraph::from_scalars(vec![2_u32], vec![2], vec![1.0]).unwrap();
        assert_eq!(g.double_edges(), 0);
        assert_eq!(g.ne(), 1);
    }

    #[test]
    fn scale_features_in_place() {
        let mut g = triangle();
        g.scale_features(&Feature::from([2.0, 0.5])).unwrap();
        assert_eq!(g.arc_features_at(0).unwrap(), vec![2.0; 3]);
        assert_eq!(g.arc_features_at(1).unwrap(), vec![0.5; 3]);

        let err = g.scale_features(&Feature::Scalar(2.0)).unwrap_err();
        assert!(matches!(err, GraphError::DimensionMismatch { .. }));
    }

    #[test]
    fn scaled_features_leaves_source_alone() {
        let g = triangle();
        let scaled = g.scaled_features(&Feature::from([3.0, 1.0])).unwrap();
        assert_eq!(g.arc_features_at(0).unwrap(), vec![1.0; 3]);
        assert_eq!(scaled.arc_features_at(0).unwrap(), vec![3.0; 3]);
    }

    #[test]
    fn map_features_sees_coordinates() {
        let g = triangle();
        let mapped = g.map_features(|k, x| if k == 1 { x * 10.0 } else { x });
        assert_eq!(mapped.arc_features_at(1).unwrap(), vec![10.0; 3]);
        assert_eq!(mapped.arc_features_at(0).unwrap(), vec![1.0; 3]);
    }

    #[test]
    fn display_summary() {
        assert_eq!(
            triangle().to_string(),
            "FeatureGraph(nv = 3, ne = 3, feature_dim = (2,))"
        );
    }
}
