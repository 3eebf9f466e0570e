//! Matrix snapshots of edge features.
//!
//! Every function here reads the graph once and returns freshly allocated
//! storage. Row and column `i` correspond to vertex id `i + 1`.

use mf_core::{Scalar, VertexId};
use nalgebra::DMatrix;
use sprs::CsMat;

use crate::error::GraphResult;
use crate::graph::FeatureGraph;

/// One sparse `nv x nv` layer per requested feature coordinate.
///
/// Addressed as `(src, dst, k)` where `k` is the position in the requested
/// index list, not the feature coordinate itself.
#[derive(Debug, Clone)]
pub struct FeatureStack<F> {
    indices: Vec<usize>,
    layers: Vec<CsMat<F>>,
}

impl<F: Scalar> FeatureStack<F> {
    /// Feature coordinates stacked, in layer order.
    pub fn feature_indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn layer(&self, k: usize) -> Option<&CsMat<F>> {
        self.layers.get(k)
    }

    pub fn layers(&self) -> &[CsMat<F>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// `(nv, nv, layers)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        let n = self.layers.first().map_or(0, |m| m.rows());
        (n, n, self.layers.len())
    }

    /// Value at `(row, col, k)`: zero for cells without an arc, `None` out of bounds.
    pub fn get(&self, row: usize, col: usize, k: usize) -> Option<F> {
        let layer = self.layers.get(k)?;
        if row >= layer.rows() || col >= layer.cols() {
            return None;
        }
        Some(layer.get(row, col).copied().unwrap_or_else(F::zero))
    }
}

/// Sparse CSR matrix holding feature coordinate `idx` of every arc.
pub fn sparse_feature_matrix<V: VertexId, F: Scalar>(
    graph: &FeatureGraph<V, F>,
    idx: usize,
) -> GraphResult<CsMat<F>> {
    graph.check_index(idx)?;
    let n = graph.nv();

    // Bucket arcs per source row, then order each row by column for CSR.
    let mut rows: Vec<Vec<(usize, F)>> = vec![Vec::new(); n];
    for edge in graph.edges() {
        if let (Some(s), Some(d)) = (edge.src.slot(), edge.dst.slot()) {
            rows[s].push((d, edge.feature()[idx]));
        }
    }

    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::with_capacity(graph.ne());
    let mut data = Vec::with_capacity(graph.ne());
    indptr.push(0);
    for mut row in rows {
        row.sort_unstable_by_key(|&(col, _)| col);
        for (col, value) in row {
            indices.push(col);
            data.push(value);
        }
        indptr.push(indices.len());
    }

    Ok(CsMat::new((n, n), indptr, indices, data))
}

/// Stack of sparse matrices, one per entry of `indices`.
pub fn sparse_feature_stack<V: VertexId, F: Scalar>(
    graph: &FeatureGraph<V, F>,
    indices: &[usize],
) -> GraphResult<FeatureStack<F>> {
    let layers = indices
        .iter()
        .map(|&idx| sparse_feature_matrix(graph, idx))
        .collect::<GraphResult<Vec<_>>>()?;
    Ok(FeatureStack {
        indices: indices.to_vec(),
        layers,
    })
}

/// Dense `nv x nv` matrix holding feature coordinate `idx`, zero off the arcs.
pub fn dense_feature_matrix<V: VertexId, F: Scalar>(
    graph: &FeatureGraph<V, F>,
    idx: usize,
) -> GraphResult<DMatrix<F>> {
    graph.check_index(idx)?;
    let n = graph.nv();
    let mut mat = DMatrix::from_element(n, n, F::zero());
    for edge in graph.edges() {
        if let (Some(s), Some(d)) = (edge.src.slot(), edge.dst.slot()) {
            mat[(s, d)] = edge.feature()[idx];
        }
    }
    Ok(mat)
}

impl<V: VertexId, F: Scalar> FeatureGraph<V, F> {
    /// `nv x nv` sparse snapshot of feature coordinate `idx`.
    ///
    /// Entry `(s - 1, d - 1)` holds the coordinate for arc (s, d). Later
    /// mutation of the graph does not affect the returned matrix.
    pub fn feature_matrix(&self, idx: usize) -> GraphResult<CsMat<F>> {
        sparse_feature_matrix(self, idx)
    }

    /// `nv x nv x indices.len()` stack of sparse snapshots.
    pub fn feature_matrix_stack(&self, indices: &[usize]) -> GraphResult<FeatureStack<F>> {
        sparse_feature_stack(self, indices)
    }

    pub fn dense_feature_matrix(&self, idx: usize) -> GraphResult<DMatrix<F>> {
        dense_feature_matrix(self, idx)
    }

    /// Default weights for path algorithms: the first feature coordinate.
    pub fn weight_matrix(&self) -> GraphResult<CsMat<F>> {
        self.feature_matrix(0)
    }
}
