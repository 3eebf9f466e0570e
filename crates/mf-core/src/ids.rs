use core::fmt;
use core::hash::Hash;

use num_traits::PrimInt;

use crate::error::{CoreError, CoreResult};

/// Integer type usable as a vertex identifier.
///
/// Vertex ids are 1-based: id `1` occupies slot `0` of every adjacency table
/// and matrix. Id `0` (and negative ids for signed types) has no slot.
pub trait VertexId: PrimInt + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// 0-based slot of this id, or `None` if the id is not a valid vertex.
    fn slot(self) -> Option<usize> {
        self.to_usize()?.checked_sub(1)
    }

    /// Id stored at a 0-based slot, or `None` if it does not fit in `Self`.
    fn from_slot(slot: usize) -> Option<Self> {
        <Self as num_traits::NumCast>::from(slot.checked_add(1)?)
    }
}

impl<T> VertexId for T where T: PrimInt + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// Resolve a vertex id to its slot, failing with [`CoreError::InvalidVertex`].
pub fn vertex_slot<V: VertexId>(v: V) -> CoreResult<usize> {
    v.slot().ok_or_else(|| CoreError::InvalidVertex { id: v.to_string() })
}

/// Resolve a slot back to a vertex id, failing if the type is too narrow.
pub fn vertex_at<V: VertexId>(slot: usize) -> CoreResult<V> {
    V::from_slot(slot).ok_or_else(|| CoreError::InvalidVertex {
        id: (slot as u128 + 1).to_string(),
    })
}
