//! Handle types for mesh elements.
//!
//! Vertices, half-edges, edges and faces live in flat arrays inside
//! [`HalfEdgeMesh`](super::HalfEdgeMesh); these wrappers are the typed indices
//! into those arrays. Keeping the element kinds as distinct types means a face
//! handle can never be used to look up a vertex by accident.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Raw sentinel value used for an absent handle.
const INVALID: u32 = u32::MAX;

/// Common interface over all element handles.
///
/// Property maps use this to index their slot storage without caring which
/// element kind they are attached to.
pub trait Handle: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Create a handle from an array index.
    fn from_usize(index: usize) -> Self;

    /// The array index of this handle.
    fn index(self) -> usize;
}

/// A type-safe vertex handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A type-safe half-edge handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId(u32);

/// A type-safe face handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u32);

/// A type-safe edge handle (for full edges, not half-edges).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId(u32);

macro_rules! impl_handle_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new handle from an array index.
            ///
            /// Handles are 32 bits wide and `u32::MAX` is reserved for the
            /// invalid handle, so `index` must be below `u32::MAX`. Release
            /// builds truncate larger values; use [`try_new`](Self::try_new)
            /// when the index is not known to fit.
            ///
            /// # Panics
            /// Panics in debug builds if the index does not fit the handle width.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index < INVALID as usize, "index {} too large for a handle", index);
                Self(index as u32)
            }

            /// Create a handle from an array index, or `None` if the index
            /// does not fit the handle width.
            #[inline]
            pub fn try_new(index: usize) -> Option<Self> {
                u32::try_from(index)
                    .ok()
                    .filter(|&raw| raw != INVALID)
                    .map($name)
            }

            /// Create an invalid/null handle.
            #[inline]
            pub const fn invalid() -> Self {
                Self(INVALID)
            }

            /// Get the array index.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Check if this is a valid (non-null) handle.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != INVALID
            }

            /// `Some(self)` if valid, `None` for the null handle.
            #[inline]
            pub fn valid(self) -> Option<Self> {
                if self.is_valid() {
                    Some(self)
                } else {
                    None
                }
            }
        }

        impl Handle for $name {
            #[inline]
            fn from_usize(index: usize) -> Self {
                Self::new(index)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.0)
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_handle_type!(VertexId, "V");
impl_handle_type!(HalfEdgeId, "HE");
impl_handle_type!(FaceId, "F");
impl_handle_type!(EdgeId, "E");

impl HalfEdgeId {
    /// The other half of the same edge.
    ///
    /// Half-edges are allocated in pairs, so the twin is the neighbouring slot.
    #[inline]
    pub fn twin(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// The full edge this half-edge belongs to.
    #[inline]
    pub fn edge(self) -> EdgeId {
        EdgeId(self.0 >> 1)
    }
}

impl EdgeId {
    /// One of the two half-edges of this edge (`side` is 0 or 1).
    #[inline]
    pub fn halfedge(self, side: usize) -> HalfEdgeId {
        debug_assert!(side < 2);
        HalfEdgeId((self.0 << 1) | side as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let v = VertexId::new(42);
        assert_eq!(v.index(), 42);
        assert!(v.is_valid());
        assert_eq!(v.valid(), Some(v));

        let invalid = VertexId::invalid();
        assert!(!invalid.is_valid());
        assert_eq!(invalid.valid(), None);
        assert_eq!(VertexId::default(), invalid);
    }

    #[test]
    fn test_handle_width_limit() {
        let last = INVALID as usize - 1;
        assert_eq!(FaceId::try_new(last).map(FaceId::index), Some(last));
        assert_eq!(FaceId::try_new(INVALID as usize), None);
        assert_eq!(VertexId::try_new(usize::MAX), None);
        assert_eq!(EdgeId::try_new(3), Some(EdgeId::new(3)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "too large for a handle")]
    fn test_oversized_index_panics_in_debug() {
        let _ = VertexId::new(INVALID as usize);
    }

    #[test]
    fn test_halfedge_pairing() {
        let e = EdgeId::new(5);
        let h0 = e.halfedge(0);
        let h1 = e.halfedge(1);

        assert_eq!(h0.index(), 10);
        assert_eq!(h1.index(), 11);
        assert_eq!(h0.twin(), h1);
        assert_eq!(h1.twin(), h0);
        assert_eq!(h0.twin().twin(), h0);
        assert_eq!(h0.edge(), e);
        assert_eq!(h1.edge(), e);
    }

    #[test]
    fn test_handle_trait() {
        fn roundtrip<H: Handle>(i: usize) -> usize {
            H::from_usize(i).index()
        }
        assert_eq!(roundtrip::<FaceId>(7), 7);
        assert_eq!(roundtrip::<EdgeId>(0), 0);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", VertexId::new(42)), "V(42)");
        assert_eq!(format!("{:?}", HalfEdgeId::new(3)), "HE(3)");
        assert_eq!(format!("{:?}", EdgeId::new(1)), "E(1)");
        assert_eq!(format!("{:?}", FaceId::invalid()), "F(INVALID)");
    }
}
