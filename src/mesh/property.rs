//! Per-element scratch properties.
//!
//! A [`PropertyMap`] attaches an optional value to every element of one kind.
//! Subdivision passes use them for face points, edge points and the
//! "already created in the new mesh" markers. Unset slots read back as `None`,
//! so "not yet computed" can never be confused with a point at the origin.
//!
//! Maps are plain values owned by the pass that created them; they are not
//! registered with the mesh and disappear when the pass returns.

use std::fmt;
use std::marker::PhantomData;

use super::halfedge::HalfEdgeMesh;
use super::index::{EdgeId, FaceId, Handle, VertexId};

/// A dense map from element handles to optional values.
///
/// The handle index is used directly as the slot index, which suits the
/// sequential handles produced by [`HalfEdgeMesh`].
#[derive(Clone)]
pub struct PropertyMap<H: Handle, T> {
    slots: Vec<Option<T>>,
    _handle: PhantomData<H>,
}

/// Property attached to vertices.
pub type VertexProperty<T> = PropertyMap<VertexId, T>;
/// Property attached to edges.
pub type EdgeProperty<T> = PropertyMap<EdgeId, T>;
/// Property attached to faces.
pub type FaceProperty<T> = PropertyMap<FaceId, T>;

impl<H: Handle, T> PropertyMap<H, T> {
    /// Create a map with `len` unset slots.
    pub fn with_len(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self {
            slots,
            _handle: PhantomData,
        }
    }

    /// Build a fully populated map from a value per slot.
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            slots: values.into_iter().map(Some).collect(),
            _handle: PhantomData,
        }
    }

    /// Build a map from explicit slots, `None` meaning unset.
    pub fn from_slots(slots: Vec<Option<T>>) -> Self {
        Self {
            slots,
            _handle: PhantomData,
        }
    }

    /// Number of slots (set or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the map has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The value attached to `handle`, or `None` if it was never set.
    ///
    /// Handles past the end of the map also read as unset.
    #[inline]
    pub fn get(&self, handle: H) -> Option<&T> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    /// Whether a value is attached to `handle`.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        self.get(handle).is_some()
    }

    /// Attach `value` to `handle`, returning the previous value.
    ///
    /// The map grows if `handle` lies past the end.
    pub fn set(&mut self, handle: H, value: T) -> Option<T> {
        let i = handle.index();
        if i >= self.slots.len() {
            self.slots.resize_with(i + 1, || None);
        }
        self.slots[i].replace(value)
    }

    /// Return the value for `handle`, creating it with `f` on first access.
    ///
    /// This is the dedup primitive of the rebuild passes: `f` runs at most once
    /// per handle.
    pub fn get_or_insert_with<F: FnOnce() -> T>(&mut self, handle: H, f: F) -> &T {
        let i = handle.index();
        if i >= self.slots.len() {
            self.slots.resize_with(i + 1, || None);
        }
        self.slots[i].get_or_insert_with(f)
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    pub fn get_or_try_insert_with<F, E>(&mut self, handle: H, f: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let i = handle.index();
        if i >= self.slots.len() {
            self.slots.resize_with(i + 1, || None);
        }
        let slot = &mut self.slots[i];
        let value = match slot.take() {
            Some(value) => value,
            None => f()?,
        };
        Ok(&*slot.insert(value))
    }

    /// Clear every slot, keeping the allocation.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Iterate over the set entries in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (H::from_usize(i), v)))
    }

    /// Number of slots holding a value.
    pub fn count_set(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl<T> PropertyMap<VertexId, T> {
    /// An unset map with one slot per vertex of `mesh`.
    pub fn for_vertices(mesh: &HalfEdgeMesh) -> Self {
        Self::with_len(mesh.num_vertices())
    }
}

impl<T> PropertyMap<EdgeId, T> {
    /// An unset map with one slot per edge of `mesh`.
    pub fn for_edges(mesh: &HalfEdgeMesh) -> Self {
        Self::with_len(mesh.num_edges())
    }
}

impl<T> PropertyMap<FaceId, T> {
    /// An unset map with one slot per face of `mesh`.
    pub fn for_faces(mesh: &HalfEdgeMesh) -> Self {
        Self::with_len(mesh.num_faces())
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for PropertyMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
