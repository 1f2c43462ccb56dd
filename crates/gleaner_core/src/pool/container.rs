//! # Pooled Container
//!
//! A `Vec` tagged with a stable identity inside its pool.

/// Identity of a container within one typed pool.
///
/// Assigned by the pool when the container is first created and kept across
/// every checkout, so two handles can be compared for "same list". Only the
/// owning pool mints IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ContainerId(u64);

impl ContainerId {
    #[inline]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A reusable result list.
///
/// Containers are created by their pool and only leave it inside a handle;
/// the storage stays allocated between uses.
#[derive(Debug)]
pub struct Container<T> {
    id: ContainerId,
    pub(crate) items: Vec<T>,
}

impl<T> Container<T> {
    /// Creates an empty container with room for `capacity` elements.
    pub(crate) fn with_capacity(id: ContainerId, capacity: usize) -> Self {
        Self {
            id,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Returns this container's identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Number of elements currently held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the container holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the storage can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Read access to the elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}
