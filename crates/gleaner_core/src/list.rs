//! # Pooled List Handle
//!
//! Scoped ownership of a checked-out list.
//!
//! A [`PooledList`] gives its list back to the pool exactly once, whichever
//! of these happens first:
//! - [`PooledList::release`] is called
//! - the handle is dropped (normal exit, early return, `?`, unwinding)
//! - a single pass started with `into_pass` or `into_iter` reaches its end
//!
//! Any later release is a no-op. Starting a pass on a released handle is a
//! usage error: `into_pass` reports it as [`QueryError::Released`].

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::error::{QueryError, QueryResult};
use crate::pool::{Container, ContainerId, TypedPool};

/// A list checked out of a [`TypedPool`].
///
/// # Example
///
/// ```rust,ignore
/// let list = registry.components::<Arc<Health>, _>(Some(&player));
/// let first = list.get(0)?;
///
/// // Single pass. The list is back in its pool once the loop finishes.
/// for health in list {
///     total += health.points;
/// }
/// ```
pub struct PooledList<T: Send + 'static> {
    container: Option<Container<T>>,
    pool: Arc<TypedPool<T>>,
}

impl<T: Send + 'static> PooledList<T> {
    pub(crate) fn new(container: Container<T>, pool: Arc<TypedPool<T>>) -> Self {
        Self {
            container: Some(container),
            pool,
        }
    }

    /// Identity of the underlying list, or `None` once released.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<ContainerId> {
        self.container.as_ref().map(Container::id)
    }

    /// Whether the list was already given back to its pool.
    #[inline]
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.container.is_none()
    }

    /// Number of elements. A released handle reports zero.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.container.as_ref().map_or(0, Container::len)
    }

    /// Whether the list holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The elements in fill order. A released handle yields an empty slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match &self.container {
            Some(container) => container.as_slice(),
            None => &[],
        }
    }

    /// Borrowing iterator. Does not release the list.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// The first element, if any.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The last element, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Reads the element at `index`.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Released`] if the handle was already released
    /// - [`QueryError::IndexOutOfRange`] if `index >= len`
    pub fn get(&self, index: usize) -> QueryResult<&T> {
        let container = self.container.as_ref().ok_or(QueryError::Released)?;
        container.as_slice().get(index).ok_or_else(|| {
            let len = container.len();
            #[cfg(debug_assertions)]
            tracing::debug!(
                "out of range read on {} list {}: index {} >= len {}",
                std::any::type_name::<T>(),
                container.id().raw(),
                index,
                len
            );
            QueryError::IndexOutOfRange { index, len }
        })
    }

    /// Gives the list back to its pool now.
    ///
    /// Calling this again, or dropping the handle afterwards, does nothing.
    pub fn release(&mut self) {
        match self.container.take() {
            Some(container) => self.pool.release(container),
            None => self.pool.note_redundant_release(),
        }
    }

    /// Starts the single pass over the elements.
    ///
    /// The list goes back to its pool when the pass ends or is dropped.
    ///
    /// # Errors
    ///
    /// [`QueryError::Released`] if the handle was already released.
    pub fn into_pass(mut self) -> QueryResult<PooledIter<T>> {
        match self.container.take() {
            Some(container) => Ok(PooledIter::new(Some(container), Arc::clone(&self.pool))),
            None => {
                self.pool.note_redundant_release();
                Err(QueryError::Released)
            }
        }
    }

    /// Clears the list and lets `fill` write the new contents.
    ///
    /// Does nothing on a released handle.
    pub(crate) fn refill(&mut self, fill: impl FnOnce(&mut Vec<T>)) {
        if let Some(container) = self.container.as_mut() {
            container.items.clear();
            fill(&mut container.items);
        }
    }

    /// Moves the last element out of the list.
    pub(crate) fn take_last(&mut self) -> Option<T> {
        self.container.as_mut()?.items.pop()
    }

    /// Moves the first element out of the list. Order of the rest is lost.
    pub(crate) fn take_first(&mut self) -> Option<T> {
        let items = &mut self.container.as_mut()?.items;
        if items.is_empty() {
            None
        } else {
            Some(items.swap_remove(0))
        }
    }
}

impl<T: Send + 'static> Drop for PooledList<T> {
    fn drop(&mut self) {
        if let Some(container) = self.container.take() {
            self.pool.release(container);
        }
    }
}

impl<T: Send + fmt::Debug + 'static> fmt::Debug for PooledList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledList")
            .field("id", &self.id())
            .field("items", &self.as_slice())
            .finish()
    }
}

impl<T: Send + 'static> IntoIterator for PooledList<T> {
    type Item = T;
    type IntoIter = PooledIter<T>;

    /// Same as [`PooledList::into_pass`] for `for` loops.
    ///
    /// Iterating a released handle is a contract violation: debug builds
    /// panic, release builds count it as a redundant release and yield
    /// nothing.
    fn into_iter(mut self) -> Self::IntoIter {
        debug_assert!(!self.is_released(), "iterating a released list");
        if self.is_released() {
            self.pool.note_redundant_release();
        }
        PooledIter::new(self.container.take(), Arc::clone(&self.pool))
    }
}

impl<'a, T: Send + 'static> IntoIterator for &'a PooledList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Single forward pass over a pooled list, yielding owned elements.
///
/// The list goes back to its pool as soon as the last element has been
/// yielded, or when the iterator is dropped early. A second pass is not
/// possible: the handle was consumed to create this iterator.
pub struct PooledIter<T: Send + 'static> {
    /// Elements stored back to front so `pop` yields fill order.
    container: Option<Container<T>>,
    pool: Arc<TypedPool<T>>,
    position: usize,
}

impl<T: Send + 'static> PooledIter<T> {
    fn new(mut container: Option<Container<T>>, pool: Arc<TypedPool<T>>) -> Self {
        if let Some(container) = container.as_mut() {
            container.items.reverse();
        }
        Self {
            container,
            pool,
            position: 0,
        }
    }

    /// Number of elements yielded so far.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether the pass has ended and the list is back in its pool.
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.container.is_none()
    }

    fn finish(&mut self) {
        if let Some(container) = self.container.take() {
            self.pool.release(container);
        }
    }
}

impl<T: Send + 'static> Iterator for PooledIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.container.as_mut()?.items.pop();
        match item {
            Some(item) => {
                self.position += 1;
                Some(item)
            }
            None => {
                self.finish();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.container.as_ref().map_or(0, Container::len);
        (remaining, Some(remaining))
    }
}

impl<T: Send + 'static> ExactSizeIterator for PooledIter<T> {}

impl<T: Send + 'static> FusedIterator for PooledIter<T> {}

impl<T: Send + 'static> Drop for PooledIter<T> {
    fn drop(&mut self) {
        self.finish();
    }
}
