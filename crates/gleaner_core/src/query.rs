//! # Component Queries
//!
//! The operations callers actually use: fill a pooled list with the
//! components of one type attached to a source object.
//!
//! Matching is the engine's business. This module only knows the
//! [`ComponentSource`] contract: overwrite the list with the current matches.

use crate::list::PooledList;
use crate::pool::PoolRegistry;

/// Engine-side capability to enumerate attached components of type `T`.
///
/// Implemented by whatever the host engine uses as a scene object. The
/// implementation decides what "of type `T`" means (exact type, capability
/// match, ...).
pub trait ComponentSource<T> {
    /// Appends every currently attached element matching `T`, in engine order.
    ///
    /// `out` is always empty when this is called.
    fn fill_components(&self, out: &mut Vec<T>);

    /// Whether the source still exists. A dead source yields no components.
    fn is_alive(&self) -> bool {
        true
    }
}

impl PoolRegistry {
    /// Returns a pooled list of every `T` attached to `source`.
    ///
    /// An absent or dead source yields an empty list. The caller owns the list
    /// until it is released, dropped or fully iterated.
    #[must_use]
    pub fn components<T, S>(&self, source: Option<&S>) -> PooledList<T>
    where
        T: Send + 'static,
        S: ComponentSource<T> + ?Sized,
    {
        let mut list = self.acquire::<T>();
        if let Some(source) = source.filter(|source| source.is_alive()) {
            list.refill(|out| source.fill_components(out));
        }
        list
    }

    /// Returns the last `T` attached to `source`, or `None`.
    ///
    /// The list used for the query is back in its pool before this returns.
    #[must_use]
    pub fn last_component<T, S>(&self, source: Option<&S>) -> Option<T>
    where
        T: Send + 'static,
        S: ComponentSource<T> + ?Sized,
    {
        self.components(source).take_last()
    }

    /// Returns the first `T` attached to `source`, or `None`.
    ///
    /// The list used for the query is back in its pool before this returns.
    #[must_use]
    pub fn first_component<T, S>(&self, source: Option<&S>) -> Option<T>
    where
        T: Send + 'static,
        S: ComponentSource<T> + ?Sized,
    {
        self.components(source).take_first()
    }

    /// Counts the `T`s attached to `source` without keeping them.
    #[must_use]
    pub fn count_components<T, S>(&self, source: Option<&S>) -> usize
    where
        T: Send + 'static,
        S: ComponentSource<T> + ?Sized,
    {
        self.components::<T, S>(source).len()
    }
}

/// Method-call sugar on any source: `object.pooled_components::<T>(&registry)`.
pub trait PooledComponents {
    /// See [`PoolRegistry::components`].
    #[must_use]
    fn pooled_components<T>(&self, registry: &PoolRegistry) -> PooledList<T>
    where
        T: Send + 'static,
        Self: ComponentSource<T>,
    {
        registry.components(Some(self))
    }

    /// See [`PoolRegistry::last_component`].
    #[must_use]
    fn last_pooled_component<T>(&self, registry: &PoolRegistry) -> Option<T>
    where
        T: Send + 'static,
        Self: ComponentSource<T>,
    {
        registry.last_component(Some(self))
    }
}

impl<S: ?Sized> PooledComponents for S {}

#[cfg(test)]
mod tests {
    use super::*;

    /// A source that appends its values; the registry must clear first.
    struct Fixture {
        values: Vec<u32>,
        alive: bool,
    }

    impl Fixture {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                alive: true,
            }
        }
    }

    impl ComponentSource<u32> for Fixture {
        fn fill_components(&self, out: &mut Vec<u32>) {
            out.extend_from_slice(&self.values);
        }

        fn is_alive(&self) -> bool {
            self.alive
        }
    }

    #[test]
    fn test_components_in_source_order() {
        let registry = PoolRegistry::default();
        let source = Fixture::new(&[3, 1, 2]);

        let list = registry.components::<u32, _>(Some(&source));
        assert_eq!(list.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_absent_source_is_empty() {
        let registry = PoolRegistry::default();
        let list = registry.components::<u32, Fixture>(None);
        assert!(list.is_empty());
        assert!(!list.is_released());
    }

    #[test]
    fn test_dead_source_is_empty() {
        let registry = PoolRegistry::default();
        let mut source = Fixture::new(&[1, 2]);
        source.alive = false;

        assert_eq!(registry.count_components::<u32, _>(Some(&source)), 0);
        assert_eq!(registry.last_component::<u32, _>(Some(&source)), None);
    }

    #[test]
    fn test_last_and_first() {
        let registry = PoolRegistry::default();
        let source = Fixture::new(&[5, 6, 7]);

        assert_eq!(registry.last_component::<u32, _>(Some(&source)), Some(7));
        assert_eq!(registry.first_component::<u32, _>(Some(&source)), Some(5));

        let stats = registry.stats::<u32>();
        assert_eq!(stats.idle, 1);
        assert_eq!(stats.created, 1);
    }

    #[test]
    fn test_extension_methods() {
        let registry = PoolRegistry::default();
        let source = Fixture::new(&[8, 9]);

        let list: PooledList<u32> = source.pooled_components(&registry);
        assert_eq!(list.len(), 2);
        drop(list);

        assert_eq!(source.last_pooled_component::<u32>(&registry), Some(9));
    }
}
