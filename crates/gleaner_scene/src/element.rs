//! # Query Elements
//!
//! What a query returns for each matching behaviour.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::behaviour::{downcast_arc, Behaviour};
use crate::capability::CapabilitySet;

/// A type that can be selected from an attached behaviour.
///
/// `select` returns `None` for behaviours that do not match.
pub trait Element: Sized + Send + 'static {
    /// Builds the element for `behaviour` if it matches.
    fn select(behaviour: &Arc<dyn Behaviour>) -> Option<Self>;
}

/// Concrete-type match.
impl<C: Behaviour> Element for Arc<C> {
    #[inline]
    fn select(behaviour: &Arc<dyn Behaviour>) -> Option<Self> {
        downcast_arc::<C>(behaviour)
    }
}

/// A named requirement on a behaviour's capabilities.
///
/// # Example
///
/// ```rust,ignore
/// enum Damageable {}
///
/// impl Capability for Damageable {
///     const SET: CapabilitySet = CapabilitySet::of(0);
/// }
///
/// let targets = registry.components::<WithCapability<Damageable>, _>(object);
/// ```
pub trait Capability: 'static {
    /// Capabilities a behaviour must provide to match.
    const SET: CapabilitySet;
}

/// Requires nothing, so every attached behaviour matches.
#[derive(Clone, Copy, Debug)]
pub struct AnyCapability;

impl Capability for AnyCapability {
    const SET: CapabilitySet = CapabilitySet::EMPTY;
}

/// Capability match: any behaviour whose capabilities satisfy `K::SET`.
pub struct WithCapability<K> {
    behaviour: Arc<dyn Behaviour>,
    _requirement: PhantomData<fn() -> K>,
}

impl<K> WithCapability<K> {
    /// The matched behaviour.
    #[inline]
    #[must_use]
    pub const fn behaviour(&self) -> &Arc<dyn Behaviour> {
        &self.behaviour
    }

    /// The matched behaviour's full capability set.
    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.behaviour.capabilities()
    }

    /// Borrows the matched behaviour as `C`, if that is its type.
    #[must_use]
    pub fn downcast_ref<C: Behaviour>(&self) -> Option<&C> {
        (*self.behaviour).as_any().downcast_ref::<C>()
    }

    /// Unwraps the matched behaviour.
    #[must_use]
    pub fn into_inner(self) -> Arc<dyn Behaviour> {
        self.behaviour
    }
}

impl<K: Capability> Element for WithCapability<K> {
    #[inline]
    fn select(behaviour: &Arc<dyn Behaviour>) -> Option<Self> {
        behaviour.capabilities().satisfies(K::SET).then(|| Self {
            behaviour: Arc::clone(behaviour),
            _requirement: PhantomData,
        })
    }
}

impl<K> Clone for WithCapability<K> {
    fn clone(&self) -> Self {
        Self {
            behaviour: Arc::clone(&self.behaviour),
            _requirement: PhantomData,
        }
    }
}

impl<K> fmt::Debug for WithCapability<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithCapability")
            .field("requirement", &std::any::type_name::<K>())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
