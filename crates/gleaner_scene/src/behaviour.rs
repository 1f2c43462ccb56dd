//! # Behaviours
//!
//! The units attached to a scene object.

use std::any::Any;
use std::sync::Arc;

use crate::capability::CapabilitySet;

/// Upcasting helpers so attached behaviours can be downcast to their type.
pub trait AsAny: Any + Send + Sync {
    /// Borrow as `Any`.
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle into an `Any` handle.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A behaviour or data unit attached to a [`SceneObject`](crate::SceneObject).
///
/// # Example
///
/// ```rust,ignore
/// struct Health { points: u32 }
///
/// impl Behaviour for Health {
///     fn capabilities(&self) -> CapabilitySet {
///         CapabilitySet::of(DAMAGEABLE)
///     }
/// }
/// ```
pub trait Behaviour: AsAny {
    /// Capabilities this behaviour provides. Defaults to none.
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::EMPTY
    }
}

/// Downcasts a shared behaviour to its concrete type.
///
/// Calls through `**behaviour` so the vtable of the attached value is used,
/// not the blanket impl on `Arc` itself.
pub(crate) fn downcast_arc<C: Behaviour>(behaviour: &Arc<dyn Behaviour>) -> Option<Arc<C>> {
    if !(**behaviour).as_any().is::<C>() {
        return None;
    }
    Arc::clone(behaviour).into_any_arc().downcast::<C>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;
    impl Behaviour for Marker {}

    struct Other;
    impl Behaviour for Other {}

    #[test]
    fn test_downcast_matches_concrete_type() {
        let attached: Arc<dyn Behaviour> = Arc::new(Marker);
        assert!(downcast_arc::<Marker>(&attached).is_some());
        assert!(downcast_arc::<Other>(&attached).is_none());

        let other: Arc<dyn Behaviour> = Arc::new(Other);
        assert!(downcast_arc::<Marker>(&other).is_none());
    }

    #[test]
    fn test_default_capabilities_empty() {
        assert!(Marker.capabilities().is_empty());
    }
}
