//! # Scene Objects
//!
//! Objects own their attached behaviours and answer component queries.

use std::fmt;
use std::sync::Arc;

use gleaner_core::ComponentSource;

use crate::behaviour::Behaviour;
use crate::capability::CapabilitySet;
use crate::element::Element;

/// Handle to an object in a [`Scene`](crate::Scene).
///
/// Carries the slot the object lives in and the generation the slot had when
/// it was spawned. Reusing a slot bumps its generation, so handles to the old
/// occupant stop resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    slot: u32,
    generation: u32,
}

impl ObjectId {
    /// Builds a handle for `slot` at `generation`.
    #[inline]
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Slot in the scene's object table.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    /// Generation of the slot at spawn time.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// An engine object with an ordered list of attached behaviours.
///
/// Attachment order is the order queries report matches in.
pub struct SceneObject {
    id: ObjectId,
    name: String,
    alive: bool,
    behaviours: Vec<Arc<dyn Behaviour>>,
}

impl SceneObject {
    /// Creates a live object with nothing attached.
    #[must_use]
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alive: true,
            behaviours: Vec::new(),
        }
    }

    /// This object's ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// This object's name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the object has not been destroyed.
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Attaches a behaviour at the end of the list and returns a handle to it.
    pub fn attach<C: Behaviour>(&mut self, behaviour: C) -> Arc<C> {
        let behaviour = Arc::new(behaviour);
        self.behaviours.push(Arc::clone(&behaviour) as Arc<dyn Behaviour>);
        behaviour
    }

    /// Attaches an already shared behaviour.
    pub fn attach_shared(&mut self, behaviour: Arc<dyn Behaviour>) {
        self.behaviours.push(behaviour);
    }

    /// Detaches every behaviour of type `C`. Returns how many were removed.
    pub fn detach_all<C: Behaviour>(&mut self) -> usize {
        let before = self.behaviours.len();
        self.behaviours
            .retain(|behaviour| !(**behaviour).as_any().is::<C>());
        before - self.behaviours.len()
    }

    /// Number of attached behaviours.
    #[inline]
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.behaviours.len()
    }

    /// Union of every attached behaviour's capabilities.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.behaviours
            .iter()
            .fold(CapabilitySet::EMPTY, |set, behaviour| {
                set.union(behaviour.capabilities())
            })
    }

    /// Destroys the object. Queries against it return nothing from now on.
    pub fn destroy(&mut self) {
        self.alive = false;
        self.behaviours.clear();
    }
}

impl<T: Element> ComponentSource<T> for SceneObject {
    fn fill_components(&self, out: &mut Vec<T>) {
        out.extend(self.behaviours.iter().filter_map(T::select));
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("alive", &self.alive)
            .field("attached", &self.behaviours.len())
            .finish()
    }
}
