//! # Scene
//!
//! Fixed-capacity arena of scene objects.
//! Slots and the free list are allocated once at creation.

use crate::object::{ObjectId, SceneObject};

/// Container for every object in a scene.
///
/// Lookups return `Option<&SceneObject>` so they can be passed straight to a
/// query: a despawned or stale ID becomes an absent source.
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = Scene::new(1024);
/// let id = scene.spawn("crate").expect("scene has room");
/// scene.despawn(id);
/// assert!(scene.get(id).is_none());
/// ```
pub struct Scene {
    slots: Box<[Slot]>,
    free_indices: Vec<u32>,
    alive_count: usize,
}

struct Slot {
    generation: u32,
    object: Option<SceneObject>,
}

impl Scene {
    /// Creates a scene that can hold `capacity` objects at once.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );

        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                object: None,
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            slots,
            free_indices: (0..capacity as u32).rev().collect(),
            alive_count: 0,
        }
    }

    /// Maximum number of live objects.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live objects.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Spawns an empty object.
    ///
    /// Returns `None` if the scene is full.
    pub fn spawn(&mut self, name: impl Into<String>) -> Option<ObjectId> {
        let Some(slot_index) = self.free_indices.pop() else {
            tracing::warn!("scene full: cannot spawn beyond {} objects", self.capacity());
            return None;
        };

        let slot = &mut self.slots[slot_index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        let id = ObjectId::new(slot_index, slot.generation);
        slot.object = Some(SceneObject::new(id, name));
        self.alive_count += 1;
        Some(id)
    }

    /// Looks up a live object. Stale IDs resolve to `None`.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.slots
            .get(id.slot() as usize)
            .filter(|slot| slot.generation == id.generation())?
            .object
            .as_ref()
    }

    /// Mutable lookup of a live object.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.slots
            .get_mut(id.slot() as usize)
            .filter(|slot| slot.generation == id.generation())?
            .object
            .as_mut()
    }

    /// Destroys and removes an object, freeing its slot.
    ///
    /// Returns `false` if the ID is stale or was already despawned.
    pub fn despawn(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.get_mut(id) else {
            return false;
        };
        object.destroy();

        let slot_index = id.slot();
        self.slots[slot_index as usize].object = None;
        self.free_indices.push(slot_index);
        self.alive_count -= 1;
        tracing::trace!(
            "despawned object in slot {} (generation {})",
            slot_index,
            id.generation()
        );
        true
    }

    /// Iterates over live objects.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.slots.iter().filter_map(|slot| slot.object.as_ref())
    }
}
