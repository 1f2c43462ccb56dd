//! # Typed Pool
//!
//! The idle set for a single element type.

use std::sync::atomic::Ordering;

use parking_lot::Mutex;

use super::container::{Container, ContainerId};
use super::stats::{Counters, PoolStats};
use crate::config::PoolConfig;

/// Idle lists of one element type.
///
/// # Thread Safety
///
/// The idle set sits behind its own mutex, so pools of different element
/// types never contend. The lock is held for a single `pop` or `push`.
pub struct TypedPool<T> {
    idle: Mutex<IdleSet<T>>,
    counters: Counters,
    initial_capacity: usize,
    max_idle: usize,
    shrink_above: usize,
}

struct IdleSet<T> {
    containers: Vec<Container<T>>,
    next_id: u64,
}

impl<T> TypedPool<T> {
    /// Creates an empty pool sized by `config`.
    #[must_use]
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            idle: Mutex::new(IdleSet {
                containers: Vec::new(),
                next_id: 0,
            }),
            counters: Counters::default(),
            initial_capacity: config.initial_capacity,
            max_idle: config.max_idle_per_type,
            shrink_above: config.shrink_above,
        }
    }

    /// Takes an idle container, or creates one if the idle set is empty.
    ///
    /// The returned container is always empty.
    pub(crate) fn acquire(&self) -> Container<T> {
        let mut idle = self.idle.lock();
        if let Some(container) = idle.containers.pop() {
            drop(idle);
            Counters::bump(&self.counters.hits);
            debug_assert!(container.is_empty(), "idle container holds elements");
            return container;
        }

        let id = idle.allocate_id();
        drop(idle);
        Counters::bump(&self.counters.misses);
        Counters::bump(&self.counters.created);
        tracing::trace!(
            "pool miss for {}: creating list {}",
            std::any::type_name::<T>(),
            id.raw()
        );
        Container::with_capacity(id, self.initial_capacity)
    }

    /// Clears a container and parks it in the idle set.
    ///
    /// If the idle set is already at its cap the container is dropped.
    pub(crate) fn release(&self, mut container: Container<T>) {
        container.items.clear();
        if self.shrink_above != 0 && container.capacity() > self.shrink_above {
            container.items.shrink_to(self.initial_capacity);
        }

        let mut idle = self.idle.lock();
        debug_assert!(
            container.id().raw() < idle.next_id,
            "list {} was not issued by this pool",
            container.id().raw()
        );
        debug_assert!(
            !idle.containers.iter().any(|c| c.id() == container.id()),
            "list {} released while already idle",
            container.id().raw()
        );
        if self.max_idle != 0 && idle.containers.len() >= self.max_idle {
            drop(idle);
            Counters::bump(&self.counters.discarded);
            tracing::trace!(
                "idle set for {} full: dropping list {}",
                std::any::type_name::<T>(),
                container.id().raw()
            );
            return;
        }
        idle.containers.push(container);
        drop(idle);
        Counters::bump(&self.counters.returns);
    }

    /// Pre-creates idle containers until at least `count` are idle.
    ///
    /// Never exceeds the idle cap. Returns how many were created.
    pub fn warm_up(&self, count: usize) -> usize {
        let target = if self.max_idle == 0 {
            count
        } else {
            count.min(self.max_idle)
        };

        let mut idle = self.idle.lock();
        let missing = target.saturating_sub(idle.containers.len());
        idle.containers.reserve(missing);
        for _ in 0..missing {
            let id = idle.allocate_id();
            let container = Container::with_capacity(id, self.initial_capacity);
            idle.containers.push(container);
            Counters::bump(&self.counters.created);
        }
        missing
    }

    /// Drops every idle container. Returns how many were dropped.
    pub fn trim(&self) -> usize {
        let mut idle = self.idle.lock();
        let dropped = idle.containers.len();
        idle.containers.clear();
        idle.containers.shrink_to_fit();
        drop(idle);
        self.counters.trimmed.fetch_add(dropped, Ordering::Relaxed);
        dropped
    }

    /// Number of idle containers.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().containers.len()
    }

    /// Whether the container with this identity is currently idle.
    #[must_use]
    pub fn is_idle(&self, id: ContainerId) -> bool {
        self.idle.lock().containers.iter().any(|c| c.id() == id)
    }

    /// Snapshot of this pool's counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(self.idle_count())
    }

    /// Records an explicit release of an already released handle.
    pub(crate) fn note_redundant_release(&self) {
        Counters::bump(&self.counters.redundant_releases);
    }
}

impl<T> IdleSet<T> {
    fn allocate_id(&mut self) -> ContainerId {
        let id = ContainerId::new(self.next_id);
        self.next_id += 1;
        id
    }
}
