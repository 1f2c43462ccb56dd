//! # Pool Statistics

use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot of one typed pool's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Lists currently parked in the idle set.
    pub idle: usize,
    /// Lists ever created for this type (misses plus warm-up).
    pub created: usize,
    /// Acquires served from the idle set.
    pub hits: usize,
    /// Acquires that had to create a list.
    pub misses: usize,
    /// Lists returned to the idle set.
    pub returns: usize,
    /// Lists dropped on release because the idle set was full.
    pub discarded: usize,
    /// Explicit releases of a handle that had already released.
    pub redundant_releases: usize,
    /// Idle lists dropped by `trim`.
    pub trimmed: usize,
}

impl PoolStats {
    /// Fraction of acquires served from the idle set (0.0 to 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Lists that are currently checked out.
    #[must_use]
    pub const fn checked_out(&self) -> usize {
        self.created
            .saturating_sub(self.idle)
            .saturating_sub(self.discarded)
            .saturating_sub(self.trimmed)
    }
}

/// Live counters behind [`PoolStats`].
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) created: AtomicUsize,
    pub(crate) hits: AtomicUsize,
    pub(crate) misses: AtomicUsize,
    pub(crate) returns: AtomicUsize,
    pub(crate) discarded: AtomicUsize,
    pub(crate) redundant_releases: AtomicUsize,
    pub(crate) trimmed: AtomicUsize,
}

impl Counters {
    #[inline]
    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, idle: usize) -> PoolStats {
        PoolStats {
            idle,
            created: self.created.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            redundant_releases: self.redundant_releases.load(Ordering::Relaxed),
            trimmed: self.trimmed.load(Ordering::Relaxed),
        }
    }
}
