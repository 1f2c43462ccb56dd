//! # Pool Registry
//!
//! Maps element types to their typed pools.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::stats::PoolStats;
use super::typed::TypedPool;
use crate::config::PoolConfig;
use crate::list::PooledList;

type ErasedPool = Arc<dyn Any + Send + Sync>;

/// A type-erased pool plus the operations the registry runs on every pool.
struct PoolEntry {
    pool: ErasedPool,
    trim: fn(&(dyn Any + Send + Sync)) -> usize,
}

impl PoolEntry {
    fn new<T: Send + 'static>(pool: TypedPool<T>) -> Self {
        Self {
            pool: Arc::new(pool),
            trim: trim_typed::<T>,
        }
    }
}

fn trim_typed<T: Send + 'static>(pool: &(dyn Any + Send + Sync)) -> usize {
    pool.downcast_ref::<TypedPool<T>>().map_or(0, TypedPool::trim)
}

/// Registry of list pools, one per element type.
///
/// The registry is an ordinary value: the application creates one at startup,
/// passes it by reference to whatever issues queries, and drops it at
/// shutdown. Nothing is global, so tests get isolated pools for free.
///
/// Pools are created lazily the first time an element type is requested and
/// live until the registry is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let registry = PoolRegistry::new(PoolConfig::default());
///
/// let mut list = registry.acquire::<u32>();
/// // ... fill and read ...
/// list.release();
/// ```
pub struct PoolRegistry {
    config: PoolConfig,
    pools: RwLock<HashMap<TypeId, PoolEntry>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// The configuration every pool in this registry is sized by.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the pool for `T`, creating it on first use.
    #[must_use]
    pub fn pool<T: Send + 'static>(&self) -> Arc<TypedPool<T>> {
        let key = TypeId::of::<T>();
        if let Some(entry) = self.pools.read().get(&key) {
            return Self::downcast(&entry.pool);
        }

        let mut pools = self.pools.write();
        let entry = pools.entry(key).or_insert_with(|| {
            tracing::debug!("creating list pool for {}", std::any::type_name::<T>());
            PoolEntry::new(TypedPool::<T>::new(&self.config))
        });
        Self::downcast(&entry.pool)
    }

    /// Checks out an empty list of `T`.
    #[must_use]
    pub fn acquire<T: Send + 'static>(&self) -> PooledList<T> {
        let pool = self.pool::<T>();
        let container = pool.acquire();
        PooledList::new(container, pool)
    }

    /// Pre-creates idle lists of `T` so the next `count` acquires are hits.
    ///
    /// Returns how many lists were created.
    pub fn warm_up<T: Send + 'static>(&self, count: usize) -> usize {
        let created = self.pool::<T>().warm_up(count);
        tracing::debug!(
            "warmed {} list pool with {} new lists",
            std::any::type_name::<T>(),
            created
        );
        created
    }

    /// Counters for `T`'s pool, or zeroes if `T` was never requested.
    #[must_use]
    pub fn stats<T: Send + 'static>(&self) -> PoolStats {
        self.pools
            .read()
            .get(&TypeId::of::<T>())
            .map(|entry| Self::downcast::<T>(&entry.pool).stats())
            .unwrap_or_default()
    }

    /// Number of element types that have a pool.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.read().len()
    }

    /// Drops every idle list of every type. Returns how many were dropped.
    ///
    /// Checked-out lists are unaffected and return to their pool as usual.
    pub fn trim(&self) -> usize {
        let pools = self.pools.read();
        let dropped: usize = pools
            .values()
            .map(|entry| (entry.trim)(entry.pool.as_ref()))
            .sum();
        tracing::debug!("trimmed {} idle lists across {} pools", dropped, pools.len());
        dropped
    }

    fn downcast<T: Send + 'static>(pool: &ErasedPool) -> Arc<TypedPool<T>> {
        match Arc::clone(pool).downcast::<TypedPool<T>>() {
            Ok(pool) => pool,
            Err(_) => unreachable!("pool map is keyed by element TypeId"),
        }
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl std::fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("config", &self.config)
            .field("pools", &self.pool_count())
            .finish()
    }
}
