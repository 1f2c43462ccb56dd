//! # GLEANER Core
//!
//! Allocation-free retrieval of the components attached to a scene object.
//!
//! Every query needs a list to put its results in. Instead of allocating a
//! fresh `Vec` per call, lists are checked out of a per-type pool, filled by
//! the engine, read by the caller and handed back when the caller is done.
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations after warm-up** - a list is created once per
//!    concurrent use and reused for the lifetime of the registry
//! 2. **Release on every exit path** - handles return their list on drop,
//!    on explicit release, and at the end of a full iteration
//! 3. **The engine is opaque** - matching is delegated to [`ComponentSource`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use gleaner_core::{PoolConfig, PoolRegistry};
//!
//! let registry = PoolRegistry::new(PoolConfig::default());
//!
//! for health in registry.components::<Arc<Health>, _>(Some(&player)) {
//!     // list is returned to the pool when the loop ends
//! }
//!
//! let weapon = registry.last_component::<Arc<Weapon>, _>(Some(&player));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod list;
pub mod pool;
pub mod query;

pub use config::PoolConfig;
pub use error::{ConfigError, ConfigResult, QueryError, QueryResult};
pub use list::{PooledIter, PooledList};
pub use pool::{Container, ContainerId, PoolRegistry, PoolStats, TypedPool};
pub use query::{ComponentSource, PooledComponents};
