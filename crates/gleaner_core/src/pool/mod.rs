//! # List Pools
//!
//! Reusable result lists, one pool per element type.
//!
//! ## Design Philosophy
//!
//! A list is allocated the first time no idle list of its type is available.
//! After that it cycles between two states:
//! - **checked out**: owned by exactly one handle
//! - **idle**: empty, parked in its pool's idle set
//!
//! Ownership makes the two states exclusive. An idle list cannot be handed
//! out twice because `acquire` moves it out of the idle set.

mod container;
mod registry;
mod stats;
mod typed;

pub use container::{Container, ContainerId};
pub use registry::PoolRegistry;
pub use stats::PoolStats;
pub use typed::TypedPool;
