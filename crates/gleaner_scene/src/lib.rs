//! # GLEANER Scene
//!
//! Reference scene object model used to drive `gleaner_core` queries.
//!
//! A [`SceneObject`] carries an ordered list of attached [`Behaviour`]s.
//! Queries select from that list in one of two ways:
//!
//! - **By concrete type**: `Arc<C>` matches behaviours whose type is `C`
//! - **By capability**: [`WithCapability<K>`] matches behaviours whose
//!   [`CapabilitySet`] contains everything `K` requires
//!
//! ## Example
//!
//! ```rust,ignore
//! use gleaner_core::{PoolRegistry, PooledComponents};
//! use gleaner_scene::{Scene, WithCapability};
//!
//! let registry = PoolRegistry::default();
//! let mut scene = Scene::new(1024);
//!
//! let player = scene.spawn("player").unwrap();
//! scene.get_mut(player).unwrap().attach(Health { points: 100 });
//!
//! let object = scene.get(player);
//! let health = registry.last_component::<Arc<Health>, _>(object);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod behaviour;
mod capability;
mod element;
mod object;
mod scene;

pub use behaviour::{AsAny, Behaviour};
pub use capability::CapabilitySet;
pub use element::{AnyCapability, Capability, Element, WithCapability};
pub use object::{ObjectId, SceneObject};
pub use scene::Scene;
