//! # Pooled Query Verification Tests
//!
//! End-to-end checks of the list pool against the reference scene:
//!
//! 1. **Release**: idempotent, on drop, on early return, at end of iteration
//! 2. **Checkout**: live handles never share a list, across threads too
//! 3. **Fill**: reused lists hold exactly the new matches, in engine order
//! 4. **Lookups**: last/first/count leave the list idle
//!
//! Run with: cargo test --package gleaner_scene --test pooled_queries

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use gleaner_core::{PoolConfig, PoolRegistry, PooledComponents, QueryError, QueryResult};
use gleaner_scene::{
    Behaviour, Capability, CapabilitySet, ObjectId, Scene, SceneObject, WithCapability,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DAMAGEABLE: u8 = 0;

struct Tag(u32);
impl Behaviour for Tag {}

struct Health {
    points: u32,
}
impl Behaviour for Health {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::of(DAMAGEABLE)
    }
}

struct Shield {
    points: u32,
}
impl Behaviour for Shield {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::of(DAMAGEABLE)
    }
}

enum Damageable {}
impl Capability for Damageable {
    const SET: CapabilitySet = CapabilitySet::of(DAMAGEABLE);
}

fn tagged(tags: &[u32]) -> SceneObject {
    let mut object = SceneObject::new(ObjectId::new(0, 1), "tagged");
    for &tag in tags {
        object.attach(Tag(tag));
    }
    object
}

fn tags_of(list: &gleaner_core::PooledList<Arc<Tag>>) -> Vec<u32> {
    list.iter().map(|tag| tag.0).collect()
}

// ============================================================================
// RELEASE
// ============================================================================

#[test]
fn double_release_leaves_one_idle_list() {
    let registry = PoolRegistry::default();
    let object = tagged(&[1, 2, 3]);

    let mut list = registry.components::<Arc<Tag>, _>(Some(&object));
    list.release();
    list.release();
    drop(list);

    let stats = registry.stats::<Arc<Tag>>();
    assert_eq!(stats.idle, 1);
    assert_eq!(stats.returns, 1);
    assert_eq!(stats.redundant_releases, 1);
}

#[test]
fn full_iteration_releases_without_explicit_call() {
    let registry = PoolRegistry::default();
    let object = tagged(&[4, 5, 6]);

    let mut seen = Vec::new();
    for tag in registry.components::<Arc<Tag>, _>(Some(&object)) {
        assert_eq!(registry.stats::<Arc<Tag>>().idle, 0);
        seen.push(tag.0);
    }

    assert_eq!(seen, vec![4, 5, 6]);
    let stats = registry.stats::<Arc<Tag>>();
    assert_eq!(stats.idle, 1);
    assert_eq!(stats.returns, 1);
}

fn read_past_end(registry: &PoolRegistry, object: &SceneObject) -> QueryResult<u32> {
    let list = registry.components::<Arc<Tag>, _>(Some(object));
    let tag = list.get(list.len())?;
    Ok(tag.0)
}

#[test]
fn error_exit_still_releases() {
    let registry = PoolRegistry::default();
    let object = tagged(&[1, 2]);

    let err = read_past_end(&registry, &object).unwrap_err();
    assert_eq!(err, QueryError::IndexOutOfRange { index: 2, len: 2 });
    assert_eq!(registry.stats::<Arc<Tag>>().idle, 1);
}

// ============================================================================
// CHECKOUT
// ============================================================================

#[test]
fn live_handles_never_share_a_list() {
    let registry = PoolRegistry::default();
    let object = tagged(&[1]);

    let a = registry.components::<Arc<Tag>, _>(Some(&object));
    let b = registry.components::<Arc<Tag>, _>(Some(&object));
    assert_ne!(a.id(), b.id());

    drop(a);
    let c = registry.components::<Arc<Tag>, _>(Some(&object));
    assert_ne!(b.id(), c.id());
    assert_eq!(registry.stats::<Arc<Tag>>().created, 2);
}

#[test]
fn concurrent_checkouts_are_exclusive() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 500;

    let registry = PoolRegistry::default();
    let object = tagged(&[1, 2, 3]);
    let checked_out = Mutex::new(HashSet::new());

    std::thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..ROUNDS {
                    let list = registry.components::<Arc<Tag>, _>(Some(&object));
                    let id = list.id().unwrap();
                    assert!(checked_out.lock().unwrap().insert(id), "list handed out twice");
                    assert_eq!(tags_of(&list), vec![1, 2, 3]);
                    assert!(checked_out.lock().unwrap().remove(&id));
                    drop(list);
                }
            });
        }
    });

    let stats = registry.stats::<Arc<Tag>>();
    assert!(stats.created <= THREADS);
    assert_eq!(stats.idle, stats.created);
    assert_eq!(stats.hits + stats.misses, THREADS * ROUNDS);
}

// ============================================================================
// FILL
// ============================================================================

#[test]
fn reused_list_holds_only_new_matches() {
    let registry = PoolRegistry::default();
    let big = tagged(&[10, 11, 12, 13, 14]);
    let small = tagged(&[20, 21]);

    let first = registry.components::<Arc<Tag>, _>(Some(&big));
    let first_id = first.id();
    drop(first);

    let second = registry.components::<Arc<Tag>, _>(Some(&small));
    assert_eq!(second.id(), first_id);
    assert_eq!(tags_of(&second), vec![20, 21]);
}

#[test]
fn randomized_refills_never_leak_stale_entries() {
    let registry = PoolRegistry::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0x00C0_FFEE);

    for _ in 0..200 {
        let count = rng.gen_range(0..24);
        let tags: Vec<u32> = (0..count).map(|_| rng.gen()).collect();
        let object = tagged(&tags);

        let list = registry.components::<Arc<Tag>, _>(Some(&object));
        assert_eq!(tags_of(&list), tags);
    }

    assert_eq!(registry.stats::<Arc<Tag>>().created, 1);
}

#[test]
fn capability_query_matches_by_mask() {
    let registry = PoolRegistry::default();
    let mut object = SceneObject::new(ObjectId::new(0, 1), "knight");
    object.attach(Health { points: 80 });
    object.attach(Tag(7));
    object.attach(Shield { points: 30 });

    let list = registry.components::<WithCapability<Damageable>, _>(Some(&object));
    assert_eq!(list.len(), 2);

    let health = list.get(0).unwrap().downcast_ref::<Health>().unwrap();
    let shield = list.get(1).unwrap().downcast_ref::<Shield>().unwrap();
    assert_eq!(health.points + shield.points, 110);
}

// ============================================================================
// LOOKUPS
// ============================================================================

#[test]
fn last_component_returns_final_match() {
    let registry = PoolRegistry::default();
    let object = tagged(&[1, 2, 3]);

    let last = registry.last_component::<Arc<Tag>, _>(Some(&object));
    assert_eq!(last.map(|tag| tag.0), Some(3));
    assert_eq!(registry.stats::<Arc<Tag>>().idle, 1);

    let empty = tagged(&[]);
    assert!(registry.last_component::<Arc<Tag>, _>(Some(&empty)).is_none());

    let stats = registry.stats::<Arc<Tag>>();
    assert_eq!(stats.idle, 1);
    assert_eq!(stats.created, 1);
}

#[test]
fn first_and_count() {
    let registry = PoolRegistry::default();
    let object = tagged(&[9, 8, 7]);

    let first = registry.first_component::<Arc<Tag>, _>(Some(&object));
    assert_eq!(first.map(|tag| tag.0), Some(9));
    assert_eq!(registry.count_components::<Arc<Tag>, _>(Some(&object)), 3);
    assert_eq!(registry.stats::<Arc<Tag>>().idle, 1);
}

#[test]
fn despawned_object_is_an_absent_source() {
    let registry = PoolRegistry::default();
    let mut scene = Scene::new(4);
    let id = scene.spawn("ghost").unwrap();
    if let Some(object) = scene.get_mut(id) {
        object.attach(Tag(1));
    }
    assert_eq!(registry.count_components::<Arc<Tag>, _>(scene.get(id)), 1);

    scene.despawn(id);
    let list = registry.components::<Arc<Tag>, _>(scene.get(id));
    assert!(list.is_empty());
    assert_eq!(
        registry.last_component::<Arc<Tag>, _>(scene.get(id)).map(|tag| tag.0),
        None
    );
}

#[test]
fn destroyed_object_yields_nothing() {
    let registry = PoolRegistry::default();
    let mut object = tagged(&[1, 2]);
    object.destroy();

    assert_eq!(registry.count_components::<Arc<Tag>, _>(Some(&object)), 0);
}

#[test]
fn extension_methods_on_scene_objects() {
    let registry = PoolRegistry::default();
    let object = tagged(&[3, 4]);

    let list = object.pooled_components::<Arc<Tag>>(&registry);
    assert_eq!(tags_of(&list), vec![3, 4]);
    drop(list);

    let last = object.last_pooled_component::<Arc<Tag>>(&registry);
    assert_eq!(last.map(|tag| tag.0), Some(4));
}

#[test]
fn config_from_toml_caps_idle_lists() {
    let config = PoolConfig::from_toml_str("max_idle_per_type = 1").unwrap();
    let registry = PoolRegistry::new(config);
    let object = tagged(&[1]);

    let a = registry.components::<Arc<Tag>, _>(Some(&object));
    let b = registry.components::<Arc<Tag>, _>(Some(&object));
    drop(a);
    drop(b);

    let stats = registry.stats::<Arc<Tag>>();
    assert_eq!(stats.idle, 1);
    assert_eq!(stats.discarded, 1);
}
