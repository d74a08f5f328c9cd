// ==============================================
// ARC ACCESS-TRACE REGRESSION (integration)
// ==============================================
//
// A fixed access sequence whose final list contents and adaptation target
// are known exactly. Any change to the replacement rules shows up here.

use arckit::policy::arc::ArcCache;
use arckit::source::FnSource;
use arckit::traits::ReadOnlyCache;

fn identity_cache(capacity: usize) -> ArcCache<u32, u32, FnSource<u32, u32, ()>> {
    ArcCache::new(capacity, FnSource::new(|key: &u32| Ok(*key)))
}

fn trace() -> Vec<u32> {
    let mut keys: Vec<u32> = (0..20).collect();
    keys.extend([11, 12, 13, 14]);
    keys.extend(0..20);
    keys.extend(11..40);
    keys.extend([39, 38, 37, 36, 35, 34, 33, 32, 16, 17, 11, 41]);
    keys
}

#[test]
fn trace_final_state_is_exact() {
    let keys = trace();
    assert_eq!(keys.len(), 85);

    let mut cache = identity_cache(10);
    for key in keys {
        assert_eq!(cache.get(&key), Ok(&key));
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated after key {}: {}", key, err);
        }
    }

    let snap = cache.snapshot();
    assert_eq!(snap.t1, vec![41]);
    assert_eq!(snap.t2, vec![11, 17, 16, 32, 33, 34, 35, 36, 37]);
    assert_eq!(snap.b1, vec![31, 30]);
    assert_eq!(snap.b2, vec![38, 39, 19, 18, 15, 14, 13, 12]);
    assert_eq!(snap.p, 5);
    assert_eq!(cache.len(), 10);
}

#[test]
fn trace_is_deterministic() {
    let run = || {
        let mut cache = identity_cache(10);
        for key in trace() {
            cache.get(&key).unwrap();
        }
        cache.debug_dump()
    };
    assert_eq!(run(), run());
}
