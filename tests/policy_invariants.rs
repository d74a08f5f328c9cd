// ==============================================
// ARC BEHAVIORAL INVARIANT TESTS (integration)
// ==============================================
//
// Library-level properties exercised through the public API only: the
// builder, closure sources and shared state captured by callbacks.

use std::sync::{Arc, Mutex};

use arckit::builder::ArcCacheBuilder;
use arckit::error::GetError;
use arckit::policy::arc::ArcCache;
use arckit::source::FnSource;
use arckit::traits::ReadOnlyCache;
use proptest::prelude::*;

// ==============================================
// Capacity
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn capacity_zero_is_rejected() {
        let err = ArcCache::<u8, u8, _>::try_new(0, FnSource::new(|k: &u8| Ok::<_, ()>(*k)))
            .unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn resident_count_never_exceeds_capacity() {
        let mut cache = ArcCacheBuilder::<u32, u32, ()>::new(8).fetch(|k| Ok(*k)).build();
        for key in (0..200).map(|i| (i * 7) % 31) {
            cache.get(&key).unwrap();
            assert!(cache.len() <= 8);
            assert!(cache.directory_len() <= 16);
        }
    }
}

// ==============================================
// Callback Contract
// ==============================================

mod callbacks {
    use super::*;

    #[test]
    fn every_evicted_value_was_fetched_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let fetch_log = Arc::clone(&log);
        let evict_log = Arc::clone(&log);

        let mut cache = ArcCacheBuilder::<u32, String, ()>::new(3)
            .fetch(move |k| {
                fetch_log.lock().unwrap().push(format!("fetch {k}"));
                Ok(format!("v{k}"))
            })
            .on_evict(move |k, v| {
                assert_eq!(v, &format!("v{k}"));
                evict_log.lock().unwrap().push(format!("evict {k}"));
                Ok(())
            })
            .build();

        for key in [1, 2, 3, 1, 4, 5, 2, 6, 1] {
            cache.get(&key).unwrap();
        }

        let log = log.lock().unwrap();
        for (i, entry) in log.iter().enumerate() {
            if let Some(key) = entry.strip_prefix("evict ") {
                let fetched = format!("fetch {key}");
                assert!(
                    log[..i].contains(&fetched),
                    "evicted {key} before fetching it"
                );
            }
        }
    }

    #[test]
    fn callback_error_payload_is_returned_unchanged() {
        #[derive(Debug, PartialEq)]
        struct Backend(&'static str);

        let mut cache = ArcCacheBuilder::<u32, u32, Backend>::new(1)
            .fetch(|k| if *k == 13 { Err(Backend("unlucky")) } else { Ok(*k) })
            .on_evict(|k, _| if *k == 1 { Err(Backend("pinned")) } else { Ok(()) })
            .build();

        assert_eq!(cache.get(&13), Err(GetError::Fetch(Backend("unlucky"))));
        assert_eq!(cache.get(&1), Ok(&1));
        assert_eq!(cache.get(&2), Err(GetError::Evict(Backend("pinned"))));
        assert_eq!(cache.peek(&1), Some(&1));
    }

    #[test]
    fn cache_with_send_source_is_send() {
        fn assert_send<T: Send>(_: &T) {}
        let cache = ArcCacheBuilder::<u64, Vec<u8>, ()>::new(4)
            .fetch(|k| Ok(k.to_le_bytes().to_vec()))
            .build();
        assert_send(&cache);
    }

    #[test]
    fn mutex_wrapped_cache_serves_threads() {
        let cache = Arc::new(Mutex::new(
            ArcCacheBuilder::<u32, u32, ()>::new(16).fetch(|k| Ok(k * 3)).build(),
        ));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..250u32 {
                        let key = (i + t) % 40;
                        let mut guard = cache.lock().unwrap();
                        assert_eq!(guard.get(&key), Ok(&(key * 3)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let cache = cache.lock().unwrap();
        assert_eq!(cache.check_invariants(), Ok(()));
        assert!(cache.len() <= 16);
    }
}

// ==============================================
// Property Tests
// ==============================================

proptest! {
    /// `p` stays within `0..=capacity` and only ghost hits move it.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn p_moves_only_on_ghost_hits(
        capacity in 1usize..10,
        keys in prop::collection::vec(0u32..30, 1..400)
    ) {
        let mut cache = ArcCacheBuilder::<u32, u32, ()>::new(capacity).fetch(|k| Ok(*k)).build();
        for key in keys {
            let was_ghost = cache.is_ghost(&key);
            let p_before = cache.p_value();
            cache.get(&key).unwrap();
            prop_assert!(cache.p_value() <= capacity);
            if !was_ghost {
                prop_assert_eq!(cache.p_value(), p_before);
            }
        }
    }

    /// A successful get always leaves the key resident and never a ghost.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn requested_key_is_resident_after_get(
        capacity in 1usize..10,
        keys in prop::collection::vec(0u32..30, 1..400)
    ) {
        let mut cache = ArcCacheBuilder::<u32, u32, ()>::new(capacity).fetch(|k| Ok(*k)).build();
        for key in keys {
            cache.get(&key).unwrap();
            prop_assert!(cache.contains(&key));
            prop_assert!(!cache.is_ghost(&key));
            prop_assert!(cache.check_invariants().is_ok());
        }
    }
}
