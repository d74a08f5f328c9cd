#![no_main]

use arckit::policy::arc::ArcCache;
use arckit::traits::{ReadOnlyCache, ValueSource};
use libfuzzer_sys::fuzz_target;

/// Source whose next callback outcomes are dictated by the fuzz input.
struct Scripted {
    fail_fetch: bool,
    fail_evict: bool,
}

impl ValueSource<u8, u16> for Scripted {
    type Error = ();

    fn fetch(&mut self, key: &u8) -> Result<u16, ()> {
        if self.fail_fetch { Err(()) } else { Ok(u16::from(*key) * 3) }
    }

    fn on_evict(&mut self, key: &u8, value: &u16) -> Result<(), ()> {
        assert_eq!(*value, u16::from(*key) * 3);
        if self.fail_evict { Err(()) } else { Ok(()) }
    }
}

// Fuzz get sequences with injected callback failures
//
// First byte picks the capacity; each following byte is a key in the low six
// bits and fetch/evict failure flags in the top two.
fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 16) + 1;
    let mut cache = ArcCache::new(
        capacity,
        Scripted {
            fail_fetch: false,
            fail_evict: false,
        },
    );

    for &byte in ops {
        let key = byte & 0x3f;
        cache.source_mut().fail_fetch = byte & 0x80 != 0;
        cache.source_mut().fail_evict = byte & 0x40 != 0;

        let was_resident = cache.contains(&key);
        let before = cache.snapshot();
        match cache.get(&key) {
            Ok(value) => assert_eq!(*value, u16::from(key) * 3),
            Err(_) => {
                assert!(!was_resident, "hit must not call back");
                assert_eq!(cache.snapshot(), before);
            }
        }

        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {}", err);
        }
        assert!(cache.len() <= capacity);
    }
});
