#![cfg(feature = "metrics")]

use arckit::metrics::exporter::PrometheusTextExporter;
use arckit::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
use arckit::policy::arc::ArcCache;
use arckit::traits::ValueSource;

struct Tens {
    fail_evict: bool,
}

impl ValueSource<u32, u32> for Tens {
    type Error = ();

    fn fetch(&mut self, key: &u32) -> Result<u32, ()> {
        Ok(key * 10)
    }

    fn on_evict(&mut self, _key: &u32, _value: &u32) -> Result<(), ()> {
        if self.fail_evict { Err(()) } else { Ok(()) }
    }
}

#[test]
fn counters_follow_ghost_hit_sequence() {
    let mut cache = ArcCache::new(2, Tens { fail_evict: false });
    for key in [1, 1, 2, 3, 2] {
        cache.get(&key).unwrap();
    }

    let snap = cache.metrics_snapshot();
    assert_eq!(snap.get_calls, 5);
    assert_eq!(snap.get_hits, 1);
    assert_eq!(snap.get_misses, 4);
    assert_eq!(snap.fetch_calls, 4);
    assert_eq!(snap.evict_calls, 2);
    assert_eq!(snap.evicted_entries, 2);
    assert_eq!(snap.t1_evictions, 1);
    assert_eq!(snap.t2_evictions, 1);
    assert_eq!(snap.t1_to_t2_promotions, 1);
    assert_eq!(snap.b1_ghost_hits, 1);
    assert_eq!(snap.p_increases, 1);
    assert_eq!(snap.cache_len, 2);
    assert_eq!(snap.ghost_len, 1);
    assert_eq!(snap.capacity, 2);
    assert_eq!(snap.p, 1);
    assert_eq!(MetricsSnapshotProvider::snapshot(&cache), snap);
}

#[test]
fn failed_replacement_counts_rollback() {
    let mut cache = ArcCache::new(2, Tens { fail_evict: false });
    for key in [1, 1, 2, 2, 3, 3, 4] {
        cache.get(&key).unwrap();
    }
    cache.reset_metrics();

    cache.source_mut().fail_evict = true;
    assert!(cache.get(&5).is_err());

    let snap = cache.metrics_snapshot();
    assert_eq!(snap.evict_calls, 1);
    assert_eq!(snap.evict_failures, 1);
    assert_eq!(snap.evicted_entries, 0);
    assert_eq!(snap.rollbacks, 1);
    assert_eq!(snap.ghost_trims, 0);
}

#[test]
fn exporter_renders_cache_snapshot() {
    let mut cache = ArcCache::new(4, Tens { fail_evict: false });
    cache.get(&1).unwrap();
    cache.get(&1).unwrap();

    let exporter = PrometheusTextExporter::new("arckit", Vec::new());
    exporter.export(&cache.metrics_snapshot());
    let text = String::from_utf8(exporter.into_inner()).unwrap();

    assert!(text.contains("arckit_get_calls_total 2\n"));
    assert!(text.contains("arckit_t1_to_t2_promotions_total 1\n"));
    assert!(text.contains("arckit_capacity 4\n"));
}
