use crate::metrics::snapshot::ArcMetricsSnapshot;
use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder};

// ---------------------------------------------------------------------------
// ArcMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct ArcMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub fetch_calls: u64,
    pub fetch_failures: u64,
    pub evict_calls: u64,
    pub evict_failures: u64,
    pub evicted_entries: u64,
    pub rollbacks: u64,
    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,
    pub ghost_trims: u64,
}

impl ArcMetrics {
    /// Copies the counters; gauges are left at zero for the cache to fill.
    pub fn snapshot(&self) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            fetch_calls: self.fetch_calls,
            fetch_failures: self.fetch_failures,
            evict_calls: self.evict_calls,
            evict_failures: self.evict_failures,
            evicted_entries: self.evicted_entries,
            rollbacks: self.rollbacks,
            t1_to_t2_promotions: self.t1_to_t2_promotions,
            b1_ghost_hits: self.b1_ghost_hits,
            b2_ghost_hits: self.b2_ghost_hits,
            p_increases: self.p_increases,
            p_decreases: self.p_decreases,
            t1_evictions: self.t1_evictions,
            t2_evictions: self.t2_evictions,
            ghost_trims: self.ghost_trims,
            ..ArcMetricsSnapshot::default()
        }
    }
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_fetch_call(&mut self) {
        self.fetch_calls += 1;
    }
    fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evict_failure(&mut self) {
        self.evict_failures += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_rollback(&mut self) {
        self.rollbacks += 1;
    }
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_t1_to_t2_promotion(&mut self) {
        self.t1_to_t2_promotions += 1;
    }
    fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }
    fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }
    fn record_p_increase(&mut self) {
        self.p_increases += 1;
    }
    fn record_p_decrease(&mut self) {
        self.p_decreases += 1;
    }
    fn record_t1_eviction(&mut self) {
        self.t1_evictions += 1;
    }
    fn record_t2_eviction(&mut self) {
        self.t2_evictions += 1;
    }
    fn record_ghost_trim(&mut self) {
        self.ghost_trims += 1;
    }
}
