/// Point-in-time copy of [`ArcMetrics`](crate::metrics::metrics_impl::ArcMetrics)
/// plus gauges captured from the cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArcMetricsSnapshot {
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

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub ghost_len: usize,
    pub capacity: usize,
    pub p: usize,
}

impl ArcMetricsSnapshot {
    /// Fraction of `get` calls served without fetching, or 0.0 before any call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_no_calls() {
        assert_eq!(ArcMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_divides_hits_by_calls() {
        let snap = ArcMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert!((snap.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
