use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::ArcMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so output can be scraped
/// directly or forwarded to a collector. Write errors are ignored.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<ArcMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ArcMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("fetch_calls_total", snapshot.fetch_calls);
        self.write_counter("fetch_failures_total", snapshot.fetch_failures);
        self.write_counter("evict_calls_total", snapshot.evict_calls);
        self.write_counter("evict_failures_total", snapshot.evict_failures);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("rollbacks_total", snapshot.rollbacks);
        self.write_counter("t1_to_t2_promotions_total", snapshot.t1_to_t2_promotions);
        self.write_counter("b1_ghost_hits_total", snapshot.b1_ghost_hits);
        self.write_counter("b2_ghost_hits_total", snapshot.b2_ghost_hits);
        self.write_counter("p_increases_total", snapshot.p_increases);
        self.write_counter("p_decreases_total", snapshot.p_decreases);
        self.write_counter("t1_evictions_total", snapshot.t1_evictions);
        self.write_counter("t2_evictions_total", snapshot.t2_evictions);
        self.write_counter("ghost_trims_total", snapshot.ghost_trims);
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("ghost_len", snapshot.ghost_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
        self.write_gauge("p", snapshot.p as u64);
    }
}
