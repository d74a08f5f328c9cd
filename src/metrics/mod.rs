//! Observational counters for [`ArcCache`](crate::policy::arc::ArcCache).
//!
//! Enabled with the `metrics` feature. Counters never influence eviction and
//! are not part of the cache's rollback state: a failed `get` still counts its
//! fetch or evict attempt.
//!
//! ## Example
//!
//! ```
//! use arckit::metrics::exporter::PrometheusTextExporter;
//! use arckit::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
//! use arckit::policy::arc::ArcCache;
//! use arckit::source::FnSource;
//!
//! let mut cache = ArcCache::new(2, FnSource::new(|k: &u32| Ok::<_, ()>(*k)));
//! cache.get(&1).unwrap();
//! cache.get(&1).unwrap();
//!
//! let snapshot = MetricsSnapshotProvider::snapshot(&cache);
//! assert_eq!(snapshot.get_hits, 1);
//! assert_eq!(snapshot.t1_to_t2_promotions, 1);
//!
//! let exporter = PrometheusTextExporter::new("arc", Vec::new());
//! exporter.export(&snapshot);
//! let text = String::from_utf8(exporter.into_inner()).unwrap();
//! assert!(text.contains("arc_get_hits_total 1"));
//! ```

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
