pub use crate::builder::ArcCacheBuilder;
pub use crate::ds::{IntrusiveList, KeyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, GetError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::ArcMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
pub use crate::policy::arc::{ArcCache, ArcSnapshot};
pub use crate::source::FnSource;
pub use crate::traits::{ReadOnlyCache, ValueSource};
