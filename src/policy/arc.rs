//! Adaptive Replacement Cache (ARC) with fallible fetch/evict callbacks.
//!
//! The cache balances recency against frequency with four ordered key lists
//! and a self-tuning target `p` for the size of the recency side. Values are
//! produced on demand by a [`ValueSource`]; evicted entries are reported to
//! the same source before they are dropped.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         ArcCache<K, V, S> Layout                            │
//! │                                                                             │
//! │   values: FxHashMap<K, V>      (exactly the keys of T1 ∪ T2)                │
//! │                                                                             │
//! │   T1 (resident, seen once)            T2 (resident, seen again)             │
//! │   ┌─────────────────────────┐         ┌─────────────────────────┐           │
//! │   │ front             back  │         │ front             back  │           │
//! │   │ [new] ◄──► ... ◄──► [x] │         │ [hot] ◄──► ... ◄──► [y] │           │
//! │   └────────────────────┬────┘         └────────────────────┬────┘           │
//! │                evict x │                           evict y │                │
//! │                        ▼                                   ▼                │
//! │   B1 (ghost of T1, keys only)         B2 (ghost of T2, keys only)           │
//! │                                                                             │
//! │   p: target |T1|   • ghost hit in B1 → p grows   • ghost hit in B2 → p shrinks
//! │   source: S        • fetch(key) on miss          • on_evict(key, value)     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## `get` State Machine
//!
//! ```text
//!   key ∈ T1 ──► move to T2 front, return value               (no callback)
//!   key ∈ T2 ──► move to T2 front, return value               (no callback)
//!   otherwise ─► fetch(key)  ── error ──► return, nothing changed
//!      key ∈ B1 ──► p' = min(c, p + max(|B2|/|B1|, 1)); replace(p'); B1 → T2 front
//!      key ∈ B2 ──► p' = max(0, p − max(|B1|/|B2|, 1)); replace(p'); B2 → T2 front
//!      new key:
//!        |T1|+|B1| = c, |T1| < c  ──► replace(p); drop B1 back
//!        |T1|+|B1| = c, |T1| = c  ──► evict T1 back (no ghost)
//!        directory = 2c           ──► drop B2 back; replace(p)  (restored on error)
//!        c ≤ directory < 2c       ──► replace(p)
//!        insert at T1 front
//! ```
//!
//! `replace(target)` evicts the back of T1 into B1 when
//! `|T1| > target`, or when `|T1| = target > 0` and the requested key is a B2
//! ghost; otherwise it evicts the back of T2 into B2.
//!
//! ## Failure Semantics
//!
//! A `get` that returns an error has performed no net change: the four lists
//! (including order), the stored values and `p` are exactly as before. The
//! fetch callback runs before any mutation; an evict failure aborts before the
//! victim is unlinked; the one provisional change (trimming B2 when the
//! directory is full) is undone before the error is returned. Retrying a
//! failed key is therefore always safe.
//!
//! ## Operations
//!
//! | Operation        | Time   | Notes                                        |
//! |------------------|--------|----------------------------------------------|
//! | `get`            | O(1)*  | *plus the cost of at most one fetch + evict  |
//! | `peek`           | O(1)   | no recency change, no callback               |
//! | `contains`       | O(1)   | resident keys only                           |
//! | `snapshot`       | O(n)   | ordered copy of all lists                    |
//! | `debug_dump`     | O(n)   | rendered from the ordered lists              |
//!
//! ## Example Usage
//!
//! ```
//! use arckit::policy::arc::ArcCache;
//! use arckit::source::FnSource;
//! use arckit::traits::ReadOnlyCache;
//!
//! let source = FnSource::new(|key: &u32| Ok::<_, String>(key * 10));
//! let mut cache = ArcCache::new(2, source);
//!
//! assert_eq!(cache.get(&1), Ok(&10)); // miss: fetched into T1
//! assert_eq!(cache.get(&1), Ok(&10)); // hit: promoted to T2
//! assert_eq!(cache.t2_len(), 1);
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! `ArcCache` does no locking. Callers sharing one across threads must hold a
//! single mutex around each `get`, including the callbacks it runs.
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement Cache",
//!   FAST 2003

use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::KeyList;
use crate::error::{ConfigError, GetError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ArcMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ArcMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    ArcMetricsRecorder, CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};
use crate::traits::{ReadOnlyCache, ValueSource};

/// Resident list an eviction is taken from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ListKind {
    T1,
    T2,
}

impl ListKind {
    fn name(self) -> &'static str {
        match self {
            ListKind::T1 => "t1",
            ListKind::T2 => "t2",
        }
    }
}

/// Adaptive Replacement Cache driven by a [`ValueSource`].
///
/// - **T1**: resident keys seen once recently
/// - **T2**: resident keys seen at least twice
/// - **B1** / **B2**: ghost keys recently evicted from T1 / T2
/// - **p**: adaptive target size for T1, starting at 0
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash`
/// - `V`: value type, no bounds
/// - `S`: callback source implementing [`ValueSource<K, V>`]
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
/// use arckit::source::FnSource;
///
/// let source = FnSource::new(|key: &&str| Ok::<_, ()>(key.len()));
/// let mut cache = ArcCache::new(100, source);
///
/// assert_eq!(cache.get(&"page"), Ok(&4));
/// assert_eq!(cache.peek(&"page"), Some(&4));
/// assert_eq!(cache.peek(&"other"), None);
/// ```
pub struct ArcCache<K, V, S> {
    values: FxHashMap<K, V>,
    t1: KeyList<K>,
    t2: KeyList<K>,
    b1: KeyList<K>,
    b2: KeyList<K>,
    /// Target size for T1, always in `0..=capacity`.
    p: usize,
    capacity: usize,
    source: S,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl<K, V, S> ArcCache<K, V, S>
where
    K: Clone + Eq + Hash,
    S: ValueSource<K, V>,
{
    /// Creates a cache holding at most `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use arckit::policy::arc::ArcCache;
    /// use arckit::source::FnSource;
    ///
    /// assert!(ArcCache::try_new(0, FnSource::new(|k: &u8| Ok::<_, ()>(*k))).is_err());
    /// assert!(ArcCache::try_new(8, FnSource::new(|k: &u8| Ok::<_, ()>(*k))).is_ok());
    /// ```
    pub fn try_new(capacity: usize, source: S) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            t1: KeyList::with_capacity(capacity),
            t2: KeyList::with_capacity(capacity),
            b1: KeyList::with_capacity(capacity),
            b2: KeyList::with_capacity(capacity),
            p: 0,
            capacity,
            source,
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        })
    }

    /// Creates a cache holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize, source: S) -> Self {
        match Self::try_new(capacity, source) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns the value for `key`, fetching it on a miss.
    ///
    /// Resident keys are served without calling the source. Any other key is
    /// fetched first; making room may then evict one resident entry through
    /// [`ValueSource::on_evict`].
    ///
    /// # Errors
    ///
    /// Returns [`GetError::Fetch`] or [`GetError::Evict`] with the callback's
    /// error. The cache is left exactly as it was before the call.
    pub fn get(&mut self, key: &K) -> Result<&V, GetError<S::Error>> {
        if let Some(id) = self.t1.find(key) {
            self.t1.remove_at(id);
            self.t2.push_front(key.clone());
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_hit();
                self.metrics.record_t1_to_t2_promotion();
            }
            trace!(t1 = self.t1.len(), t2 = self.t2.len(), "promoted t1 -> t2");
            return Ok(self.resident(key));
        }

        if let Some(id) = self.t2.find(key) {
            self.t2.move_to_front(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();
            return Ok(self.resident(key));
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_get_miss();
            self.metrics.record_fetch_call();
        }
        let value = match self.source.fetch(key) {
            Ok(value) => value,
            Err(err) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_fetch_failure();
                debug!("fetch callback failed; cache unchanged");
                return Err(GetError::Fetch(err));
            },
        };

        if self.b1.contains(key) {
            let delta = (self.b2.len() / self.b1.len()).max(1);
            let target = (self.p + delta).min(self.capacity);
            self.replace(key, target)?;
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_b1_ghost_hit();
                if target > self.p {
                    self.metrics.record_p_increase();
                }
            }
            self.p = target;
            self.b1.remove(key);
            self.t2.push_front(key.clone());
            trace!(p = self.p, "b1 ghost hit");
            return Ok(self.store(key.clone(), value));
        }

        if self.b2.contains(key) {
            let delta = (self.b1.len() / self.b2.len()).max(1);
            let target = self.p.saturating_sub(delta);
            self.replace(key, target)?;
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_b2_ghost_hit();
                if target < self.p {
                    self.metrics.record_p_decrease();
                }
            }
            self.p = target;
            self.b2.remove(key);
            self.t2.push_front(key.clone());
            trace!(p = self.p, "b2 ghost hit");
            return Ok(self.store(key.clone(), value));
        }

        if self.t1.len() + self.b1.len() == self.capacity {
            if self.t1.len() < self.capacity {
                self.replace(key, self.p)?;
                self.trim_recency_ghost();
            } else {
                self.evict_back(ListKind::T1, false)?;
            }
        } else {
            let directory = self.directory_len();
            if directory >= self.capacity {
                if directory == 2 * self.capacity {
                    let trimmed = self.b2.pop_back();
                    if let Err(err) = self.replace(key, self.p) {
                        if let Some(ghost) = trimmed {
                            self.b2.push_back(ghost);
                        }
                        #[cfg(feature = "metrics")]
                        self.metrics.record_rollback();
                        debug!("restored trimmed b2 ghost after failed replacement");
                        return Err(err);
                    }
                    #[cfg(feature = "metrics")]
                    self.metrics.record_ghost_trim();
                    trace!(b2 = self.b2.len(), "trimmed b2 ghost");
                } else {
                    self.replace(key, self.p)?;
                }
            }
        }

        self.t1.push_front(key.clone());
        Ok(self.store(key.clone(), value))
    }

    /// Evicts one resident entry, choosing T1 or T2 against `target`.
    fn replace(&mut self, key: &K, target: usize) -> Result<(), GetError<S::Error>> {
        let t1_len = self.t1.len();
        let from_t1 = (t1_len > 0 && self.b2.contains(key) && t1_len == target) || t1_len > target;
        let list = if from_t1 { ListKind::T1 } else { ListKind::T2 };
        self.evict_back(list, true)
    }

    /// Evicts the back entry of `list`, demoting its key to the paired ghost
    /// list when `keep_ghost` is set.
    ///
    /// The evict callback runs first; on failure nothing is touched.
    fn evict_back(&mut self, list: ListKind, keep_ghost: bool) -> Result<(), GetError<S::Error>> {
        let (resident, ghost) = match list {
            ListKind::T1 => (&mut self.t1, &mut self.b1),
            ListKind::T2 => (&mut self.t2, &mut self.b2),
        };
        let Some(victim) = resident.peek_back() else {
            return Ok(());
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();
        if let Err(err) = self.source.on_evict(victim, &self.values[victim]) {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_failure();
            debug!(list = list.name(), "evict callback failed; cache unchanged");
            return Err(GetError::Evict(err));
        }

        if let Some(victim) = resident.pop_back() {
            self.values.remove(&victim);
            if keep_ghost {
                ghost.push_front(victim);
            }
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evicted_entry();
            match list {
                ListKind::T1 => self.metrics.record_t1_eviction(),
                ListKind::T2 => self.metrics.record_t2_eviction(),
            }
        }
        trace!(list = list.name(), ghost = keep_ghost, "evicted resident entry");
        Ok(())
    }

    /// Forgets the oldest B1 ghost. No callback is involved.
    fn trim_recency_ghost(&mut self) {
        if self.b1.pop_back().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_ghost_trim();
            trace!(b1 = self.b1.len(), "trimmed b1 ghost");
        }
    }

    fn resident(&self, key: &K) -> &V {
        &self.values[key]
    }

    fn store(&mut self, key: K, value: V) -> &V {
        match self.values.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(value);
                slot.into_mut()
            },
            Entry::Vacant(slot) => slot.insert(value),
        }
    }
}

impl<K, V, S> ArcCache<K, V, S>
where
    K: Clone + Eq + Hash,
{
    /// Returns the stored value for a resident key without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    /// Returns `true` if `key` is remembered in B1 or B2.
    pub fn is_ghost(&self, key: &K) -> bool {
        self.b1.contains(key) || self.b2.contains(key)
    }

    /// Current target size for T1.
    ///
    /// Higher values favor recency, lower values favor frequency.
    pub fn p_value(&self) -> usize {
        self.p
    }

    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Number of keys tracked across all four lists.
    pub fn directory_len(&self) -> usize {
        self.t1.len() + self.t2.len() + self.b1.len() + self.b2.len()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the cache and returns its value source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Copies the full cache state in list order.
    ///
    /// Two snapshots compare equal exactly when the lists (including order),
    /// stored values, capacity and `p` all match.
    pub fn snapshot(&self) -> ArcSnapshot<K, V>
    where
        V: Clone,
    {
        let values = self
            .t1
            .iter()
            .chain(self.t2.iter())
            .filter_map(|key| self.values.get(key).map(|v| (key.clone(), v.clone())))
            .collect();
        ArcSnapshot {
            capacity: self.capacity,
            p: self.p,
            t1: self.t1.iter().cloned().collect(),
            t2: self.t2.iter().cloned().collect(),
            b1: self.b1.iter().cloned().collect(),
            b2: self.b2.iter().cloned().collect(),
            values,
        }
    }

    /// Renders the cache state for debugging.
    ///
    /// Output is derived from the ordered lists, so it is deterministic for a
    /// given state. The format is not stable across versions.
    pub fn debug_dump(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "ArcCache dump:");
        let _ = write!(out, "  values: {{");
        for (i, key) in self.t1.iter().chain(self.t2.iter()).enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{:?}: {:?}", key, self.values.get(key));
        }
        out.push_str("}\n");
        let _ = writeln!(out, "  capacity: {}", self.capacity);
        let _ = writeln!(out, "  p: {}", self.p);
        for (name, list) in [("t1", &self.t1), ("t2", &self.t2), ("b1", &self.b1), ("b2", &self.b2)]
        {
            let keys: Vec<&K> = list.iter().collect();
            let _ = writeln!(out, "  {}: {:?}", name, keys);
        }
        out
    }

    /// Checks every structural invariant of the cache.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`] naming the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let c = self.capacity;
        let (t1, t2, b1, b2) = (self.t1.len(), self.t2.len(), self.b1.len(), self.b2.len());

        if t1 + t2 > c {
            return Err(InvariantError::new(format!(
                "resident entries |T1| {} + |T2| {} exceed capacity {}",
                t1, t2, c
            )));
        }
        if t1 + b1 > c {
            return Err(InvariantError::new(format!(
                "recency directory |T1| {} + |B1| {} exceeds capacity {}",
                t1, b1, c
            )));
        }
        if t2 + b2 > 2 * c {
            return Err(InvariantError::new(format!(
                "frequency directory |T2| {} + |B2| {} exceeds 2 * capacity {}",
                t2, b2, c
            )));
        }
        if self.directory_len() > 2 * c {
            return Err(InvariantError::new(format!(
                "directory size {} exceeds 2 * capacity {}",
                self.directory_len(),
                c
            )));
        }
        if self.p > c {
            return Err(InvariantError::new(format!(
                "p {} exceeds capacity {}",
                self.p, c
            )));
        }
        if self.values.len() != t1 + t2 {
            return Err(InvariantError::new(format!(
                "value store holds {} entries but T1 + T2 hold {}",
                self.values.len(),
                t1 + t2
            )));
        }

        for key in &self.t1 {
            if !self.values.contains_key(key) {
                return Err(InvariantError::new("T1 key has no stored value"));
            }
            if self.t2.contains(key) || self.b1.contains(key) || self.b2.contains(key) {
                return Err(InvariantError::new("T1 key is also tracked by another list"));
            }
        }
        for key in &self.t2 {
            if !self.values.contains_key(key) {
                return Err(InvariantError::new("T2 key has no stored value"));
            }
            if self.b1.contains(key) || self.b2.contains(key) {
                return Err(InvariantError::new("T2 key is also a ghost"));
            }
        }
        for key in &self.b1 {
            if self.b2.contains(key) {
                return Err(InvariantError::new("key is a ghost in both B1 and B2"));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates list structure and cache invariants, panicking on violation.
    pub fn debug_validate_invariants(&self) {
        self.t1.debug_validate_invariants();
        self.t2.debug_validate_invariants();
        self.b1.debug_validate_invariants();
        self.b2.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("ARC invariant violated: {}", err);
        }
    }
}

/// Metrics functionality (requires `metrics` feature).
#[cfg(feature = "metrics")]
impl<K, V, S> ArcCache<K, V, S>
where
    K: Clone + Eq + Hash,
{
    /// Returns the raw counters recorded so far.
    pub fn metrics(&self) -> &ArcMetrics {
        &self.metrics
    }

    /// Returns the counters plus gauges for the current state.
    pub fn metrics_snapshot(&self) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot {
            cache_len: self.values.len(),
            ghost_len: self.b1.len() + self.b2.len(),
            capacity: self.capacity,
            p: self.p,
            ..self.metrics.snapshot()
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache<K, V, S>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsReset for ArcCache<K, V, S> {
    fn reset_metrics(&mut self) {
        self.metrics = ArcMetrics::default();
    }
}

impl<K, V, S> ReadOnlyCache<K> for ArcCache<K, V, S>
where
    K: Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V, S> fmt::Debug for ArcCache<K, V, S>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("p", &self.p)
            .field("t1_len", &self.t1.len())
            .field("t2_len", &self.t2.len())
            .field("b1_len", &self.b1.len())
            .field("b2_len", &self.b2.len())
            .finish_non_exhaustive()
    }
}

/// Point-in-time copy of an [`ArcCache`]'s state.
///
/// Lists are front to back. `values` lists resident entries in T1 order and
/// then T2 order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcSnapshot<K, V> {
    pub capacity: usize,
    pub p: usize,
    pub t1: Vec<K>,
    pub t2: Vec<K>,
    pub b1: Vec<K>,
    pub b2: Vec<K>,
    pub values: Vec<(K, V)>,
}



#[cfg(all(test, feature = "metrics"))]
mod metrics_tests {
    use super::*;

    struct Tens;

    impl ValueSource<u32, u32> for Tens {
        type Error = ();

        fn fetch(&mut self, key: &u32) -> Result<u32, ()> {
            Ok(key * 10)
        }
    }

    #[test]
    fn metrics_snapshot_reports_gauges() {
        let mut cache = ArcCache::new(2, Tens);
        for key in [1, 1, 2, 3] {
            cache.get(&key).unwrap();
        }

        let snap = cache.metrics_snapshot();
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 3);
        assert_eq!(snap.t1_evictions, 1);
        assert_eq!(snap.cache_len, 2);
        assert_eq!(snap.ghost_len, 1);
        assert_eq!(snap.capacity, 2);
        assert_eq!(snap.p, 0);
        assert_eq!(MetricsSnapshotProvider::snapshot(&cache), snap);
    }

    #[test]
    fn metrics_count_recency_ghost_trim() {
        let mut cache = ArcCache::new(2, Tens);
        for key in [1, 1, 2, 3, 2, 1, 4] {
            cache.get(&key).unwrap();
        }
        cache.reset_metrics();
        assert_eq!(cache.metrics().get_calls, 0);

        cache.get(&5).unwrap();
        let snap = cache.metrics_snapshot();
        assert_eq!(snap.ghost_trims, 1);
        assert_eq!(snap.t1_evictions, 1);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.rollbacks, 0);
        assert!(!cache.is_ghost(&3));
    }
}
