//! # Cache Traits
//!
//! Two seams separate the replacement policy from everything around it:
//!
//! ```text
//!   ┌──────────────────────────────┐        ┌──────────────────────────────┐
//!   │      ValueSource<K, V>       │        │      ReadOnlyCache<K>        │
//!   │                              │        │                              │
//!   │  fetch(&mut, &K) → V         │        │  contains(&, &K) → bool      │
//!   │  on_evict(&mut, &K, &V)      │        │  len(&) → usize              │
//!   │  (both fallible)             │        │  is_empty(&) → bool          │
//!   │                              │        │  capacity(&) → usize         │
//!   └──────────────┬───────────────┘        └──────────────┬───────────────┘
//!                  │ called by                             │ implemented by
//!                  ▼                                       ▼
//!   ┌─────────────────────────────────────────────────────────────────────┐
//!   │                         ArcCache<K, V, S>                           │
//!   └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`ValueSource`] is the producer side: the cache calls `fetch` for a key it
//! does not hold and `on_evict` for every resident entry it is about to drop.
//! Either may fail; the cache then aborts the whole `get` and leaves its state
//! untouched.
//!
//! [`ReadOnlyCache`] is the inspection side: queries that never move entries
//! and never call back into the source.
//!
//! ## Thread Safety
//!
//! Caches in this crate do no internal locking. Share one across threads by
//! holding a mutex around each `get`, callbacks included.

/// Producer of values for a cache and sink for its evictions.
///
/// `fetch` is mandatory. `on_evict` defaults to a no-op that always succeeds.
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
/// use arckit::traits::ValueSource;
///
/// struct Squares {
///     evicted: Vec<u64>,
/// }
///
/// impl ValueSource<u64, u64> for Squares {
///     type Error = std::convert::Infallible;
///
///     fn fetch(&mut self, key: &u64) -> Result<u64, Self::Error> {
///         Ok(key * key)
///     }
///
///     fn on_evict(&mut self, key: &u64, _value: &u64) -> Result<(), Self::Error> {
///         self.evicted.push(*key);
///         Ok(())
///     }
/// }
///
/// let mut cache = ArcCache::new(2, Squares { evicted: Vec::new() });
/// assert_eq!(cache.get(&3), Ok(&9));
/// cache.get(&4).unwrap();
/// cache.get(&5).unwrap();
/// assert_eq!(cache.source().evicted, vec![3]);
/// ```
pub trait ValueSource<K, V> {
    /// Error produced by either callback.
    type Error;

    /// Produces the value for `key`, which the cache does not currently hold.
    fn fetch(&mut self, key: &K) -> Result<V, Self::Error>;

    /// Called before a resident entry is dropped from the cache.
    ///
    /// Returning an error vetoes the eviction and fails the enclosing `get`.
    fn on_evict(&mut self, key: &K, value: &V) -> Result<(), Self::Error> {
        let _ = (key, value);
        Ok(())
    }
}

/// Read-only queries shared by cache implementations.
///
/// None of these methods change recency or call back into a value source.
pub trait ReadOnlyCache<K> {
    /// Returns `true` if `key` currently holds a value.
    fn contains(&self, key: &K) -> bool;

    /// Number of entries currently holding a value.
    fn len(&self) -> usize;

    /// Returns `true` if no entry holds a value.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries that may hold a value.
    fn capacity(&self) -> usize;
}
