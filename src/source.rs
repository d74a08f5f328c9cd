//! Closure-backed [`ValueSource`].
//!
//! [`FnSource`] boxes a fetch closure and an optional evict closure so caches
//! built from plain functions share one concrete type. The boxes are `Send`,
//! which keeps the resulting cache `Send` when `K` and `V` are.

use std::fmt;

use crate::traits::ValueSource;

pub(crate) type FetchFn<K, V, E> = Box<dyn FnMut(&K) -> Result<V, E> + Send>;
pub(crate) type EvictFn<K, V, E> = Box<dyn FnMut(&K, &V) -> Result<(), E> + Send>;

/// A fetch closure plus an optional evict closure.
///
/// # Example
///
/// ```
/// use arckit::source::FnSource;
/// use arckit::traits::ValueSource;
///
/// let mut source = FnSource::new(|key: &u32| Ok::<_, ()>(key + 1));
/// assert_eq!(source.fetch(&1), Ok(2));
/// assert_eq!(source.on_evict(&1, &2), Ok(()));
///
/// let mut strict = FnSource::new(|key: &u32| Ok(*key))
///     .with_evict(|_key: &u32, _value: &u32| Err("pinned"));
/// assert_eq!(strict.on_evict(&1, &1), Err("pinned"));
/// ```
pub struct FnSource<K, V, E> {
    fetch: FetchFn<K, V, E>,
    evict: Option<EvictFn<K, V, E>>,
}

impl<K, V, E> FnSource<K, V, E> {
    /// Wraps `fetch`; evictions always succeed.
    pub fn new<F>(fetch: F) -> Self
    where
        F: FnMut(&K) -> Result<V, E> + Send + 'static,
    {
        Self {
            fetch: Box::new(fetch),
            evict: None,
        }
    }

    /// Installs `evict` as the eviction callback, replacing any previous one.
    pub fn with_evict<D>(mut self, evict: D) -> Self
    where
        D: FnMut(&K, &V) -> Result<(), E> + Send + 'static,
    {
        self.evict = Some(Box::new(evict));
        self
    }

    pub(crate) fn from_boxed(fetch: FetchFn<K, V, E>, evict: Option<EvictFn<K, V, E>>) -> Self {
        Self { fetch, evict }
    }

    /// Returns `true` if a custom evict callback is installed.
    pub fn has_evict(&self) -> bool {
        self.evict.is_some()
    }
}

impl<K, V, E> ValueSource<K, V> for FnSource<K, V, E> {
    type Error = E;

    fn fetch(&mut self, key: &K) -> Result<V, E> {
        (self.fetch)(key)
    }

    fn on_evict(&mut self, key: &K, value: &V) -> Result<(), E> {
        match self.evict.as_mut() {
            Some(evict) => evict(key, value),
            None => Ok(()),
        }
    }
}

impl<K, V, E> fmt::Debug for FnSource<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource")
            .field("has_evict", &self.has_evict())
            .finish_non_exhaustive()
    }
}
