use lru::LruCache;
use parking_lot::Condvar;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::convert::Infallible;
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CacheConfigurationError {
    #[error("A cache must be able to hold at least one entry")]
    ZeroCapacity,
}

enum SlotState<V, E> {
    Pending,
    Ready(Result<V, E>),

    /// The factory unwound before producing a result.
    Abandoned,
}

/// The rendezvous point for every caller waiting on a single in-flight
/// factory invocation.
struct Slot<V, E> {
    ready: Condvar,
    state: Mutex<SlotState<V, E>>,
}
impl<V: Clone, E: Clone> Slot<V, E> {
    fn pending() -> Self {
        Self {
            ready: Condvar::new(),
            state: Mutex::new(SlotState::Pending),
        }
    }

    fn publish(&self, state: SlotState<V, E>) {
        *self.state.lock() = state;
        self.ready.notify_all();
    }

    /// Block until the slot's factory finishes. `None` means it was
    /// abandoned and the caller should try again.
    fn wait(&self) -> Option<Result<V, E>> {
        let mut state = self.state.lock();
        while matches!(*state, SlotState::Pending) {
            self.ready.wait(&mut state);
        }
        match &*state {
            SlotState::Ready(result) => Some(result.clone()),
            SlotState::Abandoned | SlotState::Pending => None,
        }
    }
}

struct CacheState<V, E> {
    entries: LruCache<String, V>,
    in_flight: HashMap<String, Arc<Slot<V, E>>>,
}

enum Claim<V, E> {
    Cached(V),
    Creator(Arc<Slot<V, E>>),
    Waiter(Arc<Slot<V, E>>),
}

/// A bounded, thread-safe, least-recently-used cache of values keyed by
/// string.
///
/// Creation is single-flight: when several callers ask for the same absent
/// key at once, exactly one of them runs its factory and the rest block
/// until that result is available, then receive a clone of it. A failed
/// factory leaves the key absent; its error is handed to every caller that
/// was waiting on it.
///
/// Reads ([`Cache::try_get()`]) and creations both count as a use of an
/// entry. When an insertion would exceed the capacity, the least recently
/// used entry is evicted.
pub struct Cache<V, E = Infallible> {
    capacity: NonZeroUsize,
    state: Mutex<CacheState<V, E>>,
}
impl<V: Clone, E: Clone> Cache<V, E> {
    pub fn new(capacity: usize) -> Result<Self, CacheConfigurationError> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(CacheConfigurationError::ZeroCapacity)
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                in_flight: HashMap::new(),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Drop every cached entry. Creations that are in flight still finish
    /// (and cache their result).
    pub fn clear(&self) {
        let mut state = self.state.lock();
        log::debug!("Clearing {} cached entries.", state.entries.len());
        state.entries.clear();
    }

    /// Whether `key` is cached. Unlike [`Cache::try_get()`] this does not
    /// count as a use of the entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.lock().entries.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of entries currently cached.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Cache `value` under `key` unless a value is already cached (or being
    /// created) for it. Returns whether `value` was the one cached.
    pub fn try_add(&self, key: &str, value: V) -> bool {
        let (_, created) = self.get_or_create_impl(key, move || Ok(value));
        created
    }

    /// The value cached under `key`, marking it most recently used.
    pub fn try_get(&self, key: &str) -> Option<V> {
        self.state.lock().entries.get(key).cloned()
    }

    /// The value cached under `key`, creating (and caching) it with
    /// `factory` if it is absent.
    ///
    /// `factory` runs at most once per call, and only if no other caller is
    /// already creating a value for `key`.
    pub fn try_get_or_create<F>(&self, key: &str, factory: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.get_or_create_impl(key, factory).0
    }

    fn claim(&self, key: &str) -> Claim<V, E> {
        let mut state = self.state.lock();
        if let Some(value) = state.entries.get(key) {
            return Claim::Cached(value.clone());
        }
        if let Some(slot) = state.in_flight.get(key) {
            return Claim::Waiter(slot.clone());
        }
        let slot = Arc::new(Slot::pending());
        state.in_flight.insert(key.to_string(), slot.clone());
        Claim::Creator(slot)
    }

    fn get_or_create_impl<F>(&self, key: &str, factory: F) -> (Result<V, E>, bool)
    where
        F: FnOnce() -> Result<V, E>,
    {
        let slot = loop {
            match self.claim(key) {
                Claim::Cached(value) => return (Ok(value), false),
                Claim::Creator(slot) => break slot,
                Claim::Waiter(slot) => {
                    if let Some(result) = slot.wait() {
                        return (result, false);
                    }
                    log::trace!("Creation of `{key}` was abandoned, retrying.");
                },
            }
        };

        let guard = CreatorGuard {
            cache: self,
            key,
            slot: &slot,
        };
        let result = factory();
        std::mem::forget(guard);

        let created = result.is_ok();
        {
            let mut state = self.state.lock();
            if let Ok(value) = &result {
                let evicted = state.entries.push(key.to_string(), value.clone());
                if let Some((evicted_key, _)) = evicted.filter(|(evicted_key, _)| evicted_key != key) {
                    log::trace!("Evicted `{evicted_key}` to make room for `{key}`.");
                }
            }
            remove_in_flight(&mut state, key, &slot);
        }
        slot.publish(SlotState::Ready(result.clone()));

        (result, created)
    }
}
impl<V: Clone> Cache<V, Infallible> {
    /// Like [`Cache::try_get_or_create()`] for factories that cannot fail.
    pub fn get_or_create<F>(&self, key: &str, factory: F) -> V
    where
        F: FnOnce() -> V,
    {
        match self.try_get_or_create(key, || Ok(factory())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}
impl<V, E> std::fmt::Debug for Cache<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Cache")
            .field("capacity", &self.capacity)
            .field("len", &state.entries.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

/// Only the slot a creator claimed may be removed; a later creator may have
/// claimed the same key since.
fn remove_in_flight<V, E>(state: &mut CacheState<V, E>, key: &str, slot: &Arc<Slot<V, E>>) {
    if state.in_flight.get(key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
        state.in_flight.remove(key);
    }
}

/// Releases waiters if a factory unwinds.
struct CreatorGuard<'a, V: Clone, E: Clone> {
    cache: &'a Cache<V, E>,
    key: &'a str,
    slot: &'a Arc<Slot<V, E>>,
}
impl<V: Clone, E: Clone> Drop for CreatorGuard<'_, V, E> {
    fn drop(&mut self) {
        remove_in_flight(&mut self.cache.state.lock(), self.key, self.slot);
        self.slot.publish(SlotState::Abandoned);
    }
}
