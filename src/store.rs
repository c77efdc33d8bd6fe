// src/store.rs
//
// In-memory dataset cache keyed by (dataset kind, season).
//
// Each key owns its own mutex, held across a refresh, so two callers racing
// on a stale key trigger one live fetch and the second reads the result.
// Keys never block each other. A failed refresh leaves the slot as it was.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::model::Season;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for exercising expiry.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn at(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = lock(&self.0);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatasetKind {
    SalaryData,
}

impl DatasetKind {
    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::SalaryData => "salary_data",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub kind: DatasetKind,
    pub season: Season,
}

impl CacheKey {
    pub fn new(kind: DatasetKind, season: Season) -> Self {
        Self { kind, season }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.label(), self.season)
    }
}

/// A cache read: the shared value plus when it was fetched.
#[derive(Debug)]
pub struct Cached<V> {
    pub value: Arc<V>,
    pub fetched_at: DateTime<Utc>,
    /// `false` when this call performed the fetch.
    pub from_cache: bool,
}

impl<V> Clone for Cached<V> {
    fn clone(&self) -> Self {
        Self { value: Arc::clone(&self.value), fetched_at: self.fetched_at, from_cache: self.from_cache }
    }
}

struct Entry<V> {
    value: Arc<V>,
    fetched_at: DateTime<Utc>,
}

type Slot<V> = Arc<Mutex<Option<Entry<V>>>>;

pub struct SalaryCache<V> {
    slots: Mutex<HashMap<CacheKey, Slot<V>>>,
    clock: Arc<dyn Clock>,
    freshness: Duration,
}

impl<V> SalaryCache<V> {
    pub fn new(freshness: Duration) -> Self {
        Self::with_clock(freshness, Arc::new(SystemClock))
    }

    pub fn with_clock(freshness: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { slots: Mutex::new(HashMap::new()), clock, freshness }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Serve `key` if fresh and not forced; otherwise run `fetch` (given the
    /// fetch timestamp) and store its value. An `Err` from `fetch` is returned
    /// as-is and the previous entry, if any, stays in place.
    pub fn get_or_refresh<E>(
        &self,
        key: CacheKey,
        force: bool,
        fetch: impl FnOnce(DateTime<Utc>) -> Result<V, E>,
    ) -> Result<Cached<V>, E> {
        let slot = self.slot(key);
        let mut entry = lock(&slot);

        let now = self.clock.now();
        if !force {
            if let Some(e) = entry.as_ref().filter(|e| now - e.fetched_at < self.freshness) {
                debug!(%key, "cache hit");
                return Ok(Cached { value: Arc::clone(&e.value), fetched_at: e.fetched_at, from_cache: true });
            }
        }

        debug!(%key, force, "cache miss, fetching");
        let value = Arc::new(fetch(now)?);
        *entry = Some(Entry { value: Arc::clone(&value), fetched_at: now });
        Ok(Cached { value, fetched_at: now, from_cache: false })
    }

    /// Current entry regardless of age.
    pub fn peek(&self, key: CacheKey) -> Option<Cached<V>> {
        let slot = self.slot(key);
        let entry = lock(&slot);
        entry.as_ref().map(|e| Cached { value: Arc::clone(&e.value), fetched_at: e.fetched_at, from_cache: true })
    }

    pub fn is_fresh(&self, key: CacheKey) -> bool {
        self.peek(key)
            .is_some_and(|c| self.clock.now() - c.fetched_at < self.freshness)
    }

    /// Drops the entry; returns whether one was present.
    pub fn invalidate(&self, key: CacheKey) -> bool {
        let slot = self.slot(key);
        let mut entry = lock(&slot);
        entry.take().is_some()
    }

    /// Populated keys, sorted.
    pub fn keys(&self) -> Vec<CacheKey> {
        let slots: Vec<(CacheKey, Slot<V>)> = lock(&self.slots)
            .iter()
            .map(|(k, s)| (*k, Arc::clone(s)))
            .collect();

        let mut keys: Vec<CacheKey> = slots
            .into_iter()
            .filter(|(_, s)| lock(s).is_some())
            .map(|(k, _)| k)
            .collect();
        keys.sort();
        keys
    }

    fn slot(&self, key: CacheKey) -> Slot<V> {
        let mut slots = lock(&self.slots);
        Arc::clone(slots.entry(key).or_default())
    }
}

// A panic inside a fetch must not brick the key for everyone else.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    const KEY: CacheKey = CacheKey { kind: DatasetKind::SalaryData, season: Season(2025) };

    fn setup() -> (Arc<ManualClock>, SalaryCache<u32>) {
        let clock = Arc::new(ManualClock::at(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()));
        let cache = SalaryCache::with_clock(Duration::hours(1), clock.clone());
        (clock, cache)
    }

    fn ok(v: u32) -> impl FnOnce(DateTime<Utc>) -> Result<u32, ()> {
        move |_| Ok(v)
    }

    #[test]
    fn fresh_entry_is_served_without_fetching() {
        let (clock, cache) = setup();
        let first = cache.get_or_refresh(KEY, false, ok(1)).unwrap();
        assert!(!first.from_cache);

        clock.advance(Duration::minutes(59));
        let second = cache
            .get_or_refresh(KEY, false, |_| -> Result<u32, ()> { panic!("should not fetch") })
            .unwrap();
        assert!(second.from_cache);
        assert_eq!(*second.value, 1);
        assert_eq!(second.fetched_at, first.fetched_at);
    }

    #[test]
    fn stale_entry_refetches() {
        let (clock, cache) = setup();
        cache.get_or_refresh(KEY, false, ok(1)).unwrap();
        clock.advance(Duration::hours(1));
        let again = cache.get_or_refresh(KEY, false, ok(2)).unwrap();
        assert!(!again.from_cache);
        assert_eq!(*again.value, 2);
        assert!(!cache.is_fresh(CacheKey::new(DatasetKind::SalaryData, Season(2024))));
        assert!(cache.is_fresh(KEY));
    }

    #[test]
    fn force_bypasses_freshness() {
        let (_clock, cache) = setup();
        cache.get_or_refresh(KEY, false, ok(1)).unwrap();
        let forced = cache.get_or_refresh(KEY, true, ok(2)).unwrap();
        assert_eq!(*forced.value, 2);
    }

    #[test]
    fn failure_leaves_entry_untouched() {
        let (clock, cache) = setup();
        let first = cache.get_or_refresh(KEY, false, ok(1)).unwrap();
        clock.advance(Duration::hours(2));

        let err = cache.get_or_refresh(KEY, true, |_| Err::<u32, _>("down"));
        assert_eq!(err.unwrap_err(), "down");

        let kept = cache.peek(KEY).unwrap();
        assert_eq!(*kept.value, 1);
        assert_eq!(kept.fetched_at, first.fetched_at);
    }

    #[test]
    fn failure_on_empty_slot_stores_nothing() {
        let (_clock, cache) = setup();
        assert!(cache.get_or_refresh(KEY, false, |_| Err::<u32, _>(())).is_err());
        assert!(cache.peek(KEY).is_none());
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn keys_are_populated_only_and_render() {
        let (_clock, cache) = setup();
        let other = CacheKey::new(DatasetKind::SalaryData, Season(2024));
        cache.get_or_refresh(KEY, false, ok(1)).unwrap();
        cache.get_or_refresh(other, false, ok(2)).unwrap();
        assert_eq!(cache.keys(), vec![other, KEY]);
        assert_eq!(KEY.to_string(), "salary_data_2025");

        assert!(cache.invalidate(other));
        assert!(!cache.invalidate(other));
        assert_eq!(cache.keys(), vec![KEY]);
    }

    #[test]
    fn concurrent_misses_fetch_once() {
        let (_clock, cache) = setup();
        let cache = Arc::new(cache);
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache
                        .get_or_refresh(KEY, false, |_| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(std::time::Duration::from_millis(20));
                            Ok::<u32, ()>(7)
                        })
                        .unwrap()
                })
            })
            .collect();

        for h in handles {
            assert_eq!(*h.join().unwrap().value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
