use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default lifetime of a report-name lookup
pub const REPORT_CACHE_TTL: Duration = Duration::from_secs(15);

/// Source of "now" for cache expiry
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Last-fetched set of report names. Valid while `now - fetched_at < ttl`.
/// Process-local; never persisted.
#[derive(Debug, Clone)]
pub struct ReportCache {
    entry: Option<(BTreeSet<String>, Instant)>,
    ttl: Duration,
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(REPORT_CACHE_TTL)
    }
}

impl ReportCache {
    pub fn new(ttl: Duration) -> Self {
        ReportCache { entry: None, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached names, if present and not yet expired at `now`.
    pub fn get(&self, now: Instant) -> Option<&BTreeSet<String>> {
        let (names, fetched_at) = self.entry.as_ref()?;
        if now.saturating_duration_since(*fetched_at) < self.ttl {
            Some(names)
        } else {
            None
        }
    }

    pub fn store(&mut self, names: BTreeSet<String>, now: Instant) {
        self.entry = Some((names, now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_cache_misses() {
        let cache = ReportCache::default();
        assert!(cache.get(Instant::now()).is_none());
    }

    #[test]
    fn hit_within_ttl_miss_at_ttl() {
        let clock = ManualClock::new();
        let mut cache = ReportCache::new(Duration::from_secs(15));
        cache.store(names(&["next", "all"]), clock.now());

        clock.advance(Duration::from_secs(14));
        assert_eq!(cache.get(clock.now()), Some(&names(&["next", "all"])));

        clock.advance(Duration::from_secs(1));
        assert!(cache.get(clock.now()).is_none());
    }

    #[test]
    fn store_resets_the_clock() {
        let clock = ManualClock::new();
        let mut cache = ReportCache::new(Duration::from_secs(15));
        cache.store(names(&["next"]), clock.now());
        clock.advance(Duration::from_secs(20));
        cache.store(names(&["overdue"]), clock.now());
        clock.advance(Duration::from_secs(5));
        assert_eq!(cache.get(clock.now()), Some(&names(&["overdue"])));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = other.now();
        clock.advance(Duration::from_secs(3));
        assert_eq!(other.now() - start, Duration::from_secs(3));
    }
}
