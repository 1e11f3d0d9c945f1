//! Process-wide user activity bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Tracks when a user last interacted with the bot and how many keep-alive
/// notices have been sent.
///
/// Timestamps are stored as milliseconds since the tracker was created so
/// recording activity never takes a lock.
#[derive(Debug)]
pub struct ActivityTracker {
    started: Instant,
    last_activity_ms: AtomicU64,
    refreshes: AtomicU64,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            last_activity_ms: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started).as_millis() as u64
    }

    pub fn record(&self) {
        self.record_at(Instant::now());
    }

    pub fn record_at(&self, now: Instant) {
        self.last_activity_ms
            .fetch_max(self.elapsed_ms(now), Ordering::Relaxed);
    }

    /// Time since the last recorded activity.
    pub fn idle_for(&self, now: Instant) -> Duration {
        let last = self.last_activity_ms.load(Ordering::Relaxed);
        Duration::from_millis(self.elapsed_ms(now).saturating_sub(last))
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Increments and returns the keep-alive counter.
    pub fn next_refresh(&self) -> u64 {
        self.refreshes.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_time_resets_on_activity() {
        let tracker = ActivityTracker::new();
        let start = Instant::now();
        let later = start + Duration::from_secs(600);

        assert!(tracker.idle_for(later) >= Duration::from_secs(600));

        tracker.record_at(later);
        assert_eq!(tracker.idle_for(later), Duration::ZERO);
        assert!(tracker.idle_for(later + Duration::from_secs(5)) >= Duration::from_secs(5));
    }

    #[test]
    fn test_refresh_counter() {
        let tracker = ActivityTracker::new();
        assert_eq!(tracker.next_refresh(), 1);
        assert_eq!(tracker.next_refresh(), 2);
    }
}
