//! Sliding-window posting limiter
//!
//! Counts each user's successful posts within a trailing window (default 10
//! per hour) and denies further posts until the window slides past. State is
//! process-wide and in-memory; it is not shared across instances and does
//! not survive restarts.
//!
//! The read-filter-append sequence in `check_and_record` runs under a single
//! lock with no await point, so two concurrent posts for the same user can
//! never both pass the check before either records its timestamp.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Limiter configuration
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Maximum posts per user within the window
    pub max_posts: u32,
    /// Trailing window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_posts: 10,
            window: Duration::hours(1),
        }
    }
}

/// Per-user sliding window over post timestamps.
///
/// Stored sequences are pruned on access; `prune_expired` additionally
/// drops users whose entire window has expired.
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_posts(&self) -> u32 {
        self.config.max_posts
    }

    /// Check the user's window and record the event if allowed.
    ///
    /// Returns `false` without recording when the user already has
    /// `max_posts` timestamps inside the trailing window. Check and record
    /// are one atomic unit.
    pub fn check_and_record(&self, user_id: &str, now: DateTime<Utc>) -> bool {
        let cutoff = now - self.config.window;
        let mut windows = self.windows.lock().expect("limiter lock poisoned");

        let stamps = windows.entry(user_id.to_string()).or_default();
        stamps.retain(|ts| *ts > cutoff);

        if stamps.len() >= self.config.max_posts as usize {
            return false;
        }

        stamps.push(now);
        true
    }

    /// Drop expired timestamps everywhere and remove users left empty.
    /// Returns the number of removed users.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.config.window;
        let mut windows = self.windows.lock().expect("limiter lock poisoned");

        let before = windows.len();
        windows.retain(|_, stamps| {
            stamps.retain(|ts| *ts > cutoff);
            !stamps.is_empty()
        });
        before - windows.len()
    }

    /// Number of users currently holding window state
    pub fn tracked_users(&self) -> usize {
        self.windows.lock().expect("limiter lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(RateLimitConfig::default())
    }

    #[test]
    fn allows_up_to_limit_then_denies() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..10 {
            assert!(limiter.check_and_record("alice", now));
        }
        assert!(!limiter.check_and_record("alice", now));
    }

    #[test]
    fn denied_attempts_are_not_recorded() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..10 {
            limiter.check_and_record("alice", now);
        }
        for _ in 0..5 {
            assert!(!limiter.check_and_record("alice", now));
        }

        // One timestamp ages out; exactly one slot opens despite the five
        // rejected attempts above.
        let later = now + Duration::hours(1) + Duration::seconds(1);
        assert!(limiter.check_and_record("alice", later));
        assert!(!limiter.check_and_record("alice", later));
    }

    #[test]
    fn window_slides_rather_than_resets() {
        let limiter = limiter();
        let start = Utc::now();

        for i in 0..10 {
            assert!(limiter.check_and_record("alice", start + Duration::minutes(i)));
        }
        assert!(!limiter.check_and_record("alice", start + Duration::minutes(30)));

        // 61 minutes after the first post, only that one has expired
        let after = start + Duration::minutes(61);
        assert!(limiter.check_and_record("alice", after));
        assert!(!limiter.check_and_record("alice", after));
    }

    #[test]
    fn users_are_limited_independently() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..10 {
            assert!(limiter.check_and_record("alice", now));
        }
        assert!(!limiter.check_and_record("alice", now));
        assert!(limiter.check_and_record("bob", now));
    }

    #[test]
    fn prune_removes_idle_users() {
        let limiter = limiter();
        let now = Utc::now();

        limiter.check_and_record("alice", now);
        limiter.check_and_record("bob", now - Duration::hours(2));
        assert_eq!(limiter.tracked_users(), 2);

        let removed = limiter.prune_expired(now);
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_users(), 1);
    }

    #[test]
    fn custom_config_is_honored() {
        let limiter = SlidingWindowLimiter::new(RateLimitConfig {
            max_posts: 2,
            window: Duration::minutes(1),
        });
        let now = Utc::now();

        assert!(limiter.check_and_record("alice", now));
        assert!(limiter.check_and_record("alice", now));
        assert!(!limiter.check_and_record("alice", now));
        assert!(limiter.check_and_record("alice", now + Duration::minutes(2)));
    }
}
