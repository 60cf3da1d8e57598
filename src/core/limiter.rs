//! Fixed-window rate limiter
//!
//! This module provides the main [`RateLimiter`] struct which throttles
//! user actions with a fixed-window counter: a per-key window record is
//! counted up until the window expires, then reset in full.

use super::LimitError;
use super::store::KvStore;
use crate::identity::IdentityProvider;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Persisted per-key window record
///
/// One record exists per `{prefix}:{user}:{action}` key. The record is
/// stored JSON-encoded, e.g. `{"count":3,"resetAt":1754000000000}`, with
/// `resetAt` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    /// Accepted actions in the current window
    pub count: u32,
    /// When the window expires and the count resets, epoch milliseconds
    pub reset_at: i64,
}

/// Configuration for one limiter instance
///
/// Immutable once constructed. The preconfigured constructors cover the
/// product's action categories; [`RateLimitConfig::new`] builds custom
/// limits and rejects zero values.
///
/// # Example
///
/// ```
/// use builder_engage::RateLimitConfig;
/// use std::time::Duration;
///
/// let votes = RateLimitConfig::vote();
/// assert_eq!(votes.max_requests(), 30);
/// assert_eq!(votes.window(), Duration::from_secs(60));
///
/// let custom = RateLimitConfig::new("invite", 10, Duration::from_secs(300)).unwrap();
/// assert_eq!(custom.key_prefix(), "invite");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    key_prefix: String,
    max_requests: u32,
    window: Duration,
}

impl RateLimitConfig {
    /// Create a custom configuration
    ///
    /// # Errors
    ///
    /// - [`LimitError::ZeroMaxRequests`]: if `max_requests` is 0
    /// - [`LimitError::ZeroWindow`]: if `window` is zero
    pub fn new(
        key_prefix: impl Into<String>,
        max_requests: u32,
        window: Duration,
    ) -> Result<Self, LimitError> {
        if max_requests == 0 {
            return Err(LimitError::ZeroMaxRequests);
        }
        if window.is_zero() {
            return Err(LimitError::ZeroWindow);
        }
        Ok(RateLimitConfig {
            key_prefix: key_prefix.into(),
            max_requests,
            window,
        })
    }

    /// Voting: 30 actions per minute
    pub fn vote() -> Self {
        RateLimitConfig {
            key_prefix: "vote".to_string(),
            max_requests: 30,
            window: Duration::from_secs(60),
        }
    }

    /// Commenting: 20 actions per minute
    pub fn comment() -> Self {
        RateLimitConfig {
            key_prefix: "comment".to_string(),
            max_requests: 20,
            window: Duration::from_secs(60),
        }
    }

    /// Project submission: 5 actions per hour
    pub fn submission() -> Self {
        RateLimitConfig {
            key_prefix: "submission".to_string(),
            max_requests: 5,
            window: Duration::from_secs(3600),
        }
    }

    /// Category label used to namespace keys
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Allowed actions per window
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Observable state of a limiter after its most recent check
///
/// Mirrors what the surrounding UI needs to render: whether the last
/// action was throttled, how many actions remain in the window, and when
/// the window resets. `reset_at` is `None` until the first check that
/// actually evaluates a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterStatus {
    /// Whether the most recent check was denied
    pub limited: bool,
    /// Actions remaining in the current window
    pub remaining: u32,
    /// When the current window expires
    pub reset_at: Option<SystemTime>,
}

/// Fixed-window action throttle
///
/// Decides, for the signed-in user and a given action, whether the action
/// may proceed right now. Consumption is tracked in a per-key window
/// record held by a [`KvStore`]; the window is reset in full when its
/// expiry passes (hard rollover, not a decay).
///
/// The limiter is advisory: it prevents accidental floods from one
/// client, not adversarial abuse. Accordingly, any failure to read or
/// write the store is logged and the action is allowed (fail-open).
/// Anonymous sessions are always denied; the limiter is meaningless
/// without an identity to scope keys to.
///
/// # Example
///
/// ```
/// use builder_engage::{IdentityProvider, MemoryStore, RateLimitConfig, RateLimiter};
/// use std::time::SystemTime;
///
/// struct Session;
/// impl IdentityProvider for Session {
///     fn current_user(&self) -> Option<String> {
///         Some("u1".to_string())
///     }
/// }
///
/// let mut limiter = RateLimiter::new(RateLimitConfig::vote(), Session, MemoryStore::new());
///
/// if limiter.check("project:42", SystemTime::now()) {
///     // cast the vote
/// } else {
///     let wait = limiter.remaining_time(SystemTime::now());
///     println!("Easy there! Try again in {}s", wait.as_secs());
/// }
/// ```
pub struct RateLimiter<I: IdentityProvider, S: KvStore> {
    config: RateLimitConfig,
    identity: I,
    store: S,
    status: LimiterStatus,
}

impl<I: IdentityProvider, S: KvStore> RateLimiter<I, S> {
    /// Create a limiter over the given identity provider and store
    pub fn new(config: RateLimitConfig, identity: I, store: S) -> Self {
        let status = LimiterStatus {
            limited: false,
            remaining: config.max_requests,
            reset_at: None,
        };
        RateLimiter {
            config,
            identity,
            store,
            status,
        }
    }

    /// Check whether one more `action` is allowed right now
    ///
    /// Returns `true` and consumes one slot from the window when the
    /// action may proceed, `false` when the user is anonymous or the
    /// window is exhausted. [`status`](Self::status) reflects the outcome
    /// of the most recent call.
    ///
    /// `now` is injected so callers control the clock; production code
    /// passes `SystemTime::now()`.
    pub fn check(&mut self, action: &str, now: SystemTime) -> bool {
        let Some(user) = self.identity.current_user() else {
            return false;
        };

        let key = format!("{}:{}:{}", self.config.key_prefix, user, action);

        let Some(now_ms) = epoch_millis(now) else {
            tracing::warn!(%key, "clock predates epoch, allowing action");
            return true;
        };
        let window_ms = self.config.window.as_millis() as i64;

        let mut record = match self.load(&key) {
            Ok(Some(record)) => record,
            Ok(None) => WindowRecord {
                count: 0,
                reset_at: now_ms.saturating_add(window_ms),
            },
            Err(err) => {
                tracing::warn!(%key, error = %err, "rate limit read failed, allowing action");
                return true;
            }
        };

        // Hard rollover: a burst right after expiry gets the full quota
        if now_ms > record.reset_at {
            record.count = 0;
            record.reset_at = now_ms.saturating_add(window_ms);
        }

        let reset_at = Some(millis_to_system_time(record.reset_at));

        if record.count >= self.config.max_requests {
            self.status = LimiterStatus {
                limited: true,
                remaining: 0,
                reset_at,
            };
            return false;
        }

        record.count = record.count.saturating_add(1);
        if let Err(err) = self.persist(&key, &record) {
            tracing::warn!(%key, error = %err, "rate limit write failed, allowing action");
        }

        self.status = LimiterStatus {
            limited: false,
            remaining: self.config.max_requests - record.count,
            reset_at,
        };
        true
    }

    /// State left behind by the most recent check
    pub fn status(&self) -> &LimiterStatus {
        &self.status
    }

    /// Time until the current window resets
    ///
    /// Zero when no window has been evaluated yet or the reset has
    /// already passed.
    pub fn remaining_time(&self, now: SystemTime) -> Duration {
        match self.status.reset_at {
            Some(reset_at) => reset_at.duration_since(now).unwrap_or(Duration::ZERO),
            None => Duration::ZERO,
        }
    }

    /// This limiter's configuration
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn load(&self, key: &str) -> Result<Option<WindowRecord>, String> {
        match self.store.get(key)? {
            Some(raw) => {
                let record = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn persist(&mut self, key: &str, record: &WindowRecord) -> Result<(), String> {
        let raw = serde_json::to_string(record).map_err(|e| e.to_string())?;
        self.store.set(key, &raw)
    }
}

fn epoch_millis(time: SystemTime) -> Option<i64> {
    time.duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as i64)
}

fn millis_to_system_time(ms: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(ms.max(0) as u64)
}
