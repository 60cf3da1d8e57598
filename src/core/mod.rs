//! Core components of the rate limiting half of the crate
//!
//! - [`limiter`]: the fixed-window rate limiter
//! - [`store`]: storage backends for window records

pub mod limiter;
pub mod store;

pub use limiter::{LimiterStatus, RateLimitConfig, RateLimiter, WindowRecord};
pub use store::{FileStore, KvStore, MemoryStore};

use std::error::Error;
use std::fmt;

/// Errors from rate limit configuration
///
/// Runtime limit checks never error; the limiter fails open instead.
/// These only occur when constructing an invalid [`RateLimitConfig`].
///
/// # Example
///
/// ```
/// use builder_engage::{LimitError, RateLimitConfig};
/// use std::time::Duration;
///
/// let err = RateLimitConfig::new("vote", 0, Duration::from_secs(60));
/// assert!(matches!(err, Err(LimitError::ZeroMaxRequests)));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub enum LimitError {
    /// `max_requests` must be greater than zero
    ZeroMaxRequests,
    /// The window must be a positive duration
    ZeroWindow,
}

impl fmt::Display for LimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitError::ZeroMaxRequests => write!(f, "max_requests must be greater than zero"),
            LimitError::ZeroWindow => write!(f, "window must be a positive duration"),
        }
    }
}

impl Error for LimitError {}
