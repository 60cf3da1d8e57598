//! # builder-engage
//!
//! Client-side engagement core for the Weekend Builder platform: a keyed
//! fixed-window action throttle and the XP/leveling subsystem behind the
//! "+N XP" and "Level up!" toasts.
//!
//! ## Overview
//!
//! Two independent components:
//!
//! - [`RateLimiter`]: caps actions like voting, commenting, and project
//!   submission per user per time window. State is one JSON window record
//!   per `{category}:{user}:{action}` key in a pluggable [`KvStore`].
//!   The limiter is advisory and fails open on storage trouble.
//! - [`XpAwarder`] plus the pure level math ([`level_for_xp`],
//!   [`level_progress`], [`xp_to_next_level`], [`LevelState`]): awards
//!   points for actions from a static table ([`XpAction`]), persists the
//!   total through an injected [`ProfileStore`], and announces awards and
//!   level-ups through an injected [`Notifier`].
//!
//! Collaborators (who is signed in, where totals persist, how toasts are
//! shown) are traits; the embedding application injects implementations,
//! and tests substitute fakes.
//!
//! ## Quick start
//!
//! ```
//! use builder_engage::{IdentityProvider, MemoryStore, RateLimitConfig, RateLimiter};
//! use std::time::SystemTime;
//!
//! struct Session;
//! impl IdentityProvider for Session {
//!     fn current_user(&self) -> Option<String> {
//!         Some("u1".to_string())
//!     }
//! }
//!
//! // Votes: 30 per user per minute
//! let mut limiter = RateLimiter::new(RateLimitConfig::vote(), Session, MemoryStore::new());
//!
//! let now = SystemTime::now();
//! if limiter.check("project:42", now) {
//!     println!("vote accepted, {} left", limiter.status().remaining);
//! } else {
//!     println!("slow down! retry in {:?}", limiter.remaining_time(now));
//! }
//! ```
//!
//! ## Level math
//!
//! Levels are fixed 100-point bands, zero-indexed:
//!
//! ```
//! use builder_engage::LevelState;
//!
//! let state = LevelState::from_xp(140);
//! assert_eq!(state.level, 1);
//! assert_eq!(state.progress_percent, 40.0);
//! assert_eq!(state.to_next, 60);
//! ```
//!
//! ## Durability
//!
//! [`MemoryStore`] keeps windows for the life of the process;
//! [`FileStore`] keeps them in a JSON file across restarts. Concurrent
//! processes sharing one file resolve last-write-wins; the limiter is a
//! soft cap, not a security boundary.
//!
//! ## Features
//!
//! - `ahash` (default): use AHash for the in-memory store's map

pub mod core;
pub mod identity;
pub mod xp;

pub use crate::core::{
    FileStore, KvStore, LimitError, LimiterStatus, MemoryStore, RateLimitConfig, RateLimiter,
    WindowRecord,
};
pub use crate::identity::IdentityProvider;
pub use crate::xp::{
    LEVEL_WIDTH, LevelState, NoticeKind, Notifier, ProfileStore, XpAction, XpAwarder, level_for_xp,
    level_progress, xp_to_next_level,
};
