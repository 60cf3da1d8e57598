//! Experience points and leveling
//!
//! This module contains the XP half of the crate:
//! - [`level`]: pure level math over cumulative totals
//! - [`actions`]: the static award table
//! - [`awarder`]: the asynchronous, single-flight award path

pub mod actions;
pub mod awarder;
pub mod level;
#[cfg(test)]
mod tests;

pub use actions::XpAction;
pub use awarder::{NoticeKind, Notifier, ProfileStore, XpAwarder};
pub use level::{LEVEL_WIDTH, LevelState, level_for_xp, level_progress, xp_to_next_level};
