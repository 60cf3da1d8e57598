//! The XP award path
//!
//! [`XpAwarder`] glues the pure level math to the outside world: it reads
//! and updates the authoritative point total through [`ProfileStore`] and
//! announces results through [`Notifier`]. The award itself is
//! asynchronous (the profile update is network-bound in production) and
//! guarded against overlapping invocations.

use super::actions::XpAction;
use super::level::level_for_xp;
use crate::identity::IdentityProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// Persistence for cumulative point totals
///
/// The sole place totals live; the awarder never caches them. Errors are
/// reported as strings, logged by the awarder, and never propagated.
#[async_trait]
pub trait ProfileStore {
    /// The user's current cumulative total
    async fn point_total(&self, user: &str) -> Result<i64, String>;

    /// Add `amount` points to the user's total
    async fn add_points(&self, user: &str, amount: i64) -> Result<(), String>;
}

/// Category of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Fire-and-forget toast surface
///
/// The awarder sends two kinds of messages through this: the immediate
/// "+N XP" announcement and, when a level boundary is crossed, a level-up
/// announcement.
pub trait Notifier {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Awards experience points for user actions
///
/// One awarder typically backs one interactive control. Calls overlap
/// when the user clicks faster than the profile update settles; the
/// awarder is single-flight and drops (does not queue) calls made while
/// one is outstanding, so a rapid double-click awards once.
///
/// Anonymous sessions are a silent no-op, and a failed profile update is
/// logged with no notification shown; the attempted award is simply
/// lost and the user can redo the action.
///
/// # Example
///
/// ```
/// use builder_engage::{IdentityProvider, NoticeKind, Notifier, ProfileStore, XpAction, XpAwarder};
/// use std::sync::Mutex;
///
/// struct Session;
/// impl IdentityProvider for Session {
///     fn current_user(&self) -> Option<String> {
///         Some("u1".to_string())
///     }
/// }
///
/// struct Points(Mutex<i64>);
///
/// #[async_trait::async_trait]
/// impl ProfileStore for Points {
///     async fn point_total(&self, _user: &str) -> Result<i64, String> {
///         Ok(*self.0.lock().unwrap())
///     }
///     async fn add_points(&self, _user: &str, amount: i64) -> Result<(), String> {
///         *self.0.lock().unwrap() += amount;
///         Ok(())
///     }
/// }
///
/// struct Toasts;
/// impl Notifier for Toasts {
///     fn notify(&self, message: &str, _kind: NoticeKind) {
///         println!("{message}");
///     }
/// }
///
/// let awarder = XpAwarder::new(Session, Points(Mutex::new(95)), Toasts);
/// tokio_test::block_on(awarder.award(XpAction::Vote, 1)); // prints "+2 XP - Voted on a project"
/// ```
pub struct XpAwarder<I: IdentityProvider, P: ProfileStore, N: Notifier> {
    identity: I,
    profiles: P,
    notifier: N,
    in_flight: AtomicBool,
}

impl<I: IdentityProvider, P: ProfileStore, N: Notifier> XpAwarder<I, P, N> {
    /// Create an awarder over the given collaborators
    pub fn new(identity: I, profiles: P, notifier: N) -> Self {
        XpAwarder {
            identity,
            profiles,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Award points for `action`, scaled by `multiplier`
    ///
    /// No-op for anonymous sessions and while a previous award from this
    /// instance is still in flight. On success the "+N XP" notification
    /// is sent, plus a level-up notification when the new total crosses
    /// into a higher level band.
    pub async fn award(&self, action: XpAction, multiplier: u32) {
        let Some(user) = self.identity.current_user() else {
            return;
        };

        if self.in_flight.swap(true, Ordering::Acquire) {
            tracing::debug!(?action, "xp award already in flight, dropping");
            return;
        }

        let points = action.points().saturating_mul(multiplier as i64);
        match self.apply(&user, points).await {
            Ok((before, after)) => {
                self.notifier.notify(
                    &format!("+{points} XP - {}", action.description()),
                    NoticeKind::Success,
                );

                let new_level = level_for_xp(after);
                if new_level > level_for_xp(before) {
                    self.notifier.notify(
                        &format!("Level up! You reached level {new_level}"),
                        NoticeKind::Success,
                    );
                }
            }
            Err(err) => {
                tracing::error!(%user, ?action, error = %err, "xp award failed");
            }
        }

        self.in_flight.store(false, Ordering::Release);
    }

    async fn apply(&self, user: &str, points: i64) -> Result<(i64, i64), String> {
        let before = self.profiles.point_total(user).await?;
        self.profiles.add_points(user, points).await?;
        Ok((before, before.saturating_add(points)))
    }
}
