//! Identity collaborator
//!
//! Both the rate limiter and the XP awarder are scoped to the signed-in
//! user: anonymous sessions are denied by the limiter and ignored by the
//! awarder. The embedding application implements [`IdentityProvider`] on
//! top of whatever session handling it already has.

/// Read-only view of the current authenticated session
pub trait IdentityProvider {
    /// The signed-in user's id, or `None` for an anonymous session
    fn current_user(&self) -> Option<String>;
}
