//! # Route gate decisions
//!
//! Pure functions deciding whether a page may render, given the current
//! [`Session`]. Rendering and navigation live in the UI crate; this module only
//! produces the outcome, so every branch can be checked without a browser.
//!
//! ## Signed-in pages: [`auth_required`]
//!
//! Evaluated in order:
//!
//! | Step | Condition | Outcome |
//! |------|-----------|---------|
//! | 1 | debounce not elapsed | [`GateOutcome::Pending`] |
//! | 2 | no token and no cached user | [`GateOutcome::DeniedUnauthenticated`] |
//! | 3 | cached user has no role | [`GateOutcome::DeniedNoRole`] |
//! | 4 | required role set and different | [`GateOutcome::DeniedRoleMismatch`] |
//! | 5 | no token | [`GateOutcome::DeniedUnauthenticated`] |
//! | 6 | otherwise | [`GateOutcome::Allowed`] |
//!
//! Step 2 keeps a visitor with an empty session from waiting on a role that can
//! never arrive; it sends them to the login page instead.
//!
//! ## Guest-only pages: [`no_auth_required`]
//!
//! Looks at the cached role only, not the token: a stale cached user is still
//! sent to their landing page.

use crate::models::Role;
use crate::session::Session;

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const ADMIN_ROUTE: &str = "/admin";
pub const JOBS_ROUTE: &str = "/jobs";

/// Outcome of the signed-in gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Session not evaluated yet; show a loading indicator.
    Pending,
    /// The cached user has no role; keep showing the loading indicator.
    DeniedNoRole,
    /// A required role is set and the user's differs; go home.
    DeniedRoleMismatch,
    /// No token; go to login.
    DeniedUnauthenticated,
    Allowed,
}

impl GateOutcome {
    /// Route to navigate to, if this outcome redirects.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GateOutcome::DeniedRoleMismatch => Some(HOME_ROUTE),
            GateOutcome::DeniedUnauthenticated => Some(LOGIN_ROUTE),
            GateOutcome::Pending | GateOutcome::DeniedNoRole | GateOutcome::Allowed => None,
        }
    }

    /// Whether the loading indicator should be shown.
    pub fn is_waiting(&self) -> bool {
        matches!(self, GateOutcome::Pending | GateOutcome::DeniedNoRole)
    }
}

/// Decide the signed-in gate. `settled` is false until the debounce elapses.
pub fn auth_required(session: &Session, required_role: Option<Role>, settled: bool) -> GateOutcome {
    if !settled {
        return GateOutcome::Pending;
    }
    if session.user.is_none() && !session.is_authenticated() {
        return GateOutcome::DeniedUnauthenticated;
    }
    let Some(role) = session.cached_role() else {
        return GateOutcome::DeniedNoRole;
    };
    if required_role.is_some_and(|required| required != role) {
        return GateOutcome::DeniedRoleMismatch;
    }
    if !session.is_authenticated() {
        return GateOutcome::DeniedUnauthenticated;
    }
    GateOutcome::Allowed
}

/// Outcome of the guest-only gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuestOutcome {
    Render,
    Redirect(&'static str),
}

/// Decide the guest-only gate from the cached role.
pub fn no_auth_required(session: &Session) -> GuestOutcome {
    match session.cached_role() {
        Some(Role::Admin) => GuestOutcome::Redirect(ADMIN_ROUTE),
        Some(Role::CabinetMaker) | Some(Role::Installer) => GuestOutcome::Redirect(JOBS_ROUTE),
        Some(Role::Other) | None => GuestOutcome::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session(token: Option<&str>, role: Option<Role>) -> Session {
        Session {
            token: token.map(str::to_string),
            user: Some(User {
                id: 1,
                role,
                ..User::default()
            }),
        }
    }

    #[test]
    fn test_pending_until_settled() {
        let s = session(Some("t"), Some(Role::Admin));
        assert_eq!(auth_required(&s, None, false), GateOutcome::Pending);
        assert_eq!(auth_required(&s, None, true), GateOutcome::Allowed);
    }

    #[test]
    fn test_admin_gate_denies_installer() {
        let s = session(Some("t"), Some(Role::Installer));
        let outcome = auth_required(&s, Some(Role::Admin), true);
        assert_eq!(outcome, GateOutcome::DeniedRoleMismatch);
        assert_eq!(outcome.redirect(), Some("/"));
    }

    #[test]
    fn test_missing_role_keeps_waiting() {
        let s = session(Some("t"), None);
        let outcome = auth_required(&s, None, true);
        assert_eq!(outcome, GateOutcome::DeniedNoRole);
        assert!(outcome.is_waiting());
        assert_eq!(outcome.redirect(), None);
    }

    #[test]
    fn test_stale_user_without_token_goes_to_login() {
        let s = session(None, Some(Role::CabinetMaker));
        let outcome = auth_required(&s, None, true);
        assert_eq!(outcome, GateOutcome::DeniedUnauthenticated);
        assert_eq!(outcome.redirect(), Some("/login"));
    }

    #[test]
    fn test_empty_session_goes_to_login() {
        let outcome = auth_required(&Session::default(), Some(Role::Admin), true);
        assert_eq!(outcome, GateOutcome::DeniedUnauthenticated);
    }

    #[test]
    fn test_role_checked_before_token() {
        let s = session(None, Some(Role::Installer));
        assert_eq!(
            auth_required(&s, Some(Role::Admin), true),
            GateOutcome::DeniedRoleMismatch
        );
    }

    #[test]
    fn test_guest_gate_redirects_by_cached_role() {
        assert_eq!(
            no_auth_required(&session(Some("t"), Some(Role::Admin))),
            GuestOutcome::Redirect("/admin")
        );
        assert_eq!(
            no_auth_required(&session(Some("t"), Some(Role::CabinetMaker))),
            GuestOutcome::Redirect("/jobs")
        );
        assert_eq!(
            no_auth_required(&session(None, Some(Role::Installer))),
            GuestOutcome::Redirect("/jobs")
        );
        assert_eq!(
            no_auth_required(&session(Some("t"), Some(Role::Other))),
            GuestOutcome::Render
        );
        assert_eq!(no_auth_required(&Session::default()), GuestOutcome::Render);
    }
}
