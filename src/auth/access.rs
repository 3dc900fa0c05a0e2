//! Role predicates and route guarding
//!
//! Predicates are pure reads over a session snapshot. Guards re-evaluate
//! on every call with no cached decision, so a role change in the session
//! is reflected on the next evaluation.

use super::models::Role;
use super::session::AuthSession;

/// View the client lands on after login or register
pub const DEFAULT_AUTHENTICATED_ROUTE: &str = "/syllabus";
/// View unauthenticated navigation is redirected to
pub const LOGIN_ROUTE: &str = "/login";
/// View under-privileged navigation is redirected to
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

pub fn has_role(session: &AuthSession, role: Role) -> bool {
    session
        .user
        .as_ref()
        .map(|user| user.roles.contains(&role))
        .unwrap_or(false)
}

pub fn has_any_role(session: &AuthSession, roles: &[Role]) -> bool {
    roles.iter().any(|role| has_role(session, *role))
}

pub fn has_all_roles(session: &AuthSession, roles: &[Role]) -> bool {
    roles.iter().all(|role| has_role(session, *role))
}

pub fn is_admin(session: &AuthSession) -> bool {
    has_role(session, Role::Administrator)
}

pub fn is_professor(session: &AuthSession) -> bool {
    has_role(session, Role::Professor)
}

pub fn is_student(session: &AuthSession) -> bool {
    has_role(session, Role::Student)
}

/// Outcome of a guard evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Allow,
    /// Send to the login view, remembering where the user was headed so
    /// login can return there afterwards
    RedirectToLogin { from: String },
    RedirectToUnauthorized,
    /// Send an already signed-in user to the default authenticated view
    RedirectToDefault,
}

/// Two-gate check for a protected view: authenticated first, then role
/// membership over the allowed set
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed_roles: Vec<Role>,
    require_all: bool,
}

impl RouteGuard {
    /// Pass when the user holds at least one of `roles` (default semantics)
    pub fn any_of(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed_roles: roles.into(),
            require_all: false,
        }
    }

    /// Pass only when the user holds every role in `roles`
    pub fn all_of(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed_roles: roles.into(),
            require_all: true,
        }
    }

    pub fn evaluate(&self, session: &AuthSession, requested: &str) -> GuardDecision {
        if !session.is_authenticated {
            return GuardDecision::RedirectToLogin {
                from: requested.to_string(),
            };
        }

        let has_access = if self.require_all {
            has_all_roles(session, &self.allowed_roles)
        } else {
            has_any_role(session, &self.allowed_roles)
        };

        if has_access {
            GuardDecision::Allow
        } else {
            GuardDecision::RedirectToUnauthorized
        }
    }
}

/// Inverse gate for public views (login, register): an already
/// authenticated user is sent to the default authenticated view
pub fn public_gate(session: &AuthSession) -> GuardDecision {
    if session.is_authenticated {
        GuardDecision::RedirectToDefault
    } else {
        GuardDecision::Allow
    }
}
