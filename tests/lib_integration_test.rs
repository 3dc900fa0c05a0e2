//! Integration tests for the library public API

use syllabus_client::auth::access::{self, GuardDecision, RouteGuard};
use syllabus_client::auth::models::{Role, User};
use syllabus_client::auth::session::AuthSession;
use syllabus_client::{AuthError, Result, DESCRIPTION, NAME, VERSION};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "syllabus_client");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert!(success.is_ok());

    let failure: Result<i32> = Err(AuthError::Authentication);
    assert!(failure.is_err());
}

#[test]
fn test_guard_over_hydrated_session() {
    let session = AuthSession {
        user: Some(User {
            id: "u1".to_string(),
            first_name: "Barbara".to_string(),
            last_name: "Liskov".to_string(),
            email: "barbara@example.com".to_string(),
            token: "tok".to_string(),
            roles: vec![Role::Professor],
            phone_prefix: None,
            phone_number: None,
        }),
        is_authenticated: true,
        is_fetching: false,
        error: None,
    };

    let guard = RouteGuard::any_of(vec![Role::Professor, Role::Administrator]);
    assert_eq!(guard.evaluate(&session, "/syllabus"), GuardDecision::Allow);

    assert_eq!(access::public_gate(&session), GuardDecision::RedirectToDefault);
}

#[test]
fn test_route_constants() {
    assert_eq!(access::LOGIN_ROUTE, "/login");
    assert_eq!(access::DEFAULT_AUTHENTICATED_ROUTE, "/syllabus");
    assert_eq!(access::UNAUTHORIZED_ROUTE, "/unauthorized");
}
