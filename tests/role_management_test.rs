//! Integration tests for the role management client and the global 401 policy

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syllabus_client::admin::RoleManagementClient;
use syllabus_client::auth::models::{Role, User};
use syllabus_client::auth::session::AuthSession;
use syllabus_client::{ApiClient, AuthError, SessionHandle, TokenStore};

fn signed_in_client(server: &MockServer) -> (tempfile::TempDir, ApiClient) {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionHandle::new(TokenStore::new(dir.path().join("session.json")));
    session.set_user(Some(User {
        id: "admin-1".to_string(),
        first_name: "Root".to_string(),
        last_name: "Admin".to_string(),
        email: "root@example.com".to_string(),
        token: "admin-token".to_string(),
        roles: vec![Role::Administrator],
        phone_prefix: None,
        phone_number: None,
    }));
    (dir, ApiClient::new(server.uri(), session))
}

#[tokio::test]
async fn requests_carry_the_stored_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/RoleManagement/user-by-email"))
        .and(query_param("email", "jane@example.com"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "u7",
            "email": "jane@example.com",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, api) = signed_in_client(&server);
    let client = RoleManagementClient::new(api);

    let lookup = client.user_by_email("jane@example.com").await.unwrap();
    assert_eq!(lookup.user_id, "u7");
}

#[tokio::test]
async fn assign_and_check_roles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/RoleManagement/assign"))
        .and(query_param("userId", "u7"))
        .and(query_param("role", "Professor"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/RoleManagement/user/u7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["Student", "Professor"])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/RoleManagement/check"))
        .and(query_param("userId", "u7"))
        .and(query_param("role", "Administrator"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&server)
        .await;

    let (_dir, api) = signed_in_client(&server);
    let client = RoleManagementClient::new(api);

    client.assign_role("u7", Role::Professor).await.unwrap();
    assert_eq!(
        client.user_roles("u7").await.unwrap(),
        vec![Role::Student, Role::Professor]
    );
    assert!(!client
        .is_user_in_role("u7", Role::Administrator)
        .await
        .unwrap());
}

#[tokio::test]
async fn a_401_anywhere_drops_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/RoleManagement/user/u7"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (_dir, api) = signed_in_client(&server);
    let session = api.session().clone();
    assert!(session.snapshot().is_authenticated);

    let client = RoleManagementClient::new(api);
    let err = client.user_roles("u7").await.unwrap_err();
    assert!(matches!(err, AuthError::Authentication));

    // Session reset to defaults, persisted record gone
    assert_eq!(session.snapshot(), AuthSession::default());
    assert!(!session.store().path().exists());
}

#[tokio::test]
async fn remove_role_uses_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/RoleManagement/remove"))
        .and(query_param("userId", "u7"))
        .and(query_param("role", "Student"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, api) = signed_in_client(&server);
    let client = RoleManagementClient::new(api);

    client.remove_role("u7", Role::Student).await.unwrap();
}
