//! Role management client (administrator endpoints)
//!
//! Thin client over `/api/RoleManagement`. These calls ride the shared
//! authenticated plumbing: bearer token attached, any 401 drops the
//! session. Unlike the auth operations they do not touch the session's
//! fetching/error fields; callers surface failures themselves.

use reqwest::Method;
use serde::Deserialize;

use crate::auth::error::AuthError;
use crate::auth::models::Role;
use crate::client::ApiClient;

const BASE_PATH: &str = "/api/RoleManagement";

/// Resolution of an email to a platform user id
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLookup {
    pub user_id: String,
    pub email: String,
}

/// Client for administrator role management
#[derive(Clone)]
pub struct RoleManagementClient {
    api: ApiClient,
}

impl RoleManagementClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// GET /api/RoleManagement/user-by-email
    pub async fn user_by_email(&self, email: &str) -> Result<UserLookup, AuthError> {
        let builder = self
            .api
            .request(Method::GET, &format!("{}/user-by-email", BASE_PATH))
            .query(&[("email", email)]);
        self.api.execute_json(builder).await
    }

    /// POST /api/RoleManagement/assign
    pub async fn assign_role(&self, user_id: &str, role: Role) -> Result<(), AuthError> {
        let builder = self
            .api
            .request(Method::POST, &format!("{}/assign", BASE_PATH))
            .query(&[("userId", user_id), ("role", role.as_str())]);
        self.api.execute(builder).await?;
        Ok(())
    }

    /// POST /api/RoleManagement/remove
    pub async fn remove_role(&self, user_id: &str, role: Role) -> Result<(), AuthError> {
        let builder = self
            .api
            .request(Method::POST, &format!("{}/remove", BASE_PATH))
            .query(&[("userId", user_id), ("role", role.as_str())]);
        self.api.execute(builder).await?;
        Ok(())
    }

    /// GET /api/RoleManagement/user/{id}
    pub async fn user_roles(&self, user_id: &str) -> Result<Vec<Role>, AuthError> {
        let builder = self
            .api
            .request(Method::GET, &format!("{}/user/{}", BASE_PATH, user_id));
        self.api.execute_json(builder).await
    }

    /// GET /api/RoleManagement/check
    pub async fn is_user_in_role(&self, user_id: &str, role: Role) -> Result<bool, AuthError> {
        let builder = self
            .api
            .request(Method::GET, &format!("{}/check", BASE_PATH))
            .query(&[("userId", user_id), ("role", role.as_str())]);
        self.api.execute_json(builder).await
    }
}
