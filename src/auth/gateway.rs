//! Authentication operations against the REST backend
//!
//! Every operation runs the same sequence: clear the previous error, raise
//! the fetching flag, call the endpoint, apply the result to the session,
//! then drop the flag whether the call succeeded or failed. Failures are
//! mapped to a user-facing message, stored in the session, and returned to
//! the caller so forms can react locally as well.

use reqwest::Method;

use super::claims::merge_roles;
use super::error::AuthError;
use super::models::{
    AuthResponse, ChangePasswordRequest, ChangePasswordResponse, ForgotPasswordRequest,
    LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
    UpdateProfileResponse, User,
};
use super::session::SessionHandle;
use crate::client::ApiClient;

const NETWORK_MESSAGE: &str = "No response from server. Please check your internet connection.";
const SERVER_MESSAGE: &str = "Server error. Please try again later.";

/// Client for the `/auth` endpoints
#[derive(Clone)]
pub struct AuthGateway {
    api: ApiClient,
}

impl AuthGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &SessionHandle {
        self.api.session()
    }

    /// POST /auth/register - create an account and open a session
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        self.begin();
        let result = self.register_inner(request).await;
        self.settle(result, register_message)
    }

    async fn register_inner(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        let response: AuthResponse = self
            .api
            .execute_json(self.api.request(Method::POST, "/auth/register").json(request))
            .await?;

        self.session().set_user(Some(user_from_auth(&response)));
        Ok(response)
    }

    /// POST /auth/login - open a session with email and password
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        self.begin();
        let result = self.login_inner(request).await;
        self.settle(result, login_message)
    }

    async fn login_inner(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        let response: AuthResponse = self
            .api
            .execute_json(self.api.request(Method::POST, "/auth/login").json(request))
            .await?;

        self.session().set_user(Some(user_from_auth(&response)));
        Ok(response)
    }

    /// Drop the session and remove the persisted record
    pub fn logout(&self) {
        self.session().logout();
    }

    /// PUT /auth/profile - update the signed-in user's profile.
    ///
    /// The response carries neither token nor roles; both are kept from the
    /// current session.
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, AuthError> {
        self.begin();
        let result = self.update_profile_inner(request).await;
        self.settle(result, update_profile_message)
    }

    async fn update_profile_inner(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, AuthError> {
        let response: UpdateProfileResponse = self
            .api
            .execute_json(self.api.request(Method::PUT, "/auth/profile").json(request))
            .await?;

        if let Some(current) = self.session().snapshot().user {
            self.session().set_user(Some(User {
                id: response.id.clone(),
                first_name: response.first_name.clone(),
                last_name: response.last_name.clone(),
                email: response.email.clone(),
                token: current.token,
                roles: current.roles,
                phone_prefix: Some(response.phone_prefix.clone()),
                phone_number: Some(response.phone_number.clone()),
            }));
        }

        Ok(response)
    }

    /// POST /auth/change-password - no session mutation on success
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<ChangePasswordResponse, AuthError> {
        self.begin();
        let result = self
            .api
            .execute_json(
                self.api
                    .request(Method::POST, "/auth/change-password")
                    .json(request),
            )
            .await;
        self.settle(result, change_password_message)
    }

    /// POST /auth/forgot-password - request a reset email
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<MessageResponse, AuthError> {
        self.begin();
        let result = self
            .api
            .execute_json(
                self.api
                    .request(Method::POST, "/auth/forgot-password")
                    .json(request),
            )
            .await;
        self.settle(result, forgot_password_message)
    }

    /// POST /auth/reset-password - redeem a reset token
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<MessageResponse, AuthError> {
        self.begin();
        let result = self
            .api
            .execute_json(
                self.api
                    .request(Method::POST, "/auth/reset-password")
                    .json(request),
            )
            .await;
        self.settle(result, reset_password_message)
    }

    fn begin(&self) {
        self.session().set_error(None);
        self.session().set_fetching(true);
    }

    /// Store the mapped message on failure, then drop the fetching flag on
    /// both paths and hand the result back to the caller.
    fn settle<T>(
        &self,
        result: Result<T, AuthError>,
        message: fn(&AuthError) -> String,
    ) -> Result<T, AuthError> {
        let result = result.map_err(|err| {
            self.session().set_error(Some(message(&err)));
            err
        });
        self.session().set_fetching(false);
        result
    }
}

fn user_from_auth(response: &AuthResponse) -> User {
    User {
        id: response.id.clone(),
        first_name: response.first_name.clone(),
        last_name: response.last_name.clone(),
        email: response.email.clone(),
        token: response.token.clone(),
        roles: merge_roles(&response.token, response.roles.clone()),
        phone_prefix: None,
        phone_number: None,
    }
}

fn fallback(err: &AuthError, default: &str) -> String {
    err.server_message().unwrap_or(default).to_string()
}

fn register_message(err: &AuthError) -> String {
    match err {
        AuthError::Conflict(_) => {
            "This email is already registered. Please use a different email or try logging in."
                .to_string()
        }
        AuthError::Validation(detail) => {
            let mentions_validation = detail
                .as_deref()
                .map(|d| d.to_lowercase().contains("validation"))
                .unwrap_or(false);
            if mentions_validation {
                "Please check your input. All fields are required and password must be at least 8 characters."
                    .to_string()
            } else {
                detail
                    .clone()
                    .unwrap_or_else(|| "Invalid registration data. Please check your input.".to_string())
            }
        }
        AuthError::Server(_) => SERVER_MESSAGE.to_string(),
        AuthError::Network(_) => NETWORK_MESSAGE.to_string(),
        _ => fallback(err, "Registration failed. Please try again."),
    }
}

fn login_message(err: &AuthError) -> String {
    match err {
        AuthError::Authentication => "Invalid email or password. Please try again.".to_string(),
        AuthError::Validation(_) => {
            "Please check your input. Email and password are required.".to_string()
        }
        AuthError::Server(_) => SERVER_MESSAGE.to_string(),
        AuthError::Network(_) => NETWORK_MESSAGE.to_string(),
        _ => fallback(err, "Login failed. Please try again."),
    }
}

fn update_profile_message(err: &AuthError) -> String {
    match err {
        AuthError::Validation(_) => "Please check your input. All fields are required.".to_string(),
        AuthError::Authentication => "Your session has expired. Please log in again.".to_string(),
        AuthError::Server(_) => SERVER_MESSAGE.to_string(),
        AuthError::Network(_) => NETWORK_MESSAGE.to_string(),
        _ => fallback(err, "Profile update failed. Please try again."),
    }
}

fn change_password_message(err: &AuthError) -> String {
    match err {
        AuthError::Validation(_) => "Please check your input. All fields are required.".to_string(),
        AuthError::Authentication => "Current password is incorrect.".to_string(),
        AuthError::Server(_) => SERVER_MESSAGE.to_string(),
        AuthError::Network(_) => NETWORK_MESSAGE.to_string(),
        _ => fallback(err, "Password change failed. Please try again."),
    }
}

fn forgot_password_message(err: &AuthError) -> String {
    match err {
        AuthError::Unknown { status: 404, .. } => {
            "No account found with this email address.".to_string()
        }
        AuthError::Validation(_) => "Please enter a valid email address.".to_string(),
        AuthError::Server(_) => SERVER_MESSAGE.to_string(),
        AuthError::Network(_) => NETWORK_MESSAGE.to_string(),
        _ => fallback(err, "Failed to send reset email. Please try again."),
    }
}

fn reset_password_message(err: &AuthError) -> String {
    fallback(err, "Failed to reset password")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_messages() {
        assert_eq!(
            login_message(&AuthError::Authentication),
            "Invalid email or password. Please try again."
        );
        assert_eq!(
            login_message(&AuthError::Validation(None)),
            "Please check your input. Email and password are required."
        );
        assert_eq!(login_message(&AuthError::Server(None)), SERVER_MESSAGE);
        assert_eq!(
            login_message(&AuthError::Network("timed out".to_string())),
            NETWORK_MESSAGE
        );
        // Unmapped statuses fall back to the server message when present
        assert_eq!(
            login_message(&AuthError::Unknown {
                status: 418,
                message: Some("teapot".to_string()),
            }),
            "teapot"
        );
    }

    #[test]
    fn test_register_messages() {
        assert_eq!(
            register_message(&AuthError::Conflict(None)),
            "This email is already registered. Please use a different email or try logging in."
        );
        assert_eq!(
            register_message(&AuthError::Validation(Some(
                "validation failed for password".to_string()
            ))),
            "Please check your input. All fields are required and password must be at least 8 characters."
        );
        // A plain 400 detail is surfaced as-is
        assert_eq!(
            register_message(&AuthError::Validation(Some("phone prefix required".to_string()))),
            "phone prefix required"
        );
        assert_eq!(
            register_message(&AuthError::Validation(None)),
            "Invalid registration data. Please check your input."
        );
    }

    #[test]
    fn test_password_flow_messages() {
        assert_eq!(
            change_password_message(&AuthError::Authentication),
            "Current password is incorrect."
        );
        assert_eq!(
            forgot_password_message(&AuthError::Unknown {
                status: 404,
                message: None,
            }),
            "No account found with this email address."
        );
        assert_eq!(
            forgot_password_message(&AuthError::Validation(None)),
            "Please enter a valid email address."
        );
        assert_eq!(
            reset_password_message(&AuthError::Server(None)),
            "Failed to reset password"
        );
    }

    #[test]
    fn test_user_from_auth_merges_roles_from_body() {
        use crate::auth::models::Role;

        let response = AuthResponse {
            id: "u1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            token: "opaque-token".to_string(),
            roles: Some(vec![Role::Student]),
        };

        let user = user_from_auth(&response);
        assert_eq!(user.roles, vec![Role::Student]);
        assert_eq!(user.token, "opaque-token");
    }
}
