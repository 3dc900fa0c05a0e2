//! Authenticated HTTP plumbing shared by every backend client
//!
//! Outgoing requests pick up the bearer token from the token store when
//! one exists. Responses are classified into the error taxonomy once,
//! here; a 401 from any endpoint logs the session out before the error
//! reaches the caller, so a stale token can never loop.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::auth::error::AuthError;
use crate::auth::session::SessionHandle;

/// Error body shapes the backend emits: RFC 7807 problem details
/// (`title`/`detail`) or a plain `message` envelope
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// HTTP client bound to one backend and one session
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionHandle) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with the bearer token attached when one is stored
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);

        match self.session.store().token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and classify the outcome.
    ///
    /// Any 401 resets the session and clears the token store before the
    /// error is returned, regardless of which endpoint was called.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, AuthError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail.or(body.message).or(body.title));

        if status == StatusCode::UNAUTHORIZED {
            log::debug!("401 received, forcing logout");
            self.session.logout();
        }

        Err(classify_status(status.as_u16(), detail))
    }

    /// Send a request and decode a JSON body on success
    pub(crate) async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, AuthError> {
        let response = self.execute(builder).await?;
        let status = response.status().as_u16();

        response.json().await.map_err(|e| AuthError::Unknown {
            status,
            message: Some(format!("invalid response body: {}", e)),
        })
    }
}

/// Map an HTTP error status to the error taxonomy
pub(crate) fn classify_status(status: u16, detail: Option<String>) -> AuthError {
    match status {
        400 => {
            let is_duplicate = detail
                .as_deref()
                .map(|d| d.to_lowercase().contains("conflict"))
                .unwrap_or(false);
            if is_duplicate {
                AuthError::Conflict(detail)
            } else {
                AuthError::Validation(detail)
            }
        }
        401 => AuthError::Authentication,
        409 => AuthError::Conflict(detail),
        500..=599 => AuthError::Server(detail),
        _ => AuthError::Unknown {
            status,
            message: detail,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_classify_by_status() {
        assert_matches!(classify_status(400, None), AuthError::Validation(None));
        assert_matches!(classify_status(401, None), AuthError::Authentication);
        assert_matches!(classify_status(409, None), AuthError::Conflict(_));
        assert_matches!(classify_status(500, None), AuthError::Server(_));
        assert_matches!(classify_status(503, None), AuthError::Server(_));
        assert_matches!(
            classify_status(404, None),
            AuthError::Unknown { status: 404, .. }
        );
    }

    #[test]
    fn test_400_with_conflict_detail_is_conflict() {
        let err = classify_status(400, Some("Email conflict detected".to_string()));
        assert_matches!(err, AuthError::Conflict(_));

        let err = classify_status(400, Some("validation failed".to_string()));
        assert_matches!(err, AuthError::Validation(_));
    }
}
