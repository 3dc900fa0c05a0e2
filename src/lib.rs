//! # Syllabus Client Library
//!
//! Client library for the Syllabus course administration platform.
//!
//! ## Features
//!
//! - **Session Model**: persisted authentication sessions that survive restarts
//! - **Auth Operations**: register, login, password and profile flows
//! - **Access Control**: role predicates and two-gate route guarding
//! - **Role Administration**: administrator role management endpoints
//!
//! ## Usage
//!
//! ```rust,no_run
//! use syllabus_client::{
//!     auth::{AuthGateway, SessionHandle, TokenStore},
//!     client::ApiClient,
//!     config::ClientConfig,
//! };
//!
//! let config = ClientConfig::from_env();
//! let session = SessionHandle::new(TokenStore::new(config.session_file));
//! let gateway = AuthGateway::new(ApiClient::new(config.api_url, session));
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Administrator features
pub mod admin;

/// Authentication and authorization
pub mod auth;

/// Authenticated HTTP plumbing
pub mod client;

/// Connection and storage settings
pub mod config;

/// Logger setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use auth::{
    AuthError, AuthGateway, AuthSession, GuardDecision, Role, RouteGuard, SessionHandle,
    TokenStore, User,
};
pub use client::ApiClient;
pub use config::ClientConfig;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AuthError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
