//! Role extraction from bearer tokens
//!
//! The payload of a JWT is decoded without signature verification: the
//! client only reads role hints for display and routing, enforcement is
//! the server's job. Tokens that are not JWTs, or carry no role claim,
//! fall back to the roles listed in the response body.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

use super::models::Role;

/// Role claim value, emitted as a single label or an array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Claim names accepted for roles: `roles`, `role`, and the claim URI
/// ASP.NET Identity emits
#[derive(Debug, Deserialize)]
struct TokenPayload {
    #[serde(
        default,
        alias = "role",
        alias = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role"
    )]
    roles: Option<OneOrMany>,
}

/// Decode the role claim from a JWT payload, if the token carries one.
///
/// Returns `None` when the token is not a JWT, the payload does not parse,
/// or no role claim is present. Unknown role labels are skipped.
pub fn decode_role_claims(token: &str) -> Option<Vec<Role>> {
    if token.split('.').count() != 3 {
        return None;
    }
    let payload = token.split('.').nth(1)?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let payload: TokenPayload = serde_json::from_slice(&bytes).ok()?;

    payload.roles.map(|claim| {
        claim
            .into_vec()
            .iter()
            .filter_map(|label| Role::from_str(label))
            .collect()
    })
}

/// Resolve the effective role set: token claim first, response body second,
/// empty set when neither is present.
pub fn merge_roles(token: &str, body_roles: Option<Vec<Role>>) -> Vec<Role> {
    decode_role_claims(token)
        .or(body_roles)
        .unwrap_or_default()
}
