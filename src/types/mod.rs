use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Username/password pair submitted to the signup and login endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// OAuth2 password-flow form body (`application/x-www-form-urlencoded`).
///
/// Only `username` and `password` are evaluated; the remaining fields are
/// accepted for wire compatibility with standard OAuth2 clients.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Projection of a user record for read paths. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub username: String,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

// ============= Error Types =============

/// Why a presented token was refused.
///
/// The variants are listed the way the checks run: a token that fails an
/// earlier check never reaches a later one, so a tampered payload reports
/// `BadSignature` regardless of what expiry it claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Not three dot-separated base64url segments, or claims do not parse.
    Malformed,
    /// Recomputed signature does not match the presented one.
    BadSignature,
    /// Signature is valid but `exp` has passed.
    Expired,
    /// Signature and expiry are fine but the subject is not in the store.
    UnknownSubject,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::Malformed => write!(f, "malformed token"),
            RejectionReason::BadSignature => write!(f, "invalid signature"),
            RejectionReason::Expired => write!(f, "expired token"),
            RejectionReason::UnknownSubject => write!(f, "unknown subject"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown user or wrong password. The two cases are deliberately not
    /// distinguishable through this variant.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token rejected: {0}")]
    TokenRejected(RejectionReason),

    /// Authenticated, but the identity lacks the required role.
    #[error("missing required role: {0}")]
    InsufficientRole(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidCredentials => {
                (axum::http::StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::TokenRejected(_) => {
                (axum::http::StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::InsufficientRole(_) => {
                (axum::http::StatusCode::FORBIDDEN, self.to_string())
            }
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_serializes_a_hash_field() {
        let user = PublicUser {
            username: "daniel".to_string(),
            roles: vec!["admin".to_string(), "user".to_string()],
            name: Some("Daniel".to_string()),
            email: None,
            resource: None,
        };

        let json = serde_json::to_value(&user).expect("should serialize");
        let keys: Vec<&str> = json
            .as_object()
            .expect("should be an object")
            .keys()
            .map(|k| k.as_str())
            .collect();

        assert!(keys.contains(&"username"));
        assert!(keys.contains(&"roles"));
        assert!(keys.contains(&"name"));
        assert!(!keys.iter().any(|k| k.contains("password")));
        assert!(!keys.iter().any(|k| k.contains("hash")));
    }

    #[test]
    fn rejection_reasons_render_without_token_material() {
        for reason in [
            RejectionReason::Malformed,
            RejectionReason::BadSignature,
            RejectionReason::Expired,
            RejectionReason::UnknownSubject,
        ] {
            let rendered = reason.to_string();
            assert!(!rendered.is_empty());
            assert!(!rendered.contains('.'), "must not echo token segments");
        }
    }
}
