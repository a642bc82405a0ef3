use crate::AppState;
use axum::{extract::State, Json};
use serde_json::json;

/// Public API index
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API overview")
    ),
    tag = "public"
)]
pub async fn index(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Keygate - credential and token authority",
        "endpoints": {
            "/": "Public API index",
            "/health": "Liveness probe",
            "/auth/signup": "Register and receive a token (POST, JSON)",
            "/auth/login": "Exchange credentials for a token (POST, JSON)",
            "/auth/token": "OAuth2 password flow (POST, form-data)",
            "/secured": "Bearer-protected greeting",
            "/me": "Bearer-protected profile",
            "/resource": "Bearer-protected private resource",
            "/basic/whoami": "Basic-auth greeting",
            "/basic/me": "Basic-auth profile",
            "/basic/private": "Basic auth, role 'user' required",
            "/basic/admin": "Basic auth, role 'admin' required",
        },
        "registered_users": state.store.len(),
        "token_ttl_secs": state.auth.token_ttl(),
    }))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "public"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
