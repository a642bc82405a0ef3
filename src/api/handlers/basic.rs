use crate::{
    auth::middleware::CurrentUser,
    types::{AppError, PublicUser, Result},
    AppState,
};
use axum::{extract::State, Extension, Json};
use serde_json::json;

/// Greeting after a per-request credential check
#[utoipa::path(
    get,
    path = "/basic/whoami",
    responses(
        (status = 200, description = "Credentials accepted"),
        (status = 401, description = "Missing or invalid credentials")
    ),
    tag = "basic",
    security(("basic" = []))
)]
pub async fn whoami(Extension(user): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(json!({ "message": format!("Hello, {}!", user.username) }))
}

/// Profile projection for the authenticated user
#[utoipa::path(
    get,
    path = "/basic/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = PublicUser),
        (status = 401, description = "Missing or invalid credentials")
    ),
    tag = "basic",
    security(("basic" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<PublicUser>> {
    let record = state.store.get(&user.username).ok_or_else(|| {
        AppError::Internal("authenticated user missing from the store".to_string())
    })?;
    Ok(Json(record.to_public()))
}

/// Private resource, requires role `user`
#[utoipa::path(
    get,
    path = "/basic/private",
    responses(
        (status = 200, description = "The caller's private resource"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Authenticated but lacking role 'user'")
    ),
    tag = "basic",
    security(("basic" = []))
)]
pub async fn private(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>> {
    let record = state.store.get(&user.username).ok_or_else(|| {
        AppError::Internal("authenticated user missing from the store".to_string())
    })?;

    Ok(Json(json!({
        "owner": record.username,
        "resource": record.profile.resource,
    })))
}

/// Admin-only greeting, requires role `admin`
#[utoipa::path(
    get,
    path = "/basic/admin",
    responses(
        (status = 200, description = "Caller holds the admin role"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Authenticated but lacking role 'admin'")
    ),
    tag = "basic",
    security(("basic" = []))
)]
pub async fn admin(Extension(user): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(json!({ "message": format!("Hello {}, you are an admin!", user.username) }))
}
