use crate::{
    auth::middleware::AuthUser,
    types::{AppError, PublicUser, RejectionReason, Result},
    AppState,
};
use axum::{extract::State, Json};
use serde_json::json;

/// Greeting for a valid token holder
#[utoipa::path(
    get,
    path = "/secured",
    responses(
        (status = 200, description = "Token accepted"),
        (status = 401, description = "Missing, invalid, or expired token")
    ),
    tag = "protected",
    security(("bearer" = []))
)]
pub async fn secured(AuthUser(claims): AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("Hello {}! This route required a valid token.", claims.sub)
    }))
}

/// Profile of the token subject
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = PublicUser),
        (status = 401, description = "Missing, invalid, or expired token")
    ),
    tag = "protected",
    security(("bearer" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>> {
    let user = state
        .store
        .get(&claims.sub)
        .ok_or(AppError::TokenRejected(RejectionReason::UnknownSubject))?;
    Ok(Json(user.to_public()))
}

/// The subject's private resource string
#[utoipa::path(
    get,
    path = "/resource",
    responses(
        (status = 200, description = "Resource and owner"),
        (status = 401, description = "Missing, invalid, or expired token")
    ),
    tag = "protected",
    security(("bearer" = []))
)]
pub async fn resource(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<serde_json::Value>> {
    let user = state
        .store
        .get(&claims.sub)
        .ok_or(AppError::TokenRejected(RejectionReason::UnknownSubject))?;

    Ok(Json(json!({
        "owner": user.username,
        "resource": user.profile.resource,
    })))
}
