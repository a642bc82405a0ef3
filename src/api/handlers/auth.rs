use crate::{
    auth::service::CredentialFailure,
    store::{Profile, UserRecord},
    types::{AppError, Credentials, Result, TokenForm, TokenResponse},
    AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

/// Register a new user and issue a token
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = Credentials,
    responses(
        (status = 200, description = "User registered, token issued", body = TokenResponse),
        (status = 400, description = "Invalid input or username already taken")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<TokenResponse>> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "username and password are required".to_string(),
        ));
    }

    let password_hash = state.auth.hash_password(&payload.password)?;
    state.store.insert(UserRecord {
        username: payload.username.clone(),
        password_hash,
        roles: ["user".to_string()].into_iter().collect(),
        profile: Profile::default(),
    })?;

    tracing::info!(username = %payload.username, "user registered");
    Ok(Json(state.auth.mint(&payload.username)?))
}

/// Exchange credentials for a token
///
/// By default unknown-username and wrong-password produce identical
/// responses; `auth.distinct_login_errors` tells them apart in the body
/// (the status stays 401 either way).
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Response {
    match state
        .auth
        .verify_credentials_detailed(&payload.username, &payload.password)
    {
        Ok(()) => {
            tracing::info!(username = %payload.username, "login succeeded");
            match state.auth.mint(&payload.username) {
                Ok(token) => Json(token).into_response(),
                Err(err) => err.into_response(),
            }
        }
        Err(failure) => {
            tracing::debug!(username = %payload.username, "login rejected");
            let message = if state.config.auth.distinct_login_errors {
                match failure {
                    CredentialFailure::UnknownUser => "unknown username",
                    CredentialFailure::WrongPassword => "wrong password",
                }
            } else {
                "invalid username or password"
            };
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response()
        }
    }
}

/// OAuth2 password flow: form-encoded credentials for a bearer token
///
/// Note the content type: this endpoint takes form-data, not JSON, and a
/// credential failure here is a 400 per the password-flow convention.
#[utoipa::path(
    post,
    path = "/auth/token",
    request_body(content = TokenForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Incorrect username or password")
    ),
    tag = "auth"
)]
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>> {
    if !state.auth.verify_credentials(&form.username, &form.password) {
        tracing::debug!(username = %form.username, "token request rejected");
        return Err(AppError::InvalidInput(
            "incorrect username or password".to_string(),
        ));
    }

    tracing::info!(username = %form.username, "token issued");
    Ok(Json(state.auth.mint(&form.username)?))
}
