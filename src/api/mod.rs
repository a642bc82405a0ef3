//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Keygate, built on the Axum web
//! framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Public
//! - `GET /` - API index (endpoint list, registered user count, token TTL)
//! - `GET /health` - Liveness probe
//!
//! ## Credential exchange (`/auth`)
//! - `POST /auth/signup` - Register a user and receive a token (JSON body)
//! - `POST /auth/login` - Exchange credentials for a token (JSON body)
//! - `POST /auth/token` - OAuth2 password flow (form body)
//!
//! ## Bearer-protected
//! - `GET /secured` - Greeting for a valid token holder
//! - `GET /me` - Profile of the token subject (never includes the hash)
//! - `GET /resource` - The subject's private resource string
//!
//! ## Basic-auth-protected (`/basic`)
//! - `GET /basic/whoami` - Greeting after a per-request credential check
//! - `GET /basic/me` - Profile projection
//! - `GET /basic/private` - Requires role `user`
//! - `GET /basic/admin` - Requires role `admin`
//!
//! # Authentication
//!
//! Bearer routes expect `Authorization: Bearer <token>`; Basic routes expect
//! `Authorization: Basic <base64 username:password>`. Whether a bearer
//! rejection surfaces as 401 or 403 is a deployment choice
//! (`auth.bearer_reject_forbidden`).
//!
//! # OpenAPI Documentation
//!
//! The schema is served at `/api-docs/openapi.json`. When the `swagger-ui`
//! feature is enabled, interactive documentation is available at `/docs`.

use crate::types::{Credentials, PublicUser, TokenForm, TokenResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

/// OpenAPI description of the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::public::index,
        handlers::public::health,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::issue_token,
        handlers::protected::secured,
        handlers::protected::me,
        handlers::protected::resource,
        handlers::basic::whoami,
        handlers::basic::me,
        handlers::basic::private,
        handlers::basic::admin,
    ),
    components(schemas(Credentials, TokenForm, TokenResponse, PublicUser)),
    modifiers(&SecurityAddon),
    tags(
        (name = "public", description = "Unauthenticated endpoints"),
        (name = "auth", description = "Credential exchange endpoints"),
        (name = "protected", description = "Bearer-token protected endpoints"),
        (name = "basic", description = "HTTP Basic protected endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
