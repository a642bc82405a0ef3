//! # Keygate - Credential & Token Authority
//!
//! A small authentication server built in Rust: Argon2id password
//! verification, HS256 token issuance with absolute expiry, and route
//! protection over three transport flavors - HTTP Basic, bearer tokens,
//! and the OAuth2 password flow.
//!
//! ## Overview
//!
//! Keygate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `keygate-server` binary
//! 2. **As a library** - Embed the authority in your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! keygate-server = "0.3"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use keygate::{AppState, Config};
//!
//! let state = AppState::from_config(Config::default())?;
//! let token = state.auth.mint("daniel")?;
//! let claims = state.auth.authenticate(&token.access_token)?;
//! ```
//!
//! ### Running the HTTP surface
//!
//! ```rust,ignore
//! use keygate::{api, AppState, Config};
//!
//! let config = Config::load(std::path::Path::new("keygate.toml"))?;
//! let state = AppState::from_config(config)?;
//! let app = api::routes::create_router(state);
//! // hand `app` to axum::serve
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Interactive API documentation at `/docs` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Credential verification, token mint/verify, middleware
//! - [`store`] - In-memory user record store
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration loading
//!
//! ## Architecture
//!
//! All state is explicit: the store and the authority are built once at
//! startup from configuration and injected into handlers through
//! [`AppState`]. Nothing is persisted - a restart resets the store, and
//! tokens outlive it only if `auth.jwt_secret` is pinned in configuration.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Credential verification, token issuance, and route protection.
pub mod auth;
/// In-memory user record store.
pub mod store;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::service::AuthService;
pub use store::{Profile, UserRecord, UserStore};
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Deployment configuration. The signing secret is moved out into the
    /// authority at build time and is not readable from here.
    pub config: Arc<Config>,
    /// User record store
    pub store: Arc<UserStore>,
    /// Credential and token authority
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Builds the full application state from configuration: resolves the
    /// signing secret, constructs the authority, and seeds the store.
    pub fn from_config(mut config: Config) -> Result<Self> {
        let secret = config.auth.jwt_secret.take().unwrap_or_else(|| {
            tracing::warn!(
                "no jwt_secret configured; using an ephemeral secret - tokens will not survive a restart"
            );
            AuthService::generate_secret()
        });

        let store = Arc::new(UserStore::new());
        let auth = AuthService::new(
            store.clone(),
            secret,
            config.auth.token_ttl_secs,
            config.auth.revalidate_subject,
        )?;

        for seed in &config.users {
            let password_hash = match (&seed.password_hash, &seed.password) {
                (Some(hash), _) => hash.clone(),
                (None, Some(password)) => auth.hash_password(password)?,
                (None, None) => {
                    return Err(AppError::InvalidInput(format!(
                        "seed user '{}' needs either password or password_hash",
                        seed.username
                    )))
                }
            };

            store.insert(UserRecord {
                username: seed.username.clone(),
                password_hash,
                roles: seed.roles.iter().cloned().collect(),
                profile: Profile {
                    name: seed.name.clone(),
                    email: seed.email.clone(),
                    resource: seed.resource.clone(),
                },
            })?;
        }

        tracing::info!(users = store.len(), "authority initialized");

        Ok(Self {
            config: Arc::new(config),
            store,
            auth: Arc::new(auth),
        })
    }
}
