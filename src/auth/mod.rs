//! Credential verification, token issuance, and route protection.
//!
//! This module is the authority every route family defers to: it owns the
//! user store, verifies plaintext passwords against Argon2 hashes, mints
//! HS256-signed tokens with an absolute expiry, and validates presented
//! tokens in a fixed order (shape, signature, expiry, subject).
//!
//! # Module Structure
//!
//! - [`auth::service`](crate::auth::service) - password hashing plus token mint/verify
//! - [`auth::middleware`](crate::auth::middleware) - Axum layers and extractors for
//!   the bearer, Basic, and role-guarded route families
//!
//! # Security Notes
//!
//! - **Password Hashing**: Argon2id (memory-hard); comparison is delegated to
//!   the hash library and is constant-time at that level.
//! - **Tokens**: stateless HS256 JWTs. The payload is integrity-protected,
//!   not encrypted - anyone can read it without the secret, so nothing
//!   beyond the subject identifier goes in.
//! - The signing secret is fixed at startup and never derived from request
//!   state. Plaintext passwords, stored hashes, and raw tokens never appear
//!   in logs or error messages.
//!
//! # Usage
//!
//! ```ignore
//! use keygate::auth::service::AuthService;
//!
//! let auth = AuthService::new(store, secret, 600, true)?;
//! let token = auth.mint("daniel")?;
//! let claims = auth.authenticate(&token.access_token)?;
//! ```

/// Password hashing and token mint/verify.
pub mod service;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
