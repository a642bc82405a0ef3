//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by route family.

/// Credential exchange handlers (signup, login, OAuth2 token).
pub mod auth;
/// Basic-auth protected handlers, including the role-guarded routes.
pub mod basic;
/// Bearer-token protected handlers.
pub mod protected;
/// Unauthenticated handlers (index, health).
pub mod public;
