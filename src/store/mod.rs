//! In-memory user record store.
//!
//! Holds the registered users for the lifetime of the process. The store is
//! seeded from configuration at startup and afterwards only mutated by the
//! signup endpoint. Nothing is persisted; a restart resets the store.
//!
//! The store is an explicit object injected into handlers through the
//! application state, never a process-wide singleton, so tests can build
//! isolated instances freely.

use crate::types::{AppError, PublicUser, Result};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

/// A registered user.
///
/// `password_hash` is a PHC-formatted Argon2 string. It must not leave the
/// store through any read path; use [`UserRecord::to_public`] for responses.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub roles: BTreeSet<String>,
    pub profile: Profile,
}

/// Display attributes attached to a user. All optional; the hash never
/// lives here.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resource: Option<String>,
}

impl UserRecord {
    /// Projects the record into its response shape, dropping the hash.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            username: self.username.clone(),
            roles: self.roles.iter().cloned().collect(),
            name: self.profile.name.clone(),
            email: self.profile.email.clone(),
            resource: self.profile.resource.clone(),
        }
    }
}

/// Concurrent map from username to [`UserRecord`].
///
/// Reads take the shared lock; the only write path (signup) takes the
/// exclusive lock, so concurrent signups serialize and a reader never
/// observes a half-written record.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record, rejecting duplicates.
    ///
    /// The existence check and the insert happen under one write lock so two
    /// concurrent signups for the same username cannot both succeed.
    pub fn insert(&self, record: UserRecord) -> Result<()> {
        let mut users = self.users.write();
        if users.contains_key(&record.username) {
            return Err(AppError::InvalidInput(format!(
                "user '{}' already exists",
                record.username
            )));
        }
        users.insert(record.username.clone(), record);
        Ok(())
    }

    pub fn get(&self, username: &str) -> Option<UserRecord> {
        self.users.read().get(username).cloned()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.read().contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Whether `username` exists and carries `role`.
    ///
    /// Callers must only reach this after authentication; a `false` here
    /// maps to Forbidden, not Unauthorized.
    pub fn authorize(&self, username: &str, role: &str) -> bool {
        self.users
            .read()
            .get(username)
            .map(|u| u.roles.contains(role))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, roles: &[&str]) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            password_hash: "$argon2id$dummy".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            profile: Profile::default(),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let store = UserStore::new();
        store.insert(record("daniel", &["admin", "user"])).unwrap();

        let fetched = store.get("daniel").expect("should exist");
        assert_eq!(fetched.username, "daniel");
        assert!(fetched.roles.contains("admin"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let store = UserStore::new();
        store.insert(record("daniel", &[])).unwrap();

        let err = store.insert(record("daniel", &[])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn authorize_checks_role_membership() {
        let store = UserStore::new();
        store.insert(record("daniel", &["admin", "user"])).unwrap();
        store.insert(record("john", &["user"])).unwrap();

        assert!(store.authorize("daniel", "admin"));
        assert!(store.authorize("john", "user"));
        assert!(!store.authorize("john", "admin"));
        assert!(!store.authorize("ghost", "user"));
    }

    #[test]
    fn public_projection_excludes_the_hash() {
        let mut rec = record("daniel", &["user"]);
        rec.profile.name = Some("Daniel".to_string());
        rec.profile.resource = Some("daniel's notes".to_string());

        let public = rec.to_public();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("hash"));
        assert!(json.contains("daniel's notes"));
    }

    #[test]
    fn concurrent_signups_for_distinct_users_all_land() {
        use std::sync::Arc;

        let store = Arc::new(UserStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.insert(record(&format!("user-{i}"), &["user"])).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 8);
    }
}
