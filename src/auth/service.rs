use crate::store::UserStore;
use crate::types::{AppError, Claims, RejectionReason, Result, TokenResponse};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use std::sync::Arc;

/// Which half of a credential check failed.
///
/// Internal detail only: the default wire response collapses both cases
/// into one indistinguishable rejection so usernames cannot be enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownUser,
    WrongPassword,
}

/// The credential and token authority.
///
/// Owns the user store, verifies passwords against stored Argon2id hashes,
/// and issues/validates HS256 tokens. All operations are synchronous pure
/// computation plus in-memory lookups.
pub struct AuthService {
    store: Arc<UserStore>,
    secret: String,
    token_ttl: i64,
    revalidate_subject: bool,
    // Burned on lookups of unknown usernames so the miss is not cheaper
    // than a wrong-password check.
    decoy_hash: String,
}

impl AuthService {
    /// Creates a new authority.
    ///
    /// # Arguments
    /// * `store` - the user record store this authority answers for
    /// * `secret` - HS256 signing key (use at least 32 random bytes)
    /// * `token_ttl` - token validity in seconds
    /// * `revalidate_subject` - whether token verification re-checks that
    ///   the subject still resolves in the store
    pub fn new(
        store: Arc<UserStore>,
        secret: String,
        token_ttl: i64,
        revalidate_subject: bool,
    ) -> Result<Self> {
        let decoy_hash = hash_password("keygate-decoy-password")?;
        Ok(Self {
            store,
            secret,
            token_ttl,
            revalidate_subject,
            decoy_hash,
        })
    }

    /// Generates a fresh random signing secret (32 bytes, hex-encoded).
    ///
    /// Used when no secret is configured; tokens signed with it do not
    /// survive a restart.
    pub fn generate_secret() -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    pub fn token_ttl(&self) -> i64 {
        self.token_ttl
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Hashes a password using Argon2id.
    ///
    /// Returns a PHC-formatted hash string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        hash_password(password)
    }

    /// Verifies a password against an Argon2 hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("stored password hash is invalid".to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Checks a username/password pair against the store.
    ///
    /// Unknown usernames still pay for a full hash verification against a
    /// decoy hash, so a miss takes about as long as a wrong password.
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.verify_credentials_detailed(username, password).is_ok()
    }

    /// Like [`verify_credentials`](Self::verify_credentials) but keeps the
    /// two failure cases apart for deployments that opt into distinct
    /// login error messages.
    pub fn verify_credentials_detailed(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<(), CredentialFailure> {
        match self.store.get(username) {
            Some(user) => {
                if self.verify_password(password, &user.password_hash).unwrap_or(false) {
                    Ok(())
                } else {
                    Err(CredentialFailure::WrongPassword)
                }
            }
            None => {
                let _ = self.verify_password(password, &self.decoy_hash);
                Err(CredentialFailure::UnknownUser)
            }
        }
    }

    /// Issues a token for an already-verified subject using the configured TTL.
    pub fn mint(&self, subject: &str) -> Result<TokenResponse> {
        self.mint_with_ttl(subject, self.token_ttl)
    }

    /// Issues a token with an explicit TTL in seconds.
    ///
    /// A non-positive TTL produces an already-expired token; useful for
    /// exercising the expiry path.
    pub fn mint_with_ttl(&self, subject: &str, ttl_secs: i64) -> Result<TokenResponse> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| AppError::Internal("failed to sign token".to_string()))?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: ttl_secs,
        })
    }

    /// Validates a presented token: shape, then signature, then expiry.
    ///
    /// The signature check runs before any claim is trusted, so a tampered
    /// payload reports [`RejectionReason::BadSignature`] no matter what
    /// expiry it claims.
    pub fn verify_token(&self, token: &str) -> std::result::Result<Claims, RejectionReason> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is absolute; no grace window.
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => RejectionReason::Expired,
            ErrorKind::InvalidSignature => RejectionReason::BadSignature,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::MissingRequiredClaim(_) => RejectionReason::Malformed,
            _ => RejectionReason::BadSignature,
        })
    }

    /// Full bearer authentication: token validation plus, when configured,
    /// re-resolving the subject against the store.
    pub fn authenticate(&self, token: &str) -> std::result::Result<Claims, RejectionReason> {
        let claims = self.verify_token(token)?;
        if self.revalidate_subject && !self.store.contains(&claims.sub) {
            return Err(RejectionReason::UnknownSubject);
        }
        Ok(claims)
    }

    /// Whether the authenticated `username` carries `role`.
    pub fn authorize(&self, username: &str, role: &str) -> bool {
        self.store.authorize(username, role)
    }
}

/// Hashes a password using Argon2id with a fresh random salt.
///
/// Returns a PHC-formatted hash string suitable for `password_hash` fields
/// in the configuration.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal("failed to hash password".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Profile, UserRecord};
    use rstest::rstest;

    const TEST_SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

    fn seeded_store(auth_secret: &str) -> AuthService {
        let store = Arc::new(UserStore::new());
        let service = AuthService::new(store.clone(), auth_secret.to_string(), 600, true)
            .expect("should build service");

        for (username, password, roles) in [
            ("daniel", "datascientest", vec!["admin", "user"]),
            ("john", "secret", vec!["user"]),
        ] {
            store
                .insert(UserRecord {
                    username: username.to_string(),
                    password_hash: service.hash_password(password).unwrap(),
                    roles: roles.into_iter().map(String::from).collect(),
                    profile: Profile::default(),
                })
                .unwrap();
        }

        service
    }

    #[test]
    fn password_hash_is_phc_formatted_and_salted() {
        let service = seeded_store(TEST_SECRET);

        let hash = service.hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"), "hash should be in PHC format");

        // Fresh salt per call
        let again = service.hash_password("hunter2").unwrap();
        assert_ne!(hash, again);
    }

    #[rstest]
    #[case("daniel", "datascientest", true)]
    #[case("john", "secret", true)]
    #[case("daniel", "secret", false)]
    #[case("john", "wrong", false)]
    #[case("ghost", "datascientest", false)]
    fn credential_verification(#[case] username: &str, #[case] password: &str, #[case] ok: bool) {
        let service = seeded_store(TEST_SECRET);
        assert_eq!(service.verify_credentials(username, password), ok);
    }

    #[test]
    fn detailed_verification_separates_the_failure_cases() {
        let service = seeded_store(TEST_SECRET);

        assert_eq!(
            service.verify_credentials_detailed("ghost", "whatever"),
            Err(CredentialFailure::UnknownUser)
        );
        assert_eq!(
            service.verify_credentials_detailed("daniel", "wrong"),
            Err(CredentialFailure::WrongPassword)
        );
    }

    #[test]
    fn mint_then_authenticate_round_trips() {
        let service = seeded_store(TEST_SECRET);

        let token = service.mint("daniel").unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 600);

        let claims = service.authenticate(&token.access_token).unwrap();
        assert_eq!(claims.sub, "daniel");

        // Verification consumes nothing; a second pass gives the same answer.
        let claims = service.authenticate(&token.access_token).unwrap();
        assert_eq!(claims.sub, "daniel");
    }

    #[test]
    fn claims_carry_issue_and_expiry_times() {
        let service = seeded_store(TEST_SECRET);
        let token = service.mint("daniel").unwrap();
        let claims = service.verify_token(&token.access_token).unwrap();

        let now = Utc::now().timestamp() as usize;
        assert!(claims.iat <= now && claims.iat >= now - 5);
        assert!(claims.exp >= claims.iat + 595 && claims.exp <= claims.iat + 605);
    }

    #[test]
    fn token_from_a_different_secret_is_a_bad_signature() {
        let issuer = seeded_store("secret-one-that-is-32-chars-long");
        let verifier = seeded_store("secret-two-that-is-32-chars-long");

        let token = issuer.mint("daniel").unwrap();
        assert_eq!(
            verifier.verify_token(&token.access_token),
            Err(RejectionReason::BadSignature)
        );
    }

    #[rstest]
    #[case("garbage")]
    #[case("only.two")]
    #[case("...")]
    #[case("")]
    fn unparseable_tokens_are_malformed(#[case] token: &str) {
        let service = seeded_store(TEST_SECRET);
        assert_eq!(
            service.verify_token(token),
            Err(RejectionReason::Malformed)
        );
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let service = seeded_store(TEST_SECRET);

        let token = service.mint_with_ttl("daniel", -1).unwrap();
        assert_eq!(
            service.verify_token(&token.access_token),
            Err(RejectionReason::Expired)
        );
    }

    #[test]
    fn tampered_payload_is_a_bad_signature_not_expired() {
        let service = seeded_store(TEST_SECRET);

        // Even with a long-expired exp claim, a flipped payload byte must
        // surface as BadSignature: nothing in the payload is trusted before
        // the signature checks out.
        let token = service.mint_with_ttl("daniel", -1).unwrap().access_token;
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);

        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();

        let tampered = parts.join(".");
        assert_eq!(
            service.verify_token(&tampered),
            Err(RejectionReason::BadSignature)
        );
    }

    #[test]
    fn minted_subject_missing_from_store_is_unknown() {
        let service = seeded_store(TEST_SECRET);

        let token = service.mint("ghost").unwrap();
        assert!(service.verify_token(&token.access_token).is_ok());
        assert_eq!(
            service.authenticate(&token.access_token),
            Err(RejectionReason::UnknownSubject)
        );
    }

    #[test]
    fn expiry_outranks_the_subject_check() {
        let service = seeded_store(TEST_SECRET);

        let token = service.mint_with_ttl("ghost", -1).unwrap();
        assert_eq!(
            service.authenticate(&token.access_token),
            Err(RejectionReason::Expired)
        );
    }

    #[test]
    fn subject_revalidation_can_be_disabled() {
        let store = Arc::new(UserStore::new());
        let service =
            AuthService::new(store, TEST_SECRET.to_string(), 600, false).unwrap();

        let token = service.mint("ghost").unwrap();
        let claims = service.authenticate(&token.access_token).unwrap();
        assert_eq!(claims.sub, "ghost");
    }

    #[test]
    fn role_authorization_scenarios() {
        let service = seeded_store(TEST_SECRET);

        assert!(service.authorize("daniel", "admin"));
        assert!(service.authorize("daniel", "user"));
        assert!(service.authorize("john", "user"));
        assert!(!service.authorize("john", "admin"));
    }

    #[test]
    fn generated_secrets_are_long_and_distinct() {
        let a = AuthService::generate_secret();
        let b = AuthService::generate_secret();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
