use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, loaded from `keygate.toml` with `KEYGATE__*`
/// environment overrides layered on top (e.g. `KEYGATE__AUTH__JWT_SECRET`).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Users registered at startup, before the server accepts requests.
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing key. When absent, an ephemeral secret is generated at
    /// startup and tokens do not survive a restart.
    pub jwt_secret: Option<String>,
    /// Token validity in seconds.
    pub token_ttl_secs: i64,
    /// Reject missing/invalid bearer tokens with 403 instead of 401.
    pub bearer_reject_forbidden: bool,
    /// Re-resolve the token subject against the store on every request.
    pub revalidate_subject: bool,
    /// Tell unknown-username and wrong-password apart in login responses.
    /// Off by default: distinct messages allow username enumeration.
    pub distinct_login_errors: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: 600,
            bearer_reject_forbidden: false,
            revalidate_subject: true,
            distinct_login_errors: false,
        }
    }
}

/// A user to register at startup.
///
/// Either `password` (hashed at load time) or a pre-computed
/// `password_hash` (see `keygate-server hash-password`) must be set.
/// `password_hash` wins when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
}

impl Config {
    /// Loads configuration from `path` (optional) plus the environment.
    pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(config::Environment::with_prefix("KEYGATE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_knobs() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.token_ttl_secs, 600);
        assert!(!config.auth.bearer_reject_forbidden);
        assert!(config.auth.revalidate_subject);
        assert!(!config.auth.distinct_login_errors);
        assert!(config.auth.jwt_secret.is_none());
        assert!(config.users.is_empty());
    }

    #[test]
    fn toml_with_seed_users_deserializes() {
        let toml = r#"
            [server]
            port = 9000

            [auth]
            jwt_secret = "0123456789abcdef0123456789abcdef"
            token_ttl_secs = 1800
            bearer_reject_forbidden = true

            [[users]]
            username = "daniel"
            password = "datascientest"
            roles = ["admin", "user"]
            name = "Daniel"

            [[users]]
            username = "john"
            password_hash = "$argon2id$placeholder"
            roles = ["user"]
        "#;

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.token_ttl_secs, 1800);
        assert!(config.auth.bearer_reject_forbidden);
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[0].roles, vec!["admin", "user"]);
        assert!(config.users[1].password.is_none());
        assert!(config.users[1].password_hash.is_some());
    }
}
