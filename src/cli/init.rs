//! Init command implementation
//!
//! Scaffolds a `keygate.toml` configuration file with documented knobs and
//! two example users matching the defaults used throughout the test suite.

use crate::cli::output::Output;
use anyhow::Context;
use std::path::Path;

const SAMPLE_CONFIG: &str = r#"# Keygate configuration
#
# Every value here can be overridden from the environment with a
# KEYGATE__ prefix and __ as the section separator, e.g.
#   KEYGATE__AUTH__JWT_SECRET=...
#   KEYGATE__SERVER__PORT=9000

[server]
host = "127.0.0.1"
port = 8000

[auth]
# HS256 signing key. Generate one with: openssl rand -hex 32
# When unset, an ephemeral secret is generated at startup and issued
# tokens will not survive a restart.
#jwt_secret = ""

# Token validity in seconds.
token_ttl_secs = 600

# Reject missing/invalid bearer tokens with 403 instead of 401.
bearer_reject_forbidden = false

# Re-check that the token subject still exists on every request.
revalidate_subject = true

# Tell unknown-username and wrong-password apart in login responses.
# Leave off unless you accept that usernames can be enumerated.
distinct_login_errors = false

# Users registered at startup. Plaintext `password` values are hashed at
# load time and never kept; prefer `password_hash` in committed files
# (generate one with: keygate-server hash-password <password>).

[[users]]
username = "daniel"
password = "datascientest"
roles = ["admin", "user"]
name = "Daniel"
email = "daniel@example.com"
resource = "daniel's private notes"

[[users]]
username = "john"
password = "secret"
roles = ["user"]
name = "John"
email = "john@example.com"
resource = "john's private notes"
"#;

/// Writes the sample configuration into `path`.
pub fn run(path: &Path, force: bool, output: &Output) -> anyhow::Result<()> {
    let target = path.join("keygate.toml");

    if target.exists() && !force {
        output.error(&format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        ));
        anyhow::bail!("refusing to overwrite existing configuration");
    }

    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    std::fs::write(&target, SAMPLE_CONFIG)
        .with_context(|| format!("failed to write {}", target.display()))?;

    output.created("config", &target.display().to_string());
    output.info("review the seed users and set auth.jwt_secret before deploying");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_deserializes() {
        let config: keygate::Config = config::Config::builder()
            .add_source(config::File::from_str(
                SAMPLE_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[0].username, "daniel");
        assert!(config.auth.jwt_secret.is_none());
    }
}
