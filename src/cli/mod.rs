//! CLI module for Keygate
//!
//! Provides command-line interface parsing and handling for the
//! keygate-server binary. Uses clap for argument parsing and owo-colors
//! for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keygate - Credential & Token Authority
#[derive(Parser, Debug)]
#[command(
    name = "keygate-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Keygate - credential and token authority",
    long_about = "An authentication server: Argon2id password verification, HS256 token\n\
                  issuance, and route protection over HTTP Basic, bearer tokens, and the\n\
                  OAuth2 password flow.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a\n\
                  configuration file.",
    after_help = "EXAMPLES:\n    \
                  keygate-server init                    # Scaffold keygate.toml\n    \
                  keygate-server                         # Start the server\n    \
                  keygate-server --config my.toml        # Use a custom config file\n    \
                  keygate-server hash-password hunter2   # Hash a password for the config\n    \
                  keygate-server config --validate       # Check the configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "keygate.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a keygate.toml configuration file
    ///
    /// The generated file carries two example users (daniel with roles
    /// admin+user, john with role user) and documents every knob.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file without prompting
        #[arg(short, long)]
        force: bool,
    },

    /// Show and validate configuration (secrets are never printed)
    Config {
        /// Also build the full state from it to prove it is usable
        #[arg(long)]
        validate: bool,
    },

    /// Hash a password for use in a `password_hash` configuration field
    HashPassword {
        /// The plaintext password to hash
        password: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
