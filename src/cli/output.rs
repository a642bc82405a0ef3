//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the Keygate CLI.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the Keygate banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
   {}
"#,
                " _  __ _____ __   __  ____     _     _____  _____ ".bright_cyan().bold(),
                "| |/ /| ____|\\ \\ / / / ___|   / \\   |_   _|| ____|".bright_cyan().bold(),
                "| ' / |  _|   \\ V / | |  _   / _ \\    | |  |  _|  ".cyan().bold(),
                "| . \\ | |___   | |  | |_| | / ___ \\   | |  | |___ ".blue().bold(),
                "|_|\\_\\|_____|  |_|   \\____|/_/   \\_\\  |_|  |_____|".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Credential & Token Authority".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 _  __ _____ __   __  ____     _     _____  _____
| |/ /| ____|\ \ / / / ___|   / \   |_   _|| ____|
| ' / |  _|   \ V / | |  _   / _ \    | |  |  _|
| . \ | |___   | |  | |_| | / ___ \   | |  | |___
|_|\_\|_____|  |_|   \____|/_/   \_\  |_|  |_____|

   Credential & Token Authority v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "+".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [+] {} {}", file_type, path);
        }
    }
}
