//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kindle",
    bin_name = "kindle",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f525} Exhaustive provisioning config validation",
    long_about = "Kindle checks machine provisioning documents (storage, files, \
                  systemd units, users) and reports every problem in one pass, \
                  each with a stable code and the path to the offending value.",
    after_help = "EXAMPLES:\n\
        \x20 kindle validate config.ign\n\
        \x20 kindle validate ./configs --output-format json\n\
        \x20 kindle init\n\
        \x20 kindle completions bash > /usr/share/bash-completion/completions/kindle",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate one or more documents.
    #[command(
        visible_alias = "v",
        about = "Validate provisioning documents",
        after_help = "EXAMPLES:\n\
            \x20 kindle validate config.json\n\
            \x20 kindle validate a.ign b.toml\n\
            \x20 kindle validate ./configs --no-warnings"
    )]
    Validate(ValidateArgs),

    /// Initialise a Kindle configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kindle init           # default location\n\
            \x20 kindle init --local   # .kindle.toml in CWD\n\
            \x20 kindle init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kindle completions bash > ~/.local/share/bash-completion/completions/kindle\n\
            \x20 kindle completions zsh  > ~/.zfunc/_kindle\n\
            \x20 kindle completions fish > ~/.config/fish/completions/kindle.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Kindle configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kindle config get output.format\n\
            \x20 kindle config list\n\
            \x20 kindle config path"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `kindle validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Documents or directories to validate.
    #[arg(
        value_name = "PATH",
        required = true,
        num_args = 1..,
        help = "Files or directories to validate"
    )]
    pub paths: Vec<PathBuf>,

    /// Hide warning entries (they never affect the exit code).
    #[arg(long = "no-warnings", help = "Only show error entries")]
    pub no_warnings: bool,

    /// Override the discovered extensions for directory arguments.
    #[arg(
        short = 'e',
        long = "ext",
        value_name = "EXT",
        value_delimiter = ',',
        help = "Extensions to discover in directories (e.g. json,ign)"
    )]
    pub extensions: Vec<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kindle init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.kindle.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kindle completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kindle config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_validate_with_several_paths() {
        let cli = Cli::parse_from(["kindle", "validate", "a.json", "configs/"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("a.json"), PathBuf::from("configs/")]);
                assert!(!args.no_warnings);
            }
            other => panic!("expected Validate command, got {other:?}"),
        }
    }

    #[test]
    fn validate_requires_a_path() {
        assert!(Cli::try_parse_from(["kindle", "validate"]).is_err());
    }

    #[test]
    fn extensions_are_comma_separated() {
        let cli = Cli::parse_from(["kindle", "validate", "-e", "json,ign", "."]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.extensions, vec!["json", "ign"]);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["kindle", "validate", "x.json", "--output-format", "json"]);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kindle", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
