// ABOUTME: CLI argument parsing and command routing for signup
//
// Provides command-line interface for:
// - Inspecting saved progress (status)
// - Checking one step of saved data (validate)
// - Submitting saved data without the TUI (submit)
// - Discarding saved progress (reset)
// - Launching TUI (tui, default)

pub mod status;
pub mod submit;

use clap::{Parser, Subcommand, ValueEnum};

/// Multi-step registration wizard for the terminal
#[derive(Parser, Debug)]
#[command(name = "signup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Keep progress in memory only for this run
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Show saved progress
    Status,

    /// Validate saved data for one step
    Validate(ValidateArgs),

    /// Validate and submit saved data
    Submit,

    /// Discard saved progress
    Reset(ResetArgs),
}

/// Arguments for the validate command
#[derive(clap::Args, Debug, PartialEq, Eq)]
pub struct ValidateArgs {
    /// Step number (1-3)
    #[arg(long, short)]
    pub step: u8,
}

/// Arguments for the reset command
#[derive(clap::Args, Debug, PartialEq, Eq)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_tui() {
        let cli = Cli::parse_from(["signup"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.ephemeral);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["signup", "validate", "--step", "2", "--format", "json", "--ephemeral"]);
        assert_eq!(cli.command, Some(Commands::Validate(ValidateArgs { step: 2 })));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.ephemeral);
    }

    #[test]
    fn test_reset_yes() {
        let cli = Cli::parse_from(["signup", "reset", "-y"]);
        assert_eq!(cli.command, Some(Commands::Reset(ResetArgs { yes: true })));
    }
}
