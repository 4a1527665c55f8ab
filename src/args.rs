use crate::config::Config;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "otpgate", version, about = "One-time-password step of the login flow")]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive OTP entry screen (default)
    Tui,
    /// Verify a code without the interactive screen
    Verify {
        /// The 6-digit code from the email
        #[arg(long, value_name = "CODE")]
        code: String,
    },
    /// Write the effective configuration to the config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

// Global flags shared across every subcommand.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to a config.toml file
    #[arg(
        short = 'c',
        long,
        value_name = "PATH",
        env = "OTPGATE_CONFIG",
        global = true
    )]
    pub config: Option<PathBuf>,

    /// Base URL of the authentication API
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Session token issued by the preceding login step
    #[arg(
        long,
        value_name = "TOKEN",
        env = "OTPGATE_SESSION_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub session_token: Option<String>,

    /// JSON session file written by the preceding login step
    #[arg(long, value_name = "PATH", global = true)]
    pub session_file: Option<PathBuf>,

    /// Disable coloured terminal output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,
}

impl CommonArgs {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(path) = &self.session_file {
            config.session_file = Some(path.clone());
        }
    }
}
