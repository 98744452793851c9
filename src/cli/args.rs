//! Command-line argument definitions for the KPI Game client
//!
//! Global flags (config file, session file, verbosity) apply to every
//! subcommand; each subcommand carries its own inputs.

use crate::dashboard::UnitFilter;
use crate::error::Result;
use crate::models::{DateRange, parse_date};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the KPI Game client
///
/// Logs in or signs up against the campaign API, keeps the session on disk
/// and shows monthly KPI progress as terminal gauges.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kpi-game",
    version,
    about = "KPI Game campaign client: login, signup and KPI progress dashboard",
    long_about = "Terminal client for the KPI Game campaign. Authenticates against the \
                  campaign API, stores the session token locally and renders the monthly \
                  KPI report as progress gauges per unit (cartones, hectolitros)."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (JSON)
    ///
    /// Defaults to <config dir>/kpi-game/config.json when that file exists.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Session file holding the token and user
    #[arg(long = "session-file", value_name = "FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the spinner.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Log in with a client code and password
    Login(LoginArgs),
    /// Register a new participant
    Signup(SignupArgs),
    /// Log out and clear the stored session
    Logout,
    /// Show the stored session
    Status(StatusArgs),
    /// Show KPI progress for a date window
    Dashboard(DashboardArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct LoginArgs {
    /// Client code ("código de cliente")
    #[arg(long = "codigo", value_name = "CODE")]
    pub codigo: String,

    /// Password; prompted on stdin when omitted
    #[arg(long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct SignupArgs {
    #[arg(long = "email", value_name = "EMAIL")]
    pub email: String,

    /// Full name
    #[arg(long = "nombre", value_name = "NAME")]
    pub nombre: String,

    /// Client code
    #[arg(long = "codigo", value_name = "CODE")]
    pub codigo: String,

    /// Password; prompted on stdin when omitted
    #[arg(long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Password confirmation; prompted when the password is prompted
    #[arg(long = "confirm-password", value_name = "PASSWORD")]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct StatusArgs {
    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Parser)]
pub struct DashboardArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,

    /// Only show KPIs in this unit
    #[arg(long = "unit", value_enum, default_value = "all")]
    pub unit: UnitFilter,

    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl DashboardArgs {
    /// Window from `--from`/`--to`, each falling back to `fallback`
    pub fn date_range(&self, fallback: &DateRange) -> Result<DateRange> {
        let start = match &self.from {
            Some(value) => parse_date(value)?,
            None => fallback.start,
        };
        let end = match &self.to {
            Some(value) => parse_date(value)?,
            None => fallback.end,
        };
        DateRange::new(start, end)
    }
}
