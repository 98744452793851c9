//! Command implementations for the KPI Game CLI
//!
//! Each command lives in its own module; this one sets up logging and
//! configuration once and dispatches.

pub mod account;
pub mod dashboard;
pub mod shared;
pub mod status;

pub use shared::CommandStatus;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use shared::{AppContext, load_configuration, setup_logging};
use tracing::{debug, info};

/// Main command runner
///
/// Returns [`CommandStatus::Failure`] when the API or local validation
/// rejected the request; errors are reserved for configuration, storage
/// and I/O problems.
pub async fn run(args: Args) -> Result<CommandStatus> {
    setup_logging(&args)?;
    info!("Starting kpi-game");

    let Some(command) = &args.command else {
        return Ok(CommandStatus::Success);
    };

    let config = load_configuration(&args)?;
    debug!("Using base URL {} and campaign {}", config.base_url, config.campaign);
    let context = AppContext::new(config)?;

    match command {
        Commands::Login(login_args) => account::run_login(&context, login_args).await,
        Commands::Signup(signup_args) => account::run_signup(&context, signup_args).await,
        Commands::Logout => account::run_logout(&context).await,
        Commands::Status(status_args) => status::run_status(&context, status_args),
        Commands::Dashboard(dashboard_args) => {
            dashboard::run_dashboard(&context, dashboard_args, args.show_progress()).await
        }
    }
}
