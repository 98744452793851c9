//! Shared components for CLI commands
//!
//! Logging setup, layered configuration and the wiring of gateway, session
//! and navigator used by every command.

use crate::auth::AuthFlow;
use crate::cli::args::Args;
use crate::config::ClientConfig;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::gateway::{HttpTransport, RequestGateway, Transport};
use crate::kpi::KpiService;
use crate::models::AuthFailure;
use crate::navigation::RouteHistory;
use crate::session::{FileSessionStore, Session};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a command that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Rejected by the API or by local validation; already reported to the user
    Failure,
}

impl CommandStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandStatus::Success => 0,
            CommandStatus::Failure => 1,
        }
    }
}

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kpi_game={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<ClientConfig> {
    info!("Loading configuration");
    let mut config = ClientConfig::load_layered(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut ClientConfig, args: &Args) {
    if let Some(session_file) = &args.session_file {
        config.session_file = Some(session_file.clone());
    }
}

/// Everything a command needs, built once from the configuration
pub struct AppContext {
    pub config: ClientConfig,
    pub session: Session,
    pub history: Arc<RouteHistory>,
    transport: Arc<dyn Transport>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session_path = config.session_path()?;
        debug!("Session file: {}", session_path.display());
        Ok(Self::with_parts(
            config,
            Session::new(Arc::new(FileSessionStore::new(session_path))),
            Arc::new(HttpTransport::new()),
        ))
    }

    pub fn with_parts(config: ClientConfig, session: Session, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            session,
            history: Arc::new(RouteHistory::new()),
            transport,
        }
    }

    fn gateway(&self) -> Result<RequestGateway> {
        self.config.validate()?;
        Ok(RequestGateway::from_config(self.transport.clone(), &self.config))
    }

    /// Auth flow over the configured API; fails on invalid configuration
    pub fn auth_flow(&self) -> Result<AuthFlow> {
        Ok(AuthFlow::new(
            self.gateway()?,
            self.config.endpoints.clone(),
            self.session.clone(),
            self.history.clone(),
        ))
    }

    pub fn dashboard(&self) -> Result<Dashboard> {
        let service = KpiService::new(self.gateway()?, self.config.endpoints.report.clone());
        Ok(Dashboard::new(service, self.session.clone()))
    }
}

/// Spinner shown while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Report an auth failure with its per-field messages
pub fn print_failure(failure: &AuthFailure) {
    eprintln!("{} {}", "✗".bright_red().bold(), failure.message.bright_red());
    for (field, message) in &failure.errors {
        eprintln!("    {} {}", format!("{}:", field).bright_yellow(), message);
    }
    if let Some(code) = failure.code_error {
        eprintln!("    {} {}", "code:".bright_black(), code);
    }
}
