//! `login`, `signup` and `logout` commands

use super::shared::{AppContext, CommandStatus, print_failure};
use crate::auth;
use crate::cli::args::{LoginArgs, SignupArgs};
use crate::cli::input;
use crate::error::KpiGameError;
use crate::models::{AuthOutcome, Credentials, SignupFields};
use crate::validation::{validate_login, validate_signup};
use anyhow::Result;
use colored::*;
use tracing::{info, warn};

pub async fn run_login(context: &AppContext, args: &LoginArgs) -> Result<CommandStatus> {
    let password = input::value_or_prompt(args.password.clone(), "Password: ")?;
    let credentials = Credentials {
        codigo_cliente: args.codigo.clone(),
        password,
    };
    validate_login(&credentials).map_err(|errors| KpiGameError::Validation { errors })?;

    let flow = context.auth_flow()?;
    info!("Logging in with client code {}", credentials.codigo_cliente);

    match flow.login(&credentials).await {
        AuthOutcome::Success { participant, .. } => {
            let name = participant.map(|p| p.name).unwrap_or_default();
            println!("{} {}", "✓ Logged in as".bright_green().bold(), name.bright_cyan());
            Ok(CommandStatus::Success)
        }
        AuthOutcome::Failure(failure) => {
            print_failure(&failure);
            Ok(CommandStatus::Failure)
        }
    }
}

pub async fn run_signup(context: &AppContext, args: &SignupArgs) -> Result<CommandStatus> {
    let (password, confirm_password) = match &args.password {
        Some(password) => (password.clone(), args.confirm_password.clone()),
        None => {
            let password = input::prompt_line("Password: ")?;
            let confirm =
                input::value_or_prompt(args.confirm_password.clone(), "Confirm password: ")?;
            (password, Some(confirm))
        }
    };

    let fields = SignupFields {
        email: args.email.clone(),
        nombre_completo: args.nombre.clone(),
        codigo_cliente: args.codigo.clone(),
        password,
        confirm_password,
    };
    validate_signup(&fields).map_err(|errors| KpiGameError::Validation { errors })?;

    let flow = context.auth_flow()?;
    match flow.signup(&fields).await {
        AuthOutcome::Success { message, .. } => {
            println!("{}", "✓ Registration complete".bright_green().bold());
            if !message.is_empty() {
                println!("  {}", message);
            }
            println!("  Log in with: kpi-game login --codigo {}", fields.codigo_cliente);
            Ok(CommandStatus::Success)
        }
        AuthOutcome::Failure(failure) => {
            print_failure(&failure);
            Ok(CommandStatus::Failure)
        }
    }
}

pub async fn run_logout(context: &AppContext) -> Result<CommandStatus> {
    match context.auth_flow() {
        Ok(flow) => flow.logout().await?,
        Err(e) => {
            warn!("Skipping logout request: {}", e);
            auth::clear_local(&context.session, context.history.as_ref())?;
        }
    }
    println!("{}", "✓ Logged out".bright_green().bold());
    Ok(CommandStatus::Success)
}
