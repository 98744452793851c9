//! `status` command: shows the stored session without contacting the API

use super::shared::{AppContext, CommandStatus};
use crate::cli::args::{OutputFormat, StatusArgs};
use crate::session::SessionState;
use anyhow::Result;
use colored::*;
use std::io::Write;

pub fn run_status(context: &AppContext, args: &StatusArgs) -> Result<CommandStatus> {
    let state = context.session.state()?;
    let mut out = std::io::stdout().lock();
    write_status(&mut out, &state, args.format)?;
    Ok(CommandStatus::Success)
}

pub fn write_status<W: Write>(out: &mut W, state: &SessionState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "logged_in": state.is_logged_in(),
                "user": state.user,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Human => match (&state.user, state.is_logged_in()) {
            (Some(user), true) => {
                writeln!(
                    out,
                    "{} {} <{}>",
                    "Logged in as".bright_green().bold(),
                    user.name.bright_cyan(),
                    user.email
                )?;
                writeln!(out, "  {} {}", "uid:".bright_black(), user.uid)?;
                writeln!(out, "  {} {}", "state:".bright_black(), user.state)?;
            }
            (None, true) => {
                writeln!(out, "{}", "Logged in (no user data stored)".bright_yellow())?;
            }
            _ => {
                writeln!(out, "{}", "Not logged in".bright_yellow())?;
            }
        },
    }
    Ok(())
}
