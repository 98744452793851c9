//! `dashboard` command: guarded KPI progress view

use super::shared::{AppContext, CommandStatus, spinner};
use crate::cli::args::{DashboardArgs, OutputFormat};
use crate::dashboard::{DashboardState, render_human, render_json};
use crate::guard;
use crate::navigation::Route;
use anyhow::Result;
use colored::*;
use tracing::{info, warn};

pub async fn run_dashboard(
    context: &AppContext,
    args: &DashboardArgs,
    show_progress: bool,
) -> Result<CommandStatus> {
    if !guard::enter(&context.session, context.history.as_ref(), Route::Dashboard) {
        let target = context.history.current().unwrap_or(Route::Login);
        warn!("Dashboard requested without a session, redirected to {}", target);
        eprintln!(
            "{} redirected to {}. Run `kpi-game login --codigo <CODE>` first.",
            "Not logged in:".bright_yellow().bold(),
            target
        );
        return Ok(CommandStatus::Failure);
    }

    let range = args.date_range(&context.config.report_window)?;
    let dashboard = context.dashboard()?;
    info!("Loading dashboard for {} ({:?})", range, args.unit);

    let progress = (show_progress && args.format == OutputFormat::Human)
        .then(|| spinner("Loading KPI data..."));
    let state = dashboard.load(&range).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match state {
        DashboardState::Loaded(kpis) => {
            let kpis = args.unit.apply(&kpis);
            let mut out = std::io::stdout().lock();
            match args.format {
                OutputFormat::Human => render_human(&mut out, &range, &kpis)?,
                OutputFormat::Json => render_json(&mut out, &range, &kpis)?,
            }
            Ok(CommandStatus::Success)
        }
        DashboardState::Failed(message) => {
            eprintln!("{} {}", "✗".bright_red().bold(), message.bright_red());
            Ok(CommandStatus::Failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::dashboard::UnitFilter;
    use crate::session::{MemorySessionStore, Session, SessionStore};
    use crate::constants::storage_keys;
    use crate::tests::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn args() -> DashboardArgs {
        DashboardArgs {
            from: None,
            to: None,
            unit: UnitFilter::All,
            format: OutputFormat::Json,
        }
    }

    fn context(transport: Arc<ScriptedTransport>, logged_in: bool) -> AppContext {
        let store = Arc::new(MemorySessionStore::new());
        if logged_in {
            store.set_item(storage_keys::TOKEN, "abc").unwrap();
        }
        AppContext::with_parts(
            ClientConfig::default().with_api_key("key-1"),
            Session::new(store),
            transport,
        )
    }

    #[tokio::test]
    async fn test_dashboard_redirects_without_session() {
        let transport = Arc::new(ScriptedTransport::new());
        let context = context(transport.clone(), false);

        let status = run_dashboard(&context, &args(), false).await.unwrap();
        assert_eq!(status, CommandStatus::Failure);
        assert_eq!(context.history.current(), Some(Route::Login));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_uses_configured_window() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_ok(json!({"data": {"entries": []}}));
        let context = context(transport.clone(), true);

        let status = run_dashboard(&context, &args(), false).await.unwrap();
        assert_eq!(status, CommandStatus::Success);

        let calls = transport.calls();
        assert_eq!(calls[0].body["date_filter"]["sdate"], "2024-08-01");
        assert_eq!(calls[0].body["date_filter"]["edate"], "2024-08-31");
        assert_eq!(calls[0].bearer.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_dashboard_failure_status() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_err(crate::error::KpiGameError::api(500, "internal"));
        let context = context(transport, true);

        let status = run_dashboard(&context, &args(), false).await.unwrap();
        assert_eq!(status, CommandStatus::Failure);
    }
}
