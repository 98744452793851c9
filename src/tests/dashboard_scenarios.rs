//! Login, guard and dashboard load end to end

use super::{ScriptedTransport, participant_json};
use crate::auth::AuthFlow;
use crate::config::EndpointConfig;
use crate::constants::endpoints;
use crate::dashboard::{Dashboard, DashboardState, UnitFilter};
use crate::error::KpiGameError;
use crate::gateway::RequestGateway;
use crate::guard::{self, GuardDecision};
use crate::kpi::KpiService;
use crate::models::{Credentials, DateRange, Unit};
use crate::navigation::{Route, RouteHistory};
use crate::session::Session;
use serde_json::json;
use std::sync::Arc;

struct Harness {
    transport: Arc<ScriptedTransport>,
    history: Arc<RouteHistory>,
    flow: AuthFlow,
    dashboard: Dashboard,
}

fn harness() -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let history = Arc::new(RouteHistory::new());
    let session = Session::in_memory();
    let gateway = RequestGateway::new(transport.clone(), "https://api.example.com/v1", "key-1", "4u");

    let flow = AuthFlow::new(
        gateway.clone(),
        EndpointConfig::default(),
        session.clone(),
        history.clone(),
    );
    let dashboard = Dashboard::new(KpiService::new(gateway, endpoints::REPORT), session);

    Harness {
        transport,
        history,
        flow,
        dashboard,
    }
}

fn august() -> DateRange {
    DateRange::parse("2024-08-01", "2024-08-31").unwrap()
}

async fn log_in(h: &Harness) {
    h.transport.push_ok(json!({
        "ok": "true",
        "token": "abc123",
        "participant": participant_json()
    }));
    let credentials = Credentials {
        codigo_cliente: "C-001".to_string(),
        password: "secret".to_string(),
    };
    assert!(h.flow.login(&credentials).await.is_success());
}

#[tokio::test]
async fn test_guard_blocks_dashboard_before_login() {
    let h = harness();
    assert_eq!(
        guard::check(h.flow.session(), Route::Dashboard),
        GuardDecision::Redirect(Route::Login)
    );
    assert!(!guard::enter(h.flow.session(), h.history.as_ref(), Route::Dashboard));
    assert_eq!(h.history.current(), Some(Route::Login));
}

#[tokio::test]
async fn test_logged_in_dashboard_loads_kpis_with_bearer() {
    let h = harness();
    log_in(&h).await;
    assert!(guard::enter(h.flow.session(), h.history.as_ref(), Route::Dashboard));

    h.transport.push_ok(json!({"data": {"entries": [
        {"data": {
            "ventas_totales_meta_mes_cartones": "200",
            "ventas_totales_avance_actual_cartones": 150,
            "ventas_totales_meta_mes_hectolitros": 80,
            "ventas_totales_avance_actual_hectolitros": 20,
            "region": "norte"
        }}
    ]}}));

    let kpis = match h.dashboard.load(&august()).await {
        DashboardState::Loaded(kpis) => kpis,
        DashboardState::Failed(message) => panic!("unexpected failure: {}", message),
    };

    assert_eq!(kpis.len(), 2);
    assert_eq!(kpis[0].name, "Ventas Totales");
    assert_eq!(kpis[0].unidad, Unit::Cartones);
    assert_eq!(kpis[0].porcentaje, 75);
    assert_eq!(kpis[1].unidad, Unit::Hectolitros);
    assert_eq!(kpis[1].porcentaje, 25);

    let hectolitros = UnitFilter::Hectolitros.apply(&kpis);
    assert_eq!(hectolitros.len(), 1);

    let calls = h.transport.calls();
    let report = calls.last().unwrap();
    assert_eq!(report.url, "https://api.example.com/v1/entries/index");
    assert_eq!(report.bearer.as_deref(), Some("abc123"));
    assert_eq!(report.body["atype"], "avance_metas");
}

#[tokio::test]
async fn test_dashboard_failure_then_retry() {
    let h = harness();
    log_in(&h).await;

    h.transport.push_err(KpiGameError::api(500, "internal"));
    assert_eq!(
        h.dashboard.load(&august()).await,
        DashboardState::Failed(
            "Error al cargar los datos de KPI. Por favor, intenta nuevamente.".to_string()
        )
    );

    h.transport.push_ok(json!({"data": {"entries": []}}));
    assert_eq!(h.dashboard.load(&august()).await, DashboardState::Loaded(Vec::new()));
}

#[tokio::test]
async fn test_logout_locks_dashboard_again() {
    let h = harness();
    log_in(&h).await;
    h.transport.push_ok(json!({"ok": true}));
    h.flow.logout().await.unwrap();

    assert_eq!(
        guard::check(h.flow.session(), Route::Dashboard),
        GuardDecision::Redirect(Route::Login)
    );
    assert_eq!(
        guard::check(h.flow.session(), Route::Login),
        GuardDecision::Allow
    );
}
