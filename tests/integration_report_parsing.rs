//! Integration tests for KPI report parsing
//!
//! Feeds whole report bodies, as the API sends them, through deserialisation
//! and the parser.

use kpi_game::models::ReportResponse;
use kpi_game::{KpiProgress, Unit, parse_entries};

fn parse_body(body: &str) -> Vec<KpiProgress> {
    let response: ReportResponse = serde_json::from_str(body).unwrap();
    parse_entries(response.entries())
}

#[test]
fn test_single_metric_report() {
    let kpis = parse_body(
        r#"{"data": {"entries": [
            {"data": {"sales_meta_mes_cartones": 200, "sales_avance_actual_cartones": 150}}
        ]}}"#,
    );

    assert_eq!(
        kpis,
        vec![KpiProgress {
            name: "Sales".to_string(),
            meta_mes: 200.0,
            avance_actual: 150.0,
            porcentaje: 75,
            unidad: Unit::Cartones,
        }]
    );

    let value = serde_json::to_value(&kpis[0]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Sales",
            "metaMes": 200.0,
            "avanceActual": 150.0,
            "porcentaje": 75,
            "unidad": "cartones"
        })
    );
}

#[test]
fn test_zero_target_report_is_empty() {
    let kpis = parse_body(
        r#"{"data": {"entries": [
            {"data": {"x_meta_mes_hectolitros": 0, "x_avance_actual_hectolitros": 10}}
        ]}}"#,
    );
    assert!(kpis.is_empty());
}

#[test]
fn test_realistic_multi_row_report() {
    let kpis = parse_body(
        r#"{"ok": true, "data": {"total": 3, "entries": [
            {"_id": "e1", "date": "2024-08-12", "data": {
                "cerveza_premium_meta_mes_cartones": "1200",
                "cerveza_premium_avance_actual_cartones": "300",
                "codigo_cliente": "C-001"
            }},
            {"_id": "e2", "data": {
                "cerveza_premium_meta_mes_hectolitros": 40.5,
                "cerveza_premium_avance_actual_hectolitros": 40.5,
                "refrescos_avance_actual_cartones": 99
            }},
            {"_id": "e3", "data": {
                "agua_meta_mes_cartones": 50,
                "agua_avance_actual_cartones": "n/a"
            }}
        ]}}"#,
    );

    let summary: Vec<(&str, Unit, i64)> = kpis
        .iter()
        .map(|kpi| (kpi.name.as_str(), kpi.unidad, kpi.porcentaje))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Cerveza Premium", Unit::Cartones, 25),
            ("Cerveza Premium", Unit::Hectolitros, 100),
            ("Agua", Unit::Cartones, 0),
        ]
    );
}

#[test]
fn test_report_without_entries() {
    assert!(parse_body(r#"{"data": {}}"#).is_empty());
    assert!(parse_body(r#"{}"#).is_empty());
}
