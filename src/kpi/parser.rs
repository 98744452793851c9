//! KPI report parser.
//!
//! Report rows carry dynamically named fields such as
//! `ventas_marca_meta_mes_cartones` (monthly target) and
//! `ventas_marca_avance_actual_cartones` (progress to date). The parser groups
//! them per metric and unit and emits one [`KpiProgress`] per complete pair
//! with a positive target.

use crate::models::{KpiProgress, ReportEntry, Unit};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, trace};

fn target_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)_meta_mes_(cartones|hectolitros)$").unwrap())
}

fn actual_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)_avance_actual_(cartones|hectolitros)$").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Target,
    Actual,
}

/// Target/actual values seen so far for one unit
#[derive(Debug, Default, Clone, Copy)]
struct UnitPair {
    target: Option<f64>,
    actual: Option<f64>,
}

/// Accumulated fields of one metric across all rows
#[derive(Debug, Default, Clone, Copy)]
struct MetricAccumulator {
    cartones: UnitPair,
    hectolitros: UnitPair,
}

impl MetricAccumulator {
    fn pair_mut(&mut self, unit: Unit) -> &mut UnitPair {
        match unit {
            Unit::Cartones => &mut self.cartones,
            Unit::Hectolitros => &mut self.hectolitros,
        }
    }

    fn pair(&self, unit: Unit) -> &UnitPair {
        match unit {
            Unit::Cartones => &self.cartones,
            Unit::Hectolitros => &self.hectolitros,
        }
    }

    fn record(&mut self, kind: FieldKind, unit: Unit, value: f64) {
        let pair = self.pair_mut(unit);
        match kind {
            FieldKind::Target => pair.target = Some(value),
            FieldKind::Actual => pair.actual = Some(value),
        }
    }
}

/// Metrics keyed by raw name, iterated in first-seen order
#[derive(Debug, Default)]
struct MetricTable {
    order: Vec<String>,
    metrics: HashMap<String, MetricAccumulator>,
}

impl MetricTable {
    fn entry(&mut self, name: &str) -> &mut MetricAccumulator {
        if !self.metrics.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.metrics.entry(name.to_string()).or_default()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &MetricAccumulator)> {
        self.order
            .iter()
            .filter_map(|name| self.metrics.get(name).map(|acc| (name.as_str(), acc)))
    }
}

/// Split a report key into metric name, field kind and unit
fn classify_key(key: &str) -> Option<(&str, FieldKind, Unit)> {
    let (captures, kind) = if let Some(c) = target_re().captures(key) {
        (c, FieldKind::Target)
    } else if let Some(c) = actual_re().captures(key) {
        (c, FieldKind::Actual)
    } else {
        return None;
    };

    let name = captures.get(1)?.as_str();
    let unit = Unit::from_token(captures.get(2)?.as_str())?;
    Some((name, kind, unit))
}

/// Numeric value of a report field; anything unusable is 0
pub fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric_text(s),
        Value::Bool(true) => 1.0,
        Value::Array(items) if items.len() == 1 => coerce_list_item(&items[0]),
        _ => 0.0,
    };

    if number.is_finite() { number } else { 0.0 }
}

/// A one-element list counts as its element's text; `[true]` is not a number
fn coerce_list_item(item: &Value) -> f64 {
    match item {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_numeric_text(s),
        Value::Array(items) if items.len() == 1 => coerce_list_item(&items[0]),
        _ => 0.0,
    }
}

/// Decimal text, or unsigned `0x`/`0o`/`0b` integer literals
fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    match radix {
        Some(radix) => {
            let digits = &trimmed[2..];
            if digits.is_empty() {
                return 0.0;
            }
            digits
                .chars()
                .try_fold(0.0_f64, |acc, c| {
                    c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
                })
                .unwrap_or(0.0)
        }
        None => trimmed.parse::<f64>().unwrap_or(0.0),
    }
}

/// Round half up: 12.5 -> 13, -12.5 -> -12
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn percentage(actual: f64, target: f64) -> i64 {
    round_half_up(actual / target * 100.0)
}

/// `ventas_marca` -> `Ventas Marca`
pub fn format_kpi_name(raw: &str) -> String {
    raw.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut formatted: String = first.to_uppercase().collect();
                    formatted.push_str(&chars.as_str().to_lowercase());
                    formatted
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reshape report rows into KPI progress entries
pub fn parse_entries(entries: &[ReportEntry]) -> Vec<KpiProgress> {
    let mut table = MetricTable::default();

    for entry in entries {
        for (key, value) in &entry.data {
            match classify_key(key) {
                Some((name, kind, unit)) => {
                    table.entry(name).record(kind, unit, coerce_number(value));
                }
                None => trace!("Ignoring report field '{}'", key),
            }
        }
    }

    let mut kpis = Vec::new();
    for (name, metric) in table.iter() {
        for unit in Unit::ALL {
            let pair = metric.pair(unit);
            let (Some(target), Some(actual)) = (pair.target, pair.actual) else {
                continue;
            };
            if target <= 0.0 {
                continue;
            }

            kpis.push(KpiProgress {
                name: format_kpi_name(name),
                meta_mes: target,
                avance_actual: actual,
                porcentaje: percentage(actual, target),
                unidad: unit,
            });
        }
    }

    debug!(
        "Parsed {} KPI entries from {} report rows ({} metrics)",
        kpis.len(),
        entries.len(),
        table.order.len()
    );
    kpis
}
