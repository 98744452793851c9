//! KPI dashboard.
//!
//! Loads the KPI list for a window, filters it by unit and renders one gauge
//! per entry, either as coloured terminal output or as JSON.

use crate::constants::{GAUGE_WIDTH, messages, status_thresholds};
use crate::error::Result;
use crate::kpi::KpiService;
use crate::models::{DateRange, KpiProgress, Unit};
use crate::session::Session;
use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use std::io::Write;
use tracing::{error, warn};

/// Status tier of a KPI by percentage reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KpiStatus {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl KpiStatus {
    pub fn from_percentage(percentage: i64) -> Self {
        if percentage >= status_thresholds::EXCELLENT {
            KpiStatus::Excellent
        } else if percentage >= status_thresholds::GOOD {
            KpiStatus::Good
        } else if percentage >= status_thresholds::FAIR {
            KpiStatus::Fair
        } else {
            KpiStatus::NeedsAttention
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KpiStatus::Excellent => "Excelente",
            KpiStatus::Good => "Bueno",
            KpiStatus::Fair => "Regular",
            KpiStatus::NeedsAttention => "Necesita Atención",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            KpiStatus::Excellent => Color::Green,
            KpiStatus::Good => Color::Yellow,
            KpiStatus::Fair => Color::TrueColor {
                r: 249,
                g: 115,
                b: 22,
            },
            KpiStatus::NeedsAttention => Color::Red,
        }
    }
}

/// Unit selection for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnitFilter {
    #[default]
    All,
    Cartones,
    Hectolitros,
}

impl UnitFilter {
    pub fn matches(&self, unit: Unit) -> bool {
        match self {
            UnitFilter::All => true,
            UnitFilter::Cartones => unit == Unit::Cartones,
            UnitFilter::Hectolitros => unit == Unit::Hectolitros,
        }
    }

    pub fn apply(&self, kpis: &[KpiProgress]) -> Vec<KpiProgress> {
        kpis.iter()
            .filter(|kpi| self.matches(kpi.unidad))
            .cloned()
            .collect()
    }
}

/// Percentage shown by the gauge, clamped to 0..=100
pub fn gauge_fill(percentage: i64) -> i64 {
    percentage.clamp(0, 100)
}

/// Plain gauge bar, e.g. `[#######-------]`
pub fn gauge_bar(percentage: i64, width: usize) -> String {
    let filled = (gauge_fill(percentage) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Outcome of loading the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loaded(Vec<KpiProgress>),
    Failed(String),
}

pub struct Dashboard {
    service: KpiService,
    session: Session,
}

impl Dashboard {
    pub fn new(service: KpiService, session: Session) -> Self {
        Self { service, session }
    }

    /// Fetch the KPIs for `range`; failures become [`DashboardState::Failed`]
    pub async fn load(&self, range: &DateRange) -> DashboardState {
        let token = self.session.token().unwrap_or_else(|e| {
            warn!("Could not read session token: {}", e);
            None
        });

        match self.service.fetch_kpis(range, token.as_deref()).await {
            Ok(kpis) => DashboardState::Loaded(kpis),
            Err(e) => {
                error!("Error loading KPI data: {}", e);
                DashboardState::Failed(messages::KPI_LOAD_FAILURE.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct JsonKpi<'a> {
    #[serde(flatten)]
    kpi: &'a KpiProgress,
    status: &'static str,
}

/// Render the dashboard as pretty JSON
pub fn render_json<W: Write>(out: &mut W, range: &DateRange, kpis: &[KpiProgress]) -> Result<()> {
    let items: Vec<JsonKpi<'_>> = kpis
        .iter()
        .map(|kpi| JsonKpi {
            kpi,
            status: KpiStatus::from_percentage(kpi.porcentaje).label(),
        })
        .collect();

    let report = serde_json::json!({
        "sdate": range.to_filter().sdate,
        "edate": range.to_filter().edate,
        "kpis": items,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

/// Render one coloured gauge per KPI
pub fn render_human<W: Write>(out: &mut W, range: &DateRange, kpis: &[KpiProgress]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "KPI Dashboard".bright_green().bold())?;
    writeln!(out, "  {} {}", "Period:".bright_cyan(), range)?;
    writeln!(out)?;

    if kpis.is_empty() {
        writeln!(out, "  {}", "No KPI data for this period.".bright_black())?;
        return Ok(());
    }

    let name_width = kpis.iter().map(|kpi| kpi.name.chars().count()).max().unwrap_or(0);

    for kpi in kpis {
        let status = KpiStatus::from_percentage(kpi.porcentaje);
        writeln!(
            out,
            "  {:<name_width$}  {} {:>4}%  {}",
            kpi.name.bright_white().bold(),
            gauge_bar(kpi.porcentaje, GAUGE_WIDTH).color(status.color()),
            kpi.porcentaje,
            status.label().color(status.color()),
            name_width = name_width,
        )?;
        writeln!(
            out,
            "  {:<name_width$}  {} / {} {}",
            "",
            format_amount(kpi.avance_actual),
            format_amount(kpi.meta_mes),
            kpi.unidad.to_string().bright_black(),
            name_width = name_width,
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Integral amounts without decimals, others with two
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
