//! KPI fetch-and-parse.
//!
//! Requests the advance-toward-goal report for one window and turns the rows
//! into typed [`KpiProgress`] entries. No retries: a failed request is
//! returned as the error, never as partial data.

pub mod parser;

pub use parser::parse_entries;

use crate::constants::REPORT_UNBOUNDED_LIMIT;
use crate::error::Result;
use crate::gateway::RequestGateway;
use crate::models::{DateRange, KpiProgress, ReportQuery, ReportResponse};
use tracing::info;

#[derive(Debug, Clone)]
pub struct KpiService {
    gateway: RequestGateway,
    report_path: String,
}

impl KpiService {
    pub fn new(gateway: RequestGateway, report_path: impl Into<String>) -> Self {
        Self {
            gateway,
            report_path: report_path.into(),
        }
    }

    /// Fetch and parse the KPI report for `range`
    pub async fn fetch_kpis(&self, range: &DateRange, bearer: Option<&str>) -> Result<Vec<KpiProgress>> {
        let query = ReportQuery::new(range, REPORT_UNBOUNDED_LIMIT);
        let response: ReportResponse = self
            .gateway
            .post_envelope(&self.report_path, &query, bearer)
            .await?;

        let entries = response.entries();
        if entries.is_empty() {
            info!("KPI report for {} has no rows", range);
            return Ok(Vec::new());
        }

        let kpis = parse_entries(entries);
        info!(
            "Loaded {} KPI entries for {} from {} rows",
            kpis.len(),
            range,
            entries.len()
        );
        Ok(kpis)
    }
}
