//! Core data structures for the KPI Game client.
//!
//! Wire payloads exchanged with the campaign API, the participant record
//! kept in the session, and the typed KPI progress entries produced by the
//! report parser.

use crate::constants::{REPORT_DATE_FORMAT, REPORT_ENTRY_TYPE, REPORT_ACTIVITY_TYPE};
use crate::error::{KpiGameError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Participant and credentials
// =============================================================================

/// Participant record returned by login/signup and stored in the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid_type: Option<String>,
    #[serde(default)]
    pub state: String,
}

/// Login form values
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub codigo_cliente: String,
    pub password: String,
}

/// Signup form values
#[derive(Debug, Clone, Default)]
pub struct SignupFields {
    pub email: String,
    pub nombre_completo: String,
    pub codigo_cliente: String,
    pub password: String,
    /// Repeated password; only checked by form validation, never sent
    pub confirm_password: Option<String>,
}

// =============================================================================
// Request payloads (api_key/campaign are added by the gateway)
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub participation: Participation,
}

#[derive(Debug, Clone, Serialize)]
pub struct Participation {
    #[serde(rename = "codigo-de-cliente")]
    pub codigo_cliente: String,
    pub password: String,
}

impl From<&Credentials> for LoginPayload {
    fn from(credentials: &Credentials) -> Self {
        Self {
            participation: Participation {
                codigo_cliente: credentials.codigo_cliente.clone(),
                password: credentials.password.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupPayload {
    pub properties: SignupProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupProperties {
    pub email: String,
    #[serde(rename = "nombre-completo")]
    pub nombre_completo: String,
    #[serde(rename = "codigo-de-cliente")]
    pub codigo_cliente: String,
    pub password: String,
}

impl From<&SignupFields> for SignupPayload {
    fn from(fields: &SignupFields) -> Self {
        Self {
            properties: SignupProperties {
                email: fields.email.clone(),
                nombre_completo: fields.nombre_completo.clone(),
                codigo_cliente: fields.codigo_cliente.clone(),
                password: fields.password.clone(),
            },
        }
    }
}

/// Report query for the advance-toward-goal entries of one window
#[derive(Debug, Clone, Serialize)]
pub struct ReportQuery {
    pub date_filter: DateFilter,
    pub limit: u32,
    #[serde(rename = "_type")]
    pub entry_type: String,
    pub atype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateFilter {
    pub sdate: String,
    pub edate: String,
}

impl ReportQuery {
    pub fn new(range: &DateRange, limit: u32) -> Self {
        Self {
            date_filter: range.to_filter(),
            limit,
            entry_type: REPORT_ENTRY_TYPE.to_string(),
            atype: REPORT_ACTIVITY_TYPE.to_string(),
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Decode the upstream string flag: only `"true"` (or a JSON `true`) is success
pub fn deserialize_ok_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s == "true",
        serde_json::Value::Bool(b) => b,
        _ => false,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "deserialize_ok_flag")]
    pub ok: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub participant: Option<Participant>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    #[serde(default, deserialize_with = "deserialize_ok_flag")]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub participant: Option<Participant>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub code_error: Option<i64>,
}

/// Envelope of the report listing endpoint: `{data:{entries:[{data:{..}}]}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub data: Option<ReportData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportData {
    #[serde(default)]
    pub entries: Option<Vec<ReportEntry>>,
}

/// One report row: dynamically keyed fields, key order preserved
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportEntry {
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl ReportResponse {
    /// Rows of the report, empty when `data` or `entries` is absent
    pub fn entries(&self) -> &[ReportEntry] {
        self.data
            .as_ref()
            .and_then(|data| data.entries.as_deref())
            .unwrap_or(&[])
    }
}

// =============================================================================
// Auth outcomes
// =============================================================================

/// Failure payload of login/signup; always carries a displayable message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthFailure {
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_error: Option<i64>,
}

impl AuthFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: BTreeMap::new(),
            code_error: None,
        }
    }

    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.insert(field.into(), message.into());
        self
    }
}

/// Result of a login or signup attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success {
        message: String,
        participant: Option<Participant>,
    },
    Failure(AuthFailure),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            AuthOutcome::Success { message, .. } => message,
            AuthOutcome::Failure(failure) => &failure.message,
        }
    }
}

// =============================================================================
// KPI progress
// =============================================================================

/// Measurement unit of a KPI target/actual pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Cartones,
    Hectolitros,
}

impl Unit {
    /// Units in emission order
    pub const ALL: [Unit; 2] = [Unit::Cartones, Unit::Hectolitros];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cartones => "cartones",
            Unit::Hectolitros => "hectolitros",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "cartones" => Some(Unit::Cartones),
            "hectolitros" => Some(Unit::Hectolitros),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of one KPI toward its monthly target in one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiProgress {
    pub name: String,
    pub meta_mes: f64,
    pub avance_actual: f64,
    pub porcentaje: i64,
    pub unidad: Unit,
}

// =============================================================================
// Date range
// =============================================================================

/// Inclusive reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(KpiGameError::invalid_date_range(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    pub fn to_filter(&self) -> DateFilter {
        DateFilter {
            sdate: self.start.format(REPORT_DATE_FORMAT).to_string(),
            edate: self.end.format(REPORT_DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format(REPORT_DATE_FORMAT),
            self.end.format(REPORT_DATE_FORMAT)
        )
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT).map_err(|e| {
        KpiGameError::invalid_date_range(format!(
            "'{}' is not a YYYY-MM-DD date ({})",
            value, e
        ))
    })
}
