//! KPI Game client library
//!
//! A Rust client for the KPI Game campaign API.
//!
//! This library provides tools for:
//! - Logging in and signing up participants, with the token and user kept in a
//!   persistent session store
//! - Guarding protected routes on the stored session
//! - Fetching the monthly advance-toward-goal report and turning its dynamically
//!   keyed rows into typed KPI progress entries per unit
//! - Rendering the KPI progress as terminal gauges or JSON

pub mod auth;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod kpi;
pub mod models;
pub mod navigation;
pub mod session;
pub mod validation;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use auth::AuthFlow;
pub use config::ClientConfig;
pub use error::{KpiGameError, Result};
pub use gateway::{HttpTransport, RequestGateway, Transport};
pub use kpi::{KpiService, parse_entries};
pub use models::{AuthOutcome, DateRange, KpiProgress, Participant, Unit};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
