//! Scenario tests for the client flows
//!
//! Drives auth, KPI loading and the dashboard against a scripted transport
//! that replays queued responses and records every request.

pub mod dashboard_scenarios;

use crate::error::{KpiGameError, Result};
use crate::gateway::Transport;
use crate::models::Participant;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One request seen by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub body: Value,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
}

/// Transport replaying queued responses in order
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every response resolves only after `delay`
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn push_ok(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    pub fn push_err(&self, error: KpiGameError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, call: RecordedCall) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(KpiGameError::api(599, "no scripted response")))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value, bearer: Option<&str>) -> Result<Value> {
        self.respond(RecordedCall {
            method: "POST",
            url: url.to_string(),
            body: body.clone(),
            query: Vec::new(),
            bearer: bearer.map(str::to_string),
        })
        .await
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<Value> {
        self.respond(RecordedCall {
            method: "GET",
            url: url.to_string(),
            body: Value::Null,
            query: query.to_vec(),
            bearer: bearer.map(str::to_string),
        })
        .await
    }
}

pub fn sample_participant() -> Participant {
    Participant {
        id: "123".to_string(),
        email: "test@example.com".to_string(),
        name: "Test User".to_string(),
        avatar: None,
        uid: "test-uid".to_string(),
        uid_type: None,
        state: "active".to_string(),
    }
}

pub fn participant_json() -> Value {
    serde_json::json!({
        "_id": "123",
        "email": "test@example.com",
        "name": "Test User",
        "uid": "test-uid",
        "state": "active"
    })
}
