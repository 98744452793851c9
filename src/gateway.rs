//! Request gateway for the campaign API.
//!
//! [`Transport`] is the HTTP seam (reqwest in production, scripted fakes in
//! tests). [`RequestGateway`] resolves endpoint paths against the base URL and
//! embeds the API key and campaign identifier into every POST body.

use crate::config::ClientConfig;
use crate::error::{KpiGameError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// JSON-over-HTTP transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON and return the decoded JSON response
    async fn post_json(&self, url: &str, body: &Value, bearer: Option<&str>) -> Result<Value>;

    /// GET with query parameters and return the decoded JSON response
    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<Value>;
}

/// reqwest-backed transport; requests have no timeout
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KpiGameError::api(status.as_u16(), body));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value, bearer: Option<&str>) -> Result<Value> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Self::decode(request.send().await?).await
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<Value> {
        let mut request = self.client.get(url).query(query);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Self::decode(request.send().await?).await
    }
}

/// Authenticated access to the campaign API
#[derive(Clone)]
pub struct RequestGateway {
    transport: Arc<dyn Transport>,
    base_url: String,
    api_key: String,
    campaign: String,
}

impl std::fmt::Debug for RequestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGateway")
            .field("base_url", &self.base_url)
            .field("campaign", &self.campaign)
            .finish_non_exhaustive()
    }
}

impl RequestGateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        campaign: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key: api_key.into(),
            campaign: campaign.into(),
        }
    }

    pub fn from_config(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self::new(
            transport,
            config.base_url.clone(),
            config.api_key.clone(),
            config.campaign.clone(),
        )
    }

    pub fn campaign(&self) -> &str {
        &self.campaign
    }

    /// Join the base URL and an endpoint path with exactly one `/`
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Wrap `payload` into `{api_key, campaign, ..payload}`
    pub fn envelope<P: Serialize>(&self, payload: &P) -> Result<Value> {
        let fields = match serde_json::to_value(payload)? {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            other => {
                return Err(KpiGameError::configuration(format!(
                    "request payload must be a JSON object, got {}",
                    other
                )));
            }
        };

        let mut body = Map::with_capacity(fields.len() + 2);
        body.insert("api_key".to_string(), Value::String(self.api_key.clone()));
        body.insert("campaign".to_string(), Value::String(self.campaign.clone()));
        body.extend(fields);
        Ok(Value::Object(body))
    }

    /// POST `payload` inside the campaign envelope and decode the response
    pub async fn post_envelope<P, R>(&self, path: &str, payload: &P, bearer: Option<&str>) -> Result<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let body = self.envelope(payload)?;
        self.post(path, &body, bearer).await
    }

    /// POST a body as-is and decode the response
    pub async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<R> {
        let url = self.endpoint_url(path);
        debug!("POST {}", url);
        let response = self.transport.post_json(&url, body, bearer).await?;
        trace!("Response from {}: {}", url, response);
        Ok(serde_json::from_value(response)?)
    }

    /// GET with query parameters; parameters without a value are dropped
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
        bearer: Option<&str>,
    ) -> Result<R> {
        let url = self.endpoint_url(path);
        let query: Vec<(String, String)> = params
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
            .collect();
        debug!("GET {} ({} params)", url, query.len());
        let response = self.transport.get_json(&url, &query, bearer).await?;
        Ok(serde_json::from_value(response)?)
    }
}
