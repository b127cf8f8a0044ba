// =================================================================
// api/http.rs - HTTP Backend Client
// =================================================================

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::{errors::ApiError, traits::DashboardApi};
use crate::config::Settings;
use covered_call_common::{BacktestRequest, BacktestResult, HealthResponse, UpdateStep, UpdateStepResult};

const BACKTEST_PATH: &str = "/api/backtest";
const HEALTH_PATH: &str = "/api/health";
const STATUS_PATH: &str = "/api/status";

/// `reqwest`-backed client for the dashboard backend
pub struct HttpDashboardApi {
    base_url: String,
    client: Client,
    timeout: Option<Duration>,
}

impl HttpDashboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            timeout: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut api = Self::new(settings.api.base_url.clone());
        api.timeout = settings.request_timeout();
        api
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and parse its body as JSON regardless of status code.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Backend responded with HTTP {} for {}", status, response.url());
        }

        let body = response.text().await?;
        debug!("Received {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn run_backtest(&self, request: &BacktestRequest) -> Result<BacktestResult, ApiError> {
        let url = self.url(BACKTEST_PATH);
        debug!("POST {} ticker={}", url, request.ticker);
        self.send_json(self.client.post(&url).json(request)).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.url(HEALTH_PATH);
        debug!("GET {}", url);
        self.send_json(self.client.get(&url)).await
    }

    async fn status(&self) -> Result<serde_json::Value, ApiError> {
        let url = self.url(STATUS_PATH);
        debug!("GET {}", url);
        self.send_json(self.client.get(&url)).await
    }

    async fn run_update_step(&self, step: UpdateStep) -> Result<UpdateStepResult, ApiError> {
        let url = self.url(step.path());
        debug!("POST {}", url);
        self.send_json(self.client.post(&url)).await
    }
}
