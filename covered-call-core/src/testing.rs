//! Test doubles shared by controller tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::api::{ApiError, DashboardApi};
use covered_call_common::{
    BacktestRequest, BacktestResult, HealthResponse, ProfitPoint, UpdateStep, UpdateStepResult,
};

/// Canned reply; `ApiError` is not `Clone`, so failures are described here.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    NetworkError,
    ParseError,
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::NetworkError => Err(ApiError::NetworkError("connection refused".to_string())),
            Reply::ParseError => Err(ApiError::ParseError("expected value at line 1".to_string())),
        }
    }
}

/// Recording backend. Unconfigured calls fail with a network error.
#[derive(Default)]
pub struct MockApi {
    pub backtest: Mutex<Option<Reply<BacktestResult>>>,
    pub health: Mutex<Option<Reply<HealthResponse>>>,
    pub status: Mutex<Option<Reply<serde_json::Value>>>,
    pub updates: Mutex<HashMap<UpdateStep, Reply<UpdateStepResult>>>,
    calls: Mutex<Vec<String>>,
    backtest_requests: Mutex<Vec<BacktestRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backtest(self, reply: Reply<BacktestResult>) -> Self {
        *self.backtest.lock().unwrap() = Some(reply);
        self
    }

    pub fn with_health(self, reply: Reply<HealthResponse>) -> Self {
        *self.health.lock().unwrap() = Some(reply);
        self
    }

    pub fn with_status(self, reply: Reply<serde_json::Value>) -> Self {
        *self.status.lock().unwrap() = Some(reply);
        self
    }

    pub fn with_update(self, step: UpdateStep, reply: Reply<UpdateStepResult>) -> Self {
        self.updates.lock().unwrap().insert(step, reply);
        self
    }

    /// All three update steps succeed; the final one reports the given dates.
    pub fn with_successful_updates(self, latest_date: &str, last_market_day: &str) -> Self {
        self.with_update(UpdateStep::StockData, Reply::Ok(step_ok("Stock data updated")))
            .with_update(UpdateStep::OptionsData, Reply::Ok(step_ok("Options data updated")))
            .with_update(
                UpdateStep::Models,
                Reply::Ok(UpdateStepResult {
                    success: true,
                    message: "Models updated successfully!".to_string(),
                    latest_date: Some(latest_date.to_string()),
                    last_market_day: Some(last_market_day.to_string()),
                }),
            )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn backtest_requests(&self) -> Vec<BacktestRequest> {
        self.backtest_requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn track<T>(&self, call: String, reply: Option<Reply<T>>) -> Result<T, ApiError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call);

        // Give any concurrently issued call a chance to overlap.
        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        reply.unwrap_or(Reply::NetworkError).into_result()
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn run_backtest(&self, request: &BacktestRequest) -> Result<BacktestResult, ApiError> {
        self.backtest_requests.lock().unwrap().push(request.clone());
        let reply = self.backtest.lock().unwrap().clone();
        self.track("POST /api/backtest".to_string(), reply).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let reply = self.health.lock().unwrap().clone();
        self.track("GET /api/health".to_string(), reply).await
    }

    async fn status(&self) -> Result<serde_json::Value, ApiError> {
        let reply = self.status.lock().unwrap().clone();
        self.track("GET /api/status".to_string(), reply).await
    }

    async fn run_update_step(&self, step: UpdateStep) -> Result<UpdateStepResult, ApiError> {
        let reply = self.updates.lock().unwrap().get(&step).cloned();
        self.track(format!("POST {}", step.path()), reply).await
    }
}

pub fn step_ok(message: &str) -> UpdateStepResult {
    UpdateStepResult {
        success: true,
        message: message.to_string(),
        ..Default::default()
    }
}

pub fn sample_result(curve_len: usize) -> BacktestResult {
    BacktestResult {
        total_profit: Some(842.75),
        total_trades: Some(10.0),
        successful_trades: Some(7.0),
        stop_losses_hit: Some(1.0),
        negative_trades: Some(2.0),
        neutral_trades: Some(1.0),
        success_rate: Some(70.0),
        avg_gain_per_successful_trade: Some(120.39),
        profit_curve: (0..curve_len)
            .map(|i| ProfitPoint {
                date: format!("2024-03-{:02}", i + 1),
                profit: i as f64 * 40.0,
            })
            .collect(),
    }
}
