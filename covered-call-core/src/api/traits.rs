// api/traits.rs

use super::ApiError;
use async_trait::async_trait;
use covered_call_common::{BacktestRequest, BacktestResult, HealthResponse, UpdateStep, UpdateStepResult};

/// Backend operations the dashboard depends on.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// POST `/api/backtest`
    async fn run_backtest(&self, request: &BacktestRequest) -> Result<BacktestResult, ApiError>;

    /// GET `/api/health`
    async fn health(&self) -> Result<HealthResponse, ApiError>;

    /// GET `/api/status`, returned as-is
    async fn status(&self) -> Result<serde_json::Value, ApiError>;

    /// POST one of the update endpoints
    async fn run_update_step(&self, step: UpdateStep) -> Result<UpdateStepResult, ApiError>;
}
