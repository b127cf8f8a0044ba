// covered-call-common/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// Request body for /api/backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRequest {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    pub option_type: String,
    pub deviation: String,
    pub stop_loss: String,
}

// Point on the cumulative profit curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitPoint {
    pub date: String,
    pub profit: f64,
}

// Backtest statistics as computed by the backend.
// Without options data for the range the backend answers `{}`, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestResult {
    pub total_profit: Option<f64>,
    pub total_trades: Option<f64>,
    pub successful_trades: Option<f64>,
    pub stop_losses_hit: Option<f64>,
    pub negative_trades: Option<f64>,
    pub neutral_trades: Option<f64>,
    pub success_rate: Option<f64>,
    pub avg_gain_per_successful_trade: Option<f64>,
    pub profit_curve: Vec<ProfitPoint>,
}

impl BacktestResult {
    /// True when the backend had nothing to report.
    pub fn is_empty(&self) -> bool {
        self.total_trades.is_none() && self.profit_curve.is_empty()
    }
}

/// Response of `/api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Outcome of one backend update operation.
///
/// Only the final step (`update-models`) carries the two dates used for the
/// model status badge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStepResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_market_day: Option<String>,
}

/// The backend update operations, in the order they must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStep {
    StockData,
    OptionsData,
    Models,
}

impl UpdateStep {
    pub const ALL: [UpdateStep; 3] = [
        UpdateStep::StockData,
        UpdateStep::OptionsData,
        UpdateStep::Models,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            UpdateStep::StockData => "/api/update-stock-data",
            UpdateStep::OptionsData => "/api/update-options-data",
            UpdateStep::Models => "/api/update-models",
        }
    }

    /// Progress line logged before the step is issued.
    pub fn progress_label(&self) -> &'static str {
        match self {
            UpdateStep::StockData => "Updating stock data table...",
            UpdateStep::OptionsData => "Updating option data table...",
            UpdateStep::Models => "Updating models...",
        }
    }
}

impl fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateStep::StockData => "stock data",
            UpdateStep::OptionsData => "options data",
            UpdateStep::Models => "models",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backtest_request_body_has_six_fields() {
        let req = BacktestRequest {
            ticker: "SPY".to_string(),
            start_date: "2024-01-02".to_string(),
            end_date: "2024-03-01".to_string(),
            option_type: "call".to_string(),
            deviation: "1.5".to_string(),
            stop_loss: "200".to_string(),
        };

        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 6);
        for key in ["ticker", "start_date", "end_date", "option_type", "deviation", "stop_loss"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(obj["deviation"], json!("1.5"));
    }

    #[test]
    fn test_backtest_result_without_curve() {
        let body = json!({
            "total_profit": 1250.5,
            "total_trades": 12,
            "successful_trades": 9,
            "stop_losses_hit": 1,
            "negative_trades": 2,
            "neutral_trades": 0,
            "success_rate": 75.0,
            "avg_gain_per_successful_trade": 150.25
        });

        let result: BacktestResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.total_trades, Some(12.0));
        assert!(result.profit_curve.is_empty());
    }

    #[test]
    fn test_empty_backtest_result_is_accepted() {
        let result: BacktestResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(result, BacktestResult::default());
        assert!(result.is_empty());
        assert_eq!(result.total_profit, None);
    }

    #[test]
    fn test_update_step_result_defaults() {
        let result: UpdateStepResult = serde_json::from_value(json!({})).unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "");
        assert!(result.latest_date.is_none());

        let result: UpdateStepResult = serde_json::from_value(json!({
            "success": true,
            "message": "Models updated",
            "latest_date": "2024-06-03",
            "last_market_day": "2024-06-03"
        }))
        .unwrap();
        assert!(result.success);
        assert_eq!(result.last_market_day.as_deref(), Some("2024-06-03"));
    }

    #[test]
    fn test_update_step_order_and_paths() {
        let paths: Vec<&str> = UpdateStep::ALL.iter().map(|s| s.path()).collect();
        assert_eq!(
            paths,
            vec![
                "/api/update-stock-data",
                "/api/update-options-data",
                "/api/update-models"
            ]
        );
    }

    #[test]
    fn test_health_response() {
        let health: HealthResponse = serde_json::from_value(json!({
            "status": "healthy",
            "message": "Covered Call App is running"
        }))
        .unwrap();
        assert!(health.is_healthy());

        let health: HealthResponse = serde_json::from_value(json!({"status": "degraded"})).unwrap();
        assert!(!health.is_healthy());
    }
}
