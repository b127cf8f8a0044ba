pub mod backtest;
pub mod errors;
pub mod health;
pub mod predict;
pub mod update;

// Re-export main interfaces
pub use backtest::{BacktestForm, BacktestFormController, SubmitOutcome};
pub use errors::ServiceError;
pub use health::HealthReporter;
pub use predict::PredictFormController;
pub use update::{set_model_status, ModelUpdateOrchestrator, UpdateReport};
