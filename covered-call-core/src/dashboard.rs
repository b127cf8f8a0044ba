use std::sync::Arc;
use tracing::{debug, info};

use crate::api::DashboardApi;
use crate::clock::Clock;
use crate::config::Settings;
use crate::page::{targets, Page};
use crate::service::{
    set_model_status, BacktestForm, BacktestFormController, HealthReporter, ModelUpdateOrchestrator,
    PredictFormController, ServiceError, SubmitOutcome, UpdateReport,
};
use covered_call_common::ModelStatus;

/// Page-level wiring of the dashboard controllers.
///
/// Controllers are attached only when the template provides their element, so
/// a page without the backtest form or the update button simply lacks those
/// actions.
pub struct Dashboard {
    page: Arc<dyn Page>,
    health: HealthReporter,
    backtest: Option<BacktestFormController>,
    predict: Option<PredictFormController>,
    updater: Option<ModelUpdateOrchestrator>,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        page: Arc<dyn Page>,
        clock: Arc<dyn Clock>,
        settings: &Settings,
    ) -> Self {
        let backtest = page.exists(targets::BACKTEST_FORM).then(|| {
            BacktestFormController::new(Arc::clone(&api), Arc::clone(&page), Arc::clone(&clock))
        });
        let predict = page
            .exists(targets::PREDICT_FORM)
            .then(|| PredictFormController::new(Arc::clone(&page)));
        let updater = page.exists(targets::UPDATE_MODELS_BTN).then(|| {
            ModelUpdateOrchestrator::new(
                Arc::clone(&api),
                Arc::clone(&page),
                settings.log_clear_delay(),
            )
        });

        debug!(
            "Dashboard wired: backtest={}, predict={}, update={}",
            backtest.is_some(),
            predict.is_some(),
            updater.is_some()
        );

        Self {
            health: HealthReporter::new(api),
            page,
            backtest,
            predict,
            updater,
        }
    }

    /// Page-load work: health check, then the initial model status badge.
    pub async fn load(&self) -> bool {
        info!("Covered Call dashboard loaded");
        let healthy = self.health.check_api_health().await;
        self.apply_initial_status();
        healthy
    }

    /// Render the status badge from the dates the template was served with.
    pub fn apply_initial_status(&self) -> Option<ModelStatus> {
        let latest = non_empty(self.page.text(targets::LAST_UPDATE))?;
        let market = non_empty(self.page.text(targets::LAST_MARKET_DAY))?;
        Some(set_model_status(self.page.as_ref(), Some(&latest), Some(&market)))
    }

    pub async fn submit_backtest(&self, form: BacktestForm) -> Result<SubmitOutcome, ServiceError> {
        let controller = self
            .backtest
            .as_ref()
            .ok_or(ServiceError::MissingElement(targets::BACKTEST_FORM))?;
        controller.submit(form).await
    }

    pub fn submit_predict(&self) -> Result<(), ServiceError> {
        let controller = self
            .predict
            .as_ref()
            .ok_or(ServiceError::MissingElement(targets::PREDICT_FORM))?;
        controller.on_submit();
        Ok(())
    }

    pub async fn update_models(&self) -> Result<UpdateReport, ServiceError> {
        let updater = self
            .updater
            .as_ref()
            .ok_or(ServiceError::MissingElement(targets::UPDATE_MODELS_BTN))?;
        updater.run().await
    }

    pub async fn app_status(&self) -> Option<serde_json::Value> {
        self.health.get_app_status().await
    }

    /// Cancel scheduled work tied to this page.
    pub fn teardown(&self) {
        if let Some(updater) = &self.updater {
            updater.shutdown();
        }
        debug!("Dashboard torn down");
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
