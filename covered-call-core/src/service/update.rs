use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::ServiceError;
use crate::api::{ApiError, DashboardApi};
use crate::page::{targets, DomOp, Page};
use crate::render::{self, LogClass};
use crate::scheduler::ScheduledTask;
use covered_call_common::{ModelStatus, UpdateStep, UpdateStepResult};

/// Summary of a completed update run
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub steps: Vec<(UpdateStep, UpdateStepResult)>,
    pub status: ModelStatus,
}

impl UpdateReport {
    pub fn final_message(&self) -> &str {
        self.steps.last().map(|(_, r)| r.message.as_str()).unwrap_or("")
    }

    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|(_, r)| r.success)
    }
}

/// Render the model status badge if the page has one.
pub fn set_model_status(
    page: &dyn Page,
    latest_date: Option<&str>,
    last_market_day: Option<&str>,
) -> ModelStatus {
    let status = ModelStatus::from_dates(latest_date, last_market_day);
    if page.exists(targets::STATUS_INDICATOR) && page.exists(targets::STATUS) {
        page.apply_all(render::model_status(latest_date, last_market_day));
    } else {
        debug!("No status badge on page, skipping render");
    }
    status
}

/// Runs the stock, options and model updates one after another.
pub struct ModelUpdateOrchestrator {
    api: Arc<dyn DashboardApi>,
    page: Arc<dyn Page>,
    log_clear_delay: Duration,
    log_clear: Mutex<Option<ScheduledTask>>,
}

impl ModelUpdateOrchestrator {
    pub fn new(api: Arc<dyn DashboardApi>, page: Arc<dyn Page>, log_clear_delay: Duration) -> Self {
        Self {
            api,
            page,
            log_clear_delay,
            log_clear: Mutex::new(None),
        }
    }

    /// Issue one update step and log its outcome on the page.
    pub async fn run_step(&self, step: UpdateStep) -> Result<UpdateStepResult, ApiError> {
        self.page.apply(render::log_entry(step.progress_label(), LogClass::Step));

        let result = self.api.run_update_step(step).await?;
        if result.success {
            info!("Update step '{}' succeeded: {}", step, result.message);
        } else {
            warn!("Update step '{}' reported failure: {}", step, result.message);
        }

        self.page
            .apply(render::log_entry(&result.message, LogClass::from_success(result.success)));
        Ok(result)
    }

    /// Run all three steps in order.
    ///
    /// A step that reports `success: false` does not stop the run. A step whose
    /// request fails does: the remaining steps are skipped, the spinner stays
    /// up and no alert is shown.
    pub async fn run(&self) -> Result<UpdateReport, ServiceError> {
        self.cancel_log_clear();
        self.page.apply_all(render::update_started());

        let mut steps = Vec::with_capacity(UpdateStep::ALL.len());
        for step in UpdateStep::ALL {
            match self.run_step(step).await {
                Ok(result) => steps.push((step, result)),
                Err(source) => {
                    error!("Update aborted at '{}' step: {}", step, source);
                    return Err(ServiceError::UpdateAborted { step, source });
                }
            }
        }

        let last = steps.last().map(|(_, r)| r.clone()).unwrap_or_default();
        self.page.apply_all(render::update_finished(&last.message));

        let status = set_model_status(
            self.page.as_ref(),
            last.latest_date.as_deref(),
            last.last_market_day.as_deref(),
        );
        info!("Model update finished, status {:?}", status);

        self.schedule_log_clear();

        Ok(UpdateReport { steps, status })
    }

    fn schedule_log_clear(&self) {
        let page = Arc::clone(&self.page);
        let task = ScheduledTask::after("log-clear", self.log_clear_delay, move || {
            page.apply(DomOp::clear(targets::LOG));
        });

        let mut slot = self.log_clear.lock().unwrap_or_else(|p| p.into_inner());
        // Replacing drops, and so cancels, any earlier pending clear.
        *slot = Some(task);
    }

    fn cancel_log_clear(&self) {
        let mut slot = self.log_clear.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(mut task) = slot.take() {
            task.cancel();
        }
    }

    pub fn has_pending_log_clear(&self) -> bool {
        let slot = self.log_clear.lock().unwrap_or_else(|p| p.into_inner());
        slot.as_ref().map_or(false, |task| !task.is_finished())
    }

    /// Cancel pending scheduled work.
    pub fn shutdown(&self) {
        self.cancel_log_clear();
    }
}
