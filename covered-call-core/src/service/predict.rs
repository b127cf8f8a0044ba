use std::sync::Arc;
use tracing::debug;

use crate::page::{targets, DomOp, Page};

/// The prediction form posts natively; submitting only raises the spinner.
pub struct PredictFormController {
    page: Arc<dyn Page>,
}

impl PredictFormController {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    pub fn on_submit(&self) {
        debug!("Prediction form submitted");
        self.page.apply(DomOp::show(targets::SPINNER));
    }
}
