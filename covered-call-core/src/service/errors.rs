use thiserror::Error;

use crate::api::ApiError;
use covered_call_common::UpdateStep;

/// Controller-level error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Update aborted at {step} step: {source}")]
    UpdateAborted {
        step: UpdateStep,
        #[source]
        source: ApiError,
    },

    #[error("Element not present on page: {0}")]
    MissingElement(&'static str),
}

impl ServiceError {
    /// Whether the page was left mid-operation (spinner or loading indicator still shown).
    pub fn leaves_page_busy(&self) -> bool {
        match self {
            ServiceError::Api(_) => true,
            ServiceError::UpdateAborted { .. } => true,
            ServiceError::MissingElement(_) => false,
        }
    }
}
