// covered-call-common/src/status.rs

use serde::{Deserialize, Serialize};

/// Freshness of the trained models relative to the last market day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelStatus {
    UpToDate,
    Outdated,
}

impl ModelStatus {
    /// Compare the latest stored trading date with the last market day.
    ///
    /// Missing values count as empty strings and both sides are trimmed, so two
    /// missing dates compare equal.
    pub fn from_dates(latest_date: Option<&str>, last_market_day: Option<&str>) -> Self {
        let latest = latest_date.map(str::trim).unwrap_or("");
        let market = last_market_day.map(str::trim).unwrap_or("");
        if latest == market {
            ModelStatus::UpToDate
        } else {
            ModelStatus::Outdated
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ModelStatus::UpToDate => "#4caf50",
            ModelStatus::Outdated => "#d32f2f",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelStatus::UpToDate => "Up-to-date",
            ModelStatus::Outdated => "Outdated",
        }
    }
}
