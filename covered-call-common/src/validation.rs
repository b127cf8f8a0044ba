// covered-call-common/src/validation.rs

use chrono::NaiveDate;
use thiserror::Error;

/// Earliest start date the backend holds option data for.
pub const MIN_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 5, 10) {
    Some(date) => date,
    None => panic!("invalid minimum start date"),
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-range rejections shown inline under the backtest form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid {field} date: '{value}'.")]
    InvalidDate { field: &'static str, value: String },

    #[error("Start date cannot be before May 10, 2023.")]
    StartBeforeMinimum,

    #[error("Start date cannot be after end date.")]
    StartAfterEnd,

    #[error("End date cannot be after today's date ({today}).")]
    EndAfterToday { today: String },
}

/// A date range that passed every check.
///
/// The raw strings are kept so the request carries exactly what was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_raw: String,
    pub end_raw: String,
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}

/// Check a backtest date range. The first failing rule wins.
pub fn validate_date_range(
    start: &str,
    end: &str,
    today: NaiveDate,
) -> Result<DateRange, ValidationError> {
    let start_date = parse_date("start", start)?;
    let end_date = parse_date("end", end)?;

    if start_date < MIN_START_DATE {
        return Err(ValidationError::StartBeforeMinimum);
    }
    if start_date > end_date {
        return Err(ValidationError::StartAfterEnd);
    }
    if end_date > today {
        return Err(ValidationError::EndAfterToday {
            today: today.format(DATE_FORMAT).to_string(),
        });
    }

    Ok(DateRange {
        start: start_date,
        end: end_date,
        start_raw: start.to_string(),
        end_raw: end.to_string(),
    })
}
