pub mod chart;
pub mod status;
pub mod types;
pub mod validation;

pub use chart::{reduce_profit_curve, ChartConfig};
pub use status::ModelStatus;
pub use types::*;
pub use validation::{validate_date_range, DateRange, ValidationError, MIN_START_DATE};
