// api/mod.rs
pub mod errors;
pub mod http;
pub mod traits;

pub use errors::ApiError;
pub use http::HttpDashboardApi;
pub use traits::DashboardApi;
