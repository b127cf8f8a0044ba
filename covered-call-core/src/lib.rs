pub mod api;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod page;
pub mod render;
pub mod scheduler;
pub mod service;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard::Dashboard;
pub use state::AppState;
