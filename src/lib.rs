//! Focus Board - A state-managed HTTP server for an interval timer board
//!
//! This library holds the timer roster, the single-active-timer coordinator,
//! the per-tile countdown state machine and the HTTP surface that renders it.

pub mod api;
pub mod config;
pub mod roster;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
