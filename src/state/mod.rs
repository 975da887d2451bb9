//! State management module
//!
//! The session coordinator, the per-tile timer units and the shared
//! application state that ties them to the countdown task.

pub mod app_state;
pub mod session;
pub mod timer_unit;

// Re-export main types
pub use app_state::{ActiveTimer, AppState};
pub use session::{Session, StartOutcome};
pub use timer_unit::{format_clock, Phase, TickOutcome, TimerUnit, UnitState};
