//! Background tasks module
//!
//! This module contains the countdown task that ticks the active timer.

pub mod countdown;

// Re-export main items
pub use countdown::{countdown_task, spawn_countdown, CountdownHandle, TICK_PERIOD};
