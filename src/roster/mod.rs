//! Roster module
//!
//! Timer items, the groups they belong to, and the fixed board configuration.

pub mod defaults;
pub mod item;

// Re-export main types
pub use defaults::{create_timers, default_roster};
pub use item::{Badge, BadgeKind, Group, TimerItem};
