//! Fixed board configuration

use super::{Badge, Group, TimerItem};

/// Number of tiles each group starts with
pub const TIMERS_PER_GROUP: usize = 6;

/// Build `count` timers with ids `"{prefix}-{index}"`
pub fn create_timers(count: usize, duration: u64, prefix: &str, secondary: Option<u64>) -> Vec<TimerItem> {
    (0..count)
        .map(|i| TimerItem::new(format!("{}-{}", prefix, i), duration, secondary))
        .collect()
}

/// The three exercise sections the board starts with
pub fn default_roster() -> Vec<Group> {
    vec![
        Group::new(
            "sentadillas",
            "Sentadillas",
            vec![Badge::accent("3 min rest")],
            create_timers(TIMERS_PER_GROUP, 3, "3 Min-a", None),
        ),
        Group::new(
            "lagartijas",
            "Lagartijas",
            vec![Badge::accent("3 min rest")],
            create_timers(TIMERS_PER_GROUP, 3, "3 Min-b", None),
        ),
        Group::new(
            "planchas",
            "Planchas",
            vec![Badge::accent("1 min work"), Badge::recover("3 min rest")],
            create_timers(TIMERS_PER_GROUP, 1, "1 Min", Some(3)),
        ),
    ]
}
