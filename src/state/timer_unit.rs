//! Per-tile countdown state machine

use serde::{Deserialize, Serialize};

use crate::roster::TimerItem;

/// Countdown phase of a timer unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Primary,
    Recovery,
}

impl Phase {
    /// Label shown under the ring while running
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Primary => "Active",
            Phase::Recovery => "Rest",
        }
    }
}

/// Externally visible state of a timer unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Idle,
    RunningPrimary,
    RunningRecovery,
}

/// Result of advancing a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Unit is not running, nothing changed
    Idle,
    /// Still counting down in the current phase
    Counting,
    /// Primary reached zero and the rest phase began
    EnteredRecovery,
    /// The last phase reached zero; the unit must be removed
    Completed,
}

/// Countdown state of one tile
///
/// The unit only changes through [`TimerUnit::begin`] and [`TimerUnit::tick`],
/// so whoever holds it is the single writer of its phase and remaining time.
#[derive(Debug, Clone)]
pub struct TimerUnit {
    item: TimerItem,
    phase: Phase,
    seconds_left: u64,
    running: bool,
}

impl TimerUnit {
    /// Mount a unit for an item, idle in the primary phase
    pub fn new(item: TimerItem) -> Self {
        let seconds_left = item.duration_primary * 60;
        Self {
            item,
            phase: Phase::Primary,
            seconds_left,
            running: false,
        }
    }

    /// Get the id of the item this unit counts down
    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Get the item this unit was mounted for
    pub fn item(&self) -> &TimerItem {
        &self.item
    }

    /// Get the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the seconds left in the current phase
    pub fn seconds_left(&self) -> u64 {
        self.seconds_left
    }

    /// Check if the unit is counting down
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the state derived from the running flag and phase
    pub fn state(&self) -> UnitState {
        match (self.running, self.phase) {
            (false, _) => UnitState::Idle,
            (true, Phase::Primary) => UnitState::RunningPrimary,
            (true, Phase::Recovery) => UnitState::RunningRecovery,
        }
    }

    /// Enter the primary phase after the coordinator accepted the start
    ///
    /// A phase that is already at zero is settled right away.
    pub fn begin(&mut self) -> TickOutcome {
        self.phase = Phase::Primary;
        self.seconds_left = self.item.duration_primary * 60;
        self.running = true;
        self.settle()
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        self.settle()
    }

    fn settle(&mut self) -> TickOutcome {
        if self.seconds_left > 0 {
            return TickOutcome::Counting;
        }

        match (self.phase, self.item.duration_secondary) {
            (Phase::Primary, Some(minutes)) if minutes > 0 => {
                self.phase = Phase::Recovery;
                self.seconds_left = minutes * 60;
                TickOutcome::EnteredRecovery
            }
            _ => {
                self.running = false;
                TickOutcome::Completed
            }
        }
    }

    /// Full length of the current phase in seconds
    pub fn phase_max_seconds(&self) -> u64 {
        match self.phase {
            Phase::Primary => self.item.duration_primary * 60,
            Phase::Recovery => self.item.duration_secondary.unwrap_or(0) * 60,
        }
    }

    /// Elapsed share of the current phase, 0..=100
    pub fn progress_percent(&self) -> f64 {
        let max = self.phase_max_seconds();
        if max == 0 {
            return 0.0;
        }
        (max - self.seconds_left.min(max)) as f64 / max as f64 * 100.0
    }

    /// Remaining time as `m:ss`
    pub fn remaining_label(&self) -> String {
        format_clock(self.seconds_left)
    }
}

/// Format seconds as minutes and zero-padded seconds
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(primary: u64, secondary: Option<u64>) -> TimerUnit {
        TimerUnit::new(TimerItem::new("t", primary, secondary))
    }

    fn tick_n(unit: &mut TimerUnit, n: u64) -> TickOutcome {
        let mut last = TickOutcome::Idle;
        for _ in 0..n {
            last = unit.tick();
        }
        last
    }

    #[test]
    fn mounts_idle_in_primary() {
        let unit = unit(3, None);
        assert_eq!(unit.state(), UnitState::Idle);
        assert_eq!(unit.phase(), Phase::Primary);
        assert_eq!(unit.seconds_left(), 180);
    }

    #[test]
    fn idle_unit_never_decrements() {
        let mut unit = unit(3, None);
        assert_eq!(tick_n(&mut unit, 10), TickOutcome::Idle);
        assert_eq!(unit.seconds_left(), 180);
    }

    #[test]
    fn each_tick_removes_one_second() {
        let mut unit = unit(3, None);
        assert_eq!(unit.begin(), TickOutcome::Counting);
        assert_eq!(unit.state(), UnitState::RunningPrimary);
        assert_eq!(unit.tick(), TickOutcome::Counting);
        assert_eq!(unit.seconds_left(), 179);
    }

    #[test]
    fn two_phase_unit_enters_recovery_instead_of_completing() {
        let mut unit = unit(1, Some(3));
        unit.begin();

        assert_eq!(tick_n(&mut unit, 59), TickOutcome::Counting);
        assert_eq!(unit.seconds_left(), 1);
        assert_eq!(unit.tick(), TickOutcome::EnteredRecovery);
        assert_eq!(unit.state(), UnitState::RunningRecovery);
        assert_eq!(unit.seconds_left(), 180);

        assert_eq!(tick_n(&mut unit, 179), TickOutcome::Counting);
        assert_eq!(unit.tick(), TickOutcome::Completed);
        assert!(!unit.is_running());
    }

    #[test]
    fn single_phase_unit_completes_at_zero() {
        let mut unit = unit(3, None);
        unit.begin();
        assert_eq!(tick_n(&mut unit, 179), TickOutcome::Counting);
        assert_eq!(unit.tick(), TickOutcome::Completed);
        assert_eq!(unit.seconds_left(), 0);
    }

    #[test]
    fn zero_length_phases_settle_on_entry() {
        assert_eq!(unit(0, None).begin(), TickOutcome::Completed);

        let mut rest_only = unit(0, Some(2));
        assert_eq!(rest_only.begin(), TickOutcome::EnteredRecovery);
        assert_eq!(rest_only.seconds_left(), 120);
    }

    #[test]
    fn progress_tracks_the_current_phase() {
        let mut plank = unit(1, Some(3));
        assert_eq!(plank.progress_percent(), 0.0);
        plank.begin();
        tick_n(&mut plank, 30);
        assert!((plank.progress_percent() - 50.0).abs() < f64::EPSILON);

        tick_n(&mut plank, 30);
        assert_eq!(plank.phase(), Phase::Recovery);
        assert_eq!(plank.progress_percent(), 0.0);
        assert_eq!(unit(0, None).progress_percent(), 0.0);
    }

    #[test]
    fn clock_format_pads_seconds() {
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(59), "0:59");
    }

    #[test]
    fn phase_labels() {
        assert_eq!(Phase::Primary.label(), "Active");
        assert_eq!(Phase::Recovery.label(), "Rest");
    }
}
