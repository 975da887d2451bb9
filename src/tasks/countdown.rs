//! Countdown background task

use std::sync::Weak;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Duration, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Interval between two ticks of the active unit
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owned handle of a running countdown task
///
/// Dropping the handle aborts the task, so every path that releases it also
/// stops the ticking.
#[derive(Debug)]
pub struct CountdownHandle {
    id: String,
    generation: u64,
    handle: JoinHandle<()>,
}

impl CountdownHandle {
    /// Id of the timer the task is driving
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Distinguishes this task from earlier countdowns of the same timer
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the task has stopped running
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the ticking task for `id`; the first tick lands one period from now
pub fn spawn_countdown(state: Weak<AppState>, id: String, generation: u64) -> CountdownHandle {
    let start = Instant::now() + TICK_PERIOD;
    let task_id = id.clone();
    let handle = tokio::spawn(async move {
        countdown_task(state, task_id, generation, start).await;
    });

    CountdownHandle { id, generation, handle }
}

/// Tick the unit once per period until it completes or stops being active
pub async fn countdown_task(state: Weak<AppState>, id: String, generation: u64, start: Instant) {
    info!("Starting countdown for {}", id);

    let mut interval = interval_at(start, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(state) = state.upgrade() else {
            debug!("App state dropped, stopping countdown for {}", id);
            break;
        };

        match state.tick_countdown(&id, generation) {
            Ok(TickOutcome::Counting) | Ok(TickOutcome::EnteredRecovery) => {}
            Ok(TickOutcome::Completed) => {
                debug!("Countdown for {} finished", id);
                break;
            }
            Ok(TickOutcome::Idle) => {
                debug!("Timer {} is no longer active, stopping countdown", id);
                break;
            }
            Err(e) => {
                error!("Failed to tick timer {}: {}", id, e);
                break;
            }
        }
    }
}
