//! Main application state management

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Phase, Session, StartOutcome, TickOutcome, TimerUnit};
use crate::{
    roster::{default_roster, Group},
    tasks::{spawn_countdown, CountdownHandle},
    view::BoardView,
};

/// Snapshot of the timer currently counting down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub id: String,
    pub phase: Phase,
    pub seconds_left: u64,
    pub remaining: String,
}

/// Shared state behind the HTTP server: the coordinator, the mounted units
/// and the live countdown task
///
/// Locks are always taken in the order countdown, session, units.
#[derive(Debug)]
pub struct AppState {
    /// Roster and active slot
    session: Mutex<Session>,
    /// One mounted unit per remaining timer item
    units: Mutex<HashMap<String, TimerUnit>>,
    /// Ticking task of the active unit, aborted when dropped
    countdown: Mutex<Option<CountdownHandle>>,
    /// Generation handed to the next countdown task
    next_generation: AtomicU64,
    /// Roster restored by a reset
    initial_roster: Vec<Group>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for board updates
    pub board_update_tx: watch::Sender<BoardView>,
    /// Keep the receiver alive to prevent channel closure
    pub _board_update_rx: watch::Receiver<BoardView>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, String> {
    mutex
        .lock()
        .map_err(|e| format!("Failed to lock {}: {}", what, e))
}

fn mount_units(session: &Session) -> HashMap<String, TimerUnit> {
    session
        .items()
        .map(|item| (item.id.clone(), TimerUnit::new(item.clone())))
        .collect()
}

impl AppState {
    /// Create an AppState over the default board
    pub fn new(port: u16, host: String) -> Self {
        Self::with_roster(port, host, default_roster())
    }

    /// Create an AppState over a specific roster
    pub fn with_roster(port: u16, host: String, roster: Vec<Group>) -> Self {
        let session = Session::new(roster.clone());
        let units = mount_units(&session);
        let (board_update_tx, board_update_rx) = watch::channel(BoardView::build(&session, &units));

        Self {
            session: Mutex::new(session),
            units: Mutex::new(units),
            countdown: Mutex::new(None),
            next_generation: AtomicU64::new(0),
            initial_roster: roster,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            board_update_tx,
            _board_update_rx: board_update_rx,
        }
    }

    /// Forward a tile's start interaction to the coordinator
    ///
    /// On acceptance the unit enters its primary phase and gets a countdown
    /// task. A rejected request leaves every unit untouched.
    pub fn start_timer(self: &Arc<Self>, id: &str) -> Result<StartOutcome, String> {
        let entry = {
            let mut countdown = lock(&self.countdown, "countdown")?;
            let mut session = lock(&self.session, "session")?;

            let item = match session.request_start(id) {
                StartOutcome::Started => session.find(id).cloned(),
                StartOutcome::Ignored => {
                    debug!("Timer {} not started, another timer is active", id);
                    return Ok(StartOutcome::Ignored);
                }
                StartOutcome::Unknown => return Ok(StartOutcome::Unknown),
            };
            let Some(item) = item else {
                return Ok(StartOutcome::Unknown);
            };

            let mut units = lock(&self.units, "timer units")?;
            let entry = units
                .entry(item.id.clone())
                .or_insert_with(|| TimerUnit::new(item))
                .begin();

            if entry == TickOutcome::Completed {
                session.report_complete(id);
                units.remove(id);
            } else {
                let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                *countdown = Some(spawn_countdown(Arc::downgrade(self), id.to_string(), generation));
            }
            entry
        };

        info!("Timer {} started", id);
        self.record_action("start");
        if entry == TickOutcome::Completed {
            info!("Timer {} completed", id);
            self.record_action("complete");
        }
        self.publish();

        Ok(StartOutcome::Started)
    }

    /// Advance the active unit by one second on behalf of its current countdown
    pub fn tick_timer(&self, id: &str) -> Result<TickOutcome, String> {
        self.advance(id, None)
    }

    /// Advance the active unit for the countdown task of `generation`
    ///
    /// A task whose countdown has since been replaced or cancelled gets
    /// `Idle` back and changes nothing.
    pub fn tick_countdown(&self, id: &str, generation: u64) -> Result<TickOutcome, String> {
        self.advance(id, Some(generation))
    }

    // Only the unit that holds the countdown slot and the active flag is
    // advanced. Completion is reported and the countdown released under the
    // same locks, so a reset either precedes the tick or sees its result.
    fn advance(&self, id: &str, generation: Option<u64>) -> Result<TickOutcome, String> {
        let (outcome, finished) = {
            let mut countdown = lock(&self.countdown, "countdown")?;
            let owns_slot = countdown.as_ref().is_some_and(|handle| {
                handle.id() == id && generation.map_or(true, |g| handle.generation() == g)
            });
            if !owns_slot {
                return Ok(TickOutcome::Idle);
            }

            let mut session = lock(&self.session, "session")?;
            if !session.is_active(id) {
                return Ok(TickOutcome::Idle);
            }

            let mut units = lock(&self.units, "timer units")?;
            let outcome = units.get_mut(id).map_or(TickOutcome::Idle, TimerUnit::tick);

            let finished = if outcome == TickOutcome::Completed {
                session.report_complete(id);
                units.remove(id);
                countdown.take()
            } else {
                None
            };
            (outcome, finished)
        };
        drop(finished);

        match outcome {
            TickOutcome::Counting => self.publish(),
            TickOutcome::EnteredRecovery => {
                info!("Timer {} entered its rest phase", id);
                self.publish();
            }
            TickOutcome::Completed => {
                info!("Timer {} completed", id);
                self.record_action("complete");
                self.publish();
            }
            TickOutcome::Idle => {}
        }

        Ok(outcome)
    }

    /// Handle a unit's completion signal
    ///
    /// Returns whether anything changed; a repeated signal is a no-op.
    pub fn complete_timer(&self, id: &str) -> Result<bool, String> {
        let (changed, cancelled) = {
            let mut countdown = lock(&self.countdown, "countdown")?;
            let cancelled = if countdown.as_ref().is_some_and(|handle| handle.id() == id) {
                countdown.take()
            } else {
                None
            };

            let mut session = lock(&self.session, "session")?;
            let changed = session.report_complete(id);
            lock(&self.units, "timer units")?.remove(id);
            (changed, cancelled)
        };
        drop(cancelled);

        if changed {
            info!("Timer {} completed", id);
            self.record_action("complete");
            self.publish();
        }

        Ok(changed)
    }

    /// Restore the initial roster, tearing down any running countdown
    pub fn reset(&self) -> Result<(), String> {
        let cancelled = {
            let mut countdown = lock(&self.countdown, "countdown")?;
            let cancelled = countdown.take();

            let mut session = lock(&self.session, "session")?;
            *session = Session::new(self.initial_roster.clone());
            *lock(&self.units, "timer units")? = mount_units(&session);
            cancelled
        };

        if let Some(handle) = cancelled {
            info!("Reset cancelled the countdown of {}", handle.id());
        }
        info!("Board reset");
        self.record_action("reset");
        self.publish();
        Ok(())
    }

    /// Cancel the running countdown, if any
    pub fn shutdown(&self) -> Result<(), String> {
        if let Some(handle) = lock(&self.countdown, "countdown")?.take() {
            info!("Cancelling countdown of {} on shutdown", handle.id());
        }
        Ok(())
    }

    /// Whether a countdown task is currently held
    pub fn has_countdown(&self) -> Result<bool, String> {
        lock(&self.countdown, "countdown").map(|countdown| countdown.is_some())
    }

    /// Build the current board view
    pub fn board(&self) -> Result<BoardView, String> {
        let session = lock(&self.session, "session")?;
        let units = lock(&self.units, "timer units")?;
        Ok(BoardView::build(&session, &units))
    }

    /// Get a copy of the coordinator state
    pub fn get_session(&self) -> Result<Session, String> {
        lock(&self.session, "session").map(|session| session.clone())
    }

    /// Get a copy of a mounted unit
    pub fn get_unit(&self, id: &str) -> Result<Option<TimerUnit>, String> {
        lock(&self.units, "timer units").map(|units| units.get(id).cloned())
    }

    /// Number of mounted units currently running a phase
    pub fn running_units(&self) -> Result<usize, String> {
        lock(&self.units, "timer units").map(|units| units.values().filter(|u| u.is_running()).count())
    }

    /// Get the active timer, if any
    pub fn active_timer(&self) -> Result<Option<ActiveTimer>, String> {
        let session = lock(&self.session, "session")?;
        let Some(id) = session.active_id() else {
            return Ok(None);
        };
        let units = lock(&self.units, "timer units")?;

        Ok(units.get(id).map(|unit| ActiveTimer {
            id: id.to_string(),
            phase: unit.phase(),
            seconds_left: unit.seconds_left(),
            remaining: unit.remaining_label(),
        }))
    }

    fn publish(&self) {
        match self.board() {
            Ok(view) => {
                if let Err(e) = self.board_update_tx.send(view) {
                    warn!("Failed to send board update: {}", e);
                }
            }
            Err(e) => warn!("Failed to build board update: {}", e),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
