//! Board view model: header, sections, tiles and the focus indicator

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::RingView;
use crate::{
    roster::{Badge, Group, TimerItem},
    state::{Phase, Session, TimerUnit},
};

pub const BOARD_TITLE: &str = "Focus.";
pub const BOARD_INTRO: &str = "Selecciona una tarea para comenzar. Solo una a la vez.";
pub const SECTION_DONE_LABEL: &str = "Completado";
pub const INDICATOR_LABEL: &str = "Enfocado";

/// Interaction state of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    /// Startable, shows the duration and the start affordance
    Idle,
    /// Another timer is active; dimmed and inert
    Disabled,
    /// Counting down
    Active,
}

/// Countdown details of the active tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownView {
    pub phase: Phase,
    pub phase_label: String,
    pub seconds_left: u64,
    pub remaining: String,
    pub progress_percent: f64,
    pub ring: RingView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub id: String,
    pub label: String,
    pub minutes: u64,
    pub secondary_minutes: Option<u64>,
    pub state: TileState,
    pub startable: bool,
    pub countdown: Option<CountdownView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub key: String,
    pub title: String,
    pub badges: Vec<Badge>,
    pub tiles: Vec<TileView>,
    pub completed: bool,
    pub completed_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderView {
    pub completed: usize,
    pub total: usize,
    pub progress_percent: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorView {
    pub visible: bool,
    pub label: String,
}

/// Everything a client needs to draw the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub title: String,
    pub intro: String,
    pub header: HeaderView,
    pub sections: Vec<SectionView>,
    pub indicator: IndicatorView,
    pub active_id: Option<String>,
}

impl BoardView {
    /// Derive the view from the coordinator and the mounted units
    pub fn build(session: &Session, units: &HashMap<String, TimerUnit>) -> Self {
        let completed = session.completed_count();
        let total = session.total_initial();

        Self {
            title: BOARD_TITLE.to_string(),
            intro: BOARD_INTRO.to_string(),
            header: HeaderView {
                completed,
                total,
                progress_percent: session.completion_percent(),
                label: format!("{}/{}", completed, total),
            },
            sections: session
                .groups()
                .iter()
                .map(|group| SectionView::build(group, session, units))
                .collect(),
            indicator: IndicatorView {
                visible: session.is_busy(),
                label: INDICATOR_LABEL.to_string(),
            },
            active_id: session.active_id().map(str::to_owned),
        }
    }

    pub fn tile(&self, id: &str) -> Option<&TileView> {
        self.sections
            .iter()
            .flat_map(|section| section.tiles.iter())
            .find(|tile| tile.id == id)
    }
}

impl SectionView {
    fn build(group: &Group, session: &Session, units: &HashMap<String, TimerUnit>) -> Self {
        let completed = group.is_empty();
        Self {
            key: group.key.clone(),
            title: group.title.clone(),
            badges: group.badges.clone(),
            tiles: group
                .items
                .iter()
                .map(|item| TileView::build(item, session, units.get(&item.id)))
                .collect(),
            completed,
            completed_label: completed.then(|| SECTION_DONE_LABEL.to_string()),
        }
    }
}

impl TileView {
    fn build(item: &TimerItem, session: &Session, unit: Option<&TimerUnit>) -> Self {
        let state = if session.is_active(&item.id) {
            TileState::Active
        } else if session.is_busy() {
            TileState::Disabled
        } else {
            TileState::Idle
        };

        let countdown = match (state, unit) {
            (TileState::Active, Some(unit)) => {
                let progress_percent = unit.progress_percent();
                Some(CountdownView {
                    phase: unit.phase(),
                    phase_label: unit.phase().label().to_string(),
                    seconds_left: unit.seconds_left(),
                    remaining: unit.remaining_label(),
                    progress_percent,
                    ring: RingView::new(progress_percent, unit.phase()),
                })
            }
            _ => None,
        };

        Self {
            id: item.id.clone(),
            label: item.label.clone(),
            minutes: item.duration_primary,
            secondary_minutes: item.duration_secondary,
            state,
            startable: state == TileState::Idle,
            countdown,
        }
    }
}
