//! Timer item and group structures

use serde::{Deserialize, Serialize};

/// A single exercise timer on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerItem {
    /// Unique across the whole roster
    pub id: String,
    /// Work phase length in minutes
    pub duration_primary: u64,
    /// Rest phase length in minutes, if the timer has one
    pub duration_secondary: Option<u64>,
    pub label: String,
}

impl TimerItem {
    /// Create a timer item labelled after its primary duration
    pub fn new(id: impl Into<String>, duration_primary: u64, duration_secondary: Option<u64>) -> Self {
        Self {
            id: id.into(),
            duration_primary,
            duration_secondary,
            label: format!("{} Min", duration_primary),
        }
    }

    /// Whether a rest phase follows the work phase
    pub fn has_recovery(&self) -> bool {
        matches!(self.duration_secondary, Some(minutes) if minutes > 0)
    }
}

/// Visual flavour of a section badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    Accent,
    Recover,
}

/// Work/rest annotation shown next to a section title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub kind: BadgeKind,
}

impl Badge {
    /// Create an accent badge
    pub fn accent(label: impl Into<String>) -> Self {
        Self { label: label.into(), kind: BadgeKind::Accent }
    }

    /// Create a recovery badge
    pub fn recover(label: impl Into<String>) -> Self {
        Self { label: label.into(), kind: BadgeKind::Recover }
    }
}

/// Named, ordered collection of timer items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub title: String,
    pub badges: Vec<Badge>,
    pub items: Vec<TimerItem>,
}

impl Group {
    /// Create a group from its items
    pub fn new(key: impl Into<String>, title: impl Into<String>, badges: Vec<Badge>, items: Vec<TimerItem>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            badges,
            items,
        }
    }

    /// Count the items in the group
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if every item of the group has been completed
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item of the group by id
    pub fn get(&self, id: &str) -> Option<&TimerItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Remove the item with the given id, returning whether it was present
    pub fn remove(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != initial_len
    }
}
