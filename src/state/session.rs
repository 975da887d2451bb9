//! Session coordinator: the roster and the single active timer

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::roster::{Group, TimerItem};

/// Answer to a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOutcome {
    /// The timer became the active one
    Started,
    /// Another timer is active; the request was dropped
    Ignored,
    /// No timer with that id is on the board
    Unknown,
}

/// Owns the groups and the `active_id` flag
#[derive(Debug, Clone)]
pub struct Session {
    groups: Vec<Group>,
    active_id: Option<String>,
    total_initial: usize,
}

impl Session {
    /// Create a session over the given groups with no active timer
    pub fn new(groups: Vec<Group>) -> Self {
        let total_initial = groups.iter().map(Group::len).sum();
        Self {
            groups,
            active_id: None,
            total_initial,
        }
    }

    /// Grant the active slot to `id` if it is free
    pub fn request_start(&mut self, id: &str) -> StartOutcome {
        if self.find(id).is_none() {
            debug!("Start request for unknown timer {}", id);
            return StartOutcome::Unknown;
        }
        if let Some(active) = &self.active_id {
            debug!("Start request for {} ignored, {} is active", id, active);
            return StartOutcome::Ignored;
        }

        self.active_id = Some(id.to_string());
        StartOutcome::Started
    }

    /// Clear the active slot if held by `id` and drop the item from its group
    ///
    /// Returns whether anything changed.
    pub fn report_complete(&mut self, id: &str) -> bool {
        let was_active = self.active_id.as_deref() == Some(id);
        if was_active {
            self.active_id = None;
        }

        let removed = self.groups.iter_mut().any(|group| group.remove(id));
        was_active || removed
    }

    /// Get the id of the active timer, if any
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Check if any timer holds the active slot
    pub fn is_busy(&self) -> bool {
        self.active_id.is_some()
    }

    /// Check if `id` holds the active slot
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.as_deref() == Some(id)
    }

    /// Get the groups in board order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Find a remaining item by id in any group
    pub fn find(&self, id: &str) -> Option<&TimerItem> {
        self.groups.iter().find_map(|group| group.get(id))
    }

    /// Iterate over every remaining item across groups
    pub fn items(&self) -> impl Iterator<Item = &TimerItem> {
        self.groups.iter().flat_map(|group| group.items.iter())
    }

    /// Count the items still on the board
    pub fn remaining_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Get the number of items the board started with
    pub fn total_initial(&self) -> usize {
        self.total_initial
    }

    /// Count the items removed by completion
    pub fn completed_count(&self) -> usize {
        self.total_initial - self.remaining_count()
    }

    /// Completed share of the roster, 0..=100
    pub fn completion_percent(&self) -> f64 {
        if self.total_initial == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / self.total_initial as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::default_roster;

    fn session() -> Session {
        Session::new(default_roster())
    }

    #[test]
    fn starts_with_full_roster_and_no_active_timer() {
        let session = session();
        assert_eq!(session.total_initial(), 18);
        assert_eq!(session.remaining_count(), 18);
        assert_eq!(session.completed_count(), 0);
        assert!(!session.is_busy());
    }

    #[test]
    fn second_start_is_ignored_while_busy() {
        let mut session = session();
        assert_eq!(session.request_start("3 Min-a-0"), StartOutcome::Started);
        assert_eq!(session.request_start("3 Min-b-1"), StartOutcome::Ignored);
        assert_eq!(session.active_id(), Some("3 Min-a-0"));
        assert!(!session.is_active("3 Min-b-1"));
    }

    #[test]
    fn restarting_the_active_timer_is_ignored() {
        let mut session = session();
        session.request_start("1 Min-2");
        assert_eq!(session.request_start("1 Min-2"), StartOutcome::Ignored);
    }

    #[test]
    fn unknown_ids_never_take_the_slot() {
        let mut session = session();
        assert_eq!(session.request_start("nope"), StartOutcome::Unknown);
        assert!(!session.is_busy());
    }

    #[test]
    fn completion_frees_the_slot_and_removes_the_item() {
        let mut session = session();
        session.request_start("3 Min-a-0");

        assert!(session.report_complete("3 Min-a-0"));
        assert!(!session.is_busy());
        assert!(session.find("3 Min-a-0").is_none());
        assert_eq!(session.completed_count(), 1);
        assert_eq!(session.remaining_count(), 17);
    }

    #[test]
    fn completing_twice_changes_state_once() {
        let mut session = session();
        session.request_start("3 Min-a-0");
        session.report_complete("3 Min-a-0");
        let after_first = (session.remaining_count(), session.active_id().map(str::to_owned));

        assert!(!session.report_complete("3 Min-a-0"));
        assert_eq!(
            (session.remaining_count(), session.active_id().map(str::to_owned)),
            after_first
        );
    }

    #[test]
    fn completing_another_id_keeps_the_active_timer() {
        let mut session = session();
        session.request_start("3 Min-a-0");
        assert!(session.report_complete("3 Min-b-3"));
        assert_eq!(session.active_id(), Some("3 Min-a-0"));
    }

    #[test]
    fn counts_always_add_up_to_the_initial_total() {
        let mut session = session();
        let ids: Vec<String> = session.items().map(|item| item.id.clone()).collect();

        for id in &ids {
            assert_eq!(session.request_start(id), StartOutcome::Started);
            session.report_complete(id);
            assert_eq!(session.completed_count() + session.remaining_count(), 18);
        }
        assert_eq!(session.completed_count(), 18);
        assert!((session.completion_percent() - 100.0).abs() < f64::EPSILON);
        assert!(session.groups().iter().all(Group::is_empty));
    }

    #[test]
    fn empty_roster_has_zero_completion() {
        assert_eq!(Session::new(Vec::new()).completion_percent(), 0.0);
    }
}
