/// In-session state
///
/// Owns the current collections of entries and actions for the running
/// session. Mutations go through the methods here and nowhere else; ordering
/// is most-recent-first and maintained by insertion, never by re-sorting.

use chrono::Local;

use crate::analytics;
use crate::domain::{EnergyAction, EnergyEntry, EntryId};

/// Mutable session-local collections of entries and actions
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: Vec<EnergyEntry>,
    actions: Vec<EnergyAction>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an entry under a fresh session-local ID
    ///
    /// Returns the assigned ID so callers can refer to the entry before the
    /// next refresh replaces it with the store's canonical one.
    pub fn add(&mut self, mut entry: EnergyEntry) -> EntryId {
        entry.id = EntryId::new();
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        id
    }

    /// Remove the entry with the matching ID; absent IDs are a no-op
    pub fn remove(&mut self, id: &EntryId) {
        self.entries.retain(|e| &e.id != id);
    }

    /// Prepend an action stamped with the current time
    pub fn record_action(&mut self, action_type: impl Into<String>) {
        self.actions.insert(0, EnergyAction::now(action_type));
    }

    /// Current entries, most recent first
    pub fn entries(&self) -> &[EnergyEntry] {
        &self.entries
    }

    /// Current actions, most recent first
    pub fn actions(&self) -> &[EnergyAction] {
        &self.actions
    }

    /// Entries whose local calendar date is today
    pub fn today(&self) -> Vec<&EnergyEntry> {
        analytics::entries_on(&self.entries, Local::now().date_naive())
    }

    /// Replace the entries collection after a gateway refetch
    pub fn replace_entries(&mut self, entries: Vec<EnergyEntry>) {
        self.entries = entries;
    }

    /// Replace the actions collection after a gateway refetch
    pub fn replace_actions(&mut self, actions: Vec<EnergyAction>) {
        self.actions = actions;
    }
}
