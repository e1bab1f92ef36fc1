/// EnergyAction record for completed self-care actions
///
/// Actions form an append-only event stream independent of log entries.
/// There is no relationship between the two and actions are never deleted.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single completed self-care action ("water", "walk", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyAction {
    /// Free-form action tag
    pub action_type: String,
    /// Time of completion
    pub timestamp: DateTime<Local>,
}

impl EnergyAction {
    /// Record an action as completed right now
    pub fn now(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            timestamp: Local::now(),
        }
    }

    /// Reconstruct an action from stored data
    pub fn from_existing(action_type: String, timestamp: DateTime<Local>) -> Self {
        Self {
            action_type,
            timestamp,
        }
    }
}
