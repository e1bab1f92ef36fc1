/// EnergyEntry record and its pre-save draft form
///
/// An entry is one energy-level observation. It is immutable once persisted:
/// all editing happens on the `EntryDraft` before save, and the only
/// post-save operation is full deletion.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, EnergyLevel, EnergyType, EntryId, PhysicalActivity, TobaccoUrge,
};

/// One energy-level log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEntry {
    /// Unique identifier; assigned by the store for persisted records
    pub id: EntryId,
    /// Point in time the entry describes (user-editable, may be backdated)
    pub timestamp: DateTime<Local>,
    /// Subjective energy level, the one required field
    pub level: EnergyLevel,
    /// Whether the reading is physical, cognitive, or both
    pub energy_type: EnergyType,
    /// Free-form contributing-factor tags, stored as submitted
    pub factors: Vec<String>,
    pub tobacco_urge: TobaccoUrge,
    pub physical_activity: PhysicalActivity,
    /// Running meal count for the day (cumulative, not per-entry)
    pub meals: u32,
    /// Fluid intake in millilitres
    pub water_ml: u32,
    /// Free-form notes, may be empty
    pub notes: String,
}

impl EnergyEntry {
    /// Reconstruct an entry from already-validated stored data
    ///
    /// Used by the storage layer when loading rows; assumes the store only
    /// ever held values that passed through a draft.
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: EntryId,
        timestamp: DateTime<Local>,
        level: EnergyLevel,
        energy_type: EnergyType,
        factors: Vec<String>,
        tobacco_urge: TobaccoUrge,
        physical_activity: PhysicalActivity,
        meals: u32,
        water_ml: u32,
        notes: String,
    ) -> Self {
        Self {
            id,
            timestamp,
            level,
            energy_type,
            factors,
            tobacco_urge,
            physical_activity,
            meals,
            water_ml,
            notes,
        }
    }

    /// Local calendar date this entry belongs to
    pub fn local_date(&self) -> chrono::NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Editable form state for an entry that has not been saved yet
///
/// Every field has a default except `level`, which starts unset; `finish`
/// refuses to produce an `EnergyEntry` until a level has been chosen. This is
/// the validation gate the interaction surface relies on to keep its save
/// control disabled.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub timestamp: DateTime<Local>,
    pub level: Option<EnergyLevel>,
    pub energy_type: EnergyType,
    pub factors: Vec<String>,
    pub tobacco_urge: TobaccoUrge,
    pub physical_activity: PhysicalActivity,
    pub meals: u32,
    pub water_ml: u32,
    pub notes: String,
}

impl EntryDraft {
    /// Start a fresh draft stamped with the current time
    pub fn new() -> Self {
        Self {
            timestamp: Local::now(),
            level: None,
            energy_type: EnergyType::Both,
            factors: Vec::new(),
            tobacco_urge: TobaccoUrge::None,
            physical_activity: PhysicalActivity::None,
            meals: 0,
            water_ml: 0,
            notes: String::new(),
        }
    }

    /// Select the energy level
    pub fn level(mut self, level: EnergyLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Toggle a factor tag on or off
    pub fn toggle_factor(&mut self, factor: &str) {
        if let Some(pos) = self.factors.iter().position(|f| f == factor) {
            self.factors.remove(pos);
        } else {
            self.factors.push(factor.to_string());
        }
    }

    /// Whether the draft is complete enough to save
    pub fn is_saveable(&self) -> bool {
        self.level.is_some()
    }

    /// Turn the draft into a session-local entry with a fresh ID
    ///
    /// Fails with `MissingLevel` when no level was selected. The assigned ID
    /// is provisional - the store replaces it with its own on persist.
    pub fn finish(self) -> Result<EnergyEntry, DomainError> {
        let level = self.level.ok_or(DomainError::MissingLevel)?;
        Ok(EnergyEntry {
            id: EntryId::new(),
            timestamp: self.timestamp,
            level,
            energy_type: self.energy_type,
            factors: self.factors,
            tobacco_urge: self.tobacco_urge,
            physical_activity: self.physical_activity,
            meals: self.meals,
            water_ml: self.water_ml,
            notes: self.notes,
        })
    }
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::new()
    }
}
