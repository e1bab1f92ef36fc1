/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier newtypes, the validated energy level,
/// and the three closed enums that appear on every log entry. Each enum has a
/// canonical in-memory form (title case) and a wire form (lower case) used by
/// the persistence gateway; the two are mapped by `as_wire`/`from_wire`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Identity of the journal's owner, supplied by the embedding host
///
/// The persistence gateway scopes every operation by this value. There is no
/// account management here - identity resolution happens outside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a log entry
///
/// Wrapper around UUID for type safety - you can't accidentally pass some
/// other string where an entry ID is expected. Session-local entries get a
/// fresh v4 ID; persisted entries carry the ID the store assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entry ID from a string (useful when loading from storage)
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Subjective energy level on the 1-5 scale
///
/// The only required field on an entry. Constructed through `new` so an
/// out-of-range value can never reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EnergyLevel(u8);

impl EnergyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a level, rejecting anything outside 1-5
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::InvalidLevel(value));
        }
        Ok(Self(value))
    }

    /// The raw 1-5 value
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Human label shown next to the level selector
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Severely depleted",
            2 => "Low",
            3 => "Moderate",
            4 => "Good",
            _ => "High",
        }
    }
}

impl TryFrom<u8> for EnergyLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EnergyLevel> for u8 {
    fn from(level: EnergyLevel) -> u8 {
        level.0
    }
}

/// Which kind of energy the entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyType {
    Physical,
    Cognitive,
    Both,
}

/// Tobacco urge intensity recorded alongside the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TobaccoUrge {
    None,
    Mild,
    Strong,
}

/// Physical activity since the previous entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysicalActivity {
    None,
    Light,
    Moderate,
    Vigorous,
}

/// One-way canonicalization contract with the record store: enum values are
/// stored lower-case and read back in the canonical title-case form. Parsing
/// is case-insensitive so any casing already in the store round-trips.
macro_rules! wire_enum {
    ($name:ident, $field:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// All defined variants, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Lower-case form used by the persistence gateway
            pub fn as_wire(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Canonical display form (matches the variant name)
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// Parse a stored value back into the canonical form
            pub fn from_wire(s: &str) -> Result<Self, DomainError> {
                let lowered = s.to_ascii_lowercase();
                match lowered.as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(DomainError::UnknownWireValue {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum!(EnergyType, "energy_type", {
    Physical => "physical",
    Cognitive => "cognitive",
    Both => "both",
});

wire_enum!(TobaccoUrge, "tobacco_urge", {
    None => "none",
    Mild => "mild",
    Strong => "strong",
});

wire_enum!(PhysicalActivity, "physical_activity", {
    None => "none",
    Light => "light",
    Moderate => "moderate",
    Vigorous => "vigorous",
});

/// Suggested contributing-factor tags offered by the entry form
///
/// Purely advisory - `factors` is an open string set and anything the user
/// submits is stored as-is.
pub const SUGGESTED_FACTORS: &[&str] = &[
    "Poor sleep",
    "Withdrawal",
    "Missed meal",
    "Dehydration",
    "Work stress",
    "Physical activity",
    "Good sleep",
    "Post-meal fatigue",
    "Emotional strain",
    "Other",
];

/// Fixed ladder of water volumes the form steps through, in millilitres
pub const WATER_STEPS: &[u32] = &[0, 250, 500, 750, 1000, 1500, 2000, 2500, 3000];

/// Daily fluid intake target used by the today-stats view
pub const DAILY_WATER_TARGET_ML: u32 = 2000;

/// Short label for a water-ladder step ("1L", "3L+", ...)
pub fn water_step_label(ml: u32) -> String {
    match ml {
        0 => "0".to_string(),
        3000 => "3L+".to_string(),
        ml if ml % 1000 == 0 => format!("{}L", ml / 1000),
        ml if ml >= 1000 => format!("{:.1}L", ml as f64 / 1000.0),
        ml => format!("{}ml", ml),
    }
}
