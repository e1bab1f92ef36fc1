/// Domain module containing the core record types
///
/// This module defines the two record kinds the journal tracks (EnergyEntry
/// and EnergyAction) along with the closed enums, their wire-form mapping,
/// and the validation rules that apply before a record may be persisted.

pub mod action;
pub mod entry;
pub mod types;

// Re-export public types for easy access
pub use action::*;
pub use entry::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid energy level: {0} (must be 1-5)")]
    InvalidLevel(u8),

    #[error("An energy level must be selected before the entry can be saved")]
    MissingLevel,

    #[error("Unrecognized {field} value: {value}")]
    UnknownWireValue { field: &'static str, value: String },
}
