/// Storage layer: the persistence gateway and the local fallback store
///
/// The gateway side (`EnergyStore` + `SqliteStorage`) persists records per
/// user in a SQLite database; the fallback side (`FileStore`) serves sessions
/// with no resolvable identity from two local JSON files.

pub mod fallback;
pub mod migrations;
pub mod sqlite;

pub use fallback::FileStore;
pub use sqlite::SqliteStorage;

use thiserror::Error;

use crate::domain::{EnergyAction, EnergyEntry, EntryId, UserId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// No resolvable user identity for a gateway operation
    #[error("No user identity available for this operation")]
    Unauthenticated,

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Fallback store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Externally-supplied user identity, applied to every gateway call
///
/// The calling convention does not guarantee session affinity, so the scope
/// is carried with each operation instead of being set once per session.
/// An anonymous context makes every gateway operation fail with
/// `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    user: Option<UserId>,
}

impl UserContext {
    /// Context for a resolved user identity
    pub fn known(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// Context with no resolvable identity
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    /// The identity, or `Unauthenticated` when there is none
    pub fn require(&self) -> Result<UserId, StorageError> {
        self.user.ok_or(StorageError::Unauthenticated)
    }
}

/// The persistence gateway contract
///
/// Every operation is scoped by the owning user via the context argument;
/// implementations must re-apply that scope on each call rather than caching
/// it per session.
pub trait EnergyStore {
    /// Idempotently register the user identity in the store
    fn ensure_user(&self, ctx: &UserContext) -> Result<(), StorageError>;

    /// Insert a new log entry; the store assigns the canonical row ID and
    /// any client-supplied ID is discarded
    fn create_entry(&self, ctx: &UserContext, entry: &EnergyEntry) -> Result<(), StorageError>;

    /// All entries for the user, most recent first
    fn list_entries(&self, ctx: &UserContext) -> Result<Vec<EnergyEntry>, StorageError>;

    /// Delete the entry matching both ID and user; missing rows are a no-op
    fn delete_entry(&self, ctx: &UserContext, id: &EntryId) -> Result<(), StorageError>;

    /// Insert an action event stamped with the current time
    fn create_action(&self, ctx: &UserContext, action_type: &str) -> Result<(), StorageError>;

    /// All action events for the user, most recent first
    fn list_actions(&self, ctx: &UserContext) -> Result<Vec<EnergyAction>, StorageError>;
}
