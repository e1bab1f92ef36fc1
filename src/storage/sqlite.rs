/// SQLite implementation of the persistence gateway
///
/// Concrete `EnergyStore` backed by a SQLite database. Enum-valued fields
/// are normalized to their lower-case wire form on write and denormalized to
/// the canonical casing on read; every statement re-applies the user scope.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use rusqlite::{params, Connection};

use crate::domain::{
    EnergyAction, EnergyEntry, EnergyLevel, EnergyType, EntryId, PhysicalActivity, TobaccoUrge,
};
use crate::storage::{migrations, EnergyStore, StorageError, UserContext};

/// SQLite-based gateway implementation
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open the database file and run any pending migrations
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::with_connection(conn).map(|storage| {
            tracing::info!("SQLite storage initialized at: {:?}", db_path);
            storage
        })
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Map an entry row to the domain record, denormalizing wire forms
    fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<EnergyEntry> {
        let id_str: String = row.get(0)?;
        let id = EntryId::parse(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        let logged_at_str: String = row.get(1)?;
        let timestamp = parse_timestamp(&logged_at_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(1, "Invalid datetime".to_string(), rusqlite::types::Type::Text)
        })?;

        let level_raw: u8 = row.get(2)?;
        let level = EnergyLevel::new(level_raw).map_err(|_| {
            rusqlite::Error::InvalidColumnType(2, "Invalid level".to_string(), rusqlite::types::Type::Integer)
        })?;

        let energy_type_str: String = row.get(3)?;
        let energy_type = EnergyType::from_wire(&energy_type_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(3, "Invalid energy type".to_string(), rusqlite::types::Type::Text)
        })?;

        let factors_json: String = row.get(4)?;
        let factors: Vec<String> = serde_json::from_str(&factors_json).map_err(|_| {
            rusqlite::Error::InvalidColumnType(4, "Invalid factors".to_string(), rusqlite::types::Type::Text)
        })?;

        let urge_str: String = row.get(5)?;
        let tobacco_urge = TobaccoUrge::from_wire(&urge_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(5, "Invalid tobacco urge".to_string(), rusqlite::types::Type::Text)
        })?;

        let activity_str: String = row.get(6)?;
        let physical_activity = PhysicalActivity::from_wire(&activity_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(6, "Invalid activity".to_string(), rusqlite::types::Type::Text)
        })?;

        Ok(EnergyEntry::from_existing(
            id,
            timestamp,
            level,
            energy_type,
            factors,
            tobacco_urge,
            physical_activity,
            row.get(7)?, // meals
            row.get(8)?, // water_ml
            row.get(9)?, // notes
        ))
    }
}

/// Parse a stored RFC 3339 timestamp into local time
fn parse_timestamp(s: &str) -> Result<DateTime<Local>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Local))
}

/// Restore a stored lower-case action type to its display casing
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl EnergyStore for SqliteStorage {
    /// Idempotently register the user identity
    fn ensure_user(&self, ctx: &UserContext) -> Result<(), StorageError> {
        let user = ctx.require()?;
        self.conn.execute(
            "INSERT INTO users (id) VALUES (?1) ON CONFLICT (id) DO NOTHING",
            params![user.0],
        )?;
        Ok(())
    }

    /// Insert a new log entry under a store-assigned ID
    fn create_entry(&self, ctx: &UserContext, entry: &EnergyEntry) -> Result<(), StorageError> {
        let user = ctx.require()?;
        // The store owns the canonical ID; whatever the session assigned is
        // discarded here and picked up again on the next list_entries.
        let row_id = EntryId::new();
        let factors_json = serde_json::to_string(&entry.factors)?;

        self.conn.execute(
            "INSERT INTO energy_logs (
                id, user_id, logged_at, level, energy_type, factors,
                tobacco_urge, physical_activity, meals, water_ml, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                row_id.to_string(),
                user.0,
                entry.timestamp.to_rfc3339(),
                entry.level.get(),
                entry.energy_type.as_wire(),
                factors_json,
                entry.tobacco_urge.as_wire(),
                entry.physical_activity.as_wire(),
                entry.meals,
                entry.water_ml,
                entry.notes,
            ],
        )?;

        tracing::debug!("Created energy log {} for user {}", row_id, user);
        Ok(())
    }

    /// All entries for the user, most recent first
    fn list_entries(&self, ctx: &UserContext) -> Result<Vec<EnergyEntry>, StorageError> {
        let user = ctx.require()?;
        let mut stmt = self.conn.prepare(
            "SELECT id, logged_at, level, energy_type, factors,
                    tobacco_urge, physical_activity, meals, water_ml, notes
             FROM energy_logs WHERE user_id = ?1
             ORDER BY logged_at DESC",
        )?;

        let entry_iter = stmt.query_map(params![user.0], Self::row_to_entry)?;

        let mut entries = Vec::new();
        for entry in entry_iter {
            entries.push(entry?);
        }

        Ok(entries)
    }

    /// Delete the entry matching both ID and user
    ///
    /// The user scope in the predicate guards against cross-user deletion.
    /// A missing row is a no-op, not an error.
    fn delete_entry(&self, ctx: &UserContext, id: &EntryId) -> Result<(), StorageError> {
        let user = ctx.require()?;
        let rows_affected = self.conn.execute(
            "DELETE FROM energy_logs WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user.0],
        )?;

        if rows_affected == 0 {
            tracing::debug!("Delete of {} for user {} matched no rows", id, user);
        } else {
            tracing::debug!("Deleted energy log {} for user {}", id, user);
        }
        Ok(())
    }

    /// Insert an action event stamped with the current time
    fn create_action(&self, ctx: &UserContext, action_type: &str) -> Result<(), StorageError> {
        let user = ctx.require()?;
        self.conn.execute(
            "INSERT INTO energy_actions (user_id, logged_at, action_type)
             VALUES (?1, ?2, ?3)",
            params![
                user.0,
                Local::now().to_rfc3339(),
                action_type.to_lowercase(),
            ],
        )?;

        tracing::debug!("Recorded action '{}' for user {}", action_type, user);
        Ok(())
    }

    /// All action events for the user, most recent first
    fn list_actions(&self, ctx: &UserContext) -> Result<Vec<EnergyAction>, StorageError> {
        let user = ctx.require()?;
        let mut stmt = self.conn.prepare(
            "SELECT action_type, logged_at FROM energy_actions
             WHERE user_id = ?1 ORDER BY logged_at DESC",
        )?;

        let action_iter = stmt.query_map(params![user.0], |row| {
            let type_str: String = row.get(0)?;

            let logged_at_str: String = row.get(1)?;
            let timestamp = parse_timestamp(&logged_at_str).map_err(|_| {
                rusqlite::Error::InvalidColumnType(1, "Invalid datetime".to_string(), rusqlite::types::Type::Text)
            })?;

            Ok(EnergyAction::from_existing(title_case(&type_str), timestamp))
        })?;

        let mut actions = Vec::new();
        for action in action_iter {
            actions.push(action?);
        }

        Ok(actions)
    }
}
