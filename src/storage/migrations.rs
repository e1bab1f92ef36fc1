/// Database migration management
///
/// Creates and updates the SQLite schema: the per-user record tables for
/// energy logs and action events, plus version tracking for future changes.

use rusqlite::Connection;

use crate::storage::StorageError;

/// Current database schema version
///
/// Increment this when you add new migrations
const CURRENT_VERSION: i32 = 1;

/// Initialize the database schema
///
/// Creates all required tables and indexes if they don't exist and records
/// the schema version. Safe to call on every startup.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current_version = get_current_version(conn)?;

    if current_version < CURRENT_VERSION {
        run_migrations(conn, current_version)?;
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

/// Get the current database schema version
fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get::<_, i32>(0)
        })
        .unwrap_or(0); // No version record means a fresh database

    Ok(version)
}

/// Set the database schema version
fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Run database migrations from the current version to the latest
fn run_migrations(conn: &Connection, from_version: i32) -> Result<(), StorageError> {
    if from_version < 1 {
        migration_v1(conn)?;
    }

    // Future migrations would go here:
    // if from_version < 2 {
    //     migration_v2(conn)?;
    // }

    Ok(())
}

/// Migration to version 1: create the users, energy_logs and energy_actions
/// tables
///
/// Enum-valued columns (energy_type, tobacco_urge, physical_activity,
/// action_type) hold the lower-case wire form; `factors` is a JSON array.
fn migration_v1(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS energy_logs (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            logged_at TEXT NOT NULL,
            level INTEGER NOT NULL,
            energy_type TEXT NOT NULL,
            factors TEXT NOT NULL,
            tobacco_urge TEXT NOT NULL,
            physical_activity TEXT NOT NULL,
            meals INTEGER NOT NULL DEFAULT 0,
            water_ml INTEGER NOT NULL DEFAULT 0,
            notes TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS energy_actions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            logged_at TEXT NOT NULL,
            action_type TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        [],
    )?;

    create_indexes_v1(conn)?;

    tracing::info!("Applied migration v1: Created initial database schema");
    Ok(())
}

/// Create database indexes for version 1
fn create_indexes_v1(conn: &Connection) -> Result<(), StorageError> {
    // Both list operations read one user's rows ordered by time
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_energy_logs_user_logged
         ON energy_logs (user_id, logged_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_energy_actions_user_logged
         ON energy_actions (user_id, logged_at)",
        [],
    )?;

    Ok(())
}
