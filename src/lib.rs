/// Energy journal core library
///
/// Session state, per-user persistence and derived views for a personal
/// energy-level journal. The embedding interaction surface owns rendering
/// and timers; everything it reads or writes goes through the `EnergyJournal`
/// facade exported here.

use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;

// Internal modules
mod analytics;
mod domain;
mod selfcare;
mod session;
mod storage;

// Re-export public modules and types
pub use analytics::{
    export::{export_filename, to_csv, CSV_HEADER, CSV_MIME_TYPE},
    entries_on, group_by_date, timeline_position, today_stats, today_timeline, urge_correlation,
    weekly_series, DateGroup, DaySummary, TimelinePoint, TodayStats, TIMELINE_END_HOUR,
    TIMELINE_START_HOUR,
};
pub use domain::*;
pub use selfcare::{
    ActionBoard, BreathPhase, BreathingGuide, TapOutcome, TileKind, TileSpec, TileState,
    BREATHING_SESSION_SECS, REST_SECS, TILES, WALK_SECS,
};
pub use session::SessionStore;
pub use storage::{
    fallback::default_data_dir, EnergyStore, FileStore, SqliteStorage, StorageError, UserContext,
};

/// Errors surfaced by the journal facade
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// How the journal should persist records
#[derive(Debug, Default)]
pub struct JournalConfig {
    /// Resolved user identity, or None for an anonymous local-only session
    pub user: Option<UserId>,
    /// Database file for the persistence gateway; defaults under the data dir
    pub database_path: Option<PathBuf>,
    /// Directory for the local fallback files; defaults to the data dir
    pub data_dir: Option<PathBuf>,
}

impl JournalConfig {
    /// Configuration for an identified user with default paths
    pub fn for_user(user: UserId) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }
}

/// Where records go when the session mutates
enum Backend {
    /// Persistence gateway, scoped by the session's user context
    Remote {
        storage: SqliteStorage,
        ctx: UserContext,
    },
    /// Local fallback files for anonymous sessions
    Local(FileStore),
}

/// The journal facade the interaction surface talks to
///
/// Owns the session's Local Store and the persistence backend. Mutations are
/// applied optimistically to the session, written through, and followed by a
/// refetch; a failed remote write leaves the optimistic copy in place (no
/// rollback) and surfaces the error for a transient notification.
pub struct EnergyJournal {
    backend: Backend,
    session: SessionStore,
}

impl EnergyJournal {
    /// Open a journal session according to the configuration
    ///
    /// With a user identity this registers the user and populates the
    /// session from the gateway; without one it loads the local fallback
    /// files instead, so the journal stays usable offline.
    pub fn open(config: JournalConfig) -> Result<Self, JournalError> {
        match config.user {
            Some(user) => {
                let db_path = config.database_path.unwrap_or_else(|| {
                    let mut p = config.data_dir.clone().unwrap_or_else(default_data_dir);
                    p.push("energy.db");
                    p
                });
                if let Some(parent) = db_path.parent() {
                    std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
                }
                let storage = SqliteStorage::new(db_path)?;
                Self::with_gateway(storage, user)
            }
            None => {
                tracing::info!("No user identity; using the local fallback store");
                let store = match config.data_dir {
                    Some(dir) => FileStore::open(dir)?,
                    None => FileStore::open_default()?,
                };
                Ok(Self::with_fallback(store))
            }
        }
    }

    /// Open against an already-constructed gateway (used by tests and hosts
    /// that manage the database themselves)
    pub fn with_gateway(storage: SqliteStorage, user: UserId) -> Result<Self, JournalError> {
        let ctx = UserContext::known(user);
        storage.ensure_user(&ctx)?;

        let mut session = SessionStore::new();
        session.replace_entries(storage.list_entries(&ctx)?);
        session.replace_actions(storage.list_actions(&ctx)?);
        tracing::info!(
            "Journal session opened for user {} with {} entries",
            user,
            session.entries().len()
        );

        Ok(Self {
            backend: Backend::Remote { storage, ctx },
            session,
        })
    }

    /// Open an anonymous session over a local fallback store
    pub fn with_fallback(store: FileStore) -> Self {
        let mut session = SessionStore::new();
        session.replace_entries(store.load_entries());
        session.replace_actions(store.load_actions());

        Self {
            backend: Backend::Local(store),
            session,
        }
    }

    /// Finish a draft and save the entry
    ///
    /// The session gets the entry immediately (optimistic, most-recent-first);
    /// the backend write follows, and on success the session is refreshed so
    /// it carries the store-assigned ID. A remote failure keeps the
    /// optimistic copy and returns the error.
    pub fn save_entry(&mut self, draft: EntryDraft) -> Result<EntryId, JournalError> {
        let entry = draft.finish()?;
        let id = self.session.add(entry.clone());

        match &mut self.backend {
            Backend::Remote { storage, ctx } => {
                if let Err(e) = storage.create_entry(ctx, &entry) {
                    tracing::warn!("Remote save failed, keeping local copy: {}", e);
                    return Err(e.into());
                }
                self.session.replace_entries(storage.list_entries(ctx)?);
                // The refetched row carries the store-assigned canonical ID
                let id = self
                    .session
                    .entries()
                    .iter()
                    .find(|e| e.timestamp == entry.timestamp && e.notes == entry.notes)
                    .map(|e| e.id.clone())
                    .unwrap_or(id);
                Ok(id)
            }
            Backend::Local(store) => {
                store.save_entries(self.session.entries())?;
                Ok(id)
            }
        }
    }

    /// Remove an entry by ID; unknown IDs are a no-op
    pub fn remove_entry(&mut self, id: &EntryId) -> Result<(), JournalError> {
        self.session.remove(id);

        match &mut self.backend {
            Backend::Remote { storage, ctx } => {
                storage.delete_entry(ctx, id)?;
                self.session.replace_entries(storage.list_entries(ctx)?);
                Ok(())
            }
            Backend::Local(store) => {
                store.save_entries(self.session.entries())?;
                Ok(())
            }
        }
    }

    /// Record a completed self-care action
    pub fn record_action(&mut self, action_type: &str) -> Result<(), JournalError> {
        self.session.record_action(action_type);

        match &mut self.backend {
            Backend::Remote { storage, ctx } => {
                storage.create_action(ctx, action_type)?;
                self.session.replace_actions(storage.list_actions(ctx)?);
                Ok(())
            }
            Backend::Local(store) => {
                store.save_actions(self.session.actions())?;
                Ok(())
            }
        }
    }

    /// All entries in the session, most recent first
    pub fn entries(&self) -> &[EnergyEntry] {
        self.session.entries()
    }

    /// All recorded actions, most recent first
    pub fn actions(&self) -> &[EnergyAction] {
        self.session.actions()
    }

    /// Today's entries
    pub fn today(&self) -> Vec<&EnergyEntry> {
        self.session.today()
    }

    /// Aggregates for the today snapshot card
    pub fn today_stats(&self) -> TodayStats {
        analytics::today_stats(self.session.entries(), Local::now().date_naive())
    }

    /// Rolling 7-day series ending today
    pub fn weekly_series(&self) -> Vec<DaySummary> {
        analytics::weekly_series(self.session.entries(), Local::now().date_naive())
    }

    /// Timeline points for today's entries
    pub fn today_timeline(&self) -> Vec<TimelinePoint> {
        analytics::today_timeline(self.session.entries(), Local::now().date_naive())
    }

    /// History list: entries grouped by date, filtered by a search term
    pub fn history(&self, search: &str) -> Vec<DateGroup<'_>> {
        analytics::group_by_date(self.session.entries(), search)
    }

    /// Percentage of low-energy entries with a strong tobacco urge
    pub fn urge_correlation(&self) -> u32 {
        analytics::urge_correlation(self.session.entries())
    }

    /// CSV export of the full collection plus its suggested filename
    pub fn export_csv(&self) -> (String, String) {
        (
            analytics::export::export_filename(Local::now().date_naive()),
            analytics::export::to_csv(self.session.entries()),
        )
    }
}

/// Install a default tracing subscriber for hosts that don't bring their own
///
/// Reads `RUST_LOG`-style filtering from the environment, defaulting to warn.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("energy_journal=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
