//! Artifact store: the single shared handle every pipeline operation uses.
//!
//! `ArtifactStore` wraps `CraftDb` with a store-wide reader/writer gate. One
//! libSQL connection sees its own uncommitted writes, so without the gate a
//! reader running between `BEGIN` and `COMMIT` could observe a half-replaced
//! child set. Writers (every mutation) take the exclusive side, readers take
//! the shared side.
//!
//! Public store methods acquire the gate exactly once and never call other
//! public store methods; shared SQL lives in `conn`-taking helpers.

use std::path::Path;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use craft_config::StorageConfig;
use craft_core::enums::EntityKind;

use crate::CraftDb;
use crate::error::DatabaseError;
use crate::helpers::entity_table;

pub struct ArtifactStore {
    db: CraftDb,
    gate: RwLock<()>,
}

impl ArtifactStore {
    /// Open the store described by the storage configuration, creating the
    /// database's parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Io` if the directory cannot be created, or any
    /// error from [`CraftDb::open_local`].
    pub async fn open(config: &StorageConfig) -> Result<Self, DatabaseError> {
        if !config.is_in_memory()
            && let Some(parent) = Path::new(&config.db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Self::open_local(&config.db_path).await
    }

    /// Open a local store at `path` (`":memory:"` for tests).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = CraftDb::open_local(path).await?;
        tracing::debug!(path, "artifact store opened");
        Ok(Self::from_db(db))
    }

    /// Wrap an already opened database.
    #[must_use]
    pub fn from_db(db: CraftDb) -> Self {
        Self {
            db,
            gate: RwLock::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CraftDb {
        &self.db
    }

    pub(crate) fn conn(&self) -> &libsql::Connection {
        self.db.conn()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write().await
    }

    /// Count stored rows of one kind, soft-deleted projects and their
    /// descendants included.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_rows(&self, kind: EntityKind) -> Result<u64, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {}", entity_table(kind)), ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|_| DatabaseError::Query(format!("negative count {count}")))
    }
}
