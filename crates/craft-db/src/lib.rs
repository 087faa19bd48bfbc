//! # craft-db
//!
//! libSQL artifact store for autocraft.
//!
//! Holds the whole QA artifact hierarchy: projects, raw assets, DOUs, RTM
//! items, test scenarios, test cases and automated tests. Every structural
//! mutation goes through one of the `replace_*` primitives, each of which runs
//! as a single `BEGIN IMMEDIATE` transaction: verify the parent, delete the
//! previous children (descendants follow through `ON DELETE CASCADE`), insert
//! the new children in the order given, apply the project status change, then
//! commit.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod store;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use repos::Scoped;
pub use store::ArtifactStore;

/// Raw database handle: one libSQL database and its connection.
pub struct CraftDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CraftDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let craft_db = Self { db, conn };
        craft_db.run_migrations().await?;
        Ok(craft_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"scn-3fa85f6457174562"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        helpers::generate_id(&self.conn, prefix).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> CraftDb {
        CraftDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "projects",
            "raw_assets",
            "dous",
            "rtm_items",
            "test_scenarios",
            "test_cases",
            "automated_tests",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn foreign_keys_enabled() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("rtm").await.unwrap();
        assert!(id.starts_with("rtm-"), "ID should start with 'rtm-': {id}");
        assert_eq!(id.len(), 20, "3 prefix + 1 dash + 16 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in craft_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tcs").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn second_dou_for_project_rejected() {
        let db = test_db().await;
        db.conn()
            .execute("INSERT INTO projects (id, name) VALUES ('prj-1', 'p')", ())
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO dous (id, project_id, content) VALUES ('dou-1', 'prj-1', 'a')",
                (),
            )
            .await
            .unwrap();
        let dup = db
            .conn()
            .execute(
                "INSERT INTO dous (id, project_id, content) VALUES ('dou-2', 'prj-1', 'b')",
                (),
            )
            .await;
        assert!(dup.is_err(), "a project holds at most one DOU");
    }

    #[tokio::test]
    async fn deleting_a_dou_cascades_to_every_descendant() {
        let db = test_db().await;
        let conn = db.conn();
        conn.execute_batch(
            "INSERT INTO projects (id, name) VALUES ('prj-1', 'p');
             INSERT INTO dous (id, project_id, content) VALUES ('dou-1', 'prj-1', 'doc');
             INSERT INTO rtm_items (id, dou_id, req_id, description, position)
                 VALUES ('rtm-1', 'dou-1', 'REQ-001', 'login', 0);
             INSERT INTO test_scenarios (id, rtm_item_id, title, steps, position)
                 VALUES ('scn-1', 'rtm-1', 'happy', '1. go', 0);
             INSERT INTO test_cases (id, scenario_id, title, preconditions, steps, expected_result, position)
                 VALUES ('tcs-1', 'scn-1', 't', 'p', 's', 'e', 0);
             INSERT INTO automated_tests (id, test_case_id, code) VALUES ('aut-1', 'tcs-1', 'code');",
        )
        .await
        .unwrap();

        conn.execute("DELETE FROM dous WHERE id = 'dou-1'", ())
            .await
            .unwrap();

        for table in ["rtm_items", "test_scenarios", "test_cases", "automated_tests"] {
            let mut rows = conn
                .query(&format!("SELECT COUNT(*) FROM {table}"), ())
                .await
                .unwrap();
            let count = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
            assert_eq!(count, 0, "{table} should be empty after cascade");
        }
    }
}
