//! Project repository: create, list, lookup, soft delete, status updates.

use chrono::Utc;

use craft_core::entities::{Project, StatusChange};
use craft_core::enums::ProjectStatus;
use craft_core::ids::PREFIX_PROJECT;

use crate::error::DatabaseError;
use crate::helpers::{generate_id, parse_datetime, parse_enum, parse_optional_datetime};
use crate::store::ArtifactStore;

pub(crate) const PROJECT_COLUMNS: &str =
    "p.id, p.name, p.status, p.created_at, p.updated_at, p.deleted_at";

/// Parse the six `PROJECT_COLUMNS` starting at column `base`.
pub(crate) fn row_to_project(row: &libsql::Row, base: i32) -> Result<Project, DatabaseError> {
    let deleted_at = row.get::<Option<String>>(base + 5)?;
    Ok(Project {
        id: row.get::<String>(base)?,
        name: row.get::<String>(base + 1)?,
        status: parse_enum(&row.get::<String>(base + 2)?)?,
        created_at: parse_datetime(&row.get::<String>(base + 3)?)?,
        updated_at: parse_datetime(&row.get::<String>(base + 4)?)?,
        deleted_at: parse_optional_datetime(deleted_at.as_deref())?,
    })
}

pub(crate) async fn query_live_project(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Option<Project>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.id = ?1 AND p.deleted_at IS NULL"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_project(&row, 0)?)),
        None => Ok(None),
    }
}

/// Move a project's status inside the caller's transaction.
///
/// The update is conditional on the status the caller observed; if another
/// writer already moved the project, the change is skipped.
pub(crate) async fn apply_status(
    conn: &libsql::Connection,
    change: Option<&StatusChange>,
) -> Result<(), DatabaseError> {
    let Some(change) = change.filter(|c| !c.is_noop()) else {
        return Ok(());
    };
    let updated = conn
        .execute(
            "UPDATE projects SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
            libsql::params![
                change.to.as_str(),
                Utc::now().to_rfc3339(),
                change.project_id.as_str(),
                change.from.as_str()
            ],
        )
        .await?;
    if updated == 0 {
        tracing::debug!(
            project_id = %change.project_id,
            from = %change.from,
            to = %change.to,
            "project status already moved; skipping"
        );
    } else {
        tracing::info!(
            project_id = %change.project_id,
            from = %change.from,
            to = %change.to,
            "project status changed"
        );
    }
    Ok(())
}

impl ArtifactStore {
    pub async fn create_project(&self, name: &str) -> Result<Project, DatabaseError> {
        let _guard = self.write().await;
        let now = Utc::now();
        let id = generate_id(self.conn(), PREFIX_PROJECT).await?;

        self.conn()
            .execute(
                "INSERT INTO projects (id, name, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    name,
                    ProjectStatus::Ingestion.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Project {
            id,
            name: name.to_string(),
            status: ProjectStatus::Ingestion,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Live projects, newest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects p
                     WHERE p.deleted_at IS NULL
                     ORDER BY p.created_at DESC, p.rowid DESC"
                ),
                (),
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_project(&row, 0)?);
        }
        Ok(results)
    }

    /// A live project by ID. Soft-deleted projects are `None`.
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, DatabaseError> {
        let _guard = self.read().await;
        query_live_project(self.conn(), id).await
    }

    /// Mark a live project deleted. Returns `false` if there was no live
    /// project with this ID. Rows are retained.
    pub async fn soft_delete_project(&self, id: &str) -> Result<bool, DatabaseError> {
        let _guard = self.write().await;
        let now = Utc::now().to_rfc3339();
        let updated = self
            .conn()
            .execute(
                "UPDATE projects SET deleted_at = ?1, updated_at = ?1
                 WHERE id = ?2 AND deleted_at IS NULL",
                libsql::params![now, id],
            )
            .await?;
        Ok(updated == 1)
    }
}
