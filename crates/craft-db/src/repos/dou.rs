//! DOU repository: one Document of Understanding per project.
//!
//! Regenerating a DOU rewrites it in place (the ID is stable), resets it to
//! `DRAFT` and deletes its RTM items, which cascades to every scenario, test
//! case and automated test below them.

use chrono::Utc;

use craft_core::entities::{Dou, StatusChange};
use craft_core::enums::{DouStatus, EntityKind};
use craft_core::ids::PREFIX_DOU;

use crate::error::DatabaseError;
use crate::helpers::{begin_immediate, finish, generate_id, parse_datetime, parse_enum};
use crate::repos::ensure_live;
use crate::repos::project::apply_status;
use crate::store::ArtifactStore;

pub(crate) const DOU_COLUMNS: &str =
    "d.id, d.project_id, d.content, d.status, d.created_at, d.updated_at";

fn row_to_dou(row: &libsql::Row) -> Result<Dou, DatabaseError> {
    Ok(Dou {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        content: row.get::<String>(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

pub(crate) async fn query_dou(
    conn: &libsql::Connection,
    project_id: &str,
) -> Result<Option<Dou>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {DOU_COLUMNS} FROM dous d WHERE d.project_id = ?1"),
            [project_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_dou(&row)?)),
        None => Ok(None),
    }
}

async fn write_dou(
    conn: &libsql::Connection,
    project_id: &str,
    content: &str,
    status: Option<&StatusChange>,
) -> Result<Dou, DatabaseError> {
    ensure_live(conn, EntityKind::Project, project_id).await?;
    let now = Utc::now();

    let dou = if let Some(existing) = query_dou(conn, project_id).await? {
        conn.execute(
            "UPDATE dous SET content = ?1, status = ?2, updated_at = ?3 WHERE id = ?4",
            libsql::params![
                content,
                DouStatus::Draft.as_str(),
                now.to_rfc3339(),
                existing.id.as_str()
            ],
        )
        .await?;
        let invalidated = conn
            .execute(
                "DELETE FROM rtm_items WHERE dou_id = ?1",
                [existing.id.as_str()],
            )
            .await?;
        tracing::debug!(dou_id = %existing.id, invalidated, "rtm items invalidated by dou rewrite");
        Dou {
            content: content.to_string(),
            status: DouStatus::Draft,
            updated_at: now,
            ..existing
        }
    } else {
        let id = generate_id(conn, PREFIX_DOU).await?;
        conn.execute(
            "INSERT INTO dous (id, project_id, content, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                id.as_str(),
                project_id,
                content,
                DouStatus::Draft.as_str(),
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        )
        .await?;
        Dou {
            id,
            project_id: project_id.to_string(),
            content: content.to_string(),
            status: DouStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    };

    apply_status(conn, status).await?;
    Ok(dou)
}

async fn write_dou_status(
    conn: &libsql::Connection,
    project_id: &str,
    next: DouStatus,
    status: Option<&StatusChange>,
) -> Result<Dou, DatabaseError> {
    ensure_live(conn, EntityKind::Project, project_id).await?;
    let existing = query_dou(conn, project_id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: EntityKind::Dou,
            id: project_id.to_string(),
        })?;
    if !existing.status.can_transition_to(next) {
        return Err(DatabaseError::InvalidState(format!(
            "dou {} cannot move from {} to {next}",
            existing.id, existing.status
        )));
    }

    let now = Utc::now();
    conn.execute(
        "UPDATE dous SET status = ?1, updated_at = ?2 WHERE id = ?3",
        libsql::params![next.as_str(), now.to_rfc3339(), existing.id.as_str()],
    )
    .await?;
    apply_status(conn, status).await?;

    Ok(Dou {
        status: next,
        updated_at: now,
        ..existing
    })
}

impl ArtifactStore {
    /// The DOU of a live project, if one has been generated.
    pub async fn get_dou(&self, project_id: &str) -> Result<Option<Dou>, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {DOU_COLUMNS} FROM dous d JOIN projects p ON p.id = d.project_id
                     WHERE d.project_id = ?1 AND p.deleted_at IS NULL"
                ),
                [project_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_dou(&row)?)),
            None => Ok(None),
        }
    }

    /// Create or rewrite the project's DOU as a `DRAFT`, dropping every
    /// artifact derived from the previous content, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project is missing or
    /// soft-deleted; the transaction is rolled back on any failure.
    pub async fn upsert_dou(
        &self,
        project_id: &str,
        content: &str,
        status: Option<&StatusChange>,
    ) -> Result<Dou, DatabaseError> {
        let _guard = self.write().await;
        let tx = begin_immediate(self.conn()).await?;
        let result = write_dou(&tx, project_id, content, status).await;
        let dou = finish(tx, result).await?;
        tracing::info!(project_id, dou_id = %dou.id, "dou written");
        Ok(dou)
    }

    /// Set the review status of the project's DOU, together with the
    /// project status change, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` with `EntityKind::Dou` if the
    /// project has no DOU yet.
    pub async fn set_dou_status(
        &self,
        project_id: &str,
        next: DouStatus,
        status: Option<&StatusChange>,
    ) -> Result<Dou, DatabaseError> {
        let _guard = self.write().await;
        let tx = begin_immediate(self.conn()).await?;
        let result = write_dou_status(&tx, project_id, next, status).await;
        finish(tx, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{rtm_drafts, test_store};
    use craft_core::enums::ProjectStatus;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn first_write_inserts_draft_and_moves_project() {
        let store = test_store().await;
        let project = store.create_project("p").await.unwrap();
        let change = StatusChange {
            project_id: project.id.clone(),
            from: ProjectStatus::Ingestion,
            to: ProjectStatus::DouReview,
        };

        let dou = store
            .upsert_dou(&project.id, "# DOU", Some(&change))
            .await
            .unwrap();
        assert!(dou.id.starts_with("dou-"));
        assert_eq!(dou.status, DouStatus::Draft);

        let fetched = store.get_dou(&project.id).await.unwrap().unwrap();
        assert_eq!(fetched.content, "# DOU");
        let project = store.get_project(&project.id).await.unwrap().unwrap();
        assert_eq!(project.status, ProjectStatus::DouReview);
    }

    #[tokio::test]
    async fn rewrite_keeps_id_resets_draft_and_drops_rtm_items() {
        let store = test_store().await;
        let project = store.create_project("p").await.unwrap();
        let first = store.upsert_dou(&project.id, "v1", None).await.unwrap();
        store
            .set_dou_status(&project.id, DouStatus::Approved, None)
            .await
            .unwrap();
        store
            .replace_rtm_items(&first.id, &rtm_drafts(2), None)
            .await
            .unwrap();

        let second = store.upsert_dou(&project.id, "v2", None).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.status, DouStatus::Draft);
        assert_eq!(second.content, "v2");
        assert!(store.list_rtm_items(&first.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn approve_without_dou_is_not_found() {
        let store = test_store().await;
        let project = store.create_project("p").await.unwrap();
        let err = store
            .set_dou_status(&project.id, DouStatus::Approved, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::NotFound {
                entity: EntityKind::Dou,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn approval_commits_with_project_status() {
        let store = test_store().await;
        let project = store.create_project("p").await.unwrap();
        store.upsert_dou(&project.id, "doc", None).await.unwrap();
        let change = StatusChange {
            project_id: project.id.clone(),
            from: ProjectStatus::Ingestion,
            to: ProjectStatus::DouReview,
        };
        let dou = store
            .set_dou_status(&project.id, DouStatus::Approved, Some(&change))
            .await
            .unwrap();
        assert_eq!(dou.status, DouStatus::Approved);
        let project = store.get_project(&project.id).await.unwrap().unwrap();
        assert_eq!(project.status, ProjectStatus::DouReview);
    }

    #[tokio::test]
    async fn dou_of_deleted_project_is_hidden() {
        let store = test_store().await;
        let project = store.create_project("p").await.unwrap();
        store.upsert_dou(&project.id, "doc", None).await.unwrap();
        store.soft_delete_project(&project.id).await.unwrap();
        assert!(store.get_dou(&project.id).await.unwrap().is_none());
        assert!(store.upsert_dou(&project.id, "again", None).await.is_err());
    }
}
