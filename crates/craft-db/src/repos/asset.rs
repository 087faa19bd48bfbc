//! Raw asset repository: append-only ingestion.

use chrono::Utc;

use craft_core::entities::RawAsset;
use craft_core::enums::EntityKind;
use craft_core::ids::PREFIX_ASSET;

use crate::error::DatabaseError;
use crate::helpers::{generate_id, parse_datetime};
use crate::repos::ensure_live;
use crate::store::ArtifactStore;

fn row_to_asset(row: &libsql::Row) -> Result<RawAsset, DatabaseError> {
    Ok(RawAsset {
        id: row.get::<String>(0)?,
        project_id: row.get::<String>(1)?,
        asset_type: row.get::<String>(2)?,
        content: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

/// Assets of a project in ingestion order.
pub(crate) async fn query_assets(
    conn: &libsql::Connection,
    project_id: &str,
) -> Result<Vec<RawAsset>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, project_id, type, content, created_at
             FROM raw_assets WHERE project_id = ?1 ORDER BY created_at, rowid",
            [project_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_asset(&row)?);
    }
    Ok(results)
}

impl ArtifactStore {
    /// Append an asset to a live project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project is missing or
    /// soft-deleted.
    pub async fn create_asset(
        &self,
        project_id: &str,
        asset_type: &str,
        content: &str,
    ) -> Result<RawAsset, DatabaseError> {
        let _guard = self.write().await;
        ensure_live(self.conn(), EntityKind::Project, project_id).await?;

        let now = Utc::now();
        let id = generate_id(self.conn(), PREFIX_ASSET).await?;
        self.conn()
            .execute(
                "INSERT INTO raw_assets (id, project_id, type, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), project_id, asset_type, content, now.to_rfc3339()],
            )
            .await?;

        Ok(RawAsset {
            id,
            project_id: project_id.to_string(),
            asset_type: asset_type.to_string(),
            content: content.to_string(),
            created_at: now,
        })
    }

    pub async fn list_assets(&self, project_id: &str) -> Result<Vec<RawAsset>, DatabaseError> {
        let _guard = self.read().await;
        query_assets(self.conn(), project_id).await
    }
}
