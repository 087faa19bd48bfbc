//! RTM item repository: bulk replace under a DOU.

use chrono::Utc;

use craft_core::drafts::RtmDraft;
use craft_core::entities::{RtmItem, StatusChange};
use craft_core::enums::EntityKind;
use craft_core::ids::PREFIX_RTM_ITEM;

use crate::error::DatabaseError;
use crate::helpers::{
    begin_immediate, finish, generate_id, get_position, parse_datetime, position_of,
};
use crate::repos::project::{PROJECT_COLUMNS, apply_status, row_to_project};
use crate::repos::{RTM_LINEAGE, Scoped, ensure_live};
use crate::store::ArtifactStore;

pub(crate) const RTM_COLUMNS: &str =
    "r.id, r.dou_id, r.req_id, r.description, r.position, r.created_at";

pub(crate) fn row_to_rtm_item(row: &libsql::Row) -> Result<RtmItem, DatabaseError> {
    Ok(RtmItem {
        id: row.get::<String>(0)?,
        dou_id: row.get::<String>(1)?,
        req_id: row.get::<String>(2)?,
        description: row.get::<String>(3)?,
        position: get_position(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

pub(crate) async fn query_rtm_items(
    conn: &libsql::Connection,
    dou_id: &str,
) -> Result<Vec<RtmItem>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {RTM_COLUMNS} FROM rtm_items r
                 WHERE r.dou_id = ?1 ORDER BY r.position, r.rowid"
            ),
            [dou_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_rtm_item(&row)?);
    }
    Ok(results)
}

async fn write_rtm_items(
    conn: &libsql::Connection,
    dou_id: &str,
    drafts: &[RtmDraft],
    status: Option<&StatusChange>,
) -> Result<Vec<RtmItem>, DatabaseError> {
    ensure_live(conn, EntityKind::Dou, dou_id).await?;
    let removed = conn
        .execute("DELETE FROM rtm_items WHERE dou_id = ?1", [dou_id])
        .await?;
    tracing::debug!(dou_id, removed, "previous rtm items removed");

    let now = Utc::now();
    let mut items = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let id = generate_id(conn, PREFIX_RTM_ITEM).await?;
        let position = position_of(index)?;
        conn.execute(
            "INSERT INTO rtm_items (id, dou_id, req_id, description, position, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                id.as_str(),
                dou_id,
                draft.req_id.as_str(),
                draft.description.as_str(),
                i64::from(position),
                now.to_rfc3339()
            ],
        )
        .await?;
        items.push(RtmItem {
            id,
            dou_id: dou_id.to_string(),
            req_id: draft.req_id.clone(),
            description: draft.description.clone(),
            position,
            created_at: now,
        });
    }

    apply_status(conn, status).await?;
    Ok(items)
}

impl ArtifactStore {
    /// An RTM item of a live project, with that project.
    pub async fn get_rtm_item(&self, id: &str) -> Result<Option<Scoped<RtmItem>>, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {RTM_COLUMNS}, {PROJECT_COLUMNS} {RTM_LINEAGE}
                     WHERE r.id = ?1 AND p.deleted_at IS NULL"
                ),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Scoped {
                item: row_to_rtm_item(&row)?,
                project: row_to_project(&row, 6)?,
            })),
            None => Ok(None),
        }
    }

    /// RTM items of a DOU in generator order.
    pub async fn list_rtm_items(&self, dou_id: &str) -> Result<Vec<RtmItem>, DatabaseError> {
        let _guard = self.read().await;
        query_rtm_items(self.conn(), dou_id).await
    }

    /// Replace every RTM item under `dou_id` with `drafts`, in order, in one
    /// transaction. Scenarios and everything below the old items go with them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the DOU (or its live project) is
    /// gone; nothing is written in that case.
    pub async fn replace_rtm_items(
        &self,
        dou_id: &str,
        drafts: &[RtmDraft],
        status: Option<&StatusChange>,
    ) -> Result<Vec<RtmItem>, DatabaseError> {
        let _guard = self.write().await;
        let tx = begin_immediate(self.conn()).await?;
        let result = write_rtm_items(&tx, dou_id, drafts, status).await;
        let items = finish(tx, result).await?;
        tracing::info!(dou_id, count = items.len(), "rtm items replaced");
        Ok(items)
    }
}
