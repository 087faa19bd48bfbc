//! Test scenario repository: bulk replace under an RTM item.

use chrono::Utc;

use craft_core::drafts::ScenarioDraft;
use craft_core::entities::{StatusChange, TestScenario};
use craft_core::enums::EntityKind;
use craft_core::ids::PREFIX_SCENARIO;

use crate::error::DatabaseError;
use crate::helpers::{
    begin_immediate, finish, generate_id, get_opt_string, get_position, parse_datetime,
    position_of,
};
use crate::repos::project::{PROJECT_COLUMNS, apply_status, row_to_project};
use crate::repos::{SCENARIO_LINEAGE, Scoped, ensure_live};
use crate::store::ArtifactStore;

pub(crate) const SCENARIO_COLUMNS: &str =
    "s.id, s.rtm_item_id, s.title, s.description, s.steps, s.position, s.created_at";

pub(crate) fn row_to_scenario(row: &libsql::Row) -> Result<TestScenario, DatabaseError> {
    Ok(TestScenario {
        id: row.get::<String>(0)?,
        rtm_item_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        steps: row.get::<String>(4)?,
        position: get_position(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

async fn write_scenarios(
    conn: &libsql::Connection,
    rtm_item_id: &str,
    drafts: &[ScenarioDraft],
    status: Option<&StatusChange>,
) -> Result<Vec<TestScenario>, DatabaseError> {
    ensure_live(conn, EntityKind::RtmItem, rtm_item_id).await?;
    let removed = conn
        .execute(
            "DELETE FROM test_scenarios WHERE rtm_item_id = ?1",
            [rtm_item_id],
        )
        .await?;
    tracing::debug!(rtm_item_id, removed, "previous scenarios removed");

    let now = Utc::now();
    let mut scenarios = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let id = generate_id(conn, PREFIX_SCENARIO).await?;
        let position = position_of(index)?;
        conn.execute(
            "INSERT INTO test_scenarios (id, rtm_item_id, title, description, steps, position, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                id.as_str(),
                rtm_item_id,
                draft.title.as_str(),
                draft.description.as_deref(),
                draft.steps.as_str(),
                i64::from(position),
                now.to_rfc3339()
            ],
        )
        .await?;
        scenarios.push(TestScenario {
            id,
            rtm_item_id: rtm_item_id.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            steps: draft.steps.clone(),
            position,
            created_at: now,
        });
    }

    apply_status(conn, status).await?;
    Ok(scenarios)
}

impl ArtifactStore {
    /// A scenario of a live project, with that project.
    pub async fn get_scenario(
        &self,
        id: &str,
    ) -> Result<Option<Scoped<TestScenario>>, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SCENARIO_COLUMNS}, {PROJECT_COLUMNS} {SCENARIO_LINEAGE}
                     WHERE s.id = ?1 AND p.deleted_at IS NULL"
                ),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Scoped {
                item: row_to_scenario(&row)?,
                project: row_to_project(&row, 7)?,
            })),
            None => Ok(None),
        }
    }

    /// Scenarios of an RTM item in generator order.
    pub async fn list_scenarios(
        &self,
        rtm_item_id: &str,
    ) -> Result<Vec<TestScenario>, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SCENARIO_COLUMNS} FROM test_scenarios s
                     WHERE s.rtm_item_id = ?1 ORDER BY s.position, s.rowid"
                ),
                [rtm_item_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_scenario(&row)?);
        }
        Ok(results)
    }

    /// Replace every scenario under `rtm_item_id` with `drafts`, in order, in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the RTM item was removed (for
    /// example by a DOU rewrite) before the transaction ran.
    pub async fn replace_scenarios(
        &self,
        rtm_item_id: &str,
        drafts: &[ScenarioDraft],
        status: Option<&StatusChange>,
    ) -> Result<Vec<TestScenario>, DatabaseError> {
        let _guard = self.write().await;
        let tx = begin_immediate(self.conn()).await?;
        let result = write_scenarios(&tx, rtm_item_id, drafts, status).await;
        let scenarios = finish(tx, result).await?;
        tracing::info!(rtm_item_id, count = scenarios.len(), "scenarios replaced");
        Ok(scenarios)
    }
}
