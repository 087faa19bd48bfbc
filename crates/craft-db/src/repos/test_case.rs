//! Test case repository: bulk replace under a scenario.

use chrono::Utc;

use craft_core::drafts::TestCaseDraft;
use craft_core::entities::TestCase;
use craft_core::enums::EntityKind;
use craft_core::ids::PREFIX_TEST_CASE;

use crate::error::DatabaseError;
use crate::helpers::{
    begin_immediate, finish, generate_id, get_position, parse_datetime, position_of,
};
use crate::repos::project::{PROJECT_COLUMNS, row_to_project};
use crate::repos::{CASE_LINEAGE, Scoped, ensure_live};
use crate::store::ArtifactStore;

pub(crate) const CASE_COLUMNS: &str = "c.id, c.scenario_id, c.title, c.preconditions, c.steps, \
     c.expected_result, c.position, c.created_at";

pub(crate) fn row_to_test_case(row: &libsql::Row) -> Result<TestCase, DatabaseError> {
    Ok(TestCase {
        id: row.get::<String>(0)?,
        scenario_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        preconditions: row.get::<String>(3)?,
        steps: row.get::<String>(4)?,
        expected_result: row.get::<String>(5)?,
        position: get_position(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

async fn write_test_cases(
    conn: &libsql::Connection,
    scenario_id: &str,
    drafts: &[TestCaseDraft],
) -> Result<Vec<TestCase>, DatabaseError> {
    ensure_live(conn, EntityKind::TestScenario, scenario_id).await?;
    let removed = conn
        .execute("DELETE FROM test_cases WHERE scenario_id = ?1", [scenario_id])
        .await?;
    tracing::debug!(scenario_id, removed, "previous test cases removed");

    let now = Utc::now();
    let mut cases = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let id = generate_id(conn, PREFIX_TEST_CASE).await?;
        let position = position_of(index)?;
        conn.execute(
            "INSERT INTO test_cases
                 (id, scenario_id, title, preconditions, steps, expected_result, position, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                id.as_str(),
                scenario_id,
                draft.title.as_str(),
                draft.preconditions.as_str(),
                draft.steps.as_str(),
                draft.expected_result.as_str(),
                i64::from(position),
                now.to_rfc3339()
            ],
        )
        .await?;
        cases.push(TestCase {
            id,
            scenario_id: scenario_id.to_string(),
            title: draft.title.clone(),
            preconditions: draft.preconditions.clone(),
            steps: draft.steps.clone(),
            expected_result: draft.expected_result.clone(),
            position,
            created_at: now,
        });
    }
    Ok(cases)
}

impl ArtifactStore {
    /// A test case of a live project, with that project.
    pub async fn get_test_case(&self, id: &str) -> Result<Option<Scoped<TestCase>>, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {CASE_COLUMNS}, {PROJECT_COLUMNS} {CASE_LINEAGE}
                     WHERE c.id = ?1 AND p.deleted_at IS NULL"
                ),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Scoped {
                item: row_to_test_case(&row)?,
                project: row_to_project(&row, 8)?,
            })),
            None => Ok(None),
        }
    }

    /// Test cases of a scenario in generator order.
    pub async fn list_test_cases(&self, scenario_id: &str) -> Result<Vec<TestCase>, DatabaseError> {
        let _guard = self.read().await;
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {CASE_COLUMNS} FROM test_cases c
                     WHERE c.scenario_id = ?1 ORDER BY c.position, c.rowid"
                ),
                [scenario_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_test_case(&row)?);
        }
        Ok(results)
    }

    /// Replace every test case under `scenario_id` with `drafts`, in order,
    /// in one transaction. Automated tests of the old cases go with them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the scenario is gone.
    pub async fn replace_test_cases(
        &self,
        scenario_id: &str,
        drafts: &[TestCaseDraft],
    ) -> Result<Vec<TestCase>, DatabaseError> {
        let _guard = self.write().await;
        let tx = begin_immediate(self.conn()).await?;
        let result = write_test_cases(&tx, scenario_id, drafts).await;
        let cases = finish(tx, result).await?;
        tracing::info!(scenario_id, count = cases.len(), "test cases replaced");
        Ok(cases)
    }
}
