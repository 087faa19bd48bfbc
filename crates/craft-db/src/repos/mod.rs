//! Repository modules implementing the artifact store operations.
//!
//! Each module adds methods to `ArtifactStore` via `impl ArtifactStore` blocks
//! and keeps its row parsing and connection-level SQL in free functions so
//! that transactions and the tree reader can reuse them under one gate guard.

pub mod asset;
pub mod dou;
pub mod project;
pub mod rtm;
pub mod scenario;
pub mod test_case;
pub mod tree;

use craft_core::entities::Project;
use craft_core::enums::EntityKind;

use crate::error::DatabaseError;

/// An artifact together with the live project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoped<T> {
    pub item: T,
    pub project: Project,
}

// Join paths from each level up to its project (alias `p`).
pub(crate) const DOU_LINEAGE: &str = "FROM dous d JOIN projects p ON p.id = d.project_id";
pub(crate) const RTM_LINEAGE: &str = "FROM rtm_items r \
     JOIN dous d ON d.id = r.dou_id \
     JOIN projects p ON p.id = d.project_id";
pub(crate) const SCENARIO_LINEAGE: &str = "FROM test_scenarios s \
     JOIN rtm_items r ON r.id = s.rtm_item_id \
     JOIN dous d ON d.id = r.dou_id \
     JOIN projects p ON p.id = d.project_id";
pub(crate) const CASE_LINEAGE: &str = "FROM test_cases c \
     JOIN test_scenarios s ON s.id = c.scenario_id \
     JOIN rtm_items r ON r.id = s.rtm_item_id \
     JOIN dous d ON d.id = r.dou_id \
     JOIN projects p ON p.id = d.project_id";

/// Fail with `DatabaseError::NotFound` unless `id` names a `kind` row whose
/// project is not soft-deleted.
pub(crate) async fn ensure_live(
    conn: &libsql::Connection,
    kind: EntityKind,
    id: &str,
) -> Result<(), DatabaseError> {
    let sql = match kind {
        EntityKind::Project => {
            "SELECT 1 FROM projects p WHERE p.id = ?1 AND p.deleted_at IS NULL".to_string()
        }
        EntityKind::Dou => format!("SELECT 1 {DOU_LINEAGE} WHERE d.id = ?1 AND p.deleted_at IS NULL"),
        EntityKind::RtmItem => {
            format!("SELECT 1 {RTM_LINEAGE} WHERE r.id = ?1 AND p.deleted_at IS NULL")
        }
        EntityKind::TestScenario => {
            format!("SELECT 1 {SCENARIO_LINEAGE} WHERE s.id = ?1 AND p.deleted_at IS NULL")
        }
        EntityKind::TestCase => {
            format!("SELECT 1 {CASE_LINEAGE} WHERE c.id = ?1 AND p.deleted_at IS NULL")
        }
        EntityKind::RawAsset | EntityKind::AutomatedTest => {
            return Err(DatabaseError::InvalidState(format!(
                "{kind} rows have no children"
            )));
        }
    };
    let mut rows = conn.query(&sql, [id]).await?;
    if rows.next().await?.is_some() {
        Ok(())
    } else {
        Err(DatabaseError::NotFound {
            entity: kind,
            id: id.to_string(),
        })
    }
}
