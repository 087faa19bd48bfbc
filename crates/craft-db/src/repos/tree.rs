//! Project aggregate reader: one project and its full descendant tree.
//!
//! Each level below the DOU is fetched with a single query scoped to the DOU
//! and grouped by parent, so a tree costs a fixed number of queries however
//! many artifacts it holds. The whole read runs under one shared gate guard
//! and therefore never observes a half-applied replacement.

use std::collections::HashMap;

use craft_core::entities::{
    AutomatedTest, DouNode, ProjectTree, RtmItemNode, ScenarioNode, TestCase, TestCaseNode,
    TestScenario,
};

use crate::error::DatabaseError;
use crate::repos::asset::query_assets;
use crate::repos::automated_test::{AUTOMATED_TEST_COLUMNS, row_to_automated_test};
use crate::repos::dou::query_dou;
use crate::repos::project::query_live_project;
use crate::repos::rtm::query_rtm_items;
use crate::repos::scenario::{SCENARIO_COLUMNS, row_to_scenario};
use crate::repos::test_case::{CASE_COLUMNS, row_to_test_case};
use crate::store::ArtifactStore;

async fn scenarios_by_item(
    conn: &libsql::Connection,
    dou_id: &str,
) -> Result<HashMap<String, Vec<TestScenario>>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SCENARIO_COLUMNS} FROM test_scenarios s
                 JOIN rtm_items r ON r.id = s.rtm_item_id
                 WHERE r.dou_id = ?1 ORDER BY s.position, s.rowid"
            ),
            [dou_id],
        )
        .await?;
    let mut grouped: HashMap<String, Vec<TestScenario>> = HashMap::new();
    while let Some(row) = rows.next().await? {
        let scenario = row_to_scenario(&row)?;
        grouped
            .entry(scenario.rtm_item_id.clone())
            .or_default()
            .push(scenario);
    }
    Ok(grouped)
}

async fn cases_by_scenario(
    conn: &libsql::Connection,
    dou_id: &str,
) -> Result<HashMap<String, Vec<TestCase>>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {CASE_COLUMNS} FROM test_cases c
                 JOIN test_scenarios s ON s.id = c.scenario_id
                 JOIN rtm_items r ON r.id = s.rtm_item_id
                 WHERE r.dou_id = ?1 ORDER BY c.position, c.rowid"
            ),
            [dou_id],
        )
        .await?;
    let mut grouped: HashMap<String, Vec<TestCase>> = HashMap::new();
    while let Some(row) = rows.next().await? {
        let case = row_to_test_case(&row)?;
        grouped.entry(case.scenario_id.clone()).or_default().push(case);
    }
    Ok(grouped)
}

async fn automated_tests_by_case(
    conn: &libsql::Connection,
    dou_id: &str,
) -> Result<HashMap<String, AutomatedTest>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {AUTOMATED_TEST_COLUMNS} FROM automated_tests t
                 JOIN test_cases c ON c.id = t.test_case_id
                 JOIN test_scenarios s ON s.id = c.scenario_id
                 JOIN rtm_items r ON r.id = s.rtm_item_id
                 WHERE r.dou_id = ?1"
            ),
            [dou_id],
        )
        .await?;
    let mut by_case = HashMap::new();
    while let Some(row) = rows.next().await? {
        let test = row_to_automated_test(&row)?;
        by_case.insert(test.test_case_id.clone(), test);
    }
    Ok(by_case)
}

async fn load_dou_node(
    conn: &libsql::Connection,
    project_id: &str,
) -> Result<Option<DouNode>, DatabaseError> {
    let Some(dou) = query_dou(conn, project_id).await? else {
        return Ok(None);
    };

    let items = query_rtm_items(conn, &dou.id).await?;
    let mut scenarios = scenarios_by_item(conn, &dou.id).await?;
    let mut cases = cases_by_scenario(conn, &dou.id).await?;
    let mut tests = automated_tests_by_case(conn, &dou.id).await?;

    let rtm_items = items
        .into_iter()
        .map(|item| {
            let scenario_nodes = scenarios
                .remove(&item.id)
                .unwrap_or_default()
                .into_iter()
                .map(|scenario| {
                    let test_cases = cases
                        .remove(&scenario.id)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|case| TestCaseNode {
                            automated_test: tests.remove(&case.id),
                            case,
                        })
                        .collect();
                    ScenarioNode {
                        scenario,
                        test_cases,
                    }
                })
                .collect();
            RtmItemNode {
                item,
                scenarios: scenario_nodes,
            }
        })
        .collect();

    Ok(Some(DouNode { dou, rtm_items }))
}

impl ArtifactStore {
    /// A live project with all of its descendants, each level in creation
    /// order. `None` if the project is missing or soft-deleted.
    pub async fn project_tree(&self, id: &str) -> Result<Option<ProjectTree>, DatabaseError> {
        let _guard = self.read().await;
        let conn = self.conn();
        let Some(project) = query_live_project(conn, id).await? else {
            return Ok(None);
        };
        let assets = query_assets(conn, id).await?;
        let dou = load_dou_node(conn, id).await?;
        Ok(Some(ProjectTree {
            project,
            assets,
            dou,
        }))
    }
}
