//! End-to-end store behaviour: persistence across reopen, cascade replace,
//! rollback of failed replaces, and readers racing writers.

use std::sync::Arc;

use craft_core::drafts::{RtmDraft, ScenarioDraft, TestCaseDraft};
use craft_core::enums::{DouStatus, EntityKind};
use craft_db::ArtifactStore;
use pretty_assertions::assert_eq;

fn rtm(n: usize) -> Vec<RtmDraft> {
    (1..=n)
        .map(|i| RtmDraft {
            req_id: format!("REQ-{i:03}"),
            description: format!("Requirement {i}"),
        })
        .collect()
}

fn scenarios(n: usize, tag: &str) -> Vec<ScenarioDraft> {
    (1..=n)
        .map(|i| ScenarioDraft {
            title: format!("{tag} {i}"),
            description: None,
            steps: "1. Open the app".into(),
        })
        .collect()
}

#[tokio::test]
async fn store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autocraft.db");
    let path = path.to_str().unwrap();

    let project_id = {
        let store = ArtifactStore::open_local(path).await.unwrap();
        let project = store.create_project("Persisted").await.unwrap();
        store
            .create_asset(&project.id, "Requirement", "System shall persist data.")
            .await
            .unwrap();
        project.id
    };

    let store = ArtifactStore::open_local(path).await.unwrap();
    let tree = store.project_tree(&project_id).await.unwrap().unwrap();
    assert_eq!(tree.project.name, "Persisted");
    assert_eq!(tree.assets.len(), 1);
}

#[tokio::test]
async fn dou_rewrite_clears_the_whole_subtree() {
    let store = ArtifactStore::open_local(":memory:").await.unwrap();
    let project = store.create_project("Acme").await.unwrap();
    let dou = store.upsert_dou(&project.id, "v1", None).await.unwrap();
    store
        .set_dou_status(&project.id, DouStatus::Approved, None)
        .await
        .unwrap();
    let items = store.replace_rtm_items(&dou.id, &rtm(2), None).await.unwrap();
    let scns = store
        .replace_scenarios(&items[0].id, &scenarios(2, "s"), None)
        .await
        .unwrap();
    let cases = store
        .replace_test_cases(
            &scns[0].id,
            &[TestCaseDraft {
                title: "t".into(),
                preconditions: "p".into(),
                steps: "s".into(),
                expected_result: "e".into(),
            }],
        )
        .await
        .unwrap();
    store
        .replace_automated_test(&cases[0].id, "code")
        .await
        .unwrap();

    store.upsert_dou(&project.id, "v2", None).await.unwrap();

    for kind in [
        EntityKind::RtmItem,
        EntityKind::TestScenario,
        EntityKind::TestCase,
        EntityKind::AutomatedTest,
    ] {
        assert_eq!(store.count_rows(kind).await.unwrap(), 0, "{kind} left behind");
    }
    assert_eq!(store.count_rows(EntityKind::Dou).await.unwrap(), 1);
    assert_eq!(store.count_rows(EntityKind::RawAsset).await.unwrap(), 0);
}

#[tokio::test]
async fn readers_never_see_partial_sets() {
    let store = Arc::new(ArtifactStore::open_local(":memory:").await.unwrap());
    let project = store.create_project("Acme").await.unwrap();
    let dou = store.upsert_dou(&project.id, "doc", None).await.unwrap();
    store
        .set_dou_status(&project.id, DouStatus::Approved, None)
        .await
        .unwrap();
    let item = store
        .replace_rtm_items(&dou.id, &rtm(1), None)
        .await
        .unwrap()
        .remove(0);
    store
        .replace_scenarios(&item.id, &scenarios(5, "seed"), None)
        .await
        .unwrap();

    let writer = {
        let store = Arc::clone(&store);
        let item_id = item.id.clone();
        tokio::spawn(async move {
            for round in 0..20 {
                store
                    .replace_scenarios(&item_id, &scenarios(5, &format!("round {round}")), None)
                    .await
                    .unwrap();
            }
        })
    };
    let reader = {
        let store = Arc::clone(&store);
        let item_id = item.id.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                let listed = store.list_scenarios(&item_id).await.unwrap();
                assert_eq!(listed.len(), 5, "observed a partial scenario set");
                let tag = listed[0].title.rsplit_once(' ').unwrap().0.to_string();
                assert!(listed.iter().all(|s| s.title.starts_with(&tag)));
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(store.count_rows(EntityKind::TestScenario).await.unwrap(), 5);
}

#[tokio::test]
async fn failed_insert_leaves_previous_set_intact() {
    let store = ArtifactStore::open_local(":memory:").await.unwrap();
    let project = store.create_project("Acme").await.unwrap();
    let dou = store.upsert_dou(&project.id, "doc", None).await.unwrap();
    store
        .set_dou_status(&project.id, DouStatus::Approved, None)
        .await
        .unwrap();
    let item = store
        .replace_rtm_items(&dou.id, &rtm(1), None)
        .await
        .unwrap()
        .remove(0);
    let before = store
        .replace_scenarios(&item.id, &scenarios(2, "old"), None)
        .await
        .unwrap();

    store
        .db()
        .conn()
        .execute_batch(
            "CREATE TRIGGER reject_boom BEFORE INSERT ON test_scenarios \
             WHEN NEW.title = 'boom' \
             BEGIN SELECT RAISE(ABORT, 'boom rejected'); END;",
        )
        .await
        .unwrap();

    let mut drafts = scenarios(1, "new");
    drafts.push(ScenarioDraft {
        title: "boom".into(),
        description: None,
        steps: "1. Explode".into(),
    });
    assert!(store.replace_scenarios(&item.id, &drafts, None).await.is_err());

    assert_eq!(store.list_scenarios(&item.id).await.unwrap(), before);
    assert_eq!(store.count_rows(EntityKind::TestScenario).await.unwrap(), 2);

    // The connection is usable again once the failed transaction is gone.
    let after = store
        .replace_scenarios(&item.id, &scenarios(3, "next"), None)
        .await
        .unwrap();
    assert_eq!(store.list_scenarios(&item.id).await.unwrap(), after);
}
