//! Serialized craft-core entities validate against their registered schemas.

use chrono::Utc;
use craft_core::entities::{Dou, Project, ProjectTree, RawAsset};
use craft_core::enums::{DouStatus, ProjectStatus};
use craft_schema::SchemaRegistry;

fn project() -> Project {
    Project {
        id: "prj-0011223344556677".into(),
        name: "Checkout".into(),
        status: ProjectStatus::DouReview,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

#[test]
fn project_validates() {
    let reg = SchemaRegistry::new();
    let value = serde_json::to_value(project()).unwrap();
    reg.validate("project", &value).unwrap();
}

#[test]
fn project_with_bad_status_fails() {
    let reg = SchemaRegistry::new();
    let mut value = serde_json::to_value(project()).unwrap();
    value["status"] = "ARCHIVED".into();
    assert!(reg.validate("project", &value).is_err());
}

#[test]
fn project_tree_validates() {
    let reg = SchemaRegistry::new();
    let now = Utc::now();
    let tree = ProjectTree {
        project: project(),
        assets: vec![RawAsset {
            id: "ast-1".into(),
            project_id: "prj-0011223344556677".into(),
            asset_type: "text".into(),
            content: "Users log in with email".into(),
            created_at: now,
        }],
        dou: Some(craft_core::entities::DouNode {
            dou: Dou {
                id: "dou-1".into(),
                project_id: "prj-0011223344556677".into(),
                content: "# DOU".into(),
                status: DouStatus::Draft,
                created_at: now,
                updated_at: now,
            },
            rtm_items: vec![],
        }),
    };
    let value = serde_json::to_value(tree).unwrap();
    reg.validate("project_tree", &value).unwrap();
}
