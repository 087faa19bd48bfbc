//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use craft_core::entities::{Dou, Project};
use craft_db::ArtifactStore;
use craft_generator::{ContentGenerator, FixtureGenerator, GeneratorError, Role};
use craft_pipeline::Pipeline;

/// Generator that replays queued outputs per role and records every call.
#[derive(Default)]
pub struct ScriptedGenerator {
    outputs: Mutex<HashMap<Role, VecDeque<Result<String, GeneratorError>>>>,
    calls: Mutex<Vec<(Role, String)>>,
    delay: Duration,
}

impl ScriptedGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::default()
        })
    }

    pub fn push(&self, role: Role, output: impl Into<String>) {
        self.queue(role, Ok(output.into()));
    }

    pub fn push_err(&self, role: Role, err: GeneratorError) {
        self.queue(role, Err(err));
    }

    fn queue(&self, role: Role, output: Result<String, GeneratorError>) {
        self.outputs
            .lock()
            .unwrap()
            .entry(role)
            .or_default()
            .push_back(output);
    }

    pub fn calls_for(&self, role: Role) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, context)| context.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<(Role, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, role: Role, context: &str) -> Result<String, GeneratorError> {
        self.calls.lock().unwrap().push((role, context.to_string()));
        let next = self
            .outputs
            .lock()
            .unwrap()
            .get_mut(&role)
            .and_then(VecDeque::pop_front);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        next.unwrap_or_else(|| {
            Err(GeneratorError::Api {
                status: 500,
                message: "script exhausted".into(),
            })
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub async fn memory_store() -> Arc<ArtifactStore> {
    Arc::new(ArtifactStore::open_local(":memory:").await.unwrap())
}

pub async fn scripted_pipeline(generator: &Arc<ScriptedGenerator>) -> Pipeline {
    Pipeline::new(memory_store().await, generator.clone())
}

pub async fn fixture_pipeline() -> Pipeline {
    Pipeline::new(memory_store().await, Arc::new(FixtureGenerator::new()))
}

pub fn rtm_json(req_ids: &[&str]) -> String {
    let records: Vec<_> = req_ids
        .iter()
        .map(|id| serde_json::json!({"reqId": id, "description": format!("Requirement {id}")}))
        .collect();
    serde_json::Value::Array(records).to_string()
}

pub fn scenarios_json(tag: &str, n: usize) -> String {
    let records: Vec<_> = (1..=n)
        .map(|i| serde_json::json!({"title": format!("{tag} {i}"), "steps": format!("1. {tag} step {i}")}))
        .collect();
    serde_json::Value::Array(records).to_string()
}

pub fn cases_json(tag: &str, n: usize) -> String {
    let records: Vec<_> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "title": format!("{tag} {i}"),
                "preconditions": "User exists",
                "steps": "1. Open the app",
                "expectedResult": "It works",
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}

/// A project with one asset and an approved DOU, generated through `pipeline`
/// with the next scripted output as DOU text.
pub async fn approved_project(
    pipeline: &Pipeline,
    generator: &ScriptedGenerator,
) -> (Project, Dou) {
    let project = pipeline.create_project("Checkout").await.unwrap();
    pipeline
        .ingest_asset(&project.id, "TRANSCRIPT", "Users must be able to log in.")
        .await
        .unwrap();
    generator.push(Role::Analyst, "# DOU\nUsers must be able to log in.");
    pipeline.generate_dou(&project.id).await.unwrap();
    let dou = pipeline.approve_dou(&project.id, "APPROVED").await.unwrap();
    (project, dou)
}
