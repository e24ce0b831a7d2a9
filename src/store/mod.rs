//! # Object Store
//!
//! Snapshot source for the list API. [`InMemoryStore`] holds the resources
//! loaded from a YAML manifest at startup, or inserted by tests.

use crate::domain::{PipelineRun, Resource, Template};
use crate::errors::{DevopsError, Result};
use dashmap::DashMap;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Read access to the resources served by the list endpoints.
///
/// Each call returns an independent snapshot; callers may sort and page it
/// without affecting the store.
pub trait ObjectStore: Send + Sync {
    fn pipeline_runs(&self, namespace: &str) -> Vec<PipelineRun>;

    fn templates(&self, namespace: &str) -> Vec<Template>;

    fn template(&self, namespace: &str, name: &str) -> Option<Template> {
        self.templates(namespace).into_iter().find(|template| template.name() == name)
    }
}

type ObjectKey = (String, String);

fn object_key<R: Resource>(resource: &R) -> ObjectKey {
    let metadata = resource.metadata();
    (metadata.namespace.clone(), metadata.name.clone())
}

/// One document of a manifest file, selected by its `kind` field
#[derive(Deserialize)]
#[serde(tag = "kind")]
enum Manifest {
    PipelineRun(PipelineRun),
    Template(Template),
}

/// Concurrent in-memory store keyed by namespace and name
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pipeline_runs: DashMap<ObjectKey, PipelineRun>,
    templates: DashMap<ObjectKey, Template>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every PipelineRun and Template document from a multi-document YAML file
    pub fn from_manifest_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DevopsError::Io {
            source: e,
            context: format!("Failed to read manifest '{}'", path.display()),
        })?;

        let store = Self::from_manifest_str(&content)?;
        info!(
            path = %path.display(),
            pipeline_runs = store.pipeline_runs.len(),
            templates = store.templates.len(),
            "Loaded resource manifest"
        );
        Ok(store)
    }

    pub fn from_manifest_str(content: &str) -> Result<Self> {
        let store = Self::new();

        for document in serde_yaml::Deserializer::from_str(content) {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }

            match serde_yaml::from_value::<Manifest>(value)? {
                Manifest::PipelineRun(run) => store.insert_pipeline_run(run),
                Manifest::Template(template) => store.insert_template(template),
            }
        }

        Ok(store)
    }

    /// Insert or replace a PipelineRun with the same namespace and name
    pub fn insert_pipeline_run(&self, run: PipelineRun) {
        self.pipeline_runs.insert(object_key(&run), run);
    }

    /// Insert or replace a Template with the same namespace and name
    pub fn insert_template(&self, template: Template) {
        self.templates.insert(object_key(&template), template);
    }

    pub fn len(&self) -> usize {
        self.pipeline_runs.len() + self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// DashMap iteration order is arbitrary, so snapshots are ordered by name
fn snapshot<R: Resource + Clone>(map: &DashMap<ObjectKey, R>, namespace: &str) -> Vec<R> {
    let mut items: Vec<R> = map
        .iter()
        .filter(|entry| entry.key().0 == namespace)
        .map(|entry| entry.value().clone())
        .collect();
    items.sort_by(|a, b| a.name().cmp(b.name()));
    items
}

impl ObjectStore for InMemoryStore {
    fn pipeline_runs(&self, namespace: &str) -> Vec<PipelineRun> {
        snapshot(&self.pipeline_runs, namespace)
    }

    fn templates(&self, namespace: &str) -> Vec<Template> {
        snapshot(&self.templates, namespace)
    }

    fn template(&self, namespace: &str, name: &str) -> Option<Template> {
        self.templates
            .get(&(namespace.to_string(), name.to_string()))
            .map(|entry| entry.value().clone())
    }
}
