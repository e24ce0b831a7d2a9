//! PipelineRun domain types
//!
//! A PipelineRun records one execution of a pipeline on the Jenkins server.

use super::meta::{ObjectMeta, Resource, JENKINS_RUN_ID_ANNOTATION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineRun {
    pub metadata: ObjectMeta,
    pub spec: PipelineRunSpec,
    pub status: PipelineRunStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineRunSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_ref: Option<PipelineRef>,

    /// Source reference for multi-branch pipelines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<Scm>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

/// Identifies the pipeline a run belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineRef {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scm {
    pub ref_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ref_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineRunStatus {
    pub phase: RunPhase,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[default]
    Unknown,
}

impl PipelineRun {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { metadata: ObjectMeta::new(namespace, name), ..Default::default() }
    }

    pub fn with_creation_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.metadata.creation_timestamp = Some(timestamp);
        self
    }

    pub fn with_start_time(mut self, timestamp: DateTime<Utc>) -> Self {
        self.status.start_time = Some(timestamp);
        self
    }

    pub fn with_scm_ref(mut self, ref_name: impl Into<String>) -> Self {
        self.spec.scm = Some(Scm { ref_name: ref_name.into(), ..Default::default() });
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.metadata.annotations.insert(JENKINS_RUN_ID_ANNOTATION.to_string(), run_id.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(key.into(), value.into());
        self
    }
}

impl Resource for PipelineRun {
    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn start_time(&self) -> Option<DateTime<Utc>> {
        self.status.start_time
    }

    fn scm_ref_name(&self) -> Option<&str> {
        self.spec.scm.as_ref().map(|scm| scm.ref_name.as_str())
    }
}
