//! Object metadata shared by every resource kind, plus the [`Resource`]
//! accessor trait the list pipeline sorts and filters through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annotation holding the build number Jenkins assigned to a pipeline run
pub const JENKINS_RUN_ID_ANNOTATION: &str = "devops.kubesphere.io/jenkins-pipelinerun-id";

/// Standard object metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    /// Name, unique within the namespace
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Absent means the zero timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl ObjectMeta {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { name: name.into(), namespace: namespace.into(), ..Default::default() }
    }
}

/// Read-only view of the fields the list pipeline works with.
///
/// Kinds without a given field keep the default, which the comparators treat
/// as a missing value.
pub trait Resource {
    fn metadata(&self) -> &ObjectMeta;

    fn name(&self) -> &str {
        &self.metadata().name
    }

    fn creation_timestamp(&self) -> Option<DateTime<Utc>> {
        self.metadata().creation_timestamp
    }

    fn start_time(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// `Some("")` means a source reference exists but carries no ref name.
    fn scm_ref_name(&self) -> Option<&str> {
        None
    }

    fn run_id(&self) -> Option<&str> {
        self.metadata().annotations.get(JENKINS_RUN_ID_ANNOTATION).map(String::as_str)
    }
}
