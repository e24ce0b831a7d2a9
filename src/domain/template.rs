//! Template domain types
//!
//! The `template` body is opaque here; rendering belongs to an external renderer.

use super::meta::{ObjectMeta, Resource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub metadata: ObjectMeta,
    pub spec: TemplateSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateSpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<TemplateParameter>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,
}

/// How a template parameter is configured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateParameter {
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Absent and `null` both mean "no default"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub param_type: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub promotable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ParameterValidation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValidation {
    pub expression: String,
    pub message: String,
}

impl TemplateParameter {
    /// A parameter must be supplied by the caller when it has no usable default.
    /// Empty strings, `0` and `false` count as defaults.
    pub fn required(&self) -> bool {
        matches!(self.default, None | Some(serde_json::Value::Null))
    }
}

impl Template {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { metadata: ObjectMeta::new(namespace, name), ..Default::default() }
    }
}

impl Resource for Template {
    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }
}
