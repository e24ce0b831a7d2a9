//! List handlers for the resource kinds served by the API.

use super::compare::{CompareChain, CompareKey};
use super::processor::ListHandler;
use crate::domain::{PipelineRun, Template};

/// PipelineRuns: newest first by default, every sort key available.
#[derive(Debug, Clone)]
pub struct PipelineRunListHandler {
    chain: CompareChain,
}

impl PipelineRunListHandler {
    pub fn new() -> Self {
        Self { chain: CompareChain::default_list_order() }
    }

    /// Replace the default chain, e.g. with [`CompareChain::pipeline_run_extended`].
    pub fn with_chain(chain: CompareChain) -> Self {
        Self { chain }
    }
}

impl Default for PipelineRunListHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ListHandler<PipelineRun> for PipelineRunListHandler {
    fn kind(&self) -> &'static str {
        "pipelineruns"
    }

    fn default_chain(&self) -> CompareChain {
        self.chain.clone()
    }
}

/// Templates carry no run data, so only creation time and name sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateListHandler {
    /// Drop the template body from listed items
    pub summary: bool,
}

impl TemplateListHandler {
    pub fn summary() -> Self {
        Self { summary: true }
    }
}

impl ListHandler<Template> for TemplateListHandler {
    fn kind(&self) -> &'static str {
        "templates"
    }

    fn supports(&self, key: CompareKey) -> bool {
        matches!(key, CompareKey::CreationTime | CompareKey::Name)
    }

    fn transform(&self, mut resource: Template) -> Template {
        if self.summary {
            resource.spec.template.clear();
        }
        resource
    }
}
