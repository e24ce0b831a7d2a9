//! # Domain Types
//!
//! Resource kinds served by the list API. These are immutable snapshots as far
//! as the list pipeline is concerned: it reads them, clones them into a page,
//! and never mutates its input.

pub mod meta;
pub mod pipeline_run;
pub mod template;

pub use meta::{ObjectMeta, Resource, JENKINS_RUN_ID_ANNOTATION};
pub use pipeline_run::{
    Parameter, PipelineRef, PipelineRun, PipelineRunSpec, PipelineRunStatus, RunPhase, Scm,
};
pub use template::{ParameterValidation, Template, TemplateParameter, TemplateSpec};
