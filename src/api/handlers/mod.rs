//! HTTP request handlers organized by resource type

pub mod health;
pub mod jenkins_proxy;
pub mod list_params;
pub mod pipeline_runs;
pub mod templates;

pub use health::{health_handler, HealthResponse};
pub use jenkins_proxy::jenkins_proxy_handler;
pub use list_params::ListParams;
pub use pipeline_runs::list_pipeline_runs_handler;
pub use templates::{get_template_handler, list_templates_handler, TemplateListOptions};
