use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::jenkins::JenkinsForwarder;
use crate::store::ObjectStore;

use super::handlers::{
    get_template_handler, health_handler, jenkins_proxy_handler, list_pipeline_runs_handler,
    list_templates_handler,
};

pub const PIPELINE_RUNS_PATH: &str =
    "/kapis/devops.kubesphere.io/v1alpha3/namespaces/{namespace}/pipelineruns";
pub const TEMPLATES_PATH: &str = "/kapis/devops.kubesphere.io/v1alpha1/devops/{devops}/templates";
pub const TEMPLATE_PATH: &str =
    "/kapis/devops.kubesphere.io/v1alpha1/devops/{devops}/templates/{template}";
pub const JENKINS_PROXY_PATH: &str = "/jenkins/{*path}";

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn ObjectStore>,
    /// `None` when no Jenkins server is configured
    pub forwarder: Option<Arc<JenkinsForwarder>>,
}

impl ApiState {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store, forwarder: None }
    }

    pub fn with_forwarder(mut self, forwarder: JenkinsForwarder) -> Self {
        self.forwarder = Some(Arc::new(forwarder));
        self
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route(PIPELINE_RUNS_PATH, get(list_pipeline_runs_handler))
        .route(TEMPLATES_PATH, get(list_templates_handler))
        .route(TEMPLATE_PATH, get(get_template_handler))
        .route(JENKINS_PROXY_PATH, any(jenkins_proxy_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
