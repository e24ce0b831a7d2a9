use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{error::ApiError, routes::ApiState};
use crate::domain::Template;
use crate::errors::DevopsError;
use crate::listing::{process, ListResult, TemplateListHandler};

use super::list_params::ListParams;

/// Template-only listing options, read alongside [`ListParams`]
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TemplateListOptions {
    /// Omit the template body from each item
    #[serde(default)]
    pub summary: bool,
}

pub async fn list_templates_handler(
    State(state): State<ApiState>,
    Path(devops): Path<String>,
    Query(params): Query<ListParams>,
    Query(options): Query<TemplateListOptions>,
) -> Result<Json<ListResult<Template>>, ApiError> {
    let span = crate::list_span!("templates", devops, summary = options.summary);
    span.in_scope(|| -> Result<_, ApiError> {
        let descriptor = params.into_descriptor()?;
        let templates = state.store.templates(&devops);
        let handler = TemplateListHandler { summary: options.summary };
        Ok(Json(process(&templates, &descriptor, &handler)?))
    })
}

pub async fn get_template_handler(
    State(state): State<ApiState>,
    Path((devops, template)): Path<(String, String)>,
) -> Result<Json<Template>, ApiError> {
    state
        .store
        .template(&devops, &template)
        .map(Json)
        .ok_or_else(|| DevopsError::not_found("Template", template).into())
}
