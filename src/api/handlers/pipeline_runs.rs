use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::api::{error::ApiError, routes::ApiState};
use crate::domain::PipelineRun;
use crate::listing::{process, ListResult, PipelineRunListHandler};

use super::list_params::ListParams;

pub async fn list_pipeline_runs_handler(
    State(state): State<ApiState>,
    Path(namespace): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<PipelineRun>>, ApiError> {
    let span = crate::list_span!("pipelineruns", namespace);
    span.in_scope(|| -> Result<_, ApiError> {
        let descriptor = params.into_descriptor()?;
        let runs = state.store.pipeline_runs(&namespace);
        let result = process(&runs, &descriptor, &PipelineRunListHandler::new())?;

        debug!(returned = result.items.len(), total_items = result.total_items, "Listed pipeline runs");
        Ok(Json(result))
    })
}
