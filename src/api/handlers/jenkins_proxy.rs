//! Pass-through from the API server to Jenkins.

use axum::{
    extract::{OriginalUri, State},
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, Method, Uri,
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::api::{error::ApiError, routes::ApiState};
use crate::jenkins::OutboundRequest;

/// Mount point of the pass-through; stripped before forwarding
pub const JENKINS_PROXY_PREFIX: &str = "/jenkins";

/// Caller headers relayed to Jenkins; `Authorization` is replaced by the forwarder
const RELAYED_HEADERS: [axum::http::HeaderName; 3] = [AUTHORIZATION, ACCEPT, CONTENT_TYPE];

/// Upstream path and query exactly as the caller encoded them.
fn upstream_target(uri: &Uri) -> Result<String, ApiError> {
    let path = uri
        .path()
        .strip_prefix(JENKINS_PROXY_PREFIX)
        .filter(|rest| rest.starts_with('/'))
        .ok_or_else(|| ApiError::BadRequest(format!("'{}' is not a Jenkins path", uri.path())))?;

    Ok(match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    })
}

pub async fn jenkins_proxy_handler(
    State(state): State<ApiState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let forwarder = state
        .forwarder
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Jenkins server is not configured"))?;

    // Configured credentials only replace a caller credential, never stand in for a missing one
    if forwarder.has_credentials() && !headers.contains_key(AUTHORIZATION) {
        return Err(ApiError::unauthorized("Authorization header is required"));
    }

    let target = upstream_target(&uri)?;

    let mut request = OutboundRequest::new(method);
    for name in RELAYED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.with_header(name, value.clone());
        }
    }
    if !body.is_empty() {
        request = request.with_body(body);
    }

    let forwarded = forwarder.forward(&target, request).await?;

    let mut response = (forwarded.status, forwarded.body).into_response();
    if let Some(content_type) = forwarded.headers.get(CONTENT_TYPE) {
        response.headers_mut().insert(CONTENT_TYPE, content_type.clone());
    }
    Ok(response)
}
