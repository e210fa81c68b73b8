//! Request dispatch onto the current route table.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::ForwardError;

/// Query parameter carrying the target name.
pub const FORWARD_PARAM: &str = "forward";

/// First `forward` value in the query string, percent-decoded.
pub fn forward_name(uri: &Uri) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == FORWARD_PARAM)
        .map(|(_, value)| value)
}

/// Forward the request to the backend named by `?forward=`, or answer 403.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request).to_owned();
    let name = forward_name(request.uri());

    let Some(target) = name.as_deref().and_then(|name| state.table.lookup(name)) else {
        tracing::debug!(
            request_id = %request_id,
            forward = ?name,
            path = %request.uri().path(),
            "No route for forward target"
        );
        metrics::record_request(StatusCode::FORBIDDEN.as_u16(), start);
        return StatusCode::FORBIDDEN.into_response();
    };

    tracing::debug!(
        request_id = %request_id,
        forward = ?name,
        backend = %target.address(),
        method = %request.method(),
        path = %request.uri().path(),
        "Forwarding request"
    );

    match target.forward(request).await {
        Ok(response) => {
            metrics::record_request(response.status().as_u16(), start);
            response
        }
        Err(e) => {
            let status = match e {
                ForwardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            tracing::warn!(
                request_id = %request_id,
                backend = %target.address(),
                error = %e,
                "Upstream error"
            );
            metrics::record_request(status.as_u16(), start);
            status.into_response()
        }
    }
}
