use atlas_core::{ParsedLocation, INVALID_MAPS_URL_MESSAGE};
use atlas_maps::validate_optional_maps_url;
use axum::{body::Bytes, extract::State, Extension, Json};
use serde::Deserialize;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ParseRequest {
    url: Option<String>,
}

/// Validates the submitted link, then extracts the place it points at.
/// Short links are expanded in-process.
pub(super) async fn parse_url(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<ApiResponse<ParsedLocation>>, ApiError> {
    let url = serde_json::from_slice::<ParseRequest>(&body)
        .ok()
        .and_then(|req| req.url);

    let check = validate_optional_maps_url(url.as_deref());
    let Some(url) = url.filter(|_| check.valid) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            check
                .error
                .unwrap_or_else(|| INVALID_MAPS_URL_MESSAGE.to_string()),
        ));
    };

    let parsed = state.parser.parse(&url).await;
    tracing::debug!(
        url = %url,
        found_name = parsed.name.is_some(),
        found_coordinates = parsed.coordinates().is_some(),
        expanded = parsed.expanded,
        "parsed maps link"
    );

    Ok(Json(ApiResponse {
        data: parsed,
        meta: ResponseMeta::new(req_id.0),
    }))
}
