use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use atlas_maps::is_short_form;

use super::AppState;

const MISSING_URL: &str = "Missing or invalid url parameter";
const NOT_SHORT_URL: &str = "Invalid URL. Must be a maps.app.goo.gl or goo.gl/maps URL";
const EXPANSION_FAILED: &str = "Failed to expand URL";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpandedBody {
    expanded_url: String,
}

#[derive(Debug, Serialize)]
struct FunctionError {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn function_error(status: StatusCode, error: &'static str, details: Option<String>) -> Response {
    (status, Json(FunctionError { error, details })).into_response()
}

/// `POST` handler: body `{"url": "<short link>"}`, answer `{"expandedUrl": ...}`.
///
/// The body is read as raw bytes so that malformed JSON gets the same 400 as
/// a missing field instead of axum's extractor rejection.
pub(super) async fn expand_url(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(url) = requested_url(&body) else {
        return function_error(StatusCode::BAD_REQUEST, MISSING_URL, None);
    };

    if !is_short_form(&url) {
        return function_error(StatusCode::BAD_REQUEST, NOT_SHORT_URL, None);
    }

    match state.expander.expand(&url).await {
        Ok(expanded_url) => {
            tracing::info!(short_url = %url, expanded_url = %expanded_url, "expanded short link");
            (StatusCode::OK, Json(ExpandedBody { expanded_url })).into_response()
        }
        Err(e) => {
            tracing::error!(short_url = %url, error = %e, "error expanding URL");
            function_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                EXPANSION_FAILED,
                Some(e.to_string()),
            )
        }
    }
}

pub(super) async fn preflight() -> &'static str {
    "ok"
}

pub(super) async fn method_not_allowed() -> Response {
    function_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
}

/// A non-empty string `url` field, or `None`.
fn requested_url(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("url")?
        .as_str()
        .filter(|url| !url.is_empty())
        .map(ToOwned::to_owned)
}
