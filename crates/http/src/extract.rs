//! Building [`RequestDescriptor`]s from axum requests.
//!
//! This is integration glue only: it snapshots the method, the ordered
//! query pairs, the content-type classification, and (for POST/PUT) the
//! decoded body mapping. No routing, no middleware, no server. Handlers
//! take `RequestDescriptor` as an extractor and hand it to a resolver.

use axum::extract::{FromRequest, Request};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

use crate::descriptor::RequestDescriptor;

/// Maximum request body size accepted by the extractor: 2 MB.
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Rejections produced while snapshotting a request.
///
/// Rendered as `400 {"error": message}` JSON, matching the error shape of
/// the surrounding service.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorRejection {
    /// The body could not be read (too large, connection error).
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The body claimed a JSON content type but did not parse.
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(String),

    /// The JSON body parsed but was not an object.
    #[error("JSON request body must be an object")]
    NonObjectJson,
}

impl IntoResponse for DescriptorRejection {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

impl<S> FromRequest<S> for RequestDescriptor
where
    S: Send + Sync,
{
    type Rejection = DescriptorRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();

        let method = parts.method.as_str().to_owned();
        let query_params: Vec<(String, String)> = parts
            .uri
            .query()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        let is_json = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(is_json_media_type)
            .unwrap_or(false);

        let mut descriptor = RequestDescriptor {
            method,
            query_params,
            is_json,
            body_params: Map::new(),
        };

        // Only POST/PUT bodies carry arguments; everything else is left
        // unread.
        if descriptor.method == "POST" || descriptor.method == "PUT" {
            let bytes = axum::body::to_bytes(body, MAX_BODY_SIZE)
                .await
                .map_err(|err| DescriptorRejection::BodyRead(err.to_string()))?;
            descriptor.body_params = if is_json {
                decode_json_body(&bytes)?
            } else {
                decode_form_body(&bytes)
            };
        }

        Ok(descriptor)
    }
}

/// `application/json` and `+json` suffix types count as JSON.
fn is_json_media_type(content_type: &str) -> bool {
    let media = content_type.split(';').next().unwrap_or("").trim();
    media == "application/json" || media.ends_with("+json")
}

/// Decode a JSON body into its field mapping. An empty body is an empty
/// mapping; a non-object body is a rejection.
fn decode_json_body(bytes: &[u8]) -> Result<Map<String, Value>, DescriptorRejection> {
    if bytes.is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| DescriptorRejection::InvalidJson(err.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DescriptorRejection::NonObjectJson),
    }
}

/// Decode a form-encoded body. Repeated fields keep the last value.
fn decode_form_body(bytes: &[u8]) -> Map<String, Value> {
    url::form_urlencoded::parse(bytes)
        .into_owned()
        .map(|(name, value)| (name, Value::String(value)))
        .collect()
}
