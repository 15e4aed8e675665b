//! Request decoding and response encoding.
//!
//! The validation pipeline that turns an untrusted HTTP body into a typed
//! request value: content-type check, hard byte ceiling, strict
//! single-object JSON decode, and classification of every failure into an
//! (HTTP status, message) pair the handler can return verbatim.

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use thiserror::Error;
use tracing::error;

use crate::error::ApiError;

/// A classified rejection of a client request body.
///
/// Produced only by this module; terminal. The status and message are
/// surfaced to the caller exactly as built here, never retried and never
/// rewritten.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MalformedRequest {
    pub status: StatusCode,
    pub message: String,
}

impl MalformedRequest {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn body_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Request body must not be larger than {limit} bytes"),
        )
    }
}

/// Decodes the body of `req` into `T`, applying the full validation
/// pipeline in order: content-type, byte ceiling, strict single-object
/// JSON decode. The ordering matters - a mislabeled body is rejected with
/// 415 before a single byte of it is read.
pub async fn decode_json_request<T: DeserializeOwned>(
    req: Request,
    limit: usize,
) -> Result<T, MalformedRequest> {
    let (parts, body) = req.into_parts();
    check_content_type(&parts.headers)?;
    let bytes = read_body(body, limit).await?;
    decode_json_bytes(&bytes, limit)
}

/// Rejects a present `Content-Type` header whose essence is not
/// `application/json`; parameters such as charset are ignored, and an
/// absent header is accepted.
pub fn check_content_type(headers: &HeaderMap) -> Result<(), MalformedRequest> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let essence = content_type
            .to_str()
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim();
        if !essence.eq_ignore_ascii_case("application/json") {
            return Err(MalformedRequest::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type header is not application/json",
            ));
        }
    }
    Ok(())
}

/// Collects the request body under a hard ceiling of `limit` bytes.
///
/// Exceeding the ceiling is detected through the typed length-limit error
/// of the body-collection layer rather than by matching error text, and
/// maps to 413 naming the configured limit.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, MalformedRequest> {
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => Ok(bytes),
        Err(err) if is_length_limit(&err) => Err(MalformedRequest::body_too_large(limit)),
        Err(err) => {
            // Not a size violation: the stream itself failed mid-read.
            error!(error = %err, "failed to read request body");
            Err(MalformedRequest::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ))
        }
    }
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(inner) = source {
        if inner.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = inner.source();
    }
    false
}

/// Decodes exactly one strict JSON object from `body` into `T`.
///
/// Rejection points, in order:
/// 1. A body over `limit` bytes - 413 naming the limit (normally caught
///    while reading, re-checked here for callers holding raw bytes).
/// 2. An empty body - 400.
/// 3. Syntax errors (400 with the byte offset), truncated JSON, type
///    mismatches and unknown fields (400); only the unknown-field message
///    names the offending field, a type mismatch deliberately does not echo
///    which field was at fault.
/// 4. Anything after the first object - 400, the body must contain a
///    single JSON object.
///
/// Pure over the collected bytes: the same input always yields the same
/// typed value or the same classified failure.
pub fn decode_json_bytes<T: DeserializeOwned>(
    body: &[u8],
    limit: usize,
) -> Result<T, MalformedRequest> {
    if body.len() > limit {
        return Err(MalformedRequest::body_too_large(limit));
    }

    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<T>();

    let value = match stream.next() {
        None => {
            return Err(MalformedRequest::bad_request(
                "request body must not be empty",
            ))
        }
        Some(Err(err)) => return Err(classify_decode_error(&err, stream.byte_offset())),
        Some(Ok(value)) => value,
    };

    // Anything after the first object, valid JSON or not, is rejected.
    if stream.next().is_some() {
        return Err(MalformedRequest::bad_request(
            "request body must only contain a single JSON object",
        ));
    }

    Ok(value)
}

/// Maps a serde_json failure to a client-safe status and message.
fn classify_decode_error(err: &serde_json::Error, offset: usize) -> MalformedRequest {
    match err.classify() {
        Category::Syntax => MalformedRequest::bad_request(format!(
            "Request body contains badly-formed JSON (at position {offset})"
        )),
        // Truncated input ends up here rather than as a syntax error.
        Category::Eof => MalformedRequest::bad_request("Request body contains badly-formed JSON"),
        Category::Data => {
            // The field name of an unknown field is only available through
            // the error text; everything else in this category (type
            // mismatches, out-of-range numbers) gets the generic message so
            // the target shape is not leaked back to the client.
            let text = err.to_string();
            if let Some(rest) = text.strip_prefix("unknown field `") {
                if let Some(field) = rest.split('`').next() {
                    return MalformedRequest::bad_request(format!(
                        "Request body contains unknown field `{field}`"
                    ));
                }
            }
            MalformedRequest::bad_request("Request body contains badly-formed JSON")
        }
        Category::Io => {
            error!(error = %err, "unexpected I/O error decoding request body");
            MalformedRequest::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// Serializes `value` to a JSON response with the content-type header set.
///
/// The header is only set once serialization has succeeded; a failure
/// surfaces as an internal error instead of a half-written JSON body.
pub fn encode_json_body<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(ApiError::Encode)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
