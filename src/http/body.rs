//! Request body reading and JSON parsing

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::StatusCode;
use serde_json::Value;
use thiserror::Error;

use super::Reply;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BodyError {
    #[error("Request body is too large")]
    TooLarge,

    #[error("Failed to read request body: {0}")]
    Read(String),

    #[error("{0}")]
    InvalidJson(String),
}

impl BodyError {
    pub fn into_reply(self) -> Reply {
        let status = match self {
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Read(_) | Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
        };
        Reply::error(status, &self.to_string())
    }
}

/// Collect a request body, failing once more than `limit` bytes arrive
pub async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, BodyError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(BodyError::TooLarge),
        Err(e) => Err(BodyError::Read(e.to_string())),
    }
}

/// Whether a Content-Type names a JSON media type
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Parse a collected body
///
/// Empty bodies and non-JSON content types yield `None`; only a JSON
/// content type with an unparseable payload is an error.
pub fn parse_json_body(content_type: Option<&str>, bytes: &[u8]) -> Result<Option<Value>, BodyError> {
    if bytes.is_empty() || !content_type.is_some_and(is_json_content_type) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| BodyError::InvalidJson(e.to_string()))
}
