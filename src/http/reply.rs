//! Handler reply type

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::Value;

use super::response;

/// Status code plus JSON body returned by a route handler
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub const fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub const fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status, response::error_body(status, message))
    }

    pub fn route_not_found(method: &str, path: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, response::route_not_found_body(method, path))
    }

    pub fn fixture_missing(name: &str) -> Self {
        crate::logger::log_error(&format!("Fixture {name} not loaded"));
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Fixture {name} not loaded"),
        )
    }

    pub fn into_response(self, is_head: bool) -> Response<Full<Bytes>> {
        response::build_json_response(self.status, &self.body, is_head)
    }
}
