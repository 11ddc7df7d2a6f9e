//! HTTP response building module
//!
//! Every body this server produces is JSON; builders here serialize a value
//! and attach the shared headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde_json::{json, Value};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Build a JSON response; HEAD responses keep the headers and drop the body
pub fn build_json_response(status: StatusCode, body: &Value, is_head: bool) -> Response<Full<Bytes>> {
    let encoded = match serde_json::to_vec(body) {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_serialize_failure();
        }
    };
    let content_length = encoded.len();
    let payload = if is_head { Bytes::new() } else { encoded };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, content_length)
        .body(Full::new(payload))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_serialize_failure() -> Response<Full<Bytes>> {
    let body = r#"{"statusCode":500,"error":"Internal Server Error","message":"Failed to serialize response"}"#;
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from(body))))
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::ALLOW, "GET, HEAD, POST, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            "GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS",
        )
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization")
        .header(header::ACCESS_CONTROL_MAX_AGE, "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::NO_CONTENT, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Allow any origin on a finished response
pub fn apply_cors(response: &mut Response<Full<Bytes>>) {
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}

/// `{"statusCode":..,"error":..,"message":..}` error body
pub fn error_body(status: StatusCode, message: &str) -> Value {
    json!({
        "statusCode": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Unknown"),
        "message": message,
    })
}

/// Body for requests that match no registered route
pub fn route_not_found_body(method: &str, path: &str) -> Value {
    json!({
        "message": format!("Route {method}:{path} not found"),
        "error": "Not Found",
        "statusCode": 404,
    })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_json_response_headers_and_body() {
        let resp = build_json_response(StatusCode::CREATED, &json!({"ok": true}), false);
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(resp.headers()[header::CONTENT_LENGTH], "11");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_head_response_has_no_body() {
        let resp = build_json_response(StatusCode::OK, &json!({"ok": true}), true);
        assert_eq!(resp.headers()[header::CONTENT_LENGTH], "11");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_error_bodies() {
        assert_eq!(
            error_body(StatusCode::PAYLOAD_TOO_LARGE, "Request body is too large"),
            json!({
                "statusCode": 413,
                "error": "Payload Too Large",
                "message": "Request body is too large",
            })
        );
        assert_eq!(
            route_not_found_body("GET", "/nope").to_string(),
            r#"{"message":"Route GET:/nope not found","error":"Not Found","statusCode":404}"#
        );
    }

    #[test]
    fn test_options_and_cors() {
        let resp = build_options_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let mut resp = build_json_response(StatusCode::OK, &json!({}), false);
        apply_cors(&mut resp);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
