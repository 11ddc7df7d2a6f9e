//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: health probes, body size
//! checks, route lookup, body parsing, handler invocation and access logging.

use crate::config::AppState;
use crate::http::{self, Reply};
use crate::logger::{self, AccessLogEntry};
use crate::routes::RequestContext;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderMap};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let enable_cors = state.config.http.enable_cors;

    // 1. CORS preflight
    let (mut response, route) = if enable_cors && parts.method == Method::OPTIONS {
        (http::build_options_response(), None)
    } else {
        let (reply, route) = route_request(&parts, body, &state).await;
        (reply.into_response(parts.method == Method::HEAD), route)
    };

    if enable_cors {
        http::apply_cors(&mut response);
    }

    if state.config.logging.access_log {
        log_access(&parts, &response, route, peer_addr, started, &state);
    }

    Ok(response)
}

/// Resolve a request to a reply, returning the matched route pattern
async fn route_request<B>(parts: &Parts, body: B, state: &AppState) -> (Reply, Option<String>)
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = parts.uri.path();
    let method = &parts.method;

    // 2. Health check endpoints
    let health = &state.config.routes.health;
    if health.enabled
        && (*method == Method::GET || *method == Method::HEAD)
        && (path == health.liveness_path || path == health.readiness_path)
    {
        return (Reply::ok(json!({"status": "ok"})), Some(path.to_string()));
    }

    // 3. Route lookup
    let Some(matched) = state.routes.find(method, path) else {
        return (Reply::route_not_found(method.as_str(), path), None);
    };
    let route = Some(matched.pattern.to_string());

    // 4. Body size and parsing
    let max_body_size = state.config.http.max_body_size;
    if let Some(reply) = check_body_size(&parts.headers, max_body_size) {
        return (reply, route);
    }
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let parsed = match http::read_body(body, limit).await {
        Ok(bytes) => http::parse_json_body(header_str(&parts.headers, header::CONTENT_TYPE), &bytes),
        Err(e) => Err(e),
    };
    let body = match parsed {
        Ok(body) => body,
        Err(e) => {
            logger::log_warning(&format!("{method} {path}: {e}"));
            return (e.into_reply(), route);
        }
    };

    // 5. Handler
    let ctx = RequestContext {
        params: &matched.params,
        body: body.as_ref(),
    };
    (matched.handler.call(&ctx, &state.fixtures), route)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Reply> {
    let content_length = headers.get(header::CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::BodyError::TooLarge.into_reply())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    route: Option<String>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = version_label(parts.version).to_string();
    entry.route = route;
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0);
    entry.user_agent = header_str(&parts.headers, header::USER_AGENT).map(ToString::to_string);
    entry.response_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
