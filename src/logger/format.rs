//! Access log format module
//!
//! One line per completed request, in one of:
//! - `json` (request-completed record, the default)
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - Custom patterns with `$variable` substitution

use chrono::{DateTime, Local};
use serde_json::json;

/// Access log entry for one request/response pair
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    pub http_version: String,
    /// Matched route pattern, e.g. `/users/:id`
    pub route: Option<String>,
    pub status: u16,
    pub body_bytes: usize,
    pub user_agent: Option<String>,
    /// Handling time in microseconds
    pub response_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            route: None,
            status: 200,
            body_bytes: 0,
            user_agent: None,
            response_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "json" => self.format_json(),
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            custom => self.format_custom(custom),
        }
    }

    fn uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// Response time in milliseconds
    #[allow(clippy::cast_precision_loss)]
    fn response_time_ms(&self) -> f64 {
        self.response_time_us as f64 / 1000.0
    }

    fn format_json(&self) -> String {
        json!({
            "time": self.time.to_rfc3339(),
            "msg": "request completed",
            "req": {
                "method": self.method,
                "url": self.uri(),
                "route": self.route,
                "remoteAddress": self.remote_addr,
                "userAgent": self.user_agent,
            },
            "res": {
                "statusCode": self.status,
                "bytes": self.body_bytes,
            },
            "responseTime": self.response_time_ms(),
        })
        .to_string()
    }

    /// `$remote_addr - - [$time_local] "$request" $status $bytes "-" "$user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} \"-\" \"{}\"",
            self.format_common(),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// `$remote_addr - - [$time_local] "$request" $status $bytes`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time_local(),
            self.method,
            self.uri(),
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$remote_addr`, `$time_local`, `$time_iso8601`
    /// - `$method`, `$uri` (path with query), `$route` (matched pattern or `-`)
    /// - `$status`, `$bytes`, `$user_agent`
    /// - `$response_time` (milliseconds, 3 decimal places)
    fn format_custom(&self, pattern: &str) -> String {
        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace("$time_local", &self.time_local())
            .replace("$time_iso8601", &self.time.to_rfc3339())
            .replace("$response_time", &format!("{:.3}", self.response_time_ms()))
            .replace("$method", &self.method)
            .replace("$uri", &self.uri())
            .replace("$route", self.route.as_deref().unwrap_or("-"))
            .replace("$status", &self.status.to_string())
            .replace("$bytes", &self.body_bytes.to_string())
            .replace("$user_agent", self.user_agent.as_deref().unwrap_or("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "GET".to_string(),
            "/users/42".to_string(),
        );
        entry.query = Some("verbose=1".to_string());
        entry.route = Some("/users/:id".to_string());
        entry.status = 200;
        entry.body_bytes = 128;
        entry.user_agent = Some("curl/8.0".to_string());
        entry.response_time_us = 1500;
        entry
    }

    #[test]
    fn test_format_json() {
        let entry = create_test_entry();
        let line = entry.format("json");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["msg"], "request completed");
        assert_eq!(value["req"]["method"], "GET");
        assert_eq!(value["req"]["url"], "/users/42?verbose=1");
        assert_eq!(value["req"]["route"], "/users/:id");
        assert_eq!(value["res"]["statusCode"], 200);
        assert_eq!(value["responseTime"], 1.5);
    }

    #[test]
    fn test_format_json_unmatched_route() {
        let mut entry = create_test_entry();
        entry.route = None;
        entry.status = 404;
        let value: serde_json::Value = serde_json::from_str(&entry.format("json")).unwrap();
        assert!(value["req"]["route"].is_null());
        assert_eq!(value["res"]["statusCode"], 404);
    }

    #[test]
    fn test_format_common_and_combined() {
        let entry = create_test_entry();
        let common = entry.format("common");
        assert!(common.starts_with("192.168.1.1 - - ["));
        assert!(common.contains("\"GET /users/42?verbose=1 HTTP/1.1\" 200 128"));
        assert!(!common.contains("curl/8.0"));

        let combined = entry.format("combined");
        assert!(combined.starts_with(&common));
        assert!(combined.ends_with("\"-\" \"curl/8.0\""));
    }

    #[test]
    fn test_format_custom() {
        let entry = create_test_entry();
        let line = entry.format("$method $route $status $response_time");
        assert_eq!(line, "GET /users/:id 200 1.500");
    }
}
