//! Startup error types
//!
//! Request-time failures never surface here; they are turned into JSON
//! responses by the handler. Everything in this enum is fatal at startup.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to read fixture directory {}: {source}", path.display())]
    FixtureDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read fixture {}: {source}", path.display())]
    FixtureRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in fixture {}: {source}", path.display())]
    FixtureParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("Logger error: {0}")]
    Logger(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_route(msg: impl Into<String>) -> Self {
        Self::InvalidRoute(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_error_names_path() {
        let err = Error::FixtureRead {
            path: PathBuf::from("responses/users.detail.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("responses/users.detail.json"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_invalid_route_message() {
        let err = Error::invalid_route("duplicate GET /users/:id");
        assert_eq!(err.to_string(), "Invalid route: duplicate GET /users/:id");
    }
}
