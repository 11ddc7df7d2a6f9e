//! Route table module
//!
//! Stores method + path pattern entries and resolves requests against them.

use hyper::Method;

use super::matcher::{Params, PathPattern};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct Entry<H> {
    method: Method,
    pattern: PathPattern,
    handler: H,
}

/// Result of a successful lookup
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub pattern: &'a str,
    pub handler: &'a H,
    pub params: Params,
}

#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    entries: Vec<Entry<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; a second route with the same method and path shape is rejected
    pub fn insert(&mut self, method: Method, path: &str, handler: H) -> Result<()> {
        let pattern = PathPattern::parse(path)?;
        if let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.method == method && e.pattern.same_shape(&pattern))
        {
            return Err(Error::invalid_route(format!(
                "{method} {path} conflicts with {method} {}",
                existing.pattern.as_str()
            )));
        }

        self.entries.push(Entry {
            method,
            pattern,
            handler,
        });
        Ok(())
    }

    /// Find the most specific route for a request
    ///
    /// `HEAD` requests fall back to `GET` routes when no explicit `HEAD`
    /// route matches.
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.find_exact(method, path).or_else(|| {
            if *method == Method::HEAD {
                self.find_exact(&Method::GET, path)
            } else {
                None
            }
        })
    }

    fn find_exact(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.entries
            .iter()
            .filter(|e| e.method == *method)
            .filter_map(|e| e.pattern.match_path(path).map(|params| (e, params)))
            .max_by_key(|(e, _)| e.pattern.rank())
            .map(|(e, params)| RouteMatch {
                pattern: e.pattern.as_str(),
                handler: &e.handler,
                params,
            })
    }

    /// Registered routes as `(method, pattern)` in registration order
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.entries.iter().map(|e| (&e.method, e.pattern.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<u32> {
        let mut table = RouteTable::new();
        table.insert(Method::POST, "/auth/login", 0).unwrap();
        table.insert(Method::GET, "/users/:id", 1).unwrap();
        table.insert(Method::GET, "/users/me", 2).unwrap();
        table
    }

    #[test]
    fn test_find_by_method_and_path() {
        let table = table();
        let m = table.find(&Method::POST, "/auth/login").unwrap();
        assert_eq!(*m.handler, 0);
        assert!(table.find(&Method::GET, "/auth/login").is_none());
        assert!(table.find(&Method::POST, "/users/42").is_none());
    }

    #[test]
    fn test_static_beats_param() {
        let table = table();
        let m = table.find(&Method::GET, "/users/me").unwrap();
        assert_eq!(*m.handler, 2);
        assert_eq!(m.pattern, "/users/me");

        let m = table.find(&Method::GET, "/users/42").unwrap();
        assert_eq!(*m.handler, 1);
        assert_eq!(m.params.get("id"), Some("42"));
    }

    #[test]
    fn test_head_falls_back_to_get() {
        let table = table();
        let m = table.find(&Method::HEAD, "/users/7").unwrap();
        assert_eq!(*m.handler, 1);
        assert!(table.find(&Method::HEAD, "/auth/login").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut table = table();
        let err = table.insert(Method::GET, "/users/:uid", 9).unwrap_err();
        assert!(err.to_string().contains("conflicts with GET /users/:id"));
        // Same path under another method is fine
        table.insert(Method::DELETE, "/users/:id", 3).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_routes_in_registration_order() {
        let table = table();
        let listed: Vec<_> = table.routes().map(|(m, p)| format!("{m} {p}")).collect();
        assert_eq!(
            listed,
            vec!["POST /auth/login", "GET /users/:id", "GET /users/me"]
        );
    }
}
