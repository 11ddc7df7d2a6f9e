//! Path pattern matching module
//!
//! Patterns are `/`-separated segments. A segment starting with `:` is a
//! named parameter capturing exactly one non-empty path segment; every other
//! segment must match literally.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// Parsed route path such as `/users/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(Error::invalid_route(format!(
                "path '{pattern}' must start with '/'"
            )));
        };

        let mut segments = Vec::new();
        for part in rest.split('/') {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(Error::invalid_route(format!(
                        "path '{pattern}' has an unnamed parameter"
                    )));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(n) if n == name))
                {
                    return Err(Error::invalid_route(format!(
                        "path '{pattern}' repeats parameter ':{name}'"
                    )));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Static(part.to_string()));
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request path, returning captured parameters on success
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let mut parts = rest.split('/');
        let mut params = Params::default();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Static(expected) => {
                    if part != expected {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.push(name.clone(), decode_segment(part));
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Per-segment specificity; static segments outrank parameters
    pub(super) fn rank(&self) -> Vec<u8> {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Static(_) => 1,
                Segment::Param(_) => 0,
            })
            .collect()
    }

    /// Whether two patterns match exactly the same set of paths
    pub(super) fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }
}

/// Captured path parameters in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    fn push(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Percent-decode a path segment, keeping the raw text if it is not UTF-8
fn decode_segment(part: &str) -> String {
    urlencoding::decode(part).map_or_else(|_| part.to_string(), std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_static_path() {
        let pattern = PathPattern::parse("/auth/login").unwrap();
        assert_eq!(pattern.match_path("/auth/login"), Some(Params::default()));
        assert!(pattern.match_path("/auth/login/").is_none());
        assert!(pattern.match_path("/auth").is_none());
        assert!(pattern.match_path("/auth/logout").is_none());
    }

    #[test]
    fn test_match_param() {
        let pattern = PathPattern::parse("/users/:id").unwrap();
        let params = pattern.match_path("/users/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("name"), None);

        assert!(pattern.match_path("/users/").is_none());
        assert!(pattern.match_path("/users/42/posts").is_none());
        assert!(pattern.match_path("users/42").is_none());
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let pattern = PathPattern::parse("/users/:id").unwrap();
        let params = pattern.match_path("/users/a%20b").unwrap();
        assert_eq!(params.get("id"), Some("a b"));

        let params = pattern.match_path("/users/%FF").unwrap();
        assert_eq!(params.get("id"), Some("%FF"));
    }

    #[test]
    fn test_multiple_params_in_order() {
        let pattern = PathPattern::parse("/posts/:post/comments/:comment").unwrap();
        let params = pattern.match_path("/posts/7/comments/9").unwrap();
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("post", "7"), ("comment", "9")]);
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/x").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(PathPattern::parse("users").is_err());
        assert!(PathPattern::parse("/users/:").is_err());
        assert!(PathPattern::parse("/a/:id/b/:id").is_err());
    }

    #[test]
    fn test_same_shape_ignores_param_names() {
        let a = PathPattern::parse("/users/:id").unwrap();
        let b = PathPattern::parse("/users/:uid").unwrap();
        let c = PathPattern::parse("/users/me").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
        assert!(c.rank() > a.rank());
    }
}
