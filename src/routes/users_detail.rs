//! `GET /users/:id`

use hyper::{Method, StatusCode};
use serde_json::{json, Map, Number, Value};

use super::{RequestContext, RouteHandler, Routes};
use crate::error::Result;
use crate::fixtures::FixtureStore;
use crate::http::Reply;

/// Id that simulates a missing user
pub const MISSING_ID: &str = "999";

pub const DETAIL_FIXTURE: &str = "users.detail";

pub const FIXTURES: &[&str] = &[DETAIL_FIXTURE];

pub fn register(routes: &mut Routes) -> Result<()> {
    routes.insert(Method::GET, "/users/:id", RouteHandler::Builtin(detail))
}

fn detail(ctx: &RequestContext<'_>, fixtures: &FixtureStore) -> Reply {
    let id = ctx.params.get("id").unwrap_or_default();

    if id == MISSING_ID {
        return Reply::new(
            StatusCode::NOT_FOUND,
            json!({
                "error": "User not found",
                "message": format!("User with ID {id} does not exist"),
            }),
        );
    }

    fixtures.get(DETAIL_FIXTURE).map_or_else(
        || Reply::fixture_missing(DETAIL_FIXTURE),
        |doc| Reply::ok(spread_with_id(doc, number_or_null(parse_int(id)))),
    )
}

/// Object spread of `base` followed by `id`
///
/// An existing `id` keeps its position. Arrays spread into index keys,
/// strings into one key per character, other scalars contribute nothing.
fn spread_with_id(base: &Value, id: Value) -> Value {
    let mut merged = match base {
        Value::Object(map) => map.clone(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.clone()))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(i, c)| (i.to_string(), Value::String(c.to_string())))
            .collect(),
        _ => Map::new(),
    };
    merged.insert("id".to_string(), id);
    Value::Object(merged)
}

/// Leading-integer parse: whitespace, optional sign, optional `0x`, digits
///
/// Trailing garbage is ignored. `None` means no digits were found.
fn parse_int(input: &str) -> Option<f64> {
    let trimmed = input.trim_start_matches(is_js_whitespace);

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, body) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let digit_len = body
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(body.len());
    let digits = &body[..digit_len];
    if digits.is_empty() {
        return None;
    }

    let magnitude = if radix == 10 {
        digits.parse::<f64>().ok()?
    } else {
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// WhiteSpace and LineTerminator code points skipped before the number
const fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000d}'
            | '\u{0020}'
            | '\u{00a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// JSON encoding of a parsed number; NaN and infinities become `null`
fn number_or_null(parsed: Option<f64>) -> Value {
    parsed
        .filter(|n| n.is_finite())
        .and_then(|n| serde_json::from_str::<Number>(&number_text(n)).ok())
        .map_or(Value::Null, Value::Number)
}

/// Shortest round-trip digits, plain below 1e21 and `d.ddde+N` above
fn number_text(n: f64) -> String {
    // -0 prints as 0
    let n = n + 0.0;
    if n.abs() < 1e21 {
        return n.to_string();
    }
    let exp = format!("{n:e}");
    if exp.contains("e-") {
        exp
    } else {
        exp.replacen('e', "e+", 1)
    }
}
