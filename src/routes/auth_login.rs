//! `POST /auth/login`

use hyper::{Method, StatusCode};
use serde_json::Value;

use super::{RequestContext, RouteHandler, Routes};
use crate::error::Result;
use crate::fixtures::FixtureStore;
use crate::http::Reply;

/// Email that simulates rejected credentials
pub const ERROR_EMAIL: &str = "error@test.com";

pub const SUCCESS_FIXTURE: &str = "auth.login.success";
pub const ERROR_FIXTURE: &str = "auth.login.error";

pub const FIXTURES: &[&str] = &[SUCCESS_FIXTURE, ERROR_FIXTURE];

pub fn register(routes: &mut Routes) -> Result<()> {
    routes.insert(Method::POST, "/auth/login", RouteHandler::Builtin(login))
}

fn login(ctx: &RequestContext<'_>, fixtures: &FixtureStore) -> Reply {
    let email = ctx.body.and_then(|b| b.get("email")).and_then(Value::as_str);

    let (status, fixture) = if email == Some(ERROR_EMAIL) {
        (StatusCode::UNAUTHORIZED, ERROR_FIXTURE)
    } else {
        (StatusCode::OK, SUCCESS_FIXTURE)
    };

    fixtures.get(fixture).map_or_else(
        || Reply::fixture_missing(fixture),
        |doc| Reply::new(status, doc.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Params;
    use serde_json::json;

    fn store() -> FixtureStore {
        FixtureStore::from_entries([
            (SUCCESS_FIXTURE, json!({"token": "mock-token"})),
            (ERROR_FIXTURE, json!({"error": "Unauthorized"})),
        ])
    }

    fn call(body: Option<&Value>) -> Reply {
        let params = Params::default();
        let ctx = RequestContext {
            params: &params,
            body,
        };
        login(&ctx, &store())
    }

    #[test]
    fn test_error_email_is_rejected() {
        let body = json!({"email": "error@test.com", "password": "x"});
        let reply = call(Some(&body));
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.body, json!({"error": "Unauthorized"}));
    }

    #[test]
    fn test_other_inputs_succeed() {
        let cases = [
            Some(json!({"email": "a@b.com"})),
            Some(json!({"email": "ERROR@test.com"})),
            Some(json!({"email": ["error@test.com"]})),
            Some(json!({"password": "only"})),
            Some(json!("error@test.com")),
            Some(Value::Null),
            None,
        ];
        for body in &cases {
            let reply = call(body.as_ref());
            assert_eq!(reply.status, StatusCode::OK, "body: {body:?}");
            assert_eq!(reply.body, json!({"token": "mock-token"}));
        }
    }

    #[test]
    fn test_missing_fixture_is_internal_error() {
        let params = Params::default();
        let ctx = RequestContext {
            params: &params,
            body: None,
        };
        let reply = login(&ctx, &FixtureStore::default());
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.body["message"], "Fixture auth.login.success not loaded");
    }
}
