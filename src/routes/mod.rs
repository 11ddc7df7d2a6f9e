//! Mock route modules and the loader that wires them up
//!
//! Each route module exposes `register`, which declares its method, path
//! and handler, plus the fixtures it reads. `load` runs every module's
//! `register` and then adds the fixture routes declared in configuration.

mod auth_login;
mod users_detail;

use std::fmt;

use hyper::{Method, StatusCode};
use serde_json::Value;

use crate::config::{FixtureRoute, RoutesConfig};
use crate::error::{Error, Result};
use crate::fixtures::FixtureStore;
use crate::http::Reply;
use crate::logger;
use crate::routing::{Params, RouteTable};

/// Request data visible to a handler
#[derive(Debug)]
pub struct RequestContext<'a> {
    pub params: &'a Params,
    /// Parsed JSON body, if one was sent with a JSON content type
    pub body: Option<&'a Value>,
}

pub type HandlerFn = fn(&RequestContext<'_>, &FixtureStore) -> Reply;

#[derive(Clone)]
pub enum RouteHandler {
    /// Handler implemented by a route module
    Builtin(HandlerFn),
    /// Fixed fixture reply declared in configuration
    Fixture { fixture: String, status: StatusCode },
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(_) => f.write_str("Builtin"),
            Self::Fixture { fixture, status } => f
                .debug_struct("Fixture")
                .field("fixture", fixture)
                .field("status", status)
                .finish(),
        }
    }
}

impl RouteHandler {
    pub fn call(&self, ctx: &RequestContext<'_>, fixtures: &FixtureStore) -> Reply {
        match self {
            Self::Builtin(handler) => handler(ctx, fixtures),
            Self::Fixture { fixture, status } => fixtures.get(fixture).map_or_else(
                || Reply::fixture_missing(fixture),
                |doc| Reply::new(*status, doc.clone()),
            ),
        }
    }
}

pub type Routes = RouteTable<RouteHandler>;

struct RouteModule {
    name: &'static str,
    register: fn(&mut Routes) -> Result<()>,
    fixtures: &'static [&'static str],
}

const MODULES: &[RouteModule] = &[
    RouteModule {
        name: "auth.login",
        register: auth_login::register,
        fixtures: auth_login::FIXTURES,
    },
    RouteModule {
        name: "users.detail",
        register: users_detail::register,
        fixtures: users_detail::FIXTURES,
    },
];

/// Build the route table from every route module plus configured fixture routes
pub fn load(config: &RoutesConfig, fixtures: &FixtureStore) -> Result<Routes> {
    let mut routes = Routes::new();

    for module in MODULES {
        (module.register)(&mut routes)?;
        for name in module.fixtures.iter().filter(|name| !fixtures.contains(name)) {
            logger::log_warning(&format!(
                "Route module {} uses fixture {name}, which is not loaded",
                module.name
            ));
        }
    }

    for route in &config.fixtures {
        register_fixture_route(&mut routes, route, fixtures)?;
    }

    for (method, pattern) in routes.routes() {
        logger::log_route_registered(method.as_str(), pattern);
    }
    Ok(routes)
}

fn register_fixture_route(routes: &mut Routes, route: &FixtureRoute, fixtures: &FixtureStore) -> Result<()> {
    let method = Method::from_bytes(route.method.to_ascii_uppercase().as_bytes())
        .map_err(|_| Error::invalid_route(format!("invalid method '{}'", route.method)))?;
    let status = StatusCode::from_u16(route.status).map_err(|_| {
        Error::invalid_route(format!("invalid status {} for {}", route.status, route.path))
    })?;
    if !fixtures.contains(&route.fixture) {
        return Err(Error::invalid_route(format!(
            "{method} {} uses unknown fixture '{}'",
            route.path, route.fixture
        )));
    }

    routes.insert(
        method,
        &route.path,
        RouteHandler::Fixture {
            fixture: route.fixture.clone(),
            status,
        },
    )
}
