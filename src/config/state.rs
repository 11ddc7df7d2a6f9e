// Application state module
// Everything a request needs, built once before the listener starts

use super::types::Config;
use crate::fixtures::FixtureStore;
use crate::routes::Routes;

/// Application state, shared read-only across connections
pub struct AppState {
    pub config: Config,
    pub fixtures: FixtureStore,
    pub routes: Routes,
}

impl AppState {
    pub const fn new(config: Config, fixtures: FixtureStore, routes: Routes) -> Self {
        Self {
            config,
            fixtures,
            routes,
        }
    }
}
