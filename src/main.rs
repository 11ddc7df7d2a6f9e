use std::future::Future;
use std::sync::Arc;

mod config;
mod error;
mod fixtures;
mod handler;
mod http;
mod logger;
mod routes;
mod routing;
mod server;

use crate::config::{AppState, Config};
use crate::error::Result;
use crate::fixtures::FixtureStore;

fn main() {
    if let Err(e) = run() {
        logger::log_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // First CLI argument: config file path without extension
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg).map_err(error::Error::Logger)?;

    // Create the Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<()> {
    serve(cfg, server::shutdown_signal()).await
}

/// Load fixtures and routes, bind, then accept until `shutdown` resolves
async fn serve<S>(cfg: Config, shutdown: S) -> Result<()>
where
    S: Future<Output = &'static str>,
{
    let addr = cfg.get_socket_addr()?;

    let fixtures = FixtureStore::load_dir(&cfg.fixtures.dir)?;
    if fixtures.is_empty() {
        logger::log_warning(&format!("No fixtures found in {}", cfg.fixtures.dir));
    }
    let routes = routes::load(&cfg.routes, &fixtures)?;

    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &cfg, routes.len(), fixtures.len());

    let state = Arc::new(AppState::new(cfg, fixtures, routes));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, shutdown))
        .await;
    Ok(())
}
