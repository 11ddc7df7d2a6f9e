// Server loop module
// Accepts connections until a shutdown signal arrives

use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept loop
///
/// Must run inside a `LocalSet`; each connection is served by a local task.
/// Returns once `shutdown` resolves, leaving in-flight connections to finish
/// on their own tasks.
pub async fn start_server_loop<S>(listener: TcpListener, state: Arc<AppState>, shutdown: S)
where
    S: Future<Output = &'static str>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            signal = &mut shutdown => {
                logger::log_shutdown(signal);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fixtures::FixtureStore;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let mut config = Config::defaults().unwrap();
        config.logging.access_log = false;
        let fixtures = FixtureStore::from_entries([("users.detail", json!({"id": 1, "name": "Jane"}))]);
        let routes = crate::routes::load(&config.routes, &fixtures).unwrap();
        let state = Arc::new(AppState::new(config, fixtures, routes));

        let listener = super::super::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let server = tokio::task::spawn_local(start_server_loop(listener, state, async move {
                    let _ = stop_rx.await;
                    "test"
                }));

                let mut stream = TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(b"GET /users/7 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                    .await
                    .unwrap();
                let mut raw = String::new();
                stream.read_to_string(&mut raw).await.unwrap();

                assert!(raw.starts_with("HTTP/1.1 200 OK"), "response: {raw}");
                assert!(raw.contains("application/json; charset=utf-8"));
                assert!(raw.ends_with(r#"{"id":7,"name":"Jane"}"#), "response: {raw}");

                stop_tx.send(()).unwrap();
                server.await.unwrap();
            })
            .await;
    }
}
