use std::net::SocketAddr;
use std::time::Duration;

use hookrelay_api::config::ServerConfig;
use hookrelay_api::router::build_app_router;
use hookrelay_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and the given idle
/// window.
pub fn test_config(idle_timeout_secs: u64) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        idle_timeout_secs,
    }
}

/// Bind an ephemeral port, spawn the full relay server on it, and
/// return its address plus the shared state so tests can observe the
/// registry directly.
///
/// This goes through `build_app_router`, so integration tests exercise
/// the same route table and middleware stack that production uses.
pub async fn spawn_relay(idle_timeout_secs: u64) -> (SocketAddr, AppState) {
    let config = test_config(idle_timeout_secs);
    let state = AppState::new(config.clone());
    let app = build_app_router(state.clone(), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    (addr, state)
}

/// Poll the registry until it holds exactly `expected` connections.
///
/// Registration happens in the post-upgrade task, so a client that has
/// completed its handshake may not be registered yet; tests use this
/// to avoid racing the server.
pub async fn wait_for_connections(state: &AppState, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if state.registry.connection_count().await == expected {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {expected} registered connections"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
