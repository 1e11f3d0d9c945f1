//! Liveness endpoint for the hosting platform.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct HealthState {
    started: Instant,
    connected: Arc<AtomicBool>,
}

impl HealthState {
    /// `started` is the process start, reported back as `uptime`.
    pub fn new(started: Instant, connected: Arc<AtomicBool>) -> Self {
        Self { started, connected }
    }
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    /// Seconds since the process started.
    uptime: f64,
    timestamp: String,
    bot_status: &'static str,
}

pub fn router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
}

async fn health(State(state): State<HealthState>) -> Json<HealthReport> {
    let bot_status = if state.connected.load(Ordering::SeqCst) {
        "connected"
    } else {
        "connecting"
    };
    Json(HealthReport {
        status: "ok",
        uptime: state.started.elapsed().as_secs_f64(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        bot_status,
    })
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Serves the endpoint on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: HealthState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_health_and_fallback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connected = Arc::new(AtomicBool::new(false));
        let token = CancellationToken::new();
        let started = Instant::now();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let server = tokio::spawn(serve(
            listener,
            HealthState::new(started, connected.clone()),
            token.clone(),
        ));

        let response = get(addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        let body = response.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["bot_status"], "connecting");
        assert!(json["uptime"].as_f64().unwrap() >= 0.05);
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));

        connected.store(true, Ordering::SeqCst);
        let response = get(addr, "/health").await;
        assert!(response.contains("\"bot_status\":\"connected\""));

        let response = get(addr, "/metrics").await;
        assert!(response.starts_with("HTTP/1.1 404"));
        assert!(response.ends_with("Not Found"));

        token.cancel();
        server.await.unwrap().unwrap();
    }
}
