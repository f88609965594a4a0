#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use redis_shortener::config::Config;
use redis_shortener::infrastructure::store::MemoryStore;
use redis_shortener::routes::build_router;
use redis_shortener::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const API_QUOTA: i64 = 3;
pub const WINDOW_SECONDS: u64 = 1800;

/// Configuration matching the defaults, with a small quota and proxy headers
/// trusted so tests can pose as different clients.
pub fn test_config() -> Config {
    Config {
        redis_url: "redis://127.0.0.1:6379".to_string(),
        link_db: 0,
        quota_db: 1,
        store_backend: "memory".to_string(),
        store_timeout_ms: 2000,
        api_quota: API_QUOTA,
        quota_window_seconds: WINDOW_SECONDS,
        default_expiry_hours: 24,
        short_code_length: 6,
        service_domain: "localhost:3000".to_string(),
        blocked_domains: vec!["blocked.test".to_string()],
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        behind_proxy: true,
    }
}

pub fn create_test_state(config: &Config) -> AppState {
    AppState::new(
        config,
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
    )
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

/// Server whose requests all appear to come from `peer`.
pub fn test_server_with_peer(state: AppState, peer: &str) -> TestServer {
    let app: Router = build_router(state).layer(MockConnectInfoLayer {
        addr: peer.parse().unwrap(),
    });
    TestServer::new(app).unwrap()
}

/// `X-Forwarded-For` header identifying a test client.
pub fn client(ip: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_str(ip).unwrap(),
    )
}

#[derive(Clone)]
pub struct MockConnectInfoLayer {
    addr: SocketAddr,
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}

/// Posts `body` to the shorten endpoint as client `ip`.
pub async fn shorten(server: &TestServer, ip: &str, body: serde_json::Value) -> TestResponse {
    let (name, value) = client(ip);
    server
        .post("/api/v1/shorten")
        .add_header(name, value)
        .json(&body)
        .await
}
