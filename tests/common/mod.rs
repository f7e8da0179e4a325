#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::{Duration, Utc};
use linkledger::domain::audit::{AuditEvent, AuditLogger};
use linkledger::domain::entities::Link;
use linkledger::domain::repositories::LinkRepository;
use linkledger::infrastructure::memory::{MemoryClickLedger, MemoryLinkRepository};
use linkledger::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const BASE_URL: &str = "http://short.test";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<MemoryLinkRepository>,
    pub audit_rx: mpsc::Receiver<AuditEvent>,
}

pub fn create_test_context() -> TestContext {
    create_test_context_with(false)
}

pub fn create_test_context_with(behind_proxy: bool) -> TestContext {
    let (tx, rx) = mpsc::channel(100);
    let repository = Arc::new(MemoryLinkRepository::new(Arc::new(MemoryClickLedger::new())));

    let state = AppState::with_repository(
        repository.clone(),
        AuditLogger::new(tx),
        BASE_URL,
        30,
        behind_proxy,
    );

    TestContext {
        state,
        repository,
        audit_rx: rx,
    }
}

pub async fn create_test_link(repository: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    let now = Utc::now();
    repository
        .create(Link::new(
            code.to_string(),
            url.to_string(),
            now,
            now + Duration::minutes(30),
        ))
        .await
        .unwrap()
}

pub async fn create_expired_link(repository: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    let now = Utc::now();
    repository
        .create(Link::new(
            code.to_string(),
            url.to_string(),
            now - Duration::hours(2),
            now - Duration::hours(1),
        ))
        .await
        .unwrap()
}

pub fn drain_audit(rx: &mut mpsc::Receiver<AuditEvent>) -> Vec<AuditEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
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
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
