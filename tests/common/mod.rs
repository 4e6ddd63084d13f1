//! Shared harness: a recording mock upstream and a proxy pointed at it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use restful::proxy::client::ForwardingClient;
use restful::proxy::client::DEFAULT_BODY_LIMIT;
use restful::server::{self, AppState};
use restful::upstream::Upstream;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub type Log = Arc<Mutex<Vec<Recorded>>>;

pub struct Harness {
    pub proxy: SocketAddr,
    pub state: Arc<AppState>,
    pub upstream_log: Log,
    shutdown: Vec<tokio::sync::oneshot::Sender<()>>,
}

impl Harness {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.proxy)
    }

    pub fn last_upstream_request(&self) -> Recorded {
        self.upstream_log
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("upstream saw no request")
    }

    pub fn upstream_requests(&self) -> usize {
        self.upstream_log.lock().unwrap().len()
    }

    pub fn stop(self) {
        for tx in self.shutdown {
            let _ = tx.send(());
        }
    }
}

async fn serve(router: Router) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

async fn upstream_handler(State(log): State<Log>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    log.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(String::from),
        headers: parts.headers.clone(),
        body: body.clone(),
    });

    match (parts.method.as_str(), parts.uri.path()) {
        ("GET", "/posts") => Json(json!([
            {"userId": 1, "id": 1, "title": "first", "body": "a", "tags": ["x"]},
            {"userId": 1, "id": 2, "title": "second", "body": "b"},
            {"userId": 2, "id": 3, "title": "third", "body": "c", "draft": true}
        ]))
        .into_response(),
        ("GET", "/posts/1") => (
            [(CONTENT_TYPE, "application/json")],
            r#"{"userId":1,"id":1,"title":"t","body":"b"}"#,
        )
            .into_response(),
        ("GET", "/posts/teapot") => StatusCode::IM_A_TEAPOT.into_response(),
        ("GET", "/posts/down") => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
        ("GET", "/posts/html") => (StatusCode::OK, "<html>not json</html>").into_response(),
        ("POST", "/posts") => match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(mut value) => {
                value["id"] = json!(101);
                (StatusCode::CREATED, Json(value)).into_response()
            }
            Err(_) => StatusCode::BAD_REQUEST.into_response(),
        },
        ("PUT" | "PATCH", _) => match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(value) => Json(value).into_response(),
            Err(_) => StatusCode::BAD_REQUEST.into_response(),
        },
        ("DELETE", _) => Json(json!({})).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

pub async fn start_upstream() -> (SocketAddr, Log, tokio::sync::oneshot::Sender<()>) {
    let log: Log = Arc::default();
    let router = Router::new()
        .fallback(upstream_handler)
        .with_state(log.clone());
    let (addr, shutdown) = serve(router).await;
    (addr, log, shutdown)
}

pub async fn start_proxy(upstream: &str) -> (SocketAddr, Arc<AppState>, tokio::sync::oneshot::Sender<()>) {
    start_proxy_with_limit(upstream, DEFAULT_BODY_LIMIT).await
}

pub async fn start_proxy_with_limit(
    upstream: &str,
    body_limit: usize,
) -> (SocketAddr, Arc<AppState>, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(AppState::new(
        ForwardingClient::connect().with_body_limit(body_limit),
        Upstream::parse(upstream).unwrap(),
    ));
    let router = server::build_router(state.clone());
    let (addr, shutdown) = serve(router).await;
    (addr, state, shutdown)
}

pub async fn start() -> Harness {
    start_with_limit(DEFAULT_BODY_LIMIT).await
}

pub async fn start_with_limit(body_limit: usize) -> Harness {
    let (upstream_addr, upstream_log, upstream_shutdown) = start_upstream().await;
    let (proxy, state, proxy_shutdown) =
        start_proxy_with_limit(&format!("http://{upstream_addr}/posts"), body_limit).await;
    Harness {
        proxy,
        state,
        upstream_log,
        shutdown: vec![proxy_shutdown, upstream_shutdown],
    }
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
