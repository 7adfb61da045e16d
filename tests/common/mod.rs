//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use articles_gateway::{GatewayConfig, GatewayServer, HttpRecordStore, Shutdown};
use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

pub const USER: &str = "0d6c1a2e-5b7f-4c3d-9e8a-1f2b3c4d5e6f";
pub const OTHER_USER: &str = "5e4d3c2b-1a0f-4e9d-b8c7-6a5f4e3d2c1b";
pub const ARTICLE: &str = "7b1e2c3d-4f5a-4b6c-8d7e-9f0a1b2c3d4e";

#[derive(Default)]
struct StoreState {
    articles: Vec<Value>,
    users: HashSet<String>,
    requests: Vec<String>,
    fail_writes: bool,
    bodiless_reads: bool,
}

/// In-memory record store speaking the store's HTTP contract.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockStore {
    pub fn with_user(self, id: &str) -> Self {
        self.state.lock().unwrap().users.insert(id.to_string());
        self
    }

    pub fn with_article(self, record: Value) -> Self {
        self.state.lock().unwrap().articles.push(record);
        self
    }

    /// Answer every PATCH, POST and listing with 500.
    pub fn failing_writes(self) -> Self {
        self.state.lock().unwrap().fail_writes = true;
        self
    }

    /// Answer article reads with 200 and an empty body.
    pub fn bodiless_reads(self) -> Self {
        self.state.lock().unwrap().bodiless_reads = true;
        self
    }

    /// Requests received so far, as "METHOD /path?query".
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn articles(&self) -> Vec<Value> {
        self.state.lock().unwrap().articles.clone()
    }

    /// Serve the store on an ephemeral port.
    pub async fn start(&self) -> SocketAddr {
        let app = Router::new()
            .route("/articulos", get(list_articles).post(create_article))
            .route("/articulos/{id}", get(get_article).patch(patch_article))
            .route("/usuarios/{id}", get(get_user))
            .layer(middleware::from_fn_with_state(self.clone(), record_request))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        addr
    }
}

async fn record_request(State(store): State<MockStore>, request: Request, next: Next) -> Response {
    let line = format!(
        "{} {}",
        request.method(),
        request
            .uri()
            .path_and_query()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default()
    );
    store.state.lock().unwrap().requests.push(line);
    next.run(request).await
}

async fn get_article(State(store): State<MockStore>, Path(id): Path<String>) -> Response {
    let state = store.state.lock().unwrap();
    match state.articles.iter().find(|a| a["id"] == id.as_str()) {
        Some(_) if state.bodiless_reads => StatusCode::OK.into_response(),
        Some(article) => Json(article.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn patch_article(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Response {
    let mut state = store.state.lock().unwrap();
    if state.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    match state.articles.iter_mut().find(|a| a["id"] == id.as_str()) {
        Some(article) => {
            for (key, value) in fields {
                article[key.as_str()] = value;
            }
            Json(article.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn list_articles(
    State(store): State<MockStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let state = store.state.lock().unwrap();
    if state.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let owner = query.get("usuarioId").cloned().unwrap_or_default();
    let matching: Vec<Value> = state
        .articles
        .iter()
        .filter(|a| a["usuarioId"] == owner.as_str())
        .cloned()
        .collect();
    Json(matching).into_response()
}

async fn create_article(State(store): State<MockStore>, Json(article): Json<Value>) -> Response {
    let mut state = store.state.lock().unwrap();
    if state.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    state.articles.push(article.clone());
    (StatusCode::CREATED, Json(article)).into_response()
}

async fn get_user(State(store): State<MockStore>, Path(id): Path<String>) -> Response {
    if store.state.lock().unwrap().users.contains(&id) {
        Json(serde_json::json!({ "id": id })).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// A running gateway under test.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestGateway {
    /// Start a gateway forwarding to `upstream_url`.
    pub async fn start(upstream_url: &str) -> Self {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.upstream.base_url = upstream_url.to_string();

        let store = HttpRecordStore::new(&config.upstream).unwrap();
        let server = GatewayServer::new(config, store);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        Self {
            addr,
            client,
            shutdown,
        }
    }

    /// Start a mock store and a gateway in front of it.
    pub async fn with_store(store: &MockStore) -> Self {
        let store_addr = store.start().await;
        Self::start(&format!("http://{store_addr}")).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// A complete article record as the store holds it.
pub fn stored_article(id: &str, owner: &str) -> Value {
    serde_json::json!({
        "id": id,
        "titulo": "Hola",
        "contenido": "Mundo",
        "fechaAlta": "2024-05-01",
        "usuarioId": owner,
    })
}
