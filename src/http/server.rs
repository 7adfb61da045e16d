//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the articles routes
//! - Wire up middleware (request ID, tracing, CORS, body limit, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::articles::ArticleService;
use crate::config::GatewayConfig;
use crate::http::handlers::{create_user_article, get_article, list_user_articles, patch_article};
use crate::http::request::request_span;
use crate::lifecycle::wait_for_shutdown;
use crate::observability::metrics;
use crate::upstream::RecordStore;

/// Application state injected into handlers.
pub struct GatewayState<S> {
    pub articles: ArticleService<S>,
}

impl<S> Clone for GatewayState<S> {
    fn clone(&self) -> Self {
        Self {
            articles: self.articles.clone(),
        }
    }
}

/// HTTP server for the articles gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server forwarding to `store`.
    pub fn new<S: RecordStore>(config: GatewayConfig, store: S) -> Self {
        let state = GatewayState {
            articles: ArticleService::new(Arc::new(store)),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router<S: RecordStore>(config: &GatewayConfig, state: GatewayState<S>) -> Router {
        let router = Router::new()
            .route(
                "/articulos/{id}",
                get(get_article::<S>).patch(patch_article::<S>),
            )
            .route(
                "/usuarios/{id}/articulos",
                get(list_user_articles::<S>).post(create_user_article::<S>),
            )
            // Route layer so the matched path template is visible to metrics.
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            );

        if config.security.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::HttpRecordStore;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    const ARTICLE: &str = "7b1e2c3d-4f5a-4b6c-8d7e-9f0a1b2c3d4e";

    fn router(config: GatewayConfig) -> Router {
        // Requests in these tests are rejected before reaching the store.
        let store = HttpRecordStore::new(&config.upstream).unwrap();
        GatewayServer::new(config, store).router()
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let response = router(GatewayConfig::default())
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(format!("/articulos/{ARTICLE}"))
                    .header(header::ORIGIN, "http://frontend.local")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_can_be_disabled() {
        let mut config = GatewayConfig::default();
        config.security.cors_enabled = false;

        let response = router(config)
            .oneshot(
                Request::builder()
                    .uri("/articulos/not-a-uuid")
                    .header(header::ORIGIN, "http://frontend.local")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_body_limit() {
        let mut config = GatewayConfig::default();
        config.security.max_body_size = 16;

        let response = router(config)
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri(format!("/articulos/{ARTICLE}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"contenido": "mucho más de dieciséis bytes"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = router(GatewayConfig::default())
            .oneshot(Request::builder().uri("/usuarios").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
