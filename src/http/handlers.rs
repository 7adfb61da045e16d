//! Route handlers for the articles API.
//!
//! Handlers only unpack the request; every decision is made in
//! [`ArticleService`](crate::articles::ArticleService).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::articles::{Article, GatewayResult};
use crate::http::request::Payload;
use crate::http::server::GatewayState;
use crate::upstream::RecordStore;

/// `GET /articulos/{id}`
pub async fn get_article<S: RecordStore>(
    State(state): State<GatewayState<S>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<Value>> {
    state.articles.fetch_article(&id).await.map(Json)
}

/// `PATCH /articulos/{id}`
pub async fn patch_article<S: RecordStore>(
    State(state): State<GatewayState<S>>,
    Path(id): Path<String>,
    Payload(payload): Payload,
) -> GatewayResult<Json<Value>> {
    state.articles.update_article(&id, payload).await.map(Json)
}

/// `GET /usuarios/{id}/articulos`
pub async fn list_user_articles<S: RecordStore>(
    State(state): State<GatewayState<S>>,
    Path(user_id): Path<String>,
) -> GatewayResult<Json<Vec<Value>>> {
    state.articles.list_user_articles(&user_id).await.map(Json)
}

/// `POST /usuarios/{id}/articulos`
pub async fn create_user_article<S: RecordStore>(
    State(state): State<GatewayState<S>>,
    Path(user_id): Path<String>,
    Payload(payload): Payload,
) -> GatewayResult<(StatusCode, Json<Article>)> {
    let article = state
        .articles
        .create_user_article(&user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(article)))
}
