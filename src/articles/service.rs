//! Article request orchestration.
//!
//! Each operation is a fixed, strictly sequential chain of steps. The first
//! failing step decides the outcome; nothing after it runs.
//!
//! ```text
//! fetch:  validate id → get article                                  → 200
//! update: validate id → article exists → validate partial → patch    → 200
//! list:   validate id → get user    → list by owner                  → 200
//! create: validate id → get user    → validate creation → create     → 201
//! ```
//!
//! Existence checks and the following write are separate store calls; the
//! referenced record can disappear in between.

use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::articles::error::{GatewayError, GatewayResult, PathResource};
use crate::articles::types::Article;
use crate::upstream::RecordStore;
use crate::validation::{is_valid_identifier, validate_creation, validate_partial_update};

/// Orchestrates article operations against an injected record store.
pub struct ArticleService<S> {
    store: Arc<S>,
}

impl<S> Clone for ArticleService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> ArticleService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch an article by id.
    ///
    /// Any store failure, including an unreachable store, reads as not found.
    pub async fn fetch_article(&self, id: &str) -> GatewayResult<Value> {
        require_identifier(id, PathResource::Article)?;

        self.store.get_article(id).await.map_err(|e| {
            tracing::warn!(article_id = %id, error = %e, "Article lookup failed");
            GatewayError::NotFound
        })
    }

    /// Partially update an article.
    ///
    /// The article must exist before the payload is looked at.
    pub async fn update_article(&self, id: &str, payload: Map<String, Value>) -> GatewayResult<Value> {
        require_identifier(id, PathResource::Article)?;

        if let Err(e) = self.store.article_exists(id).await {
            tracing::warn!(article_id = %id, error = %e, "Article to update not found");
            return Err(GatewayError::NotFound);
        }

        validate_partial_update(&payload)?;

        self.store.patch_article(id, &payload).await.map_err(|e| {
            tracing::warn!(article_id = %id, error = %e, "Article update failed");
            GatewayError::Upstream
        })
    }

    /// List the articles owned by a user. An existing user with no articles
    /// yields an empty list.
    pub async fn list_user_articles(&self, user_id: &str) -> GatewayResult<Vec<Value>> {
        require_identifier(user_id, PathResource::User)?;
        self.require_user(user_id).await?;

        self.store.list_articles_by_owner(user_id).await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Article listing failed");
            GatewayError::Upstream
        })
    }

    /// Create an article under a user.
    ///
    /// Returns the record assembled here, not the store's echo of it.
    pub async fn create_user_article(
        &self,
        user_id: &str,
        payload: Map<String, Value>,
    ) -> GatewayResult<Article> {
        require_identifier(user_id, PathResource::User)?;
        self.require_user(user_id).await?;

        let fields = validate_creation(&payload)?;
        let article = Article::assemble(Uuid::new_v4(), fields);

        match self.store.create_article(&article).await {
            Ok(()) => {
                tracing::info!(article_id = %article.id, user_id = %user_id, "Article created");
                Ok(article)
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Article creation failed");
                Err(GatewayError::Upstream)
            }
        }
    }

    async fn require_user(&self, user_id: &str) -> GatewayResult<()> {
        self.store.get_user(user_id).await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "User lookup failed");
            GatewayError::NotFound
        })
    }
}

fn require_identifier(id: &str, resource: PathResource) -> GatewayResult<()> {
    if is_valid_identifier(id) {
        Ok(())
    } else {
        Err(GatewayError::InvalidId(resource))
    }
}
