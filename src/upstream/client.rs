//! HTTP client for the record store.
//!
//! # Responsibilities
//! - Build resource URLs under the configured base URL
//! - Translate store status codes into `UpstreamError`
//! - Record one metric per call

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde_json::{Map, Value};
use url::Url;

use crate::articles::Article;
use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::{RecordStore, UpstreamError, UpstreamResult};

/// Record store reached over HTTP.
#[derive(Clone)]
pub struct HttpRecordStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpRecordStore {
    /// Create a client for the store described by `config`.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut base_url = Url::parse(&config.base_url)?;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        tracing::info!(
            base_url = %base_url,
            timeout_secs = ?config.timeout_secs,
            "Record store client initialized"
        );

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Base URL every resource path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> UpstreamResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

/// Map a non-success status to an error, keeping the response otherwise.
fn check_status(response: Response) -> UpstreamResult<Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(UpstreamError::NotFound),
        status => Err(UpstreamError::Status(status)),
    }
}

/// Run one upstream call and record its outcome.
async fn observe<T>(
    operation: &'static str,
    call: impl std::future::Future<Output = UpstreamResult<T>>,
) -> UpstreamResult<T> {
    let result = call.await;
    let outcome = match &result {
        Ok(_) => "success",
        Err(UpstreamError::NotFound) => "not_found",
        Err(_) => "error",
    };
    metrics::record_upstream_call(operation, outcome);
    if let Err(e) = &result {
        tracing::debug!(operation, error = %e, "Record store call failed");
    }
    result
}

impl RecordStore for HttpRecordStore {
    async fn get_article(&self, id: &str) -> UpstreamResult<Value> {
        observe("get_article", async {
            let url = self.url(&format!("articulos/{id}"))?;
            let response = check_status(self.http.get(url).send().await?)?;
            Ok(response.json().await?)
        })
        .await
    }

    async fn article_exists(&self, id: &str) -> UpstreamResult<()> {
        observe("article_exists", async {
            let url = self.url(&format!("articulos/{id}"))?;
            check_status(self.http.get(url).send().await?)?;
            Ok(())
        })
        .await
    }

    async fn patch_article(&self, id: &str, fields: &Map<String, Value>) -> UpstreamResult<Value> {
        observe("patch_article", async {
            let url = self.url(&format!("articulos/{id}"))?;
            let response = check_status(self.http.patch(url).json(fields).send().await?)?;
            Ok(response.json().await?)
        })
        .await
    }

    async fn get_user(&self, id: &str) -> UpstreamResult<()> {
        observe("get_user", async {
            let url = self.url(&format!("usuarios/{id}"))?;
            check_status(self.http.get(url).send().await?)?;
            Ok(())
        })
        .await
    }

    async fn list_articles_by_owner(&self, owner_id: &str) -> UpstreamResult<Vec<Value>> {
        observe("list_articles", async {
            let mut url = self.url("articulos")?;
            url.query_pairs_mut().append_pair("usuarioId", owner_id);
            let response = check_status(self.http.get(url).send().await?)?;
            Ok(response.json().await?)
        })
        .await
    }

    async fn create_article(&self, article: &Article) -> UpstreamResult<()> {
        observe("create_article", async {
            let url = self.url("articulos")?;
            check_status(self.http.post(url).json(article).send().await?)?;
            Ok(())
        })
        .await
    }
}

impl std::fmt::Debug for HttpRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecordStore")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base_url: &str) -> HttpRecordStore {
        HttpRecordStore::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_urls_under_bare_host() {
        let store = store("http://localhost:3000");
        assert_eq!(
            store.url("articulos/abc").unwrap().as_str(),
            "http://localhost:3000/articulos/abc"
        );
    }

    #[test]
    fn test_urls_keep_base_path() {
        let store = store("http://store.internal/api/v1");
        assert_eq!(store.base_url().as_str(), "http://store.internal/api/v1/");
        assert_eq!(
            store.url("usuarios/abc").unwrap().as_str(),
            "http://store.internal/api/v1/usuarios/abc"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpRecordStore::new(&UpstreamConfig {
            base_url: "::not a url::".to_string(),
            ..UpstreamConfig::default()
        });
        assert!(matches!(result, Err(UpstreamError::Url(_))));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        // Port 9 (discard) is assumed closed on the test host.
        let store = store("http://127.0.0.1:9");
        let result = store.get_user("0d6c1a2e-5b7f-4c3d-9e8a-1f2b3c4d5e6f").await;
        assert!(matches!(result, Err(UpstreamError::Transport(_))));
    }
}
