//! Document store - fetches the API document once and caches it.
//!
//! The first caller starts the fetch and callers arriving while it is in
//! flight share its outcome, success or failure. A failure leaves the cache
//! empty so the next call starts a new fetch. A loaded document is kept for the lifetime of the
//! process and never mutated.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tokio::sync::{Mutex, OnceCell};
use tracing::{error, info, instrument, warn};

use super::document::ApiDocument;
use super::error::DocumentError;
use crate::core::config::SwaggerConfig;

/// Something that can produce the API document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Where the document comes from, for logs and error messages.
    fn location(&self) -> String;

    /// Fetch and parse the document.
    async fn fetch(&self) -> Result<ApiDocument, DocumentError>;
}

/// Build the source described by the configuration.
pub fn source_from_config(config: &SwaggerConfig) -> Arc<dyn DocumentSource> {
    match config.url.as_deref() {
        None | Some("") => Arc::new(UnconfiguredSource),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => Arc::new(
            HttpDocumentSource::new(url, config.token.clone(), config.timeout()),
        ),
        Some(url) => Arc::new(FileDocumentSource::new(
            url.strip_prefix("file://").unwrap_or(url),
        )),
    }
}

/// Parse a document body.
///
/// JSON is tried first; anything that does not look like a JSON object is
/// read as YAML.
pub fn parse_document(body: &str, location: &str) -> Result<ApiDocument, DocumentError> {
    let parse_error = |message: String| DocumentError::Parse {
        location: location.to_string(),
        message,
    };

    if body.trim_start().starts_with('{') {
        serde_json::from_str(body).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_yaml::from_str(body).map_err(|e| parse_error(e.to_string()))
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Fetches the document over HTTP(S).
pub struct HttpDocumentSource {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpDocumentSource {
    pub fn new(url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "Failed to build HTTP client with a {:?} timeout, falling back to defaults: {}",
                    timeout, e
                );
                Client::new()
            });

        Self {
            client,
            url: url.into(),
            token,
        }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<ApiDocument, DocumentError> {
        let request_error = |e: reqwest::Error| DocumentError::Request {
            location: self.url.clone(),
            message: e.to_string(),
        };

        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        parse_document(&body, &self.url)
    }
}

/// Reads the document from a local file.
pub struct FileDocumentSource {
    path: PathBuf,
}

impl FileDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for FileDocumentSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<ApiDocument, DocumentError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DocumentError::Io {
                path: self.location(),
                source: Arc::new(source),
            })?;
        parse_document(&body, &self.location())
    }
}

/// Stand-in used when no location is configured.
pub struct UnconfiguredSource;

#[async_trait]
impl DocumentSource for UnconfiguredSource {
    fn location(&self) -> String {
        "<not configured>".to_string()
    }

    async fn fetch(&self) -> Result<ApiDocument, DocumentError> {
        Err(DocumentError::NotConfigured)
    }
}

// ============================================================================
// Store
// ============================================================================

type PendingFetch = Shared<BoxFuture<'static, Result<Arc<ApiDocument>, DocumentError>>>;

/// Memoizing front for a [`DocumentSource`].
pub struct DocumentStore {
    source: Arc<dyn DocumentSource>,
    document: OnceCell<Arc<ApiDocument>>,
    pending: Mutex<Option<PendingFetch>>,
}

impl DocumentStore {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            document: OnceCell::new(),
            pending: Mutex::new(None),
        }
    }

    /// A store that already holds `document`.
    pub fn from_document(document: ApiDocument) -> Self {
        Self {
            source: Arc::new(UnconfiguredSource),
            document: OnceCell::new_with(Some(Arc::new(document))),
            pending: Mutex::new(None),
        }
    }

    pub fn location(&self) -> String {
        self.source.location()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.initialized()
    }

    /// Get the document, fetching it on first use.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Arc<ApiDocument>, DocumentError> {
        if let Some(document) = self.document.get() {
            return Ok(document.clone());
        }

        let fetch = {
            let mut pending = self.pending.lock().await;
            if let Some(document) = self.document.get() {
                return Ok(document.clone());
            }
            pending
                .get_or_insert_with(|| Self::fetch(self.source.clone()).boxed().shared())
                .clone()
        };

        let result = fetch.clone().await;

        let mut pending = self.pending.lock().await;
        if let Ok(document) = &result {
            // Only the first waiter to get here stores it.
            let _ = self.document.set(document.clone());
        }
        if pending.as_ref().is_some_and(|current| current.ptr_eq(&fetch)) {
            *pending = None;
        }

        result
    }

    async fn fetch(source: Arc<dyn DocumentSource>) -> Result<Arc<ApiDocument>, DocumentError> {
        info!("Fetching Swagger document from {}", source.location());
        match source.fetch().await {
            Ok(document) => {
                info!(
                    "Swagger document loaded: {} tags, {} paths",
                    document.tags.len(),
                    document.paths.len()
                );
                Ok(Arc::new(document))
            }
            Err(e) => {
                error!("Swagger document fetch failed: {}", e);
                Err(e)
            }
        }
    }
}
