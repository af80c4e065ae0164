//! Link registry: shortening, redirects, stats and listing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::OnceCell;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::base_url::short_url;
use crate::utils::code_generator::generate_code;

/// Page size used when the caller gives none (or an unusable one).
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Default upper bound for a single page.
pub const DEFAULT_LIST_MAX_LIMIT: i64 = 500;

/// Default deadline for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Insert attempts before giving up on code collisions.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Result of a successful shorten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub code: String,
    pub short_url: String,
}

/// The link registry.
///
/// Allocates short codes, persists links and serves the read side. Holds no
/// authoritative link state: every call goes to the injected store. The only
/// state kept here is whether the store schema has been initialized.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    schema_ready: OnceCell<()>,
    store_timeout: Duration,
    list_max_limit: i64,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service with default limits.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            schema_ready: OnceCell::new(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            list_max_limit: DEFAULT_LIST_MAX_LIMIT,
        }
    }

    /// Sets the deadline applied to every store call.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Sets the largest page [`Self::list`] will return.
    pub fn with_list_max_limit(mut self, list_max_limit: i64) -> Self {
        self.list_max_limit = list_max_limit.max(1);
        self
    }

    /// Ensures the store schema exists.
    ///
    /// The first success is memoized. A failure is not: the next call tries
    /// again, so a store that was briefly unreachable at startup does not
    /// leave the service permanently broken. Concurrent callers wait for the
    /// attempt in flight instead of racing it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if initialization fails or times out.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        self.schema_ready
            .get_or_try_init(|| async {
                self.call("create_schema", self.repository.create_schema())
                    .await
                    .inspect(|_| tracing::info!("Link schema ready"))
                    .inspect_err(|e| tracing::warn!("Link schema initialization failed: {}", e))
            })
            .await?;
        Ok(())
    }

    /// Returns true once the schema has been initialized successfully.
    pub fn is_schema_ready(&self) -> bool {
        self.schema_ready.initialized()
    }

    /// Creates a short link for `url`.
    ///
    /// The code is random; a store-reported collision triggers a fresh code,
    /// up to a small fixed number of attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is missing or empty; nothing
    /// is written in that case.
    /// Returns [`AppError::Persistence`] on store failure or when every
    /// attempt collided.
    pub async fn shorten(
        &self,
        url: Option<&str>,
        base_url: &str,
    ) -> Result<ShortenedLink, AppError> {
        let url = match url {
            Some(url) if !url.is_empty() => url,
            _ => {
                return Err(AppError::bad_request(
                    "URL is required",
                    json!({ "field": "url" }),
                ));
            }
        };

        self.ensure_schema().await?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new_link = NewLink::new(generate_code(), url);

            match self.call("insert", self.repository.insert(new_link)).await {
                Ok(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    tracing::info!(code = %link.code, "Created short link");
                    return Ok(ShortenedLink {
                        short_url: short_url(base_url, &link.code),
                        code: link.code,
                    });
                }
                Err(AppError::Conflict { .. }) => {
                    metrics::counter!("code_collisions_total").increment(1);
                    tracing::warn!(attempt, "Short code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::persistence(format!(
            "failed to allocate a unique short code after {MAX_CODE_ATTEMPTS} attempts"
        )))
    }

    /// Resolves `code` to its original URL, counting one click.
    ///
    /// The increment and the lookup are a single store operation, so
    /// concurrent redirects of the same code never lose counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code; no counter
    /// changes in that case.
    /// Returns [`AppError::Persistence`] on store failure.
    pub async fn redirect(&self, code: &str) -> Result<String, AppError> {
        self.ensure_schema().await?;

        match self
            .call(
                "increment_and_fetch",
                self.repository.increment_and_fetch(code),
            )
            .await?
        {
            Some(original_url) => {
                metrics::counter!("link_redirects_total").increment(1);
                tracing::debug!(%code, "Redirecting");
                Ok(original_url)
            }
            None => Err(self.not_found(code)),
        }
    }

    /// Returns the link stored under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Persistence`] on store failure.
    pub async fn stats(&self, code: &str) -> Result<Link, AppError> {
        self.ensure_schema().await?;

        self.call("find_by_code", self.repository.find_by_code(code))
            .await?
            .ok_or_else(|| self.not_found(code))
    }

    /// Lists links, most recent first.
    ///
    /// `limit` falls back to [`DEFAULT_LIST_LIMIT`] when absent or not
    /// positive and is clamped to the configured maximum. `offset` falls back
    /// to zero when absent or negative.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on store failure.
    pub async fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Link>, AppError> {
        let (limit, offset) = self.page_bounds(limit, offset);

        self.ensure_schema().await?;

        self.call("list", self.repository.list(limit, offset)).await
    }

    /// Probes the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store is unreachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.call("ping", self.repository.ping()).await
    }

    fn page_bounds(&self, limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .min(self.list_max_limit);
        let offset = offset.filter(|o| *o > 0).unwrap_or(0);
        (limit, offset)
    }

    fn not_found(&self, code: &str) -> AppError {
        metrics::counter!("link_lookups_not_found_total").increment(1);
        tracing::debug!(%code, "Short link not found");
        AppError::not_found("Link not found", json!({ "code": code }))
    }

    /// Runs one store call under the configured deadline.
    async fn call<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::persistence(format!(
                "store operation `{operation}` timed out after {:?}",
                self.store_timeout
            ))),
        }
    }
}
