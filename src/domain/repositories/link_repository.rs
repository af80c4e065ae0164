//! Store contract for link persistence.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for [`Link`] records.
///
/// The store owns every persisted link. It enforces code uniqueness and
/// serializes concurrent click increments on the same record; callers never
/// compose a read followed by a write to update a counter.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Ensures the link storage structure exists.
    ///
    /// Idempotent and safe to call concurrently, including before any other
    /// caller has finished its first initialization.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store cannot be reached. A
    /// failed call leaves nothing half-created and may simply be retried.
    async fn create_schema(&self) -> Result<(), AppError>;

    /// Inserts a new link with a zero click counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Atomically increments the click counter of `code` and returns its
    /// original URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` after exactly one increment
    /// - `Ok(None)` if the code does not exist; nothing is modified
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors. The increment is
    /// either fully applied or not applied at all.
    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists links, most recently created first.
    ///
    /// Links sharing a creation timestamp keep their insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
