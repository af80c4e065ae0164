//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Advisory lock key serializing concurrent schema creation.
const SCHEMA_LOCK_KEY: i64 = 0x6c69_6e6b_7321;

const CREATE_LINKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS links (
        id           BIGSERIAL   PRIMARY KEY,
        code         VARCHAR(16) NOT NULL UNIQUE,
        original_url TEXT        NOT NULL,
        clicks       BIGINT      NOT NULL DEFAULT 0,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_CREATED_AT_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS links_created_at_idx ON links (created_at DESC, id)
"#;

/// PostgreSQL repository for link storage.
///
/// Code uniqueness is a table constraint; click increments are single
/// `UPDATE ... RETURNING` statements, so PostgreSQL row locking serializes
/// concurrent redirects of the same code.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create_schema(&self) -> Result<(), AppError> {
        // CREATE ... IF NOT EXISTS alone can still fail on a catalog unique
        // violation when two sessions race; the transaction-scoped advisory
        // lock makes them take turns.
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        sqlx::query(CREATE_LINKS_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_CREATED_AT_INDEX)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (code, original_url, created_at)
            VALUES ($1, $2, $3)
            RETURNING code, original_url, clicks, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, AppError> {
        let original_url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE code = $1
            RETURNING original_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(original_url)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT code, original_url, clicks, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT code, original_url, clicks, created_at
            FROM links
            ORDER BY created_at DESC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.max(0))
        .bind(offset.max(0))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
