//! In-process implementation of link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(Default)]
struct MemoryState {
    /// Links in insertion order.
    links: Vec<Link>,
    /// Code to position in `links`.
    index: HashMap<String, usize>,
}

/// Link store kept in process memory.
///
/// Meant for local runs and tests; contents are lost on restart. Every
/// mutation happens under the write lock, which makes the click increment
/// atomic with respect to other redirects.
#[derive(Default)]
pub struct MemoryLinkRepository {
    state: RwLock<MemoryState>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.state.read().await.links.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create_schema(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut state = self.state.write().await;

        if state.index.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "code": new_link.code }),
            ));
        }

        let link = Link::from(new_link);
        let position = state.links.len();
        state.index.insert(link.code.clone(), position);
        state.links.push(link.clone());

        Ok(link)
    }

    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut state = self.state.write().await;

        let Some(&position) = state.index.get(code) else {
            return Ok(None);
        };
        let link = &mut state.links[position];
        link.clicks += 1;

        Ok(Some(link.original_url.clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let state = self.state.read().await;

        Ok(state
            .index
            .get(code)
            .map(|&position| state.links[position].clone()))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        let state = self.state.read().await;

        let mut ordered: Vec<&Link> = state.links.iter().collect();
        // Stable: equal timestamps keep insertion order.
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(ordered
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    fn at(seconds: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .insert(NewLink::new("abc123", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(link.clicks, 0);

        let found = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(found, link);
        assert!(repo.find_by_code("zzz999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let repo = MemoryLinkRepository::new();
        repo.insert(NewLink::new("abc123", "https://a.example"))
            .await
            .unwrap();

        let result = repo.insert(NewLink::new("abc123", "https://b.example")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(repo.len().await, 1);
        let kept = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(kept.original_url, "https://a.example");
    }

    #[tokio::test]
    async fn test_increment_and_fetch() {
        let repo = MemoryLinkRepository::new();
        repo.insert(NewLink::new("abc123", "https://example.com"))
            .await
            .unwrap();

        let url = repo.increment_and_fetch("abc123").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));
        repo.increment_and_fetch("abc123").await.unwrap();

        assert_eq!(repo.find_by_code("abc123").await.unwrap().unwrap().clicks, 2);
    }

    #[tokio::test]
    async fn test_increment_missing_code_has_no_effect() {
        let repo = MemoryLinkRepository::new();

        assert!(repo.increment_and_fetch("nope42").await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at_desc_with_stable_ties() {
        let repo = MemoryLinkRepository::new();
        repo.insert(NewLink::new("first1", "https://1.example").created_at(at(10)))
            .await
            .unwrap();
        repo.insert(NewLink::new("third3", "https://3.example").created_at(at(30)))
            .await
            .unwrap();
        repo.insert(NewLink::new("tieaaa", "https://a.example").created_at(at(20)))
            .await
            .unwrap();
        repo.insert(NewLink::new("tiebbb", "https://b.example").created_at(at(20)))
            .await
            .unwrap();

        let codes: Vec<String> = repo
            .list(10, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();

        assert_eq!(codes, vec!["third3", "tieaaa", "tiebbb", "first1"]);
    }

    #[tokio::test]
    async fn test_list_limit_and_offset() {
        let repo = MemoryLinkRepository::new();
        for i in 0..5 {
            repo.insert(
                NewLink::new(format!("code{i:02}"), "https://example.com").created_at(at(i)),
            )
            .await
            .unwrap();
        }

        let page = repo.list(2, 1).await.unwrap();
        let codes: Vec<&str> = page.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["code03", "code02"]);

        assert!(repo.list(2, 10).await.unwrap().is_empty());
        assert!(repo.list(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(MemoryLinkRepository::new());
        repo.insert(NewLink::new("abc123", "https://example.com"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..200)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_and_fetch("abc123").await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.find_by_code("abc123").await.unwrap().unwrap().clicks, 200);
    }
}
