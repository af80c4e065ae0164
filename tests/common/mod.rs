#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use link_registry::application::services::LinkService;
use link_registry::domain::entities::{Link, NewLink};
use link_registry::domain::repositories::LinkRepository;
use link_registry::error::AppError;
use link_registry::infrastructure::persistence::MemoryLinkRepository;
use link_registry::routes::app_router;
use link_registry::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_BASE_URL: &str = "https://sho.rt";

pub fn create_test_state(repository: Arc<dyn LinkRepository>, base_url: Option<&str>) -> AppState {
    let link_service = Arc::new(LinkService::new(repository));
    AppState::new(link_service, base_url.map(str::to_string))
}

/// Full application over a fresh in-memory store, with a fixed base URL.
pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let state = create_test_state(repository.clone(), Some(TEST_BASE_URL));
    let server = TestServer::new(app_router(state)).unwrap();
    (server, repository)
}

pub fn create_test_server_with(repository: Arc<dyn LinkRepository>) -> TestServer {
    let state = create_test_state(repository, Some(TEST_BASE_URL));
    TestServer::new(app_router(state)).unwrap()
}

/// Inserts a link directly into the store, bypassing the registry.
pub async fn create_test_link(repository: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    repository.insert(NewLink::new(code, url)).await.unwrap()
}

/// Store whose every call fails, counting how often it was asked.
#[derive(Default)]
pub struct FailingRepository {
    pub calls: AtomicUsize,
}

impl FailingRepository {
    fn fail(&self) -> AppError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        AppError::persistence("connection refused")
    }
}

#[async_trait]
impl LinkRepository for FailingRepository {
    async fn create_schema(&self) -> Result<(), AppError> {
        Err(self.fail())
    }

    async fn insert(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(self.fail())
    }

    async fn increment_and_fetch(&self, _code: &str) -> Result<Option<String>, AppError> {
        Err(self.fail())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(self.fail())
    }

    async fn list(&self, _limit: i64, _offset: i64) -> Result<Vec<Link>, AppError> {
        Err(self.fail())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(self.fail())
    }
}
