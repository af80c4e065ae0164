//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Link registry bound to whichever store the server was started with.
pub type DynLinkService = LinkService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Configured public base of short URLs; `None` derives it per request.
    pub base_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(link_service: Arc<DynLinkService>, base_url: Option<String>) -> Self {
        Self {
            link_service,
            base_url: base_url.map(Arc::from),
        }
    }
}
