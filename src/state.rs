//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::UrlService;
use crate::config::Config;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// How short URLs are derived from inbound requests.
#[derive(Debug, Clone, Default)]
pub struct PublicUrlSettings {
    /// Trust `X-Forwarded-Proto` / `X-Forwarded-Host`.
    pub behind_proxy: bool,
    /// Used when a request carries no usable host.
    pub fallback_base_url: Option<String>,
}

impl From<&Config> for PublicUrlSettings {
    fn from(config: &Config) -> Self {
        Self {
            behind_proxy: config.behind_proxy,
            fallback_base_url: config.public_base_url.clone(),
        }
    }
}

/// Cloned into each request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub url_service: UrlService,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub public_url: Arc<PublicUrlSettings>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        public_url: PublicUrlSettings,
    ) -> Self {
        Self {
            url_service: UrlService::new(repository),
            click_sender,
            public_url: Arc::new(public_url),
        }
    }
}
