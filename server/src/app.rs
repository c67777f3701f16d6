use std::sync::Arc;

use card_composer::CardComposer;

use crate::config::AppConfig;

/// Application state shared by all axum handlers.
///
/// Everything inside is read-only after startup.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    composer: CardComposer,
}

impl SharedState {
    pub fn new(config: AppConfig, composer: CardComposer) -> Self {
        Self {
            inner: Arc::new(SharedStateInner { config, composer }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn composer(&self) -> &CardComposer {
        &self.inner.composer
    }
}
