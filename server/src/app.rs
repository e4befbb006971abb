use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    shutdown: CancellationToken,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}
