//! Process-wide bot state shared by all handlers.

use std::sync::Arc;

use bot_config::{Config, ConfigFile};
use bot_core::{BotError, Result};
use llm_client::{ImageClient, LlmClient};
use session::SessionStore;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::filters::Filters;

/// The loaded configuration. Handlers read it; only `/config` writes it.
pub type SharedConfig = Arc<RwLock<Config>>;

pub struct BotState {
    pub config: SharedConfig,
    pub config_file: ConfigFile,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub filters: Arc<RwLock<Filters>>,
    /// Bot username without `@`, used to detect mentions in groups.
    pub bot_username: String,
    pub llm: Arc<dyn LlmClient>,
    pub images: Arc<dyn ImageClient>,
}

impl BotState {
    pub fn new(
        config: Config,
        config_file: ConfigFile,
        sessions: SessionStore,
        bot_username: impl Into<String>,
        llm: Arc<dyn LlmClient>,
        images: Arc<dyn ImageClient>,
    ) -> Self {
        let filters = Filters::new(&config.telegram);
        Self {
            config: Arc::new(RwLock::new(config)),
            config_file,
            sessions: Arc::new(Mutex::new(sessions)),
            filters: Arc::new(RwLock::new(filters)),
            bot_username: bot_username.into(),
            llm,
            images,
        }
    }

    /// Writes all session namespaces to the configured persistence path.
    pub async fn save_sessions(&self) -> Result<()> {
        let path = self.config.read().await.persistence_path.clone();
        self.sessions
            .lock()
            .await
            .save(&path)
            .map_err(|e| BotError::Session(e.to_string()))?;
        debug!(path = %path, "Sessions saved");
        Ok(())
    }
}
