//! Shared fixtures: mock model clients, a bot state over a temp dir, message builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use bot_config::{Config, ConfigFile};
use llm_client::{AskRequest, ImageClient, ImageSize, LlmClient};
use session::SessionStore;
use telegram_bot::{build_chain, BotState, Chat, HandlerChain, Message, User};
use tempfile::TempDir;

/// Answers with the question prefixed by `answer: `; records every request.
#[derive(Default)]
pub struct MockLlm {
    pub requests: Mutex<Vec<AskRequest>>,
    pub fail: Mutex<bool>,
}

impl MockLlm {
    pub fn requests(&self) -> Vec<AskRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn ask(&self, request: AskRequest) -> Result<String> {
        let question = request.question.clone();
        self.requests.lock().unwrap().push(request);
        if *self.fail.lock().unwrap() {
            bail!("model unavailable");
        }
        Ok(format!("answer: {question}"))
    }
}

#[derive(Default)]
pub struct MockImages {
    pub requests: Mutex<Vec<(String, ImageSize)>>,
}

#[async_trait]
impl ImageClient for MockImages {
    async fn imagine(&self, prompt: &str, size: ImageSize) -> Result<String> {
        self.requests.lock().unwrap().push((prompt.to_string(), size));
        Ok("https://images.example/1.png".to_string())
    }
}

pub struct Fixture {
    pub state: Arc<BotState>,
    pub chain: HandlerChain,
    pub llm: Arc<MockLlm>,
    pub images: Arc<MockImages>,
    pub dir: TempDir,
}

pub const BOT_USERNAME: &str = "pokibot";

/// Config with `alice` as the only user and admin.
pub fn config() -> Config {
    let mut config = Config::new("tg-token", "sk-key");
    config.telegram.usernames = vec!["alice".into()];
    config.telegram.admins = vec!["alice".into()];
    config
}

pub fn fixture(mut config: Config) -> Fixture {
    let dir = TempDir::new().unwrap();
    config.persistence_path = dir.path().join("data/persistence.json").display().to_string();
    let file = ConfigFile::new(dir.path().join("config.toml"));
    file.save(&config).unwrap();

    let llm = Arc::new(MockLlm::default());
    let images = Arc::new(MockImages::default());
    let state = Arc::new(BotState::new(
        config,
        file,
        SessionStore::new(),
        BOT_USERNAME,
        llm.clone(),
        images.clone(),
    ));
    let chain = build_chain(state.clone());
    Fixture {
        state,
        chain,
        llm,
        images,
        dir,
    }
}

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: Some(username.to_string()),
        first_name: None,
        last_name: None,
    }
}

pub fn private(from: &User, text: &str) -> Message {
    Message::text("1", from.clone(), Chat::private(from.id), text)
}

pub fn group(from: &User, chat_id: i64, text: &str) -> Message {
    Message::text("1", from.clone(), Chat::group(chat_id, "team"), text)
}

pub fn reply_to_bot(mut message: Message, quoted: &str) -> Message {
    message.reply_to_message_id = Some("0".into());
    message.reply_to_message_from_bot = true;
    message.reply_to_message_content = Some(quoted.into());
    message
}
