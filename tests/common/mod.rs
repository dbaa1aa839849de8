//! Test doubles for the platform and translation seams

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use zap_bot::application::context::AppContext;
use zap_bot::application::errors::{BotError, TranslationError};
use zap_bot::application::messaging::MessageDispatcher;
use zap_bot::domain::entities::{Embed, LanguageCatalog, Message, MessageRef, User};
use zap_bot::domain::traits::{BotInfo, ChatPlatform, TranslationProvider};
use zap_bot::infrastructure::config::BotConfig;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Everything the bot did on the platform, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message { channel_id: String, text: String },
    Reply { target: MessageRef, text: String },
    Thread { target: MessageRef, title: String },
    Embed { channel_id: String, title: String },
}

/// How `create_thread` should behave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadMode {
    Ok,
    Rejected,
    NetworkDown,
}

pub struct RecordingPlatform {
    pub sent: Mutex<Vec<Sent>>,
    pub stored: Mutex<HashMap<String, Message>>,
    thread_mode: ThreadMode,
    /// Sends into threads fail with a platform rejection after this many succeed
    thread_post_budget: Mutex<Option<usize>>,
}

impl RecordingPlatform {
    pub fn new(thread_mode: ThreadMode) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            stored: Mutex::new(HashMap::new()),
            thread_mode,
            thread_post_budget: Mutex::new(None),
        }
    }

    /// Threads open, but only `allowed` posts into them go through
    pub fn rejecting_thread_posts_after(self, allowed: usize) -> Self {
        *self.thread_post_budget.lock().unwrap() = Some(allowed);
        self
    }

    pub fn store(&self, message: Message) {
        self.stored.lock().unwrap().insert(message.id.clone(), message);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        if channel_id.starts_with("thread-") {
            let mut budget = self.thread_post_budget.lock().unwrap();
            match *budget {
                Some(0) => return Err(BotError::Platform("403 Missing Permissions".to_string())),
                Some(ref mut left) => *left -= 1,
                None => {}
            }
        }
        self.record(Sent::Message { channel_id: channel_id.to_string(), text: text.to_string() });
        Ok("sent".to_string())
    }

    async fn reply(&self, target: &MessageRef, text: &str) -> Result<String, BotError> {
        self.record(Sent::Reply { target: target.clone(), text: text.to_string() });
        Ok("reply".to_string())
    }

    async fn create_thread(&self, target: &MessageRef, title: &str) -> Result<String, BotError> {
        match self.thread_mode {
            ThreadMode::Ok => {
                self.record(Sent::Thread { target: target.clone(), title: title.to_string() });
                Ok(format!("thread-{}", target.message_id))
            }
            ThreadMode::Rejected => Err(BotError::Platform("403 Missing Permissions".to_string())),
            ThreadMode::NetworkDown => Err(BotError::Network("connection reset".to_string())),
        }
    }

    async fn fetch_message(&self, target: &MessageRef) -> Result<Message, BotError> {
        self.stored
            .lock()
            .unwrap()
            .get(&target.message_id)
            .cloned()
            .ok_or_else(|| BotError::NotFound(target.message_id.clone()))
    }

    async fn send_embed(&self, channel_id: &str, embed: &Embed) -> Result<String, BotError> {
        self.record(Sent::Embed { channel_id: channel_id.to_string(), title: embed.title.clone() });
        Ok("embed".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo { id: "999".to_string(), name: "zap".to_string(), username: "zap".to_string() }
    }
}

/// Translator that tags text with the target language and records each call
pub struct ScriptedTranslator {
    pub calls: Mutex<Vec<(String, String, String)>>,
    pub catalog: LanguageCatalog,
    pub fail_with: Option<TranslationError>,
}

impl ScriptedTranslator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            catalog: [("en", "english"), ("es", "spanish"), ("fr", "french")].into_iter().collect(),
            fail_with: None,
        }
    }

    pub fn failing(error: TranslationError) -> Self {
        Self { fail_with: Some(error), ..Self::new() }
    }

    pub fn with_catalog(mut self, catalog: LanguageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for ScriptedTranslator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push((text.to_string(), source.to_string(), target.to_string()));
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(format!("[{}]{}", target, text.to_uppercase()))
    }

    async fn supported_languages(&self) -> Result<LanguageCatalog, TranslationError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(self.catalog.clone())
    }
}

pub fn user_message(id: &str, content: &str) -> Message {
    Message::new("chan", User::new("42").with_username("alice"), content).with_id(id)
}

pub fn dispatcher(platform: Arc<RecordingPlatform>, translator: Arc<ScriptedTranslator>) -> MessageDispatcher {
    let ctx = AppContext::new(platform, translator, &BotConfig::default());
    MessageDispatcher::new(Arc::new(ctx))
}
