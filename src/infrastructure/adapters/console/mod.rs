//! Console adapter for development/testing
//!
//! Each stdin line is one message from a local user. `@<bot>` mentions the bot,
//! a leading `> ` makes the line a reply to the previous message, and
//! `<prefix><command>` runs a command.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{Embed, Message, MessageRef, User};
use crate::domain::traits::{BotInfo, ChatPlatform};

const CHANNEL: &str = "console";
const BOT_ID: &str = "1";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    history: Mutex<Vec<Message>>,
    threads: Mutex<u64>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: BOT_ID.to_string(),
                name: "zap-bot".to_string(),
                username: "zap".to_string(),
            },
            history: Mutex::new(Vec::new()),
            threads: Mutex::new(0),
        }
    }

    fn remember(&self, message: Message) -> Result<(), BotError> {
        self.history
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?
            .push(message);
        Ok(())
    }

    fn last_message(&self) -> Option<MessageRef> {
        self.history.lock().ok()?.last().map(|m| m.to_ref())
    }

    /// Turn a typed line into a message from the local user
    pub fn parse_line(&self, line: &str) -> Message {
        let author = User::new("2").with_username("you");
        let mention = format!("@{}", self.info.username);

        let (text, reference) = match line.strip_prefix("> ") {
            Some(rest) => (rest, self.last_message()),
            None => (line, None),
        };

        let mentions_bot = text.contains(&mention);
        let content = text.replace(&mention, &format!("<@{}>", self.info.id));

        let mut message = Message::new(CHANNEL, author, content)
            .with_mention(mentions_bot)
            .with_platform("console");
        if let Some(reference) = reference {
            message = message.with_reference(reference);
        }
        message
    }

    /// Read stdin until EOF, dispatching every line
    pub async fn run(&self, dispatcher: MessageDispatcher) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode), mention with @{}", self.info.username);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => return Err(BotError::Internal(format!("stdin: {}", e))),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let message = self.parse_line(line);
            self.remember(message.clone())?;
            if let Err(e) = dispatcher.handle_message(&message).await {
                tracing::error!("Failed to handle message: {}", e);
            }
        }

        Ok(())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatPlatform for ConsoleAdapter {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT #{}] {}", channel_id, text);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn reply(&self, target: &MessageRef, text: &str) -> Result<String, BotError> {
        println!("[BOT ↪ {}] {}", target.message_id, text);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn create_thread(&self, _target: &MessageRef, title: &str) -> Result<String, BotError> {
        let mut count = self.threads
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?;
        *count += 1;
        println!("[THREAD {}] {}", count, title);
        Ok(format!("thread-{}", count))
    }

    async fn fetch_message(&self, target: &MessageRef) -> Result<Message, BotError> {
        self.history
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?
            .iter()
            .find(|m| m.id == target.message_id)
            .cloned()
            .ok_or_else(|| BotError::NotFound(format!("message {}", target.message_id)))
    }

    async fn send_embed(&self, channel_id: &str, embed: &Embed) -> Result<String, BotError> {
        println!("[BOT #{}] == {} ==", channel_id, embed.title);
        if let Some(ref desc) = embed.description {
            println!("  {}", desc);
        }
        for field in &embed.fields {
            println!("  {}", field.name);
            for line in field.value.lines() {
                println!("    {}", line);
            }
        }
        if let Some(ref footer) = embed.footer {
            println!("  -- {}", footer);
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
