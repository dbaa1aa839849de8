//! Message dispatcher - Routes triggers and commands to services

use std::sync::Arc;

use crate::application::context::AppContext;
use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{Message, Reply};
use super::parser::Trigger;

/// Routes inbound messages through the parser to the translator and responder
#[derive(Clone)]
pub struct MessageDispatcher {
    ctx: Arc<AppContext>,
}

impl MessageDispatcher {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Handle one inbound message: translation trigger first, then any prefix command.
    ///
    /// Platform failures other than a rejected thread are returned, ending this
    /// message's handling.
    pub async fn handle_message(&self, message: &Message) -> Result<(), BotError> {
        if message.author_is_bot() {
            return Ok(());
        }

        let trigger = self.ctx.parser.parse(message);
        self.dispatch(message, trigger).await?;

        if let Some(name) = self.ctx.commands.parse_invocation(&message.content) {
            match self.handle_command(name).await {
                Ok(replies) => self.deliver(&message.channel_id, &replies).await?,
                Err(BotError::Command(CommandError::NotFound(name))) => {
                    tracing::debug!("Ignoring unknown command: {}", name);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Act on a parsed trigger
    pub async fn dispatch(&self, message: &Message, trigger: Trigger) -> Result<(), BotError> {
        let (target_lang, text) = match trigger {
            Trigger::NoMatch => return Ok(()),
            Trigger::Mention(parsed) | Trigger::InlineTrigger(parsed) => {
                (parsed.target_lang, parsed.payload_text)
            }
            Trigger::ReplyTrigger { target_lang, reference } => {
                let replied = self.ctx.platform.fetch_message(&reference).await?;
                (target_lang, replied.content)
            }
        };

        tracing::info!(
            "[{}] {} asked for a translation into '{}'",
            message.channel_id,
            message.author,
            target_lang
        );

        let translation = self.ctx.translator.translate(&text, &target_lang).await;
        let response = format!("{} said: {}", message.author.mention(), translation);

        self.ctx
            .responder
            .respond(&message.to_ref(), &response, &translation)
            .await
    }

    /// Run a command by name or alias and return what it wants to send
    pub async fn handle_command(&self, name: &str) -> Result<Vec<Reply>, BotError> {
        let kind = self.ctx.commands.find(name)?;
        tracing::debug!("Running command {:?}", kind);
        self.ctx.commands.execute(kind, &self.ctx.translator).await
    }

    /// Send command replies to a channel in order
    pub async fn deliver(&self, channel_id: &str, replies: &[Reply]) -> Result<(), BotError> {
        for reply in replies {
            match reply {
                Reply::Embed(embed) => {
                    self.ctx.platform.send_embed(channel_id, embed).await?;
                }
                Reply::Text(text) => {
                    self.ctx.platform.send_message(channel_id, text).await?;
                }
            }
        }
        Ok(())
    }
}
