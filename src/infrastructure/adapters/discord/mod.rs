//! Discord adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::builder::{
    CreateCommand, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, CreateMessage, CreateThread,
};
use serenity::http::{Http, HttpError};
use serenity::model::application::{Command as SlashCommand, CommandInteraction, Interaction};
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, MessageId, UserId};
use serenity::prelude::{Client, Context, EventHandler, GatewayIntents};
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{Embed, Message, MessageRef, Reply, User};
use crate::domain::traits::{BotInfo, ChatPlatform};

/// Map a serenity error onto the bot's taxonomy. Anything Discord answered
/// with an error status, or refused before sending, is a platform rejection.
fn map_err(e: serenity::Error) -> BotError {
    match &e {
        serenity::Error::Http(http_err) => {
            let http_err: &HttpError = http_err;
            if matches!(http_err, HttpError::UnsuccessfulRequest(_)) {
                return BotError::Platform(e.to_string());
            }
            BotError::Network(e.to_string())
        }
        serenity::Error::Model(_) => BotError::Platform(e.to_string()),
        _ => BotError::Network(e.to_string()),
    }
}

/// Discord snowflakes are non-zero u64s
fn parse_id(id: &str) -> Result<u64, BotError> {
    match id.parse::<u64>() {
        Ok(v) if v != 0 => Ok(v),
        _ => Err(BotError::Parse(format!("invalid Discord id: {}", id))),
    }
}

fn channel(id: &str) -> Result<ChannelId, BotError> {
    parse_id(id).map(ChannelId::new)
}

fn message_ids(target: &MessageRef) -> Result<(ChannelId, MessageId), BotError> {
    Ok((channel(&target.channel_id)?, MessageId::new(parse_id(&target.message_id)?)))
}

/// Convert a gateway message into the domain message
pub fn to_domain(msg: &DiscordMessage, bot_id: Option<UserId>) -> Message {
    let mut author = User::new(msg.author.id.get().to_string()).with_username(msg.author.name.clone());
    if let Some(global_name) = &msg.author.global_name {
        author = author.with_display_name(global_name.clone());
    }
    if msg.author.bot {
        author = author.as_bot();
    }

    let mentions_bot = msg.mention_everyone
        || bot_id.is_some_and(|id| msg.mentions.iter().any(|u| u.id == id));

    let timestamp = DateTime::<Utc>::from_timestamp(msg.timestamp.unix_timestamp(), 0)
        .unwrap_or_else(Utc::now);

    let mut message = Message::new(msg.channel_id.get().to_string(), author, msg.content.clone())
        .with_id(msg.id.get().to_string())
        .with_mention(mentions_bot)
        .with_timestamp(timestamp)
        .with_platform("discord");

    if let Some(reference) = &msg.message_reference {
        if let Some(message_id) = reference.message_id {
            message = message.with_reference(MessageRef::new(
                reference.channel_id.get().to_string(),
                message_id.get().to_string(),
            ));
        }
    }

    message
}

fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .colour(embed.colour);
    if let Some(ref desc) = embed.description {
        builder = builder.description(desc);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    if let Some(ref footer) = embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    builder
}

/// REST side of Discord, used by the application as its platform client
pub struct DiscordPlatform {
    http: Arc<Http>,
    info: BotInfo,
}

impl DiscordPlatform {
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "zap-bot".to_string(),
                username: "zap-bot".to_string(),
            },
        }
    }

    /// Fetch bot info from Discord API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        let me = self.http.get_current_user().await.map_err(map_err)?;
        self.info = BotInfo {
            id: me.id.get().to_string(),
            name: me.global_name.clone().unwrap_or_else(|| me.name.clone()),
            username: me.name.clone(),
        };
        Ok(())
    }

    fn bot_id(&self) -> Option<UserId> {
        parse_id(&self.info.id).ok().map(UserId::new)
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", channel_id, text);
        let sent = channel(channel_id)?
            .say(self.http.as_ref(), text)
            .await
            .map_err(map_err)?;
        Ok(sent.id.get().to_string())
    }

    async fn reply(&self, target: &MessageRef, text: &str) -> Result<String, BotError> {
        let (channel_id, message_id) = message_ids(target)?;
        let builder = CreateMessage::new()
            .content(text)
            .reference_message((channel_id, message_id));
        let sent = channel_id
            .send_message(self.http.as_ref(), builder)
            .await
            .map_err(map_err)?;
        Ok(sent.id.get().to_string())
    }

    async fn create_thread(&self, target: &MessageRef, title: &str) -> Result<String, BotError> {
        let (channel_id, message_id) = message_ids(target)?;
        let thread = channel_id
            .create_thread_from_message(self.http.as_ref(), message_id, CreateThread::new(title))
            .await
            .map_err(map_err)?;
        Ok(thread.id.get().to_string())
    }

    async fn fetch_message(&self, target: &MessageRef) -> Result<Message, BotError> {
        let (channel_id, message_id) = message_ids(target)?;
        let msg = channel_id
            .message(self.http.as_ref(), message_id)
            .await
            .map_err(map_err)?;
        Ok(to_domain(&msg, self.bot_id()))
    }

    async fn send_embed(&self, channel_id: &str, embed: &Embed) -> Result<String, BotError> {
        let sent = channel(channel_id)?
            .send_message(self.http.as_ref(), CreateMessage::new().embed(build_embed(embed)))
            .await
            .map_err(map_err)?;
        Ok(sent.id.get().to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Gateway event handler
struct Handler {
    dispatcher: MessageDispatcher,
    bot_id: Option<UserId>,
}

impl Handler {
    /// Answer a slash command with replies only the invoker can see
    async fn respond_ephemeral(&self, ctx: &Context, command: &CommandInteraction, replies: &[Reply]) -> Result<(), BotError> {
        let mut replies = replies.iter();

        let first = match replies.next() {
            Some(Reply::Embed(embed)) => CreateInteractionResponseMessage::new().embed(build_embed(embed)),
            Some(Reply::Text(text)) => CreateInteractionResponseMessage::new().content(text),
            None => CreateInteractionResponseMessage::new().content("Nothing to show."),
        };
        command
            .create_response(&ctx.http, CreateInteractionResponse::Message(first.ephemeral(true)))
            .await
            .map_err(map_err)?;

        for reply in replies {
            let followup = match reply {
                Reply::Embed(embed) => CreateInteractionResponseFollowup::new().embed(build_embed(embed)),
                Reply::Text(text) => CreateInteractionResponseFollowup::new().content(text),
            };
            command
                .create_followup(&ctx.http, followup.ephemeral(true))
                .await
                .map_err(map_err)?;
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} has connected to Discord!", ready.user.name);

        let commands: Vec<CreateCommand> = self
            .dispatcher
            .context()
            .commands
            .commands()
            .map(|c| {
                CreateCommand::new(c.kind.slash_name())
                    .description(c.description.clone().unwrap_or_else(|| c.name.clone()))
            })
            .collect();
        match SlashCommand::set_global_commands(&ctx.http, commands).await {
            Ok(registered) => tracing::info!("Registered {} slash commands", registered.len()),
            Err(e) => tracing::warn!("Failed to register slash commands: {}", e),
        }
    }

    async fn message(&self, _ctx: Context, msg: DiscordMessage) {
        let message = to_domain(&msg, self.bot_id);
        if let Err(e) = self.dispatcher.handle_message(&message).await {
            tracing::error!("[{}] Failed to handle message {}: {}", message.channel_id, message.id, e);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let result = match self.dispatcher.handle_command(&command.data.name).await {
            Ok(replies) => self.respond_ephemeral(&ctx, &command, &replies).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::error!("Slash command /{} failed: {}", command.data.name, e);
        }
    }
}

/// Discord gateway adapter
pub struct DiscordAdapter {
    token: String,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Connect to the gateway and handle events until the connection ends
    pub async fn run(&self, dispatcher: MessageDispatcher) -> Result<(), BotError> {
        let bot_id = parse_id(&dispatcher.context().platform.bot_info().id).ok().map(UserId::new);

        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler { dispatcher, bot_id })
            .await
            .map_err(map_err)?;

        tracing::info!("Starting Discord gateway");
        client.start().await.map_err(map_err)
    }
}
