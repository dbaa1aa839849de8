//! Application context - built once at startup, shared by every handler

use std::sync::Arc;

use crate::application::messaging::parser::TriggerParser;
use crate::application::services::{CommandService, ThreadResponder, TranslationService};
use crate::domain::traits::{ChatPlatform, TranslationProvider};
use crate::infrastructure::config::BotConfig;

/// Platform and translation handles plus the services built on them
pub struct AppContext {
    pub platform: Arc<dyn ChatPlatform>,
    pub translator: TranslationService,
    pub responder: ThreadResponder,
    pub parser: TriggerParser,
    pub commands: CommandService,
}

impl AppContext {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        provider: Arc<dyn TranslationProvider>,
        bot: &BotConfig,
    ) -> Self {
        let mut commands = CommandService::new(&bot.prefix);
        commands.register_defaults();

        Self {
            translator: TranslationService::new(provider),
            responder: ThreadResponder::new(platform.clone()),
            parser: TriggerParser::new(&bot.trigger_phrase, &bot.default_language),
            commands,
            platform,
        }
    }

    pub fn with_source_language(mut self, source: impl Into<String>) -> Self {
        self.translator = self.translator.with_source(source);
        self
    }
}
