//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub translation: TranslationConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Prefix for text commands such as `!languages`
    pub prefix: String,
    /// Leading phrase that asks for a translation
    pub trigger_phrase: String,
    /// Target language when none is given
    pub default_language: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TranslationConfig {
    pub provider: String,
    /// Overrides the provider endpoint
    pub base_url: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AdaptersConfig {
    pub discord: Option<DiscordConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    pub enabled: bool,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConsoleConfig {
    pub enabled: bool,
}

/// Platform adapter picked at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterChoice {
    Discord { token: String },
    Console,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "zap-bot".to_string(),
            prefix: "!".to_string(),
            trigger_phrase: "translate this".to_string(),
            default_language: "en".to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            base_url: None,
            source: "auto".to_string(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::MissingField("bot.prefix".to_string()));
        }
        if self.bot.trigger_phrase.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.trigger-phrase".to_string()));
        }
        if self.translation.provider != "google" {
            return Err(ConfigError::InvalidValue(format!(
                "unknown translation provider: {}",
                self.translation.provider
            )));
        }
        Ok(())
    }

    pub fn load_env() -> Self {
        Self::default().with_env()
    }

    /// Apply environment overrides on top of this config
    pub fn with_env(mut self) -> Self {
        if let Ok(token) = std::env::var("DISCORD_TOKEN") {
            if !token.trim().is_empty() {
                let discord = self.adapters.discord.get_or_insert_with(DiscordConfig::default);
                discord.token = Some(token);
                discord.enabled = true;
            }
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(url) = std::env::var("TRANSLATE_BASE_URL") {
            self.translation.base_url = Some(url);
        }

        self
    }

    /// Force the Discord adapter on with `token`
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.adapters.discord = Some(DiscordConfig {
            enabled: true,
            token: Some(token.into()),
        });
        self
    }

    /// Token for the Discord adapter, when it is enabled
    pub fn discord_token(&self) -> Option<String> {
        self.adapters
            .discord
            .as_ref()
            .filter(|d| d.enabled)
            .and_then(|d| d.token.clone())
    }

    /// The console runs unless explicitly disabled
    pub fn console_enabled(&self) -> bool {
        self.adapters.console.as_ref().map_or(true, |c| c.enabled)
    }

    /// Discord when a token is available, otherwise the console if it is enabled
    pub fn adapter(&self) -> Result<AdapterChoice, ConfigError> {
        if let Some(token) = self.discord_token() {
            return Ok(AdapterChoice::Discord { token });
        }
        if self.console_enabled() {
            return Ok(AdapterChoice::Console);
        }
        Err(ConfigError::MissingField("adapters.discord.token".to_string()))
    }
}
