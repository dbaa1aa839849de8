//! Domain traits - Abstractions for infrastructure implementations

pub mod platform;
pub mod translator;

pub use platform::{BotInfo, ChatPlatform};
pub use translator::{TranslationProvider, AUTO_SOURCE};
