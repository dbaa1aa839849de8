//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod reply;
pub mod translation;

pub use user::User;
pub use message::{Message, MessageRef};
pub use command::{Command, CommandKind, CommandRegistry};
pub use reply::{Embed, EmbedField, Reply};
pub use translation::{
    Language, LanguageCatalog, ParsedCommand, Segment, TranslationResult, DEFAULT_TARGET_LANG,
};
