//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (User, Message, Command, Segment, LanguageCatalog)
//! - Traits: Abstractions for infrastructure (ChatPlatform, TranslationProvider)

pub mod entities;
pub mod traits;
