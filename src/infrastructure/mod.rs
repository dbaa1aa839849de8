//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Translation: Translation service backends
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod translation;
pub mod adapters;
