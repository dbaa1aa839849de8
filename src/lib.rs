//! zap-bot - translation bot for Discord
//!
//! Watches channel messages and translates on a mention, a `translate this`
//! reply, or an inline `translate this ...`, keeping code spans untouched.

pub mod domain;
pub mod application;
pub mod infrastructure;
