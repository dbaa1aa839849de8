//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Context: The application context shared by handlers
//! - Services: Translation, thread responses, help and catalog commands
//! - Errors: Domain-specific errors
//! - Messaging: Trigger parsing and dispatching

pub mod context;
pub mod errors;
pub mod services;
pub mod messaging;
