//! Application services - Business logic orchestration

pub mod command_service;
pub mod thread_responder;
pub mod translation_service;

pub use command_service::CommandService;
pub use thread_responder::ThreadResponder;
pub use translation_service::TranslationService;
