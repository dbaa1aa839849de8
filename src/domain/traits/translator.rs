use async_trait::async_trait;
use crate::domain::entities::LanguageCatalog;
use crate::application::errors::TranslationError;

/// Source language value meaning "detect it"
pub const AUTO_SOURCE: &str = "auto";

/// External translation service - abstraction for translation backends
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &str;

    /// Translate `text` from `source` (or [`AUTO_SOURCE`]) into `target`
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError>;

    /// Languages the service accepts, fetched per call
    async fn supported_languages(&self) -> Result<LanguageCatalog, TranslationError>;
}
