//! Segment-preserving translation
//!
//! Text is split into prose and code spans (fenced ```` ``` ```` blocks or
//! inline `` ` `` spans). Prose goes to the translation provider; code spans
//! are copied through byte-for-byte, and the pieces are joined back in order.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::application::errors::TranslationError;
use crate::domain::entities::{LanguageCatalog, Segment, TranslationResult};
use crate::domain::traits::{TranslationProvider, AUTO_SOURCE};

/// Fenced block (may span lines) or single-line inline span, both non-greedy
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```[\s\S]+?```|`.+?`").expect("code span pattern is valid")
});

/// Prefix of the in-band message returned when translation fails
pub const TRANSLATION_ERROR_PREFIX: &str = "Error in translation: ";

/// Split text into alternating prose and code segments. Empty prose gaps are dropped.
pub fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in CODE_SPAN.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::prose(&text[last..m.start()]));
        }
        segments.push(Segment::code(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::prose(&text[last..]));
    }

    segments
}

/// Translator that leaves code spans untouched
#[derive(Clone)]
pub struct TranslationService {
    provider: Arc<dyn TranslationProvider>,
    source: String,
}

impl TranslationService {
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self {
            provider,
            source: AUTO_SOURCE.to_string(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Translate `text` into `target_lang`.
    ///
    /// Never fails: a provider error becomes the returned text, prefixed with
    /// [`TRANSLATION_ERROR_PREFIX`].
    pub async fn translate(&self, text: &str, target_lang: &str) -> String {
        match self.translate_detailed(text, target_lang).await {
            Ok(result) => result.translated_text,
            Err(e) => {
                tracing::warn!("Translation to '{}' via {} failed: {}", target_lang, self.provider.name(), e);
                format!("{}{}", TRANSLATION_ERROR_PREFIX, e)
            }
        }
    }

    /// Translate and keep the segmentation alongside the output
    pub async fn translate_detailed(&self, text: &str, target_lang: &str) -> Result<TranslationResult, TranslationError> {
        let segments = segment(text);
        let mut translated_text = String::with_capacity(text.len());

        for seg in &segments {
            if seg.is_code || seg.text.trim().is_empty() {
                translated_text.push_str(&seg.text);
                continue;
            }
            let translated = self.provider
                .translate(&seg.text, &self.source, target_lang)
                .await?;
            translated_text.push_str(&translated);
        }

        tracing::debug!("Translated {} segment(s) into '{}'", segments.len(), target_lang);

        Ok(TranslationResult { segments, translated_text })
    }

    /// Full language catalog from the provider
    pub async fn supported_languages(&self) -> Result<LanguageCatalog, TranslationError> {
        self.provider.supported_languages().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_plain_text() {
        assert_eq!(segment("Hello there"), vec![Segment::prose("Hello there")]);
    }

    #[test]
    fn test_segment_inline_and_fenced() {
        let text = "Run `cargo build` then:\n```rust\nfn main() {}\n```\ndone";
        let segments = segment(text);

        assert_eq!(
            segments,
            vec![
                Segment::prose("Run "),
                Segment::code("`cargo build`"),
                Segment::prose(" then:\n"),
                Segment::code("```rust\nfn main() {}\n```"),
                Segment::prose("\ndone"),
            ]
        );
        let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_segment_inline_span_stays_on_one_line() {
        let segments = segment("a `b\nc` d");
        assert!(segments.iter().all(|s| !s.is_code));
    }

    #[test]
    fn test_segment_leading_code_has_no_empty_gap() {
        let segments = segment("`x`");
        assert_eq!(segments, vec![Segment::code("`x`")]);
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_segment_is_non_greedy() {
        let segments = segment("`a` and `b`");
        assert_eq!(
            segments,
            vec![Segment::code("`a`"), Segment::prose(" and "), Segment::code("`b`")]
        );
    }
}
