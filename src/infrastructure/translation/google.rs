//! Google Translate provider - public web endpoint, no API key

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::application::errors::TranslationError;
use crate::domain::entities::LanguageCatalog;
use crate::domain::traits::{TranslationProvider, AUTO_SOURCE};
use super::languages::google_catalog;

/// Google Translate endpoint
const API_BASE: &str = "https://translate.googleapis.com";

/// Longest text accepted in one request, exclusive
pub const MAX_CHARS: usize = 5000;

/// Google provider
pub struct GoogleProvider {
    client: Client,
    base_url: String,
}

impl GoogleProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.base_url)
    }

    /// Map a code or English name to the code Google expects
    fn resolve(catalog: &LanguageCatalog, lang: &str) -> Result<String, TranslationError> {
        catalog
            .resolve(lang)
            .map(|l| l.code.clone())
            .ok_or_else(|| TranslationError::UnsupportedLanguage(lang.to_string()))
    }

    /// Join the translated sentences from a `translate_a/single` body
    fn parse_body(body: &Value) -> Result<String, TranslationError> {
        let sentences = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| TranslationError::Parse("missing sentence list".to_string()))?;

        let translated: String = sentences
            .iter()
            .filter_map(|s| s.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(TranslationError::Parse("empty translation".to_string()));
        }
        Ok(translated)
    }
}

impl Default for GoogleProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        let len = text.chars().count();
        if len >= MAX_CHARS {
            return Err(TranslationError::InvalidLength { len, max: MAX_CHARS });
        }

        let catalog = google_catalog();
        let target = Self::resolve(&catalog, target)?;
        let source = if source == AUTO_SOURCE {
            AUTO_SOURCE.to_string()
        } else {
            Self::resolve(&catalog, source)?
        };

        let core = text.trim();
        if core.is_empty() || source == target {
            return Ok(text.to_string());
        }

        let response = self.client
            .get(self.endpoint())
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", core),
            ])
            .send()
            .await
            .map_err(|e| TranslationError::Network(e.to_string()))?;

        if response.status() == 429 {
            return Err(TranslationError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Api(format!("status: {}, body: {}", status, body)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::Parse(e.to_string()))?;

        let translated = Self::parse_body(&body)?;

        // Keep the whitespace the segment came with
        let leading = &text[..text.len() - text.trim_start().len()];
        let trailing = &text[text.trim_end().len()..];
        Ok(format!("{}{}{}", leading, translated, trailing))
    }

    async fn supported_languages(&self) -> Result<LanguageCatalog, TranslationError> {
        Ok(google_catalog())
    }
}
