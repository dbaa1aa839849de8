/// Language requested when the user names none
pub const DEFAULT_TARGET_LANG: &str = "en";

/// Target language and text extracted from a trigger message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub target_lang: String,
    pub payload_text: String,
}

impl ParsedCommand {
    pub fn new(target_lang: impl Into<String>, payload_text: impl Into<String>) -> Self {
        Self {
            target_lang: target_lang.into(),
            payload_text: payload_text.into(),
        }
    }
}

/// Contiguous piece of input text, either prose or a code span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_code: bool,
}

impl Segment {
    pub fn prose(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_code: false }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_code: true }
    }
}

/// Output of a segment-preserving translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub segments: Vec<Segment>,
    pub translated_text: String,
}

/// A language the translation service accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Supported languages keyed by code, in service order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates of a code are ignored
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        let code = code.into();
        if self.get(&code).is_none() {
            self.languages.push(Language { code, name: name.into() });
        }
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// Look up by code or by display name, ignoring case
    pub fn resolve(&self, code_or_name: &str) -> Option<&Language> {
        let wanted = code_or_name.to_lowercase();
        self.languages
            .iter()
            .find(|l| l.code.to_lowercase() == wanted || l.name.to_lowercase() == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl<C: Into<String>, N: Into<String>> FromIterator<(C, N)> for LanguageCatalog {
    fn from_iter<I: IntoIterator<Item = (C, N)>>(iter: I) -> Self {
        let mut catalog = LanguageCatalog::new();
        for (code, name) in iter {
            catalog.insert(code, name);
        }
        catalog
    }
}
