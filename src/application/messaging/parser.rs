//! Trigger parser - Classifies raw messages into translation requests

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::entities::{Message, MessageRef, ParsedCommand, DEFAULT_TARGET_LANG};

/// User (`<@1>`, `<@!1>`) and role (`<@&1>`) mention tokens
static MENTION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<@[!&]?\d+>").expect("mention pattern is valid")
});

/// One word char in any script: everything but whitespace and ASCII punctuation
/// (`_` stays a word char). regex-lite's `\w` only covers ASCII.
const WORD: &str = r"[^\s!-/:-@\[-^`{-~]";

static LANG_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"lang:({WORD}+)")).expect("lang pattern is valid")
});

/// A `lang:` token with the whitespace around it
static LANG_TOKEN_SPACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\s*lang:{WORD}+\s*")).expect("lang pattern is valid")
});

static INTO_LANG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)into\s+({WORD}+)")).expect("into pattern is valid")
});

/// How a message asked to be translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Bot mentioned; payload is the message itself
    Mention(ParsedCommand),
    /// Trigger phrase in a reply; payload is the referenced message
    ReplyTrigger { target_lang: String, reference: MessageRef },
    /// Trigger phrase followed by the text to translate
    InlineTrigger(ParsedCommand),
    NoMatch,
}

/// Remove all user and role mention tokens
pub fn strip_mentions(text: &str) -> String {
    MENTION_TOKEN.replace_all(text, "").to_string()
}

/// Pull a `lang:<code>` token out of mention text. Falls back to `default_lang`.
pub fn extract_language_from_mention(text: &str, default_lang: &str) -> ParsedCommand {
    match LANG_TOKEN.captures(text) {
        Some(caps) => {
            let lang = caps[1].to_string();
            let rest = LANG_TOKEN_SPACED.replace_all(text, " ");
            ParsedCommand::new(lang, rest.trim())
        }
        None => ParsedCommand::new(default_lang, text),
    }
}

/// Find `into <word>` anywhere in `command`. The text is returned as given.
pub fn extract_language_from_command(command: &str, default_lang: &str) -> ParsedCommand {
    let lang = INTO_LANG
        .captures(command)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| default_lang.to_string());
    ParsedCommand::new(lang, command)
}

/// Drop a leading trigger `phrase` (any case) and the whitespace after it.
/// Text that does not start with the phrase is returned unchanged.
pub fn strip_trigger_phrase(text: &str, phrase: &str) -> String {
    PhraseMatcher::new(phrase).strip(text)
}

/// Decides whether a message is one kind of trigger
pub trait TriggerMatcher: Send + Sync {
    fn matches(&self, message: &Message) -> Option<Trigger>;
}

/// Bot mention anywhere in the message
pub struct MentionMatcher {
    default_lang: String,
}

impl TriggerMatcher for MentionMatcher {
    fn matches(&self, message: &Message) -> Option<Trigger> {
        if !message.mentions_bot {
            return None;
        }
        let content = strip_mentions(&message.content);
        let parsed = extract_language_from_mention(content.trim(), &self.default_lang);
        Some(Trigger::Mention(parsed))
    }
}

/// Trigger phrase at the start of a message, case-insensitive
struct PhraseMatcher {
    phrase: String,
    leading: Regex,
}

impl PhraseMatcher {
    fn new(phrase: &str) -> Self {
        let leading = Regex::new(&format!(r"(?i)^{}\s*", regex_lite::escape(phrase)))
            .expect("escaped phrase is a valid pattern");
        Self {
            phrase: phrase.to_lowercase(),
            leading,
        }
    }

    fn starts(&self, content: &str) -> bool {
        content.to_lowercase().starts_with(&self.phrase)
    }

    fn strip(&self, content: &str) -> String {
        self.leading.replace(content, "").to_string()
    }
}

/// Trigger phrase sent as a reply to another message
pub struct ReplyTriggerMatcher {
    phrase: PhraseMatcher,
    default_lang: String,
}

impl TriggerMatcher for ReplyTriggerMatcher {
    fn matches(&self, message: &Message) -> Option<Trigger> {
        if !self.phrase.starts(&message.content) {
            return None;
        }
        let reference = message.reference.clone()?;
        let parsed = extract_language_from_command(&message.content, &self.default_lang);
        Some(Trigger::ReplyTrigger {
            target_lang: parsed.target_lang,
            reference,
        })
    }
}

/// Trigger phrase followed by the text itself
pub struct InlineTriggerMatcher {
    phrase: PhraseMatcher,
    default_lang: String,
}

impl TriggerMatcher for InlineTriggerMatcher {
    fn matches(&self, message: &Message) -> Option<Trigger> {
        if !self.phrase.starts(&message.content) || message.has_reply_reference() {
            return None;
        }
        let remainder = self.phrase.strip(&message.content);
        // The `into <lang>` words stay in the payload.
        let parsed = extract_language_from_command(&remainder, &self.default_lang);
        Some(Trigger::InlineTrigger(parsed))
    }
}

/// Ordered trigger matchers, first match wins
pub struct TriggerParser {
    matchers: Vec<Box<dyn TriggerMatcher>>,
}

impl TriggerParser {
    pub fn new(trigger_phrase: &str, default_lang: &str) -> Self {
        let default_lang = if default_lang.trim().is_empty() {
            DEFAULT_TARGET_LANG.to_string()
        } else {
            default_lang.to_string()
        };

        let matchers: Vec<Box<dyn TriggerMatcher>> = vec![
            Box::new(MentionMatcher { default_lang: default_lang.clone() }),
            Box::new(ReplyTriggerMatcher {
                phrase: PhraseMatcher::new(trigger_phrase),
                default_lang: default_lang.clone(),
            }),
            Box::new(InlineTriggerMatcher {
                phrase: PhraseMatcher::new(trigger_phrase),
                default_lang,
            }),
        ];

        Self { matchers }
    }

    /// Classify a message. Messages from bots never trigger.
    pub fn parse(&self, message: &Message) -> Trigger {
        if message.author_is_bot() {
            return Trigger::NoMatch;
        }
        self.matchers
            .iter()
            .find_map(|m| m.matches(message))
            .unwrap_or(Trigger::NoMatch)
    }
}

impl Default for TriggerParser {
    fn default() -> Self {
        Self::new("translate this", DEFAULT_TARGET_LANG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;

    fn message(content: &str) -> Message {
        Message::new("chan", User::new("1").with_username("alice"), content).with_id("100")
    }

    #[test]
    fn test_mention_with_lang_token() {
        let parsed = extract_language_from_mention("lang:es Hello there", "en");
        assert_eq!(parsed, ParsedCommand::new("es", "Hello there"));
    }

    #[test]
    fn test_mention_without_lang_token() {
        let parsed = extract_language_from_mention("Hello there", "en");
        assert_eq!(parsed, ParsedCommand::new("en", "Hello there"));
    }

    #[test]
    fn test_mention_lang_token_in_the_middle() {
        let parsed = extract_language_from_mention("Hello lang:fr there", "en");
        assert_eq!(parsed, ParsedCommand::new("fr", "Hello there"));
    }

    #[test]
    fn test_language_words_in_any_script() {
        let parsed = extract_language_from_mention("lang:日本語 hello", "en");
        assert_eq!(parsed, ParsedCommand::new("日本語", "hello"));

        assert_eq!(extract_language_from_command("translate this into español", "en").target_lang, "español");
        assert_eq!(extract_language_from_command("into zh_cn, please", "en").target_lang, "zh_cn");
    }

    #[test]
    fn test_strip_user_and_role_mentions() {
        assert_eq!(strip_mentions("<@123> hi <@!456> <@&789>"), " hi  ");
    }

    #[test]
    fn test_strip_trigger_phrase() {
        assert_eq!(strip_trigger_phrase("Translate this   hola", "translate this"), "hola");
        assert_eq!(strip_trigger_phrase("hola translate this", "translate this"), "hola translate this");
    }

    #[test]
    fn test_into_is_case_insensitive() {
        let parsed = extract_language_from_command("translate this INTO German", "en");
        assert_eq!(parsed.target_lang, "German");
        assert_eq!(extract_language_from_command("no language here", "en").target_lang, "en");
    }

    #[test]
    fn test_parse_mention_message() {
        let parser = TriggerParser::default();
        let msg = message("<@999> lang:es Hello there").with_mention(true);

        assert_eq!(
            parser.parse(&msg),
            Trigger::Mention(ParsedCommand::new("es", "Hello there"))
        );
    }

    #[test]
    fn test_parse_inline_trigger_keeps_language_words() {
        let parser = TriggerParser::default();
        let msg = message("translate this into french Bonjour");

        assert_eq!(
            parser.parse(&msg),
            Trigger::InlineTrigger(ParsedCommand::new("french", "into french Bonjour"))
        );
    }

    #[test]
    fn test_parse_inline_trigger_phrase_case() {
        let parser = TriggerParser::default();
        let msg = message("Translate This hola amigo");

        assert_eq!(
            parser.parse(&msg),
            Trigger::InlineTrigger(ParsedCommand::new("en", "hola amigo"))
        );
    }

    #[test]
    fn test_parse_reply_trigger() {
        let parser = TriggerParser::default();
        let reference = MessageRef::new("chan", "50");
        let msg = message("translate this into es").with_reference(reference.clone());

        assert_eq!(
            parser.parse(&msg),
            Trigger::ReplyTrigger { target_lang: "es".to_string(), reference }
        );
    }

    #[test]
    fn test_mention_wins_over_phrase() {
        let parser = TriggerParser::default();
        let msg = message("translate this <@999> lang:de hi").with_mention(true);

        assert!(matches!(parser.parse(&msg), Trigger::Mention(_)));
    }

    #[test]
    fn test_bot_authors_and_plain_text_do_not_match() {
        let parser = TriggerParser::default();
        let from_bot = Message::new("chan", User::new("2").as_bot(), "translate this hi");

        assert_eq!(parser.parse(&from_bot), Trigger::NoMatch);
        assert_eq!(parser.parse(&message("just chatting")), Trigger::NoMatch);
    }

    #[test]
    fn test_custom_trigger_phrase_is_escaped() {
        let parser = TriggerParser::new("tr?", "ja");
        let msg = message("TR? good night");

        assert_eq!(
            parser.parse(&msg),
            Trigger::InlineTrigger(ParsedCommand::new("ja", "good night"))
        );
    }
}
