use crate::domain::entities::{Command, CommandKind, CommandRegistry, Embed, LanguageCatalog, Reply};
use crate::application::errors::{BotError, CommandError};
use super::translation_service::TranslationService;

/// Platform per-message character limit
pub const MESSAGE_CHAR_LIMIT: usize = 2000;

const FENCE_OPEN: &str = "```\n";
const FENCE_CLOSE: &str = "\n```";

/// Listed chars per catalog message, leaving room for the fence
pub const CATALOG_CHUNK_CHARS: usize = MESSAGE_CHAR_LIMIT - FENCE_OPEN.len() - FENCE_CLOSE.len();

const HELP_COLOUR: u32 = 0x3498db;
const LANGUAGES_COLOUR: u32 = 0x2ecc71;

/// Split `text` into consecutive pieces of at most `limit` chars.
/// Cuts fall on exact char counts, so a piece may end mid-line.
pub fn chunk_chars(text: &str, limit: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(limit.max(1)).map(|c| c.iter().collect()).collect()
}

/// One `code: name` line per language
pub fn render_catalog(catalog: &LanguageCatalog) -> String {
    catalog
        .iter()
        .map(|l| format!("{}: {}", l.code, l.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Service for the help and language catalog commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        self.register(Command::new("zap", CommandKind::Help)
            .with_description("Show how to use the translator")
            .with_aliases(vec!["help".to_string()]));

        self.register(Command::new("languages", CommandKind::Languages)
            .with_description("List every supported language")
            .with_aliases(vec!["langs".to_string()]));
    }

    /// Resolve a command name (without prefix) to its kind
    pub fn find(&self, name: &str) -> Result<CommandKind, CommandError> {
        self.registry
            .find(name)
            .map(|c| c.kind)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))
    }

    /// Command name from a prefixed message, e.g. `!languages extra` -> `languages`.
    /// The name must follow the prefix directly, so `! zap` is not an invocation.
    pub fn parse_invocation<'a>(&self, content: &'a str) -> Option<&'a str> {
        let rest = content.strip_prefix(self.prefix.as_str())?;
        rest.split(char::is_whitespace).next().filter(|name| !name.is_empty())
    }

    pub async fn execute(&self, kind: CommandKind, translator: &TranslationService) -> Result<Vec<Reply>, BotError> {
        match kind {
            CommandKind::Help => Ok(self.help()),
            CommandKind::Languages => {
                let catalog = translator.supported_languages().await?;
                Ok(self.languages(&catalog))
            }
        }
    }

    pub fn help(&self) -> Vec<Reply> {
        let prefix = &self.prefix;
        let embed = Embed::new("👋 Zap Bot - How to Use Me!")
            .with_description("Hey there! I'm your friendly translation buddy! Let's learn how to use me step by step! 🐾")
            .with_colour(HELP_COLOUR)
            .with_field(
                "1️⃣ Mention Me for Help!",
                "Just mention me to translate something to English or any language you want! Easy peasy! 😄\n\
                 - Example: `@bot Hello, how are you?`\n\
                 - Or: `@bot lang:es Hello, how are you?` (This will translate to Spanish!)",
                false,
            )
            .with_field(
                "2️⃣ Reply with 'translate this'",
                "Want me to translate a message you see? Just reply with 'translate this'! 🎯\n\
                 - Example: `translate this` (I'll guess the language!)\n\
                 - Or: `translate this into spanish` or `translate this into es` (I'll translate to Spanish!)",
                false,
            )
            .with_field(
                "3️⃣ Translate Your Own Message",
                "You can also ask me to translate your own messages! ✨\n\
                 - Example: `translate this Hello, how are you?`\n\
                 - Or: `translate this into french Hello, how are you?` (I'll translate to French!)",
                false,
            )
            .with_field(
                "4️⃣ See All Languages I Know",
                format!(
                    "Wanna know all the languages I can speak? Ask me! 🌍\n\
                     - Command: `{}languages` (I'll show you a list of all supported languages!)",
                    prefix
                ),
                false,
            )
            .with_footer("I'm always here to help you translate anything! 🌟");

        vec![Reply::Embed(embed)]
    }

    /// Intro card followed by the catalog as fenced blocks, each within the message limit
    pub fn languages(&self, catalog: &LanguageCatalog) -> Vec<Reply> {
        let embed = Embed::new("🌍 Languages I Can Speak!")
            .with_description("Wow! I can translate into so many languages! 🎉 Check them out below:")
            .with_colour(LANGUAGES_COLOUR)
            .with_footer("Just tell me which language you want, and I'll do the magic! ✨");

        let mut replies = vec![Reply::Embed(embed)];
        let listing = render_catalog(catalog);
        for chunk in chunk_chars(&listing, CATALOG_CHUNK_CHARS) {
            replies.push(Reply::Text(format!("{}{}{}", FENCE_OPEN, chunk, FENCE_CLOSE)));
        }
        replies
    }

    /// Registered commands, used to publish the slash-command surface
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.registry.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CommandService {
        let mut service = CommandService::new("!");
        service.register_defaults();
        service
    }

    #[test]
    fn test_chunk_chars_exact_boundaries() {
        let text = "abcdefghij";
        assert_eq!(chunk_chars(text, 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(chunk_chars(text, 10), vec!["abcdefghij"]);
    }

    #[test]
    fn test_chunk_chars_counts_chars() {
        let text = "ééé";
        assert_eq!(chunk_chars(text, 2), vec!["éé", "é"]);
    }

    #[test]
    fn test_parse_invocation() {
        let service = service();
        assert_eq!(service.parse_invocation("!languages"), Some("languages"));
        assert_eq!(service.parse_invocation("!zap now"), Some("zap"));
        assert_eq!(service.parse_invocation("zap"), None);
        assert_eq!(service.parse_invocation("!"), None);
        assert_eq!(service.parse_invocation("! zap"), None);
    }

    #[test]
    fn test_find_aliases() {
        let service = service();
        assert_eq!(service.find("help").ok(), Some(CommandKind::Help));
        assert_eq!(service.find("langs").ok(), Some(CommandKind::Languages));
        assert!(matches!(service.find("nope"), Err(CommandError::NotFound(_))));
    }

    #[test]
    fn test_slash_names_resolve_to_registered_commands() {
        let service = service();
        for command in service.commands() {
            assert_eq!(service.find(command.kind.slash_name()).ok(), Some(command.kind));
        }
        assert_eq!(service.commands().count(), 2);
    }

    #[test]
    fn test_help_has_four_sections() {
        let replies = service().help();
        assert_eq!(replies.len(), 1);

        let embed = replies[0].embed().expect("help is an embed");
        assert_eq!(embed.fields.len(), 4);
        assert!(embed.fields[3].value.contains("!languages"));
    }

    #[test]
    fn test_full_catalog_blocks_fit_the_message_limit() {
        let catalog: LanguageCatalog = (0..200)
            .map(|i| (format!("c{:03}", i), "x".repeat(20)))
            .collect();
        let replies = service().languages(&catalog);

        let blocks: Vec<&str> = replies.iter().filter_map(Reply::text).collect();
        assert!(blocks.len() > 1);
        assert_eq!(blocks[0].chars().count(), MESSAGE_CHAR_LIMIT);
        assert!(blocks.iter().all(|b| b.chars().count() <= MESSAGE_CHAR_LIMIT));
    }

    #[test]
    fn test_small_catalog_is_one_block() {
        let catalog: LanguageCatalog = [("es", "spanish"), ("fr", "french")].into_iter().collect();
        let replies = service().languages(&catalog);

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[1].text(), Some("```\nes: spanish\nfr: french\n```"));
    }
}
