use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::MessageRef;
use crate::domain::traits::ChatPlatform;
use super::command_service::{chunk_chars, MESSAGE_CHAR_LIMIT};

pub const THREAD_TITLE_PREFIX: &str = "Translation: ";
pub const THREAD_TITLE_MAX_CHARS: usize = 100;
const THREAD_TITLE_WORDS: usize = 10;
const ELLIPSIS: &str = "...";

/// Title for a reply thread: the first ten words of `seed` after a fixed label,
/// cut to 97 chars plus `...` when longer than 100.
pub fn thread_title(seed: &str) -> String {
    let words: Vec<&str> = seed.split_whitespace().take(THREAD_TITLE_WORDS).collect();
    let title = format!("{}{}", THREAD_TITLE_PREFIX, words.join(" "));

    if title.chars().count() > THREAD_TITLE_MAX_CHARS {
        let keep = THREAD_TITLE_MAX_CHARS - ELLIPSIS.len();
        let mut truncated: String = title.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        title
    }
}

/// Delivers a response in a new thread on the originating message
#[derive(Clone)]
pub struct ThreadResponder {
    platform: Arc<dyn ChatPlatform>,
}

impl ThreadResponder {
    pub fn new(platform: Arc<dyn ChatPlatform>) -> Self {
        Self { platform }
    }

    /// Open a thread titled from `title_seed` and post `response` in it.
    ///
    /// If the platform rejects the thread, or rejects the first post into it, the
    /// response is posted as a direct reply instead. Any other failure is returned
    /// to the caller.
    pub async fn respond(&self, origin: &MessageRef, response: &str, title_seed: &str) -> Result<(), BotError> {
        let title = thread_title(title_seed);
        let chunks = chunk_chars(response, MESSAGE_CHAR_LIMIT);

        let rejection = match self.platform.create_thread(origin, &title).await {
            Ok(thread_id) => {
                tracing::debug!("Opened thread {} on message {}", thread_id, origin.message_id);
                // Only the first post can fall back; later ones would duplicate text.
                let Some((first, rest)) = chunks.split_first() else {
                    return Ok(());
                };
                match self.platform.send_message(&thread_id, first).await {
                    Ok(_) => {
                        for chunk in rest {
                            self.platform.send_message(&thread_id, chunk).await?;
                        }
                        return Ok(());
                    }
                    Err(e) if e.is_platform_rejection() => e,
                    Err(e) => return Err(e),
                }
            }
            Err(e) if e.is_platform_rejection() => e,
            Err(e) => return Err(e),
        };

        tracing::warn!("Thread response failed, replying directly: {}", rejection);
        for chunk in &chunks {
            self.platform.reply(origin, chunk).await?;
        }
        Ok(())
    }
}
