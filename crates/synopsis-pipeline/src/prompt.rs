//! LLM prompt assembly for document summaries

use std::borrow::Cow;
use synopsis_domain::ChatMessage;

/// Default number of characters of document text sent to the model
pub const DEFAULT_CHAR_BUDGET: usize = 1000;

/// Appended to text cut at the character budget
pub const TRUNCATION_MARKER: &str = "...";

/// System message framing every request
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Text placed before the document in the user message
pub const USER_PROMPT_PREFIX: &str = "Please summarize this document: \n\n";

/// Cut `text` to at most `budget` characters
///
/// Characters are Unicode scalar values. Text longer than the budget keeps its
/// first `budget` characters followed by [`TRUNCATION_MARKER`]; anything else
/// is returned unchanged.
pub fn truncate(text: &str, budget: usize) -> Cow<'_, str> {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(text),
    }
}

/// Builds the chat exchange asking for a document summary
pub struct PromptBuilder<'a> {
    text: &'a str,
    char_budget: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for the extracted document text
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            char_budget: DEFAULT_CHAR_BUDGET,
        }
    }

    /// Override the character budget
    pub fn with_char_budget(mut self, char_budget: usize) -> Self {
        self.char_budget = char_budget;
        self
    }

    /// The user message: prefix plus the truncated document text
    pub fn user_prompt(&self) -> String {
        format!("{}{}", USER_PROMPT_PREFIX, truncate(self.text, self.char_budget))
    }

    /// Build the complete exchange: system instruction, then user prompt
    pub fn build(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(self.user_prompt()),
        ]
    }
}
