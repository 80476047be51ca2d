//! Generic message and role types used by the *mealpick-core* crate.
//!
//! They mirror the concepts exposed by most provider APIs ("system",
//! "user", "assistant") while staying small enough to
//!
//! * convert into provider-specific structs via a simple `From`/`Into`,
//! * serialize without pulling in heavyweight dependencies, and
//! * use in unit tests without mocking a full transport layer.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lightweight container representing a single chat message that is
/// independent of any specific LLM provider.
///
/// * `content` – the raw UTF-8 content. Markdown is fine.
/// * `role` – see [`GenericRole`] for permitted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub content: String,
    pub role: GenericRole,
}

impl GenericMessage {
    /// Convenience constructor mirroring the field order used by common HTTP
    /// APIs.
    ///
    /// ```rust
    /// use mealpick_core::generic::{GenericMessage, GenericRole};
    ///
    /// let sys = GenericMessage::new("You are a helpful bot.", GenericRole::System);
    /// assert_eq!(sys.role.to_string(), "system");
    /// ```
    pub fn new(content: impl Into<String>, role: GenericRole) -> Self {
        Self {
            content: content.into(),
            role,
        }
    }
}

/// High-level chat roles recognised by most LLM providers.
///
/// The `Display` implementation renders the canonical lowercase name so you
/// can feed it directly into JSON without extra mapping logic.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenericRole {
    /// "System" messages define global behaviour and persona.
    System,
    /// Messages produced by the assistant / model.
    Assistant,
    /// Messages originating from the human user.
    User,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericRole::System => write!(f, "system"),
            GenericRole::Assistant => write!(f, "assistant"),
            GenericRole::User => write!(f, "user"),
        }
    }
}

/// The primary generated text of a completion, plus token usage when the
/// provider reports it.
#[derive(Debug, Clone)]
pub struct GenericChatCompletionResponse {
    pub content: String,
    pub usage: Option<GenericUsageReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericUsageReport {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_matches_wire_names() {
        assert_eq!(GenericRole::System.to_string(), "system");
        assert_eq!(GenericRole::Assistant.to_string(), "assistant");
        assert_eq!(GenericRole::User.to_string(), "user");
    }

    #[test]
    fn new_accepts_borrowed_and_owned_content() {
        let borrowed = GenericMessage::new("hi", GenericRole::User);
        let owned = GenericMessage::new(String::from("hi"), GenericRole::User);
        assert_eq!(borrowed, owned);
    }
}
