//! Simple **builder** that concatenates multiple values implementing
//! [`IntoPrompt`](mealpick_core::template::IntoPrompt).
//!
//! ```text
//! ┌───────────────┐    IntoPrompt     ┌────────────────┐
//! │ persona       │ ─────────────────►│ Vec<Message>   │
//! ├───────────────┤                   ├────────────────┤
//! │ instruction   │ ─────────────────►│ Vec<Message>   │
//! └───────────────┘                   └────────────────┘
//!            ▲                                     │
//!            └────────── PromptChain::build() ◄────┘
//! ```
//!
//! ```rust
//! use mealpick_prompt::chain::PromptChain;
//! use mealpick_core::generic::{GenericMessage, GenericRole};
//!
//! let messages: Vec<GenericMessage> = PromptChain::new()
//!     .with(GenericMessage::new("You are a helpful bot.", GenericRole::System))
//!     .with(GenericMessage::new("Suggest lunch.", GenericRole::User))
//!     .build();
//!
//! assert_eq!(messages.len(), 2);
//! ```
use mealpick_core::template::IntoPrompt;

/// Lightweight container that accumulates messages produced by
/// [`IntoPrompt`] implementors, in the order they were added.
pub struct PromptChain<Message>(Vec<Message>);

impl<Message> Default for PromptChain<Message> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Message> PromptChain<Message> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Append the messages produced by `with` to the chain.
    pub fn with(mut self, with: impl IntoPrompt<Message = Message>) -> Self {
        self.0.append(&mut with.into_prompt());
        self
    }

    /// Consume the builder and return the accumulated messages.
    pub fn build(self) -> Vec<Message> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use mealpick_core::generic::{GenericMessage, GenericRole};

    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let messages = PromptChain::new()
            .with(GenericMessage::new("first", GenericRole::System))
            .with(GenericMessage::new("second", GenericRole::User))
            .build();

        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second"]);
    }

    #[test]
    fn empty_chain_builds_nothing() {
        let messages: Vec<GenericMessage> = PromptChain::default().build();
        assert!(messages.is_empty());
    }
}
