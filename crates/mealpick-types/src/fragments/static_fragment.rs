//! A minimal fragment that injects a *static* string into the prompt.
//!
//! Use this for pre-determined text (persona, fixed instruction) that never
//! changes between invocations.
//!
//! ```rust
//! use mealpick_types::fragments::StaticFragment;
//! use mealpick_core::generic::GenericRole;
//!
//! let sys_msg = StaticFragment::new("You are a careful menu advisor.", GenericRole::System);
//! ```
//!
//! The `From<&str>` impl defaults to `GenericRole::System` since system
//! messages are the most common static fragments.

use mealpick_core::{
    generic::{GenericMessage, GenericRole},
    template::IntoPrompt,
};

/// A borrowed static string bundled with an LLM chat role.
pub struct StaticFragment<'a>((&'a str, GenericRole));

impl<'a> From<&'a str> for StaticFragment<'a> {
    fn from(value: &'a str) -> Self {
        Self((value, GenericRole::System))
    }
}

impl<'a> StaticFragment<'a> {
    /// Create a new fragment with explicit role.
    pub fn new(value: &'a str, role: GenericRole) -> Self {
        Self((value, role))
    }
}

impl IntoPrompt for StaticFragment<'_> {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![GenericMessage::new(self.0.0, self.0.1)]
    }
}
