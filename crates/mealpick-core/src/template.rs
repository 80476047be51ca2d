//! Abstractions that tie a **prompt** to a concrete **model**.
//!
//! Two traits take a value from "some string fragments" to a ready-to-send
//! request:
//!
//! 1. [`IntoPrompt`] – turns *any* value into a list of chat messages.
//! 2. [`PromptTemplate`] – adds the target model and sampling temperature.
//!
//! ```rust
//! use mealpick_core::template::{IntoPrompt, PromptTemplate};
//! use mealpick_core::generic::{GenericMessage, GenericRole};
//! use mealpick_core::model::{Model, OpenAiModel};
//!
//! struct HelloPrompt;
//!
//! impl IntoPrompt for HelloPrompt {
//!     type Message = GenericMessage;
//!     fn into_prompt(self) -> Vec<Self::Message> {
//!         vec![GenericMessage::new("Say hello!", GenericRole::User)]
//!     }
//! }
//!
//! impl PromptTemplate for HelloPrompt {
//!     const MODEL: Model = Model::OpenAi(OpenAiModel::Gpt4oMini);
//! }
//! ```
use crate::model::Model;

/// High-level description of a prompt.
///
/// Implement this trait **in addition** to [`IntoPrompt`] to specify the
/// model that should handle the request and, optionally, the sampling
/// temperature. `None` leaves the provider default in place.
pub trait PromptTemplate: IntoPrompt {
    /// Logical model identifier. The back-end maps it to its own naming
    /// scheme (`"gpt-4o-mini"`, …).
    const MODEL: Model;

    const TEMPERATURE: Option<f64> = None;
}

/// Converts a value into a series of chat messages.
///
/// The `Message` type is associated so a back-end can require its own
/// richer struct without resorting to dynamic dispatch.
pub trait IntoPrompt {
    /// Chat message representation emitted by the prompt.
    type Message: Send + Sync + 'static;

    /// Consume `self` and return **all** messages in the desired order.
    fn into_prompt(self) -> Vec<Self::Message>;
}

/// A single [`GenericMessage`](crate::generic::GenericMessage) is a prompt
/// on its own.
impl IntoPrompt for crate::generic::GenericMessage {
    type Message = crate::generic::GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![self]
    }
}
