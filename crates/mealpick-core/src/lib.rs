//! Provider-agnostic building blocks shared by every **mealpick** crate.
//!
//! * [`generic`] – chat messages and roles independent of any vendor API.
//! * [`model`] – logical model identifiers, mapped to wire names by adapters.
//! * [`template`] – [`IntoPrompt`](template::IntoPrompt) and
//!   [`PromptTemplate`](template::PromptTemplate), tying messages to a model.
//! * [`provider`] – the [`ChatCompletionProvider`](provider::ChatCompletionProvider)
//!   trait implemented by back-ends such as `mealpick-openai`.
//! * [`MealpickClient`] – a cheap-to-clone handle that runs a prompt against
//!   one backend and hands back the generated text.
pub mod client;
pub mod error;
pub mod generic;
pub mod model;
pub mod provider;
pub mod template;

pub use client::MealpickClient;
