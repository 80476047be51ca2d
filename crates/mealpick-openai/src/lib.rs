//! OpenAI `chat/completions` backend.
//!
//! [`OpenAiAdapterBuilder`] wires an API key (and optionally a base URL) into
//! an [`OpenAiAdapter`], which implements
//! [`ChatCompletionProvider`](mealpick_core::provider::ChatCompletionProvider)
//! and plugs into [`MealpickClient`](mealpick_core::MealpickClient).
mod adapter;
mod model_map;
mod provider_impl_chat;

pub use adapter::{OpenAiAdapter, OpenAiAdapterBuilder};
pub mod api_v1;
mod client;
pub mod error;

pub use client::OpenAiClient;
