//! # `mealpick` – situation-aware meal menu recommender
//!
//! Serves a single page with a situation form. Submitting it turns the
//! answers into a short context block, wraps that in a fixed prompt and asks
//! an OpenAI chat model for three menu suggestions, rendered from markdown.
//! A second button asks again with the last submitted situation.
//!
//! | Module        | What it provides                                                  |
//! |---------------|-------------------------------------------------------------------|
//! | [`config`]    | API key lookup (env, `.env`, secrets file) and listener settings  |
//! | [`telemetry`] | `tracing` subscriber setup                                        |
//! | [`flow`]      | the Idle / Requesting / ResultShown state machine                 |
//! | [`session`]   | per-visitor memory of the last submitted context                  |
//! | [`web`]       | the `axum` router, page rendering and markdown output             |
//! | [`error`]     | request refusals mapped to HTTP responses                         |
//!
//! Form types, the context serializer and the prompt live in
//! `mealpick-types`; the OpenAI transport lives in `mealpick-openai`.

pub mod config;
pub mod error;
pub mod flow;
pub mod session;
pub mod telemetry;
pub mod web;

#[cfg(test)]
mod fake;
