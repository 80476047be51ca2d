//! Domain types for the meal recommendation flow.
//!
//! A [`form::FormRecord`] is captured from the situation form, rendered into
//! a [`context::SerializedContext`] and wrapped by [`prompt::MealPrompt`]
//! into the two chat messages sent to the completion service.
pub mod context;
pub mod form;
pub mod fragments;
pub mod prompt;
