//! Builder-style helper for constructing **plain-text prompts**.
//!
//! Writing multi-line string literals inline is tedious and makes the exact
//! whitespace hard to see. `PromptBuilder` offers a fluent API where every
//! method returns `self`:
//!
//! ```rust
//! use mealpick_prompt::builder::PromptBuilder;
//!
//! let text = PromptBuilder::new()
//!     .add_line("Recommend three dishes.")
//!     .add_blank_line()
//!     .add_bullet("a name")
//!     .add_labeled("Party size", 2)
//!     .finalize();
//!
//! assert_eq!(text, "Recommend three dishes.\n\n- a name\nParty size: 2\n");
//! ```
//!
//! The builder performs **no validation** and no smart formatting: newlines
//! and whitespace are emitted exactly as requested.

use std::fmt::{Display, Write as _};

/// Fluent helper that owns a `String` buffer growing with each chained call.
/// Call [`Self::finalize`] to obtain the assembled text.
#[derive(Debug, Default)]
pub struct PromptBuilder {
    buffer: String,
}

impl PromptBuilder {
    /// Create a fresh, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain line of text and a trailing newline.
    pub fn add_line(mut self, line: impl Display) -> Self {
        // Writing into a String cannot fail.
        let _ = writeln!(self.buffer, "{line}");
        self
    }

    /// Add a `label: value` line. The separator is always emitted, so an
    /// empty value still produces `label: `.
    pub fn add_labeled(mut self, label: impl Display, value: impl Display) -> Self {
        let _ = writeln!(self.buffer, "{label}: {value}");
        self
    }

    /// Add a `- item` list entry.
    pub fn add_bullet(mut self, item: impl Display) -> Self {
        let _ = writeln!(self.buffer, "- {item}");
        self
    }

    /// Insert a single blank line.
    pub fn add_blank_line(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Retrieve the accumulated text and consume the builder.
    pub fn finalize(self) -> String {
        self.buffer
    }
}
