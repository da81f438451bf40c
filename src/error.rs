//! Error types for parsing and generation.
//!
//! [`ParseError`] is produced while reading AFX source and carries source
//! spans for diagnostic formatting. [`GenerateError`] is produced while
//! turning a tree into Fusion, when a node breaks a rule the grammar
//! itself cannot express (for example `@path={expr}`).

use crate::ast::span::Span;
use thiserror::Error;

// ── Parse errors ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the error with source context for display
    pub fn format_with_source(&self, source: &str, file_name: Option<&str>) -> String {
        let (line, col) = offset_to_line_col(source, self.span.start);
        let source_line = source.lines().nth(line.saturating_sub(1)).unwrap_or("");

        let location = match file_name {
            Some(name) => format!(" --> {name}:{line}:{col}"),
            None => format!(" --> {line}:{col}"),
        };

        let pointer = " ".repeat(col.saturating_sub(1)) + &"^".repeat(self.span.width());

        let mut output = format!(
            "Error: {}\n{location}\n  |\n{line:>3} | {source_line}\n    | {pointer}",
            self.message
        );

        if let Some(hint) = &self.hint {
            output.push_str(&format!("\n  = hint: {hint}"));
        }

        output
    }
}

fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

// ── Generate errors ─────────────────────────────────────────────────────

/// An error raised while rendering a tree into Fusion.
///
/// Generation stops at the first error; no partial output is returned.
/// The message names the directive involved and the kind of value that
/// was actually found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerateError {
    pub kind: GenerateErrorKind,
    pub message: String,
}

impl GenerateError {
    pub fn new(kind: GenerateErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unsupported_value(found: &str) -> Self {
        Self::new(
            GenerateErrorKind::UnsupportedValue,
            format!("afx value of kind {found} cannot be rendered as fusion"),
        )
    }

    pub fn invalid_meta_payload(directive: &str, found: &str) -> Self {
        Self::new(
            GenerateErrorKind::InvalidMetaPayload,
            format!("{directive} only supports string payloads, {found} found"),
        )
    }

    pub fn invalid_spread(found: &str) -> Self {
        Self::new(
            GenerateErrorKind::InvalidSpread,
            format!("spreads only support expression payloads, {found} found"),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateErrorKind {
    /// A value kind that has no Fusion rendering reached the dispatcher.
    UnsupportedValue,
    /// `@key`, `@path` or `@children` carried something other than a string.
    InvalidMetaPayload,
    /// A spread carried something other than an expression.
    InvalidSpread,
}
