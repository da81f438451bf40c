//! Fusion code generation.
//!
//! The generator walks an AFX tree and produces Fusion source text. It
//! never evaluates expressions; `{code}` is re-serialized as `${code}`.
//!
//! A list of sibling values (the document itself, or a node's content
//! children) becomes nothing more than its single value, or a
//! `Neos.Fusion:Join` when several values remain after whitespace
//! normalization. Nodes become `Neos.Fusion:Tag` objects or instances of
//! the prototype they name; see [`attributes`] for how their attributes
//! are ordered.

use std::borrow::Cow;

use crate::ast::node::Afx;
use crate::error::GenerateError;

pub mod attributes;
mod node;

/// Prototype wrapping two or more sibling values.
const JOIN_PROTOTYPE: &str = "Neos.Fusion:Join";

/// Fusion for an empty list of children.
const EMPTY_STRING_LITERAL: &str = "''";

/// Generate Fusion for a list of top-level AFX values with default
/// options.
///
/// ```rust
/// use afx_fusion::{generate, parse};
///
/// let document = parse("<h1/>").unwrap();
/// let fusion = generate(&document.values).unwrap();
/// assert_eq!(fusion, "Neos.Fusion:Tag {\n    tagName = 'h1'\n    selfClosingTag = true\n}");
/// ```
pub fn generate(values: &[Afx]) -> Result<String, GenerateError> {
    generate_with_options(values, &GenerateOptions::default())
}

/// Generate Fusion with a custom base indentation or indentation unit.
///
/// The base indentation is applied to every nested line, never to the
/// first one, so the output can be pasted after `prop = ` in an existing
/// Fusion file.
///
/// ```rust
/// use afx_fusion::{generate_with_options, parse, GenerateOptions};
///
/// let document = parse("<br/>").unwrap();
/// let options = GenerateOptions::new().indentation("  ").indent_unit("\t");
/// let fusion = generate_with_options(&document.values, &options).unwrap();
/// assert_eq!(fusion, "Neos.Fusion:Tag {\n  \ttagName = 'br'\n  \tselfClosingTag = true\n  }");
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(values = values.len()))]
pub fn generate_with_options(
    values: &[Afx],
    options: &GenerateOptions,
) -> Result<String, GenerateError> {
    if values.iter().all(is_blank) {
        return Ok(EMPTY_STRING_LITERAL.to_string());
    }

    let generator = Generator { options };
    generator.render_list(values, &options.indentation)
}

/// A document made only of these renders as `''`, even when the
/// whitespace does not touch a newline.
fn is_blank(value: &Afx) -> bool {
    match value {
        Afx::Comment(_) => true,
        Afx::Text(raw) => raw.trim().is_empty(),
        _ => false,
    }
}

// ── Generation options ──────────────────────────────────────────────────

/// Layout of the generated Fusion text.
///
/// Create with [`GenerateOptions::new()`] and chain builder methods:
///
/// ```rust
/// use afx_fusion::GenerateOptions;
///
/// let opts = GenerateOptions::new().indentation("    ").indent_unit("  ");
/// assert_eq!(opts.indent_unit, "  ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Indentation the output starts at. Defaults to none.
    pub indentation: String,

    /// Indentation added per nesting level. Defaults to four spaces.
    pub indent_unit: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            indentation: String::new(),
            indent_unit: "    ".to_string(),
        }
    }
}

impl GenerateOptions {
    /// Create a new `GenerateOptions` with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base indentation.
    pub fn indentation(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    /// Set the indentation added per nesting level.
    pub fn indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }
}

// ── Generator ───────────────────────────────────────────────────────────

/// Holds the options for one generation call. All other state lives in
/// the call frames that need it.
struct Generator<'a> {
    options: &'a GenerateOptions,
}

impl Generator<'_> {
    fn nested(&self, indentation: &str) -> String {
        format!("{indentation}{}", self.options.indent_unit)
    }

    /// Render any single value.
    fn render_value(&self, value: &Afx, indentation: &str) -> Result<String, GenerateError> {
        tracing::trace!(kind = value.kind_name(), "rendering value");

        match value {
            Afx::Node(node) => self.render_node(node, indentation),
            Afx::Expression(code) => Ok(node::expression_literal(code)),
            Afx::String(text) | Afx::Text(text) => Ok(node::string_literal(text)),
            Afx::Boolean(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            Afx::Comment(_) => Err(GenerateError::unsupported_value(value.kind_name())),
        }
    }

    /// Render sibling values as `''`, a single value, or a `Join`.
    fn render_list<'v>(
        &self,
        values: impl IntoIterator<Item = &'v Afx>,
        indentation: &str,
    ) -> Result<String, GenerateError> {
        let entries = normalize_list(values);

        match entries.as_slice() {
            [] => Ok(EMPTY_STRING_LITERAL.to_string()),
            [single] => self.render_value(single, indentation),
            _ => {
                let inner = self.nested(indentation);
                let mut fusion = String::from(JOIN_PROTOTYPE);
                fusion.push_str(" {\n");

                for (index, entry) in entries.iter().enumerate() {
                    let key = match entry_key(entry)? {
                        Some(key) => key.to_string(),
                        None => format!("item_{}", index + 1),
                    };
                    let value = self.render_value(entry, &inner)?;
                    fusion.push_str(&inner);
                    fusion.push_str(&key);
                    fusion.push_str(" = ");
                    fusion.push_str(&value);
                    fusion.push('\n');
                }

                fusion.push_str(indentation);
                fusion.push('}');
                Ok(fusion)
            }
        }
    }
}

/// The `@key` of a node entry, if it carries one.
fn entry_key(entry: &Afx) -> Result<Option<&str>, GenerateError> {
    let Some(prop) = entry.as_node().and_then(|node| node.prop("@key")) else {
        return Ok(None);
    };
    prop.value
        .as_string()
        .map(Some)
        .ok_or_else(|| GenerateError::invalid_meta_payload("@key", prop.value.kind_name()))
}

// ── Whitespace normalization ────────────────────────────────────────────

/// Normalize text entries and drop comments and text that ends up empty.
fn normalize_list<'v>(values: impl IntoIterator<Item = &'v Afx>) -> Vec<Cow<'v, Afx>> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Afx::Comment(_) => None,
            Afx::Text(raw) => {
                let text = normalize_text(raw);
                (!text.is_empty()).then(|| Cow::Owned(Afx::Text(text)))
            }
            other => Some(Cow::Borrowed(other)),
        })
        .collect()
}

/// Collapse whitespace that spans a line break.
///
/// A whitespace run containing a newline is removed at the start or end
/// of the text and replaced by a single space elsewhere. Runs without a
/// newline are kept as written.
pub fn normalize_text(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut rest = raw;

    while !rest.is_empty() {
        let run_len = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());

        if run_len == 0 {
            let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            result.push_str(&rest[..word_len]);
            rest = &rest[word_len..];
            continue;
        }

        let (run, tail) = rest.split_at(run_len);
        if !run.contains('\n') {
            result.push_str(run);
        } else if !result.is_empty() && !tail.is_empty() {
            result.push(' ');
        }
        rest = tail;
    }

    result
}
