//! # afx-fusion
//!
//! Compiles AFX, a JSX-like markup, into Neos Fusion source text.
//!
//! The crate is split into two stages:
//!
//! - **Parsing** turns AFX source into a typed tree ([`Document`] of
//!   [`Afx`] values).
//! - **Generation** walks that tree and writes Fusion: plain tags become
//!   `Neos.Fusion:Tag` objects, `Vendor.Site:Name` elements become
//!   instances of that prototype, and sibling lists become
//!   `Neos.Fusion:Join`s.
//!
//! Expressions are never evaluated; they are carried over verbatim.
//!
//! ## Quick start
//!
//! ```rust
//! use afx_fusion::convert;
//!
//! let fusion = convert(r#"<a href={props.link}>Home</a>"#).unwrap();
//! assert_eq!(
//!     fusion,
//!     "Neos.Fusion:Tag {\n    tagName = 'a'\n    attributes.href = ${props.link}\n    content = 'Home'\n}"
//! );
//! ```
//!
//! ## Compiled documents
//!
//! To generate the same source at several indentation levels, parse once
//! with [`CompiledAfx::compile`]:
//!
//! ```rust
//! use afx_fusion::{CompiledAfx, GenerateOptions};
//!
//! let compiled = CompiledAfx::compile("<br/>").unwrap();
//! let nested = compiled
//!     .to_fusion_with_options(&GenerateOptions::new().indentation("    "))
//!     .unwrap();
//! assert!(nested.ends_with("\n    }"));
//! ```

pub mod ast;
pub mod error;
pub mod generate;
mod parser;

pub use ast::attribute::{Attribute, Prop};
pub use ast::node::{Afx, Document, Node};
pub use ast::span::Span;
pub use error::{GenerateError, GenerateErrorKind, ParseError};
pub use generate::{GenerateOptions, generate, generate_with_options};
pub use parser::parse;

/// Parse AFX source and generate Fusion in a single step.
///
/// For repeated generation of the same source, prefer [`CompiledAfx`]
/// to avoid re-parsing.
pub fn convert(source: &str) -> Result<String, ConvertError> {
    convert_with_options(source, &GenerateOptions::default())
}

/// Parse AFX source and generate Fusion with custom options.
#[tracing::instrument(level = "debug", skip(source, options), fields(len = source.len()))]
pub fn convert_with_options(
    source: &str,
    options: &GenerateOptions,
) -> Result<String, ConvertError> {
    let document = parser::parse(source).map_err(ConvertError::Parse)?;
    generate_with_options(&document.values, options).map_err(ConvertError::Generate)
}

/// Combined error type returned by [`convert`] and [`convert_with_options`].
#[derive(Debug)]
pub enum ConvertError {
    /// The source is not valid AFX.
    Parse(Vec<ParseError>),
    /// The source parsed, but a node could not be turned into Fusion.
    Generate(GenerateError),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Parse(errors) => {
                for e in errors {
                    writeln!(f, "{e}")?;
                }
                Ok(())
            }
            ConvertError::Generate(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// A parsed AFX document that can be turned into Fusion repeatedly
/// without re-parsing.
///
/// ```rust
/// use afx_fusion::CompiledAfx;
///
/// let compiled = CompiledAfx::compile("<p>{props.text}</p>").unwrap();
/// assert_eq!(
///     compiled.to_fusion().unwrap(),
///     "Neos.Fusion:Tag {\n    tagName = 'p'\n    content = ${props.text}\n}"
/// );
/// ```
pub struct CompiledAfx {
    document: Document,
}

impl CompiledAfx {
    /// Parse source text into a compiled document.
    ///
    /// Returns parse errors if the source contains invalid syntax.
    pub fn compile(source: &str) -> Result<Self, Vec<ParseError>> {
        let document = parser::parse(source)?;
        Ok(Self { document })
    }

    /// Generate Fusion with default options.
    pub fn to_fusion(&self) -> Result<String, GenerateError> {
        generate(&self.document.values)
    }

    /// Generate Fusion with custom options.
    pub fn to_fusion_with_options(
        &self,
        options: &GenerateOptions,
    ) -> Result<String, GenerateError> {
        generate_with_options(&self.document.values, options)
    }

    /// Access the underlying tree for inspection or analysis.
    pub fn ast(&self) -> &Document {
        &self.document
    }
}
