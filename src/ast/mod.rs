//! Abstract syntax tree for AFX markup.
//!
//! The tree has two layers:
//!
//! - **Values** ([`node`]): an [`Afx`] is either a markup [`Node`] or one
//!   of the leaf kinds (expression, string, text, boolean, comment).
//!   A [`Document`] is the ordered list of values at the top level.
//! - **Attributes** ([`attribute`]): the props and spreads written on a
//!   node's opening tag.
//!
//! The tree is produced once by the parser and only read afterwards; the
//! generator never mutates it.

pub mod attribute;
pub mod node;
pub mod span;

// Convenience re-exports
pub use attribute::{Attribute, Prop};
pub use node::{Afx, Document, Node};
pub use span::Span;
