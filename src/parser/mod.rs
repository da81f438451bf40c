//! AFX parser, built on [pest](https://pest.rs/).
//!
//! The grammar is defined in `afx.pest`. This module converts pest's
//! parse tree into the typed AST defined in [`crate::ast`].
//!
//! Use [`parse`] to convert source text into a [`Document`], which can
//! then be turned into Fusion via [`crate::generate`].

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::ast::attribute::{Attribute, Prop};
use crate::ast::node::{Afx, Document, Node};
use crate::ast::span::Span;
use crate::error::ParseError;

#[derive(Parser)]
#[grammar = "parser/afx.pest"]
struct AfxParser;

/// Parse AFX source text into a [`Document`].
///
/// Returns a list of [`ParseError`]s if the source contains invalid syntax.
/// Each error carries a source [`Span`] for diagnostic formatting.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Document, Vec<ParseError>> {
    let pairs = AfxParser::parse(Rule::document, source).map_err(|e| {
        let span = pest_span_to_span(&e);
        let mut error = ParseError::new(span, format!("parse error: {e}"));
        if span.start >= source.len() {
            error = error.with_hint(
                "input ended early; check for an unterminated tag, string or expression",
            );
        }
        vec![error]
    })?;

    let mut values = Vec::new();

    // The parser yields a single `document` pair wrapping the top-level
    // values and the trailing EOI.
    for pair in pairs {
        if pair.as_rule() == Rule::document {
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::EOI => break,
                    _ => values.push(build_value(inner)?),
                }
            }
        }
    }

    tracing::trace!(values = values.len(), "parsed afx document");
    Ok(Document::new(values))
}

fn pest_span_to_span(e: &pest::error::Error<Rule>) -> Span {
    match &e.location {
        pest::error::InputLocation::Pos(p) => Span::new(*p, *p + 1),
        pest::error::InputLocation::Span((s, e)) => Span::new(*s, *e),
    }
}

fn pair_span(pair: &Pair<Rule>) -> Span {
    let s = pair.as_span();
    Span::new(s.start(), s.end())
}

// -- Value building ------------------------------------------------------

fn build_value(pair: Pair<Rule>) -> Result<Afx, Vec<ParseError>> {
    let span = pair_span(&pair);
    let rule = pair.as_rule();

    match rule {
        Rule::text => Ok(Afx::Text(pair.as_str().to_string())),
        Rule::expression => Ok(Afx::Expression(inner_str(pair))),
        Rule::string => Ok(Afx::String(extract_string_content(pair))),
        Rule::comment => Ok(Afx::Comment(inner_str(pair))),
        Rule::node => build_node(pair).map(Afx::Node),
        _ => Err(vec![ParseError::new(
            span,
            format!("unexpected rule in value position: {rule:?}"),
        )]),
    }
}

fn build_node(pair: Pair<Rule>) -> Result<Node, Vec<ParseError>> {
    let mut node = Node::new(String::new());

    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::identifier => node.identifier = child.as_str().to_string(),
            Rule::prop => node.attributes.push(Attribute::Prop(build_prop(child)?)),
            Rule::spread => node
                .attributes
                .push(Attribute::Spread(Afx::Expression(inner_str(child)))),
            Rule::self_closing => node.self_closing = true,
            Rule::children => {
                for value in child.into_inner() {
                    node.children.push(build_value(value)?);
                }
            }
            Rule::closing_tag => check_closing_tag(&node.identifier, child)?,
            _ => {}
        }
    }

    Ok(node)
}

fn build_prop(pair: Pair<Rule>) -> Result<Prop, Vec<ParseError>> {
    let mut inner = pair.into_inner();
    let identifier = inner
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    // A prop written without `=` is a boolean flag.
    let value = match inner.next() {
        Some(value) => build_value(value)?,
        None => Afx::Boolean(true),
    };

    Ok(Prop { identifier, value })
}

fn check_closing_tag(expected: &str, pair: Pair<Rule>) -> Result<(), Vec<ParseError>> {
    let span = pair_span(&pair);
    let found = pair
        .into_inner()
        .next()
        .map(|p| p.as_str())
        .unwrap_or_default();

    if found == expected {
        return Ok(());
    }

    Err(vec![
        ParseError::new(
            span,
            format!("closing tag </{found}> does not match opening tag <{expected}>"),
        )
        .with_hint(format!("close the element with </{expected}>")),
    ])
}

// -- Helpers -------------------------------------------------------------

/// Text of the first inner pair, e.g. the code between `{` and `}`.
fn inner_str(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}

fn extract_string_content(pair: Pair<Rule>) -> String {
    // string = ${ "\"" ~ double_quoted ~ "\"" | "'" ~ single_quoted ~ "'" }
    let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");

    // A backslash keeps whatever character follows it verbatim.
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(ch);
        }
    }
    result
}
