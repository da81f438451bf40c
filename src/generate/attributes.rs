//! The attribute pipeline.
//!
//! A node's attributes go through three passes before rendering:
//!
//! 1. [`extract_and_filter`] drops `@key` and `@path` (they belong to the
//!    parent) and pulls the children property name out of `@children`.
//! 2. [`expand_shorthand_meta_paths`] numbers repeated `@if` / `@process`
//!    directives so they land on distinct Fusion paths.
//! 3. [`group_for_spreads`] keeps props written before the first spread
//!    in place, groups props that trail a spread into a
//!    [`Attribute::PropList`] and moves every meta prop to the end.
//!
//! Each pass takes the whole sequence and returns a new one; the input
//! tree is never touched.

use std::collections::HashMap;

use crate::ast::attribute::{Attribute, Prop};
use crate::error::GenerateError;

/// Property that receives a node's content children unless `@children`
/// names another one.
pub const DEFAULT_CHILDREN_PROPERTY: &str = "content";

/// Meta path segments that get a numbered sub path when expanded.
const SHORTHAND_META_PATHS: [&str; 2] = ["@if", "@process"];

/// Attributes ready for rendering, plus where the children go.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAttributes {
    pub attributes: Vec<Attribute>,
    pub children_property: String,
}

/// Run all three passes over one node's attributes.
pub fn prepare(attributes: &[Attribute]) -> Result<PreparedAttributes, GenerateError> {
    let (filtered, children_property) = extract_and_filter(attributes)?;
    let expanded = expand_shorthand_meta_paths(filtered);
    Ok(PreparedAttributes {
        attributes: group_for_spreads(expanded),
        children_property,
    })
}

/// Remove `@key` / `@path` and consume `@children`.
///
/// Returns the remaining attributes and the children property name.
pub fn extract_and_filter(
    attributes: &[Attribute],
) -> Result<(Vec<Attribute>, String), GenerateError> {
    let mut children_property = DEFAULT_CHILDREN_PROPERTY.to_string();
    let mut remaining = Vec::with_capacity(attributes.len());

    for attribute in attributes {
        if let Attribute::Prop(prop) = attribute {
            match prop.identifier.as_str() {
                "@key" | "@path" => {
                    if prop.value.as_string().is_none() {
                        return Err(GenerateError::invalid_meta_payload(
                            &prop.identifier,
                            prop.value.kind_name(),
                        ));
                    }
                    continue;
                }
                "@children" => {
                    children_property = prop
                        .value
                        .as_string()
                        .ok_or_else(|| {
                            GenerateError::invalid_meta_payload("@children", prop.value.kind_name())
                        })?
                        .to_string();
                    continue;
                }
                _ => {}
            }
        }
        remaining.push(attribute.clone());
    }

    Ok((remaining, children_property))
}

/// Append `.<name>_<n>` to props whose last path segment is a shorthand
/// meta path, counting per original identifier.
///
/// `@if` becomes `@if.if_1`, a second `@if` on the same node becomes
/// `@if.if_2`. `@if.hasItems` is left alone.
pub fn expand_shorthand_meta_paths(attributes: Vec<Attribute>) -> Vec<Attribute> {
    let mut counters: HashMap<String, usize> = HashMap::new();

    attributes
        .into_iter()
        .map(|attribute| match attribute {
            Attribute::Prop(prop) => Attribute::Prop(expand_prop(prop, &mut counters)),
            other => other,
        })
        .collect()
}

fn expand_prop(prop: Prop, counters: &mut HashMap<String, usize>) -> Prop {
    let last_segment = prop
        .identifier
        .rsplit('.')
        .next()
        .unwrap_or(prop.identifier.as_str());

    if !SHORTHAND_META_PATHS.contains(&last_segment) {
        return prop;
    }

    let name = last_segment.trim_start_matches('@').to_string();
    let counter = counters.entry(prop.identifier.clone()).or_insert(0);
    *counter += 1;

    Prop {
        identifier: format!("{}.{name}_{counter}", prop.identifier),
        value: prop.value,
    }
}

/// Order attributes for rendering.
///
/// Props before the first spread stay where they are. Consecutive spreads
/// stay direct. Props following a spread are collected into a
/// [`Attribute::PropList`] that is emitted right before the next spread,
/// or after everything else if none follows. Meta props come last, in
/// their original order.
pub fn group_for_spreads(attributes: Vec<Attribute>) -> Vec<Attribute> {
    let mut output = Vec::with_capacity(attributes.len());
    let mut meta = Vec::new();
    let mut collected: Vec<Prop> = Vec::new();
    let mut spread_seen = false;

    for attribute in attributes {
        match attribute {
            Attribute::Prop(prop) if prop.is_meta() => meta.push(Attribute::Prop(prop)),
            Attribute::Prop(prop) if spread_seen => collected.push(prop),
            Attribute::Prop(prop) => output.push(Attribute::Prop(prop)),
            // A prop list built elsewhere is a group boundary just like a spread.
            boundary @ (Attribute::Spread(_) | Attribute::PropList(_)) => {
                if !collected.is_empty() {
                    output.push(Attribute::PropList(std::mem::take(&mut collected)));
                }
                output.push(boundary);
                spread_seen = true;
            }
        }
    }

    if !collected.is_empty() {
        output.push(Attribute::PropList(collected));
    }

    if spread_seen {
        tracing::debug!(
            entries = output.len(),
            meta = meta.len(),
            "grouped attributes around spreads"
        );
    }

    output.extend(meta);
    output
}
