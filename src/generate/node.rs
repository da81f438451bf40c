//! Rendering of a single markup node into a Fusion object.

use crate::ast::attribute::{Attribute, Prop};
use crate::ast::node::{Afx, Node};
use crate::error::GenerateError;

use super::Generator;
use super::attributes;

/// Prototype rendered for plain markup tags.
const TAG_PROTOTYPE: &str = "Neos.Fusion:Tag";
/// Prototype holding the props grouped behind a spread.
const DATA_STRUCTURE_PROTOTYPE: &str = "Neos.Fusion:DataStructure";
/// Key prefix for props that become HTML attributes of a tag.
const TAG_ATTRIBUTE_PREFIX: &str = "attributes.";

impl Generator<'_> {
    pub(super) fn render_node(
        &self,
        node: &Node,
        indentation: &str,
    ) -> Result<String, GenerateError> {
        let inner = self.nested(indentation);
        let mut fusion = String::new();

        let prefix = if node.is_prototype() {
            fusion.push_str(&node.identifier);
            fusion.push_str(" {\n");
            ""
        } else {
            fusion.push_str(TAG_PROTOTYPE);
            fusion.push_str(" {\n");
            push_line(&mut fusion, &inner, "tagName", &string_literal(&node.identifier));
            if node.self_closing {
                push_line(&mut fusion, &inner, "selfClosingTag", "true");
            }
            TAG_ATTRIBUTE_PREFIX
        };

        let prepared = attributes::prepare(&node.attributes)?;
        let mut spread_index = 1;

        for attribute in &prepared.attributes {
            match attribute {
                Attribute::Prop(prop) => {
                    let key = if prop.is_meta() {
                        prop.identifier.clone()
                    } else {
                        format!("{prefix}{}", prop.identifier)
                    };
                    let value = self.render_value(&prop.value, &inner)?;
                    push_line(&mut fusion, &inner, &key, &value);
                }
                Attribute::Spread(payload) => {
                    let Afx::Expression(code) = payload else {
                        return Err(GenerateError::invalid_spread(payload.kind_name()));
                    };
                    let key = format!("{prefix}@apply.spread_{spread_index}");
                    push_line(&mut fusion, &inner, &key, &expression_literal(code));
                    spread_index += 1;
                }
                Attribute::PropList(props) => {
                    let key = format!("{prefix}@apply.spread_{spread_index}");
                    let value = self.render_prop_list(props, &inner)?;
                    push_line(&mut fusion, &inner, &key, &value);
                    spread_index += 1;
                }
            }
        }

        let (path_children, content_children) = partition_children(&node.children)?;

        for (path, child) in &path_children {
            tracing::debug!(path = %path, child = %child.identifier, "routing child to path");
            let value = self.render_node(child, &inner)?;
            push_line(&mut fusion, &inner, path, &value);
        }

        if !content_children.is_empty() {
            let value = self.render_list(content_children, &inner)?;
            push_line(&mut fusion, &inner, &prepared.children_property, &value);
        }

        fusion.push_str(indentation);
        fusion.push('}');
        Ok(fusion)
    }

    /// `Neos.Fusion:DataStructure { ... }` with each prop unprefixed.
    fn render_prop_list(&self, props: &[Prop], indentation: &str) -> Result<String, GenerateError> {
        let inner = self.nested(indentation);
        let mut fusion = String::from(DATA_STRUCTURE_PROTOTYPE);
        fusion.push_str(" {\n");
        for prop in props {
            let value = self.render_value(&prop.value, &inner)?;
            push_line(&mut fusion, &inner, &prop.identifier, &value);
        }
        fusion.push_str(indentation);
        fusion.push('}');
        Ok(fusion)
    }
}

/// Split children into those placed by `@path` and everything else.
///
/// A path used twice keeps its first position but renders the later child.
fn partition_children(
    children: &[Afx],
) -> Result<(Vec<(String, &Node)>, Vec<&Afx>), GenerateError> {
    let mut path_children: Vec<(String, &Node)> = Vec::new();
    let mut content_children = Vec::new();

    for child in children {
        let routed = child
            .as_node()
            .and_then(|node| Some((node, node.prop("@path")?)));
        let Some((node, prop)) = routed else {
            content_children.push(child);
            continue;
        };
        let path = prop
            .value
            .as_string()
            .ok_or_else(|| GenerateError::invalid_meta_payload("@path", prop.value.kind_name()))?;

        match path_children.iter_mut().find(|(existing, _)| existing == path) {
            Some(slot) => slot.1 = node,
            None => path_children.push((path.to_string(), node)),
        }
    }

    Ok((path_children, content_children))
}

fn push_line(fusion: &mut String, indentation: &str, key: &str, value: &str) {
    fusion.push_str(indentation);
    fusion.push_str(key);
    fusion.push_str(" = ");
    fusion.push_str(value);
    fusion.push('\n');
}

/// Single-quoted Fusion string with `\` and `'` escaped.
pub(super) fn string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('\'');
    for ch in text.chars() {
        if ch == '\\' || ch == '\'' {
            literal.push('\\');
        }
        literal.push(ch);
    }
    literal.push('\'');
    literal
}

pub(super) fn expression_literal(code: &str) -> String {
    format!("${{{code}}}")
}
