use super::node::Afx;

/// Marks an identifier as a meta attribute (`@if`, `@key`, `@path`, ...).
pub const META_PREFIX: char = '@';

/// One entry of a node's attribute list.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// `name="value"`, `name={expr}` or bare `name`.
    Prop(Prop),
    /// `{...expr}`: merge every property of the expression in here.
    /// Only [`Afx::Expression`] payloads can be rendered.
    Spread(Afx),
    /// Props grouped behind a spread so they can be rendered as a nested
    /// data structure. Never produced by the parser.
    PropList(Vec<Prop>),
}

impl Attribute {
    pub fn as_prop(&self) -> Option<&Prop> {
        match self {
            Attribute::Prop(prop) => Some(prop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub identifier: String,
    pub value: Afx,
}

impl Prop {
    pub fn new(identifier: impl Into<String>, value: impl Into<Afx>) -> Self {
        Self {
            identifier: identifier.into(),
            value: value.into(),
        }
    }

    /// Meta props carry directives for the generator or the Fusion
    /// runtime rather than plain data.
    pub fn is_meta(&self) -> bool {
        self.identifier.starts_with(META_PREFIX)
    }
}
