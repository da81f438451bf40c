use super::attribute::{Attribute, Prop};

/// Separator that marks a node identifier as a Fusion prototype name
/// (`Vendor.Site:Component`) rather than a plain markup tag.
pub const PROTOTYPE_SEPARATOR: char = ':';

/// A single AFX value.
///
/// Nodes and text appear as children, while expressions, strings and
/// booleans are what attribute values are made of. Comments survive
/// parsing so that tooling can see them, but never produce output.
#[derive(Debug, Clone, PartialEq)]
pub enum Afx {
    /// `<tag ...>` or `<Vendor.Site:Prototype ...>`
    Node(Node),
    /// `{code}`; the code is kept verbatim, never evaluated.
    Expression(String),
    /// A quoted attribute value with escapes already resolved.
    String(String),
    /// Raw character data between tags.
    Text(String),
    /// A bare attribute such as `<input disabled/>`.
    Boolean(bool),
    /// `<!-- ... -->`
    Comment(String),
}

impl Afx {
    /// Kind name for diagnostic messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Afx::Node(_) => "node",
            Afx::Expression(_) => "expression",
            Afx::String(_) => "string",
            Afx::Text(_) => "text",
            Afx::Boolean(_) => "boolean",
            Afx::Comment(_) => "comment",
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Afx::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Afx::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn expression(code: impl Into<String>) -> Self {
        Afx::Expression(code.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Afx::String(text.into())
    }

    pub fn text(raw: impl Into<String>) -> Self {
        Afx::Text(raw.into())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Afx::Comment(text.into())
    }
}

impl From<Node> for Afx {
    fn from(node: Node) -> Self {
        Afx::Node(node)
    }
}

impl From<bool> for Afx {
    fn from(b: bool) -> Self {
        Afx::Boolean(b)
    }
}

/// A markup element with its attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub identifier: String,
    pub self_closing: bool,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Afx>,
}

impl Node {
    /// An element written with an explicit closing tag.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            self_closing: false,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An element written as `<identifier ... />`.
    pub fn self_closing(identifier: impl Into<String>) -> Self {
        Self {
            self_closing: true,
            ..Self::new(identifier)
        }
    }

    pub fn with_prop(mut self, identifier: impl Into<String>, value: impl Into<Afx>) -> Self {
        self.attributes
            .push(Attribute::Prop(Prop::new(identifier, value)));
        self
    }

    pub fn with_spread(mut self, payload: impl Into<Afx>) -> Self {
        self.attributes.push(Attribute::Spread(payload.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Afx>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Whether the identifier names a Fusion prototype instead of a tag.
    pub fn is_prototype(&self) -> bool {
        self.identifier.contains(PROTOTYPE_SEPARATOR)
    }

    /// The last prop on this node named `identifier`, if any.
    pub fn prop(&self, identifier: &str) -> Option<&Prop> {
        self.attributes.iter().rev().find_map(|attr| match attr {
            Attribute::Prop(prop) if prop.identifier == identifier => Some(prop),
            _ => None,
        })
    }
}

/// The top-level sequence of values produced from one AFX source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub values: Vec<Afx>,
}

impl Document {
    pub fn new(values: Vec<Afx>) -> Self {
        Self { values }
    }
}
