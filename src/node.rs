use std::collections::BTreeMap;

use tracing::debug;

use crate::error::BuildError;
use crate::kind::Kind;
use crate::validate::validate;

/// Attribute name to value. Keys keep the case the caller supplied.
pub type Attributes = BTreeMap<String, String>;

/// Collects `(name, value)` pairs into an [`Attributes`] map.
pub fn attrs<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A validated, unmaterialized document node.
///
/// Nodes are immutable once constructed; every constructor validates its input
/// before returning, so an invalid tree can not be built through this API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    kind: Kind,
    attributes: Attributes,
    children: Vec<Node>,
}

/// The TEXT kind: a bare payload with no attributes and no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
}

/// Confirms a caller-declared label names `kind`, ignoring case.
pub fn type_check(kind: Kind, label: &str) -> Result<(), BuildError> {
    if label.to_uppercase() == kind.label() {
        Ok(())
    } else {
        Err(BuildError::TypeMismatch {
            expected: kind,
            found: label.to_string(),
        })
    }
}

impl Node {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Element(element) => element.kind,
            Node::Text(_) => Kind::Text,
        }
    }

    /// Always empty for TEXT nodes.
    pub fn attributes(&self) -> &Attributes {
        static EMPTY: Attributes = BTreeMap::new();
        match self {
            Node::Element(element) => &element.attributes,
            Node::Text(_) => &EMPTY,
        }
    }

    /// Always empty for TEXT nodes; their payload is in [`Node::as_text`].
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.content),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl Element {
    /// Builds an element of `kind` from a caller-declared `label`.
    ///
    /// The label is checked first, then the attributes are validated against
    /// the kind's base-plus-extension set. TEXT can not be built this way,
    /// use [`Text::new`] or [`Text::with_label`].
    pub fn new(
        kind: Kind,
        label: &str,
        attributes: Attributes,
        children: Vec<Node>,
    ) -> Result<Self, BuildError> {
        type_check(kind, label)?;
        if kind == Kind::Text {
            return Err(BuildError::TextPayload { kind });
        }

        let allowed = kind.allowed_attributes();
        validate(kind, &allowed, &attributes)?;

        debug!(
            kind = %kind,
            attributes = attributes.len(),
            children = children.len(),
            "constructed element"
        );
        Ok(Self {
            kind,
            attributes,
            children,
        })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct TEXT children.
    pub fn text_children(&self) -> usize {
        self.children
            .iter()
            .filter(|child| matches!(child, Node::Text(_)))
            .count()
    }
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// TEXT variant constructor: label check, then the (necessarily empty)
    /// attribute map is validated against the empty allowed set.
    pub fn with_label(
        label: &str,
        attributes: &Attributes,
        content: impl Into<String>,
    ) -> Result<Self, BuildError> {
        type_check(Kind::Text, label)?;
        validate(Kind::Text, &Kind::Text.allowed_attributes(), attributes)?;
        Ok(Self::new(content))
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}
