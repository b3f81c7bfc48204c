use tracing::debug;

use crate::config::{BuildOptions, TextChildren};
use crate::error::BuildError;
use crate::kind::Kind;
use crate::node::{Attributes, Element, Node, Text};
use crate::types::{ChildDescription, ChildrenDescription, Description};

/// The `children` argument of [`build`].
///
/// Strings and numbers convert to [`Content::Text`] and are wrapped as a TEXT
/// node before dispatch; everything else passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Empty,
    Text(String),
    Node(Node),
    Nodes(Vec<Node>),
}

impl Content {
    /// Wraps bare text as a TEXT node.
    fn wrap_text(self) -> Self {
        match self {
            Content::Text(text) => Content::Node(Text::new(text).into()),
            other => other,
        }
    }

    fn into_children(self) -> Vec<Node> {
        match self {
            Content::Empty => Vec::new(),
            Content::Text(text) => vec![Text::new(text).into()],
            Content::Node(node) => vec![node],
            Content::Nodes(nodes) => nodes,
        }
    }
}

impl From<()> for Content {
    fn from(_: ()) -> Self {
        Content::Empty
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&String> for Content {
    fn from(text: &String) -> Self {
        Content::Text(text.clone())
    }
}

macro_rules! integer_content {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Content {
                fn from(number: $ty) -> Self {
                    Content::Text(number.to_string())
                }
            }
        )*
    };
}

integer_content!(i32, i64, u32, u64, usize);

impl From<f64> for Content {
    fn from(number: f64) -> Self {
        Content::Text(float_text(number))
    }
}

/// Formats a float the way JavaScript's `String(number)` does: integral values
/// carry no fraction, magnitudes from 1e21 and below 1e-6 use exponent form.
pub(crate) fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(-n as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let dot = if rest.is_empty() { "" } else { "." };
        let exp_sign = if n > 0 { "+" } else { "-" };
        format!("{first}{dot}{rest}e{exp_sign}{}", (n - 1).abs())
    };
    format!("{sign}{body}")
}

/// Same coercion as the numeric `From` impls, for numbers read from JSON.
fn json_number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => float_text(value),
        _ => number.to_string(),
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Node(node)
    }
}

impl From<Vec<Node>> for Content {
    fn from(nodes: Vec<Node>) -> Self {
        Content::Nodes(nodes)
    }
}

impl<const N: usize> From<[Node; N]> for Content {
    fn from(nodes: [Node; N]) -> Self {
        Content::Nodes(nodes.into())
    }
}

impl From<Option<Node>> for Content {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Content::Empty, Content::Node)
    }
}

/// Normalizes caller input and dispatches to the variant constructors.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    options: BuildOptions,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Builds a validated node of the kind named by `label` (any case).
    pub fn build(
        &self,
        label: &str,
        attributes: Attributes,
        content: impl Into<Content>,
    ) -> Result<Node, BuildError> {
        let kind = Kind::from_label(label)?;
        let content = content.into().wrap_text();

        match kind {
            Kind::Text => self.build_text(label, &attributes, content),
            _ => {
                let element = Element::new(kind, label, attributes, content.into_children())?;
                self.check_text_children(&element)?;
                Ok(element.into())
            }
        }
    }

    fn build_text(
        &self,
        label: &str,
        attributes: &Attributes,
        content: Content,
    ) -> Result<Node, BuildError> {
        let payload = match content {
            Content::Empty => String::new(),
            Content::Text(text) => text,
            Content::Node(Node::Text(text)) => text.content().to_string(),
            Content::Node(Node::Element(_)) | Content::Nodes(_) => {
                return Err(BuildError::TextPayload { kind: Kind::Text });
            }
        };
        Ok(Text::with_label(label, attributes, payload)?.into())
    }

    fn check_text_children(&self, element: &Element) -> Result<(), BuildError> {
        let count = element.text_children();
        if self.options.text_children == TextChildren::Reject && count > 1 {
            return Err(BuildError::MultipleText {
                kind: element.kind(),
                count,
            });
        }
        Ok(())
    }

    /// Builds a tree from its serde description, bottom-up, through [`Builder::build`].
    pub fn build_description(&self, description: &Description) -> Result<Node, BuildError> {
        let attributes = description.props.clone().unwrap_or_default();
        let content = match &description.children {
            None => Content::Empty,
            Some(ChildrenDescription::Text(text)) => Content::Text(text.clone()),
            Some(ChildrenDescription::Number(number)) => Content::Text(json_number_text(number)),
            Some(ChildrenDescription::One(child)) => Content::Node(self.build_description(child)?),
            Some(ChildrenDescription::Many(items)) => Content::Nodes(
                items
                    .iter()
                    .map(|item| self.build_child(item))
                    .collect::<Result<_, _>>()?,
            ),
        };
        self.build(&description.kind, attributes, content)
    }

    fn build_child(&self, item: &ChildDescription) -> Result<Node, BuildError> {
        match item {
            ChildDescription::Text(text) => Ok(Text::new(text.as_str()).into()),
            ChildDescription::Number(number) => Ok(Text::new(json_number_text(number)).into()),
            ChildDescription::Element(description) => self.build_description(description),
        }
    }

    /// Parses a JSON description and builds it.
    pub fn build_json(&self, json: &str) -> Result<Node, BuildError> {
        let description: Description = serde_json::from_str(json)?;
        let node = self.build_description(&description)?;
        debug!(kind = %node.kind(), "built tree from description");
        Ok(node)
    }
}

/// Builds a node with default options. See [`Builder::build`].
pub fn build(
    label: &str,
    attributes: Attributes,
    content: impl Into<Content>,
) -> Result<Node, BuildError> {
    Builder::default().build(label, attributes, content)
}
