use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Serialized form of a factory call: `{"type": "div", "props": {...}, "children": ...}`.
///
/// Only JSON objects deserialize into a description; positional arrays do not.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(try_from = "Map<String, Value>")]
pub struct Description {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<ChildrenDescription>,
}

/// Everything the `children` argument of the factory may be.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChildrenDescription {
    Text(String),
    Number(serde_json::Number),
    Many(Vec<ChildDescription>),
    One(Box<Description>),
}

/// One entry of a `children` array. Bare strings and numbers become TEXT nodes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChildDescription {
    Text(String),
    Number(serde_json::Number),
    Element(Box<Description>),
}

#[derive(Deserialize)]
struct DescriptionFields {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    props: Option<BTreeMap<String, String>>,
    #[serde(default)]
    children: Option<ChildrenDescription>,
}

impl TryFrom<Map<String, Value>> for Description {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: DescriptionFields = serde_json::from_value(Value::Object(map))?;
        Ok(Self {
            kind: fields.kind,
            props: fields.props,
            children: fields.children,
        })
    }
}

impl Description {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: None,
            children: None,
        }
    }
}
