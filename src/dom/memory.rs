use std::convert::Infallible;
use std::fmt::Write;

use crate::kind::Kind;
use crate::materialize::Document;

/// Handle to a node owned by a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
}

/// An arena-backed document for hosts without a browser.
///
/// Nodes are never freed; detached fragments simply stay in the arena until
/// the document is dropped. Passing a [`NodeId`] from another document panics.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    slots: Vec<Slot>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.slots.push(Slot { data, parent: None });
        NodeId(self.slots.len() - 1)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.slots[id.0].data
    }

    /// Tag name, `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in the order they were first set.
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match self.data(id) {
            NodeData::Element { attributes, .. } => attributes,
            NodeData::Text(_) => &[],
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.data(id) {
            NodeData::Element { children, .. } => children,
            NodeData::Text(_) => &[],
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].parent
    }

    /// Concatenated text of all descendant text nodes, like DOM `textContent`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { children, .. } => {
                for child in children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Serializes the subtree rooted at `id` as HTML.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(text) => out.push_str(&escape(text, false)),
            NodeData::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value, true));
                }
                out.push('>');

                if is_void(tag) {
                    return;
                }
                for child in children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.slots[id.0].parent.take() {
            if let NodeData::Element { children, .. } = &mut self.slots[parent.0].data {
                children.retain(|child| *child != id);
            }
        }
    }
}

fn is_void(tag: &str) -> bool {
    Kind::ALL
        .into_iter()
        .any(|kind| kind.is_void() && kind.tag().eq_ignore_ascii_case(tag))
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Document for MemoryDocument {
    type Node = NodeId;
    type Error = Infallible;

    fn create_element(&mut self, tag: &str) -> Result<NodeId, Infallible> {
        Ok(self.push(NodeData::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }))
    }

    fn create_text_node(&mut self, text: &str) -> Result<NodeId, Infallible> {
        Ok(self.push(NodeData::Text(text.to_string())))
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<(), Infallible> {
        if let NodeData::Element { attributes, .. } = &mut self.slots[element.0].data {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
        Ok(())
    }

    fn set_text_content(&mut self, element: &NodeId, text: &str) -> Result<(), Infallible> {
        let old = match &mut self.slots[element.0].data {
            NodeData::Text(data) => {
                *data = text.to_string();
                return Ok(());
            }
            NodeData::Element { children, .. } => std::mem::take(children),
        };
        for child in old {
            self.slots[child.0].parent = None;
        }
        if !text.is_empty() {
            let text = self.create_text_node(text)?;
            self.append_child(element, &text)?;
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), Infallible> {
        self.detach(*child);
        let NodeData::Element { children, .. } = &mut self.slots[parent.0].data else {
            return Ok(());
        };
        children.push(*child);
        self.slots[child.0].parent = Some(*parent);
        Ok(())
    }
}
