use std::borrow::Cow;

use tracing::{trace, warn};

use crate::config::MaterializeOptions;
use crate::node::{Element, Node};

/// A host document that platform nodes are created in.
///
/// `set_text_content` must follow DOM semantics and replace every existing
/// child of the element with a single text node.
pub trait Document {
    type Node: Clone;
    type Error;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    fn create_text_node(&mut self, text: &str) -> Result<Self::Node, Self::Error>;

    fn set_attribute(
        &mut self,
        element: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn set_text_content(&mut self, element: &Self::Node, text: &str) -> Result<(), Self::Error>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node)
        -> Result<(), Self::Error>;
}

/// Turns validated [`Node`] trees into platform nodes.
///
/// Materializing never touches the tree itself and can be repeated; each call
/// produces a fresh, detached fragment.
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    options: MaterializeOptions,
}

impl Materializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MaterializeOptions) -> Self {
        Self { options }
    }

    /// Elements become platform elements. A root TEXT node becomes a platform text node.
    pub fn materialize<D: Document>(
        &self,
        document: &mut D,
        node: &Node,
    ) -> Result<D::Node, D::Error> {
        match node {
            Node::Element(element) => self.materialize_element(document, element),
            Node::Text(text) => document.create_text_node(text.content()),
        }
    }

    fn materialize_element<D: Document>(
        &self,
        document: &mut D,
        element: &Element,
    ) -> Result<D::Node, D::Error> {
        let tag = element.kind().tag();
        let platform = document.create_element(tag)?;

        for (name, value) in element.attributes() {
            let name: Cow<'_, str> = if self.options.lowercase_attribute_names {
                Cow::Owned(name.to_lowercase())
            } else {
                Cow::Borrowed(name)
            };
            document.set_attribute(&platform, &name, value)?;
        }

        let mut text_set = false;
        for child in element.children() {
            match child {
                Node::Text(text) => {
                    if text_set {
                        warn!(tag = tag, "text child overwrites earlier text content");
                    }
                    document.set_text_content(&platform, text.content())?;
                    text_set = true;
                }
                Node::Element(child) => {
                    let rendered = self.materialize_element(document, child)?;
                    document.append_child(&platform, &rendered)?;
                }
            }
        }

        trace!(
            tag = tag,
            attributes = element.attributes().len(),
            children = element.children().len(),
            "materialized element"
        );
        Ok(platform)
    }
}

/// Materializes with default options. See [`Materializer::materialize`].
pub fn materialize<D: Document>(document: &mut D, node: &Node) -> Result<D::Node, D::Error> {
    Materializer::default().materialize(document, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::dom::MemoryDocument;
    use crate::node::{attrs, Attributes};

    fn render(materializer: &Materializer, node: &Node) -> (MemoryDocument, crate::dom::NodeId) {
        let mut document = MemoryDocument::new();
        let root = match materializer.materialize(&mut document, node) {
            Ok(root) => root,
            Err(never) => match never {},
        };
        (document, root)
    }

    #[test]
    fn coerced_text_becomes_text_content() {
        let node = build("div", Attributes::new(), "hello").unwrap();
        let (doc, root) = render(&Materializer::new(), &node);
        assert_eq!(doc.tag(root), Some("div"));
        assert_eq!(doc.text_content(root), "hello");
        assert_eq!(doc.outer_html(root), "<div>hello</div>");
    }

    #[test]
    fn list_items_keep_their_order() {
        let node = build(
            "ul",
            Attributes::new(),
            vec![
                build("li", Attributes::new(), "Item 1").unwrap(),
                build("li", Attributes::new(), "Item 2").unwrap(),
            ],
        )
        .unwrap();
        let (doc, root) = render(&Materializer::new(), &node);

        assert_eq!(doc.tag(root), Some("ul"));
        let items = doc.children(root);
        assert_eq!(items.len(), 2);
        assert_eq!(doc.tag(items[0]), Some("li"));
        assert_eq!(doc.text_content(items[0]), "Item 1");
        assert_eq!(doc.tag(items[1]), Some("li"));
        assert_eq!(doc.text_content(items[1]), "Item 2");
    }

    #[test]
    fn materialized_root_is_left_detached() {
        let node = build(
            "div",
            Attributes::new(),
            build("span", Attributes::new(), "inside").unwrap(),
        )
        .unwrap();
        let (doc, root) = render(&Materializer::new(), &node);
        assert_eq!(doc.parent(root), None);
        assert_eq!(doc.parent(doc.children(root)[0]), Some(root));
    }

    #[test]
    fn last_text_child_wins() {
        let node = build(
            "p",
            Attributes::new(),
            vec![
                build("text", Attributes::new(), "first").unwrap(),
                build("text", Attributes::new(), "second").unwrap(),
            ],
        )
        .unwrap();
        let (doc, root) = render(&Materializer::new(), &node);
        assert_eq!(doc.text_content(root), "second");
        assert_eq!(doc.children(root).len(), 1);
    }

    #[test]
    fn later_text_replaces_earlier_elements() {
        let node = build(
            "div",
            Attributes::new(),
            vec![
                build("br", Attributes::new(), ()).unwrap(),
                build("text", Attributes::new(), "after").unwrap(),
            ],
        )
        .unwrap();
        let (doc, root) = render(&Materializer::new(), &node);
        assert_eq!(doc.outer_html(root), "<div>after</div>");
    }

    #[test]
    fn elements_after_text_are_appended() {
        let node = build(
            "label",
            Attributes::new(),
            vec![
                build("text", Attributes::new(), "Name").unwrap(),
                build("br", Attributes::new(), ()).unwrap(),
            ],
        )
        .unwrap();
        let (doc, root) = render(&Materializer::new(), &node);
        assert_eq!(doc.outer_html(root), "<label>Name<br></label>");
    }

    #[test]
    fn attribute_names_are_lowercased_by_default() {
        let node = build("div", attrs([("CLASS", "x"), ("Id", "main")]), ()).unwrap();

        let (doc, root) = render(&Materializer::new(), &node);
        assert_eq!(doc.attribute(root, "class"), Some("x"));
        assert_eq!(doc.attribute(root, "id"), Some("main"));
        assert_eq!(doc.attribute(root, "CLASS"), None);

        let lower = build("div", attrs([("class", "x"), ("id", "main")]), ()).unwrap();
        let (lower_doc, lower_root) = render(&Materializer::new(), &lower);
        assert_eq!(doc.outer_html(root), lower_doc.outer_html(lower_root));

        assert_eq!(node.attributes()["CLASS"], "x");
    }

    #[test]
    fn attribute_case_can_be_preserved() {
        let node = build("div", attrs([("CLASS", "x")]), ()).unwrap();
        let materializer =
            Materializer::with_options(MaterializeOptions::new().preserve_attribute_case());
        let (doc, root) = render(&materializer, &node);
        assert_eq!(doc.attribute(root, "CLASS"), Some("x"));
        assert_eq!(doc.attribute(root, "class"), None);
    }

    #[test]
    fn materializing_twice_yields_distinct_equal_fragments() {
        let node = build(
            "form",
            attrs([("action", "/go"), ("method", "post")]),
            vec![
                build("label", attrs([("for", "name")]), "Name").unwrap(),
                build("input", attrs([("id", "name"), ("type", "text")]), ()).unwrap(),
            ],
        )
        .unwrap();
        let snapshot = node.clone();

        let mut doc = MemoryDocument::new();
        let first = materialize(&mut doc, &node).unwrap();
        let second = materialize(&mut doc, &node).unwrap();

        assert_ne!(first, second);
        assert_eq!(doc.outer_html(first), doc.outer_html(second));
        assert_eq!(node, snapshot);
    }

    #[test]
    fn root_text_becomes_a_text_node() {
        let node = build("text", Attributes::new(), "loose").unwrap();
        let (doc, root) = render(&Materializer::new(), &node);
        assert_eq!(doc.tag(root), None);
        assert_eq!(doc.text_content(root), "loose");
    }
}
