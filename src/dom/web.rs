use wasm_bindgen::JsCast;

use crate::error::DomError;
use crate::materialize::Document;

/// The browser `document`, as seen by the materializer.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Uses the document of the current window.
    pub fn from_window() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::DomUnavailable)?;
        let document = window.document().ok_or(DomError::DomUnavailable)?;
        Ok(Self::new(document))
    }
}

impl Document for WebDocument {
    type Node = web_sys::Node;
    type Error = DomError;

    fn create_element(&mut self, tag: &str) -> Result<web_sys::Node, DomError> {
        Ok(self.document.create_element(tag)?.into())
    }

    fn create_text_node(&mut self, text: &str) -> Result<web_sys::Node, DomError> {
        Ok(self.document.create_text_node(text).into())
    }

    fn set_attribute(
        &mut self,
        element: &web_sys::Node,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let element = element
            .dyn_ref::<web_sys::Element>()
            .ok_or_else(|| DomError::Js(format!("cannot set `{name}` on a non-element node")))?;
        element.set_attribute(name, value)?;
        Ok(())
    }

    fn set_text_content(&mut self, element: &web_sys::Node, text: &str) -> Result<(), DomError> {
        element.set_text_content(Some(text));
        Ok(())
    }

    fn append_child(
        &mut self,
        parent: &web_sys::Node,
        child: &web_sys::Node,
    ) -> Result<(), DomError> {
        parent.append_child(child)?;
        Ok(())
    }
}
