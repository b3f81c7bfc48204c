//! Declarative builder for a small, closed set of document elements.
//!
//! Trees are described with [`build`] (kind label, attributes, children),
//! validated as they are constructed, and turned into real document nodes by
//! a [`Materializer`] targeting any [`Document`]: the browser DOM on `wasm32`,
//! or the in-memory [`MemoryDocument`] elsewhere.

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
use pyo3::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod builder;
mod config;
pub mod dom;
mod error;
mod kind;
mod materialize;
mod node;
mod types;
mod validate;

pub use builder::{build, Builder, Content};
pub use config::{BuildOptions, MaterializeOptions, TextChildren};
pub use dom::{MemoryDocument, NodeId};
pub use error::{BuildError, DomError};
pub use kind::Kind;
pub use materialize::{materialize, Document, Materializer};
pub use node::{attrs, type_check, Attributes, Element, Node, Text};
pub use types::{ChildDescription, ChildrenDescription, Description};
pub use validate::{validate, AllowedAttributes};

/// Builds a JSON description and serializes its materialized form as HTML.
pub fn to_html(
    description_json: &str,
    build_options: BuildOptions,
    materialize_options: MaterializeOptions,
) -> Result<String, BuildError> {
    let node = Builder::with_options(build_options).build_json(description_json)?;
    let mut document = MemoryDocument::new();
    let materializer = Materializer::with_options(materialize_options);
    let root = match materializer.materialize(&mut document, &node) {
        Ok(root) => root,
        Err(never) => match never {},
    };
    Ok(document.outer_html(root))
}

/// Options for the host bindings, which take plain flags.
#[cfg(any(test, feature = "python", target_arch = "wasm32"))]
pub(crate) fn options_from_flags(
    lowercase_attribute_names: bool,
    reject_multiple_text: bool,
) -> (BuildOptions, MaterializeOptions) {
    let build_options = BuildOptions {
        text_children: if reject_multiple_text {
            TextChildren::Reject
        } else {
            TextChildren::Overwrite
        },
    };
    let materialize_options = MaterializeOptions {
        lowercase_attribute_names,
    };
    (build_options, materialize_options)
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
fn render_html(description_json: String) -> PyResult<String> {
    to_html(
        &description_json,
        BuildOptions::default(),
        MaterializeOptions::default(),
    )
    .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
fn render_html_with_options(
    description_json: String,
    lowercase_attribute_names: bool,
    reject_multiple_text: bool,
) -> PyResult<String> {
    let (build_options, materialize_options) =
        options_from_flags(lowercase_attribute_names, reject_multiple_text);
    to_html(&description_json, build_options, materialize_options)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pymodule]
fn el_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(render_html, m)?)?;
    m.add_function(wrap_pyfunction!(render_html_with_options, m)?)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn materialize_wasm(description_json: &str) -> Result<JsValue, JsValue> {
    materialize_with_options_wasm(description_json, true, false)
}

/// Builds and materializes a description into a detached DOM node. Attaching
/// it to the page is up to the caller.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn materialize_with_options_wasm(
    description_json: &str,
    lowercase_attribute_names: bool,
    reject_multiple_text: bool,
) -> Result<JsValue, JsValue> {
    let (build_options, materialize_options) =
        options_from_flags(lowercase_attribute_names, reject_multiple_text);
    let node = Builder::with_options(build_options)
        .build_json(description_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut document = dom::WebDocument::from_window()?;
    let rendered =
        Materializer::with_options(materialize_options).materialize(&mut document, &node)?;
    Ok(rendered.into())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn to_html_wasm(description_json: &str) -> Result<String, JsValue> {
    to_html(
        description_json,
        BuildOptions::default(),
        MaterializeOptions::default(),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))
}
