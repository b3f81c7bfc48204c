use thiserror::Error;

use crate::kind::Kind;

/// Errors raised while turning caller input into a validated [`Node`](crate::Node).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unknown element type `{label}`")]
    UnknownKind { label: String },

    #[error("element type `{found}` does not match the {expected} kind")]
    TypeMismatch { expected: Kind, found: String },

    #[error("can't add attribute `{attribute}` to {kind}")]
    InvalidAttribute { attribute: String, kind: Kind },

    #[error("{kind} takes a string or number payload, not child nodes")]
    TextPayload { kind: Kind },

    #[error("{kind} has {count} text children, at most one is allowed")]
    MultipleText { kind: Kind, count: usize },

    #[error("invalid element description: {0}")]
    Description(#[from] serde_json::Error),
}

/// Errors produced by a platform document while materializing.
#[derive(Debug, Clone, Error)]
pub enum DomError {
    /// The DOM APIs are not accessible (e.g. outside of a browser).
    #[error("DOM is not available")]
    DomUnavailable,
    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DomError> for wasm_bindgen::JsValue {
    fn from(value: DomError) -> Self {
        match value {
            DomError::Js(msg) => Self::from(msg),
            other => Self::from(other.to_string()),
        }
    }
}
