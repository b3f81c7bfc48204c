//! Platform documents the materializer can target.

mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::{MemoryDocument, NodeId};
#[cfg(target_arch = "wasm32")]
pub use web::WebDocument;
