mod document;
mod node;

pub use document::Document;
pub use node::{ElementId, ElementKind, Node};
