pub mod store;

pub(crate) mod model;

// Re-export main types
pub use model::{Document, Pos, Span};
pub use store::DocumentStore;
