//! Conversion between LSP positions and document byte offsets.
//!
//! LSP clients address a document by 0-based line and UTF-16 column; token
//! streams and syntax trees use byte offsets into the UTF-8 content. This
//! crate converts between the two without ever building UTF-16 text.

pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod text;

pub use config::{ColumnOverflow, ConversionSettings};
pub use document::{Document, DocumentStore, Pos, Span};
pub use domain::{Location, Position, Range};
pub use error::{ConfigError, PositionError, PositionResult};
pub use protocol::{
    SourceUri, from_protocol_location, from_protocol_range, to_protocol_location,
    to_protocol_range,
};
pub use text::{ByteRange, LineIndex, TokenPosition};
