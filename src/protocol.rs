//! Boundary between LSP records and document offsets.
//!
//! - `uri`: protocol document URIs to percent-decoded source URIs and back
//! - `convert`: ranges and locations, one endpoint at a time

mod convert;
mod uri;

pub use convert::{
    from_protocol_location, from_protocol_range, to_protocol_location, to_protocol_range,
};
pub use uri::SourceUri;
