//! Text position utilities.
//!
//! This module provides the conversion layer between the two ways a location
//! inside a document is addressed:
//! - Byte offsets into the raw UTF-8 content (token streams, syntax trees)
//! - LSP positions with UTF-16 code unit columns (the client)
//!
//! Internally lines are 1-based; LSP lines are 0-based. The shift happens in
//! [`position`] and nowhere else.

mod line_index;
pub mod position;

pub use line_index::{LineIndex, TokenPosition};
pub use position::{
    ByteRange, from_token_position, offset_to_position, to_offset, to_offset_with, to_position,
    to_token_position,
};
