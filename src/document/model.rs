use std::fmt;
use std::num::NonZeroUsize;

use crate::config::ColumnOverflow;
use crate::domain::Position;
use crate::error::{PositionError, PositionResult};
use crate::protocol::SourceUri;
use crate::text::{self, ByteRange, LineIndex, TokenPosition};

/// A position that is unique across every document version in a store.
///
/// Each version occupies its own block of positions, so a `Pos` alone is
/// enough to find the document it belongs to. Zero is never a valid `Pos`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(NonZeroUsize);

impl Pos {
    /// The `index`-th position counting from the first valid one.
    pub const fn from_index(index: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(index))
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A range of global positions. `end == None` means no end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Pos,
    pub end: Option<Pos>,
}

/// One immutable version of a document: its bytes and their line index.
///
/// A content change produces a new `Document`; nothing here is mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct Document {
    uri: SourceUri,
    bytes: Vec<u8>,
    line_index: LineIndex,
    base: Pos,
}

impl Document {
    /// Create a standalone document whose positions start at the first `Pos`.
    pub fn new(uri: SourceUri, bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_base(uri, bytes, Pos::from_index(0))
    }

    /// Create a document whose offset 0 maps to `base`.
    pub fn with_base(uri: SourceUri, bytes: impl Into<Vec<u8>>, base: Pos) -> Self {
        let bytes = bytes.into();
        let line_index = LineIndex::new(&bytes);
        Self {
            uri,
            bytes,
            line_index,
            base,
        }
    }

    pub fn uri(&self) -> &SourceUri {
        &self.uri
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn base(&self) -> Pos {
        self.base
    }

    /// Global position of a byte offset; `len` (end of file) included.
    pub fn pos(&self, offset: usize) -> Option<Pos> {
        if offset > self.len() {
            return None;
        }
        let index = self.base.get().checked_add(offset)? - 1;
        Some(Pos::from_index(index))
    }

    /// Byte offset of a global position, if this document owns it.
    pub fn offset(&self, pos: Pos) -> Option<usize> {
        let offset = pos.get().checked_sub(self.base.get())?;
        (offset <= self.len()).then_some(offset)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.offset(pos).is_some()
    }

    /// Lift a byte range of this document to a span of global positions.
    pub fn span(&self, range: &ByteRange) -> PositionResult<Span> {
        let lift = |offset: usize| {
            self.pos(offset).ok_or_else(|| {
                PositionError::invalid_position(format!(
                    "offset {} outside {} ({} bytes)",
                    offset,
                    self.uri,
                    self.len()
                ))
            })
        };
        Ok(Span {
            start: lift(range.start)?,
            end: range.end.map(lift).transpose()?,
        })
    }

    /// Byte offset of the first byte of a 1-based line.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_index.line_start(line)
    }

    pub fn to_offset(&self, position: Position) -> PositionResult<usize> {
        text::to_offset(&self.bytes, &self.line_index, position)
    }

    pub fn to_offset_with(
        &self,
        position: Position,
        overflow: ColumnOverflow,
    ) -> PositionResult<usize> {
        text::to_offset_with(&self.bytes, &self.line_index, position, overflow)
    }

    pub fn to_position(&self, offset: Option<usize>) -> Position {
        text::to_position(&self.bytes, &self.line_index, offset)
    }

    pub fn from_token_position(&self, position: TokenPosition) -> PositionResult<usize> {
        text::from_token_position(&self.line_index, position)
    }

    pub fn to_token_position(&self, offset: usize) -> Option<TokenPosition> {
        text::to_token_position(&self.line_index, offset)
    }
}
