use serde::{Deserialize, Serialize};
use tower_lsp_server::ls_types;

use crate::error::PositionError;

/// LSP-style position within a text document.
///
/// `line` is 0-based, `character` counts UTF-16 code units from the start of
/// the line. `{ line: -1, character: -1 }` is the wire encoding of "no
/// position"; inside the crate that case is an `Option::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: i32,
    pub character: i32,
}

impl Position {
    /// Sentinel for an absent or invalid position.
    pub const ABSENT: Self = Self {
        line: -1,
        character: -1,
    };

    pub const fn new(line: i32, character: i32) -> Self {
        Self { line, character }
    }

    /// A negative line marks the position as absent.
    pub const fn is_absent(&self) -> bool {
        self.line < 0
    }

    pub fn from_option(position: Option<Position>) -> Self {
        position.unwrap_or(Self::ABSENT)
    }

    pub fn to_option(self) -> Option<Position> {
        (!self.is_absent()).then_some(self)
    }
}

impl TryFrom<ls_types::Position> for Position {
    type Error = PositionError;

    fn try_from(position: ls_types::Position) -> Result<Self, Self::Error> {
        let convert = |value: u32| {
            i32::try_from(value).map_err(|_| {
                PositionError::invalid_position(format!("{value} does not fit a wire position"))
            })
        };
        Ok(Self::new(convert(position.line)?, convert(position.character)?))
    }
}

impl TryFrom<Position> for ls_types::Position {
    type Error = PositionError;

    fn try_from(position: Position) -> Result<Self, Self::Error> {
        match (u32::try_from(position.line), u32::try_from(position.character)) {
            (Ok(line), Ok(character)) => Ok(ls_types::Position::new(line, character)),
            _ => Err(PositionError::invalid_position(format!(
                "{}:{} has no LSP representation",
                position.line, position.character
            ))),
        }
    }
}

/// A pair of positions. An `end` with a negative line is open-ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width range at `position`.
    pub const fn cursor(position: Position) -> Self {
        Self::new(position, position)
    }
}

impl TryFrom<ls_types::Range> for Range {
    type Error = PositionError;

    fn try_from(range: ls_types::Range) -> Result<Self, Self::Error> {
        Ok(Self::new(range.start.try_into()?, range.end.try_into()?))
    }
}

impl TryFrom<Range> for ls_types::Range {
    type Error = PositionError;

    fn try_from(range: Range) -> Result<Self, Self::Error> {
        Ok(ls_types::Range::new(
            range.start.try_into()?,
            range.end.try_into()?,
        ))
    }
}
