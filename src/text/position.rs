//! Conversion between LSP positions and byte offsets.
//!
//! LSP columns count UTF-16 code units while documents are stored as UTF-8
//! bytes. Conversion walks the UTF-8 bytes of a single line and accounts for
//! surrogate pairs arithmetically: a rune at or above U+10000 is two UTF-16
//! units, anything else is one. No UTF-16 buffer is ever built.
//!
//! Bytes that are not valid UTF-8 are treated like U+FFFD, one byte at a
//! time, each counting as a single UTF-16 unit.

use crate::config::ColumnOverflow;
use crate::domain::Position;
use crate::error::{PositionError, PositionResult};

use super::line_index::{LineIndex, TokenPosition};

/// A range of byte offsets within one document.
///
/// `end == None` is an open range ("no end"), which is distinct from an end
/// at offset 0. No ordering between `start` and `end` is enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ByteRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl ByteRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// A zero-width range at `offset`.
    pub const fn cursor(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// A range without an end.
    pub const fn open(start: usize) -> Self {
        Self { start, end: None }
    }

    pub fn is_cursor(&self) -> bool {
        self.end == Some(self.start)
    }
}

/// Byte and UTF-16 widths of one decoded rune.
#[derive(Clone, Copy)]
struct Rune {
    len_utf8: usize,
    len_utf16: usize,
}

impl Rune {
    const INVALID: Self = Self {
        len_utf8: 1,
        len_utf16: 1,
    };

    fn of(ch: char) -> Self {
        Self {
            len_utf8: ch.len_utf8(),
            len_utf16: if u32::from(ch) >= 0x10000 { 2 } else { 1 },
        }
    }
}

/// Decode `bytes` one rune at a time.
fn runes(bytes: &[u8]) -> impl Iterator<Item = Rune> + '_ {
    bytes.utf8_chunks().flat_map(|chunk| {
        let valid = chunk.valid().chars().map(Rune::of);
        let invalid = chunk.invalid().iter().map(|_| Rune::INVALID);
        valid.chain(invalid)
    })
}

fn to_index(value: i32, what: &str) -> PositionResult<usize> {
    usize::try_from(value)
        .map_err(|_| PositionError::invalid_position(format!("negative {what}: {value}")))
}

/// Convert an LSP position to a byte offset.
///
/// The scan is restricted to the position's line and never crosses its
/// newline. A column equal to the line's UTF-16 length addresses the end of
/// the line; anything beyond is [`PositionError::ColumnOutOfRange`]. A column
/// pointing at the second unit of a surrogate pair resolves to the start of
/// that rune.
pub fn to_offset(bytes: &[u8], lines: &LineIndex, position: Position) -> PositionResult<usize> {
    let line = to_index(position.line, "line")?;
    let character = to_index(position.character, "character")?;

    let range = lines
        .line_range(line + 1)
        .ok_or(PositionError::LineNotFound { line })?;
    let line_start = range.start;
    let window = bytes
        .get(range)
        .ok_or(PositionError::LineNotFound { line })?;

    let mut units = 0;
    let mut offset = 0;
    for rune in runes(window) {
        units += rune.len_utf16;
        if units > character {
            return Ok(line_start + offset);
        }
        offset += rune.len_utf8;
    }

    if units == character {
        return Ok(line_start + offset);
    }

    log::trace!(
        target: "posbridge::position",
        "column {} past end of line {} ({} UTF-16 units)",
        character,
        line,
        units
    );
    Err(PositionError::ColumnOutOfRange {
        line,
        character,
        line_length: units,
    })
}

/// Convert an LSP position to a byte offset, applying `overflow` when the
/// column lies past the end of its line.
pub fn to_offset_with(
    bytes: &[u8],
    lines: &LineIndex,
    position: Position,
    overflow: ColumnOverflow,
) -> PositionResult<usize> {
    match (to_offset(bytes, lines, position), overflow) {
        (Err(PositionError::ColumnOutOfRange { line, .. }), ColumnOverflow::ClampToLineEnd) => lines
            .line_end(line + 1)
            .ok_or(PositionError::LineNotFound { line }),
        (result, _) => result,
    }
}

/// Convert a byte offset to an LSP position.
///
/// Returns `None` when `offset` lies past the end of the document. An offset
/// inside a multi-byte rune resolves to the column of that rune's start.
pub fn offset_to_position(bytes: &[u8], lines: &LineIndex, offset: usize) -> Option<Position> {
    let TokenPosition { line, column } = lines.line_col(offset)?;
    let window = bytes.get(lines.line_range(line)?)?;
    let byte_column = column - 1;

    let mut units = 0;
    let mut consumed = 0;
    for rune in runes(window) {
        consumed += rune.len_utf8;
        if consumed > byte_column {
            break;
        }
        units += rune.len_utf16;
    }

    Some(Position::new(
        i32::try_from(line - 1).ok()?,
        i32::try_from(units).ok()?,
    ))
}

/// Convert a byte offset to an LSP position, producing [`Position::ABSENT`]
/// for a missing or out-of-bounds offset.
pub fn to_position(bytes: &[u8], lines: &LineIndex, offset: Option<usize>) -> Position {
    offset
        .and_then(|offset| offset_to_position(bytes, lines, offset))
        .unwrap_or(Position::ABSENT)
}

/// Convert a 1-based line and byte column to a byte offset.
///
/// No UTF-16 accounting happens here: the column is already in bytes.
pub fn from_token_position(lines: &LineIndex, position: TokenPosition) -> PositionResult<usize> {
    let range = lines
        .line_range(position.line)
        .ok_or(PositionError::LineNotFound {
            line: position.line,
        })?;
    let column = position.column.checked_sub(1).ok_or_else(|| {
        PositionError::invalid_position(format!(
            "token column must be 1-based, got 0 on line {}",
            position.line
        ))
    })?;

    let offset = range.start + column;
    if offset > range.end {
        return Err(PositionError::ColumnOutOfRange {
            line: position.line,
            character: position.column,
            line_length: range.len(),
        });
    }
    Ok(offset)
}

/// Resolve a byte offset to a 1-based line and byte column.
pub fn to_token_position(lines: &LineIndex, offset: usize) -> Option<TokenPosition> {
    lines.line_col(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn offset_of(text: &str, line: i32, character: i32) -> PositionResult<usize> {
        let lines = LineIndex::new(text.as_bytes());
        to_offset(text.as_bytes(), &lines, Position::new(line, character))
    }

    fn position_of(text: &str, offset: usize) -> Position {
        let lines = LineIndex::new(text.as_bytes());
        to_position(text.as_bytes(), &lines, Some(offset))
    }

    #[rstest]
    #[case::start_of_first_line(0, 0, 0)]
    #[case::middle_of_second_line(1, 1, 5)]
    #[case::end_of_first_line(0, 3, 3)]
    #[case::start_of_final_empty_line(2, 0, 8)]
    fn ascii_document_to_offset(#[case] line: i32, #[case] character: i32, #[case] expected: usize) {
        assert_eq!(offset_of("abc\ndef\n", line, character), Ok(expected));
    }

    #[test]
    fn ascii_document_to_position() {
        assert_eq!(position_of("abc\ndef\n", 5), Position::new(1, 1));
        assert_eq!(position_of("abc\ndef\n", 3), Position::new(0, 3));
        assert_eq!(position_of("abc\ndef\n", 8), Position::new(2, 0));
    }

    #[rstest]
    #[case::before_emoji(0, 0)]
    #[case::first_surrogate(1, 1)]
    // Second unit of the pair clamps back to the start of the emoji
    #[case::second_surrogate(2, 1)]
    #[case::after_emoji(3, 5)]
    #[case::end_of_line(4, 6)]
    fn astral_rune_to_offset(#[case] character: i32, #[case] expected: usize) {
        // 🙂 is U+1F642: 4 bytes in UTF-8, 2 units in UTF-16
        assert_eq!(offset_of("a🙂b\n", 0, character), Ok(expected));
    }

    #[test]
    fn surrogate_pair_counts_as_two_units() {
        assert_eq!(offset_of("🙂a", 0, 2), Ok(4));
        assert_eq!(position_of("🙂a", 4), Position::new(0, 2));
    }

    #[rstest]
    #[case::before_emoji(1, 1)]
    #[case::mid_emoji(3, 1)]
    #[case::after_emoji(5, 3)]
    #[case::end_of_line(6, 4)]
    fn astral_rune_to_position(#[case] offset: usize, #[case] expected_character: i32) {
        assert_eq!(
            position_of("a🙂b\n", offset),
            Position::new(0, expected_character)
        );
    }

    #[test]
    fn bmp_multibyte_counts_one_unit() {
        // Each hiragana is 3 bytes and 1 UTF-16 unit
        assert_eq!(offset_of("あいうx\n", 0, 3), Ok(9));
        assert_eq!(position_of("あいうx\n", 9), Position::new(0, 3));
    }

    #[test]
    fn column_past_end_of_line_is_an_error() {
        assert_eq!(
            offset_of("ab\n", 0, 10),
            Err(PositionError::ColumnOutOfRange {
                line: 0,
                character: 10,
                line_length: 2,
            })
        );
    }

    #[test]
    fn column_never_reaches_into_next_line() {
        // Column 3 on "ab" would be the 'c' of the next line if the scan crossed the newline
        assert!(matches!(
            offset_of("ab\ncd", 0, 3),
            Err(PositionError::ColumnOutOfRange { .. })
        ));
    }

    #[test]
    fn missing_line_is_not_found() {
        assert_eq!(
            offset_of("abc\n", 5, 0),
            Err(PositionError::LineNotFound { line: 5 })
        );
    }

    #[test]
    fn negative_coordinates_are_rejected() {
        assert!(matches!(
            offset_of("abc", -1, 0),
            Err(PositionError::InvalidPosition { .. })
        ));
        assert!(matches!(
            offset_of("abc", 0, -3),
            Err(PositionError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn absent_and_out_of_bounds_offsets_give_sentinel() {
        let text = "abc";
        let lines = LineIndex::new(text.as_bytes());
        assert_eq!(to_position(text.as_bytes(), &lines, None), Position::ABSENT);
        assert_eq!(
            to_position(text.as_bytes(), &lines, Some(4)),
            Position::ABSENT
        );
        assert_eq!(offset_to_position(text.as_bytes(), &lines, 4), None);
    }

    #[test]
    fn invalid_utf8_counts_one_unit_per_byte() {
        let bytes = b"a\xff\xfeb";
        let lines = LineIndex::new(bytes);
        assert_eq!(to_offset(bytes, &lines, Position::new(0, 3)), Ok(3));
        assert_eq!(
            to_position(bytes, &lines, Some(3)),
            Position::new(0, 3)
        );
    }

    #[test]
    fn clamp_policy_lands_on_line_end() {
        let text = "ab\ncd";
        let lines = LineIndex::new(text.as_bytes());
        let position = Position::new(0, 10);
        assert_eq!(
            to_offset_with(
                text.as_bytes(),
                &lines,
                position,
                ColumnOverflow::ClampToLineEnd
            ),
            Ok(2)
        );
        assert!(
            to_offset_with(text.as_bytes(), &lines, position, ColumnOverflow::Reject).is_err()
        );
    }

    #[test]
    fn clamp_policy_does_not_hide_missing_lines() {
        let text = "ab";
        let lines = LineIndex::new(text.as_bytes());
        assert_eq!(
            to_offset_with(
                text.as_bytes(),
                &lines,
                Position::new(3, 0),
                ColumnOverflow::ClampToLineEnd
            ),
            Err(PositionError::LineNotFound { line: 3 })
        );
    }

    #[rstest]
    #[case::first_byte(TokenPosition::new(1, 1), Ok(0))]
    #[case::second_line(TokenPosition::new(2, 2), Ok(5))]
    #[case::end_of_line(TokenPosition::new(2, 4), Ok(7))]
    #[case::past_line(TokenPosition::new(1, 6), Err(PositionError::ColumnOutOfRange { line: 1, character: 6, line_length: 3 }))]
    #[case::missing_line(TokenPosition::new(9, 1), Err(PositionError::LineNotFound { line: 9 }))]
    fn token_position_to_offset(
        #[case] position: TokenPosition,
        #[case] expected: PositionResult<usize>,
    ) {
        let lines = LineIndex::new(b"abc\ndef\n");
        assert_eq!(from_token_position(&lines, position), expected);
    }

    #[test]
    fn token_column_zero_is_invalid() {
        let lines = LineIndex::new(b"abc");
        assert!(matches!(
            from_token_position(&lines, TokenPosition::new(1, 0)),
            Err(PositionError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn token_position_round_trip() {
        let lines = LineIndex::new("x\nあい\n".as_bytes());
        for offset in 0..=lines.len() {
            let token = to_token_position(&lines, offset).unwrap();
            assert_eq!(from_token_position(&lines, token), Ok(offset));
        }
    }

    #[test]
    fn character_is_monotonic_within_a_line() {
        let text = "a🙂bあc";
        let mut previous = 0;
        for offset in 0..=text.len() {
            let position = position_of(text, offset);
            assert_eq!(position.line, 0);
            assert!(position.character >= previous);
            previous = position.character;
        }
    }

    #[test]
    fn byte_range_constructors() {
        assert!(ByteRange::cursor(4).is_cursor());
        assert_eq!(ByteRange::open(2).end, None);
        assert!(!ByteRange::new(1, 3).is_cursor());
    }
}
