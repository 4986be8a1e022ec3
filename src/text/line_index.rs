use std::ops::Range;

/// A 1-based line and 1-based byte column.
///
/// This is the coordinate system token streams report positions in. The
/// column counts bytes, not characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPosition {
    pub line: usize,
    pub column: usize,
}

impl TokenPosition {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Pre-computed line start offsets for one version of a document.
///
/// Lines are 1-based. Only `\n` terminates a line; a `\r` before it is an
/// ordinary byte of the line. A document always has `count('\n') + 1`
/// lines, so the empty document has one (empty) line and a trailing newline
/// opens a final empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset where each line starts. First entry is always 0.
    line_starts: Vec<usize>,
    /// Total length of the content in bytes.
    len: usize,
}

impl LineIndex {
    /// Build a line index by scanning `bytes` for newlines.
    pub fn new(bytes: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            bytes
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );

        Self {
            line_starts,
            len: bytes.len(),
        }
    }

    /// Length of the indexed content in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of lines, including a final empty line after a trailing newline.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of the first byte of `line` (1-based).
    ///
    /// Returns `None` for line 0 and for lines past the end of the document.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        let index = line.checked_sub(1)?;
        self.line_starts.get(index).copied()
    }

    /// Byte offset one past the last byte of `line`, excluding its newline.
    pub fn line_end(&self, line: usize) -> Option<usize> {
        self.line_range(line).map(|range| range.end)
    }

    /// Byte range covered by `line` (1-based), excluding its newline.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let index = line.checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.len, |&next| next - 1);
        Some(start..end)
    }

    /// Resolve a byte offset to its 1-based line and 1-based byte column.
    ///
    /// `len` itself is a valid offset (end of file). Anything beyond it
    /// returns `None`.
    pub fn line_col(&self, offset: usize) -> Option<TokenPosition> {
        if offset > self.len {
            return None;
        }

        // line_starts[0] == 0 <= offset, so the partition point is at least 1
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        Some(TokenPosition {
            line: index + 1,
            column: offset - self.line_starts[index] + 1,
        })
    }
}
