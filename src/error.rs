//! Error handling types for posbridge
//!
//! All conversion failures are deterministic: retrying with the same input
//! never succeeds, so callers turn them into an empty result instead.

use thiserror::Error;

/// Errors raised while converting between positions, offsets and locations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The requested line does not exist in the document.
    ///
    /// `line` is expressed in the caller's numbering: 0-based for LSP
    /// positions, 1-based for token positions.
    #[error("Line not found: {line}")]
    LineNotFound { line: usize },

    /// The requested column lies past the end of its line
    #[error(
        "Column {character} out of range on line {line} (line length {line_length})"
    )]
    ColumnOutOfRange {
        line: usize,
        character: usize,
        line_length: usize,
    },

    /// A document identity could not be decoded
    #[error("Invalid URI {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// Coordinates that cannot address anything (negative, zero-based token columns, ...)
    #[error("Invalid position: {message}")]
    InvalidPosition { message: String },

    /// No open document has this URI
    #[error("Document not found: {uri}")]
    DocumentNotFound { uri: String },

    /// No open document owns this global position
    #[error("Position {pos} does not belong to any open document")]
    PositionNotMapped { pos: usize },
}

/// Result type for position conversions
pub type PositionResult<T> = Result<T, PositionError>;

/// Helper functions for common error patterns
impl PositionError {
    /// Create an invalid URI error
    pub fn invalid_uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        PositionError::InvalidUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid position error
    pub fn invalid_position(message: impl Into<String>) -> Self {
        PositionError::InvalidPosition {
            message: message.into(),
        }
    }

    /// Create a document not found error
    pub fn document_not_found(uri: impl Into<String>) -> Self {
        PositionError::DocumentNotFound { uri: uri.into() }
    }
}

/// Errors raised while loading conversion settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML or has unexpected values
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_input() {
        assert_eq!(
            PositionError::ColumnOutOfRange {
                line: 0,
                character: 10,
                line_length: 2
            }
            .to_string(),
            "Column 10 out of range on line 0 (line length 2)"
        );
        assert_eq!(
            PositionError::invalid_uri("file:///a%zz", "invalid escape").to_string(),
            "Invalid URI file:///a%zz: invalid escape"
        );
    }
}
