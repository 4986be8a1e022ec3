use crate::document::{Document, DocumentStore, Span};
use crate::domain::{Location, Range};
use crate::error::{PositionError, PositionResult};
use crate::text::ByteRange;

use super::uri::SourceUri;

/// Convert a protocol range to a byte range of `document`.
///
/// - `end == start` reuses the start offset without scanning again
/// - `end.line < 0` gives an open range
/// - otherwise both endpoints are converted independently
///
/// Inverted ranges are passed through; rejecting them is up to the caller.
pub fn from_protocol_range(document: &Document, range: &Range) -> PositionResult<ByteRange> {
    let start = document.to_offset(range.start)?;
    let end = match range.end {
        end if end == range.start => Some(start),
        end if end.is_absent() => None,
        end => Some(document.to_offset(end)?),
    };
    Ok(ByteRange { start, end })
}

/// Convert a byte range of `document` to a protocol range.
///
/// An open end becomes [`Position::ABSENT`](crate::domain::Position::ABSENT).
pub fn to_protocol_range(document: &Document, range: &ByteRange) -> Range {
    Range::new(
        document.to_position(Some(range.start)),
        document.to_position(range.end),
    )
}

/// Convert a protocol location to a span of global positions.
///
/// The URI is decoded before any offset math, so a malformed URI fails with
/// [`PositionError::InvalidUri`] even if the range is fine.
pub fn from_protocol_location(
    store: &DocumentStore,
    location: &Location,
) -> PositionResult<Span> {
    let uri = SourceUri::from_protocol(&location.uri)?;
    let document = store
        .get(&uri)
        .ok_or_else(|| PositionError::document_not_found(uri.as_str()))?;
    let range = from_protocol_range(&document, &location.range)?;
    document.span(&range)
}

/// Convert a span back to a protocol location.
///
/// The document is the one owning `span.start`. An end owned by some other
/// document cannot be expressed in this location and becomes the absent end.
pub fn to_protocol_location(store: &DocumentStore, span: &Span) -> PositionResult<Location> {
    let (document, start) = store
        .resolve(span.start)
        .ok_or(PositionError::PositionNotMapped {
            pos: span.start.get(),
        })?;

    let end = span.end.and_then(|pos| {
        let offset = document.offset(pos);
        if offset.is_none() {
            log::debug!(
                target: "posbridge::convert",
                "End {} of span outside {}, dropping it",
                pos,
                document.uri()
            );
        }
        offset
    });

    Ok(Location::new(
        document.uri().to_protocol(),
        to_protocol_range(&document, &ByteRange { start, end }),
    ))
}
