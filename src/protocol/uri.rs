//! Document identity conversion.
//!
//! The client addresses documents by percent-encoded URI. Internally the
//! decoded form is the key, so `file:///a%20b.go` and the path it names
//! agree with each other.

use std::fmt;
use std::path::Path;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use url::Url;

use crate::error::{PositionError, PositionResult};

/// Characters that must stay escaped in a protocol URI.
const URI_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-decoded document URI.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceUri(String);

impl SourceUri {
    /// Decode a protocol URI.
    ///
    /// Fails on a `%` that is not followed by two hex digits and on escapes
    /// that decode to invalid UTF-8.
    pub fn from_protocol(uri: &str) -> PositionResult<Self> {
        check_escapes(uri)?;
        let decoded = percent_decode_str(uri)
            .decode_utf8()
            .map_err(|err| PositionError::invalid_uri(uri, err.to_string()))?;
        Ok(Self(decoded.into_owned()))
    }

    /// Build a `file://` URI for an absolute path.
    pub fn from_file_path(path: &Path) -> PositionResult<Self> {
        let url = Url::from_file_path(path).map_err(|()| {
            PositionError::invalid_uri(path.display().to_string(), "not an absolute path")
        })?;
        Self::from_protocol(url.as_str())
    }

    /// Encode back into protocol form.
    pub fn to_protocol(&self) -> String {
        utf8_percent_encode(&self.0, URI_ESCAPE).to_string()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check_escapes(uri: &str) -> PositionResult<()> {
    let bytes = uri.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|&(_, &b)| b == b'%') {
        let well_formed = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(PositionError::invalid_uri(
                uri,
                format!("malformed escape at byte {i}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("file:///src/main.go", "file:///src/main.go")]
    #[case::space("file:///my%20project/a.go", "file:///my project/a.go")]
    #[case::lowercase_hex("file:///a%2fb", "file:///a/b")]
    #[case::multibyte("file:///%E3%81%82.txt", "file:///あ.txt")]
    fn decodes_protocol_uri(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(SourceUri::from_protocol(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case::bad_hex("file:///a%zz")]
    #[case::truncated("file:///a%2")]
    #[case::trailing_percent("file:///a%")]
    #[case::invalid_utf8("file:///%ff")]
    fn rejects_malformed_uri(#[case] input: &str) {
        assert!(matches!(
            SourceUri::from_protocol(input),
            Err(PositionError::InvalidUri { .. })
        ));
    }

    #[test]
    fn protocol_form_round_trips() {
        let uri = SourceUri::from_protocol("file:///my%20project/100%25.go").unwrap();
        assert_eq!(uri.as_str(), "file:///my project/100%.go");
        assert_eq!(uri.to_protocol(), "file:///my%20project/100%25.go");
    }

    #[test]
    fn from_file_path_requires_absolute_path() {
        let uri = SourceUri::from_file_path(Path::new("/tmp/a b.txt")).unwrap();
        assert_eq!(uri.as_str(), "file:///tmp/a b.txt");
        assert!(SourceUri::from_file_path(Path::new("relative.txt")).is_err());
    }
}
