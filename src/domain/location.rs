use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tower_lsp_server::ls_types::{self, Uri};

use crate::domain::position::Range;
use crate::error::PositionError;

/// A document URI plus a range, as exchanged with the client.
///
/// The URI is kept in its protocol (percent-encoded) form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

impl Location {
    pub fn new(uri: impl Into<String>, range: Range) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

impl TryFrom<ls_types::Location> for Location {
    type Error = PositionError;

    fn try_from(location: ls_types::Location) -> Result<Self, Self::Error> {
        Ok(Self::new(location.uri.as_str(), location.range.try_into()?))
    }
}

impl TryFrom<Location> for ls_types::Location {
    type Error = PositionError;

    fn try_from(location: Location) -> Result<Self, Self::Error> {
        let uri = Uri::from_str(&location.uri)
            .map_err(|_| PositionError::invalid_uri(&location.uri, "not a valid URI"))?;
        Ok(ls_types::Location::new(uri, location.range.try_into()?))
    }
}
