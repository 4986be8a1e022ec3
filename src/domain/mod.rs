pub mod location;
pub mod position;

pub use location::Location;
pub use position::{Position, Range};
