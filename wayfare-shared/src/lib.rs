pub mod pii;
pub mod venue;

pub use venue::{VenueKind, VenueRef};
