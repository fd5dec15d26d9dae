//! The capability contract every participating type implements.
//!
//! ## Menu
//!
//! - [`TrackPath`]: a stable, code-defined type tag (static access).
//! - [`DynamicTrackPath`]: object-safe access to the tag, blanket-implemented.
//! - [`Trackable`]: the serialize side of the contract, with helpers for the
//!   common "some attributes are plain values, some are trackable objects"
//!   pattern.
//! - [`FromRecord`]: the reconstruct side, one factory per concrete type,
//!   dispatched through the [registry](crate::registry).
//! - [`impl_track_path!`](crate::impl_track_path): implements [`TrackPath`]
//!   with explicit path strings.

// -----------------------------------------------------------------------------
// Modules

mod from_record;
mod track_path;
mod trackable;

// -----------------------------------------------------------------------------
// Exports

pub use from_record::FromRecord;
pub use track_path::{DynamicTrackPath, TrackPath};
pub use trackable::Trackable;
