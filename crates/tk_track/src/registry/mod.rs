//! Runtime registry mapping type tags to reconstruction factories.
//!
//! ## Menu
//!
//! - [`TrackMeta`]: Per-type metadata bundling the tag strings with a
//!   [`FromRecord`](crate::FromRecord) factory.
//! - [`TrackRegistry`]: A container for storing and querying `TrackMeta`s,
//!   indexed by [`TypeId`](core::any::TypeId), type path, and short name.
//! - [`TrackRegistryArc`]: A cloneable, lock-protected registry handle
//!   (`std` feature).
//!
//! ## auto_register
//!
//! See [`TrackRegistry::auto_register`] .
//!
//! We use the [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//! Types opt in with [`register_trackable!`](crate::register_trackable).

// -----------------------------------------------------------------------------
// Modules

mod track_meta;
mod track_registry;

// -----------------------------------------------------------------------------
// Exports

pub use track_meta::TrackMeta;
pub use track_registry::TrackRegistry;

#[cfg(feature = "std")]
pub use track_registry::TrackRegistryArc;

#[cfg(feature = "auto_register")]
pub use track_registry::AutoTrackMeta;
