#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod dispatch;
pub mod record;
pub mod registry;
pub mod trackable;

mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use dispatch::{
    DeserializeError, deserialize_list, deserialize_state, deserialize_state_strict,
    serialize_list,
};
pub use record::{Record, TAG_FIELD, Value, ValueKind};
pub use trackable::{DynamicTrackPath, FromRecord, TrackPath, Trackable};

/// Implementation details used by this crate's macros. Not public API.
#[cfg(feature = "auto_register")]
pub mod __macro_exports {
    pub use inventory;
}
