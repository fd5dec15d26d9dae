//! The plain data representation produced by serialization.
//!
//! ## Menu
//!
//! - [`Value`]: a tagged union of every shape a record field may hold.
//! - [`ValueKind`]: a pure enumeration of [`Value`] shapes, used in errors.
//! - [`Record`]: an insertion-ordered mapping from field names to [`Value`]s,
//!   optionally carrying the type tag of the object that produced it.
//! - [`FromRecordError`]: the error returned when reconstructing a concrete
//!   type from a record fails.
//!
//! A record is acyclic by construction: every nested value is owned, so an
//! object graph with cycles cannot be expressed here.

// -----------------------------------------------------------------------------
// Modules

mod from_record_error;
mod record;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use from_record_error::FromRecordError;
pub use record::{FieldIter, Record, TAG_FIELD};
pub use value::{Value, ValueKind};
