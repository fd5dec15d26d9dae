//! Serde impls for [`Value`](crate::Value) and [`Record`](crate::Record).
//!
//! A record maps to a serde map whose first entry, keyed by
//! [`TAG_FIELD`](crate::TAG_FIELD), carries the type tag; the remaining
//! entries are the fields in insertion order. Deserialization folds the
//! reserved key back into the record's tag, so the in-memory shape (tag is
//! not a field) survives any self-describing format.

mod de;
mod ser;
