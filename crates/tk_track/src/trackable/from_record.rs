use crate::record::{FromRecordError, Record};
use crate::trackable::{TrackPath, Trackable};

/// The reconstruct side of the tracking capability contract.
///
/// Where [`Trackable::serialize`] turns a live object into a [`Record`],
/// `from_record` turns such a record back into a fresh instance. It is a
/// per-type factory rather than a method on [`Trackable`]: reconstruction
/// happens before any instance exists, so it cannot be object-safe.
/// Registries capture it as a monomorphized function pointer (see
/// [`TrackMeta::of`](crate::registry::TrackMeta::of)) to dispatch on type
/// tags at runtime.
///
/// # Strictness
///
/// With `strict == false`, implementations read the fields they know about
/// and ignore everything else; fields the implementation treats as optional
/// may fall back to defaults. With `strict == true`, the record's field set
/// must match the type's expected set exactly, both ways: a missing expected
/// field and an unexpected extra field are each an error. The type tag is
/// never counted as a field. [`Record::check_shape`] implements exactly this
/// check; call it first when `strict` is set.
pub trait FromRecord: Trackable + TrackPath + Sized {
    /// Reconstructs an instance from its serialized state.
    fn from_record(record: &Record, strict: bool) -> Result<Self, FromRecordError>;
}
