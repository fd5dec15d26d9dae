//! Tag-dispatched serialization of heterogeneous trackable collections.
//!
//! [`serialize_list`] flattens a mixed sequence of trackables into tagged
//! [`Record`]s; [`deserialize_state`] and [`deserialize_list`] go the other
//! way, using a [`TrackRegistry`] to resolve each record's tag back to a
//! concrete type.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::record::{FromRecordError, Record};
use crate::registry::TrackRegistry;
use crate::trackable::Trackable;

// -----------------------------------------------------------------------------
// DeserializeError

/// Errors raised while resolving a [`Record`] back to a concrete trackable.
#[derive(Clone, Debug, PartialEq)]
pub enum DeserializeError {
    /// The record carries no type tag, so no type can be resolved.
    MissingTag,
    /// The record's tag does not match any registered type.
    UnknownTag {
        /// The unresolved type path tag.
        tag: String,
    },
    /// The tag resolved, but the type's factory rejected the record.
    FromRecord(FromRecordError),
}

impl fmt::Display for DeserializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTag => {
                write!(f, "record carries no type tag")
            }
            Self::UnknownTag { tag } => {
                write!(f, "no registered type with tag `{tag}`")
            }
            Self::FromRecord(err) => err.fmt(f),
        }
    }
}

impl core::error::Error for DeserializeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::FromRecord(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FromRecordError> for DeserializeError {
    #[inline]
    fn from(err: FromRecordError) -> Self {
        Self::FromRecord(err)
    }
}

// -----------------------------------------------------------------------------
// Serialize

/// Serializes a sequence of trackables into their tagged records,
/// preserving order.
///
/// ```
/// use tk_track::{Trackable, impl_track_path, serialize_list};
///
/// struct Ping;
/// impl_track_path!(Ping, "demo::Ping", "Ping");
/// impl Trackable for Ping {}
///
/// struct Pong;
/// impl_track_path!(Pong, "demo::Pong", "Pong");
/// impl Trackable for Pong {}
///
/// let items: [&dyn Trackable; 2] = [&Ping, &Pong];
/// let records = serialize_list(items);
///
/// assert_eq!(records[0].type_path(), Some("demo::Ping"));
/// assert_eq!(records[1].type_path(), Some("demo::Pong"));
/// ```
pub fn serialize_list<'a>(items: impl IntoIterator<Item = &'a dyn Trackable>) -> Vec<Record> {
    items.into_iter().map(Trackable::serialize).collect()
}

// -----------------------------------------------------------------------------
// Deserialize

fn deserialize_record(
    registry: &TrackRegistry,
    record: &Record,
    strict: bool,
) -> Result<Box<dyn Trackable>, DeserializeError> {
    let tag = record.type_path().ok_or(DeserializeError::MissingTag)?;
    let meta = registry
        .get_with_track_path(tag)
        .ok_or_else(|| DeserializeError::UnknownTag {
            tag: tag.to_string(),
        })?;

    let value = meta.deserialize(record, strict)?;
    debug_assert_eq!(value.ty_id(), meta.type_id());
    Ok(value)
}

/// Rebuilds a trackable from its serialized state, dispatching on the
/// record's type tag.
///
/// Fields the target type does not know about are ignored; use
/// [`deserialize_state_strict`] to reject them instead. The concrete type
/// behind the returned trait object is the one registered under the tag and
/// can be recovered with the downcast family on
/// [`dyn Trackable`](Trackable#impl-dyn+Trackable).
pub fn deserialize_state(
    registry: &TrackRegistry,
    record: &Record,
) -> Result<Box<dyn Trackable>, DeserializeError> {
    deserialize_record(registry, record, false)
}

/// Rebuilds a trackable from its serialized state, requiring the record's
/// field set to match the target type exactly.
///
/// Both a missing expected field and an unexpected extra field are errors;
/// the type tag itself is never counted as a field.
pub fn deserialize_state_strict(
    registry: &TrackRegistry,
    record: &Record,
) -> Result<Box<dyn Trackable>, DeserializeError> {
    deserialize_record(registry, record, true)
}

/// Rebuilds every record of a serialized list, preserving order.
///
/// The first failing record aborts with its error.
pub fn deserialize_list<'a>(
    registry: &TrackRegistry,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<Vec<Box<dyn Trackable>>, DeserializeError> {
    records
        .into_iter()
        .map(|record| deserialize_record(registry, record, false))
        .collect()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{
        DeserializeError, deserialize_list, deserialize_state, deserialize_state_strict,
        serialize_list,
    };
    use crate::impl_track_path;
    use crate::record::{FromRecordError, Record, Value};
    use crate::registry::TrackRegistry;
    use crate::trackable::{FromRecord, TrackPath, Trackable};

    #[derive(Debug, PartialEq)]
    struct Counter {
        count: u64,
    }
    impl_track_path!(Counter, "tests::Counter", "Counter");

    impl Trackable for Counter {
        fn serialize(&self) -> Record {
            let state = Record::tagged(Self::track_path());
            self.serialize_plain_attrs(state, &["count"])
        }

        fn plain_field(&self, name: &str) -> Option<Value> {
            match name {
                "count" => Some(self.count.into()),
                _ => None,
            }
        }
    }

    impl FromRecord for Counter {
        fn from_record(record: &Record, strict: bool) -> Result<Self, FromRecordError> {
            if strict {
                record.check_shape(&["count"])?;
            }
            Ok(Self {
                count: record.get_u64("count")?,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    struct Gauge {
        level: f64,
        label: alloc::string::String,
    }
    impl_track_path!(Gauge, "tests::Gauge", "Gauge");

    impl Trackable for Gauge {
        fn serialize(&self) -> Record {
            let state = Record::tagged(Self::track_path());
            self.serialize_plain_attrs(state, &["level", "label"])
        }

        fn plain_field(&self, name: &str) -> Option<Value> {
            match name {
                "level" => Some(self.level.into()),
                "label" => Some(self.label.as_str().into()),
                _ => None,
            }
        }
    }

    impl FromRecord for Gauge {
        fn from_record(record: &Record, strict: bool) -> Result<Self, FromRecordError> {
            if strict {
                record.check_shape(&["level", "label"])?;
            }
            Ok(Self {
                level: record.get_f64("level")?,
                label: record.get_str("label")?.into(),
            })
        }
    }

    // A trackable embedding another trackable as a nested record.
    struct Snapshot {
        counter: Counter,
    }
    impl_track_path!(Snapshot, "tests::Snapshot", "Snapshot");

    impl Trackable for Snapshot {
        fn serialize(&self) -> Record {
            let state = Record::tagged(Self::track_path());
            self.serialize_trackable_attrs(state, &["counter"])
        }

        fn trackable_field(&self, name: &str) -> Option<&dyn Trackable> {
            match name {
                "counter" => Some(&self.counter),
                _ => None,
            }
        }
    }

    impl FromRecord for Snapshot {
        fn from_record(record: &Record, strict: bool) -> Result<Self, FromRecordError> {
            if strict {
                record.check_shape(&["counter"])?;
            }
            Ok(Self {
                counter: Counter::from_record(record.get_record("counter")?, strict)?,
            })
        }
    }

    fn registry() -> TrackRegistry {
        let mut registry = TrackRegistry::new();
        registry.register::<Counter>();
        registry.register::<Gauge>();
        registry.register::<Snapshot>();
        registry
    }

    #[test]
    fn round_trip_dispatches_on_the_tag() {
        let registry = registry();
        let counter = Counter { count: 3 };
        let gauge = Gauge {
            level: 0.5,
            label: "load".into(),
        };

        let items: [&dyn Trackable; 2] = [&counter, &gauge];
        let records = serialize_list(items);

        let restored = deserialize_list(&registry, &records).unwrap();
        assert_eq!(restored.len(), 2);

        // Order and concrete types are preserved.
        assert_eq!(restored[0].downcast_ref::<Counter>(), Some(&counter));
        assert_eq!(restored[1].downcast_ref::<Gauge>(), Some(&gauge));
    }

    #[test]
    fn serialization_is_a_fixed_point() {
        let registry = registry();
        let first = Gauge {
            level: 1.25,
            label: "mem".into(),
        }
        .serialize();

        let restored = deserialize_state(&registry, &first).unwrap();
        assert_eq!(restored.serialize(), first);
    }

    #[test]
    fn nested_trackables_round_trip() {
        let registry = registry();
        let state = Snapshot {
            counter: Counter { count: 7 },
        }
        .serialize();

        let restored = deserialize_state(&registry, &state).unwrap();
        let snapshot = restored.take::<Snapshot>().unwrap();
        assert_eq!(snapshot.counter.count, 7);
    }

    #[test]
    fn untagged_record_is_rejected() {
        let registry = registry();
        let record = Record::new().with("count", 1);

        let err = deserialize_state(&registry, &record).unwrap_err();
        assert_eq!(err, DeserializeError::MissingTag);
    }

    #[test]
    fn unknown_tag_is_reported() {
        let registry = registry();
        let record = Record::tagged("tests::Vanished");

        let err = deserialize_state(&registry, &record).unwrap_err();
        assert_eq!(
            err,
            DeserializeError::UnknownTag {
                tag: "tests::Vanished".into()
            },
        );
    }

    #[test]
    fn strict_mode_rejects_shape_drift() {
        let registry = registry();
        let record = Record::tagged("tests::Counter")
            .with("count", 1)
            .with("rate", 2);

        // Lenient mode ignores the extra field.
        assert!(deserialize_state(&registry, &record).is_ok());

        let err = deserialize_state_strict(&registry, &record).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::FromRecord(FromRecordError::MismatchedShape { .. }),
        ));
    }

    #[test]
    fn empty_list_round_trips() {
        let registry = registry();
        let records = serialize_list(Vec::<&dyn Trackable>::new());
        assert!(records.is_empty());
        assert!(deserialize_list(&registry, &records).unwrap().is_empty());
    }
}
