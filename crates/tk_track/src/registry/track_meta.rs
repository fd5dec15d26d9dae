use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::record::{FromRecordError, Record};
use crate::trackable::{FromRecord, TrackPath, Trackable};

// -----------------------------------------------------------------------------
// TrackMeta

/// Runtime metadata for one trackable type, registered into the
/// [`TrackRegistry`](crate::registry::TrackRegistry).
///
/// This bundles the type's tag strings with a monomorphized factory that
/// rebuilds the type from a [`Record`] behind a `dyn` boundary. An instance
/// is created with [`TrackMeta::of`]:
///
/// ```
/// use tk_track::record::{FromRecordError, Record};
/// use tk_track::registry::TrackMeta;
/// use tk_track::{FromRecord, TrackPath, Trackable, impl_track_path};
///
/// struct Switch { on: bool }
/// impl_track_path!(Switch, "demo::Switch", "Switch");
/// impl Trackable for Switch {}
/// impl FromRecord for Switch {
///     fn from_record(record: &Record, _strict: bool) -> Result<Self, FromRecordError> {
///         Ok(Self { on: record.get_bool("on")? })
///     }
/// }
///
/// let meta = TrackMeta::of::<Switch>();
/// assert_eq!(meta.track_path(), "demo::Switch");
///
/// let state = Record::tagged("demo::Switch").with("on", true);
/// let value = meta.deserialize(&state, false).unwrap();
/// assert!(value.is::<Switch>());
/// ```
#[derive(Clone)]
pub struct TrackMeta {
    type_id: TypeId,
    track_path: &'static str,
    track_name: &'static str,
    factory: fn(&Record, bool) -> Result<Box<dyn Trackable>, FromRecordError>,
}

impl TrackMeta {
    /// Create the [`TrackMeta`] of a type.
    #[inline]
    pub fn of<T: FromRecord + 'static>() -> Self {
        fn factory<T: FromRecord + 'static>(
            record: &Record,
            strict: bool,
        ) -> Result<Box<dyn Trackable>, FromRecordError> {
            T::from_record(record, strict).map(|value| Box::new(value) as Box<dyn Trackable>)
        }

        Self {
            type_id: TypeId::of::<T>(),
            track_path: T::track_path(),
            track_name: T::track_name(),
            factory: factory::<T>,
        }
    }

    /// Returns the [`TypeId`] of the registered type.
    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the registered type's full path tag.
    #[inline(always)]
    pub const fn track_path(&self) -> &'static str {
        self.track_path
    }

    /// Returns the registered type's short name.
    #[inline(always)]
    pub const fn track_name(&self) -> &'static str {
        self.track_name
    }

    /// Rebuilds a boxed instance of the registered type from `record`.
    ///
    /// The returned trait object's concrete type is always the one this
    /// meta was created for.
    #[inline]
    pub fn deserialize(
        &self,
        record: &Record,
        strict: bool,
    ) -> Result<Box<dyn Trackable>, FromRecordError> {
        (self.factory)(record, strict)
    }
}

impl fmt::Debug for TrackMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackMeta")
            .field("track_path", &self.track_path)
            .field("track_name", &self.track_name)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TrackMeta;
    use crate::impl_track_path;
    use crate::record::{FromRecordError, Record};
    use crate::trackable::{FromRecord, Trackable};

    struct Toggle {
        on: bool,
    }
    impl_track_path!(Toggle, "tests::Toggle", "Toggle");
    impl Trackable for Toggle {}

    impl FromRecord for Toggle {
        fn from_record(record: &Record, strict: bool) -> Result<Self, FromRecordError> {
            if strict {
                record.check_shape(&["on"])?;
            }
            Ok(Self {
                on: record.get_bool("on")?,
            })
        }
    }

    #[test]
    fn meta_carries_tags_and_rebuilds() {
        let meta = TrackMeta::of::<Toggle>();
        assert_eq!(meta.track_path(), "tests::Toggle");
        assert_eq!(meta.track_name(), "Toggle");

        let state = Record::tagged("tests::Toggle").with("on", true);
        let value = meta.deserialize(&state, false).unwrap();
        assert!(value.take::<Toggle>().unwrap().on);
    }

    #[test]
    fn factory_surfaces_reconstruction_errors() {
        let meta = TrackMeta::of::<Toggle>();
        let state = Record::tagged("tests::Toggle")
            .with("on", true)
            .with("extra", 1);

        assert!(meta.deserialize(&state, false).is_ok());
        assert!(matches!(
            meta.deserialize(&state, true),
            Err(FromRecordError::MismatchedShape { .. })
        ));
    }
}
