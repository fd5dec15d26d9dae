use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::record::{Record, Value};
use crate::trackable::DynamicTrackPath;

// -----------------------------------------------------------------------------
// Trackable

/// The serialize side of the tracking capability contract.
///
/// A trackable object knows how to convert itself into a [`Record`]: a plain,
/// tagged data tree that can be handed to a persistence layer and later fed
/// back through [`deserialize_state`](crate::deserialize_state) to rebuild
/// the concrete type. `serialize` must be read-only with respect to the
/// object's own state.
///
/// # Implementing
///
/// The default [`serialize`](Trackable::serialize) returns a record holding
/// only the type tag; concrete types extend it with their own fields. For the
/// common case of plain and nested-trackable attributes, override
/// [`plain_field`](Trackable::plain_field) /
/// [`trackable_field`](Trackable::trackable_field) and use the two `*_attrs`
/// helpers, which chain on the record:
///
/// ```
/// use tk_track::record::{FromRecordError, Record};
/// use tk_track::{FromRecord, TrackPath, Trackable, Value, impl_track_path};
///
/// struct Momentum { decay: f64 }
/// impl_track_path!(Momentum, "demo::Momentum", "Momentum");
///
/// impl Trackable for Momentum {
///     fn serialize(&self) -> Record {
///         let state = Record::tagged(Self::track_path());
///         self.serialize_plain_attrs(state, &["decay"])
///     }
///
///     fn plain_field(&self, name: &str) -> Option<Value> {
///         match name {
///             "decay" => Some(self.decay.into()),
///             _ => None,
///         }
///     }
/// }
///
/// impl FromRecord for Momentum {
///     fn from_record(record: &Record, strict: bool) -> Result<Self, FromRecordError> {
///         if strict {
///             record.check_shape(&["decay"])?;
///         }
///         Ok(Self { decay: record.get_f64("decay")? })
///     }
/// }
///
/// let state = Momentum { decay: 0.9 }.serialize();
/// assert_eq!(state.type_path(), Some("demo::Momentum"));
/// assert_eq!(state.get_f64("decay").unwrap(), 0.9);
/// ```
///
/// Attribute helpers treat a name that the object does not expose as a
/// contract violation and panic; see
/// [`serialize_plain_attrs`](Trackable::serialize_plain_attrs).
///
/// The reconstruct side lives on [`FromRecord`](crate::FromRecord), a
/// factory per concrete type, because "abstract static method" has no
/// object-safe analogue here.
pub trait Trackable: DynamicTrackPath + Send + Sync + Any {
    /// Serializes this object into a fresh [`Record`].
    ///
    /// The base behavior returns a record containing only this type's tag.
    /// Implementations extend that record with their serialized attributes,
    /// commonly via [`serialize_plain_attrs`](Trackable::serialize_plain_attrs)
    /// and [`serialize_trackable_attrs`](Trackable::serialize_trackable_attrs).
    ///
    /// Attributes deliberately left out (derived or transient state) are not
    /// expected to round-trip.
    fn serialize(&self) -> Record {
        Record::tagged(self.tracked_type_path())
    }

    /// Reads a plain (non-trackable) attribute by name.
    ///
    /// This is the lookup seam the `*_attrs` helpers dispatch through; the
    /// default exposes nothing.
    fn plain_field(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }

    /// Reads a trackable attribute by name.
    ///
    /// The default exposes nothing.
    fn trackable_field(&self, name: &str) -> Option<&dyn Trackable> {
        let _ = name;
        None
    }

    /// Copies the named plain attributes into `state`, returning it for
    /// chaining.
    ///
    /// # Panics
    ///
    /// Panics if the object does not expose one of the named attributes.
    /// That mismatch is a bug at the call site, not a recoverable condition,
    /// and aborts serialization before a partial record can escape.
    fn serialize_plain_attrs(&self, mut state: Record, attrs: &[&'static str]) -> Record {
        for attr in attrs {
            match self.plain_field(attr) {
                Some(value) => state.insert(*attr, value),
                None => panic!(
                    "type `{}` has no plain attribute `{attr}`",
                    self.tracked_type_path(),
                ),
            }
        }
        state
    }

    /// Serializes the named trackable attributes and embeds their records
    /// into `state` under the attribute names, returning it for chaining.
    ///
    /// # Panics
    ///
    /// Panics if a named attribute is missing, or exists but does not
    /// implement the tracking contract (it is only reachable via
    /// [`plain_field`](Trackable::plain_field)).
    fn serialize_trackable_attrs(&self, mut state: Record, attrs: &[&'static str]) -> Record {
        for attr in attrs {
            match self.trackable_field(attr) {
                Some(child) => state.insert(*attr, child.serialize()),
                None if self.plain_field(attr).is_some() => panic!(
                    "attribute `{attr}` of type `{}` is not trackable",
                    self.tracked_type_path(),
                ),
                None => panic!(
                    "type `{}` has no trackable attribute `{attr}`",
                    self.tracked_type_path(),
                ),
            }
        }
        state
    }

    /// Return the [`TypeId`] of the underlying type.
    ///
    /// `Box<dyn Trackable>::type_id` would return the [`TypeId`] of the
    /// container instead of the value, which is prone to errors; prefer this.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

// -----------------------------------------------------------------------------
// dyn Trackable

impl dyn Trackable {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Trackable>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    #[inline]
    pub fn downcast_ref<T: Trackable>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    #[inline]
    pub fn downcast_mut<T: Trackable>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut()
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait
    /// object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tk_track::{Trackable, impl_track_path};
    ///
    /// struct Marker;
    /// impl_track_path!(Marker, "demo::Marker", "Marker");
    /// impl Trackable for Marker {}
    ///
    /// let boxed: Box<dyn Trackable> = Box::new(Marker);
    /// assert!(boxed.take::<Marker>().is_ok());
    /// ```
    pub fn take<T: Trackable>(self: Box<dyn Trackable>) -> Result<T, Box<dyn Trackable>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            match any.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(_) => unreachable!("type was checked before downcasting"),
            }
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for dyn Trackable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trackable({})", self.tracked_type_path())
    }
}

// -----------------------------------------------------------------------------
// Tests
