// -----------------------------------------------------------------------------
// TrackPath

/// A stable, code-defined identity for a trackable type.
///
/// The *track path* is the value embedded in a [`Record`](crate::Record) as
/// its type tag and the key under which the type is registered in a
/// [`TrackRegistry`](crate::registry::TrackRegistry). It must therefore stay
/// stable across builds; do not derive it from
/// [`core::any::type_name`], whose output is explicitly unspecified.
///
/// The *track name* is the short, human-facing form, and may be ambiguous
/// across modules; the registry tracks such collisions.
///
/// Usually implemented through [`impl_track_path!`](crate::impl_track_path):
///
/// ```
/// use tk_track::{TrackPath, impl_track_path};
///
/// struct Optimizer;
/// impl_track_path!(Optimizer, "demo::Optimizer", "Optimizer");
///
/// assert_eq!(Optimizer::track_path(), "demo::Optimizer");
/// assert_eq!(Optimizer::track_name(), "Optimizer");
/// ```
pub trait TrackPath {
    /// Returns the fully qualified, stable path of the type.
    fn track_path() -> &'static str;

    /// Returns the short name of the type.
    fn track_name() -> &'static str;
}

// -----------------------------------------------------------------------------
// DynamicTrackPath

/// Provide dynamic dispatch for types that implement [`TrackPath`].
///
/// Auto impl for all types that implemented [`TrackPath`].
///
/// # Examples
///
/// ```
/// use tk_track::{DynamicTrackPath, TrackPath, impl_track_path};
///
/// struct Optimizer;
/// impl_track_path!(Optimizer, "demo::Optimizer", "Optimizer");
///
/// let x = Optimizer;
/// assert_eq!(x.tracked_type_path(), "demo::Optimizer");
/// ```
pub trait DynamicTrackPath {
    /// Returns the fully qualified path of the underlying type.
    ///
    /// See [`TrackPath::track_path`].
    fn tracked_type_path(&self) -> &'static str;

    /// Returns the short name of the underlying type.
    ///
    /// See [`TrackPath::track_name`].
    fn tracked_type_name(&self) -> &'static str;
}

impl<T: TrackPath> DynamicTrackPath for T {
    #[inline]
    fn tracked_type_path(&self) -> &'static str {
        Self::track_path()
    }

    #[inline]
    fn tracked_type_name(&self) -> &'static str {
        Self::track_name()
    }
}

// -----------------------------------------------------------------------------
// impl_track_path

/// Implements [`TrackPath`] for a type with explicit path strings.
///
/// Written out rather than derived so the tag visible in persisted records is
/// always a deliberate choice.
///
/// # Examples
///
/// ```
/// use tk_track::{TrackPath, impl_track_path};
///
/// struct Scheduler;
/// impl_track_path!(Scheduler, "demo::Scheduler", "Scheduler");
///
/// assert_eq!(Scheduler::track_path(), "demo::Scheduler");
/// ```
#[macro_export]
macro_rules! impl_track_path {
    ($ty:ty, $path:literal, $name:literal) => {
        impl $crate::trackable::TrackPath for $ty {
            #[inline(always)]
            fn track_path() -> &'static str {
                $path
            }

            #[inline(always)]
            fn track_name() -> &'static str {
                $name
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests
