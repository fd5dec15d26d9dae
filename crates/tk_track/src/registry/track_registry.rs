use core::any::TypeId;

use tk_utils::TypeIdMap;
use tk_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::registry::TrackMeta;
use crate::trackable::FromRecord;

// -----------------------------------------------------------------------------
// TrackRegistry

/// A registry of trackable types.
///
/// This struct is the central store for reconstruction metadata.
/// [Registering] a type generates a new [`TrackMeta`] entry, indexed three
/// ways: by [`TypeId`], by full type path, and by short name. Deserialization
/// looks entries up by the path tag carried in a record; the name index is a
/// convenience for tooling and stays valid only while the name is unique.
///
/// # Example
///
/// ```
/// use tk_track::record::{FromRecordError, Record};
/// use tk_track::registry::TrackRegistry;
/// use tk_track::{FromRecord, TrackPath, Trackable, impl_track_path};
///
/// struct Clock { ticks: u64 }
/// impl_track_path!(Clock, "demo::Clock", "Clock");
/// impl Trackable for Clock {}
/// impl FromRecord for Clock {
///     fn from_record(record: &Record, _strict: bool) -> Result<Self, FromRecordError> {
///         Ok(Self { ticks: record.get_u64("ticks")? })
///     }
/// }
///
/// let mut registry = TrackRegistry::new();
/// registry.register::<Clock>();
///
/// let meta = registry.get_with_track_path("demo::Clock").unwrap();
/// assert_eq!(meta.track_name(), "Clock");
/// ```
///
/// [Registering]: TrackRegistry::register
pub struct TrackRegistry {
    meta_table: TypeIdMap<TrackMeta>,
    path_to_id: HashMap<&'static str, TypeId>,
    name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TrackRegistry {
    /// See [`TrackRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TrackRegistry {
    /// Create an empty [`TrackRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            meta_table: TypeIdMap::new(),
            path_to_id: HashMap::with_hasher(FixedHashState),
            name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        meta: &TrackMeta,
        path_to_id: &mut HashMap<&'static str, TypeId>,
        name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let track_name = meta.track_name();

        // Check for duplicate names.
        // The type should **not** already exist.
        if !ambiguous_names.contains(track_name) {
            if name_to_id.contains_key(track_name) {
                name_to_id.remove(track_name);
                ambiguous_names.insert(track_name);
            } else {
                name_to_id.insert(track_name, meta.type_id());
            }
        }

        // For new type, assuming that the full path cannot be duplicated.
        path_to_id.insert(meta.track_path(), meta.type_id());
    }

    // - If the key [`TypeId`] already exists, does nothing and returns `false`.
    // - Otherwise inserts the value and returns `true`.
    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_meta: impl FnOnce() -> TrackMeta,
    ) -> bool {
        self.meta_table.try_insert(type_id, || {
            let meta = get_meta();
            Self::add_new_type_indices(
                &meta,
                &mut self.path_to_id,
                &mut self.name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        })
    }

    /// Attempts to register the type `T` if it has not yet been registered.
    ///
    /// Registering the same type twice is a no-op; the first registration
    /// wins.
    #[inline]
    pub fn register<T: FromRecord + 'static>(&mut self) {
        self.register_internal(TypeId::of::<T>(), TrackMeta::of::<T>);
    }

    /// Try add or do nothing.
    ///
    /// - If the key [`TypeId`] already exists, does nothing and returns
    ///   `false`.
    /// - Otherwise inserts the meta and returns `true`.
    #[inline(always)]
    pub fn try_insert_meta(&mut self, meta: TrackMeta) -> bool {
        self.meta_table.try_insert(meta.type_id(), || {
            Self::add_new_type_indices(
                &meta,
                &mut self.path_to_id,
                &mut self.name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        })
    }

    /// Registers every type declared with
    /// [`register_trackable!`](crate::register_trackable) across the linked
    /// program.
    ///
    /// Returns the number of newly inserted types. Repeated calls are cheap
    /// and will not insert duplicates.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled, it
    /// always does nothing and returns `0`.
    ///
    /// ## Platform Support
    ///
    /// Static registration is provided by the [`inventory`] crate; on
    /// platforms it does not support, the collected set is simply empty.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> usize {
        #[cfg(feature = "auto_register")]
        {
            let mut inserted = 0;
            for auto in inventory::iter::<AutoTrackMeta> {
                if self.try_insert_meta((auto.0)()) {
                    inserted += 1;
                }
            }
            inserted
        }
        #[cfg(not(feature = "auto_register"))]
        {
            0
        }
    }

    /// Whether the type with the given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.meta_table.contains(&type_id)
    }

    /// Returns a reference to the [`TrackMeta`] of the type with
    /// the given [`TypeId`].
    ///
    /// If the specified type has not been registered, returns `None`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TrackMeta> {
        self.meta_table.get(&type_id)
    }

    /// Returns a reference to the [`TrackMeta`] of the type with
    /// the given full path tag.
    ///
    /// If no type with the given path has been registered, returns `None`.
    pub fn get_with_track_path(&self, track_path: &str) -> Option<&TrackMeta> {
        // Manual inline
        match self.path_to_id.get(track_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns a reference to the [`TrackMeta`] of the type with
    /// the given short name.
    ///
    /// If the name is ambiguous, or if no type with the given name
    /// has been registered, returns `None`.
    pub fn get_with_track_name(&self, track_name: &str) -> Option<&TrackMeta> {
        match self.name_to_id.get(track_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given short name matches multiple registered
    /// types.
    ///
    /// Ambiguous names are dropped from the name index; the path index is
    /// unaffected.
    pub fn is_ambiguous(&self, track_name: &str) -> bool {
        self.ambiguous_names.contains(track_name)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.meta_table.len()
    }

    /// Returns `true` if no types have been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meta_table.is_empty()
    }

    /// Returns an iterator over the [`TrackMeta`]s of the registered types.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TrackMeta> {
        self.meta_table.values()
    }
}

impl core::fmt::Debug for TrackRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// AutoTrackMeta

/// A statically collected [`TrackMeta`] provider.
///
/// Declared via [`register_trackable!`](crate::register_trackable) and
/// consumed by [`TrackRegistry::auto_register`]. Not used directly.
#[cfg(feature = "auto_register")]
pub struct AutoTrackMeta(pub fn() -> TrackMeta);

#[cfg(feature = "auto_register")]
inventory::collect!(AutoTrackMeta);

/// Declares a type for static registration.
///
/// Every type declared this way, anywhere in the linked program, is picked up
/// by [`TrackRegistry::auto_register`](crate::registry::TrackRegistry::auto_register).
/// The type must implement [`FromRecord`](crate::FromRecord).
///
/// ```
/// use tk_track::record::{FromRecordError, Record};
/// use tk_track::registry::TrackRegistry;
/// use tk_track::{FromRecord, TrackPath, Trackable, impl_track_path, register_trackable};
///
/// struct Beacon;
/// impl_track_path!(Beacon, "demo::Beacon", "Beacon");
/// impl Trackable for Beacon {}
/// impl FromRecord for Beacon {
///     fn from_record(_: &Record, _: bool) -> Result<Self, FromRecordError> {
///         Ok(Self)
///     }
/// }
/// register_trackable!(Beacon);
///
/// let mut registry = TrackRegistry::new();
/// registry.auto_register();
/// assert!(registry.get_with_track_path("demo::Beacon").is_some());
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_trackable {
    ($ty:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::AutoTrackMeta($crate::registry::TrackMeta::of::<$ty>)
        }
    };
}

// -----------------------------------------------------------------------------
// TrackRegistryArc

#[cfg(feature = "std")]
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A cloneable, lock-protected handle to a shared [`TrackRegistry`].
#[cfg(feature = "std")]
#[derive(Clone, Default)]
pub struct TrackRegistryArc {
    /// The wrapped [`TrackRegistry`].
    pub internal: Arc<RwLock<TrackRegistry>>,
}

#[cfg(feature = "std")]
impl TrackRegistryArc {
    /// Takes a read lock on the underlying [`TrackRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TrackRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TrackRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TrackRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(feature = "std")]
impl core::fmt::Debug for TrackRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.read().fmt(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TrackRegistry;
    use crate::impl_track_path;
    use crate::record::{FromRecordError, Record};
    use crate::trackable::{FromRecord, Trackable};

    macro_rules! unit_trackable {
        ($ty:ident, $path:literal, $name:literal) => {
            struct $ty;
            impl_track_path!($ty, $path, $name);
            impl Trackable for $ty {}
            impl FromRecord for $ty {
                fn from_record(_: &Record, _: bool) -> Result<Self, FromRecordError> {
                    Ok(Self)
                }
            }
        };
    }

    unit_trackable!(Alpha, "tests::a::Widget", "Widget");
    unit_trackable!(Beta, "tests::b::Widget", "Widget");
    unit_trackable!(Gamma, "tests::Gamma", "Gamma");

    #[cfg(feature = "auto_register")]
    unit_trackable!(Collected, "tests::Collected", "Collected");
    #[cfg(feature = "auto_register")]
    crate::register_trackable!(Collected);

    #[test]
    fn lookups_by_id_path_and_name() {
        let mut registry = TrackRegistry::new();
        registry.register::<Gamma>();

        assert!(registry.contains(TypeId::of::<Gamma>()));
        assert_eq!(registry.len(), 1);

        let by_path = registry.get_with_track_path("tests::Gamma").unwrap();
        assert_eq!(by_path.type_id(), TypeId::of::<Gamma>());

        let by_name = registry.get_with_track_name("Gamma").unwrap();
        assert_eq!(by_name.track_path(), "tests::Gamma");
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let mut registry = TrackRegistry::new();
        registry.register::<Gamma>();
        registry.register::<Gamma>();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ambiguous_names_fall_out_of_the_name_index() {
        let mut registry = TrackRegistry::new();
        registry.register::<Alpha>();
        assert!(registry.get_with_track_name("Widget").is_some());

        registry.register::<Beta>();
        assert!(registry.is_ambiguous("Widget"));
        assert!(registry.get_with_track_name("Widget").is_none());

        // Path lookups remain exact.
        assert!(registry.get_with_track_path("tests::a::Widget").is_some());
        assert!(registry.get_with_track_path("tests::b::Widget").is_some());
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_collects_declared_types() {
        let mut registry = TrackRegistry::new();
        let inserted = registry.auto_register();
        assert!(inserted >= 1);
        assert!(registry.get_with_track_path("tests::Collected").is_some());

        // Re-running inserts nothing new.
        assert_eq!(registry.auto_register(), 0);
    }
}
