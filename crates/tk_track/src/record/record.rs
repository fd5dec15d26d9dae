use alloc::borrow::{Cow, ToOwned};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use tk_utils::hash::{FixedHashState, HashMap};

use crate::record::{FromRecordError, Value, ValueKind};

/// The reserved field name under which a record's type tag travels at the
/// serde boundary.
///
/// In memory the tag is a dedicated member of [`Record`], not an entry in the
/// field table, so ordinary fields can never collide with it.
pub const TAG_FIELD: &str = "__class__";

// -----------------------------------------------------------------------------
// Record

/// An insertion-ordered mapping from field names to [`Value`]s, optionally
/// tagged with the track path of the type that produced it.
///
/// A `Record` is the opaque unit this protocol trades in: `serialize`
/// produces one, `deserialize_state` consumes one. It is plain data: no
/// interior references, no cycles, freshly allocated per `serialize` call.
///
/// Field order is preserved and participates in equality; two records with
/// the same fields in a different order are not equal.
///
/// # Examples
///
/// ```
/// use tk_track::{Record, Value};
///
/// let record = Record::tagged("demo::Pose")
///     .with("x", 1.5_f64)
///     .with("y", -0.5_f64)
///     .with("frame", "local");
///
/// assert_eq!(record.type_path(), Some("demo::Pose"));
/// assert_eq!(record.field_len(), 3);
/// assert_eq!(record.get("frame").and_then(Value::as_str), Some("local"));
/// assert_eq!(record.index_of("y"), Some(1));
/// ```
#[derive(Clone, Default)]
pub struct Record {
    type_path: Option<Cow<'static, str>>,
    values: Vec<Value>,
    names: Vec<Cow<'static, str>>,
    indices: HashMap<Cow<'static, str>, usize>,
}

impl Record {
    /// Creates an empty, untagged `Record`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            type_path: None,
            values: Vec::new(),
            names: Vec::new(),
            indices: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates an empty `Record` tagged with the given track path.
    ///
    /// This is the base serialized form of any trackable object: the tag and
    /// nothing else.
    #[inline]
    pub fn tagged(type_path: impl Into<Cow<'static, str>>) -> Self {
        let mut record = Self::new();
        record.type_path = Some(type_path.into());
        record
    }

    /// Creates an empty, untagged `Record` with at least the given field capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            type_path: None,
            values: Vec::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Returns the type tag, if any.
    #[inline]
    pub fn type_path(&self) -> Option<&str> {
        self.type_path.as_deref()
    }

    /// Sets or clears the type tag.
    #[inline]
    pub fn set_type_path(&mut self, type_path: Option<Cow<'static, str>>) {
        self.type_path = type_path;
    }

    /// Inserts a field, overwriting the previous value if the name exists.
    ///
    /// A freshly inserted field goes to the end of the ordering; overwriting
    /// keeps the original position.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) {
        let name: Cow<'static, str> = name.into();
        let value = value.into();
        if let Some(index) = self.indices.get(&name) {
            self.values[*index] = value;
        } else {
            self.values.push(value);
            self.indices.insert(name.clone(), self.values.len() - 1);
            self.names.push(name);
        }
    }

    /// Chaining form of [`insert`](Self::insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use tk_track::Record;
    ///
    /// let record = Record::new().with("a", 1_i64).with("b", true);
    /// assert_eq!(record.field_len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns a reference to the field with the given name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.indices.get(name).map(|index| &self.values[*index])
    }

    /// Returns a mutable reference to the field with the given name.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.indices
            .get(name)
            .map(|index| &mut self.values[*index])
    }

    /// Returns `true` if a field with the given name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Gets the position of the field with the given name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns the name and value of the field at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<(&str, &Value)> {
        match (self.names.get(index), self.values.get(index)) {
            (Some(name), Some(value)) => Some((name.as_ref(), value)),
            _ => None,
        }
    }

    /// Returns the name of the field at `index`.
    #[inline]
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(AsRef::as_ref)
    }

    /// Returns the number of fields, excluding the tag.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record holds no fields (a bare tag still counts
    /// as empty).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over `(name, value)` pairs in insertion order.
    #[inline]
    pub fn iter_fields(&self) -> FieldIter<'_> {
        FieldIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// Checked field readers

/// Readers used by [`FromRecord`](crate::FromRecord) implementations.
///
/// Each returns a descriptive [`FromRecordError`] instead of an `Option`, so
/// per-type `from_record` bodies stay a straight line of `?`s.
impl Record {
    fn error_path(&self) -> Cow<'static, str> {
        match self.type_path() {
            Some(path) => Cow::Owned(path.to_owned()),
            None => Cow::Borrowed("<untagged>"),
        }
    }

    /// Returns the field with the given name, or a
    /// [`MissingField`](FromRecordError::MissingField) error.
    pub fn required(&self, name: &'static str) -> Result<&Value, FromRecordError> {
        self.get(name).ok_or_else(|| FromRecordError::MissingField {
            type_path: self.error_path(),
            field: Cow::Borrowed(name),
        })
    }

    fn mismatched(&self, name: &'static str, expected: ValueKind, found: ValueKind) -> FromRecordError {
        FromRecordError::MismatchedKind {
            type_path: self.error_path(),
            field: Cow::Borrowed(name),
            expected,
            found,
        }
    }

    /// Reads a `bool` field.
    pub fn get_bool(&self, name: &'static str) -> Result<bool, FromRecordError> {
        let value = self.required(name)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatched(name, ValueKind::Bool, value.kind()))
    }

    /// Reads a signed integer field.
    pub fn get_i64(&self, name: &'static str) -> Result<i64, FromRecordError> {
        let value = self.required(name)?;
        value
            .as_i64()
            .ok_or_else(|| self.mismatched(name, ValueKind::Int, value.kind()))
    }

    /// Reads a non-negative integer field.
    pub fn get_u64(&self, name: &'static str) -> Result<u64, FromRecordError> {
        let value = self.required(name)?;
        value
            .as_u64()
            .ok_or_else(|| self.mismatched(name, ValueKind::UInt, value.kind()))
    }

    /// Reads a float field.
    pub fn get_f64(&self, name: &'static str) -> Result<f64, FromRecordError> {
        let value = self.required(name)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatched(name, ValueKind::Float, value.kind()))
    }

    /// Reads a string field.
    pub fn get_str(&self, name: &'static str) -> Result<&str, FromRecordError> {
        let value = self.required(name)?;
        value
            .as_str()
            .ok_or_else(|| self.mismatched(name, ValueKind::Str, value.kind()))
    }

    /// Reads a sequence field.
    pub fn get_seq(&self, name: &'static str) -> Result<&[Value], FromRecordError> {
        let value = self.required(name)?;
        value
            .as_seq()
            .ok_or_else(|| self.mismatched(name, ValueKind::Seq, value.kind()))
    }

    /// Reads a nested record field, the serialized form of a trackable
    /// attribute.
    pub fn get_record(&self, name: &'static str) -> Result<&Record, FromRecordError> {
        let value = self.required(name)?;
        value
            .as_record()
            .ok_or_else(|| self.mismatched(name, ValueKind::Record, value.kind()))
    }

    /// Verifies that this record's field set exactly matches `expected`.
    ///
    /// This is the strict-mode rule, stated once: both missing expected
    /// fields and unexpected extras are rejected. The tag is not a field and
    /// is never part of the comparison.
    ///
    /// # Examples
    ///
    /// ```
    /// use tk_track::Record;
    ///
    /// let record = Record::tagged("demo::Foo").with("a", 1_i64).with("b", 2_i64);
    ///
    /// assert!(record.check_shape(&["a", "b"]).is_ok());
    /// assert!(record.check_shape(&["a"]).is_err());        // extra `b`
    /// assert!(record.check_shape(&["a", "b", "c"]).is_err()); // missing `c`
    /// ```
    pub fn check_shape(&self, expected: &[&str]) -> Result<(), FromRecordError> {
        let missing: Vec<String> = expected
            .iter()
            .filter(|&&name| !self.contains(name))
            .map(|name| (*name).to_owned())
            .collect();
        let unexpected: Vec<String> = self
            .names
            .iter()
            .filter(|name| !expected.contains(&name.as_ref()))
            .map(|name| name.as_ref().to_owned())
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(FromRecordError::MismatchedShape {
                type_path: self.error_path(),
                missing,
                unexpected,
            })
        }
    }
}

// -----------------------------------------------------------------------------
// Trait impls

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_path == other.type_path
            && self.names == other.names
            && self.values == other.values
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record(")?;
        if let Some(path) = self.type_path() {
            write!(f, "{path}, ")?;
        }
        let mut map = f.debug_map();
        for (name, value) in self.iter_fields() {
            map.entry(&name, value);
        }
        map.finish()?;
        write!(f, ")")
    }
}

impl<N: Into<Cow<'static, str>>, V: Into<Value>> FromIterator<(N, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(fields: T) -> Self {
        let mut record = Record::new();
        for (name, value) in fields {
            record.insert(name, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (Cow<'static, str>, Value);
    type IntoIter = core::iter::Zip<alloc::vec::IntoIter<Cow<'static, str>>, alloc::vec::IntoIter<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter().zip(self.values)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a str, &'a Value);
    type IntoIter = FieldIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_fields()
    }
}

// -----------------------------------------------------------------------------
// Field Iterator

/// An iterator over the named fields of a [`Record`], in insertion order.
pub struct FieldIter<'a> {
    record: &'a Record,
    index: usize,
}

impl<'a> FieldIter<'a> {
    /// Creates a new iterator over the given record's fields.
    #[inline(always)]
    pub const fn new(record: &'a Record) -> Self {
        FieldIter { record, index: 0 }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = (&'a str, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.record.field_at(self.index);
        self.index += item.is_some() as usize;
        item
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.record.field_len();
        (size - self.index, Some(size))
    }
}

impl ExactSizeIterator for FieldIter<'_> {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{Record, TAG_FIELD};
    use crate::record::{FromRecordError, Value, ValueKind};

    #[test]
    fn insert_preserves_order_and_overwrite_keeps_position() {
        let mut record = Record::new();
        record.insert("a", 1_i64);
        record.insert("b", 2_i64);
        record.insert("a", 3_i64);

        assert_eq!(record.field_len(), 2);
        assert_eq!(record.index_of("a"), Some(0));
        assert_eq!(record.get("a"), Some(&Value::Int(3)));

        let names: alloc::vec::Vec<&str> = record.iter_fields().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn tag_is_not_a_field() {
        let record = Record::tagged("demo::Foo");
        assert_eq!(record.type_path(), Some("demo::Foo"));
        assert!(record.is_empty());
        assert!(!record.contains(TAG_FIELD));
    }

    #[test]
    fn checked_readers_report_shape() {
        let record = Record::tagged("demo::Foo").with("count", 3_u64).with("label", "x");

        assert_eq!(record.get_u64("count").unwrap(), 3);
        assert_eq!(record.get_str("label").unwrap(), "x");

        match record.get_bool("count") {
            Err(FromRecordError::MismatchedKind {
                expected, found, ..
            }) => {
                assert_eq!(expected, ValueKind::Bool);
                assert_eq!(found, ValueKind::Int);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        match record.get_u64("missing") {
            Err(FromRecordError::MissingField { type_path, field }) => {
                assert_eq!(type_path, "demo::Foo");
                assert_eq!(field, "missing");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn check_shape_rejects_both_directions() {
        let record = Record::tagged("demo::Foo").with("a", 1_i64);

        assert!(record.check_shape(&["a"]).is_ok());

        match record.check_shape(&["b"]) {
            Err(FromRecordError::MismatchedShape {
                missing,
                unexpected,
                ..
            }) => {
                assert_eq!(missing, ["b".to_string()]);
                assert_eq!(unexpected, ["a".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = Record::new().with("x", 1_i64).with("y", 2_i64);
        let b = Record::new().with("y", 2_i64).with("x", 1_i64);
        let c = Record::new().with("x", 1_i64).with("y", 2_i64);

        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
