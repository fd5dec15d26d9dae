use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::record::Record;

// -----------------------------------------------------------------------------
// Value

/// A single field value inside a [`Record`].
///
/// `Value` is a tagged union of every shape the protocol can carry: scalars,
/// strings, ordered sequences of values, and nested records. Access goes
/// through the checked `as_*` accessors, so a shape mismatch surfaces as
/// `None` rather than a silent misread.
///
/// Integers are canonicalized: any unsigned value that fits in `i64` is stored
/// as [`Value::Int`], and [`Value::UInt`] is reserved for values above
/// `i64::MAX`. This keeps in-memory equality stable across an encode/decode
/// round trip through formats that do not distinguish signedness.
///
/// # Examples
///
/// ```
/// use tk_track::{Value, ValueKind};
///
/// let v = Value::from(3_u32);
/// assert_eq!(v.kind(), ValueKind::Int);
/// assert_eq!(v.as_i64(), Some(3));
/// assert_eq!(v.as_str(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Returns the [`ValueKind`] of this value.
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::UInt(_) => ValueKind::UInt,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Seq(_) => ValueKind::Seq,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Returns the inner `bool`, or `None` for any other kind.
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer in `i64` range.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::UInt(v) if *v <= i64::MAX as u64 => Some(*v as i64),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    #[inline]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(v) if *v >= 0 => Some(*v as u64),
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the inner `f64`, or `None` for any other kind.
    ///
    /// Integers are not silently widened to floats; a caller that wants this
    /// behavior can combine [`as_i64`](Self::as_i64) and this accessor.
    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the inner string slice, or `None` for any other kind.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the inner sequence, or `None` for any other kind.
    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested record, or `None` for any other kind.
    #[inline]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the value and returns the nested record, or `Err(self)`.
    #[inline]
    pub fn into_record(self) -> Result<Record, Value> {
        match self {
            Value::Record(v) => Ok(v),
            other => Err(other),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::Int(value as i64)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64);

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::Int(value as i64)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32);

impl From<u64> for Value {
    /// Canonicalizing conversion: values in `i64` range become [`Value::Int`].
    #[inline]
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::UInt(value),
        }
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Cow<'_, str>> for Value {
    #[inline]
    fn from(value: Cow<'_, str>) -> Self {
        Value::Str(value.into_owned())
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(value)
    }
}

impl From<Record> for Value {
    #[inline]
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::Seq(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// ValueKind

/// A pure enumeration of [`Value`] shapes.
///
/// Used by error types to describe what a field held versus what the reader
/// expected, without dragging the value itself into the error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Seq,
    Record,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::Seq => "seq",
            ValueKind::Record => "record",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{Value, ValueKind};

    #[test]
    fn integer_canonicalization() {
        assert_eq!(Value::from(7_u64), Value::Int(7));
        assert_eq!(Value::from(7_i32), Value::Int(7));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
    }

    #[test]
    fn checked_accessors() {
        let v = Value::from("state");
        assert_eq!(v.as_str(), Some("state"));
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.kind(), ValueKind::Str);

        assert_eq!(Value::Int(-1).as_u64(), None);
        assert_eq!(Value::Int(-1).as_i64(), Some(-1));
        assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
    }

    #[test]
    fn seq_from_iterator() {
        let v: Value = [1_i64, 2, 3].into_iter().map(Value::from).collect();
        assert_eq!(v.as_seq().map(<[Value]>::len), Some(3));
        assert_eq!(v, Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    }
}
