use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::{error, fmt};

use crate::record::ValueKind;

/// A enumeration of all error outcomes that might happen when reconstructing
/// a concrete type from a [`Record`](crate::record::Record).
///
/// The `type_path` carried by each variant is the tag of the record under
/// reconstruction, or `"<untagged>"` when the record has none.
#[derive(Clone, Debug, PartialEq)]
pub enum FromRecordError {
    /// The record does not contain a field the type expects.
    MissingField {
        type_path: Cow<'static, str>,
        field: Cow<'static, str>,
    },
    /// A field exists but holds a different [kind](ValueKind) of value.
    MismatchedKind {
        type_path: Cow<'static, str>,
        field: Cow<'static, str>,
        expected: ValueKind,
        found: ValueKind,
    },
    /// Strict mode: the record's field set does not exactly match the type's.
    MismatchedShape {
        type_path: Cow<'static, str>,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    /// A type-specific validation failure.
    Custom {
        type_path: Cow<'static, str>,
        message: Cow<'static, str>,
    },
}

impl fmt::Display for FromRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { type_path, field } => {
                write!(f, "record for `{type_path}` is missing field `{field}`")
            }
            Self::MismatchedKind {
                type_path,
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field `{field}` of record for `{type_path}` holds `{found}`, expected `{expected}`"
                )
            }
            Self::MismatchedShape {
                type_path,
                missing,
                unexpected,
            } => {
                write!(
                    f,
                    "record for `{type_path}` does not match its type's shape (missing: {missing:?}, unexpected: {unexpected:?})"
                )
            }
            Self::Custom { type_path, message } => {
                write!(f, "record for `{type_path}` is invalid: {message}")
            }
        }
    }
}

impl error::Error for FromRecordError {}
