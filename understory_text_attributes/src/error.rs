// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::fmt;

use crate::id::AttributeId;
use crate::value::ValueKind;

/// A value could not be coerced into an attribute.
///
/// Returned by the strict write path
/// ([`AttributeSet::try_set`](crate::AttributeSet::try_set)) and recorded in
/// [`MergeReport`](crate::MergeReport)s. The lenient paths recover from it by
/// assigning the attribute's default.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoercionError {
    /// The value has the wrong kind for the attribute.
    TypeMismatch {
        /// The attribute being written.
        attribute: AttributeId,
        /// The kind the attribute accepts.
        expected: ValueKind,
        /// The kind that was supplied.
        found: ValueKind,
    },
    /// The value has the right kind but fails the attribute's range check.
    OutOfRange {
        /// The attribute being written.
        attribute: AttributeId,
    },
}

impl CoercionError {
    /// Returns the attribute the failed write targeted.
    #[must_use]
    pub const fn attribute(&self) -> AttributeId {
        match self {
            Self::TypeMismatch { attribute, .. } | Self::OutOfRange { attribute } => *attribute,
        }
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch {
                attribute,
                expected,
                found,
            } => write!(f, "{attribute}: expected {expected}, found {found}"),
            Self::OutOfRange { attribute } => write!(f, "{attribute}: value out of range"),
        }
    }
}

impl core::error::Error for CoercionError {}

/// An ordinal does not name an attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownAttribute {
    /// The offending ordinal.
    pub index: u8,
}

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no attribute with ordinal {}", self.index)
    }
}

impl core::error::Error for UnknownAttribute {}

/// Rotation extraction hit a non-invertible transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DegenerateGeometry;

impl fmt::Display for DegenerateGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rotation is not invertible")
    }
}

impl core::error::Error for DegenerateGeometry {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn coercion_error_messages() {
        let err = CoercionError::TypeMismatch {
            attribute: AttributeId::Size,
            expected: ValueKind::Number,
            found: ValueKind::String,
        };
        assert_eq!(err.to_string(), "size: expected number, found string");
        assert_eq!(err.attribute(), AttributeId::Size);

        let err = CoercionError::OutOfRange {
            attribute: AttributeId::Weight,
        };
        assert_eq!(err.to_string(), "weight: value out of range");
    }

    #[test]
    fn unknown_attribute_message() {
        assert_eq!(
            UnknownAttribute { index: 60 }.to_string(),
            "no attribute with ordinal 60"
        );
    }
}
