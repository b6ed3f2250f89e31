// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Defined / non-default bookkeeping.

use crate::id::AttributeId;
use crate::mask::AttributeMask;

/// The `(defined, non_default)` mask pair of an attribute set.
///
/// An attribute is *defined* once it has been explicitly assigned, including
/// explicitly reset to its default. It is *non-default* when it is defined and
/// its normalized value differs from the canonical default. The non-default
/// mask is always a subset of the defined mask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct AttributeState {
    defined: AttributeMask,
    non_default: AttributeMask,
}

/// State transition for a single attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mark {
    /// Never specified.
    Unset,
    /// Specified, at its default.
    Default,
    /// Specified, differing from its default.
    NonDefault,
}

impl AttributeState {
    /// No attribute defined.
    pub const EMPTY: Self = Self {
        defined: AttributeMask::EMPTY,
        non_default: AttributeMask::EMPTY,
    };

    /// Returns the defined mask.
    #[must_use]
    #[inline]
    pub const fn defined(self) -> AttributeMask {
        self.defined
    }

    /// Returns the non-default mask.
    #[must_use]
    #[inline]
    pub const fn non_default(self) -> AttributeMask {
        self.non_default
    }

    /// Returns a hash code derived from both masks only.
    #[must_use]
    #[inline]
    pub const fn hash_code(self) -> u64 {
        (self.defined.bits() << 8) ^ self.non_default.bits()
    }

    /// Applies a state transition to one attribute.
    ///
    /// This is the only way the masks change.
    pub(crate) fn mark(&mut self, id: AttributeId, mark: Mark) {
        match mark {
            Mark::Unset => {
                self.defined.remove(id);
                self.non_default.remove(id);
            }
            Mark::Default => {
                self.defined.insert(id);
                self.non_default.remove(id);
            }
            Mark::NonDefault => {
                self.defined.insert(id);
                self.non_default.insert(id);
            }
        }
        debug_assert!(
            self.non_default.bits() & !self.defined.bits() == 0,
            "non-default attributes must be defined"
        );
    }
}
