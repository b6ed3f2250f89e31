// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute bitmasks.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::id::AttributeId;

/// A compact bitfield representing a set of attributes.
///
/// Bit *i* corresponds to the attribute with ordinal *i*. Iteration yields
/// attributes in ordinal order.
///
/// # Example
///
/// ```
/// use understory_text_attributes::{AttributeId, AttributeMask};
///
/// let mut mask = AttributeMask::EMPTY;
/// mask.insert(AttributeId::Size);
/// mask.insert(AttributeId::Family);
///
/// let ids: Vec<_> = mask.iter().collect();
/// assert_eq!(ids, [AttributeId::Family, AttributeId::Size]);
///
/// let combined = mask | AttributeId::Weight.into();
/// assert!(combined.contains(AttributeId::Weight));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct AttributeMask(u64);

impl AttributeMask {
    /// An empty mask.
    pub const EMPTY: Self = Self(0);

    /// Every attribute, primary and derived.
    pub const ALL: Self = Self((1_u64 << AttributeId::COUNT) - 1);

    /// Every derived attribute.
    pub const DERIVED: Self = AttributeId::BaselineTransform.mask();

    /// Every primary attribute.
    pub const PRIMARY: Self = Self(Self::ALL.0 & !Self::DERIVED.0);

    /// Creates a mask from raw bits, dropping bits that do not name an attribute.
    #[must_use]
    #[inline]
    pub const fn from_bits_truncate(bits: u64) -> Self {
        Self(bits & ((1_u64 << AttributeId::COUNT) - 1))
    }

    /// Returns the raw bits of this mask.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns `true` if this mask contains no attributes.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this mask contains the given attribute.
    #[must_use]
    #[inline]
    pub const fn contains(self, id: AttributeId) -> bool {
        (self.0 & (1_u64 << id.index())) != 0
    }

    /// Returns `true` if every attribute in `other` is also in this mask.
    #[must_use]
    #[inline]
    pub const fn contains_all(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns `true` if this mask shares at least one attribute with `other`.
    #[must_use]
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Inserts an attribute into the mask.
    pub fn insert(&mut self, id: AttributeId) {
        self.0 |= 1_u64 << id.index();
    }

    /// Removes an attribute from the mask.
    pub fn remove(&mut self, id: AttributeId) {
        self.0 &= !(1_u64 << id.index());
    }

    /// Returns the number of attributes in the mask.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns an iterator over the attributes in this mask, in ordinal order.
    #[must_use]
    pub const fn iter(self) -> AttributeMaskIter {
        AttributeMaskIter { bits: self.0 }
    }
}

impl fmt::Debug for AttributeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for AttributeMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AttributeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for AttributeMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for AttributeMask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for AttributeMask {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0 & Self::ALL.0)
    }
}

impl From<AttributeId> for AttributeMask {
    fn from(id: AttributeId) -> Self {
        id.mask()
    }
}

impl FromIterator<AttributeId> for AttributeMask {
    fn from_iter<I: IntoIterator<Item = AttributeId>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for id in iter {
            mask.insert(id);
        }
        mask
    }
}

impl IntoIterator for AttributeMask {
    type Item = AttributeId;
    type IntoIter = AttributeMaskIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the attributes in an [`AttributeMask`].
#[derive(Clone, Debug)]
pub struct AttributeMaskIter {
    bits: u64,
}

impl Iterator for AttributeMaskIter {
    type Item = AttributeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.bits &= self.bits - 1;
        // Masks never hold bits at or above `AttributeId::COUNT`.
        Some(AttributeId::ALL[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for AttributeMaskIter {}
