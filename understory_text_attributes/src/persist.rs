// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted map form.
//!
//! A persisted map is an [`AttributeMap`] with one extra entry under
//! [`DEFINED_KEY`] holding the defined mask as an integer. Attributes that are
//! defined at their default have no entry of their own; the mask restores
//! them. Values that cannot be persisted are left out, and their bits are
//! cleared from the stored mask, so they do not survive a round trip.

use crate::mask::AttributeMask;
use crate::merge::AttributeMap;
use crate::registry::{CanonicalKeys, KeyResolver};
use crate::set::AttributeSet;
use crate::value::AttributeValue;

/// Key of the entry holding the defined mask.
pub const DEFINED_KEY: &str = "understory.text_attributes.defined";

impl AttributeSet {
    /// Returns `true` if `map` is in the persisted form.
    #[must_use]
    pub fn is_persisted_map(map: &AttributeMap) -> bool {
        map.contains_key(DEFINED_KEY)
    }

    /// Converts this set to the persisted form.
    ///
    /// Opaque values and non-solid paints are dropped.
    #[must_use]
    pub fn to_persisted(&self) -> AttributeMap {
        let mut map = AttributeMap::new();
        let mut defined = self.defined() & AttributeMask::PRIMARY;
        for id in defined.iter() {
            match self.get(id) {
                None => {}
                Some(value) if value.is_serializable() => {
                    map.insert(id.name().into(), value);
                }
                Some(_) => defined.remove(id),
            }
        }
        map.insert(
            DEFINED_KEY.into(),
            AttributeValue::Int(defined.bits() as i64),
        );
        map
    }

    /// Restores a set from the persisted form.
    ///
    /// Unknown keys and a malformed mask entry are ignored.
    #[must_use]
    pub fn from_persisted(map: &AttributeMap) -> Self {
        let mut set = Self::new();
        for (key, value) in map {
            if key == DEFINED_KEY {
                if let AttributeValue::Int(bits) = *value {
                    let mask = AttributeMask::from_bits_truncate(bits as u64);
                    set.define_all(mask & AttributeMask::PRIMARY);
                }
            } else if let Some(id) = CanonicalKeys.resolve(key) {
                set.set(id, value.clone());
            }
        }
        set
    }
}
