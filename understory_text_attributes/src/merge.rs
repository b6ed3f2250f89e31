// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging attribute sets and external attribute maps.

use alloc::string::String;

use hashbrown::HashMap;
use kurbo::Affine;
use smallvec::SmallVec;

use crate::error::CoercionError;
use crate::id::AttributeId;
use crate::mask::AttributeMask;
use crate::registry::{CanonicalKeys, KeyResolver};
use crate::set::AttributeSet;
use crate::value::{AttributeValue, Opaque};

/// An external attribute map, keyed by external attribute keys.
pub type AttributeMap = HashMap<String, AttributeValue>;

/// Why a map entry did not take effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The key does not resolve to a primary attribute.
    UnknownKey,
    /// The value was rejected; the attribute was set to its default.
    Rejected(CoercionError),
}

/// One map entry that did not take effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    /// The entry's key.
    pub key: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Diagnostics collected while merging an external map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct MergeReport {
    skipped: SmallVec<[Skipped; 2]>,
}

impl MergeReport {
    /// Returns `true` if every entry took effect.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Returns the entries that did not take effect.
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }
}

impl AttributeSet {
    /// Merges every attribute `other` defines into this set.
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        self.merge_masked(other, AttributeMask::ALL)
    }

    /// Merges the attributes that `other` defines and `mask` contains.
    ///
    /// Attributes are copied in ordinal order; derived attributes are
    /// recomputed rather than copied.
    pub fn merge_masked(&mut self, other: &Self, mask: AttributeMask) -> &mut Self {
        for id in (mask & other.defined() & AttributeMask::PRIMARY).iter() {
            self.set_from(id, other);
        }
        self
    }

    /// Creates a set from an external map keyed by canonical names.
    #[must_use]
    pub fn from_map(map: &AttributeMap) -> Self {
        let mut set = Self::new();
        set.merge_map(map);
        set
    }

    /// Applies an external map keyed by canonical names.
    ///
    /// Unknown keys are ignored. Rejected values set the attribute to its
    /// default. Use [`merge_map_report`](Self::merge_map_report) to find out
    /// which entries did not take effect.
    pub fn merge_map(&mut self, map: &AttributeMap) -> &mut Self {
        self.merge_map_masked(map, AttributeMask::ALL)
    }

    /// Like [`merge_map`](Self::merge_map), restricted to the attributes in
    /// `mask`.
    pub fn merge_map_masked(&mut self, map: &AttributeMap, mask: AttributeMask) -> &mut Self {
        let _ = self.merge_entries(
            map.iter().map(|(key, value)| (key.as_str(), value)),
            &CanonicalKeys,
            mask,
        );
        self
    }

    /// Like [`merge_map`](Self::merge_map), reporting skipped entries.
    pub fn merge_map_report(&mut self, map: &AttributeMap) -> MergeReport {
        self.merge_entries(
            map.iter().map(|(key, value)| (key.as_str(), value)),
            &CanonicalKeys,
            AttributeMask::ALL,
        )
    }

    /// Applies key/value entries, resolving keys with `resolver`.
    ///
    /// Entries whose attribute is not in `mask` are ignored silently.
    pub fn merge_entries<'a, I, R>(
        &mut self,
        entries: I,
        resolver: &R,
        mask: AttributeMask,
    ) -> MergeReport
    where
        I: IntoIterator<Item = (&'a str, &'a AttributeValue)>,
        R: KeyResolver + ?Sized,
    {
        let mut report = MergeReport::default();
        for (key, value) in entries {
            let Some(id) = resolver.resolve(key).filter(|id| !id.is_derived()) else {
                tracing::debug!(key, "skipping unknown attribute key");
                report.skipped.push(Skipped {
                    key: key.into(),
                    reason: SkipReason::UnknownKey,
                });
                continue;
            };
            if !mask.contains(id) {
                continue;
            }
            if let Err(err) = self.write(id, value) {
                tracing::debug!(attribute = %id, error = %err, "rejected map value; using default");
                self.set_default(id);
                report.skipped.push(Skipped {
                    key: key.into(),
                    reason: SkipReason::Rejected(err),
                });
            }
        }
        report
    }

    /// Exports the defined attributes as a map keyed by canonical names.
    ///
    /// Attributes that are defined at their default export as
    /// [`AttributeValue::Default`], so that [`from_map`](Self::from_map)
    /// restores the same defined mask.
    #[must_use]
    pub fn to_map(&self) -> AttributeMap {
        let mut map = AttributeMap::new();
        self.fill_map(&mut map, &CanonicalKeys);
        map
    }

    /// Writes the defined attributes into `fill`, keyed by `resolver`.
    pub fn fill_map<R: KeyResolver + ?Sized>(&self, fill: &mut AttributeMap, resolver: &R) {
        for id in (self.defined() & AttributeMask::PRIMARY).iter() {
            fill.insert(
                resolver.key(id).into(),
                self.get(id).unwrap_or(AttributeValue::Default),
            );
        }
    }
}

/// Reads the justification from a map.
///
/// Applies the same validation as a set would. Returns the default (`1.0`) if the map has no usable value.
#[must_use]
pub fn justification_from_map(map: &AttributeMap) -> f32 {
    let mut set = AttributeSet::new();
    if let Some(value) = map.get(AttributeId::Justification.name()) {
        set.set(AttributeId::Justification, value.clone());
    }
    set.justification()
}

/// Reads the numeric shaping policy from a map.
#[must_use]
pub fn numeric_shaping_from_map(map: &AttributeMap) -> Option<Opaque> {
    match map.get(AttributeId::NumericShaping.name()) {
        Some(AttributeValue::Opaque(shaping)) => Some(shaping.clone()),
        _ => None,
    }
}

/// Returns the baseline transform a set built from `map` would have.
///
/// Only builds a set if the map carries a transform.
#[must_use]
pub fn baseline_transform_from_map(map: &AttributeMap) -> Option<Affine> {
    with_transform(map).and_then(|set| set.baseline_transform())
}

/// Returns the char transform a set built from `map` would have.
///
/// Only builds a set if the map carries a transform.
#[must_use]
pub fn char_transform_from_map(map: &AttributeMap) -> Option<Affine> {
    with_transform(map).and_then(|set| set.char_transform())
}

fn with_transform(map: &AttributeMap) -> Option<AttributeSet> {
    let value = map.get(AttributeId::Transform.name())?;
    Some(AttributeSet::new().with(AttributeId::Transform, value.clone()))
}
