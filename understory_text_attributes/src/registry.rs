// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attribute registry.
//!
//! Every attribute has one entry in a static table indexed by ordinal. A
//! primary attribute's entry carries a slot: plain function pointers that
//! coerce, reset, compare, copy and export that attribute's storage. All
//! generic operations on an [`AttributeSet`](crate::AttributeSet) dispatch
//! through this table instead of matching on the attribute.
//!
//! The table is checked at compile time: entries must appear in ordinal
//! order, and exactly the derived attributes must lack a slot.

use core::fmt;

use kurbo::Affine;

use crate::error::CoercionError;
use crate::id::AttributeId;
use crate::mask::AttributeMask;
use crate::value::{AttributeValue, TransformAttribute, ValueKind};
use crate::values::{DEFAULT_FAMILY, Values};

/// Why a slot refused a value, before the attribute is known.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Rejection {
    Kind {
        expected: ValueKind,
        found: ValueKind,
    },
    OutOfRange,
}

impl Rejection {
    fn kind(expected: ValueKind, found: &AttributeValue) -> Self {
        Self::Kind {
            expected,
            found: found.kind(),
        }
    }

    pub(crate) const fn at(self, attribute: AttributeId) -> CoercionError {
        match self {
            Self::Kind { expected, found } => CoercionError::TypeMismatch {
                attribute,
                expected,
                found,
            },
            Self::OutOfRange => CoercionError::OutOfRange { attribute },
        }
    }
}

/// Storage operations for one primary attribute.
#[derive(Copy, Clone)]
pub(crate) struct Slot {
    /// Coerces, validates and normalizes `value`, storing it only on success.
    pub(crate) write: fn(&mut Values, &AttributeValue) -> Result<(), Rejection>,
    /// Restores the canonical default.
    pub(crate) reset: fn(&mut Values),
    /// Compares the stored value against the canonical default.
    pub(crate) is_default: fn(&Values) -> bool,
    /// Compares two stored values.
    pub(crate) eq: fn(&Values, &Values) -> bool,
    /// Copies the stored value from another set's storage.
    pub(crate) copy: fn(&mut Values, &Values),
    /// Presents the stored value externally; `None` for absent values.
    pub(crate) export: fn(&Values) -> Option<AttributeValue>,
}

mod coerce {
    use peniko::{Brush, GradientKind};

    use super::Rejection;
    use crate::value::{AttributeValue, ValueKind};

    pub(super) fn number(value: &AttributeValue) -> Result<f64, Rejection> {
        match *value {
            AttributeValue::Int(n) => Ok(n as f64),
            AttributeValue::Float(x) => Ok(x),
            ref other => Err(Rejection::kind(ValueKind::Number, other)),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "attribute floats are stored in single precision"
    )]
    pub(super) fn float(value: &AttributeValue) -> Result<f32, Rejection> {
        number(value).map(|x| x as f32)
    }

    pub(super) fn small(value: &AttributeValue) -> Result<i8, Rejection> {
        match *value {
            AttributeValue::Int(n) => i8::try_from(n).map_err(|_| Rejection::OutOfRange),
            ref other => Err(Rejection::kind(ValueKind::Int, other)),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "range is checked; fractions truncate toward zero"
    )]
    pub(super) fn int(value: &AttributeValue) -> Result<i32, Rejection> {
        match *value {
            AttributeValue::Int(n) => i32::try_from(n).map_err(|_| Rejection::OutOfRange),
            AttributeValue::Float(x) => {
                if x.is_finite() && x >= f64::from(i32::MIN) && x <= f64::from(i32::MAX) {
                    Ok(x as i32)
                } else {
                    Err(Rejection::OutOfRange)
                }
            }
            ref other => Err(Rejection::kind(ValueKind::Number, other)),
        }
    }

    pub(super) fn flag(value: &AttributeValue) -> Result<bool, Rejection> {
        match *value {
            AttributeValue::Bool(b) => Ok(b),
            ref other => Err(Rejection::kind(ValueKind::Bool, other)),
        }
    }

    /// Paints must be finite so that sets holding them stay `Eq`.
    pub(super) fn paint(value: &AttributeValue) -> Result<&Brush, Rejection> {
        match value {
            AttributeValue::Paint(brush) if paint_is_finite(brush) => Ok(brush),
            AttributeValue::Paint(_) => Err(Rejection::OutOfRange),
            other => Err(Rejection::kind(ValueKind::Paint, other)),
        }
    }

    fn paint_is_finite(brush: &Brush) -> bool {
        let finite = |components: &[f32; 4]| components.iter().all(|c| c.is_finite());
        match brush {
            Brush::Solid(color) => finite(&color.components),
            Brush::Gradient(gradient) => {
                let geometry = match gradient.kind {
                    GradientKind::Linear(p) => p.start.is_finite() && p.end.is_finite(),
                    GradientKind::Radial(p) => {
                        p.start_center.is_finite()
                            && p.end_center.is_finite()
                            && p.start_radius.is_finite()
                            && p.end_radius.is_finite()
                    }
                    GradientKind::Sweep(p) => {
                        p.center.is_finite() && p.start_angle.is_finite() && p.end_angle.is_finite()
                    }
                };
                geometry
                    && gradient
                        .stops
                        .iter()
                        .all(|stop| stop.offset.is_finite() && finite(&stop.color.components))
            }
            Brush::Image(image) => image.sampler.alpha.is_finite(),
        }
    }
}

macro_rules! slot {
    (float $field:ident where |$w:ident| $valid:expr) => {
        Slot {
            write: |v, value| {
                let $w = coerce::float(value)?;
                if $valid {
                    v.$field = $w;
                    Ok(())
                } else {
                    Err(Rejection::OutOfRange)
                }
            },
            reset: |v| v.$field = Values::DEFAULT.$field,
            is_default: |v| v.$field == Values::DEFAULT.$field,
            eq: |a, b| a.$field == b.$field,
            copy: |dst, src| dst.$field = src.$field,
            export: |v| Some(AttributeValue::Float(f64::from(v.$field))),
        }
    };
    (small $field:ident in $range:expr) => {
        Slot {
            write: |v, value| {
                let n = coerce::small(value)?;
                if ($range).contains(&n) {
                    v.$field = n;
                    Ok(())
                } else {
                    Err(Rejection::OutOfRange)
                }
            },
            reset: |v| v.$field = Values::DEFAULT.$field,
            is_default: |v| v.$field == Values::DEFAULT.$field,
            eq: |a, b| a.$field == b.$field,
            copy: |dst, src| dst.$field = src.$field,
            export: |v| Some(AttributeValue::Int(i64::from(v.$field))),
        }
    };
    (flag $field:ident) => {
        Slot {
            write: |v, value| {
                v.$field = coerce::flag(value)?;
                Ok(())
            },
            reset: |v| v.$field = false,
            is_default: |v| !v.$field,
            eq: |a, b| a.$field == b.$field,
            copy: |dst, src| dst.$field = src.$field,
            export: |v| Some(AttributeValue::Bool(v.$field)),
        }
    };
    (opaque $field:ident) => {
        Slot {
            write: |v, value| match value {
                AttributeValue::Opaque(o) => {
                    v.$field = Some(o.clone());
                    Ok(())
                }
                other => Err(Rejection::kind(ValueKind::Opaque, other)),
            },
            reset: |v| v.$field = None,
            is_default: |v| v.$field.is_none(),
            eq: |a, b| a.$field == b.$field,
            copy: |dst, src| dst.$field.clone_from(&src.$field),
            export: |v| v.$field.clone().map(AttributeValue::Opaque),
        }
    };
    (paint $field:ident) => {
        Slot {
            write: |v, value| {
                v.$field = Some(coerce::paint(value)?.clone());
                Ok(())
            },
            reset: |v| v.$field = None,
            is_default: |v| v.$field.is_none(),
            eq: |a, b| a.$field == b.$field,
            copy: |dst, src| dst.$field.clone_from(&src.$field),
            export: |v| v.$field.clone().map(AttributeValue::Paint),
        }
    };
}

const FAMILY: Slot = Slot {
    write: |v, value| match value {
        AttributeValue::String(s) => {
            let name = s.trim();
            v.family = if name.is_empty() || name == DEFAULT_FAMILY {
                None
            } else if name.len() == s.len() {
                Some(s.clone())
            } else {
                Some(name.into())
            };
            Ok(())
        }
        other => Err(Rejection::kind(ValueKind::String, other)),
    },
    reset: |v| v.family = None,
    is_default: |v| v.family.is_none(),
    eq: |a, b| a.family() == b.family(),
    copy: |dst, src| dst.family.clone_from(&src.family),
    export: |v| {
        Some(AttributeValue::String(
            v.family.clone().unwrap_or_else(|| DEFAULT_FAMILY.into()),
        ))
    },
};

const TRANSFORM: Slot = Slot {
    write: |v, value| match value {
        AttributeValue::Transform(t) => {
            if !t.transform().is_finite() {
                return Err(Rejection::OutOfRange);
            }
            v.transform = (!t.is_identity()).then_some(t.transform());
            Ok(())
        }
        other => Err(Rejection::kind(ValueKind::Transform, other)),
    },
    reset: |v| v.transform = None,
    is_default: |v| v.transform.is_none(),
    eq: |a, b| a.transform == b.transform,
    copy: |dst, src| dst.transform = src.transform,
    export: |v| {
        Some(AttributeValue::Transform(TransformAttribute::new(
            v.transform.unwrap_or(Affine::IDENTITY),
        )))
    },
};

const RUN_DIRECTION: Slot = Slot {
    write: |v, value| {
        // `false` is left-to-right, `true` is right-to-left.
        let n = match *value {
            AttributeValue::Bool(rtl) => i8::from(rtl),
            _ => coerce::small(value)?,
        };
        if (-2..=1).contains(&n) {
            v.run_direction = n;
            Ok(())
        } else {
            Err(Rejection::OutOfRange)
        }
    },
    ..slot!(small run_direction in -2..=1)
};

const JUSTIFICATION: Slot = Slot {
    write: |v, value| {
        let j = coerce::float(value)?;
        if j.is_nan() {
            return Err(Rejection::OutOfRange);
        }
        v.justification = j.clamp(0.0, 1.0);
        Ok(())
    },
    ..slot!(float justification where |j| !j.is_nan())
};

const STYLE_CODE: Slot = Slot {
    write: |v, value| {
        v.style_code = coerce::int(value)?;
        Ok(())
    },
    reset: |v| v.style_code = 0,
    is_default: |v| v.style_code == 0,
    eq: |a, b| a.style_code == b.style_code,
    copy: |dst, src| dst.style_code = src.style_code,
    export: |v| Some(AttributeValue::Int(i64::from(v.style_code))),
};

/// Registry entry for one attribute.
#[derive(Copy, Clone)]
pub struct AttributeInfo {
    id: AttributeId,
    slot: Option<Slot>,
}

impl AttributeInfo {
    const fn primary(id: AttributeId, slot: Slot) -> Self {
        Self {
            id,
            slot: Some(slot),
        }
    }

    const fn derived(id: AttributeId) -> Self {
        Self { id, slot: None }
    }

    /// Returns the attribute this entry describes.
    #[must_use]
    #[inline]
    pub const fn id(&self) -> AttributeId {
        self.id
    }

    /// Returns `true` if the attribute is derived (read-only).
    #[must_use]
    #[inline]
    pub const fn is_derived(&self) -> bool {
        self.slot.is_none()
    }

    /// Returns the canonical default of a primary attribute.
    ///
    /// Returns `None` for derived attributes and for attributes whose default
    /// is the absence of a value.
    #[must_use]
    pub fn default_value(&self) -> Option<AttributeValue> {
        self.slot.and_then(|slot| (slot.export)(&Values::DEFAULT))
    }
}

impl fmt::Debug for AttributeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeInfo")
            .field("id", &self.id)
            .field("derived", &self.is_derived())
            .finish_non_exhaustive()
    }
}

const ENTRIES: [AttributeInfo; AttributeId::COUNT] = {
    use AttributeId as A;
    use AttributeInfo as I;
    [
        I::primary(A::Family, FAMILY),
        I::primary(A::Weight, slot!(float weight where |w| w > 0.0 && w < 10.0)),
        I::primary(A::Width, slot!(float width where |w| (0.5..10.0).contains(&w))),
        I::primary(A::Posture, slot!(float posture where |p| (-1.0..=1.0).contains(&p))),
        I::primary(A::Size, slot!(float size where |s| s >= 0.0 && s.is_finite())),
        I::primary(A::Transform, TRANSFORM),
        I::primary(A::Superscript, slot!(small superscript in -7..=7)),
        I::primary(A::Font, slot!(opaque font)),
        I::primary(A::CharReplacement, slot!(opaque char_replacement)),
        I::primary(A::Foreground, slot!(paint foreground)),
        I::primary(A::Background, slot!(paint background)),
        I::primary(A::Underline, slot!(small underline in -1..6)),
        I::primary(A::Strikethrough, slot!(flag strikethrough)),
        I::primary(A::RunDirection, RUN_DIRECTION),
        I::primary(A::BidiEmbedding, slot!(small bidi_embedding in -61..62)),
        I::primary(A::Justification, JUSTIFICATION),
        I::primary(A::InputMethodHighlight, slot!(opaque input_method_highlight)),
        I::primary(A::InputMethodUnderline, slot!(small input_method_underline in -1..6)),
        I::primary(A::SwapColors, slot!(flag swap_colors)),
        I::primary(A::NumericShaping, slot!(opaque numeric_shaping)),
        I::primary(A::Kerning, slot!(small kerning in 0..=1)),
        I::primary(A::Ligatures, slot!(small ligatures in 0..=1)),
        I::primary(A::Tracking, slot!(float tracking where |t| (-1.0..=10.0).contains(&t))),
        I::primary(A::StyleCode, STYLE_CODE),
        I::primary(
            A::SyntheticPosture,
            slot!(float synthetic_posture where |p| (-1.0..=1.0).contains(&p)),
        ),
        I::primary(A::PostureVertical, slot!(flag posture_vertical)),
        I::primary(A::WeightX, slot!(float weight_x where |w| w > 0.0 && w < 10.0)),
        I::primary(A::WeightY, slot!(float weight_y where |w| w > 0.0 && w < 10.0)),
        I::primary(A::SolidSize, slot!(flag solid_size)),
        I::primary(A::SolidSizeX, slot!(flag solid_size_x)),
        I::primary(A::SolidSizeY, slot!(flag solid_size_y)),
        I::primary(A::BitmapBoldGray, slot!(flag bitmap_bold_gray)),
        I::primary(A::BitmapBoldGrayNorth, slot!(flag bitmap_bold_gray_north)),
        I::primary(A::BitmapBoldGrayEast, slot!(flag bitmap_bold_gray_east)),
        I::primary(A::BitmapBoldGraySouth, slot!(flag bitmap_bold_gray_south)),
        I::primary(A::BitmapBoldGrayWest, slot!(flag bitmap_bold_gray_west)),
        I::primary(A::FlipHorizontal, slot!(flag flip_horizontal)),
        I::primary(A::FlipVertical, slot!(flag flip_vertical)),
        I::derived(A::BaselineTransform),
    ]
};

const _: () = {
    let mut i = 0;
    while i < ENTRIES.len() {
        assert!(
            ENTRIES[i].id as usize == i,
            "registry entries must be in ordinal order"
        );
        assert!(
            ENTRIES[i].slot.is_none() == ENTRIES[i].id.is_derived(),
            "exactly the derived attributes lack storage"
        );
        i += 1;
    }
};

static REGISTRY: [AttributeInfo; AttributeId::COUNT] = ENTRIES;

/// Attributes compared first by set equality, most likely to differ first.
pub(crate) const COMPARE_FIRST: [AttributeId; 8] = [
    AttributeId::Size,
    AttributeId::Underline,
    AttributeId::Strikethrough,
    AttributeId::Weight,
    AttributeId::Posture,
    AttributeId::Family,
    AttributeId::Foreground,
    AttributeId::Transform,
];

/// Mask of [`COMPARE_FIRST`].
pub(crate) const COMPARE_FIRST_MASK: AttributeMask = {
    let mut bits = 0_u64;
    let mut i = 0;
    while i < COMPARE_FIRST.len() {
        bits |= 1_u64 << COMPARE_FIRST[i].index();
        i += 1;
    }
    AttributeMask::from_bits_truncate(bits)
};

/// The process-wide attribute catalogue.
///
/// Stateless; all methods are associated functions over a static table.
///
/// # Example
///
/// ```rust
/// use understory_text_attributes::{AttributeId, AttributeRegistry, AttributeValue};
///
/// let info = AttributeRegistry::info(AttributeId::Size);
/// assert!(!info.is_derived());
/// assert_eq!(info.default_value(), Some(AttributeValue::Float(12.0)));
///
/// // Strict coercion reports why a value is unusable.
/// assert!(AttributeRegistry::try_coerce(AttributeId::Weight, &AttributeValue::Float(20.0)).is_err());
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct AttributeRegistry;

impl AttributeRegistry {
    /// Returns the registry entry for an attribute.
    #[must_use]
    #[inline]
    pub fn info(id: AttributeId) -> &'static AttributeInfo {
        &REGISTRY[usize::from(id.index())]
    }

    /// Returns every registry entry in ordinal order.
    pub fn iter() -> core::slice::Iter<'static, AttributeInfo> {
        REGISTRY.iter()
    }

    /// Coerces, validates and normalizes a value for a primary attribute.
    ///
    /// Returns the normalized value as it would be stored. `Default` coerces
    /// to the attribute's default.
    ///
    /// # Panics
    ///
    /// Panics if `id` is derived.
    pub fn try_coerce(
        id: AttributeId,
        value: &AttributeValue,
    ) -> Result<AttributeValue, CoercionError> {
        let slot = slot(id);
        let mut scratch = Values::DEFAULT;
        if !matches!(value, AttributeValue::Default) {
            (slot.write)(&mut scratch, value).map_err(|r| r.at(id))?;
        }
        Ok((slot.export)(&scratch).unwrap_or(AttributeValue::Default))
    }
}

/// Returns the storage slot of a primary attribute.
///
/// # Panics
///
/// Panics if `id` is derived.
pub(crate) fn slot(id: AttributeId) -> &'static Slot {
    match &AttributeRegistry::info(id).slot {
        Some(slot) => slot,
        None => panic!("attribute `{id}` is derived and has no storage"),
    }
}

/// Maps external keys to attributes.
///
/// Implementations must be collision free: distinct primary attributes map
/// to distinct keys, and `resolve(key(id)) == Some(id)`.
pub trait KeyResolver {
    /// Resolves an external key. Unknown keys resolve to `None`.
    fn resolve(&self, key: &str) -> Option<AttributeId>;

    /// Returns the external key of an attribute.
    fn key(&self, id: AttributeId) -> &str;
}

/// Resolves the canonical attribute names returned by [`AttributeId::name`].
///
/// Derived attributes never resolve.
#[derive(Copy, Clone, Debug, Default)]
pub struct CanonicalKeys;

impl KeyResolver for CanonicalKeys {
    fn resolve(&self, key: &str) -> Option<AttributeId> {
        AttributeId::from_name(key).filter(|id| !id.is_derived())
    }

    fn key(&self, id: AttributeId) -> &str {
        id.name()
    }
}

impl<R: KeyResolver + ?Sized> KeyResolver for &R {
    fn resolve(&self, key: &str) -> Option<AttributeId> {
        (**self).resolve(key)
    }

    fn key(&self, id: AttributeId) -> &str {
        (**self).key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Opaque;
    use peniko::{Brush, Color, Gradient};

    fn coerce(
        id: AttributeId,
        value: impl Into<AttributeValue>,
    ) -> Result<AttributeValue, CoercionError> {
        AttributeRegistry::try_coerce(id, &value.into())
    }

    #[test]
    fn table_covers_every_attribute() {
        assert_eq!(AttributeRegistry::iter().len(), AttributeId::COUNT);
        for (info, id) in AttributeRegistry::iter().zip(AttributeId::ALL) {
            assert_eq!(info.id(), id);
            assert_eq!(info.is_derived(), id.is_derived());
        }
    }

    #[test]
    fn compare_first_holds_primary_attributes() {
        assert_eq!(COMPARE_FIRST_MASK.len() as usize, COMPARE_FIRST.len());
        assert!(AttributeMask::PRIMARY.contains_all(COMPARE_FIRST_MASK));
    }

    #[test]
    fn defaults() {
        let default = |id| AttributeRegistry::info(id).default_value();
        assert_eq!(default(AttributeId::Size), Some(AttributeValue::Float(12.0)));
        assert_eq!(default(AttributeId::Family), Some(AttributeValue::from("Default")));
        assert_eq!(default(AttributeId::Underline), Some(AttributeValue::Int(-1)));
        assert_eq!(default(AttributeId::RunDirection), Some(AttributeValue::Int(-2)));
        assert_eq!(default(AttributeId::Foreground), None);
        assert_eq!(default(AttributeId::BaselineTransform), None);
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(coerce(AttributeId::Size, 24), Ok(AttributeValue::Float(24.0)));
        assert_eq!(
            coerce(AttributeId::Size, "big"),
            Err(CoercionError::TypeMismatch {
                attribute: AttributeId::Size,
                expected: ValueKind::Number,
                found: ValueKind::String,
            })
        );
    }

    #[test]
    fn ranges_are_enforced() {
        let out = |id| Err(CoercionError::OutOfRange { attribute: id });
        assert_eq!(coerce(AttributeId::Weight, 0.0), out(AttributeId::Weight));
        assert_eq!(coerce(AttributeId::Weight, 10.0), out(AttributeId::Weight));
        assert_eq!(coerce(AttributeId::WeightX, 12.0), out(AttributeId::WeightX));
        assert_eq!(coerce(AttributeId::Width, 0.25), out(AttributeId::Width));
        assert_eq!(coerce(AttributeId::Posture, 1.5), out(AttributeId::Posture));
        assert_eq!(coerce(AttributeId::Size, -1.0), out(AttributeId::Size));
        assert_eq!(coerce(AttributeId::Size, f64::NAN), out(AttributeId::Size));
        assert_eq!(coerce(AttributeId::Superscript, 8), out(AttributeId::Superscript));
        assert_eq!(coerce(AttributeId::Underline, 6), out(AttributeId::Underline));
        assert_eq!(coerce(AttributeId::Kerning, 2), out(AttributeId::Kerning));
        assert_eq!(coerce(AttributeId::Tracking, 11.0), out(AttributeId::Tracking));
        assert_eq!(coerce(AttributeId::BidiEmbedding, 62), out(AttributeId::BidiEmbedding));
        assert_eq!(coerce(AttributeId::Tracking, 0.5), Ok(AttributeValue::Float(0.5)));
    }

    #[test]
    fn small_integers_do_not_wrap() {
        assert_eq!(
            coerce(AttributeId::Superscript, 256 + 3),
            Err(CoercionError::OutOfRange {
                attribute: AttributeId::Superscript
            })
        );
        assert!(coerce(AttributeId::Superscript, 3.0).is_err());
    }

    #[test]
    fn family_is_trimmed() {
        assert_eq!(
            coerce(AttributeId::Family, "  Serif "),
            Ok(AttributeValue::from("Serif"))
        );
        assert_eq!(
            coerce(AttributeId::Family, "   "),
            Ok(AttributeValue::from("Default"))
        );
    }

    #[test]
    fn justification_is_clamped() {
        assert_eq!(coerce(AttributeId::Justification, 3.0), Ok(AttributeValue::Float(1.0)));
        assert_eq!(coerce(AttributeId::Justification, -3), Ok(AttributeValue::Float(0.0)));
        assert!(coerce(AttributeId::Justification, f64::NAN).is_err());
    }

    #[test]
    fn run_direction_accepts_booleans() {
        assert_eq!(coerce(AttributeId::RunDirection, true), Ok(AttributeValue::Int(1)));
        assert_eq!(coerce(AttributeId::RunDirection, false), Ok(AttributeValue::Int(0)));
        assert_eq!(coerce(AttributeId::RunDirection, -1), Ok(AttributeValue::Int(-1)));
        assert!(coerce(AttributeId::RunDirection, 2).is_err());
    }

    #[test]
    fn style_code_accepts_floats() {
        assert_eq!(coerce(AttributeId::StyleCode, 3.7), Ok(AttributeValue::Int(3)));
        assert!(coerce(AttributeId::StyleCode, f64::INFINITY).is_err());
    }

    #[test]
    fn transform_rejects_non_finite() {
        let bad = Affine::new([f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(coerce(AttributeId::Transform, bad).is_err());
        assert_eq!(
            coerce(AttributeId::Transform, Affine::IDENTITY),
            Ok(AttributeValue::Transform(TransformAttribute::IDENTITY))
        );
    }

    #[test]
    fn opaque_attributes_require_opaque_values() {
        let font = Opaque::new(17_u32);
        assert_eq!(
            coerce(AttributeId::Font, font.clone()),
            Ok(AttributeValue::Opaque(font))
        );
        assert!(coerce(AttributeId::Font, "Serif").is_err());
    }

    #[test]
    fn paints_must_be_finite() {
        let red = Brush::Solid(Color::from_rgb8(255, 0, 0));
        assert_eq!(
            coerce(AttributeId::Foreground, red.clone()),
            Ok(AttributeValue::Paint(red))
        );
        let nan = Brush::Solid(Color::new([f32::NAN, 0.0, 0.0, 1.0]));
        assert!(coerce(AttributeId::Foreground, nan).is_err());
        let stops = [Color::BLACK, Color::new([0.0, f32::INFINITY, 0.0, 1.0])];
        let gradient = Gradient::new_linear((0.0, 0.0), (1.0, 0.0)).with_stops(stops);
        assert!(coerce(AttributeId::Background, Brush::Gradient(gradient)).is_err());
        let unbounded = Gradient::new_linear((0.0, 0.0), (f64::NAN, 0.0)).with_stops(&stops[..1]);
        assert!(coerce(AttributeId::Background, Brush::Gradient(unbounded)).is_err());
    }

    #[test]
    fn default_marker_coerces_to_default() {
        assert_eq!(
            AttributeRegistry::try_coerce(AttributeId::Weight, &AttributeValue::Default),
            Ok(AttributeValue::Float(1.0))
        );
        assert_eq!(
            AttributeRegistry::try_coerce(AttributeId::Font, &AttributeValue::Default),
            Ok(AttributeValue::Default)
        );
    }

    #[test]
    #[should_panic(expected = "derived")]
    fn coercing_derived_attribute_panics() {
        let _ = AttributeRegistry::try_coerce(
            AttributeId::BaselineTransform,
            &AttributeValue::from(Affine::IDENTITY),
        );
    }

    #[test]
    fn canonical_keys_skip_derived() {
        assert_eq!(CanonicalKeys.resolve("size"), Some(AttributeId::Size));
        assert_eq!(CanonicalKeys.resolve("baseline_transform"), None);
        assert_eq!(CanonicalKeys.key(AttributeId::WeightY), "weight_y");
    }
}
