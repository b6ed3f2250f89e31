// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attribute set.

use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::Affine;
use peniko::Brush;

use crate::derived::DerivedTransforms;
use crate::error::CoercionError;
use crate::id::AttributeId;
use crate::mask::AttributeMask;
use crate::registry::{COMPARE_FIRST, COMPARE_FIRST_MASK, Slot, slot};
use crate::state::{AttributeState, Mark};
use crate::value::{AttributeValue, Opaque, TransformAttribute};
use crate::values::Values;

/// A sparse, typed set of text attributes.
///
/// Every primary attribute always has a value; attributes nobody assigned
/// hold their canonical default. On top of the values the set tracks which
/// attributes were explicitly assigned (*defined*) and which of those differ
/// from their default (*non-default*), see [`AttributeState`].
///
/// Writes go through the attribute's registry slot, which validates and
/// normalizes the value. The generic [`set`](Self::set) is lenient: a value
/// that cannot be used assigns the attribute's default instead.
/// [`try_set`](Self::try_set) is the strict variant.
///
/// The baseline transform is derived from the transform attribute and
/// recomputed whenever the transform is written. It cannot be written
/// directly; doing so panics.
///
/// # Example
///
/// ```rust
/// use understory_text_attributes::{AttributeId, AttributeSet, AttributeValue};
///
/// let mut set = AttributeSet::new();
/// set.set(AttributeId::Size, 24.0_f32);
/// set.set(AttributeId::Weight, 2.0_f32);
/// set.set_default(AttributeId::Size);
///
/// assert!(set.is_defined(AttributeId::Size));
/// assert!(!set.is_non_default(AttributeId::Size));
/// assert_eq!(set.size(), 12.0);
/// assert_eq!(set.get(AttributeId::Size), None);
/// assert_eq!(set.get(AttributeId::Weight), Some(AttributeValue::Float(2.0)));
/// ```
#[derive(Clone, Debug)]
pub struct AttributeSet {
    state: AttributeState,
    values: Values,
    derived: DerivedTransforms,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}

#[track_caller]
fn assert_primary(id: AttributeId, op: &str) {
    assert!(!id.is_derived(), "cannot {op} derived attribute `{id}`");
}

macro_rules! accessors {
    ($($get:ident, $set:ident: $ty:ty = $id:ident;)*) => {
        $(
            #[doc = concat!("Returns the `", stringify!($get), "` attribute.")]
            #[must_use]
            #[inline]
            pub fn $get(&self) -> $ty {
                self.values.$get
            }

            #[doc = concat!("Sets the `", stringify!($get), "` attribute.")]
            pub fn $set(&mut self, value: $ty) {
                self.set(AttributeId::$id, value);
            }
        )*
    };
}

macro_rules! shared_accessors {
    ($($get:ident, $set:ident: $ty:ty = $id:ident;)*) => {
        $(
            #[doc = concat!("Returns the `", stringify!($get), "` attribute, if any.")]
            #[must_use]
            #[inline]
            pub fn $get(&self) -> Option<&$ty> {
                self.values.$get.as_ref()
            }

            #[doc = concat!("Sets the `", stringify!($get), "` attribute.")]
            pub fn $set(&mut self, value: $ty) {
                self.set(AttributeId::$id, value);
            }
        )*
    };
}

impl AttributeSet {
    /// Creates a set with every attribute at its default and none defined.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AttributeState::EMPTY,
            values: Values::DEFAULT,
            derived: DerivedTransforms::NONE,
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, id: AttributeId, value: impl Into<AttributeValue>) -> Self {
        self.set(id, value);
        self
    }

    /// Returns the defined / non-default masks.
    #[must_use]
    #[inline]
    pub const fn state(&self) -> AttributeState {
        self.state
    }

    /// Returns the mask of explicitly assigned attributes.
    #[must_use]
    #[inline]
    pub const fn defined(&self) -> AttributeMask {
        self.state.defined()
    }

    /// Returns the mask of attributes that differ from their default.
    #[must_use]
    #[inline]
    pub const fn non_default(&self) -> AttributeMask {
        self.state.non_default()
    }

    /// Returns `true` if `id` was explicitly assigned.
    #[must_use]
    #[inline]
    pub const fn is_defined(&self, id: AttributeId) -> bool {
        self.state.defined().contains(id)
    }

    /// Returns `true` if `id` differs from its default.
    #[must_use]
    #[inline]
    pub const fn is_non_default(&self, id: AttributeId) -> bool {
        self.state.non_default().contains(id)
    }

    /// Returns `true` if every attribute in `mask` is defined.
    #[must_use]
    pub const fn all_defined(&self, mask: AttributeMask) -> bool {
        self.state.defined().contains_all(mask)
    }

    /// Returns `true` if any attribute in `mask` is defined.
    #[must_use]
    pub const fn any_defined(&self, mask: AttributeMask) -> bool {
        self.state.defined().intersects(mask)
    }

    /// Returns `true` if any attribute in `mask` differs from its default.
    #[must_use]
    pub const fn any_non_default(&self, mask: AttributeMask) -> bool {
        self.state.non_default().intersects(mask)
    }

    /// Returns the value of `id` if it differs from its default.
    ///
    /// An attribute that is explicitly at its default reads as `None`, the
    /// same as one never assigned. Use [`value`](Self::value) or the typed
    /// accessors to read defaults.
    #[must_use]
    pub fn get(&self, id: AttributeId) -> Option<AttributeValue> {
        if self.is_non_default(id) {
            self.value(id)
        } else {
            None
        }
    }

    /// Returns the current value of `id`, defaults included.
    ///
    /// Returns `None` only for attributes whose value is absent, such as an
    /// unset paint or font.
    #[must_use]
    pub fn value(&self, id: AttributeId) -> Option<AttributeValue> {
        if id.is_derived() {
            self.derived
                .baseline
                .map(|tx| AttributeValue::Transform(TransformAttribute::new(tx)))
        } else {
            (slot(id).export)(&self.values)
        }
    }

    /// Assigns a value to a primary attribute.
    ///
    /// The value is coerced, validated and normalized by the attribute's
    /// registry slot. If that fails, the attribute is set to its default
    /// instead; no error is reported. [`AttributeValue::Default`] also sets
    /// the default.
    ///
    /// # Panics
    ///
    /// Panics if `id` is derived.
    #[track_caller]
    pub fn set(&mut self, id: AttributeId, value: impl Into<AttributeValue>) {
        assert_primary(id, "set");
        if let Err(err) = self.write(id, &value.into()) {
            tracing::trace!(attribute = %id, error = %err, "rejected attribute value; using default");
            self.set_default(id);
        }
    }

    /// Assigns a value to a primary attribute, reporting rejected values.
    ///
    /// On error the set is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] if the value has the wrong kind or fails
    /// the attribute's range check.
    ///
    /// # Panics
    ///
    /// Panics if `id` is derived.
    #[track_caller]
    pub fn try_set(
        &mut self,
        id: AttributeId,
        value: impl Into<AttributeValue>,
    ) -> Result<(), CoercionError> {
        assert_primary(id, "set");
        self.write(id, &value.into())
    }

    /// Writes through the slot; leaves everything untouched on rejection.
    pub(crate) fn write(
        &mut self,
        id: AttributeId,
        value: &AttributeValue,
    ) -> Result<(), CoercionError> {
        if matches!(value, AttributeValue::Default) {
            self.set_default(id);
            return Ok(());
        }
        let slot = slot(id);
        (slot.write)(&mut self.values, value).map_err(|r| r.at(id))?;
        self.update(id, slot);
        Ok(())
    }

    /// Refreshes the masks after `id`'s storage changed.
    pub(crate) fn update(&mut self, id: AttributeId, slot: &Slot) {
        let mark = if (slot.is_default)(&self.values) {
            Mark::Default
        } else {
            Mark::NonDefault
        };
        self.state.mark(id, mark);
        if id == AttributeId::Transform {
            self.refresh_derived();
        }
    }

    fn refresh_derived(&mut self) {
        self.derived = DerivedTransforms::from_transform(self.values.transform);
        let mark = if self.derived.baseline.is_some() {
            Mark::NonDefault
        } else {
            Mark::Unset
        };
        self.state.mark(AttributeId::BaselineTransform, mark);
    }

    fn reset(&mut self, id: AttributeId, mark: Mark) {
        (slot(id).reset)(&mut self.values);
        self.state.mark(id, mark);
        if id == AttributeId::Transform {
            self.refresh_derived();
        }
    }

    /// Assigns the canonical default to `id` and marks it defined.
    ///
    /// # Panics
    ///
    /// Panics if `id` is derived.
    #[track_caller]
    pub fn set_default(&mut self, id: AttributeId) {
        assert_primary(id, "reset");
        self.reset(id, Mark::Default);
    }

    /// Assigns the canonical default to `id` and marks it never assigned.
    ///
    /// # Panics
    ///
    /// Panics if `id` is derived.
    #[track_caller]
    pub fn unset(&mut self, id: AttributeId) {
        assert_primary(id, "unset");
        self.reset(id, Mark::Unset);
    }

    /// Copies `id` from `other` if `other` defines it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is derived.
    #[track_caller]
    pub fn set_from(&mut self, id: AttributeId, other: &Self) {
        assert_primary(id, "set");
        if other.is_defined(id) {
            let slot = slot(id);
            (slot.copy)(&mut self.values, &other.values);
            self.update(id, slot);
        }
    }

    /// Marks every attribute in `mask` as defined.
    ///
    /// Attributes that were not defined are defined at their default.
    ///
    /// # Panics
    ///
    /// Panics if `mask` contains a derived attribute.
    #[track_caller]
    pub fn define_all(&mut self, mask: AttributeMask) {
        assert!(
            !mask.intersects(AttributeMask::DERIVED),
            "cannot define derived attributes {:?}",
            mask & AttributeMask::DERIVED
        );
        for id in (mask & !self.defined()).iter() {
            self.state.mark(id, Mark::Default);
        }
    }

    /// Forgets every attribute that is defined at its default.
    pub fn unset_default(&mut self) {
        let at_default = self.defined() & !self.non_default() & AttributeMask::PRIMARY;
        for id in at_default.iter() {
            self.state.mark(id, Mark::Unset);
        }
    }

    /// Returns the rotation of the text baseline, if the transform has one.
    ///
    /// Derived from the transform attribute; includes its translation.
    #[must_use]
    #[inline]
    pub fn baseline_transform(&self) -> Option<Affine> {
        self.derived.baseline
    }

    /// Returns the transform attribute with the baseline rotation factored
    /// out, if anything remains.
    #[must_use]
    #[inline]
    pub fn char_transform(&self) -> Option<Affine> {
        self.derived.glyph
    }

    /// Returns the font family name.
    #[must_use]
    pub fn family(&self) -> &str {
        self.values.family()
    }

    /// Sets the font family name.
    pub fn set_family(&mut self, family: &str) {
        self.set(AttributeId::Family, family);
    }

    /// Returns the transform attribute, if it is not the identity.
    #[must_use]
    #[inline]
    pub fn transform(&self) -> Option<Affine> {
        self.values.transform
    }

    /// Sets the transform attribute. The identity clears it.
    pub fn set_transform(&mut self, transform: Affine) {
        self.set(AttributeId::Transform, transform);
    }

    accessors! {
        weight, set_weight: f32 = Weight;
        width, set_width: f32 = Width;
        posture, set_posture: f32 = Posture;
        size, set_size: f32 = Size;
        superscript, set_superscript: i8 = Superscript;
        underline, set_underline: i8 = Underline;
        strikethrough, set_strikethrough: bool = Strikethrough;
        run_direction, set_run_direction: i8 = RunDirection;
        bidi_embedding, set_bidi_embedding: i8 = BidiEmbedding;
        justification, set_justification: f32 = Justification;
        input_method_underline, set_input_method_underline: i8 = InputMethodUnderline;
        swap_colors, set_swap_colors: bool = SwapColors;
        kerning, set_kerning: i8 = Kerning;
        ligatures, set_ligatures: i8 = Ligatures;
        tracking, set_tracking: f32 = Tracking;
        style_code, set_style_code: i32 = StyleCode;
        synthetic_posture, set_synthetic_posture: f32 = SyntheticPosture;
        posture_vertical, set_posture_vertical: bool = PostureVertical;
        weight_x, set_weight_x: f32 = WeightX;
        weight_y, set_weight_y: f32 = WeightY;
        solid_size, set_solid_size: bool = SolidSize;
        solid_size_x, set_solid_size_x: bool = SolidSizeX;
        solid_size_y, set_solid_size_y: bool = SolidSizeY;
        bitmap_bold_gray, set_bitmap_bold_gray: bool = BitmapBoldGray;
        bitmap_bold_gray_north, set_bitmap_bold_gray_north: bool = BitmapBoldGrayNorth;
        bitmap_bold_gray_east, set_bitmap_bold_gray_east: bool = BitmapBoldGrayEast;
        bitmap_bold_gray_south, set_bitmap_bold_gray_south: bool = BitmapBoldGraySouth;
        bitmap_bold_gray_west, set_bitmap_bold_gray_west: bool = BitmapBoldGrayWest;
        flip_horizontal, set_flip_horizontal: bool = FlipHorizontal;
        flip_vertical, set_flip_vertical: bool = FlipVertical;
    }

    shared_accessors! {
        font, set_font: Opaque = Font;
        char_replacement, set_char_replacement: Opaque = CharReplacement;
        input_method_highlight, set_input_method_highlight: Opaque = InputMethodHighlight;
        numeric_shaping, set_numeric_shaping: Opaque = NumericShaping;
        foreground, set_foreground: Brush = Foreground;
        background, set_background: Brush = Background;
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        if self.state != other.state {
            return false;
        }
        let defined = self.defined() & AttributeMask::PRIMARY;
        COMPARE_FIRST
            .iter()
            .copied()
            .filter(|id| defined.contains(*id))
            .chain((defined & !COMPARE_FIRST_MASK).iter())
            .all(|id| (slot(id).eq)(&self.values, &other.values))
    }
}

// Stored floats and paints are validated finite; opaque values compare by
// pointer first.
impl Eq for AttributeSet {}

impl Hash for AttributeSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.state.hash_code());
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        f.write_str("{")?;
        for id in (self.defined() & AttributeMask::PRIMARY).iter() {
            write!(f, "{sep}{id}=")?;
            sep = ", ";
            match (slot(id).export)(&self.values) {
                Some(AttributeValue::String(s)) => write!(f, "\"{s}\"")?,
                Some(value) => write!(f, "{value}")?,
                None => f.write_str("none")?,
            }
            if !self.is_non_default(id) {
                f.write_str("*")?;
            }
        }
        if let Some(tx) = self.derived.baseline {
            write!(f, "{sep}btx={}", TransformAttribute::new(tx))?;
            sep = ", ";
        }
        if let Some(tx) = self.derived.glyph {
            write!(f, "{sep}ctx={}", TransformAttribute::new(tx))?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use core::f64::consts::FRAC_PI_2;
    use peniko::Color;

    fn subset_holds(set: &AttributeSet) -> bool {
        set.non_default().bits() & !set.defined().bits() == 0
    }

    #[test]
    fn fresh_set_is_all_defaults() {
        let set = AttributeSet::new();
        assert!(set.defined().is_empty());
        assert!(set.non_default().is_empty());
        for info in crate::AttributeRegistry::iter() {
            assert_eq!(set.get(info.id()), None);
            if !info.is_derived() {
                assert_eq!(set.value(info.id()), info.default_value());
            }
        }
        assert_eq!(set.family(), "Default");
        assert_eq!(set.size(), 12.0);
        assert_eq!(set.underline(), -1);
        assert_eq!(set.run_direction(), -2);
    }

    #[test]
    fn size_weight_then_default_size() {
        let mut set = AttributeSet::new();
        set.set(AttributeId::Size, 24.0_f32);
        set.set(AttributeId::Weight, 2.0_f32);
        set.set_default(AttributeId::Size);

        let expected: AttributeMask = [AttributeId::Size, AttributeId::Weight]
            .into_iter()
            .collect();
        assert_eq!(set.defined(), expected);
        assert_eq!(set.non_default(), AttributeId::Weight.mask());
        assert_eq!(set.size(), 12.0);
        assert_eq!(set.get(AttributeId::Weight), Some(AttributeValue::Float(2.0)));
    }

    #[test]
    fn rejected_value_falls_back_to_default() {
        let mut set = AttributeSet::new();
        set.set_weight(3.0);
        set.set(AttributeId::Weight, 42.0_f32);
        assert!(set.is_defined(AttributeId::Weight));
        assert!(!set.is_non_default(AttributeId::Weight));
        assert_eq!(set.weight(), 1.0);

        set.set(AttributeId::Size, "huge");
        assert!(set.is_defined(AttributeId::Size));
        assert_eq!(set.size(), 12.0);
    }

    #[test]
    fn try_set_leaves_set_untouched() {
        let mut set = AttributeSet::new().with(AttributeId::Posture, 0.5_f32);
        let before = set.clone();
        let err = set.try_set(AttributeId::Posture, 4.0_f32).unwrap_err();
        assert_eq!(
            err,
            CoercionError::OutOfRange {
                attribute: AttributeId::Posture
            }
        );
        assert_eq!(set, before);
        assert_eq!(set.posture(), 0.5);
    }

    #[test]
    fn setting_default_value_is_defined_but_default() {
        let mut set = AttributeSet::new();
        set.set(AttributeId::Kerning, 0);
        assert!(set.is_defined(AttributeId::Kerning));
        assert!(!set.is_non_default(AttributeId::Kerning));

        set.set(AttributeId::Kerning, AttributeValue::Default);
        assert!(set.is_defined(AttributeId::Kerning));
    }

    #[test]
    fn unset_forgets_attribute() {
        let mut set = AttributeSet::new();
        set.set_strikethrough(true);
        set.unset(AttributeId::Strikethrough);
        assert!(!set.is_defined(AttributeId::Strikethrough));
        assert!(!set.strikethrough());
        assert_eq!(set, AttributeSet::new());
    }

    #[test]
    fn subset_law_holds_across_operations() {
        let mut set = AttributeSet::new();
        let ops: [&dyn Fn(&mut AttributeSet); 7] = [
            &|s| s.set_size(30.0),
            &|s| s.set_default(AttributeId::Size),
            &|s| s.set_transform(Affine::rotate(FRAC_PI_2)),
            &|s| s.unset(AttributeId::Transform),
            &|s| s.set(AttributeId::Underline, 99),
            &|s| s.define_all(AttributeMask::PRIMARY),
            &|s| s.unset_default(),
        ];
        for op in ops {
            op(&mut set);
            assert!(subset_holds(&set), "{set}");
        }
    }

    #[test]
    fn setting_current_value_is_a_no_op() {
        let mut set = AttributeSet::new()
            .with(AttributeId::Family, "Serif")
            .with(AttributeId::Tracking, 0.1_f32)
            .with(AttributeId::Transform, Affine::rotate(0.3) * Affine::scale(2.0))
            .with(AttributeId::Foreground, Brush::Solid(Color::BLACK));
        for id in AttributeId::primary() {
            let before = set.clone();
            if let Some(value) = set.get(id) {
                set.set(id, value);
                assert_eq!(set, before, "{id}");
                assert_eq!(set.state(), before.state(), "{id}");
            }
        }
    }

    #[test]
    fn transform_drives_derived_transforms() {
        let mut set = AttributeSet::new();
        set.set_transform(Affine::rotate(FRAC_PI_2));
        assert!(set.is_non_default(AttributeId::BaselineTransform));
        assert!(set.baseline_transform().is_some());
        assert_eq!(set.char_transform(), None);
        assert!(set.get(AttributeId::BaselineTransform).is_some());

        set.set_transform(Affine::IDENTITY);
        assert_eq!(set.transform(), None);
        assert_eq!(set.baseline_transform(), None);
        assert_eq!(set.char_transform(), None);
        assert!(!set.is_defined(AttributeId::BaselineTransform));
        assert!(!set.is_non_default(AttributeId::BaselineTransform));
    }

    #[test]
    fn resetting_transform_clears_derived_transforms() {
        let mut set = AttributeSet::new();
        set.set_transform(Affine::rotate(1.0) * Affine::scale(2.0));
        assert!(set.char_transform().is_some());
        set.set_default(AttributeId::Transform);
        assert_eq!(set.baseline_transform(), None);
        assert_eq!(set.char_transform(), None);
    }

    #[test]
    #[should_panic(expected = "derived attribute")]
    fn setting_derived_attribute_panics() {
        AttributeSet::new().set(AttributeId::BaselineTransform, Affine::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "derived attribute")]
    fn unsetting_derived_attribute_panics() {
        AttributeSet::new().unset(AttributeId::BaselineTransform);
    }

    #[test]
    #[should_panic(expected = "cannot define derived attributes")]
    fn defining_derived_attribute_panics() {
        AttributeSet::new().define_all(AttributeMask::ALL);
    }

    #[test]
    fn define_all_and_unset_default() {
        let mut set = AttributeSet::new();
        set.set_underline(2);
        set.define_all(AttributeId::Size.mask() | AttributeId::Family.mask());
        assert!(set.all_defined(AttributeId::Size.mask() | AttributeId::Underline.mask()));
        assert!(!set.any_non_default(AttributeId::Size.mask()));

        set.unset_default();
        assert_eq!(set.defined(), AttributeId::Underline.mask());
        assert!(set.any_defined(AttributeMask::ALL));
    }

    #[test]
    fn set_from_copies_only_defined() {
        let source = AttributeSet::new().with(AttributeId::Ligatures, 1);
        let mut target = AttributeSet::new().with(AttributeId::Size, 9.0_f32);
        target.set_from(AttributeId::Ligatures, &source);
        target.set_from(AttributeId::Size, &source);
        assert_eq!(target.ligatures(), 1);
        assert_eq!(target.size(), 9.0);
    }

    #[test]
    fn equality_compares_values() {
        let a = AttributeSet::new().with(AttributeId::Size, 10.0_f32);
        let b = AttributeSet::new().with(AttributeId::Size, 11.0_f32);
        assert_eq!(a.state(), b.state());
        assert_ne!(a, b);

        let c = AttributeSet::new().with(AttributeId::Size, 10.0_f32);
        assert_eq!(a, c);
    }

    #[test]
    fn equal_masks_hash_equal() {
        use core::hash::BuildHasher;
        let hasher = hashbrown::DefaultHashBuilder::default();
        let a = AttributeSet::new().with(AttributeId::Size, 10.0_f32);
        let b = AttributeSet::new().with(AttributeId::Size, 11.0_f32);
        assert_eq!(hasher.hash_one(&a), hasher.hash_one(&b));
    }

    #[test]
    fn clone_is_independent() {
        let original = AttributeSet::new().with(AttributeId::Transform, Affine::rotate(FRAC_PI_2));
        let mut copy = original.clone();
        copy.set_transform(Affine::scale(2.0));
        assert!(original.baseline_transform().is_some());
        assert_eq!(copy.baseline_transform(), None);
        assert_ne!(original, copy);
    }

    #[test]
    fn opaque_and_paint_accessors() {
        #[derive(Debug, PartialEq)]
        struct FontRef(u16);

        let mut set = AttributeSet::new();
        assert_eq!(set.font(), None);
        set.set_font(Opaque::new(FontRef(3)));
        assert_eq!(
            set.font().and_then(|f| f.downcast_ref::<FontRef>()),
            Some(&FontRef(3))
        );
        set.set_foreground(Brush::Solid(Color::WHITE));
        assert_eq!(set.foreground(), Some(&Brush::Solid(Color::WHITE)));
    }

    #[test]
    fn overflowing_transform_keeps_char_transform() {
        let huge = Affine::new([1e200, 1e200, 0.0, 1.0, 0.0, 0.0]);
        let set = AttributeSet::new().with(AttributeId::Transform, huge);
        assert_eq!(set.transform(), Some(huge));
        assert_eq!(set.baseline_transform(), None);
        assert_eq!(set.char_transform(), Some(huge));
        assert!(subset_holds(&set));
    }

    #[test]
    fn non_finite_paint_falls_back_to_default() {
        let mut set = AttributeSet::new();
        set.set_foreground(Brush::Solid(Color::new([f32::NAN, 0.0, 0.0, 1.0])));
        assert_eq!(set.foreground(), None);
        assert!(set.is_defined(AttributeId::Foreground));
        assert!(!set.any_non_default(AttributeId::Foreground.mask()));
        assert_eq!(set, set.clone());

        let nan = Brush::Solid(Color::new([0.0, 0.0, f32::NAN, 1.0]));
        assert!(set.try_set(AttributeId::Background, nan).is_err());
        assert!(!set.is_defined(AttributeId::Background));
    }

    #[test]
    fn display_marks_defaults() {
        let mut set = AttributeSet::new();
        set.set_family("Serif");
        set.set_default(AttributeId::Size);
        assert_eq!(set.to_string(), "{family=\"Serif\", size=12*}");

        let rotated =
            AttributeSet::new().with(AttributeId::Transform, Affine::translate((1.0, 2.0)));
        assert_eq!(
            format!("{rotated}"),
            "{transform=[1, 0, 0, 1, 1, 2], btx=[1, 0, 0, 1, 1, 2]}"
        );
    }
}
