// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute identification.
//!
//! This module provides [`AttributeId`], the closed enumeration of every
//! attribute an [`AttributeSet`](crate::AttributeSet) can hold.

use core::fmt;

use crate::error::UnknownAttribute;
use crate::mask::AttributeMask;

/// Identifies one text attribute.
///
/// The set of attributes is closed and ordered: the discriminant of each
/// variant is its ordinal, which is also its bit position in an
/// [`AttributeMask`]. Ordinal order is the stable iteration order used for
/// merging, map export and string rendering.
///
/// All variants except [`AttributeId::BaselineTransform`] are *primary*
/// attributes and may be written directly. `BaselineTransform` is *derived*
/// from [`AttributeId::Transform`] and is read-only.
///
/// # Example
///
/// ```rust
/// use understory_text_attributes::AttributeId;
///
/// assert_eq!(AttributeId::Size.index(), 4);
/// assert_eq!(AttributeId::Size.name(), "size");
/// assert_eq!(AttributeId::from_name("size"), Some(AttributeId::Size));
/// assert!(AttributeId::BaselineTransform.is_derived());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum AttributeId {
    /// Font family name.
    Family = 0,
    /// Stroke weight; `1.0` is regular.
    Weight,
    /// Horizontal width; `1.0` is regular.
    Width,
    /// Slant, in `[-1, 1]`.
    Posture,
    /// Point size.
    Size,
    /// Glyph transform.
    Transform,
    /// Superscript (positive) or subscript (negative) level.
    Superscript,
    /// Explicit font reference.
    Font,
    /// Replacement graphic drawn instead of glyphs.
    CharReplacement,
    /// Text paint.
    Foreground,
    /// Background paint.
    Background,
    /// Underline style code; `-1` is off.
    Underline,
    /// Strikethrough on/off.
    Strikethrough,
    /// Bidi run direction code.
    RunDirection,
    /// Bidi embedding level.
    BidiEmbedding,
    /// Justification weight, in `[0, 1]`.
    Justification,
    /// Input method highlight token.
    InputMethodHighlight,
    /// Input method underline style code; `-1` is off.
    InputMethodUnderline,
    /// Swap foreground and background.
    SwapColors,
    /// Numeric shaping policy.
    NumericShaping,
    /// Kerning on (`1`) or off (`0`).
    Kerning,
    /// Ligatures on (`1`) or off (`0`).
    Ligatures,
    /// Letter spacing, in ems.
    Tracking,
    /// Renderer-specific style code.
    StyleCode,
    /// Synthetic slant applied by the rasterizer, in `[-1, 1]`.
    SyntheticPosture,
    /// Slant toward the bottom edge instead of the right edge.
    PostureVertical,
    /// Horizontal stroke weight.
    WeightX,
    /// Vertical stroke weight.
    WeightY,
    /// Keep glyph advance fixed when emboldening.
    SolidSize,
    /// Keep horizontal advance fixed when emboldening.
    SolidSizeX,
    /// Keep vertical advance fixed when emboldening.
    SolidSizeY,
    /// Gray-level bitmap emboldening.
    BitmapBoldGray,
    /// Gray-level emboldening toward the top edge.
    BitmapBoldGrayNorth,
    /// Gray-level emboldening toward the right edge.
    BitmapBoldGrayEast,
    /// Gray-level emboldening toward the bottom edge.
    BitmapBoldGraySouth,
    /// Gray-level emboldening toward the left edge.
    BitmapBoldGrayWest,
    /// Mirror glyphs left to right.
    FlipHorizontal,
    /// Mirror glyphs top to bottom.
    FlipVertical,
    /// Rotation component of [`AttributeId::Transform`] (derived).
    BaselineTransform,
}

impl AttributeId {
    /// Total number of attributes, primary and derived.
    pub const COUNT: usize = 39;

    /// Number of primary (directly settable) attributes.
    pub const PRIMARY_COUNT: usize = 38;

    /// Every attribute, in ordinal order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Family,
        Self::Weight,
        Self::Width,
        Self::Posture,
        Self::Size,
        Self::Transform,
        Self::Superscript,
        Self::Font,
        Self::CharReplacement,
        Self::Foreground,
        Self::Background,
        Self::Underline,
        Self::Strikethrough,
        Self::RunDirection,
        Self::BidiEmbedding,
        Self::Justification,
        Self::InputMethodHighlight,
        Self::InputMethodUnderline,
        Self::SwapColors,
        Self::NumericShaping,
        Self::Kerning,
        Self::Ligatures,
        Self::Tracking,
        Self::StyleCode,
        Self::SyntheticPosture,
        Self::PostureVertical,
        Self::WeightX,
        Self::WeightY,
        Self::SolidSize,
        Self::SolidSizeX,
        Self::SolidSizeY,
        Self::BitmapBoldGray,
        Self::BitmapBoldGrayNorth,
        Self::BitmapBoldGrayEast,
        Self::BitmapBoldGraySouth,
        Self::BitmapBoldGrayWest,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::BaselineTransform,
    ];

    /// Returns the ordinal of this attribute.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the attribute with the given ordinal, if any.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns a mask containing only this attribute.
    #[must_use]
    #[inline]
    pub const fn mask(self) -> AttributeMask {
        AttributeMask::from_bits_truncate(1_u64 << self.index())
    }

    /// Returns `true` if this attribute is derived from other attributes and
    /// therefore cannot be written directly.
    #[must_use]
    #[inline]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::BaselineTransform)
    }

    /// Returns the canonical name of this attribute.
    ///
    /// Names are lowercase with underscores and double as the default
    /// external keys (see [`CanonicalKeys`](crate::CanonicalKeys)).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Weight => "weight",
            Self::Width => "width",
            Self::Posture => "posture",
            Self::Size => "size",
            Self::Transform => "transform",
            Self::Superscript => "superscript",
            Self::Font => "font",
            Self::CharReplacement => "char_replacement",
            Self::Foreground => "foreground",
            Self::Background => "background",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::RunDirection => "run_direction",
            Self::BidiEmbedding => "bidi_embedding",
            Self::Justification => "justification",
            Self::InputMethodHighlight => "input_method_highlight",
            Self::InputMethodUnderline => "input_method_underline",
            Self::SwapColors => "swap_colors",
            Self::NumericShaping => "numeric_shaping",
            Self::Kerning => "kerning",
            Self::Ligatures => "ligatures",
            Self::Tracking => "tracking",
            Self::StyleCode => "style_code",
            Self::SyntheticPosture => "synthetic_posture",
            Self::PostureVertical => "posture_vertical",
            Self::WeightX => "weight_x",
            Self::WeightY => "weight_y",
            Self::SolidSize => "solid_size",
            Self::SolidSizeX => "solid_size_x",
            Self::SolidSizeY => "solid_size_y",
            Self::BitmapBoldGray => "bitmap_bold_gray",
            Self::BitmapBoldGrayNorth => "bitmap_bold_gray_north",
            Self::BitmapBoldGrayEast => "bitmap_bold_gray_east",
            Self::BitmapBoldGraySouth => "bitmap_bold_gray_south",
            Self::BitmapBoldGrayWest => "bitmap_bold_gray_west",
            Self::FlipHorizontal => "flip_horizontal",
            Self::FlipVertical => "flip_vertical",
            Self::BaselineTransform => "baseline_transform",
        }
    }

    /// Looks up an attribute by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }

    /// Returns an iterator over the primary attributes in ordinal order.
    pub fn primary() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|id| !id.is_derived())
    }
}

impl TryFrom<u8> for AttributeId {
    type Error = UnknownAttribute;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(UnknownAttribute { index })
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn ordinals_match_table_positions() {
        for (i, id) in AttributeId::ALL.iter().enumerate() {
            assert_eq!(usize::from(id.index()), i);
        }
    }

    #[test]
    fn exactly_one_derived_attribute() {
        let derived = AttributeId::ALL.iter().filter(|id| id.is_derived()).count();
        assert_eq!(derived, AttributeId::COUNT - AttributeId::PRIMARY_COUNT);
        assert_eq!(AttributeId::primary().count(), AttributeId::PRIMARY_COUNT);
    }

    #[test]
    fn names_round_trip() {
        for id in AttributeId::ALL {
            assert_eq!(AttributeId::from_name(id.name()), Some(id));
        }
        assert_eq!(AttributeId::from_name("colour"), None);
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert_eq!(AttributeId::try_from(4), Ok(AttributeId::Size));
        assert_eq!(
            AttributeId::try_from(39),
            Err(UnknownAttribute { index: 39 })
        );
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(format!("{}", AttributeId::WeightX), "weight_x");
    }

    #[test]
    fn mask_is_single_bit() {
        let mask = AttributeId::Tracking.mask();
        assert_eq!(mask.len(), 1);
        assert!(mask.contains(AttributeId::Tracking));
    }
}
