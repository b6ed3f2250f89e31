// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slice of an attribute set that affects glyph rasterization.

use core::fmt;

use understory_text_attributes::AttributeSet;

/// Weight at and above which a font is styled bold.
pub const BOLD_WEIGHT: f32 = 2.0;

/// Posture at and above which a font is styled italic.
pub const ITALIC_POSTURE: f32 = 0.2;

bitflags::bitflags! {
    /// Coarse font style of a strike.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FontStyle: u8 {
        /// Bold face or synthetic emboldening.
        const BOLD   = 0b01;
        /// Italic face or synthetic slant.
        const ITALIC = 0b10;
    }
}

impl FontStyle {
    /// Derives the style from the weight and posture of `attributes`.
    #[must_use]
    pub fn from_attributes(attributes: &AttributeSet) -> Self {
        let mut style = Self::empty();
        style.set(Self::BOLD, attributes.weight() >= BOLD_WEIGHT);
        style.set(Self::ITALIC, attributes.posture() >= ITALIC_POSTURE);
        style
    }
}

bitflags::bitflags! {
    /// Boolean attributes that change how glyphs are rasterized.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShapingFlags: u16 {
        /// Slant runs toward the bottom for vertical text.
        const POSTURE_VERTICAL       = 1 << 0;
        /// Glyphs keep a fixed size.
        const SOLID_SIZE             = 1 << 1;
        /// Glyphs keep a fixed width.
        const SOLID_SIZE_X           = 1 << 2;
        /// Glyphs keep a fixed height.
        const SOLID_SIZE_Y           = 1 << 3;
        /// Grayscale emboldening of bitmap glyphs.
        const BITMAP_BOLD_GRAY       = 1 << 4;
        /// Bitmap emboldening grows north.
        const BITMAP_BOLD_GRAY_NORTH = 1 << 5;
        /// Bitmap emboldening grows east.
        const BITMAP_BOLD_GRAY_EAST  = 1 << 6;
        /// Bitmap emboldening grows south.
        const BITMAP_BOLD_GRAY_SOUTH = 1 << 7;
        /// Bitmap emboldening grows west.
        const BITMAP_BOLD_GRAY_WEST  = 1 << 8;
        /// Glyphs are mirrored left to right.
        const FLIP_HORIZONTAL        = 1 << 9;
        /// Glyphs are mirrored top to bottom.
        const FLIP_VERTICAL          = 1 << 10;
    }
}

impl ShapingFlags {
    /// Collects the flags set in `attributes`.
    #[must_use]
    pub fn from_attributes(attributes: &AttributeSet) -> Self {
        [
            (Self::POSTURE_VERTICAL, attributes.posture_vertical()),
            (Self::SOLID_SIZE, attributes.solid_size()),
            (Self::SOLID_SIZE_X, attributes.solid_size_x()),
            (Self::SOLID_SIZE_Y, attributes.solid_size_y()),
            (Self::BITMAP_BOLD_GRAY, attributes.bitmap_bold_gray()),
            (Self::BITMAP_BOLD_GRAY_NORTH, attributes.bitmap_bold_gray_north()),
            (Self::BITMAP_BOLD_GRAY_EAST, attributes.bitmap_bold_gray_east()),
            (Self::BITMAP_BOLD_GRAY_SOUTH, attributes.bitmap_bold_gray_south()),
            (Self::BITMAP_BOLD_GRAY_WEST, attributes.bitmap_bold_gray_west()),
            (Self::FLIP_HORIZONTAL, attributes.flip_horizontal()),
            (Self::FLIP_VERTICAL, attributes.flip_vertical()),
        ]
        .into_iter()
        .filter_map(|(flag, on)| on.then_some(flag))
        .collect()
    }
}

/// The attributes a strike depends on beyond its transforms and hints.
///
/// Two attribute sets with equal projections rasterize identical glyphs, so
/// everything else (paints, decorations, layout attributes) stays out of the
/// strike key.
///
/// ```rust
/// use peniko::{Brush, Color};
/// use understory_strike::ShapingProjection;
/// use understory_text_attributes::{AttributeId, AttributeSet};
///
/// let red = AttributeSet::new()
///     .with(AttributeId::WeightX, 1.5_f32)
///     .with(AttributeId::Foreground, Brush::Solid(Color::from_rgb8(255, 0, 0)));
/// let plain = AttributeSet::new().with(AttributeId::WeightX, 1.5_f32);
///
/// assert_eq!(
///     ShapingProjection::from_attributes(&red),
///     ShapingProjection::from_attributes(&plain)
/// );
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapingProjection {
    flags: ShapingFlags,
    style_code: i32,
    synthetic_posture: f32,
    weight: f32,
    weight_x: f32,
    weight_y: f32,
}

impl ShapingProjection {
    /// The projection of an attribute set with every attribute at its default.
    pub const DEFAULT: Self = Self {
        flags: ShapingFlags::empty(),
        style_code: 0,
        synthetic_posture: 0.0,
        weight: 1.0,
        weight_x: 1.0,
        weight_y: 1.0,
    };

    /// Projects `attributes`.
    #[must_use]
    pub fn from_attributes(attributes: &AttributeSet) -> Self {
        Self {
            flags: ShapingFlags::from_attributes(attributes),
            style_code: attributes.style_code(),
            synthetic_posture: attributes.synthetic_posture(),
            weight: attributes.weight(),
            weight_x: attributes.weight_x(),
            weight_y: attributes.weight_y(),
        }
    }

    /// Returns the rasterization flags.
    #[must_use]
    pub const fn flags(&self) -> ShapingFlags {
        self.flags
    }

    /// Returns the application style code.
    #[must_use]
    pub const fn style_code(&self) -> i32 {
        self.style_code
    }

    /// Returns the synthetic slant.
    #[must_use]
    pub const fn synthetic_posture(&self) -> f32 {
        self.synthetic_posture
    }

    /// Returns the weight.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns the horizontal emboldening weight.
    #[must_use]
    pub const fn weight_x(&self) -> f32 {
        self.weight_x
    }

    /// Returns the vertical emboldening weight.
    #[must_use]
    pub const fn weight_y(&self) -> f32 {
        self.weight_y
    }
}

impl Default for ShapingProjection {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Fields are only filled from validated attributes, which are never NaN.
impl Eq for ShapingProjection {}

impl fmt::Display for ShapingProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "flags={:#05x} style_code={} synthetic_posture={} weight={} weight_x={} weight_y={}",
            self.flags.bits(),
            self.style_code,
            self.synthetic_posture,
            self.weight,
            self.weight_x,
            self.weight_y
        )
    }
}
