// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering hints and their reduction to strike dimensions.
//!
//! Callers request rendering through the wider [`AntialiasHint`] and
//! [`FractionalMetricsHint`] enumerations. Strikes are only distinguished by
//! the reduced [`Antialiasing`] and [`FractionalMetrics`] modes, so subpixel
//! orderings that share a layout collapse onto one strike.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::Affine;
use smallvec::SmallVec;

/// Antialiasing mode of a strike.
///
/// The discriminants are the bits each mode contributes to a strike key's
/// value mask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Antialiasing {
    /// Aliased rendering.
    #[default]
    Off = 0,
    /// Grayscale antialiasing.
    On = 0x10,
    /// Subpixel antialiasing with horizontal stripes (RGB or BGR).
    LcdHorizontal = 0x20,
    /// Subpixel antialiasing with vertical stripes (RGB or BGR).
    LcdVertical = 0x40,
}

impl Antialiasing {
    /// Returns the value mask bit of this mode.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Returns `true` for the subpixel modes.
    #[must_use]
    pub const fn is_lcd(self) -> bool {
        matches!(self, Self::LcdHorizontal | Self::LcdVertical)
    }
}

impl fmt::Display for Antialiasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::On => "on",
            Self::LcdHorizontal => "lcd-h",
            Self::LcdVertical => "lcd-v",
        })
    }
}

/// Fractional metrics mode of a strike.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FractionalMetrics {
    /// Advances are rounded to whole device pixels.
    #[default]
    Off = 0,
    /// Advances keep their fractional part.
    On = 0x100,
}

impl FractionalMetrics {
    /// Returns the value mask bit of this mode.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for FractionalMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::On => "on",
        })
    }
}

/// A requested antialiasing hint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AntialiasHint {
    /// Platform default, which renders aliased.
    #[default]
    Default,
    /// Aliased rendering.
    Off,
    /// Grayscale antialiasing.
    On,
    /// Antialiasing chosen per device size by a [`GaspPolicy`].
    Gasp,
    /// Subpixel, horizontal RGB stripes.
    LcdHrgb,
    /// Subpixel, horizontal BGR stripes.
    LcdHbgr,
    /// Subpixel, vertical RGB stripes.
    LcdVrgb,
    /// Subpixel, vertical BGR stripes.
    LcdVbgr,
}

/// A requested fractional metrics hint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FractionalMetricsHint {
    /// Platform default, which rounds advances.
    #[default]
    Default,
    /// Round advances.
    Off,
    /// Keep fractional advances.
    On,
}

/// Decides whether text at a given device point size is antialiased.
///
/// Fonts usually answer this from their `gasp` table; see [`GaspTable`].
/// Closures taking the point size also implement it.
pub trait GaspPolicy {
    /// Returns `true` if glyphs rendered at `point_size` should be antialiased.
    fn use_antialiasing(&self, point_size: u32) -> bool;
}

impl<F> GaspPolicy for F
where
    F: Fn(u32) -> bool,
{
    fn use_antialiasing(&self, point_size: u32) -> bool {
        self(point_size)
    }
}

/// A size-ranged antialiasing table.
///
/// Each range covers the sizes up to and including its upper bound. Sizes
/// past the last bound use the last range, and an empty table antialiases
/// every size.
///
/// ```rust
/// use understory_strike::{GaspPolicy, GaspTable};
///
/// // Aliased up to 8ppem, smooth above.
/// let table = GaspTable::new().with_range(8, false).with_range(0xFFFF, true);
/// assert!(!table.use_antialiasing(8));
/// assert!(table.use_antialiasing(9));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GaspTable {
    ranges: SmallVec<[(u16, bool); 4]>,
}

impl GaspTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a range ending at `max_ppem`.
    ///
    /// Ranges may be added in any order.
    #[must_use]
    pub fn with_range(mut self, max_ppem: u16, antialias: bool) -> Self {
        let at = self.ranges.partition_point(|(max, _)| *max < max_ppem);
        if self.ranges.get(at).is_some_and(|(max, _)| *max == max_ppem) {
            self.ranges[at].1 = antialias;
        } else {
            self.ranges.insert(at, (max_ppem, antialias));
        }
        self
    }

    /// Returns the number of ranges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the table has no ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl GaspPolicy for GaspTable {
    fn use_antialiasing(&self, point_size: u32) -> bool {
        self.ranges
            .iter()
            .find(|(max, _)| point_size <= u32::from(*max))
            .or(self.ranges.last())
            .is_none_or(|(_, antialias)| *antialias)
    }
}

/// Reduces `hint` to the antialiasing mode that identifies a strike.
///
/// Total over every hint. `gasp` is consulted only for [`AntialiasHint::Gasp`],
/// with the device point size from [`glyph_point_size`].
#[must_use]
pub fn resolve_antialiasing<G: GaspPolicy + ?Sized>(
    hint: AntialiasHint,
    gasp: &G,
    point_size: u32,
) -> Antialiasing {
    match hint {
        AntialiasHint::Default | AntialiasHint::Off => Antialiasing::Off,
        AntialiasHint::On => Antialiasing::On,
        AntialiasHint::Gasp => {
            let antialias = gasp.use_antialiasing(point_size);
            tracing::trace!(point_size, antialias, "resolved gasp antialiasing");
            if antialias {
                Antialiasing::On
            } else {
                Antialiasing::Off
            }
        }
        AntialiasHint::LcdHrgb | AntialiasHint::LcdHbgr => Antialiasing::LcdHorizontal,
        AntialiasHint::LcdVrgb | AntialiasHint::LcdVbgr => Antialiasing::LcdVertical,
    }
}

/// Reduces `hint` to the fractional metrics mode that identifies a strike.
#[must_use]
pub fn resolve_fractional_metrics(hint: FractionalMetricsHint) -> FractionalMetrics {
    match hint {
        FractionalMetricsHint::Default | FractionalMetricsHint::Off => FractionalMetrics::Off,
        FractionalMetricsHint::On => FractionalMetrics::On,
    }
}

/// Returns the device point size glyphs are rendered at.
///
/// Combines the device transform, the font size and the font's own
/// transform, then measures the vertical extent of one em. NaN input yields 0.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "point sizes saturate; NaN maps to 0"
)]
pub fn glyph_point_size(device: Affine, font_size: f64, font_transform: Affine) -> u32 {
    let [_, _, shear_x, scale_y, _, _] =
        (device * Affine::scale(font_size) * font_transform).as_coeffs();
    let extent = if shear_x != 0.0 {
        (shear_x * shear_x + scale_y * scale_y).sqrt()
    } else {
        scale_y.abs()
    };
    (extent + 0.5) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_total() {
        let never = |_: u32| false;
        let cases = [
            (AntialiasHint::Default, Antialiasing::Off),
            (AntialiasHint::Off, Antialiasing::Off),
            (AntialiasHint::On, Antialiasing::On),
            (AntialiasHint::Gasp, Antialiasing::Off),
            (AntialiasHint::LcdHrgb, Antialiasing::LcdHorizontal),
            (AntialiasHint::LcdHbgr, Antialiasing::LcdHorizontal),
            (AntialiasHint::LcdVrgb, Antialiasing::LcdVertical),
            (AntialiasHint::LcdVbgr, Antialiasing::LcdVertical),
        ];
        for (hint, expected) in cases {
            assert_eq!(resolve_antialiasing(hint, &never, 12), expected, "{hint:?}");
        }
    }

    #[test]
    fn gasp_consults_policy_by_size() {
        let above_ten = |size: u32| size > 10;
        assert_eq!(
            resolve_antialiasing(AntialiasHint::Gasp, &above_ten, 10),
            Antialiasing::Off
        );
        assert_eq!(
            resolve_antialiasing(AntialiasHint::Gasp, &above_ten, 11),
            Antialiasing::On
        );
    }

    #[test]
    fn gasp_policy_is_ignored_for_explicit_hints() {
        let panics = |_: u32| -> bool { panic!("policy consulted") };
        assert_eq!(
            resolve_antialiasing(AntialiasHint::On, &panics, 12),
            Antialiasing::On
        );
    }

    #[test]
    fn gasp_table_ranges() {
        let table = GaspTable::new()
            .with_range(20, true)
            .with_range(8, false)
            .with_range(16, false);
        assert_eq!(table.len(), 3);
        assert!(!table.use_antialiasing(0));
        assert!(!table.use_antialiasing(8));
        assert!(!table.use_antialiasing(16));
        assert!(table.use_antialiasing(17));
        // Past the last range.
        assert!(table.use_antialiasing(400));
    }

    #[test]
    fn gasp_table_replaces_same_bound() {
        let table = GaspTable::new().with_range(8, false).with_range(8, true);
        assert_eq!(table.len(), 1);
        assert!(table.use_antialiasing(4));
    }

    #[test]
    fn empty_gasp_table_antialiases() {
        let table = GaspTable::new();
        assert!(table.is_empty());
        assert!(table.use_antialiasing(6));
    }

    #[test]
    fn fractional_metrics_resolution() {
        assert_eq!(
            resolve_fractional_metrics(FractionalMetricsHint::Default),
            FractionalMetrics::Off
        );
        assert_eq!(
            resolve_fractional_metrics(FractionalMetricsHint::Off),
            FractionalMetrics::Off
        );
        assert_eq!(
            resolve_fractional_metrics(FractionalMetricsHint::On),
            FractionalMetrics::On
        );
    }

    #[test]
    fn point_size_identity() {
        assert_eq!(glyph_point_size(Affine::IDENTITY, 12.0, Affine::IDENTITY), 12);
        assert_eq!(glyph_point_size(Affine::IDENTITY, 12.4, Affine::IDENTITY), 12);
        assert_eq!(glyph_point_size(Affine::IDENTITY, 12.5, Affine::IDENTITY), 13);
    }

    #[test]
    fn point_size_follows_device_scale() {
        assert_eq!(glyph_point_size(Affine::scale(2.0), 12.0, Affine::IDENTITY), 24);
        assert_eq!(
            glyph_point_size(Affine::scale_non_uniform(1.0, -3.0), 10.0, Affine::IDENTITY),
            30
        );
    }

    #[test]
    fn point_size_measures_sheared_extent() {
        // A quarter turn moves the em's height onto the shear term.
        let quarter = Affine::rotate(core::f64::consts::FRAC_PI_2);
        assert_eq!(glyph_point_size(Affine::IDENTITY, 16.0, quarter), 16);
    }

    #[test]
    fn point_size_of_nan_is_zero() {
        assert_eq!(glyph_point_size(Affine::IDENTITY, f64::NAN, Affine::IDENTITY), 0);
    }

    #[test]
    fn mode_bits_are_disjoint() {
        let all = [
            Antialiasing::On.bits(),
            Antialiasing::LcdHorizontal.bits(),
            Antialiasing::LcdVertical.bits(),
            FractionalMetrics::On.bits(),
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_eq!(a & b, 0, "{a:#x} overlaps {b:#x}");
            }
        }
        assert_eq!(Antialiasing::Off.bits() | FractionalMetrics::Off.bits(), 0);
    }
}
