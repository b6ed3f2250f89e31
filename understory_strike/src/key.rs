// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strike keys.

use alloc::sync::Arc;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicU32, Ordering};

use kurbo::Affine;
use understory_text_attributes::{AttributeSet, TransformAttribute};

use crate::hints::{
    AntialiasHint, Antialiasing, FractionalMetrics, FractionalMetricsHint, GaspPolicy,
    resolve_antialiasing, resolve_fractional_metrics,
};
use crate::projection::{FontStyle, ShapingProjection};

/// Identifies a strike: a set of glyph images rasterized under one geometry
/// and one rendering configuration.
///
/// A key is immutable once built. It shares its device and glyph transforms
/// with whoever built it instead of copying them; the `Arc`s make that
/// aliasing safe. Use [`detached`](Self::detached) for a key with private
/// copies.
///
/// Equality is exact. The hash covers the transforms and the packed style and
/// hint bits, and is computed on first use and cached.
///
/// ```rust
/// use kurbo::Affine;
/// use understory_strike::{Antialiasing, StrikeKey};
/// use understory_text_attributes::{AttributeId, AttributeSet};
///
/// let set = AttributeSet::new().with(AttributeId::Weight, 2.0_f32);
/// let key = StrikeKey::builder(Affine::IDENTITY, Affine::scale(12.0))
///     .attributes(&set)
///     .antialiasing(Antialiasing::On)
///     .build();
///
/// assert_eq!(key.value_mask(), 0x11);
/// assert_eq!(key.hash_code(), key.clone().hash_code());
/// ```
pub struct StrikeKey {
    device: Arc<Affine>,
    glyph: Arc<Affine>,
    style: FontStyle,
    antialiasing: Antialiasing,
    fractional_metrics: FractionalMetrics,
    bitmap_first: bool,
    projection: ShapingProjection,
    value_mask: u32,
    /// Cached hash; zero until first computed.
    hash: AtomicU32,
}

impl StrikeKey {
    /// Starts a key for glyphs drawn through `device` with the combined
    /// `glyph` transform (font size, font transform and device transform).
    pub fn builder(
        device: impl Into<Arc<Affine>>,
        glyph: impl Into<Arc<Affine>>,
    ) -> StrikeKeyBuilder {
        StrikeKeyBuilder {
            device: device.into(),
            glyph: glyph.into(),
            style: FontStyle::empty(),
            antialiasing: Antialiasing::Off,
            fractional_metrics: FractionalMetrics::Off,
            bitmap_first: false,
            projection: ShapingProjection::DEFAULT,
        }
    }

    /// Returns the device transform.
    #[must_use]
    pub fn device(&self) -> &Arc<Affine> {
        &self.device
    }

    /// Returns the combined glyph transform.
    #[must_use]
    pub fn glyph(&self) -> &Arc<Affine> {
        &self.glyph
    }

    /// Returns the font style.
    #[must_use]
    pub const fn style(&self) -> FontStyle {
        self.style
    }

    /// Returns the antialiasing mode.
    #[must_use]
    pub const fn antialiasing(&self) -> Antialiasing {
        self.antialiasing
    }

    /// Returns the fractional metrics mode.
    #[must_use]
    pub const fn fractional_metrics(&self) -> FractionalMetrics {
        self.fractional_metrics
    }

    /// Returns `true` if embedded bitmaps are preferred over outlines.
    #[must_use]
    pub const fn bitmap_first(&self) -> bool {
        self.bitmap_first
    }

    /// Returns the shaping projection.
    #[must_use]
    pub const fn projection(&self) -> &ShapingProjection {
        &self.projection
    }

    /// Returns the style and hint bits packed into one word.
    ///
    /// The style occupies the low bits; each non-default hint mode adds its
    /// own bit.
    #[must_use]
    pub const fn value_mask(&self) -> u32 {
        self.value_mask
    }

    /// Returns the key's hash, computing it on first use.
    ///
    /// Never zero. The projection is not hashed.
    #[must_use]
    pub fn hash_code(&self) -> u32 {
        match self.hash.load(Ordering::Relaxed) {
            0 => {
                let hash = affine_hash(&self.glyph)
                    .wrapping_add(affine_hash(&self.device))
                    .wrapping_add(self.value_mask)
                    .max(1);
                self.hash.store(hash, Ordering::Relaxed);
                hash
            }
            hash => hash,
        }
    }

    /// Returns an equal key holding private copies of the transforms.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            device: Arc::new(*self.device),
            glyph: Arc::new(*self.glyph),
            ..self.clone()
        }
    }
}

/// Hashes the coefficients of `transform`.
///
/// Zeros of either sign hash alike, since they compare equal.
#[expect(clippy::cast_possible_truncation, reason = "folding to 32 bits")]
fn affine_hash(transform: &Affine) -> u32 {
    let hash = transform.as_coeffs().iter().fold(0_u64, |hash, c| {
        (hash.rotate_left(5) ^ (c + 0.0).to_bits()).wrapping_mul(0x517c_c1b7_2722_0a95)
    });
    (hash ^ (hash >> 32)) as u32
}

impl Clone for StrikeKey {
    fn clone(&self) -> Self {
        Self {
            device: self.device.clone(),
            glyph: self.glyph.clone(),
            style: self.style,
            antialiasing: self.antialiasing,
            fractional_metrics: self.fractional_metrics,
            bitmap_first: self.bitmap_first,
            projection: self.projection,
            value_mask: self.value_mask,
            hash: AtomicU32::new(self.hash.load(Ordering::Relaxed)),
        }
    }
}

impl PartialEq for StrikeKey {
    fn eq(&self, other: &Self) -> bool {
        fn same(a: &Arc<Affine>, b: &Arc<Affine>) -> bool {
            Arc::ptr_eq(a, b) || **a == **b
        }

        self.value_mask == other.value_mask
            && self.projection == other.projection
            && self.bitmap_first == other.bitmap_first
            && same(&self.glyph, &other.glyph)
            && same(&self.device, &other.device)
    }
}

// Builders reject non-finite transforms, so coefficients are never NaN.
impl Eq for StrikeKey {}

impl Hash for StrikeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Debug for StrikeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrikeKey")
            .field("device", &self.device)
            .field("glyph", &self.glyph)
            .field("style", &self.style)
            .field("antialiasing", &self.antialiasing)
            .field("fractional_metrics", &self.fractional_metrics)
            .field("bitmap_first", &self.bitmap_first)
            .field("projection", &self.projection)
            .field("value_mask", &self.value_mask)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for StrikeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "strike style={:#x} aa={} fm={} device={} glyph={} bitmap_first={} {}",
            self.style.bits(),
            self.antialiasing,
            self.fractional_metrics,
            TransformAttribute::new(*self.device),
            TransformAttribute::new(*self.glyph),
            self.bitmap_first,
            self.projection
        )
    }
}

/// Builder for [`StrikeKey`].
#[derive(Clone, Debug)]
pub struct StrikeKeyBuilder {
    device: Arc<Affine>,
    glyph: Arc<Affine>,
    style: FontStyle,
    antialiasing: Antialiasing,
    fractional_metrics: FractionalMetrics,
    bitmap_first: bool,
    projection: ShapingProjection,
}

impl StrikeKeyBuilder {
    /// Sets the font style. Bits outside [`FontStyle::all`] are dropped.
    #[must_use]
    pub fn style(mut self, style: FontStyle) -> Self {
        // Unknown bits would overlap the hint bits of the value mask.
        self.style = style.intersection(FontStyle::all());
        self
    }

    /// Sets the antialiasing mode.
    #[must_use]
    pub fn antialiasing(mut self, antialiasing: Antialiasing) -> Self {
        self.antialiasing = antialiasing;
        self
    }

    /// Sets the fractional metrics mode.
    #[must_use]
    pub fn fractional_metrics(mut self, fractional_metrics: FractionalMetrics) -> Self {
        self.fractional_metrics = fractional_metrics;
        self
    }

    /// Resolves requested hints into the antialiasing and fractional metrics
    /// modes.
    ///
    /// `point_size` is the device size passed to `gasp`; see
    /// [`glyph_point_size`](crate::glyph_point_size).
    #[must_use]
    pub fn hints<G: GaspPolicy + ?Sized>(
        self,
        antialias: AntialiasHint,
        fractional_metrics: FractionalMetricsHint,
        gasp: &G,
        point_size: u32,
    ) -> Self {
        self.antialiasing(resolve_antialiasing(antialias, gasp, point_size))
            .fractional_metrics(resolve_fractional_metrics(fractional_metrics))
    }

    /// Prefers embedded bitmaps over outlines.
    #[must_use]
    pub fn bitmap_first(mut self, bitmap_first: bool) -> Self {
        self.bitmap_first = bitmap_first;
        self
    }

    /// Sets the shaping projection.
    #[must_use]
    pub fn projection(mut self, projection: ShapingProjection) -> Self {
        self.projection = projection;
        self
    }

    /// Takes the style and the shaping projection from `attributes`.
    #[must_use]
    pub fn attributes(self, attributes: &AttributeSet) -> Self {
        self.style(FontStyle::from_attributes(attributes))
            .projection(ShapingProjection::from_attributes(attributes))
    }

    /// Builds the key.
    ///
    /// # Panics
    ///
    /// Panics if either transform has a non-finite coefficient.
    #[must_use]
    pub fn build(self) -> StrikeKey {
        assert!(
            self.device.is_finite() && self.glyph.is_finite(),
            "strike transforms must be finite"
        );
        StrikeKey {
            value_mask: u32::from(self.style.bits())
                | self.antialiasing.bits()
                | self.fractional_metrics.bits(),
            device: self.device,
            glyph: self.glyph,
            style: self.style,
            antialiasing: self.antialiasing,
            fractional_metrics: self.fractional_metrics,
            bitmap_first: self.bitmap_first,
            projection: self.projection,
            hash: AtomicU32::new(0),
        }
    }
}
