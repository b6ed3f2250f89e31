// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Strike: cache keys for rasterized glyph strikes.
//!
//! A *strike* is the set of glyph images a font produces under one geometry
//! and one rendering configuration. Strikes are expensive to build, so
//! renderers cache them, and many text runs with different styling end up
//! sharing one. [`StrikeKey`] is the cache key.
//!
//! A key is made of:
//!
//! - the device transform and the combined glyph transform, shared through
//!   `Arc` rather than copied;
//! - a [`FontStyle`] and the reduced [`Antialiasing`] and
//!   [`FractionalMetrics`] modes, packed into a single value mask;
//! - a bitmap-first flag;
//! - a [`ShapingProjection`] of the text attributes that change glyph
//!   rasterization.
//!
//! Attributes outside the projection, such as paints and decorations, do not
//! reach the key, so runs that differ only in those share a strike.
//!
//! ## Hints
//!
//! Requested [`AntialiasHint`]s reduce to one of four antialiasing modes.
//! [`AntialiasHint::Gasp`] defers to a [`GaspPolicy`], usually a font's
//! [`GaspTable`], at the device point size from [`glyph_point_size`].
//!
//! ```rust
//! use kurbo::Affine;
//! use understory_strike::{
//!     AntialiasHint, FractionalMetricsHint, GaspTable, StrikeKey, glyph_point_size,
//! };
//! use understory_text_attributes::{AttributeId, AttributeSet};
//!
//! let device = Affine::scale(2.0);
//! let size = 7.0;
//! let gasp = GaspTable::new().with_range(12, false).with_range(0xFFFF, true);
//! let point_size = glyph_point_size(device, size, Affine::IDENTITY);
//! assert_eq!(point_size, 14);
//!
//! let set = AttributeSet::new().with(AttributeId::Size, 7.0_f32);
//! let key = StrikeKey::builder(device, device * Affine::scale(size))
//!     .attributes(&set)
//!     .hints(AntialiasHint::Gasp, FractionalMetricsHint::Default, &gasp, point_size)
//!     .build();
//! assert_eq!(key.value_mask(), 0x10);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature for
//! float math without `std`.

#![no_std]

extern crate alloc;

mod hints;
mod key;
mod projection;

pub use hints::{
    AntialiasHint, Antialiasing, FractionalMetrics, FractionalMetricsHint, GaspPolicy, GaspTable,
    glyph_point_size, resolve_antialiasing, resolve_fractional_metrics,
};
pub use key::{StrikeKey, StrikeKeyBuilder};
pub use projection::{BOLD_WEIGHT, FontStyle, ITALIC_POSTURE, ShapingFlags, ShapingProjection};
