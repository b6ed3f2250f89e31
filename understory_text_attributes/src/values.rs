// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed per-attribute storage.

use alloc::sync::Arc;

use kurbo::Affine;
use peniko::Brush;

use crate::value::Opaque;

/// Name of the family every unset family resolves to.
pub const DEFAULT_FAMILY: &str = "Default";

/// One storage slot per primary attribute.
///
/// Absent optional values (`None`) are the canonical defaults of the opaque,
/// paint and transform attributes. The family is stored as `None` when it
/// equals [`DEFAULT_FAMILY`].
#[derive(Clone, Debug)]
pub(crate) struct Values {
    pub(crate) family: Option<Arc<str>>,
    pub(crate) weight: f32,
    pub(crate) width: f32,
    pub(crate) posture: f32,
    pub(crate) size: f32,
    pub(crate) transform: Option<Affine>,
    pub(crate) superscript: i8,
    pub(crate) font: Option<Opaque>,
    pub(crate) char_replacement: Option<Opaque>,
    pub(crate) foreground: Option<Brush>,
    pub(crate) background: Option<Brush>,
    pub(crate) underline: i8,
    pub(crate) strikethrough: bool,
    pub(crate) run_direction: i8,
    pub(crate) bidi_embedding: i8,
    pub(crate) justification: f32,
    pub(crate) input_method_highlight: Option<Opaque>,
    pub(crate) input_method_underline: i8,
    pub(crate) swap_colors: bool,
    pub(crate) numeric_shaping: Option<Opaque>,
    pub(crate) kerning: i8,
    pub(crate) ligatures: i8,
    pub(crate) tracking: f32,
    pub(crate) style_code: i32,
    pub(crate) synthetic_posture: f32,
    pub(crate) posture_vertical: bool,
    pub(crate) weight_x: f32,
    pub(crate) weight_y: f32,
    pub(crate) solid_size: bool,
    pub(crate) solid_size_x: bool,
    pub(crate) solid_size_y: bool,
    pub(crate) bitmap_bold_gray: bool,
    pub(crate) bitmap_bold_gray_north: bool,
    pub(crate) bitmap_bold_gray_east: bool,
    pub(crate) bitmap_bold_gray_south: bool,
    pub(crate) bitmap_bold_gray_west: bool,
    pub(crate) flip_horizontal: bool,
    pub(crate) flip_vertical: bool,
}

impl Values {
    /// The canonical default of every attribute.
    pub(crate) const DEFAULT: Self = Self {
        family: None,
        weight: 1.0,
        width: 1.0,
        posture: 0.0,
        size: 12.0,
        transform: None,
        superscript: 0,
        font: None,
        char_replacement: None,
        foreground: None,
        background: None,
        underline: -1,
        strikethrough: false,
        run_direction: -2,
        bidi_embedding: 0,
        justification: 1.0,
        input_method_highlight: None,
        input_method_underline: -1,
        swap_colors: false,
        numeric_shaping: None,
        kerning: 0,
        ligatures: 0,
        tracking: 0.0,
        style_code: 0,
        synthetic_posture: 0.0,
        posture_vertical: false,
        weight_x: 1.0,
        weight_y: 1.0,
        solid_size: false,
        solid_size_x: false,
        solid_size_y: false,
        bitmap_bold_gray: false,
        bitmap_bold_gray_north: false,
        bitmap_bold_gray_east: false,
        bitmap_bold_gray_south: false,
        bitmap_bold_gray_west: false,
        flip_horizontal: false,
        flip_vertical: false,
    };

    /// Returns the family name, resolving the default.
    pub(crate) fn family(&self) -> &str {
        self.family.as_deref().unwrap_or(DEFAULT_FAMILY)
    }
}
