// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotation extraction.
//!
//! Splits an affine transform into a pure rotation, which orients the text
//! baseline, and the residual transform applied to each glyph.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::{Affine, Vec2};

use crate::error::DegenerateGeometry;

/// Tolerance used when collapsing near-identity transforms.
const IDENTITY_EPSILON: f64 = 1e-12;

/// A transform split into `rotation * residual`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decomposition {
    /// The rotation, carrying the original translation when requested.
    pub rotation: Affine,
    /// The transform with the rotation factored out.
    pub residual: Affine,
}

/// Returns the rotation that maps the positive x axis onto `v`.
///
/// Axis-aligned vectors produce exact quarter turns. The zero vector
/// produces the identity.
#[must_use]
pub fn rotation_toward(v: Vec2) -> Affine {
    if v.y == 0.0 {
        if v.x < 0.0 {
            Affine::new([-1.0, 0.0, 0.0, -1.0, 0.0, 0.0])
        } else {
            Affine::IDENTITY
        }
    } else if v.x == 0.0 {
        if v.y > 0.0 {
            Affine::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0])
        } else {
            Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, 0.0])
        }
    } else {
        let len = (v.x * v.x + v.y * v.y).sqrt();
        let (sin, cos) = (v.y / len, v.x / len);
        Affine::new([cos, sin, -sin, cos, 0.0, 0.0])
    }
}

/// Extracts the rotation that `transform` applies to `axis`.
///
/// The residual satisfies `rotation * residual == transform`. With
/// `and_translation`, a non-zero translation moves from the residual onto
/// the rotation.
///
/// # Errors
///
/// Returns [`DegenerateGeometry`] when the rotation cannot be inverted, which
/// happens only for non-finite input.
pub fn extract_rotation(
    axis: Vec2,
    transform: Affine,
    and_translation: bool,
) -> Result<Decomposition, DegenerateGeometry> {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    let mapped = Vec2::new(a * axis.x + c * axis.y, b * axis.x + d * axis.y);
    let rotation = rotation_toward(mapped);

    let det = rotation.determinant();
    if !det.is_finite() || det.abs() < f64::MIN_POSITIVE {
        return Err(DegenerateGeometry);
    }

    let residual = rotation.inverse() * transform;
    if and_translation && (e != 0.0 || f != 0.0) {
        Ok(Decomposition {
            rotation: rotation.with_translation(Vec2::new(e, f)),
            residual: residual.with_translation(Vec2::ZERO),
        })
    } else {
        Ok(Decomposition { rotation, residual })
    }
}

/// Extracts the rotation `transform` applies to the x axis.
///
/// # Errors
///
/// See [`extract_rotation`].
pub fn extract_x_rotation(
    transform: Affine,
    and_translation: bool,
) -> Result<Decomposition, DegenerateGeometry> {
    extract_rotation(Vec2::new(1.0, 0.0), transform, and_translation)
}

/// Extracts the rotation `transform` applies to the y axis.
///
/// # Errors
///
/// See [`extract_rotation`].
pub fn extract_y_rotation(
    transform: Affine,
    and_translation: bool,
) -> Result<Decomposition, DegenerateGeometry> {
    extract_rotation(Vec2::new(0.0, 1.0), transform, and_translation)
}

/// Returns `true` if `transform` is the identity up to rounding error.
#[must_use]
pub fn is_identity(transform: Affine) -> bool {
    transform
        .as_coeffs()
        .iter()
        .zip(Affine::IDENTITY.as_coeffs())
        .all(|(x, id)| (x - id).abs() <= IDENTITY_EPSILON)
}
