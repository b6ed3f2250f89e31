// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transforms derived from the primary transform attribute.

use kurbo::Affine;

use crate::geometry::{self, Decomposition};

/// The baseline and char transforms of an attribute set.
///
/// Both are absent when the primary transform is absent. Identity results
/// collapse to absent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct DerivedTransforms {
    /// Rotation of the baseline, including the primary translation.
    pub(crate) baseline: Option<Affine>,
    /// The primary transform with the baseline rotation factored out.
    pub(crate) glyph: Option<Affine>,
}

impl DerivedTransforms {
    pub(crate) const NONE: Self = Self {
        baseline: None,
        glyph: None,
    };

    /// Recomputes both transforms from the primary transform.
    pub(crate) fn from_transform(transform: Option<Affine>) -> Self {
        let Some(transform) = transform else {
            return Self::NONE;
        };
        match geometry::extract_x_rotation(transform, true) {
            Ok(Decomposition { rotation, residual }) => Self {
                baseline: non_identity(rotation),
                glyph: non_identity(residual),
            },
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    "cannot extract baseline rotation; glyphs keep the full transform"
                );
                Self {
                    baseline: None,
                    glyph: Some(transform),
                }
            }
        }
    }
}

fn non_identity(transform: Affine) -> Option<Affine> {
    (!geometry::is_identity(transform)).then_some(transform)
}
