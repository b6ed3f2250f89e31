// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Text Attributes: sparse, typed text attribute sets.
//!
//! An [`AttributeSet`] holds a value for every text attribute (family,
//! weight, size, transform, decorations, and so on) and tracks which of them
//! were explicitly assigned and which differ from their defaults. Those two
//! masks make sets cheap to merge, compare and hash, and let a caller tell
//! "explicitly default" apart from "never specified".
//!
//! ## Core Concepts
//!
//! - [`AttributeId`] - the closed, ordered enumeration of attributes.
//! - [`AttributeRegistry`] - a static table with one entry per attribute,
//!   holding its validation, default and comparison rules.
//! - [`AttributeState`] - the `(defined, non_default)` mask pair.
//! - [`AttributeSet`] - the store itself.
//!
//! The baseline transform is *derived*: it is the rotation extracted from the
//! transform attribute and is recomputed on every transform write. Writing it
//! directly is a programming error and panics.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_text_attributes::{AttributeId, AttributeMask, AttributeSet, AttributeValue};
//!
//! let mut set = AttributeSet::new();
//! set.set(AttributeId::Size, 24.0_f32);
//! set.set(AttributeId::Weight, 2.0_f32);
//! set.set_default(AttributeId::Size);
//!
//! assert_eq!(
//!     set.defined(),
//!     AttributeId::Size.mask() | AttributeId::Weight.mask()
//! );
//! assert_eq!(set.non_default(), AttributeMask::from(AttributeId::Weight));
//! assert_eq!(set.size(), 12.0);
//! assert_eq!(set.get(AttributeId::Weight), Some(AttributeValue::Float(2.0)));
//!
//! // Invalid values fall back to the default instead of failing.
//! set.set(AttributeId::Weight, 50.0_f32);
//! assert_eq!(set.weight(), 1.0);
//! assert!(set.is_defined(AttributeId::Weight));
//! ```
//!
//! ## External Maps
//!
//! [`AttributeMap`] is the dynamically typed exchange form, keyed by the
//! canonical attribute names (or any [`KeyResolver`]). Merging a map is
//! lenient: unknown keys are skipped and rejected values reset the attribute
//! to its default; [`AttributeSet::merge_map_report`] lists what was skipped.
//! [`AttributeSet::to_persisted`] adds the defined mask to the map so that a
//! round trip through storage preserves it.
//!
//! ## Diagnostics
//!
//! Soft failures emit [`tracing`] events at `trace` and `debug` level. The
//! crate never installs a subscriber.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature for
//! float math without `std`.

#![no_std]

extern crate alloc;

mod derived;
mod error;
pub mod geometry;
mod highlight;
mod id;
mod mask;
mod merge;
mod persist;
mod registry;
mod set;
mod state;
mod value;
mod values;

pub use error::{CoercionError, DegenerateGeometry, UnknownAttribute};
pub use highlight::HighlightStyles;
pub use id::AttributeId;
pub use mask::{AttributeMask, AttributeMaskIter};
pub use merge::{
    AttributeMap, MergeReport, SkipReason, Skipped, baseline_transform_from_map,
    char_transform_from_map, justification_from_map, numeric_shaping_from_map,
};
pub use persist::DEFINED_KEY;
pub use registry::{AttributeInfo, AttributeRegistry, CanonicalKeys, KeyResolver};
pub use set::AttributeSet;
pub use state::AttributeState;
pub use value::{AttributeValue, Opaque, TransformAttribute, ValueKind};
pub use values::DEFAULT_FAMILY;
