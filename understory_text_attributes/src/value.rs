// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! External attribute values.
//!
//! [`AttributeValue`] is the dynamically typed currency of the generic
//! read/write path, external maps and the persisted form. Typed accessors on
//! [`AttributeSet`](crate::AttributeSet) bypass it entirely.

use alloc::string::String;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use kurbo::Affine;
use peniko::Brush;

/// A dynamically typed attribute value.
///
/// # Example
///
/// ```rust
/// use understory_text_attributes::{AttributeValue, ValueKind};
///
/// let size = AttributeValue::from(24.0_f32);
/// assert_eq!(size.kind(), ValueKind::Float);
/// assert!(size.is_serializable());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// The attribute is explicitly at its default.
    Default,
    /// A boolean flag.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(Arc<str>),
    /// A geometric transform.
    Transform(TransformAttribute),
    /// A paint.
    Paint(Brush),
    /// An application-defined value compared by its own equality.
    Opaque(Opaque),
}

impl AttributeValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Default => ValueKind::Default,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Transform(_) => ValueKind::Transform,
            Self::Paint(_) => ValueKind::Paint,
            Self::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// Returns `true` if this value can be written to the persisted map form.
    ///
    /// Opaque values never can. Of the paints, only solid colors can.
    #[must_use]
    pub const fn is_serializable(&self) -> bool {
        match self {
            Self::Opaque(_) => false,
            Self::Paint(brush) => matches!(brush, Brush::Solid(_)),
            _ => true,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Transform(t) => write!(f, "{t}"),
            Self::Paint(brush) => fmt_brush(brush, f),
            Self::Opaque(o) => write!(f, "{o:?}"),
        }
    }
}

pub(crate) fn fmt_brush(brush: &Brush, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match brush {
        Brush::Solid(color) => {
            let c = color.to_rgba8();
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
        Brush::Gradient(_) => f.write_str("gradient"),
        Brush::Image(_) => f.write_str("image"),
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i8> for AttributeValue {
    fn from(value: i8) -> Self {
        Self::Int(value.into())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<Arc<str>> for AttributeValue {
    fn from(value: Arc<str>) -> Self {
        Self::String(value)
    }
}

impl From<Affine> for AttributeValue {
    fn from(value: Affine) -> Self {
        Self::Transform(TransformAttribute::new(value))
    }
}

impl From<TransformAttribute> for AttributeValue {
    fn from(value: TransformAttribute) -> Self {
        Self::Transform(value)
    }
}

impl From<Brush> for AttributeValue {
    fn from(value: Brush) -> Self {
        Self::Paint(value)
    }
}

impl From<Opaque> for AttributeValue {
    fn from(value: Opaque) -> Self {
        Self::Opaque(value)
    }
}

/// The kind of an [`AttributeValue`], used in coercion diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`AttributeValue::Default`].
    Default,
    /// [`AttributeValue::Bool`].
    Bool,
    /// [`AttributeValue::Int`].
    Int,
    /// [`AttributeValue::Float`].
    Float,
    /// [`AttributeValue::String`].
    String,
    /// [`AttributeValue::Transform`].
    Transform,
    /// [`AttributeValue::Paint`].
    Paint,
    /// [`AttributeValue::Opaque`].
    Opaque,
    /// Either [`AttributeValue::Int`] or [`AttributeValue::Float`].
    Number,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Transform => "transform",
            Self::Paint => "paint",
            Self::Opaque => "opaque",
            Self::Number => "number",
        })
    }
}

/// The external shape of the transform attribute.
///
/// Wraps an [`Affine`]; the identity transform is how external data says
/// "no transform".
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformAttribute(Affine);

impl TransformAttribute {
    /// The identity transform attribute.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// Wraps a transform.
    #[must_use]
    #[inline]
    pub const fn new(transform: Affine) -> Self {
        Self(transform)
    }

    /// Returns the wrapped transform.
    #[must_use]
    #[inline]
    pub const fn transform(self) -> Affine {
        self.0
    }

    /// Returns `true` if the wrapped transform is exactly the identity.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.0 == Affine::IDENTITY
    }
}

impl Default for TransformAttribute {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for TransformAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0.as_coeffs();
        write!(f, "[{a}, {b}, {c}, {d}, {e}, {g}]")
    }
}

/// A shared, type-erased application value.
///
/// Attributes such as the explicit font reference or the input method
/// highlight carry values the attribute store knows nothing about. `Opaque`
/// holds such a value behind an [`Arc`], so cloning an attribute set shares
/// it, and compares two opaque values with the wrapped type's `PartialEq`
/// (values of different types are never equal).
///
/// # Example
///
/// ```rust
/// use understory_text_attributes::Opaque;
///
/// #[derive(Debug, PartialEq)]
/// struct FontRef(u32);
///
/// let a = Opaque::new(FontRef(7));
/// assert!(a.is::<FontRef>());
/// assert_eq!(a.downcast_ref::<FontRef>(), Some(&FontRef(7)));
/// assert_eq!(a, Opaque::new(FontRef(7)));
/// assert_ne!(a, Opaque::new(7_u32));
/// ```
#[derive(Clone)]
pub struct Opaque {
    inner: Arc<dyn OpaqueValue>,
    type_id: TypeId,
}

impl Opaque {
    /// Wraps a value.
    #[must_use]
    pub fn new<T: PartialEq + fmt::Debug + Send + Sync + 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Returns `true` if the wrapped value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns a reference to the wrapped value if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.inner.as_any().downcast_ref()
        } else {
            None
        }
    }

    /// Returns `true` if both handles share the same allocation.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.type_id == other.type_id && self.inner.eq_dyn(&*other.inner))
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_debug(f)
    }
}

trait OpaqueValue: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_dyn(&self, other: &dyn OpaqueValue) -> bool;
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: PartialEq + fmt::Debug + Send + Sync + 'static> OpaqueValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn OpaqueValue) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|o| self == o)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
