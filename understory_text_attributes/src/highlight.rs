// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input method highlight resolution.

use alloc::borrow::Cow;

use crate::merge::AttributeMap;
use crate::set::AttributeSet;
use crate::value::Opaque;

/// Resolves an input method highlight token to the styles it stands for.
///
/// Implemented for closures, so a policy can be written inline:
///
/// ```rust
/// use understory_text_attributes::{AttributeMap, AttributeSet, AttributeValue, Opaque};
///
/// #[derive(Debug, PartialEq)]
/// enum Highlight {
///     Selected,
/// }
///
/// let styles = |token: &Opaque| {
///     token.downcast_ref::<Highlight>().map(|_| {
///         let mut map = AttributeMap::new();
///         map.insert("swap_colors".into(), AttributeValue::Bool(true));
///         map
///     })
/// };
///
/// let mut set = AttributeSet::new();
/// set.set_input_method_highlight(Opaque::new(Highlight::Selected));
/// let styled = set.apply_highlight(&styles);
/// assert!(styled.swap_colors());
/// assert!(!set.swap_colors());
/// ```
pub trait HighlightStyles {
    /// Returns the styles to merge for `highlight`, if any.
    fn styles(&self, highlight: &Opaque) -> Option<AttributeMap>;
}

impl<F> HighlightStyles for F
where
    F: Fn(&Opaque) -> Option<AttributeMap>,
{
    fn styles(&self, highlight: &Opaque) -> Option<AttributeMap> {
        self(highlight)
    }
}

impl AttributeSet {
    /// Returns this set with its input method highlight styles merged in.
    ///
    /// Borrows `self` unchanged when there is no highlight or the policy has
    /// no styles for it.
    pub fn apply_highlight<H: HighlightStyles + ?Sized>(&self, styles: &H) -> Cow<'_, Self> {
        let Some(highlight) = self.input_method_highlight() else {
            return Cow::Borrowed(self);
        };
        match styles.styles(highlight) {
            Some(map) => {
                let mut styled = self.clone();
                styled.merge_map(&map);
                Cow::Owned(styled)
            }
            None => Cow::Borrowed(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::AttributeId;
    use crate::value::AttributeValue;

    struct Underlined;

    impl HighlightStyles for Underlined {
        fn styles(&self, _: &Opaque) -> Option<AttributeMap> {
            let mut map = AttributeMap::new();
            map.insert("input_method_underline".into(), AttributeValue::Int(2));
            Some(map)
        }
    }

    #[test]
    fn no_highlight_borrows() {
        let set = AttributeSet::new().with(AttributeId::Size, 14.0_f32);
        assert!(matches!(set.apply_highlight(&Underlined), Cow::Borrowed(_)));
    }

    #[test]
    fn highlight_merges_styles_into_copy() {
        let set = AttributeSet::new().with(AttributeId::InputMethodHighlight, Opaque::new(1_u8));
        let styled = set.apply_highlight(&Underlined);
        assert!(matches!(styled, Cow::Owned(_)));
        assert_eq!(styled.input_method_underline(), 2);
        assert_eq!(set.input_method_underline(), -1);
    }

    #[test]
    fn policy_without_styles_borrows() {
        let set = AttributeSet::new().with(AttributeId::InputMethodHighlight, Opaque::new(1_u8));
        let none = |_: &Opaque| -> Option<AttributeMap> { None };
        assert!(matches!(set.apply_highlight(&none), Cow::Borrowed(_)));
    }
}
