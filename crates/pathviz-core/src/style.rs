//! Visual styling: [`Color`], [`AttrMask`], and [`Style`].

use std::ops::BitOr;

/// An RGB colour packed into a `u32` (0x00RRGGBB).
///
/// `Color::DEFAULT` means "terminal default" and is never emitted as RGB.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const DEFAULT: Self = Self(0);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrMask(pub u8);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const REVERSE: Self = Self(1 << 1);
    pub const DIM: Self = Self(1 << 2);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Complete visual style for a single display cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    /// A style with the given colours and no attributes.
    #[inline]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: AttrMask::NONE,
        }
    }

    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0xAB, 0xCD, 0xEF);
        assert_eq!((c.r(), c.g(), c.b()), (0xAB, 0xCD, 0xEF));
        assert_eq!(c.0, 0x00AB_CDEF);
    }

    #[test]
    fn attr_mask_union() {
        let m = AttrMask::BOLD | AttrMask::REVERSE;
        assert!(m.contains(AttrMask::BOLD));
        assert!(!m.contains(AttrMask::DIM));
        assert!(AttrMask::NONE.is_empty());
    }

    #[test]
    fn style_builder_keeps_other_fields() {
        let s = Style::new(Color::from_rgb(255, 0, 0), Color::DEFAULT).with_attrs(AttrMask::BOLD);
        assert_eq!(s.fg.r(), 255);
        assert_eq!(s.bg, Color::DEFAULT);
        let s = s.with_bg(Color::from_rgb(1, 2, 3));
        assert!(s.attrs.contains(AttrMask::BOLD));
        assert_eq!(s.bg.b(), 3);
    }
}
