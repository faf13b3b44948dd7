//! Input events: [`Msg`], [`Key`], [`MouseAction`], [`ModMask`].

use std::time::Instant;

use crate::geom::Point;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// A printable character other than space.
    Char(char),
}

/// Bitmask of modifier keys held during an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Middle button pressed.
    Auxiliary,
    /// Secondary (right) button pressed.
    Secondary,
    /// Any button released.
    Release,
    /// Pointer moved, with or without a button held.
    Move,
}

/// A message delivered to the application model.
#[derive(Clone, Debug)]
pub enum Msg {
    KeyDown {
        key: Key,
        modifiers: ModMask,
        time: Instant,
    },
    Mouse {
        action: MouseAction,
        pos: Point,
        modifiers: ModMask,
        time: Instant,
    },
    /// The terminal was resized.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// Fixed-rate animation tick from the app loop.
    Tick { time: Instant },
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// A `KeyDown` with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    /// A `Mouse` message with no modifiers.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    pub fn tick() -> Self {
        Self::Tick {
            time: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_mask_union() {
        let m = ModMask::SHIFT | ModMask::CTRL;
        assert!(m.contains(ModMask::SHIFT));
        assert!(!m.contains(ModMask::ALT));
        assert!(ModMask::NONE.is_empty());
    }

    #[test]
    fn constructors_fill_fields() {
        match Msg::mouse(MouseAction::Main, Point::new(3, 4)) {
            Msg::Mouse {
                action, pos, modifiers, ..
            } => {
                assert_eq!(action, MouseAction::Main);
                assert_eq!(pos, Point::new(3, 4));
                assert!(modifiers.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(Msg::key(Key::Space), Msg::KeyDown { key: Key::Space, .. }));
        assert!(matches!(Msg::tick(), Msg::Tick { .. }));
    }
}
