//! Layout direction support for RTL (right-to-left) languages.
//!
//! The reading direction decides which inline edge of a container is the
//! trailing one. Submenus open towards the trailing edge and are mirrored
//! when they collide with it. Horizontal keymaps swap their arrow keys.
//!
//! There is no global direction: each [`Navigator`] carries its own in its
//! configuration.
//!
//! [`Navigator`]: https://docs.rs/icy_nav_menu
use crate::Rectangle;

/// The direction of the layout flow.
///
/// This determines whether the layout flows from left-to-right (LTR)
/// or right-to-left (RTL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LayoutDirection {
    /// Left-to-right layout (default for most Western languages).
    #[default]
    Ltr = 0,
    /// Right-to-left layout (for Arabic, Hebrew, etc.).
    Rtl = 1,
}

impl LayoutDirection {
    /// Returns `true` if the layout direction is right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Returns the opposite layout direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Ltr => Self::Rtl,
            Self::Rtl => Self::Ltr,
        }
    }

    /// Returns the free space between `anchor` and the leading and the
    /// trailing edge of `container`, in that order.
    pub fn inline_space(self, anchor: Rectangle, container: Rectangle) -> (f32, f32) {
        let left = anchor.x - container.x;
        let right = container.right() - anchor.right();

        match self {
            Self::Ltr => (left, right),
            Self::Rtl => (right, left),
        }
    }

    /// Returns whether `bounds` reaches past the trailing edge of `container`.
    pub fn overflows_trailing(self, bounds: Rectangle, container: Rectangle) -> bool {
        match self {
            Self::Ltr => bounds.right() > container.right(),
            Self::Rtl => bounds.x < container.x,
        }
    }

    /// Returns whether `bounds` reaches past the leading edge of `container`.
    pub fn overflows_leading(self, bounds: Rectangle, container: Rectangle) -> bool {
        self.flip().overflows_trailing(bounds, container)
    }
}
