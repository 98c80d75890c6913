//! Listen to keyboard events.
use smol_str::SmolStr;

/// A key pressed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// A named key, like an arrow or [`Named::Enter`].
    Named(Named),

    /// A key producing text.
    Character(SmolStr),
}

impl Key {
    /// Creates a [`Key::Character`].
    pub fn character(text: impl AsRef<str>) -> Self {
        Self::Character(SmolStr::new(text))
    }

    /// Returns the character of a single printable character key.
    pub fn printable(&self) -> Option<char> {
        let Self::Character(text) = self else {
            return None;
        };

        let mut chars = text.chars();
        let c = chars.next()?;

        if chars.next().is_some() || c.is_control() || c.is_whitespace() {
            return None;
        }

        Some(c)
    }
}

impl From<Named> for Key {
    fn from(named: Named) -> Self {
        Self::Named(named)
    }
}

/// The keys with a meaning for menu and tree navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Named {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Space,
    Escape,
    Tab,
}

impl Named {
    /// Returns the key with the opposite horizontal meaning, if any.
    pub fn mirrored(self) -> Self {
        match self {
            Named::ArrowLeft => Named::ArrowRight,
            Named::ArrowRight => Named::ArrowLeft,
            other => other,
        }
    }
}

bitflags::bitflags! {
    /// The modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// The "shift" key.
        const SHIFT = 1 << 0;
        /// The "control" key.
        const CTRL = 1 << 1;
        /// The "alt" key.
        const ALT = 1 << 2;
        /// The "windows" key on Windows, "command" key on Mac, and
        /// "super" key on Linux.
        const LOGO = 1 << 3;
    }
}

impl Modifiers {
    /// Returns true if the [`CTRL`] key is pressed in the [`Modifiers`].
    ///
    /// [`CTRL`]: Self::CTRL
    pub fn control(self) -> bool {
        self.contains(Self::CTRL)
    }

    /// Returns true if a modifier that turns a letter into a shortcut is
    /// pressed.
    pub fn is_shortcut(self) -> bool {
        self.intersects(Self::CTRL | Self::ALT | Self::LOGO)
    }
}
