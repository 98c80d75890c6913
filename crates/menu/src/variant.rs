//! Describe the behavior of a kind of menu.
//!
//! A [`Variant`] is the set of capabilities the [`Navigator`] queries to decide
//! how a registered menu behaves: its keymaps, whether it is flat or a tree,
//! whether it closes itself when focus leaves it, and so on.
//!
//! [`Navigator`]: crate::Navigator
use crate::keymap::Keymap;
use crate::core::walker::Shape;

use std::fmt;

/// The nesting level of an item inside of its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// A direct item of the menu root.
    Top,
    /// An item inside of a submenu.
    Nested,
}

/// The axis items of a level are laid out along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items are laid out in a row.
    Horizontal,
    /// Items are laid out in a column.
    Vertical,
}

/// A kind of menu.
pub trait Variant: fmt::Debug {
    /// Returns the name of the variant.
    fn name(&self) -> &'static str;

    /// Returns the keymap of the given level.
    fn keymap(&self, level: Level) -> Keymap;

    /// Returns the orientation of the given level.
    fn orientation(&self, level: Level) -> Orientation {
        let _ = level;

        Orientation::Vertical
    }

    /// Returns the shape of the traversals of the menu.
    fn shape(&self) -> Shape {
        Shape::Group
    }

    /// Returns whether opening a branch closes every branch off its path.
    fn one_open(&self) -> bool {
        true
    }

    /// Returns whether the menu closes itself when focus or a click lands
    /// outside of it.
    fn is_transient(&self) -> bool {
        false
    }

    /// Returns whether moving to an item selects it.
    fn selects_on_navigate(&self) -> bool {
        false
    }

    /// Returns whether moving past either end wraps around.
    fn cycle(&self) -> bool {
        true
    }

    /// Returns whether navigation descends into open branches.
    fn depth_first(&self) -> bool {
        false
    }

    /// Returns whether expanding a branch moves focus to its first item.
    fn focus_child_on_expand(&self) -> bool {
        true
    }
}

/// A horizontal menu bar with drop down submenus.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bar;

impl Variant for Bar {
    fn name(&self) -> &'static str {
        "bar"
    }

    fn keymap(&self, level: Level) -> Keymap {
        match level {
            Level::Top => Keymap::horizontal(),
            Level::Nested => Keymap::vertical(),
        }
    }

    fn orientation(&self, level: Level) -> Orientation {
        match level {
            Level::Top => Orientation::Horizontal,
            Level::Nested => Orientation::Vertical,
        }
    }

    fn is_transient(&self) -> bool {
        true
    }
}

/// A vertical menu that stays open, like a sidebar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Column;

impl Variant for Column {
    fn name(&self) -> &'static str {
        "column"
    }

    fn keymap(&self, _level: Level) -> Keymap {
        Keymap::vertical()
    }
}

/// A vertical menu whose submenus fly out to the side.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flyout;

impl Variant for Flyout {
    fn name(&self) -> &'static str {
        "flyout"
    }

    fn keymap(&self, _level: Level) -> Keymap {
        Keymap::vertical()
    }

    fn is_transient(&self) -> bool {
        true
    }
}

/// A tree view.
///
/// Navigation walks every visible node in order, branches stay open
/// independently of each other and moving selects.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeMenu;

impl Variant for TreeMenu {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn keymap(&self, _level: Level) -> Keymap {
        Keymap::tree()
    }

    fn shape(&self) -> Shape {
        Shape::Tree
    }

    fn one_open(&self) -> bool {
        false
    }

    fn selects_on_navigate(&self) -> bool {
        true
    }

    fn cycle(&self) -> bool {
        false
    }

    fn depth_first(&self) -> bool {
        true
    }

    fn focus_child_on_expand(&self) -> bool {
        false
    }
}
