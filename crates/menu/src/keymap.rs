//! Map keys to navigation actions.
use crate::core::keyboard::{Key, Named};
use crate::core::walker::{Directive, Shape};
use crate::core::LayoutDirection;

use rustc_hash::FxHashMap;

/// A command of the menu state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Activate the item: toggle a branch, run a close control or select a
    /// leaf.
    Activate,
    /// Open the branch and move into it.
    Expand,
    /// Close the branch, or move out of it.
    Collapse,
    /// Close the innermost open branch.
    Escape,
}

/// What a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move focus along a [`Directive`].
    Move(Directive),
    /// Run a [`Command`].
    Command(Command),
}

impl From<Directive> for Action {
    fn from(directive: Directive) -> Self {
        Self::Move(directive)
    }
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

/// A table mapping keys to actions.
///
/// Keys that are not bound fall back to letter jumps when they produce a
/// single printable character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keymap {
    bindings: FxHashMap<Key, Action>,
}

impl Keymap {
    /// Creates an empty [`Keymap`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a key to an action.
    #[must_use]
    pub fn bind(mut self, key: impl Into<Key>, action: impl Into<Action>) -> Self {
        let _ = self.bindings.insert(key.into(), action.into());
        self
    }

    /// Binds a key to an action, returning the action it was bound to before.
    pub fn insert(&mut self, key: impl Into<Key>, action: impl Into<Action>) -> Option<Action> {
        self.bindings.insert(key.into(), action.into())
    }

    /// Removes the binding of a key.
    pub fn remove(&mut self, key: &Key) -> Option<Action> {
        self.bindings.remove(key)
    }

    /// Returns the action bound to a key.
    pub fn get(&self, key: &Key) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns an iterator over the bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Action)> {
        self.bindings.iter()
    }

    /// Returns the action of a pressed key in the given reading direction.
    ///
    /// Right-to-left layouts swap the horizontal arrows.
    pub fn resolve(&self, key: &Key, direction: LayoutDirection) -> Option<Action> {
        match key {
            Key::Named(named) if direction.is_rtl() => self.get(&Key::Named(named.mirrored())),
            key => self.get(key),
        }
    }

    /// Checks that every directive of the keymap can be followed in a menu of
    /// the given shape.
    ///
    /// Returns the first offending binding.
    pub fn validate(&self, shape: Shape) -> Result<(), (Key, Directive)> {
        if shape == Shape::Tree {
            return Ok(());
        }

        let offending = self.bindings.iter().find_map(|(key, action)| match action {
            Action::Move(directive) if directive.is_hierarchical() => {
                Some((key.clone(), *directive))
            }
            _ => None,
        });

        match offending {
            Some(binding) => Err(binding),
            None => Ok(()),
        }
    }

    /// The keys shared by every menu.
    pub fn common() -> Self {
        Self::new()
            .bind(Named::Home, Directive::First)
            .bind(Named::End, Directive::Last)
            .bind(Named::Enter, Command::Activate)
            .bind(Named::Space, Command::Activate)
            .bind(Named::Escape, Command::Escape)
    }

    /// The keys of a menu laid out in a row.
    pub fn horizontal() -> Self {
        Self::common()
            .bind(Named::ArrowLeft, Directive::Previous)
            .bind(Named::ArrowRight, Directive::Next)
            .bind(Named::ArrowDown, Command::Expand)
    }

    /// The keys of a menu laid out in a column.
    pub fn vertical() -> Self {
        Self::common()
            .bind(Named::ArrowUp, Directive::Previous)
            .bind(Named::ArrowDown, Directive::Next)
            .bind(Named::ArrowRight, Command::Expand)
            .bind(Named::ArrowLeft, Command::Collapse)
    }

    /// The keys of a tree.
    pub fn tree() -> Self {
        Self::vertical()
            .bind(Named::Home, Directive::Top)
            .bind(Named::End, Directive::End)
    }
}
