//! The menu and tree navigation state machine of icy_nav.
//!
//! A [`Navigator`] registers menus on the root nodes of a UI tree and turns
//! focus, click, key and hover events into menu behavior: branches open and
//! close, a single roving tab stop moves with focus, letters jump to items
//! and transient menus close themselves when the user moves away.
//!
//! The behavior of a menu comes from its [`Variant`]. The built-in variants
//! cover menu bars, columns, flyouts and trees.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use icy_nav_core as core;

pub mod change;
pub mod config;
pub mod keymap;
pub mod navigator;
pub mod session;
pub mod timer;
pub mod variant;

mod error;

#[cfg(test)]
mod tests;

pub use change::{Change, Flag, Subscription};
pub use config::Config;
pub use error::Error;
pub use keymap::{Action, Command, Keymap};
pub use navigator::{FocusToken, FormState, Navigator};
pub use variant::{Bar, Column, Flyout, Level, Orientation, TreeMenu, Variant};

/// The result of an operation of a [`Navigator`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
