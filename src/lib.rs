//! icy_nav drives keyboard, pointer and focus navigation of menus and trees.
//!
//! It is toolkit agnostic: a UI tree is accessed through an [`Adapter`], and
//! events of the host are fed to a [`Navigator`], which answers with the
//! [`Status`] of the event and writes the resulting state back through the
//! adapter.
//!
//! # The Pocket Guide
//! Mirror your menu into an [`Adapter`]. The in-memory [`Tree`] is one:
//!
//! ```
//! use icy_nav::core::keyboard::{Modifiers, Named};
//! use icy_nav::{Adapter, Bar, Event, Navigator, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.root("menu");
//! let file = tree.branch(root, "file", "&File");
//! let _ = tree.item(file.submenu, "open", "Open");
//! let edit = tree.branch(root, "edit", "&Edit");
//!
//! let mut navigator = Navigator::new(tree);
//! navigator.register(root, Bar)?;
//!
//! let _ = navigator.adapter_mut().focus(file.opener);
//! let _ = navigator.dispatch(Event::Focus(file.opener))?;
//! let _ = navigator.dispatch(Event::KeyDown {
//!     target: file.opener,
//!     key: Named::ArrowRight.into(),
//!     modifiers: Modifiers::empty(),
//! })?;
//!
//! assert_eq!(navigator.adapter().focused(), Some(edit.opener));
//! # Ok::<(), icy_nav::Error>(())
//! ```
//!
//! Some work is deferred until the layout of the host has settled, like
//! keeping an open submenu inside of the window. Call [`Navigator::advance`]
//! when [`Navigator::next_deadline`] is reached.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use icy_nav_core as core;
pub use icy_nav_menu as menu;

pub use crate::core::event::{Event, Status};
pub use crate::core::{Adapter, LayoutDirection, NodeId, Role, State, Tree};
pub use crate::menu::{
    Bar, Column, Config, Error, Flyout, FocusToken, FormState, Keymap, Navigator, Result, TreeMenu,
    Variant,
};
