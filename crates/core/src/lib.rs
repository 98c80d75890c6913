//! The core library of icy_nav.
//!
//! This library holds the toolkit-agnostic half of keyboard navigation for
//! menus and trees: the [`Adapter`] a UI tree is accessed through, the
//! filtered [`walker`] computing movement targets, letter [`search`] and
//! submenu [`collision`] geometry.
//!
//! It does not keep any state of its own. [`tree::Tree`] is an in-memory
//! [`Adapter`] useful for headless hosts and tests.
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod adapter;
pub mod collision;
pub mod event;
pub mod keyboard;
pub mod layout_direction;
pub mod node;
pub mod search;
pub mod tree;
pub mod walker;

mod geometry;

pub use adapter::Adapter;
pub use event::{Event, Status};
pub use geometry::{Rectangle, Vector};
pub use layout_direction::LayoutDirection;
pub use node::{NodeId, Role, State};
pub use tree::Tree;
pub use walker::{Directive, Shape, Traversal, Verdict};
