//! Identity, classification and state of the nodes of a navigable tree.
use smol_str::SmolStr;

use std::fmt;

/// A stable identifier of a node.
///
/// Node handles may become stale when the underlying tree is re-rendered.
/// A [`NodeId`] survives those swaps and can be resolved again with
/// [`Adapter::lookup`](crate::Adapter::lookup).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(SmolStr);

impl NodeId {
    /// Creates a new [`NodeId`].
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(SmolStr::from(id))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification of a node inside a menu or tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// The boundary of one logical menu or tree instance.
    Root,

    /// A structural container without navigation semantics of its own.
    #[default]
    Group,

    /// An item owning exactly one [`Role::Submenu`] and, optionally, an
    /// [`Role::Opener`].
    Branch,

    /// The expandable content of a [`Role::Branch`].
    Submenu,

    /// The control that toggles a [`Role::Branch`] and receives its focus.
    Opener,

    /// A leaf item.
    Item,

    /// A leaf item that closes its containing branch when activated.
    CloseControl,

    /// A visual divider. Never navigable.
    Separator,
}

impl Role {
    /// Returns whether nodes of this role are navigation stops.
    pub fn is_item(self) -> bool {
        matches!(self, Role::Branch | Role::Item | Role::CloseControl)
    }
}

bitflags::bitflags! {
    /// The state flags of a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct State: u16 {
        /// The submenu is open.
        const EXPANDED = 1 << 0;
        /// The item (or the opener of an open branch) is selected.
        const SELECTED = 1 << 1;
        /// The node and its subtree do not take part in interaction.
        const DISABLED = 1 << 2;
        /// The node and its subtree are not displayed.
        const HIDDEN = 1 << 3;
        /// The node is the roving tab stop of its menu.
        const TAB_STOP = 1 << 4;
        /// The submenu opens towards the leading edge instead of the trailing one.
        const MIRRORED = 1 << 5;
        /// The submenu was raised to stay above the south edge of its container.
        const RAISED = 1 << 6;
        /// The raised submenu now overflows the north edge of its container.
        const NORTH = 1 << 7;
    }
}

impl State {
    /// The markers written by collision detection.
    pub const COLLISION: State = State::MIRRORED.union(State::RAISED).union(State::NORTH);

    /// Returns whether the node is excluded from interaction.
    pub fn is_withdrawn(self) -> bool {
        self.intersects(State::DISABLED | State::HIDDEN)
    }
}
