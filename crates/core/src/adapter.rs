//! Access a live UI tree without depending on a particular toolkit.
use crate::{NodeId, Rectangle, Role, State, Vector};

use std::fmt;
use std::hash::Hash;

/// The capabilities the navigation core needs from a UI tree.
///
/// Handles are cheap copies. They may go stale when the tree is re-rendered,
/// in which case every query is expected to answer `None` or a default
/// instead of panicking. Stable identities survive re-rendering and can be
/// resolved again with [`Adapter::lookup`].
pub trait Adapter {
    /// A handle to a node of the tree.
    type Node: Copy + Eq + Hash + fmt::Debug;

    /// Returns the parent of a node.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns the first child of a node.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns the last child of a node.
    fn last_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns the sibling following a node.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns the sibling preceding a node.
    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns the classification of a node.
    fn role(&self, node: Self::Node) -> Role;

    /// Returns the stable identity of a node, if it has one.
    fn id(&self, node: Self::Node) -> Option<NodeId>;

    /// Resolves a stable identity to the node currently carrying it.
    fn lookup(&self, id: &NodeId) -> Option<Self::Node>;

    /// Returns the state flags of a node.
    fn state(&self, node: Self::Node) -> State;

    /// Sets or clears state flags of a node.
    fn set_state(&mut self, node: Self::Node, flags: State, on: bool);

    /// Returns the visible text of a node.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Returns whether a node can take input focus.
    fn is_focusable(&self, node: Self::Node) -> bool;

    /// Moves input focus to a node.
    ///
    /// Returns `false` when the node cannot take focus.
    fn focus(&mut self, node: Self::Node) -> bool;

    /// Returns the node holding input focus.
    fn focused(&self) -> Option<Self::Node>;

    /// Returns the laid out bounds of a node.
    fn bounds(&self, _node: Self::Node) -> Option<Rectangle> {
        None
    }

    /// Returns the bounds of the container a node must stay inside of.
    fn container_bounds(&self, _node: Self::Node) -> Option<Rectangle> {
        None
    }

    /// Moves a node away from its laid out position.
    fn set_offset(&mut self, _node: Self::Node, _offset: Vector) {}

    /// Returns the closest ancestor-or-self with the given role.
    fn closest(&self, node: Self::Node, role: Role) -> Option<Self::Node> {
        let mut current = Some(node);

        while let Some(node) = current {
            if self.role(node) == role {
                return Some(node);
            }

            current = self.parent(node);
        }

        None
    }

    /// Returns whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);

        while let Some(node) = current {
            if node == ancestor {
                return true;
            }

            current = self.parent(node);
        }

        false
    }

    /// Returns the descendants of a node in pre-order.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut nodes = Vec::new();
        let mut stack = Vec::new();

        let mut child = self.last_child(node);
        while let Some(current) = child {
            stack.push(current);
            child = self.previous_sibling(current);
        }

        while let Some(current) = stack.pop() {
            nodes.push(current);

            let mut child = self.last_child(current);
            while let Some(next) = child {
                stack.push(next);
                child = self.previous_sibling(next);
            }
        }

        nodes
    }

    /// Returns the first direct child of a node with the given role.
    fn child_with_role(&self, node: Self::Node, role: Role) -> Option<Self::Node> {
        let mut child = self.first_child(node);

        while let Some(current) = child {
            if self.role(current) == role {
                return Some(current);
            }

            child = self.next_sibling(current);
        }

        None
    }

    /// Returns the submenu of a branch.
    fn submenu(&self, branch: Self::Node) -> Option<Self::Node> {
        self.child_with_role(branch, Role::Submenu)
    }

    /// Returns the opener of a branch.
    fn opener(&self, branch: Self::Node) -> Option<Self::Node> {
        self.child_with_role(branch, Role::Opener)
    }

    /// Returns whether the submenu of a branch is open.
    fn is_expanded(&self, branch: Self::Node) -> bool {
        self.submenu(branch)
            .is_some_and(|submenu| self.state(submenu).contains(State::EXPANDED))
    }

    /// Returns whether a node is disabled.
    fn is_disabled(&self, node: Self::Node) -> bool {
        self.state(node).contains(State::DISABLED)
    }

    /// Returns whether a node is hidden.
    fn is_hidden(&self, node: Self::Node) -> bool {
        self.state(node).contains(State::HIDDEN)
    }
}
