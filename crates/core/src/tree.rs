//! An in-memory navigable tree.
//!
//! [`Tree`] implements [`Adapter`] over a slot map arena. It is the reference
//! adapter of the crate: headless hosts can mirror their UI into it, and the
//! navigation tests run against it.
use crate::{Adapter, NodeId, Rectangle, Role, State, Vector};

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A handle to a node of a [`Tree`].
    pub struct Key;
}

#[derive(Debug, Clone, Default)]
struct Node {
    role: Role,
    id: Option<NodeId>,
    state: State,
    text: Option<String>,
    focusable: bool,
    bounds: Option<Rectangle>,
    offset: Vector,
    parent: Option<Key>,
    children: Vec<Key>,
}

/// The nodes created by [`Tree::branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchNodes {
    /// The branch item.
    pub branch: Key,
    /// The control toggling the branch.
    pub opener: Key,
    /// The expandable content; children of the branch go here.
    pub submenu: Key,
}

/// An in-memory tree of menu nodes.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: SlotMap<Key, Node>,
    ids: FxHashMap<NodeId, Key>,
    focused: Option<Key>,
    viewport: Option<Rectangle>,
}

impl Tree {
    /// Creates an empty [`Tree`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node as the last child of `parent`.
    pub fn insert(
        &mut self,
        parent: Option<Key>,
        role: Role,
        id: Option<&str>,
        text: Option<&str>,
    ) -> Key {
        let id = id.map(NodeId::from);

        let key = self.nodes.insert(Node {
            role,
            id: id.clone(),
            text: text.map(str::to_owned),
            focusable: matches!(role, Role::Item | Role::CloseControl | Role::Opener),
            parent,
            ..Node::default()
        });

        if let Some(id) = id {
            let _ = self.ids.insert(id, key);
        }

        if let Some(node) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            node.children.push(key);
        }

        key
    }

    /// Inserts the root of a menu.
    pub fn root(&mut self, id: &str) -> Key {
        self.insert(None, Role::Root, Some(id), None)
    }

    /// Inserts a structural container.
    pub fn group(&mut self, parent: Key, id: &str) -> Key {
        self.insert(Some(parent), Role::Group, Some(id), None)
    }

    /// Inserts a leaf item.
    pub fn item(&mut self, parent: Key, id: &str, label: &str) -> Key {
        self.insert(Some(parent), Role::Item, Some(id), Some(label))
    }

    /// Inserts a leaf that closes its containing branch.
    pub fn close_control(&mut self, parent: Key, id: &str, label: &str) -> Key {
        self.insert(Some(parent), Role::CloseControl, Some(id), Some(label))
    }

    /// Inserts a separator.
    pub fn separator(&mut self, parent: Key) -> Key {
        self.insert(Some(parent), Role::Separator, None, None)
    }

    /// Inserts a branch together with its opener and its (closed) submenu.
    ///
    /// The opener and the submenu get the identities `{id}:opener` and
    /// `{id}:submenu`.
    pub fn branch(&mut self, parent: Key, id: &str, label: &str) -> BranchNodes {
        let branch = self.insert(Some(parent), Role::Branch, Some(id), None);
        let opener = self.insert(
            Some(branch),
            Role::Opener,
            Some(&format!("{id}:opener")),
            Some(label),
        );
        let submenu = self.insert(
            Some(branch),
            Role::Submenu,
            Some(&format!("{id}:submenu")),
            None,
        );

        BranchNodes {
            branch,
            opener,
            submenu,
        }
    }

    /// Removes a node and its subtree.
    ///
    /// Handles to removed nodes go stale; their identities stop resolving.
    pub fn remove(&mut self, key: Key) {
        let Some(parent) = self.nodes.get(key).map(|node| node.parent) else {
            return;
        };

        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|child| *child != key);
        }

        let mut stack = vec![key];

        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };

            if let Some(id) = node.id {
                if self.ids.get(&id) == Some(&current) {
                    let _ = self.ids.remove(&id);
                }
            }

            if self.focused == Some(current) {
                self.focused = None;
            }

            stack.extend(node.children);
        }
    }

    /// Returns the node carrying the given identity.
    pub fn get(&self, id: &str) -> Option<Key> {
        self.ids.get(&NodeId::from(id)).copied()
    }

    /// Sets whether a node can take input focus.
    pub fn set_focusable(&mut self, key: Key, focusable: bool) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.focusable = focusable;
        }
    }

    /// Sets the laid out bounds of a node.
    pub fn set_bounds(&mut self, key: Key, bounds: Rectangle) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.bounds = Some(bounds);
        }
    }

    /// Sets the bounds every menu must stay inside of.
    pub fn set_viewport(&mut self, viewport: Rectangle) {
        self.viewport = Some(viewport);
    }

    /// Returns the offset applied to a node by [`Adapter::set_offset`].
    pub fn offset(&self, key: Key) -> Vector {
        self.nodes.get(key).map_or(Vector::ZERO, |node| node.offset)
    }

    /// Drops input focus without giving it to another node.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Returns whether a node (still) exists.
    pub fn exists(&self, key: Key) -> bool {
        self.nodes.contains_key(key)
    }

    fn sibling(&self, key: Key, step: isize) -> Option<Key> {
        let parent = self.nodes.get(key)?.parent?;
        let children = &self.nodes.get(parent)?.children;
        let index = children.iter().position(|child| *child == key)?;

        children.get(index.checked_add_signed(step)?).copied()
    }
}

impl Adapter for Tree {
    type Node = Key;

    fn parent(&self, node: Key) -> Option<Key> {
        self.nodes.get(node)?.parent
    }

    fn first_child(&self, node: Key) -> Option<Key> {
        self.nodes.get(node)?.children.first().copied()
    }

    fn last_child(&self, node: Key) -> Option<Key> {
        self.nodes.get(node)?.children.last().copied()
    }

    fn next_sibling(&self, node: Key) -> Option<Key> {
        self.sibling(node, 1)
    }

    fn previous_sibling(&self, node: Key) -> Option<Key> {
        self.sibling(node, -1)
    }

    fn role(&self, node: Key) -> Role {
        self.nodes.get(node).map_or(Role::Group, |node| node.role)
    }

    fn id(&self, node: Key) -> Option<NodeId> {
        self.nodes.get(node)?.id.clone()
    }

    fn lookup(&self, id: &NodeId) -> Option<Key> {
        self.ids.get(id).copied()
    }

    fn state(&self, node: Key) -> State {
        self.nodes.get(node).map_or(State::empty(), |node| node.state)
    }

    fn set_state(&mut self, node: Key, flags: State, on: bool) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.state.set(flags, on);
        }
    }

    fn text(&self, node: Key) -> Option<&str> {
        self.nodes.get(node)?.text.as_deref()
    }

    fn is_focusable(&self, node: Key) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|node| node.focusable && !node.state.is_withdrawn())
    }

    fn focus(&mut self, node: Key) -> bool {
        if !self.is_focusable(node) {
            return false;
        }

        self.focused = Some(node);
        true
    }

    fn focused(&self) -> Option<Key> {
        self.focused
    }

    fn bounds(&self, node: Key) -> Option<Rectangle> {
        let node = self.nodes.get(node)?;

        node.bounds.map(|bounds| bounds + node.offset)
    }

    fn container_bounds(&self, _node: Key) -> Option<Rectangle> {
        self.viewport
    }

    fn set_offset(&mut self, node: Key, offset: Vector) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.offset = offset;
        }
    }
}
