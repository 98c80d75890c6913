use super::Navigator;

use crate::change::Flag;
use crate::core::{Adapter, NodeId, Role, State};

use rustc_hash::FxHashSet;

/// The open branches and selected items of a menu, by identity.
///
/// Hosts persist it across page loads or round-trips to a server and hand it
/// back with [`Navigator::restore_state`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormState {
    /// The open branches, in document order.
    pub open: Vec<NodeId>,
    /// The selected items, in document order.
    pub selected: Vec<NodeId>,
}

impl FormState {
    /// Returns whether the branch with the given identity is open.
    pub fn is_open(&self, id: &NodeId) -> bool {
        self.open.contains(id)
    }

    /// Returns whether the item with the given identity is selected.
    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.contains(id)
    }

    /// Serializes the [`FormState`] to RON.
    #[cfg(feature = "serde")]
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::to_string(self)
    }

    /// Parses a [`FormState`] from RON.
    #[cfg(feature = "serde")]
    pub fn from_ron(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }
}

impl<A: Adapter> Navigator<A> {
    /// Writes out the open branches and selected items of `container` and
    /// everything under it.
    ///
    /// Nodes without an identity cannot be restored and are left out.
    pub fn save_state(&self, container: A::Node) -> FormState {
        let Some(container) = self.resolve(container) else {
            return FormState::default();
        };

        let mut state = FormState::default();

        for node in self.form_nodes(container) {
            let role = self.adapter.role(node);

            if !role.is_item() {
                continue;
            }

            let Some(id) = self.adapter.id(node) else {
                continue;
            };

            if role == Role::Branch && self.adapter.is_expanded(node) {
                state.open.push(id.clone());
            }

            if self.adapter.state(node).contains(State::SELECTED) {
                state.selected.push(id);
            }
        }

        state
    }

    /// Opens, closes, selects and deselects `container` and the items under
    /// it to match a saved [`FormState`].
    ///
    /// Returns whether anything changed.
    pub fn restore_state(&mut self, container: A::Node, saved: &FormState) -> bool {
        let Some(container) = self.resolve(container) else {
            return false;
        };

        let Some(root) = self.root_of(container) else {
            return false;
        };

        let Some(behavior) = self.behavior(root) else {
            return false;
        };

        let open: FxHashSet<&NodeId> = saved.open.iter().collect();
        let selected: FxHashSet<&NodeId> = saved.selected.iter().collect();

        let nodes = self.form_nodes(container);
        let mut changed = false;

        for &branch in nodes.iter().rev() {
            if self.adapter.role(branch) == Role::Branch
                && self.adapter.is_expanded(branch)
                && !self.adapter.id(branch).is_some_and(|id| open.contains(&id))
            {
                self.animate(behavior, branch, false);
                changed = true;
            }
        }

        for &branch in &nodes {
            if self.adapter.role(branch) == Role::Branch
                && !self.adapter.is_expanded(branch)
                && self.adapter.id(branch).is_some_and(|id| open.contains(&id))
            {
                self.animate(behavior, branch, true);
                changed = true;
            }
        }

        for &item in &nodes {
            if self.adapter.role(item).is_item() {
                let select = self.adapter.id(item).is_some_and(|id| selected.contains(&id));

                changed |= self.write(item, Flag::Selected, select);
            }
        }

        if behavior.transient {
            if let Some(id) = self.adapter.id(root) {
                if self.open_branches(root).is_empty() {
                    let _ = self.session.deactivate(&id);
                } else {
                    self.session.activate(id);
                }
            }
        }

        let valid = self
            .tab_stop(root)
            .and_then(|tab_stop| self.item_of(tab_stop))
            .is_some_and(|item| self.is_available(root, item));

        if !valid {
            let _ = self.reset_tab_stop(root);
        }

        changed
    }

    /// Returns `container`, when it is an item, and the nodes under it.
    fn form_nodes(&self, container: A::Node) -> Vec<A::Node> {
        let mut nodes = Vec::new();

        if self.adapter.role(container).is_item() {
            nodes.push(container);
        }

        nodes.extend(self.collect(container, |_| true));
        nodes
    }
}
