use super::{Behavior, Navigator};

use crate::change::Flag;
use crate::core::{Adapter, Role, State};

impl<A: Adapter> Navigator<A> {
    /// Disables or enables a node.
    ///
    /// Disabling closes the branches inside of the node and moves the tab
    /// stop, and focus, away from it.
    ///
    /// Returns whether the state changed.
    pub fn set_disabled(&mut self, node: A::Node, disabled: bool) -> bool {
        self.set_flag(node, Flag::Disabled, disabled)
    }

    /// Hides or shows a node.
    ///
    /// Hiding has the same consequences as [disabling](Self::set_disabled).
    ///
    /// Returns whether the state changed.
    pub fn set_hidden(&mut self, node: A::Node, hidden: bool) -> bool {
        self.set_flag(node, Flag::Hidden, hidden)
    }

    /// Reacts to a state change made by the host through the adapter.
    ///
    /// Subscribers are notified like for changes made by the navigator.
    pub fn notify(&mut self, node: A::Node, flag: Flag, value: bool) {
        let Some(node) = self.resolve(node) else {
            return;
        };

        self.publish(node, flag, value);
        self.react(node, flag, value);
    }

    fn set_flag(&mut self, node: A::Node, flag: Flag, value: bool) -> bool {
        let Some(node) = self.resolve(node) else {
            return false;
        };

        if !self.write(node, flag, value) {
            return false;
        }

        self.react(node, flag, value);

        true
    }

    fn react(&mut self, node: A::Node, flag: Flag, value: bool) {
        let Some(root) = self.root_of(node) else {
            return;
        };

        let Some(behavior) = self.behavior(root) else {
            return;
        };

        match flag {
            Flag::Disabled | Flag::Hidden if value => self.withdraw(root, behavior, node),
            Flag::Disabled | Flag::Hidden => {
                let valid = self
                    .tab_stop(root)
                    .and_then(|tab_stop| self.item_of(tab_stop))
                    .is_some_and(|item| self.is_available(root, item));

                if !valid {
                    let _ = self.reset_tab_stop(root);
                }
            }
            Flag::Expanded => {
                let Some(branch) = self.branch_of(node) else {
                    return;
                };

                if value {
                    if behavior.one_open {
                        let _ = self.close_all_paths(root, Some(branch));
                    }

                    self.animate(behavior, branch, true);

                    if behavior.transient {
                        if let Some(id) = self.adapter.id(root) {
                            self.session.activate(id);
                        }
                    }
                } else {
                    self.fold(root, behavior, branch);
                }
            }
            Flag::Selected => {}
        }
    }

    /// Takes a disabled or hidden node out of navigation.
    fn withdraw(&mut self, root: A::Node, behavior: Behavior, node: A::Node) {
        if node == root {
            let _ = self.close_all_paths(root, None);
            self.deactivate(root);

            return;
        }

        let focused = self
            .adapter
            .focused()
            .is_some_and(|focused| self.adapter.contains(node, focused));

        let mut branches = self.open_branches(node);

        if self.adapter.role(node) == Role::Branch && self.adapter.is_expanded(node) {
            branches.insert(0, node);
        }

        for branch in branches.into_iter().rev() {
            self.animate(behavior, branch, false);
        }

        let holder = self.tab_stop(root);

        if holder.is_none_or(|holder| self.adapter.contains(node, holder)) {
            if let Some(item) = self.replacement(root, node) {
                let _ = self.move_focus(root, item, focused);
            }
        } else if focused {
            if let Some(item) = holder.and_then(|holder| self.item_of(holder)) {
                let _ = self.move_focus(root, item, true);
            }
        }

        if self.open_branches(root).is_empty() {
            self.deactivate(root);
        }
    }

    /// Finds the item taking over from a withdrawn node: the first available
    /// item next to it, the closest available branch around it, or the first
    /// available item of the menu.
    fn replacement(&self, root: A::Node, node: A::Node) -> Option<A::Node> {
        let scope = self.scope_of(root, node);

        if scope == root || self.adapter.state(scope).contains(State::EXPANDED) {
            let sibling = self
                .first_available_item(scope)
                .filter(|item| self.is_available(root, *item));

            if sibling.is_some() {
                return sibling;
            }
        }

        let mut current = self.containing_branch(root, node);

        while let Some(branch) = current {
            if self.is_available(root, branch) {
                return Some(branch);
            }

            current = self.containing_branch(root, branch);
        }

        self.first_available_item(root)
    }
}
