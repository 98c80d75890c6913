use super::{Behavior, Navigator, open_items};

use crate::change::Flag;
use crate::core::walker::{self, Directive, Traversal};
use crate::core::{Adapter, Role, State, Vector};
use crate::timer::Task;

impl<A: Adapter> Navigator<A> {
    /// Opens a branch, given the branch itself, its opener or its submenu.
    ///
    /// When the menu keeps a single path open, every branch off the path to
    /// the opened one is closed first.
    ///
    /// Returns whether the branch was opened.
    pub fn open_branch(&mut self, node: A::Node) -> bool {
        let Some(branch) = self.resolve(node).and_then(|node| self.branch_of(node)) else {
            return false;
        };

        let Some(root) = self.root_of(branch) else {
            return false;
        };

        let Some(behavior) = self.behavior(root) else {
            return false;
        };

        if self.adapter.is_expanded(branch) || self.adapter.state(branch).is_withdrawn() {
            return false;
        }

        if behavior.one_open {
            let _ = self.close_all_paths(root, Some(branch));
        }

        self.animate(behavior, branch, true);

        if behavior.transient {
            if let Some(id) = self.adapter.id(root) {
                self.session.activate(id);
            }
        }

        true
    }

    /// Closes a branch, given the branch itself, its opener or its submenu.
    ///
    /// Open branches inside of it are closed too. When focus or the tab stop
    /// was inside of the closed submenu, it moves to the branch.
    ///
    /// Returns whether the branch was closed.
    pub fn close_branch(&mut self, node: A::Node) -> bool {
        let Some(branch) = self.resolve(node).and_then(|node| self.branch_of(node)) else {
            return false;
        };

        let Some(root) = self.root_of(branch) else {
            return false;
        };

        let Some(behavior) = self.behavior(root) else {
            return false;
        };

        if !self.adapter.is_expanded(branch) {
            return false;
        }

        self.fold(root, behavior, branch);

        true
    }

    /// Closes every open branch under `from`, except the ones on the path to
    /// `except`.
    ///
    /// Returns whether any branch was closed.
    pub fn close_all_paths(&mut self, from: A::Node, except: Option<A::Node>) -> bool {
        let Some(from) = self.resolve(from) else {
            return false;
        };

        let except = except.and_then(|except| self.resolve(except));
        let mut closed = false;

        for branch in self.open_branches(from).into_iter().rev() {
            if except.is_some_and(|except| self.adapter.contains(branch, except)) {
                continue;
            }

            closed |= self.close_branch(branch);
        }

        closed
    }

    /// Activates an item.
    ///
    /// - A close control closes the branch containing it.
    /// - A branch is toggled. Opening it focuses its first item, if the menu
    ///   does so.
    /// - A leaf is selected in menus selecting on navigation. Transient menus
    ///   close instead, leaving the activation itself to the host.
    ///
    /// Returns whether the activation was handled.
    pub fn action_item(&mut self, node: A::Node) -> bool {
        let Some(item) = self.resolve(node).and_then(|node| self.item_of(node)) else {
            return false;
        };

        let Some(root) = self.root_of(item) else {
            return false;
        };

        let Some(behavior) = self.behavior(root) else {
            return false;
        };

        if self.adapter.state(item).is_withdrawn() {
            return false;
        }

        match self.adapter.role(item) {
            Role::CloseControl => self
                .containing_branch(root, item)
                .is_some_and(|branch| self.close_branch(branch)),
            Role::Branch if self.adapter.is_expanded(item) => self.close_branch(item),
            Role::Branch => {
                if !self.open_branch(item) {
                    return false;
                }

                if behavior.focus_child_on_expand {
                    if let Some(id) = self.adapter.id(item) {
                        self.schedule(self.config.focus_delay, Task::FocusFirst { branch: id });
                    }
                }

                true
            }
            _ if behavior.selects_on_navigate => self.select(item),
            _ => {
                if behavior.transient {
                    let _ = self.close_all_paths(root, None);
                    self.deactivate(root);
                }

                false
            }
        }
    }

    /// Returns the first enabled and visible item of a menu, a submenu or the
    /// submenu of a branch.
    pub fn first_available_item(&self, node: A::Node) -> Option<A::Node> {
        let node = self.resolve(node)?;

        let container = match self.adapter.role(node) {
            Role::Branch | Role::Opener | Role::Submenu => {
                self.branch_of(node).and_then(|branch| self.adapter.submenu(branch))?
            }
            _ => node,
        };

        let filter = open_items::<A>;
        let traversal = Traversal::<A>::new(container).filter(&filter);

        walker::get_target(&self.adapter, &traversal, None, Directive::First)
            .ok()
            .flatten()
    }

    /// Expands or collapses the submenu of a branch and marks its opener.
    pub(super) fn animate(&mut self, behavior: Behavior, branch: A::Node, expand: bool) {
        let Some(submenu) = self.adapter.submenu(branch) else {
            return;
        };

        let _ = self.write(submenu, Flag::Expanded, expand);

        if !behavior.selects_on_navigate {
            if let Some(opener) = self.adapter.opener(branch) {
                let _ = self.write(opener, Flag::Selected, expand);
            }
        }

        if expand {
            if behavior.transient {
                if let Some(id) = self.adapter.id(submenu) {
                    self.schedule(self.config.collision_delay, Task::Collision { submenu: id });
                }
            }
        } else {
            self.adapter.set_state(submenu, State::COLLISION, false);
            self.adapter.set_offset(submenu, Vector::ZERO);
        }
    }

    /// Collapses a branch and the open branches inside of it, bringing focus
    /// and the tab stop back to the branch when they were inside.
    pub(super) fn fold(&mut self, root: A::Node, behavior: Behavior, branch: A::Node) {
        let Some(submenu) = self.adapter.submenu(branch) else {
            return;
        };

        for nested in self.open_branches(submenu).into_iter().rev() {
            self.animate(behavior, nested, false);
        }

        let focused = self
            .adapter
            .focused()
            .is_some_and(|focused| self.adapter.contains(submenu, focused));

        let tab_stop = self
            .tab_stop(root)
            .is_some_and(|tab_stop| self.adapter.contains(submenu, tab_stop));

        self.animate(behavior, branch, false);

        if focused || tab_stop {
            let _ = self.move_focus(root, branch, focused);
        }

        if self.open_branches(root).is_empty() {
            self.deactivate(root);
        }
    }

    pub(super) fn deactivate(&mut self, root: A::Node) {
        if let Some(id) = self.adapter.id(root) {
            if self.session.deactivate(&id) {
                log::debug!("`{id}` is not active anymore");
            }
        }
    }
}
