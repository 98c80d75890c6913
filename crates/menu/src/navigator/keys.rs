use super::{Behavior, Navigator, open_items, traversal};

use crate::Result;
use crate::core::keyboard::{Key, Modifiers};
use crate::core::walker::{self, Directive};
use crate::core::{Adapter, Role, search};
use crate::keymap::{Action, Command};
use crate::variant::{Level, Orientation};

impl<A: Adapter> Navigator<A> {
    /// Computes the item reached from `start` along a directive, with the
    /// cycling policy of the menu.
    ///
    /// Flat menus move among the items of the submenu containing `start`;
    /// trees move through every visible item of the root.
    pub fn get_target_item(
        &self,
        root: A::Node,
        start: Option<A::Node>,
        directive: Directive,
    ) -> Result<Option<A::Node>> {
        let Some(root) = self.resolve(root) else {
            return Ok(None);
        };

        let behavior = self.menu(root)?.behavior;

        let start = match start {
            Some(start) => match self.resolve(start).and_then(|start| self.item_of(start)) {
                Some(item) => Some(item),
                None => return Ok(None),
            },
            None => None,
        };

        let scope = match start {
            Some(item) if !behavior.depth_first => self.scope_of(root, item),
            _ => root,
        };

        let filter = open_items::<A>;
        let traversal = traversal(&behavior, scope, behavior.cycle, &filter);

        Ok(walker::get_target(
            &self.adapter,
            &traversal,
            start,
            directive,
        )?)
    }

    /// Handles a key pressed on an item.
    ///
    /// Keys bound in the keymap of the item's level move focus or run a
    /// command. Unbound printable characters jump to the next item whose
    /// label answers to them, without wrapping around.
    ///
    /// Returns whether the key was handled, in which case its default
    /// behavior must be prevented.
    pub fn key_activator(
        &mut self,
        item: A::Node,
        key: &Key,
        root: A::Node,
        modifiers: Modifiers,
    ) -> Result<bool> {
        let (Some(item), Some(root)) = (self.resolve(item), self.resolve(root)) else {
            return Ok(false);
        };

        let Some(item) = self.item_of(item) else {
            return Ok(false);
        };

        let menu = self.menu(root)?;
        let behavior = menu.behavior;
        let action = menu
            .keymap(self.level_of(root, item))
            .resolve(key, self.config.direction);

        match action {
            Some(Action::Move(directive)) => {
                if let Some(target) = self.get_target_item(root, Some(item), directive)? {
                    self.navigate(root, target, modifiers)?;
                }

                Ok(true)
            }
            Some(Action::Command(command)) => self.command(root, item, command, behavior),
            None => {
                let Some(character) = key.printable() else {
                    return Ok(false);
                };

                if modifiers.is_shortcut() {
                    return Ok(false);
                }

                let scope = if behavior.depth_first {
                    root
                } else {
                    self.scope_of(root, item)
                };

                let filter = open_items::<A>;
                let traversal = traversal(&behavior, scope, false, &filter);

                let Some(target) = search::find(&self.adapter, &traversal, Some(item), character)?
                else {
                    return Ok(false);
                };

                self.navigate(root, target, modifiers)?;

                Ok(true)
            }
        }
    }

    /// Focuses a target reached by navigation, selecting it in menus that
    /// select on navigation unless CTRL is held.
    fn navigate(&mut self, root: A::Node, target: A::Node, modifiers: Modifiers) -> Result<()> {
        let behavior = self.menu(root)?.behavior;

        let _ = self.focus_item(target, root)?;

        if behavior.selects_on_navigate && !modifiers.control() {
            let _ = self.select(target);
        }

        Ok(())
    }

    fn command(
        &mut self,
        root: A::Node,
        item: A::Node,
        command: Command,
        behavior: Behavior,
    ) -> Result<bool> {
        match command {
            Command::Activate => Ok(self.action_item(item)),
            Command::Expand => self.expand(root, item, behavior),
            Command::Collapse => self.collapse(root, item, behavior),
            Command::Escape => Ok(self.escape(root, item, behavior)),
        }
    }

    fn expand(&mut self, root: A::Node, item: A::Node, behavior: Behavior) -> Result<bool> {
        if self.adapter.role(item) != Role::Branch && self.crosses_bar(root, item, behavior) {
            return self.switch_menu(root, item, Directive::Next);
        }

        if self.adapter.role(item) != Role::Branch || self.adapter.state(item).is_withdrawn() {
            return Ok(false);
        }

        if behavior.depth_first {
            // Trees open in place and only enter open branches
            if !self.adapter.is_expanded(item) {
                return Ok(self.open_branch(item));
            }

            if let Some(child) = self.get_target_item(root, Some(item), Directive::Child)? {
                self.navigate(root, child, Modifiers::empty())?;
            }

            return Ok(true);
        }

        let _ = self.open_branch(item);

        if let Some(first) = self.first_available_item(item) {
            let _ = self.focus_item(first, root)?;
        }

        Ok(true)
    }

    fn collapse(&mut self, root: A::Node, item: A::Node, behavior: Behavior) -> Result<bool> {
        if behavior.depth_first {
            if self.adapter.role(item) == Role::Branch && self.adapter.is_expanded(item) {
                return Ok(self.close_branch(item));
            }

            if let Some(parent) = self.get_target_item(root, Some(item), Directive::Parent)? {
                self.navigate(root, parent, Modifiers::empty())?;
            }

            return Ok(true);
        }

        let Some(branch) = self.containing_branch(root, item) else {
            return Ok(false);
        };

        if self.containing_branch(root, branch).is_none()
            && self.crosses_bar(root, item, behavior)
        {
            return self.switch_menu(root, item, Directive::Previous);
        }

        let _ = self.close_branch(branch);
        let _ = self.focus_item(branch, root)?;

        Ok(true)
    }

    /// Returns whether horizontal keys inside of a submenu move along the
    /// top level of the menu.
    fn crosses_bar(&self, root: A::Node, item: A::Node, behavior: Behavior) -> bool {
        !behavior.depth_first
            && behavior.orientation(Level::Top) == Orientation::Horizontal
            && self.level_of(root, item) == Level::Nested
    }

    /// Moves from inside of a submenu to the neighbor of its top-level item,
    /// opening it when it is a branch.
    fn switch_menu(&mut self, root: A::Node, item: A::Node, directive: Directive) -> Result<bool> {
        let mut top = item;

        while let Some(branch) = self.containing_branch(root, top) {
            top = branch;
        }

        let Some(target) = self.get_target_item(root, Some(top), directive)? else {
            return Ok(false);
        };

        let hovering = self.session.is_hovering();

        let _ = self.close_all_paths(root, Some(target));
        let _ = self.focus_item(target, root)?;

        if self.adapter.role(target) == Role::Branch && self.open_branch(target) {
            self.session.set_hover(hovering);

            if let Some(first) = self.first_available_item(target) {
                let _ = self.focus_item(first, root)?;
            }
        }

        Ok(true)
    }

    fn escape(&mut self, root: A::Node, item: A::Node, behavior: Behavior) -> bool {
        if let Some(branch) = self.containing_branch(root, item) {
            let closed = self.close_branch(branch);
            let _ = self.move_focus(root, branch, true);

            return closed;
        }

        if self.adapter.role(item) == Role::Branch && self.adapter.is_expanded(item) {
            return self.close_branch(item);
        }

        if behavior.transient {
            let closed = self.close_all_paths(root, None);
            self.deactivate(root);

            return closed;
        }

        false
    }
}
