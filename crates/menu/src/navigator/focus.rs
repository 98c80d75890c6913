use super::Navigator;

use crate::Result;
use crate::change::Flag;
use crate::core::{Adapter, NodeId, State};
use crate::timer::{Slot, Task};

/// The owner of the last focus inside of a menu.
///
/// Hosts replacing the content of a menu asynchronously take a token before
/// the swap and hand it back with [`Navigator::content_replaced`] once the
/// new content is in place, so focus returns to the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocusToken {
    /// The identity of the menu root.
    pub root: NodeId,
    /// The identity of the item owning focus.
    pub item: NodeId,
}

impl<A: Adapter> Navigator<A> {
    /// Moves focus to an item of a menu.
    ///
    /// Both nodes are resolved again by identity first. Disabled and hidden
    /// items, and items outside of `root`, are refused. Transient menus close
    /// every path not leading to the item. The tab stop moves to the item
    /// before input focus does; an item that cannot take focus passes it on
    /// to its first focusable descendant.
    ///
    /// Returns whether input focus landed.
    pub fn focus_item(&mut self, item: A::Node, root: A::Node) -> Result<bool> {
        let (Some(item), Some(root)) = (self.resolve(item), self.resolve(root)) else {
            return Ok(false);
        };

        let behavior = self.menu(root)?.behavior;

        let Some(item) = self.item_of(item) else {
            return Ok(false);
        };

        if item == root
            || self.adapter.state(item).is_withdrawn()
            || !self.adapter.contains(root, item)
        {
            return Ok(false);
        }

        if behavior.transient {
            let _ = self.close_all_paths(root, Some(item));
        }

        Ok(self.move_focus(root, item, true))
    }

    /// Selects an item, deselecting every other item of its menu.
    pub fn select(&mut self, item: A::Node) -> bool {
        let Some(item) = self.resolve(item).and_then(|node| self.item_of(node)) else {
            return false;
        };

        let Some(root) = self.root_of(item) else {
            return false;
        };

        if self.adapter.state(item).is_withdrawn() {
            return false;
        }

        for node in self.members(root) {
            if node != item
                && self.adapter.role(node).is_item()
                && self.adapter.state(node).contains(State::SELECTED)
            {
                let _ = self.write(node, Flag::Selected, false);
            }
        }

        let _ = self.write(item, Flag::Selected, true);

        true
    }

    /// Returns a token naming the item that owns focus in a menu.
    ///
    /// Without input focus inside of the menu, the tab stop owns it.
    pub fn focus_token(&self, root: A::Node) -> Option<FocusToken> {
        let root = self.resolve(root)?;

        let owner = self
            .adapter
            .focused()
            .filter(|focused| *focused != root && self.adapter.contains(root, *focused))
            .or_else(|| self.tab_stop(root))?;

        let item = self.item_of(owner)?;

        Some(FocusToken {
            root: self.adapter.id(root)?,
            item: self.adapter.id(item)?,
        })
    }

    /// Restores focus after the content of a menu was replaced.
    ///
    /// Focus returns to the item named by the token. When it is gone, or
    /// cannot be reached anymore, the first available item of the menu takes
    /// focus instead.
    pub fn content_replaced(&mut self, token: &FocusToken) -> Result<bool> {
        if matches!(
            self.session.timers.pending(Slot::FocusCheck),
            Some(Task::FocusCheck { root }) if *root == token.root
        ) {
            let _ = self.session.timers.cancel(Slot::FocusCheck);
        }

        let Some(root) = self.resolve_id(&token.root) else {
            log::debug!("`{}` is gone, focus cannot be restored", token.root);
            return Ok(false);
        };

        let item = self
            .resolve_id(&token.item)
            .and_then(|node| self.item_of(node))
            .filter(|item| self.is_available(root, *item));

        if let Some(item) = item {
            if self.focus_item(item, root)? {
                return Ok(true);
            }
        }

        let Some(item) = self.reset_tab_stop(root) else {
            return Ok(false);
        };

        Ok(self.move_focus(root, item, true))
    }

    /// Moves the tab stop to an item and, if `focus` is set, input focus too.
    ///
    /// Returns whether input focus landed.
    pub(super) fn move_focus(&mut self, root: A::Node, item: A::Node, focus: bool) -> bool {
        let _ = self.set_tab_stop(root, item);

        if !focus {
            return false;
        }

        let target = self.focus_target(item);

        if self.adapter.focus(target) {
            return true;
        }

        let fallback = self
            .adapter
            .descendants(item)
            .into_iter()
            .find(|node| self.adapter.is_focusable(*node) && self.is_available(root, *node));

        fallback.is_some_and(|node| self.adapter.focus(node))
    }
}
