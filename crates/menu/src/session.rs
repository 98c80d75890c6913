//! Keep track of the menus a user is interacting with.
use crate::core::NodeId;
use crate::timer::Timers;

use rustc_hash::FxHashMap;

/// The event listeners attached to a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Listeners {
    /// Key presses are handled.
    pub key_down: bool,
    /// Hovering opens branches.
    pub mouse_over: bool,
}

/// The navigation state shared by every menu of a [`Navigator`].
///
/// A session lives as long as its navigator is mounted. It remembers the
/// single transient menu that is currently active, whether hovering opens
/// branches, which menus were interacted with and the pending deferred work.
///
/// [`Navigator`]: crate::Navigator
#[derive(Debug, Clone, Default)]
pub struct Session {
    active: Option<NodeId>,
    hover: bool,
    listeners: FxHashMap<NodeId, Listeners>,
    pub(crate) timers: Timers,
}

impl Session {
    /// Returns the root of the active transient menu.
    pub fn active(&self) -> Option<&NodeId> {
        self.active.as_ref()
    }

    /// Returns whether the given menu is the active transient menu.
    pub fn is_active(&self, root: &NodeId) -> bool {
        self.active.as_ref() == Some(root)
    }

    /// Returns whether hovering opens branches of the active menu.
    pub fn is_hovering(&self) -> bool {
        self.hover
    }

    /// Returns the listeners attached to a menu.
    pub fn listeners(&self, root: &NodeId) -> Listeners {
        self.listeners.get(root).copied().unwrap_or_default()
    }

    /// Returns the pending deferred work.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub(crate) fn activate(&mut self, root: NodeId) {
        self.active = Some(root);
    }

    pub(crate) fn deactivate(&mut self, root: &NodeId) -> bool {
        if !self.is_active(root) {
            return false;
        }

        self.active = None;
        self.hover = false;
        true
    }

    pub(crate) fn set_hover(&mut self, hover: bool) {
        self.hover = hover;
    }

    /// Attaches listeners to a menu, returning whether anything was attached.
    pub(crate) fn attach(&mut self, root: NodeId, transient: bool) -> bool {
        let listeners = self.listeners.entry(root).or_default();
        let attached = Listeners {
            key_down: true,
            mouse_over: listeners.mouse_over || transient,
        };

        if *listeners == attached {
            return false;
        }

        *listeners = attached;
        true
    }

    pub(crate) fn detach(&mut self, root: &NodeId) {
        let _ = self.listeners.remove(root);
        let _ = self.deactivate(root);
    }
}
