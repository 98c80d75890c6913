//! Publish state changes of menu nodes.
use crate::core::{NodeId, State};

use slotmap::{SlotMap, new_key_type};

use std::fmt;

/// A state flag reported to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// A submenu was opened or closed.
    Expanded,
    /// A node was selected or deselected.
    Selected,
    /// A node was disabled or enabled.
    Disabled,
    /// A node was hidden or shown.
    Hidden,
}

impl Flag {
    /// Returns the node state the flag stands for.
    pub fn state(self) -> State {
        match self {
            Flag::Expanded => State::EXPANDED,
            Flag::Selected => State::SELECTED,
            Flag::Disabled => State::DISABLED,
            Flag::Hidden => State::HIDDEN,
        }
    }
}

/// A change of the state of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// The identity of the changed node, if it has one.
    pub id: Option<NodeId>,
    /// The changed flag.
    pub flag: Flag,
    /// The new value of the flag.
    pub value: bool,
}

new_key_type! {
    /// A handle to a subscriber of state changes.
    pub struct Subscription;
}

type Subscriber = Box<dyn FnMut(&Change)>;

/// The subscribers of state changes.
#[derive(Default)]
pub(crate) struct Bus {
    subscribers: SlotMap<Subscription, Subscriber>,
}

impl Bus {
    pub(crate) fn subscribe(&mut self, subscriber: impl FnMut(&Change) + 'static) -> Subscription {
        self.subscribers.insert(Box::new(subscriber))
    }

    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.remove(subscription).is_some()
    }

    pub(crate) fn publish(&mut self, change: &Change) {
        for subscriber in self.subscribers.values_mut() {
            subscriber(change);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
