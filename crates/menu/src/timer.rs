//! Defer work until the layout has settled.
//!
//! Every kind of [`Task`] has a single slot: scheduling a task replaces the
//! pending task of the same kind instead of piling up.
use crate::core::NodeId;

use rustc_hash::FxHashMap;
use web_time::Instant;

use std::time::Duration;

/// A deferred piece of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Focus the first item of a freshly expanded branch.
    FocusFirst {
        /// The expanded branch.
        branch: NodeId,
    },
    /// Keep an expanded submenu inside of its container.
    Collision {
        /// The expanded submenu.
        submenu: NodeId,
    },
    /// Bring focus back to a menu that lost it to nowhere.
    FocusCheck {
        /// The menu that lost focus.
        root: NodeId,
    },
    /// Close a transient menu that is not active anymore.
    CloseTransient {
        /// The menu to close.
        root: NodeId,
    },
}

impl Task {
    /// Returns the slot of the task.
    pub fn slot(&self) -> Slot {
        match self {
            Task::FocusFirst { .. } => Slot::FocusFirst,
            Task::Collision { .. } => Slot::Collision,
            Task::FocusCheck { .. } => Slot::FocusCheck,
            Task::CloseTransient { .. } => Slot::CloseTransient,
        }
    }
}

/// The kind of a [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Slot {
    FocusFirst,
    Collision,
    FocusCheck,
    CloseTransient,
}

/// The pending tasks.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: FxHashMap<Slot, (Instant, Task)>,
}

impl Timers {
    /// Schedules a task to run after `delay`, replacing the pending task of
    /// the same kind.
    ///
    /// Returns the replaced task.
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: Task) -> Option<Task> {
        self.pending
            .insert(task.slot(), (now + delay, task))
            .map(|(_, task)| task)
    }

    /// Cancels the pending task of a kind.
    pub fn cancel(&mut self, slot: Slot) -> Option<Task> {
        self.pending.remove(&slot).map(|(_, task)| task)
    }

    /// Returns the pending task of a kind.
    pub fn pending(&self, slot: Slot) -> Option<&Task> {
        self.pending.get(&slot).map(|(_, task)| task)
    }

    /// Returns whether no task is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the earliest deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|(deadline, _)| *deadline).min()
    }

    /// Removes and returns the tasks due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Task> {
        let mut due: Vec<_> = self
            .pending
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .map(|(slot, (deadline, _))| (*deadline, *slot))
            .collect();

        due.sort_by_key(|(deadline, slot)| (*deadline, order(*slot)));

        due.into_iter()
            .filter_map(|(_, slot)| self.cancel(slot))
            .collect()
    }

    /// Removes and returns every pending task, earliest first.
    pub fn take_all(&mut self) -> Vec<Task> {
        let mut all: Vec<_> = self.pending.drain().map(|(_, pending)| pending).collect();

        all.sort_by_key(|(deadline, task)| (*deadline, order(task.slot())));

        all.into_iter().map(|(_, task)| task).collect()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

// Ties run in the order the state machine performs them
fn order(slot: Slot) -> u8 {
    match slot {
        Slot::CloseTransient => 0,
        Slot::FocusFirst => 1,
        Slot::Collision => 2,
        Slot::FocusCheck => 3,
    }
}
