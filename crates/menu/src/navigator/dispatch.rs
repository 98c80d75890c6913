use super::Navigator;

use crate::Result;
use crate::core::event::{Event, Status};
use crate::core::keyboard::{Key, Modifiers};
use crate::core::{Adapter, NodeId, Role};
use crate::timer::{Slot, Task};

use web_time::Instant;

impl<A: Adapter> Navigator<A> {
    /// Processes an [`Event`] of a menu.
    ///
    /// Events are forwarded to the handler of their kind. Errors of a click
    /// are logged instead of propagated, as the host cannot act on them in
    /// the middle of pointer handling.
    pub fn dispatch(&mut self, event: Event<A::Node>) -> Result<Status> {
        match event {
            Event::Focus(node) => Ok(self.on_focus(node)),
            Event::Blur(node) => Ok(self.on_blur(node)),
            Event::Click(node) => match self.on_click(node) {
                Ok(status) => Ok(status),
                Err(error) => {
                    log::error!("failed to handle click on {node:?}: {error}");

                    Ok(Status::Captured)
                }
            },
            Event::KeyDown {
                target,
                key,
                modifiers,
            } => self.on_key_down(target, &key, modifiers),
            Event::MouseOver(node) => self.on_mouse_over(node),
        }
    }

    /// Runs the deferred work that is due at `now`.
    ///
    /// Returns the amount of tasks run.
    pub fn advance(&mut self, now: Instant) -> usize {
        let due = self.session.timers.take_due(now);
        let count = due.len();

        for task in due {
            self.run(task);
        }

        count
    }

    /// Runs every pending task right away, including the ones scheduled by
    /// the tasks themselves.
    ///
    /// Returns the amount of tasks run.
    pub fn flush(&mut self) -> usize {
        let mut count = 0;

        loop {
            let tasks = self.session.timers.take_all();

            if tasks.is_empty() {
                break count;
            }

            count += tasks.len();

            for task in tasks {
                self.run(task);
            }
        }
    }

    /// Returns the time at which the next deferred task is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.timers.next_deadline()
    }

    fn on_focus(&mut self, node: A::Node) -> Status {
        let Some(root) = self.root_of(node) else {
            return Status::Ignored;
        };

        let (Some(id), Some(behavior)) = (self.adapter.id(root), self.behavior(root)) else {
            return Status::Ignored;
        };

        if self.session.attach(id.clone(), behavior.transient) {
            log::debug!("attached listeners to `{id}`");
        }

        self.release_other(&id, node);
        self.cancel_pending(&id);
        self.blurred = None;

        let Some(item) = self.item_of(node) else {
            return Status::Ignored;
        };

        if behavior.transient {
            let _ = self.close_all_paths(root, Some(item));
        }

        let _ = self.set_tab_stop(root, item);

        Status::Ignored
    }

    fn on_blur(&mut self, node: A::Node) -> Status {
        let Some(root) = self.root_of(node) else {
            return Status::Ignored;
        };

        let Some(id) = self.adapter.id(root) else {
            return Status::Ignored;
        };

        match self.adapter.focused() {
            None => {
                self.blurred = Some(node);
                self.schedule(self.config.focus_check_delay, Task::FocusCheck { root: id });
            }
            Some(focused)
                if !self.adapter.contains(root, focused) && self.session.is_active(&id) =>
            {
                self.close_transient(&id);
            }
            Some(_) => {}
        }

        Status::Ignored
    }

    fn on_click(&mut self, node: A::Node) -> Result<Status> {
        let Some(root) = self.root_of(node) else {
            if let Some(active) = self.session.active().cloned() {
                self.close_transient(&active);
            }

            return Ok(Status::Ignored);
        };

        let Some(id) = self.adapter.id(root) else {
            return Ok(Status::Ignored);
        };

        let behavior = self.menu(root)?.behavior;

        self.release_other(&id, node);

        let Some(item) = self.item_of(node) else {
            return Ok(Status::Ignored);
        };

        if self.adapter.state(item).is_withdrawn() {
            return Ok(Status::Captured);
        }

        let _ = self.focus_item(item, root)?;
        let handled = self.action_item(item);

        if behavior.transient && self.adapter.role(item) == Role::Branch {
            self.session.set_hover(self.adapter.is_expanded(item));
        }

        Ok(Status::from(handled))
    }

    fn on_key_down(&mut self, node: A::Node, key: &Key, modifiers: Modifiers) -> Result<Status> {
        let Some(root) = self.root_of(node) else {
            return Ok(Status::Ignored);
        };

        let Some(id) = self.adapter.id(root) else {
            return Ok(Status::Ignored);
        };

        if !self.session.listeners(&id).key_down {
            return Ok(Status::Ignored);
        }

        self.key_activator(node, key, root, modifiers)
            .map(Status::from)
    }

    fn on_mouse_over(&mut self, node: A::Node) -> Result<Status> {
        let Some(root) = self.root_of(node) else {
            return Ok(Status::Ignored);
        };

        let Some(id) = self.adapter.id(root) else {
            return Ok(Status::Ignored);
        };

        if !self.session.listeners(&id).mouse_over
            || !self.session.is_hovering()
            || !self.session.is_active(&id)
        {
            return Ok(Status::Ignored);
        }

        let Some(item) = self.item_of(node) else {
            return Ok(Status::Ignored);
        };

        if !self.focus_item(item, root)? {
            return Ok(Status::Ignored);
        }

        // Focusing closed the previous path, the hover session goes on
        self.session.activate(id);
        self.session.set_hover(true);

        if self.adapter.role(item) == Role::Branch {
            let _ = self.open_branch(item);
        }

        Ok(Status::Ignored)
    }

    /// Closes the active transient menu when another menu takes over.
    ///
    /// A focusable target may still be settling, so the close is deferred.
    fn release_other(&mut self, root: &NodeId, node: A::Node) {
        let Some(active) = self.session.active().cloned() else {
            return;
        };

        if active == *root {
            return;
        }

        if self.adapter.is_focusable(node) {
            self.schedule(
                self.config.close_delay,
                Task::CloseTransient { root: active },
            );
        } else {
            self.close_transient(&active);
        }
    }

    /// Cancels the focus check and the deferred close of a menu that got
    /// focus back.
    fn cancel_pending(&mut self, root: &NodeId) {
        for slot in [Slot::FocusCheck, Slot::CloseTransient] {
            let pending = match self.session.timers.pending(slot) {
                Some(Task::FocusCheck { root: pending } | Task::CloseTransient { root: pending }) => {
                    pending == root
                }
                _ => false,
            };

            if pending {
                let _ = self.session.timers.cancel(slot);
            }
        }
    }

    fn close_transient(&mut self, root: &NodeId) {
        if let Some(node) = self.resolve_id(root) {
            let _ = self.close_all_paths(node, None);
        }

        if self.session.deactivate(root) {
            log::debug!("closed transient menu `{root}`");
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::FocusFirst { branch } => {
                let Some(branch) = self.resolve_id(&branch) else {
                    return;
                };

                if !self.adapter.is_expanded(branch) {
                    return;
                }

                let (Some(root), Some(item)) =
                    (self.root_of(branch), self.first_available_item(branch))
                else {
                    return;
                };

                if let Err(error) = self.focus_item(item, root) {
                    log::debug!("cannot focus first item of {branch:?}: {error}");
                }
            }
            Task::Collision { submenu } => {
                let Some(submenu) = self.resolve_id(&submenu) else {
                    return;
                };

                for submenu in self.submenu_path(submenu) {
                    let _ = self.detect_collision(submenu);
                }
            }
            Task::FocusCheck { root } => {
                let blurred = self.blurred.take();

                let Some(root) = self.resolve_id(&root) else {
                    return;
                };

                if self.adapter.focused().is_some() {
                    return;
                }

                if blurred.is_some_and(|node| self.adapter.contains(root, node)) {
                    return;
                }

                let item = match self.tab_stop(root).and_then(|node| self.item_of(node)) {
                    Some(item) if self.is_available(root, item) => Some(item),
                    _ => self.reset_tab_stop(root),
                };

                if let Some(item) = item {
                    let _ = self.move_focus(root, item, true);
                }
            }
            Task::CloseTransient { root } => self.close_transient(&root),
        }
    }
}
