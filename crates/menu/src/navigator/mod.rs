//! Drive keyboard, pointer and focus navigation of menus and trees.
//!
//! A [`Navigator`] owns the [`Adapter`] of a UI tree and any number of menus
//! registered on its [`Role::Root`] nodes. Every event of a menu enters
//! through [`Navigator::dispatch`]; the navigator computes the next target
//! with a [`Traversal`] and writes the resulting state back through the
//! adapter.
//!
//! Within a single call, mutations always happen in the same order: competing
//! paths are closed, the target is expanded or collapsed, and only then focus
//! moves.
mod branch;
mod collision;
mod dispatch;
mod focus;
mod form_state;
mod keys;
mod state;

pub use focus::FocusToken;
pub use form_state::FormState;

use crate::change::{Bus, Change, Flag, Subscription};
use crate::config::Config;
use crate::core::walker::{Shape, Traversal, Verdict};
use crate::core::{Adapter, NodeId, Role, State};
use crate::keymap::Keymap;
use crate::session::Session;
use crate::timer::Task;
use crate::variant::{Level, Orientation, Variant};
use crate::{Error, Result};

use rustc_hash::FxHashMap;
use web_time::Instant;

use std::time::Duration;

/// The navigation state machine of a set of menus.
#[derive(Debug)]
pub struct Navigator<A: Adapter> {
    adapter: A,
    config: Config,
    menus: FxHashMap<NodeId, Menu>,
    session: Session,
    bus: Bus,
    blurred: Option<A::Node>,
}

#[derive(Debug)]
struct Menu {
    variant: Box<dyn Variant>,
    behavior: Behavior,
    top: Keymap,
    nested: Keymap,
}

impl Menu {
    fn keymap(&self, level: Level) -> &Keymap {
        match level {
            Level::Top => &self.top,
            Level::Nested => &self.nested,
        }
    }
}

/// The answers of a [`Variant`], queried once on registration.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
struct Behavior {
    shape: Shape,
    one_open: bool,
    transient: bool,
    selects_on_navigate: bool,
    cycle: bool,
    depth_first: bool,
    focus_child_on_expand: bool,
    top: Orientation,
    nested: Orientation,
}

impl Behavior {
    fn new(variant: &dyn Variant) -> Self {
        Self {
            shape: variant.shape(),
            one_open: variant.one_open(),
            transient: variant.is_transient(),
            selects_on_navigate: variant.selects_on_navigate(),
            cycle: variant.cycle(),
            depth_first: variant.depth_first(),
            focus_child_on_expand: variant.focus_child_on_expand(),
            top: variant.orientation(Level::Top),
            nested: variant.orientation(Level::Nested),
        }
    }

    fn orientation(&self, level: Level) -> Orientation {
        match level {
            Level::Top => self.top,
            Level::Nested => self.nested,
        }
    }
}

impl<A: Adapter> Navigator<A> {
    /// Creates a [`Navigator`] with the default [`Config`].
    pub fn new(adapter: A) -> Self {
        Self::with_config(adapter, Config::default())
    }

    /// Creates a [`Navigator`] with the given [`Config`].
    pub fn with_config(adapter: A, config: Config) -> Self {
        Self {
            adapter,
            config,
            menus: FxHashMap::default(),
            session: Session::default(),
            bus: Bus::default(),
            blurred: None,
        }
    }

    /// Returns the adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Returns the adapter mutably.
    ///
    /// Changes of disabled or hidden state made through it must be reported
    /// with [`Navigator::notify`].
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the navigation session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Registers a menu on a root node.
    ///
    /// The keymaps of the variant are resolved and validated once, here. The
    /// first available item of the menu becomes its tab stop.
    pub fn register(&mut self, root: A::Node, variant: impl Variant + 'static) -> Result<()> {
        if self.adapter.role(root) != Role::Root {
            return Err(Error::NotARoot);
        }

        let id = self.adapter.id(root).ok_or(Error::MissingIdentity)?;

        let top = variant.keymap(Level::Top);
        let nested = variant.keymap(Level::Nested);
        let shape = variant.shape();

        for keymap in [&top, &nested] {
            keymap
                .validate(shape)
                .map_err(|(key, directive)| Error::InvalidKeymap {
                    variant: variant.name(),
                    key,
                    directive,
                })?;
        }

        log::debug!("registering {} menu on `{id}`", variant.name());

        let behavior = Behavior::new(&variant);

        let _ = self.menus.insert(
            id,
            Menu {
                variant: Box::new(variant),
                behavior,
                top,
                nested,
            },
        );

        if self.tab_stop(root).is_none() {
            let _ = self.reset_tab_stop(root);
        }

        Ok(())
    }

    /// Unregisters the menu of a root node.
    pub fn unregister(&mut self, root: A::Node) -> bool {
        let Some(id) = self.adapter.id(root) else {
            return false;
        };

        self.session.detach(&id);

        self.menus.remove(&id).is_some()
    }

    /// Returns whether a menu is registered on the node.
    pub fn is_registered(&self, root: A::Node) -> bool {
        self.adapter
            .id(root)
            .is_some_and(|id| self.menus.contains_key(&id))
    }

    /// Returns the name of the variant of a registered menu.
    pub fn variant_name(&self, root: A::Node) -> Option<&'static str> {
        let id = self.adapter.id(root)?;

        self.menus.get(&id).map(|menu| menu.variant.name())
    }

    /// Returns the root of the menu a node belongs to.
    ///
    /// A node belongs to no menu when its closest root node and its closest
    /// registered root disagree.
    pub fn root_of(&self, node: A::Node) -> Option<A::Node> {
        let node = self.resolve(node)?;
        let generic = self.adapter.closest(node, Role::Root)?;

        let mut current = Some(node);
        let registered = loop {
            let candidate = current?;

            if self
                .adapter
                .id(candidate)
                .is_some_and(|id| self.menus.contains_key(&id))
            {
                break candidate;
            }

            current = self.adapter.parent(candidate);
        };

        if generic != registered {
            log::debug!("{node:?} resolves to two different roots, ignoring it");
            return None;
        }

        Some(registered)
    }

    /// Subscribes to the state changes of every menu node.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Change) + 'static) -> Subscription {
        self.bus.subscribe(subscriber)
    }

    /// Cancels a subscription.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    /// Tears down the navigation session: pending work is dropped and every
    /// menu and subscriber is forgotten.
    pub fn unmount(&mut self) {
        self.session = Session::default();
        self.blurred = None;
        self.menus.clear();
        self.bus.clear();
    }

    /// Returns the tab stop of a menu.
    pub fn tab_stop(&self, root: A::Node) -> Option<A::Node> {
        let root = self.resolve(root)?;

        self.members(root)
            .into_iter()
            .find(|node| self.adapter.state(*node).contains(State::TAB_STOP))
    }

    /// Makes an item the tab stop of its menu.
    ///
    /// The opener of a branch holds the tab stop in place of the branch.
    pub fn set_tab_stop(&mut self, root: A::Node, item: A::Node) -> bool {
        let (Some(root), Some(item)) = (self.resolve(root), self.resolve(item)) else {
            return false;
        };

        if item == root || !self.adapter.contains(root, item) {
            return false;
        }

        let target = self.focus_target(item);

        for node in self.members(root) {
            if node != target && self.adapter.state(node).contains(State::TAB_STOP) {
                self.adapter.set_state(node, State::TAB_STOP, false);
            }
        }

        self.adapter.set_state(target, State::TAB_STOP, true);

        true
    }

    /// Moves the tab stop of a menu to its first available item.
    pub fn reset_tab_stop(&mut self, root: A::Node) -> Option<A::Node> {
        let root = self.resolve(root)?;
        let item = self.first_available_item(root)?;

        let _ = self.set_tab_stop(root, item);

        Some(item)
    }

    fn menu(&self, root: A::Node) -> Result<&Menu> {
        let id = self.adapter.id(root).ok_or(Error::MissingIdentity)?;

        self.menus.get(&id).ok_or(Error::UnregisteredRoot(id))
    }

    fn behavior(&self, root: A::Node) -> Option<Behavior> {
        let id = self.adapter.id(root)?;

        self.menus.get(&id).map(|menu| menu.behavior)
    }

    /// Resolves a node again by its identity.
    fn resolve(&self, node: A::Node) -> Option<A::Node> {
        match self.adapter.id(node) {
            Some(id) => self.adapter.lookup(&id),
            None => Some(node),
        }
    }

    fn resolve_id(&self, id: &NodeId) -> Option<A::Node> {
        self.adapter.lookup(id)
    }

    /// Returns the item a node is part of.
    fn item_of(&self, node: A::Node) -> Option<A::Node> {
        let mut current = Some(node);

        while let Some(node) = current {
            match self.adapter.role(node) {
                Role::Opener => return self.adapter.parent(node),
                Role::Root => return None,
                role if role.is_item() => return Some(node),
                _ => current = self.adapter.parent(node),
            }
        }

        None
    }

    /// Returns the branch owning a branch, an opener or a submenu.
    fn branch_of(&self, node: A::Node) -> Option<A::Node> {
        match self.adapter.role(node) {
            Role::Branch => Some(node),
            Role::Opener | Role::Submenu => self
                .adapter
                .parent(node)
                .filter(|parent| self.adapter.role(*parent) == Role::Branch),
            _ => None,
        }
    }

    /// Returns the node taking focus for an item.
    fn focus_target(&self, item: A::Node) -> A::Node {
        if self.adapter.role(item) == Role::Branch {
            self.adapter.opener(item).unwrap_or(item)
        } else {
            item
        }
    }

    /// Returns the submenu or root the items around `node` live in.
    fn scope_of(&self, root: A::Node, node: A::Node) -> A::Node {
        let mut current = self.adapter.parent(node);

        while let Some(node) = current {
            if node == root {
                break;
            }

            if self.adapter.role(node) == Role::Submenu {
                return node;
            }

            current = self.adapter.parent(node);
        }

        root
    }

    fn level_of(&self, root: A::Node, node: A::Node) -> Level {
        if self.scope_of(root, node) == root {
            Level::Top
        } else {
            Level::Nested
        }
    }

    /// Returns the branch whose submenu contains `node`.
    fn containing_branch(&self, root: A::Node, node: A::Node) -> Option<A::Node> {
        let scope = self.scope_of(root, node);

        if scope == root {
            return None;
        }

        self.branch_of(scope)
    }

    /// Returns the nodes of a menu in pre-order, without nested menus.
    fn members(&self, root: A::Node) -> Vec<A::Node> {
        self.collect(root, |_| true)
    }

    /// Returns the open branches under `from` in pre-order.
    ///
    /// Branches inside of closed submenus are left out.
    fn open_branches(&self, from: A::Node) -> Vec<A::Node> {
        let adapter = &self.adapter;

        self.collect(from, |node| {
            adapter.role(node) != Role::Submenu || adapter.state(node).contains(State::EXPANDED)
        })
        .into_iter()
        .filter(|node| adapter.role(*node) == Role::Branch && adapter.is_expanded(*node))
        .collect()
    }

    /// Returns the nodes under `from` in pre-order, descending only into
    /// nodes accepted by `descend` and never into nested roots.
    fn collect(&self, from: A::Node, descend: impl Fn(A::Node) -> bool) -> Vec<A::Node> {
        let mut nodes = Vec::new();
        let mut stack = Vec::new();

        let push_children = |stack: &mut Vec<A::Node>, node: A::Node| {
            let mut child = self.adapter.last_child(node);

            while let Some(current) = child {
                stack.push(current);
                child = self.adapter.previous_sibling(current);
            }
        };

        push_children(&mut stack, from);

        while let Some(node) = stack.pop() {
            if self.adapter.role(node) == Role::Root {
                continue;
            }

            nodes.push(node);

            if descend(node) {
                push_children(&mut stack, node);
            }
        }

        nodes
    }

    /// Returns whether an item can be reached: neither it nor any of its
    /// ancestors up to `root` is withdrawn or a closed submenu.
    fn is_available(&self, root: A::Node, item: A::Node) -> bool {
        if self.adapter.state(item).is_withdrawn() || !self.adapter.contains(root, item) {
            return false;
        }

        let mut current = self.adapter.parent(item);

        while let Some(node) = current {
            if node == root {
                return true;
            }

            let state = self.adapter.state(node);

            if state.is_withdrawn()
                || (self.adapter.role(node) == Role::Submenu && !state.contains(State::EXPANDED))
            {
                return false;
            }

            current = self.adapter.parent(node);
        }

        false
    }

    /// Writes a state flag, notifying subscribers when it changed.
    fn write(&mut self, node: A::Node, flag: Flag, value: bool) -> bool {
        let state = flag.state();

        if self.adapter.state(node).contains(state) == value {
            return false;
        }

        self.adapter.set_state(node, state, value);
        self.publish(node, flag, value);

        true
    }

    fn publish(&mut self, node: A::Node, flag: Flag, value: bool) {
        let change = Change {
            id: self.adapter.id(node),
            flag,
            value,
        };

        self.bus.publish(&change);
    }

    fn schedule(&mut self, delay: Duration, task: Task) {
        if let Some(replaced) = self.session.timers.schedule(Instant::now(), delay, task) {
            log::debug!("replacing pending {replaced:?}");
        }
    }
}

/// The filter of menu items.
///
/// Openers stand in for their branch and separators and nested menus are
/// never stops. Closed submenus are pruned when `ignore_closed` is set.
fn items<A: Adapter>(adapter: &A, node: A::Node, ignore_closed: bool) -> Verdict {
    let state = adapter.state(node);

    if state.is_withdrawn() {
        return Verdict::Reject;
    }

    match adapter.role(node) {
        Role::Root | Role::Separator | Role::Opener => Verdict::Reject,
        Role::Submenu if ignore_closed && !state.contains(State::EXPANDED) => Verdict::Reject,
        Role::Submenu | Role::Group => Verdict::Skip,
        Role::Branch | Role::Item | Role::CloseControl => Verdict::Accept,
    }
}

fn open_items<A: Adapter>(adapter: &A, node: A::Node) -> Verdict {
    items(adapter, node, true)
}

/// Creates the traversal of a menu around a scope.
fn traversal<'a, A: Adapter>(
    behavior: &Behavior,
    scope: A::Node,
    cycle: bool,
    filter: &'a dyn Fn(&A, A::Node) -> Verdict,
) -> Traversal<'a, A> {
    Traversal {
        root: Some(scope),
        cycle,
        depth_first: behavior.depth_first,
        shape: behavior.shape,
        filter: Some(filter),
    }
}
