//! Walk a filtered view of a navigable tree.
//!
//! A [`Traversal`] describes a logical view of the subtree under its root:
//! nodes for which the filter answers [`Verdict::Reject`] disappear together
//! with their subtree, nodes answering [`Verdict::Skip`] are replaced by their
//! own logical children. [`get_target`] moves through that view one
//! [`Directive`] at a time.
//!
//! Traversals are built for every call and never stored, as the tree is
//! expected to change between calls.
use crate::{Adapter, State};

use std::fmt;
use std::str::FromStr;

/// The answer of a filter for a candidate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The node is a valid stop.
    Accept,
    /// The node and its whole subtree are excluded.
    Reject,
    /// The node is not a stop, but its subtree is still searched.
    Skip,
}

/// A movement through a [`Traversal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Directive {
    /// The first stop under the root.
    First,
    /// The last stop directly reachable from the root.
    Last,
    /// The stop after the start node.
    Next,
    /// The stop before the start node.
    Previous,
    /// The closest accepted ancestor of the start node.
    Parent,
    /// The first stop under the start node.
    Child,
    /// The last stop directly reachable from the start node.
    LastChild,
    /// The first stop anywhere under the root.
    Top,
    /// The last stop anywhere under the root, however deeply nested.
    End,
}

impl Directive {
    /// All the directives.
    pub const ALL: [Directive; 9] = [
        Directive::First,
        Directive::Last,
        Directive::Next,
        Directive::Previous,
        Directive::Parent,
        Directive::Child,
        Directive::LastChild,
        Directive::Top,
        Directive::End,
    ];

    /// Returns the name of the directive.
    pub fn name(self) -> &'static str {
        match self {
            Directive::First => "first",
            Directive::Last => "last",
            Directive::Next => "next",
            Directive::Previous => "previous",
            Directive::Parent => "parent",
            Directive::Child => "child",
            Directive::LastChild => "last_child",
            Directive::Top => "top",
            Directive::End => "end",
        }
    }

    /// Returns whether the directive needs a tree with depth.
    pub fn is_hierarchical(self) -> bool {
        matches!(
            self,
            Directive::Parent | Directive::Child | Directive::LastChild
        )
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Directive {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Directive::ALL
            .into_iter()
            .find(|directive| directive.name() == name)
            .ok_or_else(|| Error::UnknownDirective(name.to_owned()))
    }
}

/// The shape of the view a [`Traversal`] walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// A hierarchy with parents and children.
    #[default]
    Tree,
    /// A flat group of siblings.
    Group,
}

/// A filter deciding which nodes a [`Traversal`] stops at.
pub type Filter<'a, A> = dyn Fn(&A, <A as Adapter>::Node) -> Verdict + 'a;

/// An error produced by a misconfigured [`Traversal`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The traversal has no root.
    #[error("traversal has no root node")]
    MissingRoot,

    /// The directive needs a hierarchy, but the traversal is flat.
    #[error("directive `{directive}` is not defined for a {shape:?} traversal")]
    UnsupportedDirective {
        /// The requested directive.
        directive: Directive,
        /// The shape of the traversal.
        shape: Shape,
    },

    /// The name does not match any [`Directive`].
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),
}

/// The configuration of a single walk.
pub struct Traversal<'a, A: Adapter> {
    /// The node bounding the walk. It is never returned itself.
    pub root: Option<A::Node>,
    /// Whether stepping past either end wraps around.
    pub cycle: bool,
    /// Whether [`Directive::Next`] and [`Directive::Previous`] descend into
    /// children before moving on to siblings.
    pub depth_first: bool,
    /// The shape of the walked view.
    pub shape: Shape,
    /// The filter; [`default_filter`] when absent.
    pub filter: Option<&'a Filter<'a, A>>,
}

impl<'a, A: Adapter> Traversal<'a, A> {
    /// Creates a hierarchical [`Traversal`] under `root`.
    pub fn new(root: A::Node) -> Self {
        Self {
            root: Some(root),
            cycle: false,
            depth_first: false,
            shape: Shape::Tree,
            filter: None,
        }
    }

    /// Creates a flat [`Traversal`] over the stops under `root`.
    pub fn group(root: A::Node) -> Self {
        Self {
            shape: Shape::Group,
            ..Self::new(root)
        }
    }

    /// Sets whether the traversal wraps around.
    #[must_use]
    pub fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    /// Sets whether the traversal is depth-first.
    #[must_use]
    pub fn depth_first(mut self, depth_first: bool) -> Self {
        self.depth_first = depth_first;
        self
    }

    /// Sets the filter of the traversal.
    #[must_use]
    pub fn filter(mut self, filter: &'a Filter<'a, A>) -> Self {
        self.filter = Some(filter);
        self
    }
}

impl<A: Adapter> fmt::Debug for Traversal<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("root", &self.root)
            .field("cycle", &self.cycle)
            .field("depth_first", &self.depth_first)
            .field("shape", &self.shape)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// Rejects disabled and hidden nodes and accepts everything else.
pub fn default_filter<A: Adapter>(adapter: &A, node: A::Node) -> Verdict {
    if adapter.state(node).intersects(State::DISABLED | State::HIDDEN) {
        Verdict::Reject
    } else {
        Verdict::Accept
    }
}

/// Computes the node reached by moving from `start` along `directive`.
///
/// A `start` of `None` starts the walk at the root. A `start` outside of the
/// root has nothing to move from and yields `Ok(None)`.
///
/// This is a pure function of the current state of the tree.
pub fn get_target<A: Adapter>(
    adapter: &A,
    traversal: &Traversal<'_, A>,
    start: Option<A::Node>,
    directive: Directive,
) -> Result<Option<A::Node>, Error> {
    let root = traversal.root.ok_or(Error::MissingRoot)?;

    if traversal.shape == Shape::Group && directive.is_hierarchical() {
        return Err(Error::UnsupportedDirective {
            directive,
            shape: traversal.shape,
        });
    }

    let start = start.unwrap_or(root);

    if !adapter.contains(root, start) {
        log::debug!("walk start {start:?} is outside of its root {root:?}");
        return Ok(None);
    }

    let walker = Walker {
        adapter,
        root,
        filter: traversal.filter,
    };

    let depth_first = traversal.depth_first && traversal.shape == Shape::Tree;

    let target = match directive {
        Directive::First => walker.first_child(root),
        Directive::Last => walker.last_child(root),
        Directive::Top => walker.first_child(root),
        Directive::End if traversal.shape == Shape::Group => walker.last_child(root),
        Directive::End => walker.end(),
        Directive::Next if start == root => walker.first_child(root),
        Directive::Previous if start == root => {
            if depth_first {
                walker.end()
            } else {
                walker.last_child(root)
            }
        }
        Directive::Next => {
            let next = if depth_first {
                walker.next_node(start)
            } else {
                walker.traverse_siblings(start, true)
            };

            next.or_else(|| {
                if !traversal.cycle {
                    None
                } else if depth_first {
                    walker.first_child(root)
                } else {
                    walker.first_child(walker.scope_of(start, traversal.shape))
                }
            })
        }
        Directive::Previous => {
            let previous = if depth_first {
                walker.previous_node(start)
            } else {
                walker.traverse_siblings(start, false)
            };

            previous.or_else(|| {
                if !traversal.cycle {
                    None
                } else if depth_first {
                    walker.end()
                } else {
                    walker.last_child(walker.scope_of(start, traversal.shape))
                }
            })
        }
        Directive::Parent => walker.parent_node(start),
        Directive::Child => walker.first_child(start),
        Directive::LastChild => walker.last_child(start),
    };

    Ok(target)
}

struct Walker<'a, A: Adapter> {
    adapter: &'a A,
    root: A::Node,
    filter: Option<&'a Filter<'a, A>>,
}

impl<A: Adapter> Walker<'_, A> {
    fn verdict(&self, node: A::Node) -> Verdict {
        match self.filter {
            Some(filter) => filter(self.adapter, node),
            None => default_filter(self.adapter, node),
        }
    }

    fn first_child(&self, node: A::Node) -> Option<A::Node> {
        self.traverse_children(node, true)
    }

    fn last_child(&self, node: A::Node) -> Option<A::Node> {
        self.traverse_children(node, false)
    }

    /// The logical parent whose children `node` cycles through.
    fn scope_of(&self, node: A::Node, shape: Shape) -> A::Node {
        match shape {
            Shape::Group => self.root,
            Shape::Tree => self.parent_node(node).unwrap_or(self.root),
        }
    }

    fn end(&self) -> Option<A::Node> {
        let mut node = self.last_child(self.root)?;

        while let Some(child) = self.last_child(node) {
            node = child;
        }

        Some(node)
    }

    fn traverse_children(&self, current: A::Node, first: bool) -> Option<A::Node> {
        let adapter = self.adapter;
        let child = |node| {
            if first {
                adapter.first_child(node)
            } else {
                adapter.last_child(node)
            }
        };
        let sibling = |node| {
            if first {
                adapter.next_sibling(node)
            } else {
                adapter.previous_sibling(node)
            }
        };

        let mut node = child(current)?;

        loop {
            match self.verdict(node) {
                Verdict::Accept => return Some(node),
                Verdict::Skip => {
                    if let Some(inner) = child(node) {
                        node = inner;
                        continue;
                    }
                }
                Verdict::Reject => {}
            }

            loop {
                if let Some(next) = sibling(node) {
                    node = next;
                    break;
                }

                let parent = adapter.parent(node)?;

                if parent == self.root || parent == current {
                    return None;
                }

                node = parent;
            }
        }
    }

    fn traverse_siblings(&self, current: A::Node, next: bool) -> Option<A::Node> {
        let adapter = self.adapter;
        let sibling = |node| {
            if next {
                adapter.next_sibling(node)
            } else {
                adapter.previous_sibling(node)
            }
        };
        let child = |node| {
            if next {
                adapter.first_child(node)
            } else {
                adapter.last_child(node)
            }
        };

        let mut node = current;

        if node == self.root {
            return None;
        }

        loop {
            let mut candidate = sibling(node);

            while let Some(current) = candidate {
                node = current;

                let verdict = self.verdict(node);

                if verdict == Verdict::Accept {
                    return Some(node);
                }

                candidate = child(node);

                if verdict == Verdict::Reject || candidate.is_none() {
                    candidate = sibling(node);
                }
            }

            node = adapter.parent(node)?;

            if node == self.root || self.verdict(node) == Verdict::Accept {
                return None;
            }
        }
    }

    fn parent_node(&self, current: A::Node) -> Option<A::Node> {
        let mut node = current;

        while node != self.root {
            node = self.adapter.parent(node)?;

            if node == self.root {
                return None;
            }

            if self.verdict(node) == Verdict::Accept {
                return Some(node);
            }
        }

        None
    }

    fn next_node(&self, current: A::Node) -> Option<A::Node> {
        let adapter = self.adapter;
        let mut node = current;
        let mut verdict = if current == self.root {
            Verdict::Accept
        } else {
            self.verdict(current)
        };

        loop {
            while verdict != Verdict::Reject {
                let Some(child) = adapter.first_child(node) else {
                    break;
                };

                node = child;
                verdict = self.verdict(node);

                if verdict == Verdict::Accept {
                    return Some(node);
                }
            }

            let mut ancestor = node;

            loop {
                if ancestor == self.root {
                    return None;
                }

                if let Some(sibling) = adapter.next_sibling(ancestor) {
                    node = sibling;
                    break;
                }

                ancestor = adapter.parent(ancestor)?;
            }

            verdict = self.verdict(node);

            if verdict == Verdict::Accept {
                return Some(node);
            }
        }
    }

    fn previous_node(&self, current: A::Node) -> Option<A::Node> {
        let adapter = self.adapter;
        let mut node = current;

        while node != self.root {
            let mut sibling = adapter.previous_sibling(node);

            while let Some(current) = sibling {
                node = current;

                let mut verdict = self.verdict(node);

                while verdict != Verdict::Reject {
                    let Some(child) = adapter.last_child(node) else {
                        break;
                    };

                    node = child;
                    verdict = self.verdict(node);
                }

                if verdict == Verdict::Accept {
                    return Some(node);
                }

                sibling = adapter.previous_sibling(node);
            }

            let parent = adapter.parent(node)?;

            if parent == self.root {
                return None;
            }

            node = parent;

            if self.verdict(node) == Verdict::Accept {
                return Some(node);
            }
        }

        None
    }
}
