//! Handle events of a navigable tree.
use crate::keyboard::{Key, Modifiers};

/// A user interface event targeting a node.
///
/// A menu dispatches every event through a single entry point, which
/// forwards it to the handler of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<Node> {
    /// A node received input focus.
    Focus(Node),

    /// A node lost input focus.
    Blur(Node),

    /// A node was clicked.
    Click(Node),

    /// A key was pressed while a node had focus.
    KeyDown {
        /// The focused node.
        target: Node,
        /// The pressed key.
        key: Key,
        /// The modifiers held during the press.
        modifiers: Modifiers,
    },

    /// The pointer entered a node.
    MouseOver(Node),
}

/// The status of an [`Event`] after being processed.
///
/// A captured event must not trigger the default behavior of the host,
/// like following a link or scrolling the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The [`Event`] was **NOT** handled.
    Ignored,

    /// The [`Event`] was handled and its default behavior must be prevented.
    Captured,
}

impl Status {
    /// Merges two [`Status`] into one.
    ///
    /// `Captured` takes precedence over `Ignored`:
    ///
    /// ```
    /// use icy_nav_core::event::Status;
    ///
    /// assert_eq!(Status::Ignored.merge(Status::Ignored), Status::Ignored);
    /// assert_eq!(Status::Ignored.merge(Status::Captured), Status::Captured);
    /// assert_eq!(Status::Captured.merge(Status::Ignored), Status::Captured);
    /// assert_eq!(Status::Captured.merge(Status::Captured), Status::Captured);
    /// ```
    pub fn merge(self, b: Self) -> Self {
        match self {
            Status::Ignored => b,
            Status::Captured => Status::Captured,
        }
    }
}

impl From<bool> for Status {
    fn from(handled: bool) -> Self {
        if handled {
            Status::Captured
        } else {
            Status::Ignored
        }
    }
}
