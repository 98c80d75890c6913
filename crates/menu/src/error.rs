use crate::core::keyboard::Key;
use crate::core::walker::{self, Directive};
use crate::core::NodeId;

/// An error produced by a misconfigured menu.
///
/// Stale references are not errors: operations on nodes that do not exist
/// anymore quietly do nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A traversal was misconfigured.
    #[error(transparent)]
    Traversal(#[from] walker::Error),

    /// The node is not the root of a registered menu.
    #[error("`{0}` is not the root of a registered menu")]
    UnregisteredRoot(NodeId),

    /// A menu was registered on a node that is not a [`Role::Root`].
    ///
    /// [`Role::Root`]: crate::core::Role::Root
    #[error("menus can only be registered on root nodes")]
    NotARoot,

    /// A menu root has no stable identity.
    #[error("menu roots need a stable identity")]
    MissingIdentity,

    /// A keymap binds a key to a directive its menu cannot follow.
    #[error("variant `{variant}` binds {key:?} to `{directive}`, which flat menus do not support")]
    InvalidKeymap {
        /// The name of the variant.
        variant: &'static str,
        /// The offending key.
        key: Key,
        /// The unsupported directive.
        directive: Directive,
    },
}
