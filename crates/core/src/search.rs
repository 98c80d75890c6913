//! Jump to items by the first letter of their label.
//!
//! Labels may carry a mnemonic marker: `&` marks the following character and
//! `&&` stands for a literal ampersand. An item with a mnemonic answers to its
//! mnemonic character, any other item answers to the first character of its
//! label.
use crate::walker::{self, Directive, Filter, Traversal, Verdict};
use crate::{Adapter, Role};

use std::borrow::Cow;

/// A label with its mnemonic marker resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mnemonic<'a> {
    /// The label without markers.
    pub display_text: Cow<'a, str>,
    /// The marked character, if any.
    pub character: Option<char>,
    /// The byte index of the marked character in `display_text`.
    pub underline_index: Option<usize>,
}

/// Parses the mnemonic marker of a label.
///
/// - `"&File"` → `("File", Some('F'), Some(0))`
/// - `"E&xit"` → `("Exit", Some('x'), Some(1))`
/// - `"Save && Close"` → `("Save & Close", None, None)`
pub fn parse_mnemonic(label: &str) -> Mnemonic<'_> {
    const MARKER: char = '&';

    let mut display = String::with_capacity(label.len());
    let mut character = None;
    let mut underline_index = None;
    let mut chars = label.chars().peekable();

    while let Some(c) = chars.next() {
        if c != MARKER {
            display.push(c);
            continue;
        }

        if chars.peek() == Some(&MARKER) {
            display.push(MARKER);
            let _ = chars.next();
        } else if let Some(next) = chars.next() {
            // Only the first marker counts
            if character.is_none() {
                underline_index = Some(display.len());
                character = Some(next);
            }
            display.push(next);
        }
    }

    Mnemonic {
        display_text: if display == label {
            Cow::Borrowed(label)
        } else {
            Cow::Owned(display)
        },
        character,
        underline_index,
    }
}

/// Returns whether `label` answers to the typed `character`.
pub fn matches(label: &str, character: char) -> bool {
    let mnemonic = parse_mnemonic(label);

    let key = mnemonic
        .character
        .or_else(|| mnemonic.display_text.trim_start().chars().next());

    key.is_some_and(|key| key.to_lowercase().eq(character.to_lowercase()))
}

/// Returns the label of an item.
///
/// A branch without text of its own is labeled by its opener.
pub fn label<A: Adapter>(adapter: &A, node: A::Node) -> Option<&str> {
    if let Some(text) = adapter.text(node) {
        return Some(text);
    }

    if adapter.role(node) == Role::Branch {
        return adapter.opener(node).and_then(|opener| adapter.text(opener));
    }

    None
}

/// A filter accepting the items of a base filter whose label answers to a
/// typed character.
pub struct TextMatch<'a, A: Adapter> {
    base: Option<&'a Filter<'a, A>>,
    character: char,
    depth_first: bool,
}

impl<'a, A: Adapter> TextMatch<'a, A> {
    /// Creates a [`TextMatch`] for the given character.
    ///
    /// Non-matching items keep their subtree searchable in `depth_first`
    /// searches and prune it otherwise.
    pub fn new(character: char, depth_first: bool) -> Self {
        Self {
            base: None,
            character,
            depth_first,
        }
    }

    /// Sets the filter deciding which nodes are items at all.
    #[must_use]
    pub fn base(mut self, base: Option<&'a Filter<'a, A>>) -> Self {
        self.base = base;
        self
    }

    /// Judges a node.
    pub fn verdict(&self, adapter: &A, node: A::Node) -> Verdict {
        let verdict = match self.base {
            Some(base) => base(adapter, node),
            None => walker::default_filter(adapter, node),
        };

        if verdict != Verdict::Accept {
            return verdict;
        }

        if label(adapter, node).is_some_and(|label| matches(label, self.character)) {
            Verdict::Accept
        } else if self.depth_first {
            Verdict::Skip
        } else {
            Verdict::Reject
        }
    }
}

/// Finds the next item after `start` whose label answers to `character`.
///
/// The search never wraps around.
pub fn find<A: Adapter>(
    adapter: &A,
    traversal: &Traversal<'_, A>,
    start: Option<A::Node>,
    character: char,
) -> Result<Option<A::Node>, walker::Error> {
    let text = TextMatch::new(character, traversal.depth_first).base(traversal.filter);
    let filter = |adapter: &A, node: A::Node| text.verdict(adapter, node);

    let search = Traversal {
        root: traversal.root,
        cycle: false,
        depth_first: traversal.depth_first,
        shape: traversal.shape,
        filter: Some(&filter),
    };

    walker::get_target(adapter, &search, start, Directive::Next)
}
