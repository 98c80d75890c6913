//! Keep open submenus inside of their container.
//!
//! A submenu opens towards the trailing edge of the reading direction. When
//! it does not fit, it is mirrored towards the leading edge; when it reaches
//! past the bottom of the container, it is raised. Raising may push it past
//! the top edge, in which case both markers are kept and the placement is
//! reported as colliding on both edges.
use crate::{LayoutDirection, Rectangle, State, Vector};

/// The outcome of collision detection for a submenu.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// The submenu opens towards the leading edge.
    pub mirrored: bool,
    /// The upward shift applied to keep the submenu above the bottom edge.
    pub raise: f32,
    /// The submenu reached past the bottom edge of the container.
    pub south: bool,
    /// The raised submenu reaches past the top edge of the container.
    pub north: bool,
}

impl Placement {
    /// Returns whether correcting the south edge produced a north collision.
    pub fn collides_both_edges(self) -> bool {
        self.south && self.north
    }

    /// Returns the offset to apply to the submenu.
    pub fn offset(self) -> Vector {
        Vector::new(0.0, -self.raise)
    }

    /// Returns the state markers describing the placement.
    pub fn state(self) -> State {
        let mut state = State::empty();

        state.set(State::MIRRORED, self.mirrored);
        state.set(State::RAISED, self.south);
        state.set(State::NORTH, self.north);

        state
    }
}

/// Computes the placement of a submenu.
///
/// - `submenu` is the laid out bounds of the submenu, without any previous
///   correction.
/// - `anchor` is the bounds of the item the submenu opens from.
/// - `inherited` tells whether an open ancestor was already mirrored; a
///   nested submenu keeps opening towards the leading edge unless there is
///   no room for it there.
pub fn place(
    submenu: Rectangle,
    anchor: Option<Rectangle>,
    container: Rectangle,
    direction: LayoutDirection,
    inherited: bool,
) -> Placement {
    let (leading, trailing) = match anchor {
        Some(anchor) => direction.inline_space(anchor, container),
        None => direction.inline_space(submenu, container),
    };

    let mirrored = if inherited {
        leading >= submenu.width || leading > trailing
    } else {
        direction.overflows_trailing(submenu, container) && leading > trailing
    };

    let overflow = submenu.bottom() - container.bottom();
    let south = overflow > 0.0;
    let raise = overflow.max(0.0);
    let north = south && submenu.y - raise < container.y;

    Placement {
        mirrored,
        raise,
        south,
        north,
    }
}
