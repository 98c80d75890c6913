use super::Navigator;

use crate::core::collision::{self, Placement};
use crate::core::{Adapter, Role, State, Vector};
use crate::variant::Orientation;

impl<A: Adapter> Navigator<A> {
    /// Keeps an open submenu inside of its container.
    ///
    /// Previous corrections are dropped before measuring. The submenu is
    /// mirrored towards the leading edge when it does not fit, and raised
    /// when it reaches past the bottom edge. A submenu opened from a mirrored
    /// one keeps opening towards the leading edge while there is room.
    ///
    /// Returns the placement applied, or `None` when the submenu is closed or
    /// cannot be measured.
    pub fn detect_collision(&mut self, submenu: A::Node) -> Option<Placement> {
        let submenu = self.resolve(submenu)?;

        if self.adapter.role(submenu) != Role::Submenu
            || !self.adapter.state(submenu).contains(State::EXPANDED)
        {
            return None;
        }

        let branch = self.branch_of(submenu)?;
        let root = self.root_of(branch)?;
        let behavior = self.behavior(root)?;

        self.adapter.set_state(submenu, State::COLLISION, false);
        self.adapter.set_offset(submenu, Vector::ZERO);

        let bounds = self.adapter.bounds(submenu)?;
        let container = self.adapter.container_bounds(submenu)?;

        // Drop-downs of a horizontal level open below their opener
        let anchor = match behavior.orientation(self.level_of(root, branch)) {
            Orientation::Horizontal => None,
            Orientation::Vertical => self.adapter.bounds(self.focus_target(branch)),
        };

        let scope = self.scope_of(root, branch);
        let inherited = scope != root && self.adapter.state(scope).contains(State::MIRRORED);

        let placement = collision::place(
            bounds,
            anchor,
            container,
            self.config.direction,
            inherited,
        );

        self.adapter.set_state(submenu, placement.state(), true);
        self.adapter.set_offset(submenu, placement.offset());

        if placement.collides_both_edges() {
            log::warn!(
                "{submenu:?} does not fit its container vertically, \
                it collides with both the north and the south edges"
            );
        }

        Some(placement)
    }

    /// Returns the open submenus along the path to `submenu`, outermost
    /// first, followed by the open submenus inside of it.
    pub(super) fn submenu_path(&self, submenu: A::Node) -> Vec<A::Node> {
        let mut path = Vec::new();
        let mut current = Some(submenu);

        while let Some(node) = current {
            if self.adapter.role(node) == Role::Root {
                break;
            }

            if self.adapter.role(node) == Role::Submenu
                && self.adapter.state(node).contains(State::EXPANDED)
            {
                path.push(node);
            }

            current = self.adapter.parent(node);
        }

        path.reverse();

        path.extend(
            self.open_branches(submenu)
                .into_iter()
                .filter_map(|branch| self.adapter.submenu(branch)),
        );

        path
    }
}
