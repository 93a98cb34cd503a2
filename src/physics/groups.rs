//! Shared non-colliding group for the marble and the stoppers.
//!
//! Members of the shared group never touch each other but still collide with
//! every body outside it (walls, paddles, bumpers).
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedGroup(pub Group);

impl Default for SharedGroup {
    fn default() -> Self {
        Self(Group::GROUP_1)
    }
}

impl SharedGroup {
    /// Collision groups for a body that belongs to the shared group.
    pub fn member(&self) -> CollisionGroups {
        CollisionGroups::new(self.0, Group::ALL.difference(self.0))
    }
}

/// Rapier's pairwise test: each side's memberships must intersect the other's filters.
pub fn groups_interact(a: CollisionGroups, b: CollisionGroups) -> bool {
    a.memberships.intersects(b.filters) && b.memberships.intersects(a.filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_members_ignore_each_other() {
        let g = SharedGroup::default();
        assert!(!groups_interact(g.member(), g.member()));
    }

    #[test]
    fn shared_members_hit_default_bodies() {
        let g = SharedGroup::default();
        assert!(groups_interact(g.member(), CollisionGroups::default()));
    }
}
