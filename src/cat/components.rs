use bevy::prelude::*;

/// Marks the agent entity.
#[derive(Component)]
pub struct Cat;

/// Which behaviour currently owns the agent. Written only by arbitration.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BehaviourMode {
    #[default]
    Wander,
    FollowFood,
    FollowToy,
    Idle,
}

/// Animation parameters driven by the behaviours.
#[derive(Component, Default, Debug)]
pub struct Animator {
    is_walking: bool,
}

impl Animator {
    pub fn is_walking(&self) -> bool {
        self.is_walking
    }

    /// Returns true only when the flag actually changed.
    pub fn set_walking(&mut self, walking: bool) -> bool {
        if self.is_walking == walking {
            return false;
        }
        self.is_walking = walking;
        true
    }
}
