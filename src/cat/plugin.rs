//! Cat plugin wiring.
//! - Behaviour events (consume / finished / animation triggers)
//! - Seeded wander RNG
//! - Follow + wander systems, after arbitration

use bevy::prelude::*;

use crate::stack::{CatPlaceSet, CatPlaceStartupSet};
use super::systems::{
    follow_food_system, follow_toy_system, log_animation_triggers, seed_wander_rng, wander_system,
};
use super::wander::WanderRng;

/// Fired once when the cat finishes eating a piece of food.
#[derive(Event, Clone, Copy, Debug)]
pub struct FoodConsumed {
    pub cat: Entity,
    pub food: Entity,
}

/// A follow behaviour let go of its target on its own (eaten, reached).
#[derive(Event, Clone, Copy, Debug)]
pub struct FollowFinished {
    pub cat: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimTrigger {
    SitOnce,
}

/// One-shot animation request for whatever drives the cat's rig.
#[derive(Event, Clone, Copy, Debug)]
pub struct AnimationTrigger {
    pub entity: Entity,
    pub trigger: AnimTrigger,
}

pub struct CatPlugin;

impl Plugin for CatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WanderRng>()
            .add_event::<FoodConsumed>()
            .add_event::<FollowFinished>()
            .add_event::<AnimationTrigger>()
            .add_systems(Startup, seed_wander_rng.in_set(CatPlaceStartupSet::Scene))
            .add_systems(
                Update,
                (follow_food_system, follow_toy_system, wander_system)
                    .chain()
                    .in_set(CatPlaceSet::Behaviour),
            )
            .add_systems(Update, log_animation_triggers.after(CatPlaceSet::Behaviour));
    }
}
