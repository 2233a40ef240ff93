use bevy::prelude::*;

use crate::stack::CatPlaceSet;
use super::systems::{begin_drag, continue_drag, end_drag, integrate_bodies};

/// Fired once per drag, when the pointer lets go.
#[derive(Event, Clone, Copy, Debug)]
pub struct ToyReleased {
    pub toy: Entity,
    pub position: Vec3,
    pub thrown: bool,
}

pub struct ToyPlugin;

impl Plugin for ToyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ToyReleased>()
            .add_systems(
                Update,
                (begin_drag, continue_drag, end_drag)
                    .chain()
                    .in_set(CatPlaceSet::Interaction),
            )
            .add_systems(Update, integrate_bodies.in_set(CatPlaceSet::Physics));
    }
}
