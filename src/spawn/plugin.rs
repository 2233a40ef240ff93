//! Spawn plugin wiring (glue).
//! - Prefab table + single-instance registry
//! - Spawn / call requests from buttons and taps
//! - Arbitration whenever the set of live props changes

use bevy::prelude::*;

use crate::stack::CatPlaceSet;
use super::components::{PropKind, PropPrefabs};
use super::registry::SpawnRegistry;
use crate::input::input_mapping_system;
use super::systems::{
    handle_spawn_requests, log_prop_events, run_follow_arbitration, select_prop_kind,
    spawn_buttons_system, tap_to_place,
};

/// Ask for a prop of `kind`. `screen_pos: None` casts from the screen centre.
#[derive(Event, Clone, Copy, Debug)]
pub struct SpawnRequest {
    pub kind: PropKind,
    pub screen_pos: Option<Vec2>,
}

/// Summon the cat to the camera.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct CallCat;

#[derive(Event, Clone, Copy, Debug)]
pub struct PropSpawned {
    pub kind: PropKind,
    pub entity: Entity,
}

#[derive(Event, Clone, Copy, Debug)]
pub struct PropDestroyed {
    pub kind: PropKind,
    pub entity: Entity,
}

/// What a tap on a plane places.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedPropKind(pub PropKind);

impl Default for SelectedPropKind {
    fn default() -> Self {
        Self(PropKind::Cat)
    }
}

pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnRegistry>()
            .init_resource::<PropPrefabs>()
            .init_resource::<SelectedPropKind>()
            .add_event::<SpawnRequest>()
            .add_event::<CallCat>()
            .add_event::<PropSpawned>()
            .add_event::<PropDestroyed>()
            .add_systems(
                Update,
                (select_prop_kind, spawn_buttons_system)
                    .after(input_mapping_system)
                    .in_set(CatPlaceSet::Input),
            )
            // taps run after drag pick-up so a grabbing press never places
            .add_systems(
                Update,
                (tap_to_place, handle_spawn_requests)
                    .chain()
                    .in_set(CatPlaceSet::Spawn),
            )
            .add_systems(Update, run_follow_arbitration.in_set(CatPlaceSet::Arbitrate))
            .add_systems(Update, log_prop_events.after(CatPlaceSet::Physics));
    }
}
