// src/stack.rs
use bevy::prelude::*;

use crate::actions::ActionState;
use crate::cat::CatPlugin;
use crate::config::{load_behaviour_config, BehaviourConfig, ConfigPath};
use crate::input::{camera_controller, input_mapping_system, pointer_input_system, PointerEvent};
use crate::setup::setup;
use crate::spawn::SpawnPlugin;
use crate::toy::ToyPlugin;

/// Per-frame ordering: read input, grab/drag props, spawn, decide who the
/// cat follows, move the cat, then integrate thrown bodies.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum CatPlaceSet {
    Input,
    Interaction,
    Spawn,
    Arbitrate,
    Behaviour,
    Physics,
}

/// Startup ordering so everything downstream sees the loaded config.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum CatPlaceStartupSet {
    Load,  // config file
    Scene, // camera, planes, prefabs, rng
}

/// Config, shared resources, ordering and the domain plugins. Runs
/// headless: no window, input devices or render assets required.
pub struct CatPlaceCorePlugin;

impl Plugin for CatPlaceCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BehaviourConfig>()
            .init_resource::<ConfigPath>()
            .init_resource::<ActionState>()
            .add_event::<PointerEvent>()
            .configure_sets(
                Startup,
                (CatPlaceStartupSet::Load, CatPlaceStartupSet::Scene).chain(),
            )
            .configure_sets(
                Update,
                (
                    CatPlaceSet::Input,
                    CatPlaceSet::Interaction,
                    CatPlaceSet::Spawn,
                    CatPlaceSet::Arbitrate,
                    CatPlaceSet::Behaviour,
                    CatPlaceSet::Physics,
                )
                    .chain(),
            )
            .add_systems(Startup, load_behaviour_config.in_set(CatPlaceStartupSet::Load))
            .add_plugins((SpawnPlugin, CatPlugin, ToyPlugin));
    }
}

/// Core plus the desktop glue: demo scene, keyboard/pointer mapping and the
/// orbit camera. Expects `DefaultPlugins` from the caller.
pub struct CatPlaceStackPlugin;

impl Plugin for CatPlaceStackPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CatPlaceCorePlugin)
            .add_systems(Startup, setup.in_set(CatPlaceStartupSet::Scene))
            .add_systems(
                Update,
                (input_mapping_system, pointer_input_system, camera_controller)
                    .chain()
                    .in_set(CatPlaceSet::Input),
            );
    }
}
