// src/spawn/systems.rs

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::actions::{ActionState, PlayerAction};
use crate::cat::arbitration::{arbitrate, call_to};
use crate::cat::{
    Animator, BehaviourMode, Cat, FollowBehaviour, FollowFinished, FollowFood, FollowToy, Wander,
};
use crate::config::BehaviourConfig;
use crate::input::{pointer_ray, PointerEvent, PointerPhase};
use crate::planes::{raycast_planes, select_hit, DetectedPlane, PlaneHit, PlaneSample};
use crate::setup::MainCamera;
use crate::toy::{Draggable, PhysicsBody, ToyReleased};

use super::components::{Prop, PropKind, PropPrefabs, PropVisual, SpawnError};
use super::plugin::{CallCat, PropDestroyed, PropSpawned, SelectedPropKind, SpawnRequest};
use super::registry::SpawnRegistry;

/// Remove the live counterpart that may not coexist with `kind`.
pub fn evict_conflicting(
    commands: &mut Commands,
    registry: &mut SpawnRegistry,
    kind: PropKind,
) -> Option<(PropKind, Entity)> {
    let (other, entity) = registry.conflicting(kind)?;
    registry.take(other);
    commands.entity(entity).despawn();
    Some((other, entity))
}

/// Instantiate `kind` on the chosen plane hit, resting on its surface.
pub fn spawn_prop_at(
    commands: &mut Commands,
    kind: PropKind,
    visual: &PropVisual,
    hit: &PlaneHit,
    config: &BehaviourConfig,
) -> Entity {
    let position = hit.position + hit.up() * visual.half_height;
    let transform = Transform::from_translation(position).with_rotation(hit.rotation);

    let mut entity = commands.spawn((
        Name::new(format!("{kind:?}")),
        Prop(kind),
        Mesh3d(visual.mesh.clone()),
        MeshMaterial3d(visual.material.clone()),
        transform,
        GlobalTransform::from(transform),
    ));

    match kind {
        PropKind::Cat => {
            entity.insert((
                Cat,
                BehaviourMode::default(),
                Animator::default(),
                FollowFood::new(config.follow, config.consume),
                FollowToy::new(config.follow, config.toy),
                Wander::new(position, config.wander),
            ));
        }
        PropKind::Toy => {
            let half_height = if visual.half_height > 0.0 {
                visual.half_height
            } else {
                config.drag.default_half_height
            };
            entity.insert((
                Draggable::new(half_height, Some(hit.position.y)),
                PhysicsBody::default(),
            ));
        }
        PropKind::Food => {}
    }
    entity.id()
}

/// Spawn one `kind` if its slot is free, a prefab exists and the ray hits a plane.
pub fn spawn_prop(
    commands: &mut Commands,
    registry: &mut SpawnRegistry,
    prefabs: &PropPrefabs,
    config: &BehaviourConfig,
    kind: PropKind,
    ray: Option<Ray3d>,
    planes: &[PlaneSample],
) -> Result<Entity, SpawnError> {
    registry.check_vacant(kind)?;
    let visual = prefabs.get(kind).ok_or(SpawnError::MissingPrefab(kind))?;
    let ray = ray.ok_or(SpawnError::NoViewport)?;

    let hits = raycast_planes(ray.origin, *ray.direction, planes);
    let hit = select_hit(&hits, config.spawn.hit_selection).ok_or(SpawnError::NoPlaneHit)?;

    let entity = spawn_prop_at(commands, kind, visual, &hit, config);
    registry.set(kind, entity);
    Ok(entity)
}

pub fn handle_spawn_requests(
    mut commands: Commands,
    mut requests: EventReader<SpawnRequest>,
    mut registry: ResMut<SpawnRegistry>,
    prefabs: Res<PropPrefabs>,
    config: Res<BehaviourConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    planes: Query<(Entity, &GlobalTransform, &DetectedPlane)>,
    mut spawned: EventWriter<PropSpawned>,
    mut destroyed: EventWriter<PropDestroyed>,
) {
    let samples: Vec<PlaneSample> = planes
        .iter()
        .map(|(e, tf, plane)| PlaneSample::new(e, tf, plane))
        .collect();

    for req in requests.read() {
        if let Some((kind, entity)) = evict_conflicting(&mut commands, &mut registry, req.kind) {
            info!("Spawn: removed {kind:?} {entity:?} to make room for {:?}", req.kind);
            destroyed.write(PropDestroyed { kind, entity });
        }

        let ray = pointer_ray(&windows, &cameras, req.screen_pos);
        match spawn_prop(&mut commands, &mut registry, &prefabs, &config, req.kind, ray, &samples) {
            Ok(entity) => {
                info!("Spawn: {:?} placed as {entity:?}", req.kind);
                spawned.write(PropSpawned { kind: req.kind, entity });
            }
            Err(SpawnError::AlreadySpawned(kind)) => {
                info!("Spawn: {kind:?} already exists; re-targeting");
            }
            Err(err) => warn!("Spawn: {err}"),
        }
    }
}

/// Keys 1/2/3 choose what a tap places.
pub fn select_prop_kind(action_state: Res<ActionState>, mut selected: ResMut<SelectedPropKind>) {
    let choice = [
        (PlayerAction::SelectCat, PropKind::Cat),
        (PlayerAction::SelectFood, PropKind::Food),
        (PlayerAction::SelectToy, PropKind::Toy),
    ]
    .into_iter()
    .find(|(action, _)| action_state.just_pressed(*action));

    if let Some((_, kind)) = choice {
        if selected.0 != kind {
            selected.0 = kind;
            info!("Spawn: tap now places {kind:?}");
        }
    }
}

/// Button-style spawns cast from the screen centre.
pub fn spawn_buttons_system(
    action_state: Res<ActionState>,
    mut requests: EventWriter<SpawnRequest>,
    mut calls: EventWriter<CallCat>,
) {
    let buttons = [
        (PlayerAction::SpawnCat, PropKind::Cat),
        (PlayerAction::SpawnFood, PropKind::Food),
        (PlayerAction::SpawnToy, PropKind::Toy),
    ];
    for (action, kind) in buttons {
        if action_state.just_pressed(action) {
            requests.write(SpawnRequest { kind, screen_pos: None });
        }
    }
    if action_state.just_pressed(PlayerAction::CallCat) {
        calls.write(CallCat);
    }
}

/// A press that did not grab a toy places the selected kind under the pointer.
pub fn tap_to_place(
    config: Res<BehaviourConfig>,
    selected: Res<SelectedPropKind>,
    mut pointer: EventReader<PointerEvent>,
    toys: Query<&Draggable>,
    mut last_placed: Local<Option<f32>>,
    mut requests: EventWriter<SpawnRequest>,
) {
    let grabbing = toys.iter().any(Draggable::is_dragging);
    let cooldown = config.spawn.placement_cooldown;

    for ev in pointer.read().filter(|e| e.phase == PointerPhase::Pressed) {
        if grabbing {
            continue;
        }
        if last_placed.is_some_and(|t| ev.time - t < cooldown) {
            debug!("Spawn: tap ignored during cooldown");
            continue;
        }
        *last_placed = Some(ev.time);
        requests.write(SpawnRequest {
            kind: selected.0,
            screen_pos: Some(ev.position),
        });
    }
}

/// Re-run arbitration whenever props come or go, a follow finishes, or a
/// spawn request hits an existing prop. Calls are applied last.
pub fn run_follow_arbitration(
    registry: Res<SpawnRegistry>,
    mut spawned: EventReader<PropSpawned>,
    mut destroyed: EventReader<PropDestroyed>,
    mut requests: EventReader<SpawnRequest>,
    mut finished: EventReader<FollowFinished>,
    mut released: EventReader<ToyReleased>,
    mut calls: EventReader<CallCat>,
    cameras: Query<Entity, With<MainCamera>>,
    mut cats: Query<
        (
            Entity,
            &Transform,
            &mut FollowFood,
            &mut FollowToy,
            &mut Wander,
            &mut BehaviourMode,
        ),
        With<Cat>,
    >,
) {
    let triggers = spawned.read().count()
        + destroyed.read().count()
        + requests.read().count()
        + finished.read().count();
    let released_toys: Vec<Entity> = released.read().map(|ev| ev.toy).collect();
    let called = calls.read().count() > 0;

    if triggers > 0 {
        for (cat, tf, mut food, mut toy, mut wander, mut mode) in &mut cats {
            let next = arbitrate(
                registry.food,
                registry.toy,
                &mut food,
                &mut toy,
                &mut wander,
                tf.translation,
            );
            if *mode != next {
                info!("Arbitration: {cat:?} {:?} -> {next:?}", *mode);
                *mode = next;
            }
        }
    }

    for toy_entity in released_toys {
        for (cat, _, _, mut toy, _, _) in &mut cats {
            if toy.is_enabled() && toy.target() == Some(toy_entity) {
                toy.set_target(toy_entity);
                debug!("Arbitration: {cat:?} chases released toy {toy_entity:?}");
            }
        }
    }

    if !called {
        return;
    }
    let Ok(camera) = cameras.single() else {
        warn!("Call: no camera to call the cat to");
        return;
    };
    if cats.is_empty() {
        warn!("Call: no cat spawned");
        return;
    }
    for (cat, _, mut food, mut toy, mut wander, mut mode) in &mut cats {
        *mode = call_to(camera, &mut food, &mut toy, &mut wander);
        info!("Call: {cat:?} called to the camera");
    }
}

/// Debug trail of every spawn and destroy.
pub fn log_prop_events(
    mut spawned: EventReader<PropSpawned>,
    mut destroyed: EventReader<PropDestroyed>,
) {
    for ev in spawned.read() {
        debug!("Prop: +{:?} {:?}", ev.kind, ev.entity);
    }
    for ev in destroyed.read() {
        debug!("Prop: -{:?} {:?}", ev.kind, ev.entity);
    }
}
