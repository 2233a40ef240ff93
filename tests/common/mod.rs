// Shared headless app and helpers for the flow tests.
#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::transform::TransformPlugin;

use catplace::cat::arbitration::enabled_followers;
use catplace::cat::{AnimTrigger, AnimationTrigger, BehaviourMode, FollowFood, FollowToy, FoodConsumed};
use catplace::config::{BehaviourConfig, ConfigPath};
use catplace::input::{PointerEvent, PointerPhase};
use catplace::planes::{DetectedPlane, PlaneHit};
use catplace::spawn::systems::spawn_prop_at;
use catplace::spawn::{PropDestroyed, PropKind, PropSpawned, PropVisual, SpawnRegistry, SpawnRequest};
use catplace::toy::ToyReleased;
use catplace::CatPlaceCorePlugin;

pub const FRAME: Duration = Duration::from_millis(20);

#[derive(Resource, Default)]
pub struct Seen {
    pub consumed: Vec<Entity>,
    pub destroyed: Vec<Entity>,
    pub sits: usize,
    pub requests: Vec<PropKind>,
    pub released: Vec<ToyReleased>,
}

fn record(
    mut seen: ResMut<Seen>,
    mut consumed: EventReader<FoodConsumed>,
    mut destroyed: EventReader<PropDestroyed>,
    mut triggers: EventReader<AnimationTrigger>,
    mut requests: EventReader<SpawnRequest>,
    mut released: EventReader<ToyReleased>,
) {
    seen.consumed.extend(consumed.read().map(|ev| ev.food));
    seen.destroyed.extend(destroyed.read().map(|ev| ev.entity));
    seen.sits += triggers
        .read()
        .filter(|ev| ev.trigger == AnimTrigger::SitOnce)
        .count();
    seen.requests.extend(requests.read().map(|ev| ev.kind));
    seen.released.extend(released.read().copied());
}

pub fn app() -> App {
    let mut app = App::new();
    app.insert_resource(ConfigPath("tests/no-such-config.ron".into()))
        .insert_resource(Time::<()>::default())
        .init_resource::<Seen>()
        .add_plugins((TransformPlugin, CatPlaceCorePlugin))
        .add_systems(Last, record);
    app.update();
    app
}

pub fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.world_mut().resource_mut::<Time>().advance_by(FRAME);
        app.update();
    }
}

/// A 10 m square floor at y = 0.
pub fn floor(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            DetectedPlane { half_extents: Vec2::splat(5.0) },
            Transform::IDENTITY,
        ))
        .id()
}

/// Spawn a prop on the floor at `at` and claim its registry slot, without
/// telling anyone.
pub fn place_quietly(app: &mut App, kind: PropKind, at: Vec3) -> Entity {
    let world = app.world_mut();
    let config = world.resource::<BehaviourConfig>().clone();
    let visual = PropVisual {
        mesh: Handle::default(),
        material: Handle::default(),
        half_height: 0.0,
    };
    let hit = PlaneHit {
        plane: Entity::PLACEHOLDER,
        position: at,
        rotation: Quat::IDENTITY,
        distance: 1.0,
    };
    let entity = spawn_prop_at(&mut world.commands(), kind, &visual, &hit, &config);
    world.flush();
    world.resource_mut::<SpawnRegistry>().set(kind, entity);
    entity
}

/// Put a prop straight onto the floor at `at`, as a successful placement would.
pub fn place(app: &mut App, kind: PropKind, at: Vec3) -> Entity {
    let entity = place_quietly(app, kind, at);
    app.world_mut().send_event(PropSpawned { kind, entity });
    entity
}

pub fn remove(app: &mut App, kind: PropKind) {
    let world = app.world_mut();
    let Some(entity) = world.resource_mut::<SpawnRegistry>().take(kind) else {
        return;
    };
    world.despawn(entity);
    world.send_event(PropDestroyed { kind, entity });
}

/// Queue a pointer sample at screen `position`, casting straight down onto `over`.
pub fn pointer(app: &mut App, phase: PointerPhase, position: Vec2, over: Vec3) {
    let time = app.world().resource::<Time>().elapsed_secs();
    let ray = Ray3d::new(over + Vec3::Y * 2.0, Dir3::NEG_Y);
    app.world_mut().send_event(PointerEvent {
        phase,
        position,
        time,
        ray: Some(ray),
    });
}

pub fn mode(app: &App, cat: Entity) -> BehaviourMode {
    *app.world().get::<BehaviourMode>(cat).expect("cat has a mode")
}

pub fn followers(app: &App, cat: Entity) -> usize {
    let world = app.world();
    let food = world.get::<FollowFood>(cat).expect("food follower");
    let toy = world.get::<FollowToy>(cat).expect("toy follower");
    enabled_followers(food, toy)
}

pub fn world_position(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<GlobalTransform>(entity)
        .expect("entity has a transform")
        .translation()
}
