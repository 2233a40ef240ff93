// src/toy/systems.rs

use bevy::prelude::*;

use crate::config::BehaviourConfig;
use crate::input::{PointerEvent, PointerPhase};
use crate::planes::{ground_height_below, raycast_planes, DetectedPlane, PlaneSample};
use crate::setup::MainCamera;

use super::components::{DragState, Draggable, PhysicsBody, Release};
use super::drag::ray_sphere;
use super::plugin::ToyReleased;

/// Below this height a falling body stops even without a plane under it.
const FALL_LIMIT: f32 = -10.0;

fn collect_planes(planes: &Query<(Entity, &GlobalTransform, &DetectedPlane)>) -> Vec<PlaneSample> {
    planes
        .iter()
        .map(|(e, tf, plane)| PlaneSample::new(e, tf, plane))
        .collect()
}

/// Pointer down over a draggable: pick the nearest one and start dragging it.
pub fn begin_drag(
    mut commands: Commands,
    mut pointer: EventReader<PointerEvent>,
    config: Res<BehaviourConfig>,
    mut toys: Query<(
        Entity,
        &mut Draggable,
        &mut PhysicsBody,
        &mut Transform,
        &GlobalTransform,
        Option<&ChildOf>,
    )>,
) {
    let radius = config.drag.grab_radius;

    for ev in pointer.read().filter(|e| e.phase == PointerPhase::Pressed) {
        let Some(ray) = ev.ray else {
            continue;
        };

        let picked = toys
            .iter()
            .filter_map(|(e, _, _, _, gt, _)| {
                ray_sphere(ray.origin, *ray.direction, gt.translation(), radius).map(|(t, p)| (e, t, p))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let Some((entity, _, hit_point)) = picked else {
            continue;
        };
        let Ok((_, mut drag, mut body, mut tf, gt, parent)) = toys.get_mut(entity) else {
            continue;
        };

        if parent.is_some() {
            // Take it out of the carrier's hands, keeping its world pose.
            *tf = gt.compute_transform();
            commands.entity(entity).remove::<ChildOf>();
            info!("Toy: {entity:?} taken from its carrier");
        }
        body.make_kinematic();
        drag.begin(gt.translation() - hit_point, ev.position, ev.time);
        debug!("Toy: drag started on {entity:?}");
    }
}

/// Pointer move: re-project onto the best ground reference.
pub fn continue_drag(
    mut pointer: EventReader<PointerEvent>,
    planes: Query<(Entity, &GlobalTransform, &DetectedPlane)>,
    mut toys: Query<(&mut Draggable, &mut Transform)>,
) {
    let moves: Vec<PointerEvent> = pointer
        .read()
        .filter(|e| e.phase == PointerPhase::Moved)
        .copied()
        .collect();
    if moves.is_empty() || !toys.iter().any(|(d, _)| d.is_dragging()) {
        return;
    }
    let samples = collect_planes(&planes);

    for ev in moves {
        let Some(ray) = ev.ray else {
            continue;
        };
        let hits = raycast_planes(ray.origin, *ray.direction, &samples);

        for (mut drag, mut tf) in &mut toys {
            let current_y = tf.translation.y;
            if let Some(pos) = drag.drag_to(
                hits.first(),
                ev.position,
                ev.time,
                ray.origin,
                *ray.direction,
                current_y,
            ) {
                tf.translation = pos;
            }
        }
    }
}

/// Pointer up: throw on a fast flick, otherwise drop onto the ground.
pub fn end_drag(
    mut pointer: EventReader<PointerEvent>,
    cameras: Query<&GlobalTransform, With<MainCamera>>,
    config: Res<BehaviourConfig>,
    mut toys: Query<(Entity, &mut Draggable, &mut PhysicsBody, &mut Transform)>,
    mut released: EventWriter<ToyReleased>,
) {
    let Some(release) = pointer
        .read()
        .filter(|e| e.phase == PointerPhase::Released)
        .last()
        .copied()
    else {
        return;
    };

    let (forward, right) = match cameras.single() {
        Ok(cam) => (cam.forward().as_vec3(), cam.right().as_vec3()),
        Err(_) => {
            warn!("Toy: no camera for throw direction; using world axes");
            (Vec3::NEG_Z, Vec3::X)
        }
    };

    for (entity, mut drag, mut body, mut tf) in &mut toys {
        if !drag.is_dragging() {
            continue;
        }
        let thrown = match drag.release(
            &mut tf.translation,
            release.position,
            release.time,
            forward,
            right,
            &config.drag,
        ) {
            Release::Thrown(velocity) => {
                body.launch(velocity);
                info!("Toy: {entity:?} thrown with velocity {velocity}");
                true
            }
            Release::Dropped => {
                body.make_kinematic();
                info!("Toy: {entity:?} dropped at {}", tf.translation);
                false
            }
        };
        released.write(ToyReleased {
            toy: entity,
            position: tf.translation,
            thrown,
        });
    }
}

/// Integrate launched bodies until they come to rest on a plane.
pub fn integrate_bodies(
    time: Res<Time>,
    planes: Query<(Entity, &GlobalTransform, &DetectedPlane)>,
    mut bodies: Query<(Entity, &mut Transform, &mut PhysicsBody, &mut Draggable)>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let samples = collect_planes(&planes);

    for (entity, mut tf, mut body, mut drag) in &mut bodies {
        if !body.simulated {
            continue;
        }
        let fallback = drag.last_plane_y.unwrap_or(FALL_LIMIT);
        let half = drag.half_height;
        let landed = body.step(&mut tf.translation, dt, half, |foot| {
            ground_height_below(foot, &samples).or(Some(fallback))
        });
        if let Some(ground) = landed {
            drag.last_plane_y = Some(ground);
            drag.state = DragState::Idle;
            info!("Toy: {entity:?} landed at height {ground}");
        }
    }
}
