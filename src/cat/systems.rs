// src/cat/systems.rs

use bevy::prelude::*;

use crate::spawn::{Prop, PropDestroyed, PropKind, SpawnRegistry};
use crate::toy::{DragState, Draggable, PhysicsBody};

use super::components::{Animator, BehaviourMode, Cat};
use super::follow::{steer_towards, ConsumeTick, FollowBehaviour, FollowFood, FollowToy};
use super::plugin::{AnimTrigger, AnimationTrigger, FollowFinished, FoodConsumed};
use super::wander::{Wander, WanderRng};

fn is_kind(props: &Query<&Prop>, entity: Entity, kind: PropKind) -> bool {
    props.get(entity).is_ok_and(|p| p.0 == kind)
}

/// Steer towards food, eat it on arrival, destroy it when done.
pub fn follow_food_system(
    mut commands: Commands,
    time: Res<Time>,
    mut registry: ResMut<SpawnRegistry>,
    mut cats: Query<
        (Entity, &mut Transform, &mut FollowFood, &mut Animator, &mut BehaviourMode),
        With<Cat>,
    >,
    targets: Query<&GlobalTransform>,
    props: Query<&Prop>,
    mut consumed: EventWriter<FoodConsumed>,
    mut destroyed: EventWriter<PropDestroyed>,
    mut finished: EventWriter<FollowFinished>,
) {
    let dt = time.delta_secs();

    for (cat, mut tf, mut follow, mut animator, mut mode) in &mut cats {
        if !follow.is_enabled() {
            continue;
        }

        match follow.tick_consume(time.delta()) {
            ConsumeTick::Eating => continue,
            ConsumeTick::Finished(eaten) => {
                if let Some(food) = eaten.filter(|&e| is_kind(&props, e, PropKind::Food)) {
                    commands.entity(food).despawn();
                    registry.forget(food);
                    destroyed.write(PropDestroyed { kind: PropKind::Food, entity: food });
                    consumed.write(FoodConsumed { cat, food });
                    info!("Cat: {cat:?} finished eating {food:?}");
                }
                finished.write(FollowFinished { cat });
                continue;
            }
            ConsumeTick::NotConsuming => {}
        }

        let Some(target) = follow.target() else {
            animator.set_walking(false);
            continue;
        };
        let Ok(target_tf) = targets.get(target) else {
            debug!("Cat: food target {target:?} is gone; idling");
            follow.clear_target();
            animator.set_walking(false);
            *mode = BehaviourMode::Idle;
            continue;
        };

        let settings = follow.follower().settings;
        let step = steer_towards(
            &mut tf,
            target_tf.translation(),
            &mut follow.follower_mut().state,
            &settings,
            dt,
        );
        if animator.set_walking(step.walking) {
            debug!("Cat: {cat:?} isWalking={}", step.walking);
        }

        if !step.arrived {
            continue;
        }
        if is_kind(&props, target, PropKind::Food) {
            if follow.begin_consume() {
                info!("Cat: {cat:?} started eating {target:?}");
            }
        } else {
            info!("Cat: {cat:?} reached {target:?}");
            follow.clear_target();
            finished.write(FollowFinished { cat });
        }
    }
}

/// Steer towards the toy, sit once on arrival and pick it up if allowed.
pub fn follow_toy_system(
    mut commands: Commands,
    time: Res<Time>,
    mut cats: Query<
        (Entity, &mut Transform, &mut FollowToy, &mut Animator, &mut BehaviourMode),
        With<Cat>,
    >,
    targets: Query<(
        &GlobalTransform,
        Option<&ChildOf>,
        Option<&PhysicsBody>,
        Option<&Draggable>,
    )>,
    props: Query<&Prop>,
    mut triggers: EventWriter<AnimationTrigger>,
) {
    let dt = time.delta_secs();

    for (cat, mut tf, mut follow, mut animator, mut mode) in &mut cats {
        if !follow.is_enabled() {
            continue;
        }
        let Some(target) = follow.target() else {
            animator.set_walking(false);
            continue;
        };
        let Ok((target_tf, parent, body, drag)) = targets.get(target) else {
            debug!("Cat: toy target {target:?} is gone; idling");
            follow.clear_target();
            animator.set_walking(false);
            *mode = BehaviourMode::Idle;
            continue;
        };

        let settings = follow.follower().settings;
        let step = steer_towards(
            &mut tf,
            target_tf.translation(),
            &mut follow.follower_mut().state,
            &settings,
            dt,
        );
        if animator.set_walking(step.walking) {
            debug!("Cat: {cat:?} isWalking={}", step.walking);
        }

        // standing still near the toy counts, including inside the hysteresis band
        if step.walking {
            continue;
        }
        if follow.take_sit() {
            triggers.write(AnimationTrigger { entity: cat, trigger: AnimTrigger::SitOnce });
        }

        let at_rest = body.is_none_or(|b| !b.simulated)
            && drag.is_none_or(|d| d.state == DragState::Idle);
        if follow.toy.pick_up_on_arrival
            && parent.is_none()
            && at_rest
            && is_kind(&props, target, PropKind::Toy)
        {
            commands.entity(cat).add_child(target);
            commands
                .entity(target)
                .insert(Transform::from_translation(follow.toy.carry_offset));
            info!("Cat: {cat:?} picked up {target:?}");
        }
    }
}

pub fn wander_system(
    time: Res<Time>,
    mut rng: ResMut<WanderRng>,
    mut cats: Query<(&mut Transform, &mut Wander, &mut Animator), With<Cat>>,
) {
    for (mut tf, mut wander, mut animator) in &mut cats {
        if !wander.is_enabled() {
            continue;
        }
        let walked = wander.tick(&mut tf, time.delta(), &mut rng.0);
        animator.set_walking(walked);
    }
}

pub fn log_animation_triggers(mut triggers: EventReader<AnimationTrigger>) {
    for ev in triggers.read() {
        debug!("Anim: {:?} on {:?}", ev.trigger, ev.entity);
    }
}

/// Startup: seed the wander RNG from config.
pub fn seed_wander_rng(mut commands: Commands, config: Res<crate::config::BehaviourConfig>) {
    commands.insert_resource(WanderRng::from_seed(config.seed));
}
