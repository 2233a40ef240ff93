// src/cat/arbitration.rs
//! Single-owner policy over the agent's behaviours.

use bevy::prelude::*;

use super::components::BehaviourMode;
use super::follow::{FollowBehaviour, FollowFood, FollowToy};
use super::wander::Wander;

/// Disable a follower, clearing its target first so nothing keeps pursuing
/// a stale entity.
fn release<F: FollowBehaviour>(follow: &mut F) {
    follow.clear_target();
    follow.set_enabled(false);
}

/// Hand the agent to `follow`, keeping in-progress work if the target is unchanged.
fn engage<F: FollowBehaviour>(follow: &mut F, target: Entity) {
    let retarget = follow.target() != Some(target);
    follow.set_enabled(true);
    if retarget {
        follow.set_target(target);
    }
}

/// Food beats toy; with neither present the agent goes back to wandering.
pub fn arbitrate(
    food: Option<Entity>,
    toy: Option<Entity>,
    follow_food: &mut FollowFood,
    follow_toy: &mut FollowToy,
    wander: &mut Wander,
    agent_position: Vec3,
) -> BehaviourMode {
    if let Some(food) = food {
        release(follow_toy);
        engage(follow_food, food);
        wander.stop();
        return BehaviourMode::FollowFood;
    }

    if let Some(toy) = toy {
        release(follow_food);
        engage(follow_toy, toy);
        wander.stop();
        return BehaviourMode::FollowToy;
    }

    release(follow_food);
    release(follow_toy);
    if !wander.is_enabled() {
        wander.resume(agent_position);
    }
    BehaviourMode::Wander
}

/// Summon the agent to an arbitrary entity (the camera). The food follower
/// is used for this since it knows how to finish an approach.
pub fn call_to(
    target: Entity,
    follow_food: &mut FollowFood,
    follow_toy: &mut FollowToy,
    wander: &mut Wander,
) -> BehaviourMode {
    release(follow_toy);
    follow_food.set_enabled(true);
    follow_food.call_to(target);
    wander.stop();
    BehaviourMode::FollowFood
}

/// Count of enabled followers; never more than one after arbitration.
pub fn enabled_followers(follow_food: &FollowFood, follow_toy: &FollowToy) -> usize {
    usize::from(follow_food.is_enabled()) + usize::from(follow_toy.is_enabled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BehaviourConfig;

    struct Rig {
        food: FollowFood,
        toy: FollowToy,
        wander: Wander,
    }

    fn rig() -> Rig {
        let cfg = BehaviourConfig::default();
        Rig {
            food: FollowFood::new(cfg.follow, cfg.consume),
            toy: FollowToy::new(cfg.follow, cfg.toy),
            wander: Wander::new(Vec3::ZERO, cfg.wander),
        }
    }

    fn run(r: &mut Rig, food: Option<Entity>, toy: Option<Entity>) -> BehaviourMode {
        arbitrate(food, toy, &mut r.food, &mut r.toy, &mut r.wander, Vec3::ZERO)
    }

    #[test]
    fn food_wins_over_toy() {
        let mut r = rig();
        let food = Entity::from_raw(1);
        let toy = Entity::from_raw(2);

        assert_eq!(run(&mut r, Some(food), Some(toy)), BehaviourMode::FollowFood);
        assert_eq!(r.food.target(), Some(food));
        assert!(!r.toy.is_enabled());
        assert_eq!(r.toy.target(), None);
        assert!(!r.wander.is_enabled());
    }

    #[test]
    fn switching_to_toy_clears_the_food_follower() {
        let mut r = rig();
        let food = Entity::from_raw(1);
        let toy = Entity::from_raw(2);

        run(&mut r, Some(food), None);
        r.food.begin_consume();
        assert_eq!(run(&mut r, None, Some(toy)), BehaviourMode::FollowToy);

        assert!(!r.food.is_enabled());
        assert!(!r.food.is_consuming());
        assert_eq!(r.food.target(), None);
        assert_eq!(r.toy.target(), Some(toy));
    }

    #[test]
    fn at_most_one_follower_after_any_sequence() {
        let mut r = rig();
        let a = Some(Entity::from_raw(1));
        let b = Some(Entity::from_raw(2));
        let sequence = [(a, None), (None, b), (a, b), (None, None), (None, b), (a, None), (None, None)];

        for (food, toy) in sequence {
            let mode = run(&mut r, food, toy);
            assert!(enabled_followers(&r.food, &r.toy) <= 1);
            let wandering = r.wander.is_enabled();
            assert_eq!(wandering, mode == BehaviourMode::Wander);
            assert_eq!(wandering, enabled_followers(&r.food, &r.toy) == 0);
        }
    }

    #[test]
    fn same_food_target_keeps_consumption_running() {
        let mut r = rig();
        let food = Entity::from_raw(1);

        run(&mut r, Some(food), None);
        assert!(r.food.begin_consume());
        run(&mut r, Some(food), None);
        assert!(r.food.is_consuming());
    }

    #[test]
    fn losing_all_targets_restarts_wander_once() {
        let mut r = rig();
        run(&mut r, None, Some(Entity::from_raw(2)));
        assert_eq!(run(&mut r, None, None), BehaviourMode::Wander);
        assert!(r.wander.is_enabled());
        assert!(r.wander.is_paused());
    }

    #[test]
    fn call_prefers_the_food_follower() {
        let mut r = rig();
        let camera = Entity::from_raw(10);
        run(&mut r, None, Some(Entity::from_raw(2)));

        assert_eq!(call_to(camera, &mut r.food, &mut r.toy, &mut r.wander), BehaviourMode::FollowFood);
        assert_eq!(r.food.target(), Some(camera));
        assert!(!r.toy.is_enabled());
        assert!(!r.wander.is_enabled());
    }
}
