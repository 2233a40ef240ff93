// src/cat/follow.rs
//! Follow-toward-target steering and the two follower variants.

use bevy::prelude::*;
use std::time::Duration;

use crate::config::{ConsumeSettings, FollowSettings, ToySettings};

/// Squared planar length below which the look rotation is left alone.
pub const MIN_LOOK_SQ: f32 = 1e-4;

/// Walk/arrive flags carried between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FollowState {
    pub walking: bool,
    /// Set once the arrival action fired for the current approach.
    pub arrived: bool,
}

/// What happened during one steering step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FollowStep {
    pub walking: bool,
    /// True on the single frame the agent transitions into "arrived".
    pub arrived: bool,
}

/// Hysteresis: a walking agent keeps going while beyond `stop_distance`,
/// an idle one only starts once beyond `start_walk_distance`.
pub fn should_walk(walking: bool, distance: f32, settings: &FollowSettings) -> bool {
    if walking {
        distance > settings.stop_distance
    } else {
        distance > settings.start_walk_distance
    }
}

/// Yaw that points the local -Z axis along `direction` (Y ignored).
pub fn yaw_towards(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= MIN_LOOK_SQ {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Slerp `transform` towards facing `direction` at `rotation_speed`.
pub fn turn_towards(transform: &mut Transform, direction: Vec3, rotation_speed: f32, dt: f32) {
    if let Some(look) = yaw_towards(direction) {
        let t = (rotation_speed * dt).clamp(0.0, 1.0);
        transform.rotation = transform.rotation.slerp(look, t);
    }
}

/// Advance one frame of planar pursuit of `target`.
pub fn steer_towards(
    transform: &mut Transform,
    target: Vec3,
    state: &mut FollowState,
    settings: &FollowSettings,
    dt: f32,
) -> FollowStep {
    let mut to_target = target - transform.translation;
    to_target.y = 0.0;
    let distance = to_target.length();

    let walk = should_walk(state.walking, distance, settings);
    state.walking = walk;

    if walk {
        state.arrived = false;
        if distance > 0.0 {
            let step = (settings.move_speed * dt).min(distance);
            transform.translation += to_target / distance * step;
        }
        if to_target.length_squared() > MIN_LOOK_SQ {
            turn_towards(transform, to_target, settings.rotation_speed, dt);
        }
        return FollowStep { walking: true, arrived: false };
    }

    if !state.arrived && distance <= settings.stop_distance + settings.arrival_epsilon {
        state.arrived = true;
        return FollowStep { walking: false, arrived: true };
    }

    FollowStep::default()
}

/// Target and enable flag shared by every follower.
#[derive(Clone, Debug, Default)]
pub struct Follower {
    pub enabled: bool,
    pub target: Option<Entity>,
    pub state: FollowState,
    pub settings: FollowSettings,
}

impl Follower {
    pub fn new(settings: FollowSettings) -> Self {
        Self { settings, ..default() }
    }
}

/// The public surface every follow variant exposes to arbitration.
pub trait FollowBehaviour {
    fn follower(&self) -> &Follower;
    fn follower_mut(&mut self) -> &mut Follower;
    /// Drop per-approach progress (timers, one-shot flags).
    fn reset_progress(&mut self);

    fn target(&self) -> Option<Entity> {
        self.follower().target
    }

    fn is_enabled(&self) -> bool {
        self.follower().enabled
    }

    fn set_target(&mut self, target: Entity) {
        let f = self.follower_mut();
        f.target = Some(target);
        f.state.arrived = false;
        self.reset_progress();
    }

    fn call_to(&mut self, target: Entity) {
        self.set_target(target);
    }

    fn clear_target(&mut self) {
        let f = self.follower_mut();
        f.target = None;
        f.state = FollowState::default();
        self.reset_progress();
    }

    /// Disabling halts any in-progress timed action immediately.
    fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.follower_mut().state.walking = false;
            self.reset_progress();
        }
        self.follower_mut().enabled = enabled;
    }
}

/// Result of advancing the eat timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumeTick {
    NotConsuming,
    Eating,
    /// Eating finished; carries the target that was being eaten, if any.
    Finished(Option<Entity>),
}

/// Follows food and eats it on arrival.
#[derive(Component, Debug)]
pub struct FollowFood {
    follower: Follower,
    eat_duration: Duration,
    consuming: Option<Timer>,
}

impl FollowFood {
    pub fn new(follow: FollowSettings, consume: ConsumeSettings) -> Self {
        Self {
            follower: Follower::new(follow),
            eat_duration: Duration::from_secs_f32(consume.eat_duration.max(0.0)),
            consuming: None,
        }
    }

    pub fn is_consuming(&self) -> bool {
        self.consuming.is_some()
    }

    /// Start eating. Returns false (and does nothing) if already eating.
    pub fn begin_consume(&mut self) -> bool {
        if self.consuming.is_some() {
            return false;
        }
        self.follower.state.walking = false;
        self.consuming = Some(Timer::new(self.eat_duration, TimerMode::Once));
        true
    }

    /// Advance the eat timer. The target reference is handed back and
    /// cleared exactly once, on the tick that finishes.
    pub fn tick_consume(&mut self, delta: Duration) -> ConsumeTick {
        let Some(timer) = self.consuming.as_mut() else {
            return ConsumeTick::NotConsuming;
        };
        timer.tick(delta);
        if !timer.finished() {
            return ConsumeTick::Eating;
        }
        self.consuming = None;
        let eaten = self.follower.target.take();
        self.follower.state = FollowState::default();
        ConsumeTick::Finished(eaten)
    }
}

impl FollowBehaviour for FollowFood {
    fn follower(&self) -> &Follower {
        &self.follower
    }
    fn follower_mut(&mut self) -> &mut Follower {
        &mut self.follower
    }
    fn reset_progress(&mut self) {
        self.consuming = None;
    }
}

/// Follows the toy, sits once on arrival and optionally picks it up.
#[derive(Component, Debug)]
pub struct FollowToy {
    follower: Follower,
    pub toy: ToySettings,
    has_sat: bool,
}

impl FollowToy {
    pub fn new(follow: FollowSettings, toy: ToySettings) -> Self {
        Self {
            follower: Follower::new(follow),
            toy,
            has_sat: false,
        }
    }

    /// Returns true the first time per approach; the sit trigger should fire then.
    pub fn take_sit(&mut self) -> bool {
        if self.has_sat || !self.toy.sit_on_arrival {
            return false;
        }
        self.has_sat = true;
        true
    }
}

impl FollowBehaviour for FollowToy {
    fn follower(&self) -> &Follower {
        &self.follower
    }
    fn follower_mut(&mut self) -> &mut Follower {
        &mut self.follower
    }
    fn reset_progress(&mut self) {
        self.has_sat = false;
    }
}
