// src/cat/wander.rs
//! Idle wandering inside a disc around a centre point.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;
use std::time::Duration;

use crate::config::WanderSettings;
use super::follow::turn_towards;

/// Deterministic RNG for wander destinations.
#[derive(Resource)]
pub struct WanderRng(pub ChaCha8Rng);

impl WanderRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for WanderRng {
    fn default() -> Self {
        Self::from_seed(1337)
    }
}

/// Uniform sample inside the horizontal disc of `radius` around `center`.
pub fn sample_in_disc<R: Rng + ?Sized>(rng: &mut R, center: Vec3, radius: f32) -> Vec3 {
    let r = radius * rng.random::<f32>().sqrt();
    let theta = rng.random::<f32>() * TAU;
    center + Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
}

#[derive(Component, Debug)]
pub struct Wander {
    enabled: bool,
    center: Vec3,
    destination: Option<Vec3>,
    pause: Option<Timer>,
    startup_delay: Option<Timer>,
    pub settings: WanderSettings,
}

impl Wander {
    pub fn new(center: Vec3, settings: WanderSettings) -> Self {
        Self {
            enabled: true,
            center,
            destination: None,
            pause: None,
            startup_delay: None,
            settings,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_some() || self.startup_delay.is_some()
    }

    /// Suspend wandering and forget the current leg.
    pub fn stop(&mut self) {
        self.enabled = false;
        self.destination = None;
        self.pause = None;
        self.startup_delay = None;
    }

    /// Resume after the configured startup delay.
    pub fn resume(&mut self, from: Vec3) {
        self.enabled = true;
        if self.settings.recenter_on_resume {
            self.center = Vec3::new(from.x, self.center.y, from.z);
        }
        self.destination = None;
        self.pause = None;
        self.startup_delay = (self.settings.resume_delay > 0.0).then(|| {
            Timer::new(Duration::from_secs_f32(self.settings.resume_delay), TimerMode::Once)
        });
    }

    /// One frame of the walk/pause loop. Returns whether the agent walked.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        transform: &mut Transform,
        delta: Duration,
        rng: &mut R,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(delay) = self.startup_delay.as_mut() {
            delay.tick(delta);
            if !delay.finished() {
                return false;
            }
            self.startup_delay = None;
        }
        if let Some(pause) = self.pause.as_mut() {
            pause.tick(delta);
            if !pause.finished() {
                return false;
            }
            self.pause = None;
        }

        let destination = match self.destination {
            Some(d) => d,
            None => {
                let d = sample_in_disc(rng, self.center, self.settings.move_range);
                self.destination = Some(d);
                d
            }
        };

        let dt = delta.as_secs_f32();
        let mut to_dest = destination - transform.translation;
        to_dest.y = 0.0;
        let distance = to_dest.length();
        if distance > 0.0 {
            let step = self.settings.move_speed * dt;
            if step >= distance {
                transform.translation.x = destination.x;
                transform.translation.z = destination.z;
            } else {
                transform.translation += to_dest / distance * step;
            }
            turn_towards(transform, to_dest, self.settings.rotation_speed, dt);
        }

        let remaining = Vec2::new(
            destination.x - transform.translation.x,
            destination.z - transform.translation.z,
        )
        .length();
        if remaining <= self.settings.arrive_distance {
            self.destination = None;
            self.pause = Some(Timer::new(
                Duration::from_secs_f32(self.settings.wait_time.max(0.0)),
                TimerMode::Once,
            ));
        }
        true
    }
}
