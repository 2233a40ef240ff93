// src/config.rs
//! Data-driven tuning for every behaviour, loaded from `assets/catplace.ron`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "assets/catplace.ron";

/// Steering parameters shared by the food and toy followers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowSettings {
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// An idle agent starts walking only beyond this distance.
    pub start_walk_distance: f32,
    /// A walking agent stops at or below this distance.
    pub stop_distance: f32,
    /// Slack added to `stop_distance` when deciding the agent has arrived.
    pub arrival_epsilon: f32,
}

impl Default for FollowSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.5,
            rotation_speed: 5.0,
            start_walk_distance: 0.35,
            stop_distance: 0.20,
            arrival_epsilon: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumeSettings {
    /// Seconds spent eating before the food is destroyed.
    pub eat_duration: f32,
}

impl Default for ConsumeSettings {
    fn default() -> Self {
        Self { eat_duration: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderSettings {
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// Radius of the disc destinations are sampled from.
    pub move_range: f32,
    /// Pause at each destination (seconds).
    pub wait_time: f32,
    /// Startup delay applied when wandering resumes after a follow.
    pub resume_delay: f32,
    pub arrive_distance: f32,
    /// Re-anchor the wander disc on the agent's position when resuming.
    pub recenter_on_resume: bool,
}

impl Default for WanderSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.5,
            rotation_speed: 5.0,
            move_range: 1.5,
            wait_time: 1.0,
            resume_delay: 0.5,
            arrive_distance: 0.01,
            recenter_on_resume: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToySettings {
    pub sit_on_arrival: bool,
    pub pick_up_on_arrival: bool,
    /// Local offset of a carried toy relative to the cat.
    pub carry_offset: Vec3,
}

impl Default for ToySettings {
    fn default() -> Self {
        Self {
            sit_on_arrival: true,
            pick_up_on_arrival: true,
            carry_offset: Vec3::new(0.0, 0.05, -0.1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    pub min_throw_force: f32,
    pub max_throw_force: f32,
    pub upward_force_ratio: f32,
    /// Pointer speed (pixels/second) above which a release becomes a throw.
    pub throw_min_screen_velocity: f32,
    /// Half height used when a prop has no explicit extent.
    pub default_half_height: f32,
    /// Radius of the pickable sphere around a draggable prop.
    pub grab_radius: f32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            min_throw_force: 2.0,
            max_throw_force: 8.0,
            upward_force_ratio: 0.5,
            throw_min_screen_velocity: 1000.0,
            default_half_height: 0.05,
            grab_radius: 0.12,
        }
    }
}

/// Which plane hit the spawner uses when the ray crosses several planes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSelection {
    #[default]
    Nearest,
    Lowest,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    pub hit_selection: HitSelection,
    /// Minimum seconds between two tap placements.
    pub placement_cooldown: f32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            hit_selection: HitSelection::Nearest,
            placement_cooldown: 0.25,
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourConfig {
    pub follow: FollowSettings,
    pub consume: ConsumeSettings,
    pub wander: WanderSettings,
    pub toy: ToySettings,
    pub drag: DragSettings,
    pub spawn: SpawnSettings,
    /// Seed for the wander RNG.
    pub seed: u64,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            follow: FollowSettings::default(),
            consume: ConsumeSettings::default(),
            wander: WanderSettings::default(),
            toy: ToySettings::default(),
            drag: DragSettings::default(),
            spawn: SpawnSettings::default(),
            seed: 1337,
        }
    }
}

impl BehaviourConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Ron(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O while reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
}

/// Where the startup loader looks for the config file.
#[derive(Resource, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_PATH.to_string())
    }
}

/// Startup: replace the default config with the file contents, if present.
pub fn load_behaviour_config(path: Res<ConfigPath>, mut config: ResMut<BehaviourConfig>) {
    match BehaviourConfig::load(&path.0) {
        Ok(loaded) => {
            *config = loaded;
            info!("Config: loaded behaviour config from '{}'", path.0);
        }
        Err(ConfigError::Io(e)) => {
            warn!("Config: '{}' not readable ({e}); using defaults", path.0);
        }
        Err(e) => {
            error!("Config: '{}' rejected: {e}; using defaults", path.0);
        }
    }
}
