// src/cat/mod.rs

pub mod components;
pub mod follow;
pub mod wander;
pub mod arbitration;
mod systems;
mod plugin;

pub use components::{Animator, BehaviourMode, Cat};
pub use follow::{FollowBehaviour, FollowFood, FollowToy};
pub use wander::{Wander, WanderRng};
pub use plugin::{AnimTrigger, AnimationTrigger, CatPlugin, FollowFinished, FoodConsumed};
