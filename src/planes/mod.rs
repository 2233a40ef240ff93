// src/planes/mod.rs
//! Detected-plane stand-in and ray casts against it.

pub mod components;
pub mod raycast;

pub use components::{DetectedPlane, PlaneHit, PlaneSample};
pub use raycast::{ground_height_below, raycast_planes, select_hit};
