// src/toy/mod.rs

pub mod components;
pub mod drag;
mod systems;
mod plugin;

pub use components::{DragState, Draggable, PhysicsBody, Release};
pub use plugin::{ToyPlugin, ToyReleased};
