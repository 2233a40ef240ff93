// src/spawn/mod.rs

pub mod components;
pub mod registry;
pub mod systems;
mod plugin;

pub use components::{Prop, PropKind, PropPrefabs, PropVisual, SpawnError};
pub use registry::SpawnRegistry;
pub use plugin::{CallCat, PropDestroyed, PropSpawned, SelectedPropKind, SpawnPlugin, SpawnRequest};
