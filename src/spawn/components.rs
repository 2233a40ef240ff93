use bevy::prelude::*;

/// The three things a tap can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropKind {
    Cat,
    Food,
    Toy,
}

impl PropKind {
    /// Toy and food cannot coexist.
    pub fn exclusive_with(self) -> Option<PropKind> {
        match self {
            PropKind::Food => Some(PropKind::Toy),
            PropKind::Toy => Some(PropKind::Food),
            PropKind::Cat => None,
        }
    }
}

/// Tags every spawned instance with its kind.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prop(pub PropKind);

/// What a prop looks like when instantiated.
#[derive(Clone, Debug)]
pub struct PropVisual {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    /// Distance from the ground contact to the mesh origin.
    pub half_height: f32,
}

/// Prefab table; a `None` entry means the prefab was never assigned.
#[derive(Resource, Default, Clone)]
pub struct PropPrefabs {
    pub cat: Option<PropVisual>,
    pub food: Option<PropVisual>,
    pub toy: Option<PropVisual>,
}

impl PropPrefabs {
    pub fn get(&self, kind: PropKind) -> Option<&PropVisual> {
        match kind {
            PropKind::Cat => self.cat.as_ref(),
            PropKind::Food => self.food.as_ref(),
            PropKind::Toy => self.toy.as_ref(),
        }
    }
}

/// Every spawn failure is a precondition that was not met.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no plane hit under the pointer")]
    NoPlaneHit,
    #[error("no prefab assigned for {0:?}")]
    MissingPrefab(PropKind),
    #[error("{0:?} already exists")]
    AlreadySpawned(PropKind),
    #[error("no camera or window to cast from")]
    NoViewport,
}
