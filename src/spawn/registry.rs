// src/spawn/registry.rs
//! At most one live instance per prop kind.

use bevy::prelude::*;

use super::components::{PropKind, SpawnError};

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRegistry {
    pub cat: Option<Entity>,
    pub food: Option<Entity>,
    pub toy: Option<Entity>,
}

impl SpawnRegistry {
    pub fn get(&self, kind: PropKind) -> Option<Entity> {
        match kind {
            PropKind::Cat => self.cat,
            PropKind::Food => self.food,
            PropKind::Toy => self.toy,
        }
    }

    fn slot_mut(&mut self, kind: PropKind) -> &mut Option<Entity> {
        match kind {
            PropKind::Cat => &mut self.cat,
            PropKind::Food => &mut self.food,
            PropKind::Toy => &mut self.toy,
        }
    }

    pub fn set(&mut self, kind: PropKind, entity: Entity) {
        *self.slot_mut(kind) = Some(entity);
    }

    pub fn take(&mut self, kind: PropKind) -> Option<Entity> {
        self.slot_mut(kind).take()
    }

    /// Drop whichever slot holds `entity`.
    pub fn forget(&mut self, entity: Entity) -> Option<PropKind> {
        let kind = [PropKind::Cat, PropKind::Food, PropKind::Toy]
            .into_iter()
            .find(|&kind| self.get(kind) == Some(entity))?;
        self.take(kind);
        Some(kind)
    }

    /// The live instance that must go before `kind` may exist.
    pub fn conflicting(&self, kind: PropKind) -> Option<(PropKind, Entity)> {
        let other = kind.exclusive_with()?;
        self.get(other).map(|e| (other, e))
    }

    pub fn check_vacant(&self, kind: PropKind) -> Result<(), SpawnError> {
        match self.get(kind) {
            Some(_) => Err(SpawnError::AlreadySpawned(kind)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_conflicts_with_live_toy_only() {
        let mut reg = SpawnRegistry::default();
        assert_eq!(reg.conflicting(PropKind::Food), None);

        let toy = Entity::from_raw(5);
        reg.set(PropKind::Toy, toy);
        assert_eq!(reg.conflicting(PropKind::Food), Some((PropKind::Toy, toy)));
        assert_eq!(reg.conflicting(PropKind::Cat), None);
        assert_eq!(reg.conflicting(PropKind::Toy), None);
    }

    #[test]
    fn occupied_slot_rejects_second_instance() {
        let mut reg = SpawnRegistry::default();
        assert_eq!(reg.check_vacant(PropKind::Cat), Ok(()));
        reg.set(PropKind::Cat, Entity::from_raw(1));
        assert_eq!(reg.check_vacant(PropKind::Cat), Err(SpawnError::AlreadySpawned(PropKind::Cat)));
    }

    #[test]
    fn forget_clears_the_matching_slot() {
        let mut reg = SpawnRegistry::default();
        let food = Entity::from_raw(3);
        reg.set(PropKind::Food, food);

        assert_eq!(reg.forget(Entity::from_raw(99)), None);
        assert_eq!(reg.forget(food), Some(PropKind::Food));
        assert_eq!(reg.food, None);
        assert_eq!(reg.forget(food), None);
    }
}
