use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    SpawnCat,
    SpawnFood,
    SpawnToy,
    CallCat,
    SelectCat,
    SelectFood,
    SelectToy,
}

#[derive(Default, Resource)]
pub struct ActionState {
    pressed: HashMap<PlayerAction, bool>,
    just_pressed: HashMap<PlayerAction, bool>,
}

impl ActionState {
    pub fn set(&mut self, action: PlayerAction, is_pressed: bool) {
        let was_pressed = self.pressed(action);
        self.just_pressed.insert(action, is_pressed && !was_pressed);
        self.pressed.insert(action, is_pressed);
    }

    pub fn pressed(&self, action: PlayerAction) -> bool {
        *self.pressed.get(&action).unwrap_or(&false)
    }

    pub fn just_pressed(&self, action: PlayerAction) -> bool {
        *self.just_pressed.get(&action).unwrap_or(&false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_pressed_is_an_edge() {
        let mut state = ActionState::default();
        state.set(PlayerAction::SpawnCat, true);
        assert!(state.just_pressed(PlayerAction::SpawnCat));
        state.set(PlayerAction::SpawnCat, true);
        assert!(state.pressed(PlayerAction::SpawnCat));
        assert!(!state.just_pressed(PlayerAction::SpawnCat));
        state.set(PlayerAction::SpawnCat, false);
        assert!(!state.pressed(PlayerAction::SpawnCat));
    }
}
