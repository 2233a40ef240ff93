use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::input::{keyboard::KeyCode, ButtonInput};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::actions::{ActionState, PlayerAction};
use crate::setup::MainCamera;

pub const MOVE_SPEED: f32 = 1.5;
pub const ROTATE_SPEED: f32 = 0.2;
pub const MAX_CAMERA_DT: f32 = 0.05; // never use a dt larger than 50ms

#[derive(Component)]
pub struct CameraOrbit {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Pressed,
    Moved,
    Released,
}

/// Unified mouse/touch pointer sample. `time` is seconds since startup and
/// `ray` the world-space pointer ray, when a camera could cast one.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Vec2,
    pub time: f32,
    pub ray: Option<Ray3d>,
}

pub fn input_mapping_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut action_state: ResMut<ActionState>,
) {
    action_state.set(PlayerAction::MoveForward, keys.pressed(KeyCode::KeyW));
    action_state.set(PlayerAction::MoveBackward, keys.pressed(KeyCode::KeyS));
    action_state.set(PlayerAction::MoveLeft, keys.pressed(KeyCode::KeyA));
    action_state.set(PlayerAction::MoveRight, keys.pressed(KeyCode::KeyD));
    action_state.set(PlayerAction::SpawnCat, keys.pressed(KeyCode::KeyC));
    action_state.set(PlayerAction::SpawnFood, keys.pressed(KeyCode::KeyF));
    action_state.set(PlayerAction::SpawnToy, keys.pressed(KeyCode::KeyT));
    action_state.set(PlayerAction::CallCat, keys.pressed(KeyCode::Space));
    action_state.set(PlayerAction::SelectCat, keys.pressed(KeyCode::Digit1));
    action_state.set(PlayerAction::SelectFood, keys.pressed(KeyCode::Digit2));
    action_state.set(PlayerAction::SelectToy, keys.pressed(KeyCode::Digit3));
}

/// Turn left mouse button and the first touch into `PointerEvent`s.
///
/// While the pointer is held a `Moved` sample goes out every frame, moving or
/// not. A release is always reported, at the last known position if the
/// cursor has left the window.
pub fn pointer_input_system(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut last_cursor: Local<Option<Vec2>>,
    mut pointer: EventWriter<PointerEvent>,
) {
    let now = time.elapsed_secs();
    let mut emit = |phase: PointerPhase, position: Vec2| {
        let ray = pointer_ray(&windows, &cameras, Some(position));
        pointer.write(PointerEvent { phase, position, time: now, ray });
    };

    let touch_pressed = touches.iter_just_pressed().next().map(|t| t.position());
    let touch_held = touches.iter().next().map(|t| t.position());
    let touch_released = touches.iter_just_released().next().map(|t| t.position());
    if touch_pressed.is_some() || touch_held.is_some() || touch_released.is_some() {
        if let Some(position) = touch_pressed {
            emit(PointerPhase::Pressed, position);
        } else if let Some(position) = touch_held {
            emit(PointerPhase::Moved, position);
        }
        if let Some(position) = touch_released {
            emit(PointerPhase::Released, position);
        }
        return;
    }

    let cursor = windows.single().ok().and_then(Window::cursor_position);
    if buttons.just_released(MouseButton::Left) {
        emit(PointerPhase::Released, cursor.or(*last_cursor).unwrap_or_default());
    } else if buttons.just_pressed(MouseButton::Left) {
        if let Some(position) = cursor {
            emit(PointerPhase::Pressed, position);
        }
    } else if buttons.pressed(MouseButton::Left) {
        if let Some(position) = cursor.or(*last_cursor) {
            emit(PointerPhase::Moved, position);
        }
    }
    if cursor.is_some() {
        *last_cursor = cursor;
    }
}

/// World-space ray through a viewport position; the screen centre if `None`.
pub fn pointer_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    screen_pos: Option<Vec2>,
) -> Option<Ray3d> {
    let (camera, cam_transform) = cameras.single().ok()?;
    let pos = match screen_pos {
        Some(p) => p,
        None => {
            let window = windows.single().ok()?;
            Vec2::new(window.width() * 0.5, window.height() * 0.5)
        }
    };
    camera.viewport_to_world(cam_transform, pos).ok()
}

pub fn camera_controller(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    action_state: Res<ActionState>,
    mut query: Query<(&mut Transform, &mut CameraOrbit), With<MainCamera>>,
) {
    // 0) Clamp delta
    let mut dt = time.delta_secs();
    if dt > MAX_CAMERA_DT {
        dt = MAX_CAMERA_DT;
    }

    let Ok((mut tf, mut orbit)) = query.single_mut() else { return; };

    // 1) Camera-relative movement
    let forward = Vec2::new(-orbit.yaw.cos(), -orbit.yaw.sin());
    let right = Vec2::new(-forward.y, forward.x);

    let mut dir = Vec2::ZERO;
    if action_state.pressed(PlayerAction::MoveForward) { dir += forward; }
    if action_state.pressed(PlayerAction::MoveBackward) { dir -= forward; }
    if action_state.pressed(PlayerAction::MoveLeft) { dir -= right; }
    if action_state.pressed(PlayerAction::MoveRight) { dir += right; }

    if dir != Vec2::ZERO {
        let delta = dir.normalize() * MOVE_SPEED * dt;
        orbit.focus.x += delta.x;
        orbit.focus.z += delta.y;
    }

    // 2) Zoom
    for ev in scroll_evr.read() {
        let amount = match ev.unit {
            MouseScrollUnit::Line => ev.y * 0.25,
            MouseScrollUnit::Pixel => ev.y * 0.005,
        };
        orbit.radius = (orbit.radius - amount).clamp(0.5, 20.0);
    }

    // 3) Orbit
    if mouse_buttons.pressed(MouseButton::Middle) {
        for ev in motion_evr.read() {
            orbit.yaw += ev.delta.x * ROTATE_SPEED * dt;
            orbit.pitch += ev.delta.y * ROTATE_SPEED * dt;
        }
    }

    orbit.pitch = orbit.pitch.clamp(0.05, std::f32::consts::FRAC_PI_2 - 0.01);

    // 4) Position camera
    let xz_radius = orbit.radius * orbit.pitch.cos();
    let offset = Vec3::new(
        xz_radius * orbit.yaw.cos(),
        orbit.radius * orbit.pitch.sin(),
        xz_radius * orbit.yaw.sin(),
    );

    tf.translation = orbit.focus + offset;
    tf.look_at(orbit.focus, Vec3::Y);
}
