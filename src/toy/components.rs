use bevy::prelude::*;

use crate::config::DragSettings;
use crate::planes::PlaneHit;
use super::drag::{drag_target, throw_velocity, PointerSamples};

pub const GRAVITY: f32 = 9.81;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
    Thrown,
}

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// Snapped onto the ground reference and left kinematic.
    Dropped,
    /// Launched with this world velocity.
    Thrown(Vec3),
}

/// Press-drag-release manipulation along detected planes.
#[derive(Component, Debug)]
pub struct Draggable {
    pub state: DragState,
    pub grab_offset: Vec3,
    pub half_height: f32,
    /// Height of the last plane the pointer was over.
    pub last_plane_y: Option<f32>,
    pub samples: PointerSamples,
}

impl Draggable {
    pub fn new(half_height: f32, plane_y: Option<f32>) -> Self {
        Self {
            state: DragState::Idle,
            grab_offset: Vec3::ZERO,
            half_height,
            last_plane_y: plane_y,
            samples: PointerSamples::default(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn begin(&mut self, grab_offset: Vec3, pointer: Vec2, time: f32) {
        self.state = DragState::Dragging;
        self.grab_offset = grab_offset;
        self.samples.reset(pointer, time);
    }

    /// Record a pointer sample and compute the new position, if any.
    pub fn drag_to(
        &mut self,
        hit: Option<&PlaneHit>,
        pointer: Vec2,
        time: f32,
        ray_origin: Vec3,
        ray_direction: Vec3,
        current_y: f32,
    ) -> Option<Vec3> {
        if !self.is_dragging() {
            return None;
        }
        self.samples.push(pointer, time);
        if let Some(hit) = hit {
            self.last_plane_y = Some(hit.position.y);
        }
        let fallback_y = self.last_plane_y.unwrap_or(current_y - self.half_height);
        drag_target(hit, ray_origin, ray_direction, fallback_y, self.half_height, self.grab_offset)
    }

    /// Finish the drag with the release sample: throw if the pointer was
    /// fast enough just before letting go, else drop in place.
    pub fn release(
        &mut self,
        translation: &mut Vec3,
        pointer: Vec2,
        time: f32,
        camera_forward: Vec3,
        camera_right: Vec3,
        settings: &DragSettings,
    ) -> Release {
        self.samples.push(pointer, time);
        let screen_velocity = self.samples.velocity();
        if screen_velocity.length() > settings.throw_min_screen_velocity {
            self.state = DragState::Thrown;
            return Release::Thrown(throw_velocity(
                screen_velocity,
                camera_forward,
                camera_right,
                settings,
            ));
        }

        if let Some(y) = self.last_plane_y {
            translation.y = y + self.half_height;
        }
        self.state = DragState::Idle;
        Release::Dropped
    }
}

/// Stand-in rigidbody: kinematic until launched, then integrated under gravity.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub simulated: bool,
}

impl PhysicsBody {
    pub fn make_kinematic(&mut self) {
        self.velocity = Vec3::ZERO;
        self.simulated = false;
    }

    pub fn launch(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.simulated = true;
    }

    /// Integrate one step. `ground` reports the supporting height under a
    /// point; on contact the body rests at ground + `half_height`, becomes
    /// kinematic, and the ground height is returned.
    pub fn step(
        &mut self,
        translation: &mut Vec3,
        dt: f32,
        half_height: f32,
        ground: impl Fn(Vec3) -> Option<f32>,
    ) -> Option<f32> {
        if !self.simulated {
            return None;
        }
        let previous_bottom = translation.y - half_height;
        self.velocity.y -= GRAVITY * dt;
        *translation += self.velocity * dt;

        let foot = Vec3::new(translation.x, previous_bottom, translation.z);
        let ground_y = ground(foot)?;
        if translation.y - half_height > ground_y {
            return None;
        }
        translation.y = ground_y + half_height;
        self.make_kinematic();
        Some(ground_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_hit(at: Vec3) -> PlaneHit {
        PlaneHit {
            plane: Entity::from_raw(1),
            position: at,
            rotation: Quat::IDENTITY,
            distance: 1.0,
        }
    }

    #[test]
    fn slow_release_rests_at_ground_height() {
        let settings = DragSettings::default();
        let mut drag = Draggable::new(0.05, Some(0.0));
        drag.begin(Vec3::ZERO, Vec2::new(100.0, 100.0), 0.0);

        let hit = floor_hit(Vec3::new(0.4, 0.0, -0.2));
        let mut pos = drag
            .drag_to(Some(&hit), Vec2::new(110.0, 100.0), 0.1, Vec3::Y, Vec3::NEG_Y, 0.05)
            .unwrap();
        pos.y += 0.3;

        let released = drag.release(&mut pos, Vec2::new(110.0, 100.0), 0.2, Vec3::NEG_Z, Vec3::X, &settings);
        assert_eq!(released, Release::Dropped);
        assert!((pos - Vec3::new(0.4, 0.05, -0.2)).length() < 1e-5);
        assert_eq!(drag.state, DragState::Idle);
    }

    #[test]
    fn fast_release_throws_along_the_swipe() {
        let settings = DragSettings::default();
        let mut drag = Draggable::new(0.05, Some(0.0));
        drag.begin(Vec3::ZERO, Vec2::new(100.0, 300.0), 0.0);
        let hit = floor_hit(Vec3::ZERO);
        drag.drag_to(Some(&hit), Vec2::new(120.0, 300.0), 0.016, Vec3::Y, Vec3::NEG_Y, 0.05);
        drag.drag_to(Some(&hit), Vec2::new(160.0, 300.0), 0.032, Vec3::Y, Vec3::NEG_Y, 0.05);

        let mut pos = Vec3::new(0.0, 0.05, 0.0);
        let released = drag.release(&mut pos, Vec2::new(170.0, 300.0), 0.04, Vec3::NEG_Z, Vec3::X, &settings);
        let Release::Thrown(v) = released else {
            panic!("expected a throw");
        };
        assert!(v.x > 0.0);
        assert!(v.z.abs() < 1e-4);
        assert!(v.y > 0.0);
        assert_eq!(drag.state, DragState::Thrown);
    }

    #[test]
    fn flick_then_hold_still_then_release_drops() {
        let settings = DragSettings::default();
        let mut drag = Draggable::new(0.05, Some(0.0));
        drag.begin(Vec3::ZERO, Vec2::new(400.0, 300.0), 0.0);
        let hit = floor_hit(Vec3::new(0.3, 0.0, 0.0));
        drag.drag_to(Some(&hit), Vec2::new(460.0, 300.0), 0.016, Vec3::Y, Vec3::NEG_Y, 0.05);

        // two seconds without moving, then let go where the flick ended
        let mut pos = Vec3::new(0.3, 0.05, 0.0);
        let released = drag.release(&mut pos, Vec2::new(460.0, 300.0), 2.0, Vec3::NEG_Z, Vec3::X, &settings);
        assert_eq!(released, Release::Dropped);
        assert_eq!(drag.state, DragState::Idle);
        assert!((pos - Vec3::new(0.3, 0.05, 0.0)).length() < 1e-5);
    }

    #[test]
    fn dragging_without_plane_uses_last_known_height() {
        let mut drag = Draggable::new(0.05, Some(0.7));
        drag.begin(Vec3::ZERO, Vec2::ZERO, 0.0);
        let p = drag
            .drag_to(None, Vec2::ONE, 0.1, Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, -1.0), 0.0)
            .unwrap();
        assert!((p.y - 0.75).abs() < 1e-5);
        assert!((p.z + 1.3).abs() < 1e-5);
    }

    #[test]
    fn idle_draggable_ignores_moves() {
        let mut drag = Draggable::new(0.05, None);
        assert!(drag.drag_to(None, Vec2::ONE, 0.1, Vec3::Y, Vec3::NEG_Y, 0.0).is_none());
    }

    #[test]
    fn launched_body_lands_and_turns_kinematic() {
        let mut body = PhysicsBody::default();
        let mut pos = Vec3::new(0.0, 0.05, 0.0);
        assert_eq!(body.step(&mut pos, 0.016, 0.05, |_| Some(0.0)), None);

        body.launch(Vec3::new(2.0, 1.0, 0.0));
        let mut landed = None;
        for _ in 0..200 {
            if let Some(y) = body.step(&mut pos, 0.016, 0.05, |_| Some(0.0)) {
                landed = Some(y);
                break;
            }
        }
        assert_eq!(landed, Some(0.0));
        assert!(!body.simulated);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert!((pos.y - 0.05).abs() < 1e-6);
        assert!(pos.x > 0.1);
    }
}
