// src/toy/drag.rs
//! Pointer-drag math: picking, re-projection onto the ground, throw impulse.

use bevy::prelude::*;

use crate::config::DragSettings;
use crate::planes::PlaneHit;

/// Smallest time window used for the release velocity.
pub const MIN_SAMPLE_DT: f32 = 0.001;

/// Nearest intersection of a ray with a sphere: distance and hit point.
pub fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let mut t = -b - sqrt_disc;
    if t < 0.0 {
        // Origin inside the sphere.
        t = -b + sqrt_disc;
    }
    (t >= 0.0).then(|| (t, origin + dir * t))
}

/// Remove the component of `v` along `normal`.
fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize_or_zero();
    v - n * v.dot(n)
}

/// Where a dragged object should sit this frame.
///
/// With a plane hit the object rests on that plane; otherwise the pointer ray
/// is intersected with a horizontal plane at `fallback_y`. The lateral part of
/// the grab offset is preserved either way.
pub fn drag_target(
    hit: Option<&PlaneHit>,
    ray_origin: Vec3,
    ray_direction: Vec3,
    fallback_y: f32,
    half_height: f32,
    grab_offset: Vec3,
) -> Option<Vec3> {
    if let Some(hit) = hit {
        let up = hit.up();
        return Some(hit.position + up * half_height + project_on_plane(grab_offset, up));
    }

    let dir = ray_direction.normalize_or_zero();
    if dir.y.abs() < f32::EPSILON {
        return None;
    }
    let t = (fallback_y - ray_origin.y) / dir.y;
    if t <= 0.0 {
        return None;
    }
    let mut p = ray_origin + dir * t;
    p.y = fallback_y + half_height;
    Some(p + project_on_plane(grab_offset, Vec3::Y))
}

/// Convert a screen-space release velocity (pixels/s, y down) into a launch
/// velocity in world space.
pub fn throw_velocity(
    screen_velocity: Vec2,
    camera_forward: Vec3,
    camera_right: Vec3,
    settings: &DragSettings,
) -> Vec3 {
    let forward = project_on_plane(camera_forward, Vec3::Y).normalize_or_zero();
    let right = project_on_plane(camera_right, Vec3::Y).normalize_or_zero();

    let dir2d = screen_velocity.normalize_or_zero();
    // Screen y grows downwards, so an upward swipe throws away from the camera.
    let mut world_dir = (forward * (-dir2d.y).clamp(-1.0, 1.0) + right * dir2d.x.clamp(-1.0, 1.0))
        .normalize_or_zero();
    if world_dir.length_squared() < 1e-4 {
        world_dir = forward;
    }

    let min_v = settings.throw_min_screen_velocity;
    let t = if min_v > 0.0 {
        ((screen_velocity.length() - min_v) / (min_v * 2.0)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let force = settings.min_throw_force + (settings.max_throw_force - settings.min_throw_force) * t;

    let mut velocity = world_dir * force;
    velocity.y += force * settings.upward_force_ratio;
    velocity
}

/// Pointer samples older than this, relative to the newest one, no longer
/// count towards the release velocity.
pub const VELOCITY_WINDOW: f32 = 0.1;

/// Recent pointer samples, newest last, covering at most `VELOCITY_WINDOW`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerSamples {
    samples: Vec<(Vec2, f32)>,
}

impl PointerSamples {
    pub fn reset(&mut self, position: Vec2, time: f32) {
        self.samples.clear();
        self.samples.push((position, time));
    }

    pub fn push(&mut self, position: Vec2, time: f32) {
        match self.samples.last_mut() {
            // same frame: keep the newer position only
            Some(last) if time <= last.1 => last.0 = position,
            _ => self.samples.push((position, time)),
        }
        let cutoff = time - VELOCITY_WINDOW;
        self.samples.retain(|&(_, t)| t >= cutoff);
    }

    /// Pixels per second across the retained window.
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(first, t0)), Some(&(last, t1))) = (self.samples.first(), self.samples.last()) else {
            return Vec2::ZERO;
        };
        (last - first) / (t1 - t0).max(MIN_SAMPLE_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_front_face() {
        let (t, p) = ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!(ray_sphere(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::ZERO, 1.0).is_none());
        assert!(ray_sphere(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn plane_hit_keeps_lateral_offset_and_rests_on_plane() {
        let hit = PlaneHit {
            plane: Entity::from_raw(1),
            position: Vec3::new(1.0, 0.5, 1.0),
            rotation: Quat::IDENTITY,
            distance: 2.0,
        };
        let offset = Vec3::new(0.02, 0.3, -0.01);
        let p = drag_target(Some(&hit), Vec3::ZERO, Vec3::NEG_Y, 0.0, 0.05, offset).unwrap();
        assert!((p - Vec3::new(1.02, 0.55, 0.99)).length() < 1e-5);
    }

    #[test]
    fn fallback_projects_onto_last_height() {
        let origin = Vec3::new(0.0, 2.0, 0.0);
        let dir = Vec3::new(1.0, -1.0, 0.0);
        let p = drag_target(None, origin, dir, 0.5, 0.05, Vec3::ZERO).unwrap();
        assert!((p - Vec3::new(1.5, 0.55, 0.0)).length() < 1e-5);

        // Looking up, away from the ground reference.
        assert!(drag_target(None, origin, Vec3::Y, 0.5, 0.05, Vec3::ZERO).is_none());
    }

    #[test]
    fn sideways_swipe_throws_sideways_and_up() {
        let s = DragSettings::default();
        let v = throw_velocity(Vec2::new(1500.0, 0.0), Vec3::NEG_Z, Vec3::X, &s);
        assert!(v.x > 0.0);
        assert!(v.z.abs() < 1e-5);
        assert!(v.y > 0.0);
    }

    #[test]
    fn upward_swipe_throws_away_from_camera() {
        let s = DragSettings::default();
        let v = throw_velocity(Vec2::new(0.0, -1500.0), Vec3::NEG_Z, Vec3::X, &s);
        assert!(v.z < 0.0);
        assert!(v.x.abs() < 1e-5);
    }

    #[test]
    fn force_scales_between_min_and_max() {
        let s = DragSettings::default();
        let slow = throw_velocity(Vec2::new(s.throw_min_screen_velocity, 0.0), Vec3::NEG_Z, Vec3::X, &s);
        let fast = throw_velocity(Vec2::new(s.throw_min_screen_velocity * 10.0, 0.0), Vec3::NEG_Z, Vec3::X, &s);
        assert!((slow.x - s.min_throw_force).abs() < 1e-4);
        assert!((fast.x - s.max_throw_force).abs() < 1e-4);
        assert!((fast.y - s.max_throw_force * s.upward_force_ratio).abs() < 1e-4);
    }

    #[test]
    fn pointer_velocity_uses_recent_window() {
        let mut samples = PointerSamples::default();
        samples.reset(Vec2::ZERO, 1.0);
        samples.push(Vec2::new(10.0, 0.0), 1.1);
        samples.push(Vec2::new(30.0, 0.0), 1.12);
        // the first sample fell out of the window
        assert!((samples.velocity().x - 1000.0).abs() < 1.0);

        samples.reset(Vec2::new(5.0, 5.0), 2.0);
        assert_eq!(samples.velocity(), Vec2::ZERO);
    }

    #[test]
    fn holding_still_before_release_has_no_velocity() {
        let mut samples = PointerSamples::default();
        samples.reset(Vec2::new(100.0, 300.0), 0.0);
        samples.push(Vec2::new(160.0, 300.0), 0.016);
        for frame in 2..120 {
            samples.push(Vec2::new(160.0, 300.0), frame as f32 * 0.016);
        }
        assert_eq!(samples.velocity(), Vec2::ZERO);

        // no held-frame samples at all, only the release long after the flick
        samples.reset(Vec2::new(100.0, 300.0), 0.0);
        samples.push(Vec2::new(160.0, 300.0), 0.016);
        samples.push(Vec2::new(160.0, 300.0), 2.0);
        assert_eq!(samples.velocity(), Vec2::ZERO);
    }

    #[test]
    fn same_frame_sample_keeps_the_flick() {
        let mut samples = PointerSamples::default();
        samples.reset(Vec2::new(100.0, 300.0), 0.0);
        samples.push(Vec2::new(130.0, 300.0), 0.016);
        samples.push(Vec2::new(160.0, 300.0), 0.032);
        // release reported in the same frame as the last move
        samples.push(Vec2::new(160.0, 300.0), 0.032);
        assert!((samples.velocity().x - 1875.0).abs() < 1.0);
    }
}
