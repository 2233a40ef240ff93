use bevy::prelude::*;

/// A recognised flat surface. The plane is the local XZ plane of the
/// entity's transform, bounded by `half_extents` (x, z).
#[derive(Component, Clone, Copy, Debug)]
pub struct DetectedPlane {
    pub half_extents: Vec2,
}

/// World-space snapshot of one plane, detached from the ECS so ray casts
/// stay plain functions.
#[derive(Clone, Copy, Debug)]
pub struct PlaneSample {
    pub entity: Entity,
    pub center: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec2,
}

impl PlaneSample {
    pub fn new(entity: Entity, transform: &GlobalTransform, plane: &DetectedPlane) -> Self {
        let (_, rotation, center) = transform.to_scale_rotation_translation();
        Self {
            entity,
            center,
            rotation,
            half_extents: plane.half_extents,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// True if `point` (already on the plane) lies inside the plane's polygon.
    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.rotation.inverse() * (point - self.center);
        local.x.abs() <= self.half_extents.x && local.z.abs() <= self.half_extents.y
    }
}

/// Ray/plane intersection result: a pose on a detected plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneHit {
    pub plane: Entity,
    pub position: Vec3,
    pub rotation: Quat,
    /// Distance along the ray.
    pub distance: f32,
}

impl PlaneHit {
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}
