// src/planes/raycast.rs

use bevy::prelude::*;

use crate::config::HitSelection;
use super::components::{PlaneHit, PlaneSample};

const PARALLEL_EPS: f32 = 1e-6;

/// Intersect a ray with every plane, keeping only hits inside the plane
/// polygons. Results are sorted nearest first.
pub fn raycast_planes(origin: Vec3, direction: Vec3, planes: &[PlaneSample]) -> Vec<PlaneHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return Vec::new();
    }

    let mut hits: Vec<PlaneHit> = planes
        .iter()
        .filter_map(|plane| {
            let n = plane.normal();
            let denom = dir.dot(n);
            if denom.abs() < PARALLEL_EPS {
                return None;
            }
            let t = (plane.center - origin).dot(n) / denom;
            if t <= 0.0 {
                return None;
            }
            let point = origin + dir * t;
            plane.contains(point).then_some(PlaneHit {
                plane: plane.entity,
                position: point,
                rotation: plane.rotation,
                distance: t,
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Pick one hit according to the spawner's policy.
pub fn select_hit(hits: &[PlaneHit], selection: HitSelection) -> Option<PlaneHit> {
    match selection {
        HitSelection::Nearest => hits.first().copied(),
        HitSelection::Lowest => hits
            .iter()
            .min_by(|a, b| a.position.y.total_cmp(&b.position.y))
            .copied(),
    }
}

/// Height of the highest plane directly below (or at) `position`.
pub fn ground_height_below(position: Vec3, planes: &[PlaneSample]) -> Option<f32> {
    let hits = raycast_planes(position + Vec3::Y * 1e-3, Vec3::NEG_Y, planes);
    hits.first().map(|h| h.position.y)
}
