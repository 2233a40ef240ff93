use bevy::prelude::*;
use crate::input::CameraOrbit;
use crate::planes::DetectedPlane;
use crate::spawn::{PropPrefabs, PropVisual};

#[derive(Component)]
pub struct MainCamera;

/// Floor and table stand in for the planes an AR session would detect.
const DEMO_PLANES: [(Vec3, Vec2); 2] = [
    (Vec3::ZERO, Vec2::new(2.0, 2.0)),
    (Vec3::new(1.2, 0.7, -0.8), Vec2::new(0.5, 0.35)),
];

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // 1) Light
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 2.0),
    ));

    // 2) Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.5, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        CameraOrbit {
            focus: Vec3::ZERO,
            radius: 3.0,
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.5,
        },
    ));

    // 3) Detected planes
    let plane_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.3, 0.6, 0.9, 0.35),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    for (center, half) in DEMO_PLANES {
        commands.spawn((
            Name::new("DetectedPlane"),
            Mesh3d(meshes.add(Plane3d::default().mesh().size(half.x * 2.0, half.y * 2.0))),
            MeshMaterial3d(plane_material.clone()),
            Transform::from_translation(center),
            DetectedPlane { half_extents: half },
        ));
    }
    info!("Setup: {} demo planes detected", DEMO_PLANES.len());

    // 4) Prop prefabs
    commands.insert_resource(PropPrefabs {
        cat: Some(PropVisual {
            mesh: meshes.add(Capsule3d::new(0.06, 0.12)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(230, 150, 60),
                ..default()
            }),
            half_height: 0.12,
        }),
        food: Some(PropVisual {
            mesh: meshes.add(Cylinder::new(0.06, 0.03)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(200, 60, 60),
                ..default()
            }),
            half_height: 0.015,
        }),
        toy: Some(PropVisual {
            mesh: meshes.add(Sphere::new(0.05)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(124, 144, 255),
                ..default()
            }),
            half_height: 0.05,
        }),
    });
}
