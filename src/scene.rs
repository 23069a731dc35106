use crate::noise::{NoiseTextures, setup_noise_textures};
use bevy::prelude::*;

/// Spawns a lit scene that shows the generated noise textures.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup.after(setup_noise_textures));
    }
}

fn setup(
    mut commands: Commands,
    noise: Res<NoiseTextures>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-6.0, 4.5, 8.0).looking_at(Vec3::new(0.0, 0.8, 0.0), Vec3::Y),
    ));

    // Sun
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Water plane, tiled with the periodic texture
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(12.0, 12.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.55, 0.8),
            base_color_texture: noise.get("water"),
            perceptual_roughness: 0.2,
            ..default()
        })),
    ));

    // Cup
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(0.6, 1.2))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: noise.get("clouds"),
            ..default()
        })),
        Transform::from_xyz(1.5, 0.6, 0.5),
    ));

    // Building
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.5, 3.0, 1.5))),
        MeshMaterial3d(materials.add(Color::srgb_u8(124, 144, 255))),
        Transform::from_xyz(-1.5, 1.5, -1.0),
    ));
}
