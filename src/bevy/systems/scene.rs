//! Scene setup system
//!
//! This module handles the initial setup of the 3D scene: the offscreen
//! camera, the procedural island and its lights.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::{
        primitives::{Cone, Cylinder, Sphere},
        Quat, Vec3,
    },
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::config::{camera, island::INITIAL_YAW, RENDER_HEIGHT, RENDER_WIDTH};
use crate::bevy::components::{Island, IslandOrientation, IslandRotation, OffscreenCamera};
use crate::bevy::plugins::image_copy::ImageCopier;
use crate::bevy::resources::RenderTargetHandle;

/// Tree positions on the island top as (x, z, scale)
const TREES: [(f32, f32, f32); 6] = [
    (1.6, 0.9, 1.0),
    (-1.2, 1.8, 0.8),
    (-2.1, -0.6, 1.2),
    (0.4, -2.2, 0.9),
    (2.4, -1.3, 0.7),
    (-0.3, 0.2, 1.4),
];

/// Setup the 3D scene with camera, island, and lights
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
) {
    info!("[Bevy] Setting up scene...");

    let size = Extent3d {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        depth_or_array_layers: 1,
    };

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    commands.insert_resource(RenderTargetHandle(render_target_image_handle.clone()));

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    let target = Vec3::from_array(camera::TARGET);

    // Fixed camera; the island turns instead
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(render_target_image_handle.into()),
            clear_color: ClearColorConfig::Custom(Color::srgb(0.53, 0.78, 0.92)),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: camera::FOV_DEGREES.to_radians(),
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(Vec3::from_array(camera::POSITION)).looking_at(target, Vec3::Y),
        OffscreenCamera,
    ));

    let rock = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.38, 0.32),
        perceptual_roughness: 0.95,
        ..default()
    });
    let sand = materials.add(StandardMaterial {
        base_color: Color::srgb(0.93, 0.84, 0.62),
        perceptual_roughness: 0.9,
        ..default()
    });
    let grass = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.62, 0.28),
        perceptual_roughness: 0.85,
        ..default()
    });
    let bark = materials.add(StandardMaterial {
        base_color: Color::srgb(0.42, 0.27, 0.16),
        ..default()
    });
    let leaves = materials.add(StandardMaterial {
        base_color: Color::srgb(0.16, 0.45, 0.22),
        perceptual_roughness: 0.8,
        ..default()
    });

    let trunk_mesh = meshes.add(Cylinder::new(0.12, 0.8));
    let crown_mesh = meshes.add(Cone {
        radius: 0.55,
        height: 1.3,
    });

    // Island root carries the controller; meshes turn with it
    commands
        .spawn((
            Island,
            IslandOrientation::new(INITIAL_YAW),
            IslandRotation::default(),
            Transform::from_translation(target)
                .with_rotation(Quat::from_rotation_y(INITIAL_YAW as f32)),
            Visibility::default(),
        ))
        .with_children(|island| {
            // Rock base
            island.spawn((
                Mesh3d(meshes.add(Cylinder::new(3.6, 1.6))),
                MeshMaterial3d(rock.clone()),
                Transform::from_xyz(0.0, -0.8, 0.0),
            ));

            // Beach ring
            island.spawn((
                Mesh3d(meshes.add(Cylinder::new(4.0, 0.3))),
                MeshMaterial3d(sand.clone()),
                Transform::from_xyz(0.0, 0.1, 0.0),
            ));

            // Grass top
            island.spawn((
                Mesh3d(meshes.add(Cylinder::new(3.3, 0.3))),
                MeshMaterial3d(grass.clone()),
                Transform::from_xyz(0.0, 0.3, 0.0),
            ));

            // Hill, flattened sphere off-center so the rotation reads
            island.spawn((
                Mesh3d(meshes.add(Sphere::new(1.4))),
                MeshMaterial3d(grass.clone()),
                Transform::from_xyz(-1.0, 0.4, -0.8).with_scale(Vec3::new(1.0, 0.6, 1.0)),
            ));

            for (x, z, scale) in TREES {
                island.spawn((
                    Mesh3d(trunk_mesh.clone()),
                    MeshMaterial3d(bark.clone()),
                    Transform::from_xyz(x, 0.85, z).with_scale(Vec3::splat(scale)),
                ));
                island.spawn((
                    Mesh3d(crown_mesh.clone()),
                    MeshMaterial3d(leaves.clone()),
                    Transform::from_xyz(x, 0.85 + 0.9 * scale, z).with_scale(Vec3::splat(scale)),
                ));
            }
        });

    // Sun
    commands.spawn((
        DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(bevy::math::EulerRot::XYZ, -0.8, 0.5, 0.0)),
    ));

    // Warm fill light
    commands.spawn((
        PointLight {
            intensity: 1_500_000.0,
            color: Color::srgb(1.0, 0.92, 0.8),
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 6.0),
    ));

    info!("[Bevy] Scene setup complete!");
}
