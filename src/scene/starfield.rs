//! Background starfield

use bevy::asset::RenderAssetUsages;
use bevy::light::NotShadowCaster;
use bevy::mesh::PrimitiveTopology;
use bevy::picking::Pickable;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scene::SceneConfig;

pub const STAR_COUNT: usize = 5000;
pub const STAR_HALF_EXTENT: f32 = 1000.0;

#[derive(Component)]
pub struct Starfield;

/// Uniform positions inside the cube `[-half_extent, half_extent]^3`.
/// The same seed always yields the same field.
pub fn star_positions(seed: u64, count: usize, half_extent: f32) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let h = half_extent.abs();
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.random_range(-h..=h),
                rng.random_range(-h..=h),
                rng.random_range(-h..=h),
            )
        })
        .collect()
}

pub fn starfield_mesh(positions: Vec<Vec3>) -> Mesh {
    let positions: Vec<[f32; 3]> = positions.into_iter().map(|p| p.to_array()).collect();
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

pub fn spawn_starfield(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let positions = star_positions(config.star_seed, config.star_count, config.star_half_extent);
    let count = positions.len();

    commands.spawn((
        Mesh3d(meshes.add(starfield_mesh(positions))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Starfield,
        NotShadowCaster,
        Pickable::IGNORE,
        Name::new("Starfield"),
    ));

    info!("[INIT] Starfield spawned with {} stars", count);
}
