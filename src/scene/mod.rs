//! 3D scene construction
//!
//! Spawns the sun, the planets with their orbit rings, the starfield and the
//! lights, and swaps in remote textures as they finish loading.

use bevy::prelude::*;

pub mod spawn;
pub mod starfield;
pub mod textures;

pub use spawn::OrbitRing;
pub use textures::{TextureChannels, TextureTarget};

/// Scene construction constants
#[derive(Resource, Clone, Debug)]
pub struct SceneConfig {
    pub star_count: usize,
    pub star_half_extent: f32,
    pub star_seed: u64,
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
    pub ring_half_width: f32,
    pub ring_segments: u32,
    pub ring_color: Color,
    pub ambient_brightness: f32,
    pub sun_light_intensity: f32,
    pub sun_light_range: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: starfield::STAR_COUNT,
            star_half_extent: starfield::STAR_HALF_EXTENT,
            star_seed: 0x5014_5157,
            sphere_sectors: 32,
            sphere_stacks: 32,
            ring_half_width: 0.1,
            ring_segments: 64,
            ring_color: Color::srgba(0.4, 0.4, 0.4, 0.3),
            ambient_brightness: 250.0,
            sun_light_intensity: 2_000_000.0,
            sun_light_range: 200.0,
        }
    }
}

/// Plugin that builds the scene and applies loaded textures
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .add_systems(PreStartup, textures::setup_texture_worker)
            .add_systems(
                Startup,
                (
                    spawn::spawn_lighting,
                    spawn::spawn_central_body,
                    spawn::spawn_planets,
                    starfield::spawn_starfield,
                ),
            )
            .add_systems(Update, textures::apply_texture_results);
    }
}
