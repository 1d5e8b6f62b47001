//! NASA open API integration (APOD, NEO feed, image library search).

use bevy::prelude::*;

pub mod client;
pub mod fetcher;
pub mod systems;
pub mod types;

pub use client::NasaClient;
pub use types::{Apod, FeedStatus, NasaConfig, NasaData, NasaFeed, NasaState};

/// Plugin for NASA data management.
pub struct NasaPlugin;

impl Plugin for NasaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NasaConfig>()
            .init_resource::<NasaState>()
            .init_resource::<NasaData>()
            .add_systems(
                Startup,
                (systems::setup_nasa_worker, systems::queue_startup_apod).chain(),
            )
            .add_systems(
                Update,
                (systems::nasa_hotkeys, systems::apply_nasa_results).chain(),
            );
    }
}
