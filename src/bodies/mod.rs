//! Celestial body data
//!
//! This module holds the authored body table and the registry resource used
//! by the scene builder and the info panel to look bodies up by name.

use bevy::prelude::*;

pub mod catalog;
pub mod registry;
pub mod types;

pub use registry::BodyRegistry;
pub use types::{Body, BodyDescriptor, BodyFacts, CentralBody};

/// Plugin that installs the body registry
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, setup_body_registry);
    }
}

fn setup_body_registry(mut commands: Commands) {
    match BodyRegistry::from_descriptors(catalog::PLANETS) {
        Ok(registry) => {
            info!("[INIT] Body registry loaded with {} bodies", registry.len());
            commands.insert_resource(registry);
        }
        Err(err) => error!("[INIT] Body catalog rejected: {err:#}"),
    }
}
