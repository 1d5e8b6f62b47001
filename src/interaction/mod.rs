//! Mouse interaction
//!
//! Clicking a planet shows its details in the info panel. Bevy's mesh and UI
//! picking backends resolve each click to the nearest hit entity.

use bevy::prelude::*;

pub mod info;
pub mod systems;

pub use info::{BodyInfoView, InfoPanelState};

/// Marker for the orbit camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for body selection
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InfoPanelState>()
            .add_systems(Update, systems::handle_body_clicks);
    }
}
