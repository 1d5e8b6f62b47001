//! Screen overlay
//!
//! Three bevy_ui layers over the 3D view: the picture of the day (top left,
//! only once it has loaded), the selected body's details (top right) and a
//! status line along the bottom.

use bevy::prelude::*;

pub mod apod;
pub mod info_panel;
pub mod status;

pub use apod::ApodView;

pub(crate) const PANEL_MARGIN: f32 = 20.0;
pub(crate) const PANEL_PADDING: f32 = 20.0;
pub(crate) const PANEL_MAX_WIDTH: f32 = 300.0;
pub(crate) const PANEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.8);

/// Plugin for the overlay panels
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (info_panel::spawn_info_panel, status::spawn_status_line),
        )
        .add_systems(
            Update,
            (
                apod::spawn_apod_panel,
                info_panel::update_info_panel,
                status::update_status_line,
            ),
        );
    }
}
