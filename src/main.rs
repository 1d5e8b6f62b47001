use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;
#[cfg(feature = "dev_camera")]
use bevy_camera_controller::free_camera::{FreeCamera, FreeCameraPlugin};

mod bodies;
mod interaction;
mod nasa;
mod orbital;
mod scene;
mod ui;

use bodies::BodiesPlugin;
use interaction::{InteractionPlugin, MainCamera};
use nasa::NasaPlugin;
use orbital::OrbitalPlugin;
use scene::ScenePlugin;
use ui::UiPlugin;

const CAMERA_START: Vec3 = Vec3::new(0.0, 20.0, 50.0);
const CAMERA_FOV_DEGREES: f32 = 75.0;
// Far enough to keep the whole starfield cube in view when zoomed out
const CAMERA_FAR: f32 = 4_000.0;

#[cfg(feature = "dev_camera")]
#[derive(Component)]
struct DevCamera;

pub fn setup_camera(mut commands: Commands) {
    // Radius, yaw and pitch are derived from the transform
    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        zoom_lower_limit: 8.0,
        zoom_upper_limit: Some(600.0),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: 0.1,
            far: CAMERA_FAR,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

#[cfg(feature = "dev_camera")]
fn setup_dev_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 0.1,
            far: CAMERA_FAR,
            ..default()
        }),
        Camera {
            order: 2,
            is_active: false,
            ..default()
        },
        FreeCamera::default(),
        DevCamera,
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

#[cfg(feature = "dev_camera")]
fn toggle_dev_camera(
    input: Res<ButtonInput<KeyCode>>,
    mut main_camera: Query<&mut Camera, (With<MainCamera>, Without<DevCamera>)>,
    mut dev_camera: Query<&mut Camera, With<DevCamera>>,
) {
    if !input.just_pressed(KeyCode::F2) {
        return;
    }

    if let Ok(mut main) = main_camera.single_mut()
        && let Ok(mut dev) = dev_camera.single_mut()
    {
        let dev_active = dev.is_active;
        dev.is_active = !dev_active;
        main.is_active = dev_active;
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Bevy Solar System".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings { ..default() }),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    #[cfg(feature = "dev_camera")]
    {
        app.add_plugins(FreeCameraPlugin);
        app.add_systems(Startup, setup_dev_camera);
        app.add_systems(Update, toggle_dev_camera);
    }

    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    app.add_plugins(BodiesPlugin);
    app.add_plugins(ScenePlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(InteractionPlugin);
    app.add_plugins(NasaPlugin);
    app.add_plugins(UiPlugin);
    app.add_systems(Startup, setup_camera);

    app.run();
}
