//! Body, orbit ring and light spawning

use bevy::light::GlobalAmbientLight;
use bevy::picking::Pickable;
use bevy::picking::mesh_picking::ray_cast::RayCastBackfaces;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::bodies::catalog::SUN;
use crate::bodies::{Body, BodyDescriptor, BodyRegistry, CentralBody};
use crate::orbital::OrbitState;
use crate::scene::SceneConfig;
use crate::scene::textures::{TextureChannels, TextureTarget};

/// Flat ring in the XZ plane tracing a planet's orbit
#[derive(Component, Clone, Copy, Debug)]
pub struct OrbitRing {
    pub inner: f32,
    pub outer: f32,
}

impl OrbitRing {
    pub fn around(distance: f32, half_width: f32) -> Self {
        Self {
            inner: (distance - half_width).max(0.0),
            outer: distance + half_width,
        }
    }
}

fn sphere_mesh(desc: &BodyDescriptor, config: &SceneConfig) -> Mesh {
    Sphere::new(desc.radius)
        .mesh()
        .uv(config.sphere_sectors, config.sphere_stacks)
}

fn request_body_texture(
    textures: Option<&TextureChannels>,
    entity: Entity,
    desc: &BodyDescriptor,
) {
    match textures {
        Some(channels) => channels.request(TextureTarget::BodyMaterial(entity), desc.texture_url),
        None => warn!("[TEXTURE] no texture worker, {} keeps its placeholder", desc.name),
    }
}

pub fn spawn_central_body(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    textures: Option<Res<TextureChannels>>,
) {
    let sun = commands
        .spawn((
            Mesh3d(meshes.add(sphere_mesh(&SUN, &config))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: SUN.placeholder_color(),
                unlit: true,
                ..default()
            })),
            Transform::IDENTITY,
            CentralBody,
            Name::new(SUN.name),
        ))
        .id();

    request_body_texture(textures.as_deref(), sun, &SUN);
}

pub fn spawn_planets(
    mut commands: Commands,
    config: Res<SceneConfig>,
    registry: Option<Res<BodyRegistry>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    textures: Option<Res<TextureChannels>>,
) {
    let Some(registry) = registry else {
        warn!("[INIT] No body registry, skipping planets");
        return;
    };

    // All rings share one material
    let ring_material = materials.add(StandardMaterial {
        base_color: config.ring_color,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    for desc in registry.iter() {
        let planet = commands
            .spawn((
                Mesh3d(meshes.add(sphere_mesh(desc, &config))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: desc.placeholder_color(),
                    perceptual_roughness: 0.9,
                    ..default()
                })),
                Transform::from_xyz(desc.distance, 0.0, 0.0),
                Body { name: desc.name },
                OrbitState::new(desc.distance),
                Name::new(desc.name),
            ))
            .id();
        request_body_texture(textures.as_deref(), planet, desc);

        let ring = OrbitRing::around(desc.distance, config.ring_half_width);
        let ring_mesh = Annulus::new(ring.inner, ring.outer)
            .mesh()
            .resolution(config.ring_segments);
        commands.spawn((
            Mesh3d(meshes.add(ring_mesh)),
            MeshMaterial3d(ring_material.clone()),
            // Annulus meshes face +Z; lay them flat in the orbit plane
            Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ring,
            // Rings block clicks from above and below
            Pickable::default(),
            RayCastBackfaces,
            Name::new(format!("{} orbit", desc.name)),
        ));
    }

    info!("[INIT] Spawned {} planets with orbit rings", registry.len());
}

pub fn spawn_lighting(mut commands: Commands, config: Res<SceneConfig>) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: config.ambient_brightness,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: config.sun_light_intensity,
            range: config.sun_light_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::IDENTITY,
        Name::new("Sun light"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::catalog::PLANETS;
    use crate::scene::textures::TextureRequest;
    use std::sync::mpsc::{self, Receiver};
    use std::sync::{Arc, Mutex};

    fn scene_app(with_textures: bool) -> (App, Option<Receiver<TextureRequest>>) {
        let mut app = App::new();
        app.insert_resource(Assets::<Mesh>::default())
            .insert_resource(Assets::<StandardMaterial>::default())
            .insert_resource(SceneConfig::default())
            .insert_resource(BodyRegistry::from_descriptors(PLANETS).unwrap())
            .add_systems(Startup, (spawn_central_body, spawn_planets, spawn_lighting));

        let rx = with_textures.then(|| {
            let (cmd_tx, cmd_rx) = mpsc::channel();
            let (_res_tx, res_rx) = mpsc::channel();
            app.insert_resource(TextureChannels {
                cmd_tx,
                res_rx: Arc::new(Mutex::new(res_rx)),
            });
            cmd_rx
        });
        (app, rx)
    }

    #[test]
    fn planets_start_on_positive_x() {
        let (mut app, _) = scene_app(false);
        app.update();

        let world = app.world_mut();
        let mut planets: Vec<(String, Vec3)> = world
            .query::<(&Body, &Transform)>()
            .iter(world)
            .map(|(b, t)| (b.name.to_string(), t.translation))
            .collect();
        planets.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));

        assert_eq!(planets.len(), 5);
        assert_eq!(planets[0], ("Mercury".to_string(), Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(planets[4], ("Jupiter".to_string(), Vec3::new(35.0, 0.0, 0.0)));
    }

    #[test]
    fn one_sun_and_ring_per_planet() {
        let (mut app, _) = scene_app(false);
        app.update();

        let world = app.world_mut();
        let suns: Vec<Vec3> = world
            .query_filtered::<&Transform, With<CentralBody>>()
            .iter(world)
            .map(|t| t.translation)
            .collect();
        assert_eq!(suns, vec![Vec3::ZERO]);

        let mut rings: Vec<OrbitRing> = world.query::<&OrbitRing>().iter(world).copied().collect();
        rings.sort_by(|a, b| a.inner.total_cmp(&b.inner));
        assert_eq!(rings.len(), 5);
        assert!((rings[2].inner - 19.9).abs() < 1e-5);
        assert!((rings[2].outer - 20.1).abs() < 1e-5);

        let blocking = world
            .query_filtered::<&Pickable, (With<OrbitRing>, With<RayCastBackfaces>)>()
            .iter(world)
            .filter(|p| p.should_block_lower)
            .count();
        assert_eq!(blocking, 5);
    }

    #[test]
    fn every_body_requests_its_texture() {
        let (mut app, rx) = scene_app(true);
        app.update();

        let urls: Vec<String> = rx.unwrap().try_iter().map(|req| req.url).collect();
        assert_eq!(urls.len(), 6);
        assert!(urls.contains(&SUN.texture_url.to_string()));
        assert!(PLANETS.iter().all(|p| urls.contains(&p.texture_url.to_string())));
    }

    #[test]
    fn missing_registry_still_spawns_sun() {
        let (mut app, _) = scene_app(false);
        app.world_mut().remove_resource::<BodyRegistry>();
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&CentralBody>().iter(world).count(), 1);
        assert_eq!(world.query::<&Body>().iter(world).count(), 0);
    }
}
