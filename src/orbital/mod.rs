//! Orbit loop
//!
//! Every frame the clock allows, each orbiting body advances along its circle
//! and spins a fixed amount about its own axis. Rendering and camera damping
//! are left to Bevy and the orbit camera plugin.

use bevy::prelude::*;

pub mod clock;
pub mod state;

pub use clock::{ClockMode, OrbitClock, orbit_clock_controls, stop_clock_on_exit};
pub use state::{ORBIT_SPEED_CONSTANT, OrbitState, SPIN_PER_FRAME};

/// Plugin for the per-frame orbit update
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitClock>()
            .add_systems(
                Update,
                (orbit_clock_controls, stop_clock_on_exit, advance_orbits).chain(),
            );
    }
}

/// Move every orbiting body one frame along its path
pub fn advance_orbits(
    mut clock: ResMut<OrbitClock>,
    mut bodies: Query<(&mut OrbitState, &mut Transform)>,
) {
    if !clock.tick() {
        return;
    }

    for (mut orbit, mut transform) in &mut bodies {
        orbit.advance();
        transform.translation = orbit.position();
        transform.rotate_y(SPIN_PER_FRAME);
    }
}
