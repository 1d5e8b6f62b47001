//! Per-body circular orbit state

use bevy::prelude::*;
use std::f64::consts::TAU;

/// Angular speed numerator: a body at distance `d` advances `k / d` rad per frame
pub const ORBIT_SPEED_CONSTANT: f64 = 0.02;

/// Self-rotation applied to every orbiting body each frame (radians about +Y)
pub const SPIN_PER_FRAME: f32 = 0.01;

/// Runtime orbit of one body: co-planar circle around the origin
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    pub distance: f64,
    /// Current angle in radians, kept in `[0, TAU)`
    pub angle: f64,
    /// Radians advanced per frame
    pub speed: f64,
}

impl OrbitState {
    pub fn new(distance: f32) -> Self {
        Self::with_speed_constant(distance, ORBIT_SPEED_CONSTANT)
    }

    /// Farther bodies move slower: `speed = k / distance`
    pub fn with_speed_constant(distance: f32, k: f64) -> Self {
        let distance = distance as f64;
        Self {
            distance,
            angle: 0.0,
            speed: k / distance,
        }
    }

    /// Advance by one frame
    pub fn advance(&mut self) {
        self.angle = (self.angle + self.speed).rem_euclid(TAU);
    }

    /// Planar position for the current angle; `y` is always zero
    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(
            (self.distance * cos) as f32,
            0.0,
            (self.distance * sin) as f32,
        )
    }
}
