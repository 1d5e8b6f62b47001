//! Body descriptor types and marker components

use bevy::prelude::*;

/// Display-only facts about a body. None of these feed into the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyFacts {
    pub diameter: &'static str,
    pub day_length: &'static str,
    pub year_length: &'static str,
    pub temperature: &'static str,
    pub moons: &'static str,
    pub gravity: &'static str,
}

/// Authored, immutable description of a body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDescriptor {
    pub name: &'static str,
    /// Sphere radius in scene units (not physically scaled)
    pub radius: f32,
    /// Orbit radius in scene units; zero for the central body
    pub distance: f32,
    pub texture_url: &'static str,
    /// sRGB color used until (or instead of) the texture
    pub placeholder_rgb: [f32; 3],
    pub facts: Option<BodyFacts>,
}

impl BodyDescriptor {
    pub fn placeholder_color(&self) -> Color {
        let [r, g, b] = self.placeholder_rgb;
        Color::srgb(r, g, b)
    }
}

/// Component tying a spawned entity back to its registry entry
#[derive(Component, Clone, Debug)]
pub struct Body {
    pub name: &'static str,
}

/// Marker component for the star at the origin
#[derive(Component)]
pub struct CentralBody;
