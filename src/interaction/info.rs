//! Selected body and its display text

use bevy::prelude::*;

use crate::bodies::{Body, BodyDescriptor};
use crate::orbital::OrbitState;

/// Which body the info panel shows. Once a body is shown the panel never
/// returns to `Idle`.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InfoPanelState {
    #[default]
    Idle,
    ShowingInfo(&'static str),
}

impl InfoPanelState {
    /// Apply a click. Anything other than a planet changes nothing.
    pub fn on_click(&mut self, clicked: Option<&Body>) {
        if let Some(body) = clicked {
            *self = InfoPanelState::ShowingInfo(body.name);
        }
    }

    pub fn selected(&self) -> Option<&'static str> {
        match self {
            InfoPanelState::Idle => None,
            InfoPanelState::ShowingInfo(name) => Some(*name),
        }
    }
}

/// Text shown for a selected body
#[derive(Clone, Debug, PartialEq)]
pub struct BodyInfoView {
    pub title: String,
    pub orbit_lines: Vec<String>,
    pub detail_lines: Vec<String>,
}

impl BodyInfoView {
    pub fn new(descriptor: &BodyDescriptor, orbit: &OrbitState) -> Self {
        let orbit_lines = vec![
            format!("Distance from Sun: {} units", descriptor.distance),
            format!("Orbital Speed: {:.4}", orbit.speed),
        ];

        let detail_lines = descriptor
            .facts
            .map(|facts| {
                vec![
                    format!("Diameter: {}", facts.diameter),
                    format!("Day Length: {}", facts.day_length),
                    format!("Year Length: {}", facts.year_length),
                    format!("Temperature: {}", facts.temperature),
                    format!("Moons: {}", facts.moons),
                    format!("Gravity: {}", facts.gravity),
                ]
            })
            .unwrap_or_default();

        Self {
            title: descriptor.name.to_string(),
            orbit_lines,
            detail_lines,
        }
    }

    /// Panel body text, orbit lines first then the details block
    pub fn body_text(&self) -> String {
        let mut out = self.orbit_lines.join("\n");
        if !self.detail_lines.is_empty() {
            out.push_str("\n\nPlanet Details\n");
            out.push_str(&self.detail_lines.join("\n"));
        }
        out
    }
}
