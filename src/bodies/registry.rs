//! Read-only lookup over the authored body table

use anyhow::{Context, Result, bail};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::bodies::types::BodyDescriptor;

/// Name-indexed view over the orbiting bodies, fixed after construction
#[derive(Resource, Debug)]
pub struct BodyRegistry {
    descriptors: Vec<BodyDescriptor>,
    by_name: HashMap<&'static str, usize>,
}

impl BodyRegistry {
    /// Build the registry, rejecting duplicate names and non-positive sizes
    pub fn from_descriptors(descriptors: &[BodyDescriptor]) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(descriptors.len());

        for (idx, desc) in descriptors.iter().enumerate() {
            if !(desc.radius > 0.0) {
                bail!("body {}: radius must be positive, got {}", desc.name, desc.radius);
            }
            if !(desc.distance > 0.0) {
                bail!(
                    "body {}: orbital distance must be positive, got {}",
                    desc.name,
                    desc.distance
                );
            }
            if by_name.insert(desc.name, idx).is_some() {
                bail!("duplicate body name: {}", desc.name);
            }
        }

        Ok(Self {
            descriptors: descriptors.to_vec(),
            by_name,
        })
    }

    /// Look up a body by its exact name
    pub fn get(&self, name: &str) -> Result<&BodyDescriptor> {
        self.by_name
            .get(name)
            .and_then(|idx| self.descriptors.get(*idx))
            .with_context(|| format!("unknown body: {name}"))
    }

    /// All descriptors in authoring order
    pub fn iter(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }
}
