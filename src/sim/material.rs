//! Paddle surface materials
//!
//! A material is an immutable bundle of coefficients the collision
//! response reads. The table is built once at startup and moved into
//! the match; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

pub const WOOD: &str = "wood";
pub const STEEL: &str = "steel";
pub const RUBBER: &str = "rubber";

/// Surface properties of a paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Multiplier on reflected velocity (> 0)
    pub bounce: f32,
    /// Extra multiplier on reflected velocity (> 0)
    pub power: f32,
    /// Fraction of tangential speed removed on contact, in [0, 1]
    pub friction: f32,
    /// Fire events burn paddles made of this
    pub burnable: bool,
}

impl Material {
    pub fn new(name: &str, bounce: f32, power: f32, friction: f32, burnable: bool) -> Self {
        Self {
            name: name.to_string(),
            bounce,
            power,
            friction,
            burnable,
        }
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason| SimError::InvalidMaterialSpec {
            name: self.name.clone(),
            reason,
        };
        if !(self.bounce.is_finite() && self.bounce > 0.0) {
            return Err(invalid("bounce must be finite and greater than 0"));
        }
        if !(self.power.is_finite() && self.power > 0.0) {
            return Err(invalid("power must be finite and greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(invalid("friction must be within [0, 1]"));
        }
        Ok(())
    }
}

/// Registry of materials, looked up by name. Registration order is kept;
/// the first material is the default for new players.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            materials: vec![
                Material::new(WOOD, 0.95, 1.00, 0.10, true),
                Material::new(STEEL, 1.05, 1.05, 0.02, false),
                Material::new(RUBBER, 1.20, 1.10, 0.05, false),
            ],
        }
    }
}

impl MaterialTable {
    /// Build a table from a list of materials, rejecting bad coefficients,
    /// duplicate names and empty lists.
    pub fn new(materials: Vec<Material>) -> Result<Self> {
        if materials.is_empty() {
            return Err(SimError::EmptyMaterialTable);
        }
        for (i, material) in materials.iter().enumerate() {
            material.validate()?;
            if materials[..i].iter().any(|m| m.name == material.name) {
                return Err(SimError::DuplicateMaterial(material.name.clone()));
            }
        }
        Ok(Self { materials })
    }

    /// Parse a JSON array of materials
    pub fn from_json(json: &str) -> Result<Self> {
        let materials: Vec<Material> = serde_json::from_str(json)?;
        Self::new(materials)
    }

    pub fn get(&self, name: &str) -> Result<&Material> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| SimError::InvalidMaterial(name.to_string()))
    }

    /// Material new players start with
    pub fn default_material(&self) -> &Material {
        // Construction guarantees at least one entry
        &self.materials[0]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
