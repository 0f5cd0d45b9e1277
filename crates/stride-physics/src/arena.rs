//! Arena files: static level geometry plus the player rig, in TOML
//!
//! ```toml
//! [arena]
//! name = "yard"
//!
//! [player]
//! position = [0.0, 0.0, 0.0]
//! shape = { radius = 0.5, height = 2.0 }
//! camera = { height = 1.6 }
//!
//! [[solids]]
//! name = "floor"
//! position = [0.0, -0.5, 0.0]
//! size = [40.0, 1.0, 40.0]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use stride_controller::ControllerConfig;
use stride_core::{Result, StrideError};

/// Root structure of an arena TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaFile {
    pub arena: ArenaMetadata,
    /// Missing here is only an error once a character is spawned
    #[serde(default)]
    pub player: Option<PlayerDef>,
    #[serde(default)]
    pub solids: Vec<SolidDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Downward gravity for this arena, overriding the controller config's
    #[serde(default)]
    pub gravity: Option<f32>,
}

/// The player rig: where it spawns, its collision capsule and camera mount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    /// Feet position at spawn
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub shape: Option<CapsuleDef>,
    #[serde(default)]
    pub camera: Option<CameraMount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleDef {
    pub radius: f32,
    /// Total standing height, caps included
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMount {
    /// Head height above the feet while standing
    pub height: f32,
}

/// An axis-aligned static box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidDef {
    #[serde(default)]
    pub name: Option<String>,
    /// Box center
    pub position: [f32; 3],
    /// Full extents
    pub size: [f32; 3],
}

/// Player rig with every reference resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRig {
    pub position: [f32; 3],
    pub shape: CapsuleDef,
    pub camera: CameraMount,
}

impl ArenaFile {
    /// Load an arena from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load an arena from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let arena: Self = toml::from_str(content)?;
        for (index, solid) in arena.solids.iter().enumerate() {
            if solid.size.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
                let name = solid.name.clone().unwrap_or_else(|| format!("solids[{}]", index));
                return Err(StrideError::InvalidConfig(format!(
                    "solid '{}' has a non-positive size {:?}",
                    name, solid.size
                )));
            }
        }
        Ok(arena)
    }

    /// Apply this arena's settings on top of a controller config
    pub fn controller_config(&self, base: ControllerConfig) -> ControllerConfig {
        match self.arena.gravity {
            Some(gravity) => ControllerConfig { gravity, ..base },
            None => base,
        }
    }

    /// Resolve the player rig, failing if any part of it is missing
    pub fn rig(&self) -> Result<ResolvedRig> {
        let player = self
            .player
            .as_ref()
            .ok_or_else(|| StrideError::MissingReference("player".into()))?;
        let shape = player
            .shape
            .ok_or_else(|| StrideError::MissingReference("player.shape".into()))?;
        let camera = player
            .camera
            .ok_or_else(|| StrideError::MissingReference("player.camera".into()))?;

        if !(shape.radius > 0.0 && shape.height > 2.0 * shape.radius) {
            return Err(StrideError::InvalidConfig(format!(
                "player capsule needs height > 2 * radius, got height {} radius {}",
                shape.height, shape.radius
            )));
        }

        Ok(ResolvedRig {
            position: player.position,
            shape,
            camera,
        })
    }
}
