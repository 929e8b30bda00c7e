//! Locomotive build parameters.
//!
//! [`LocomotiveConfig::default()`] reproduces the reference model exactly.
//! Any subset can be overridden from TOML; omitted keys keep their defaults:
//!
//! ```
//! use trainyard::LocomotiveConfig;
//!
//! let config = LocomotiveConfig::from_toml_str(r#"
//!     segments = 16
//!
//!     [body]
//!     radius = 0.6
//! "#).unwrap();
//! assert_eq!(config.segments, 16);
//! assert_eq!(config.body.radius, 0.6);
//! assert_eq!(config.body.depth, 2.5);
//! ```
//!
//! Positions and sizes are `[x, y, z]` arrays; colors are `[r, g, b]` or
//! `[r, g, b, a]`.

use crate::constants::DEFAULT_SEGMENTS;
use crate::material::{Color, MaterialSpec};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML was malformed or had the wrong shape.
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be written back out.
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Main boiler cylinder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub radius: f32,
    pub depth: f32,
    pub position: Vec3,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            depth: 2.5,
            position: Vec3::new(0.6, 0.0, 0.5),
        }
    }
}

/// Decorative bands around the boiler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub radius: f32,
    pub depth: f32,
    /// X offsets relative to the body position, one ring each.
    pub offsets: Vec<f32>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: 0.525,
            depth: 0.1,
            offsets: vec![-0.7, 0.0, 0.7],
        }
    }
}

/// A plain cylinder with a placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CylinderPlacement {
    pub radius: f32,
    pub depth: f32,
    pub position: Vec3,
}

/// Two-piece smokestack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokestackConfig {
    pub base: CylinderPlacement,
    pub top: CylinderPlacement,
}

impl Default for SmokestackConfig {
    fn default() -> Self {
        Self {
            base: CylinderPlacement {
                radius: 0.08,
                depth: 0.3,
                position: Vec3::new(1.5, 0.0, 0.92),
            },
            top: CylinderPlacement {
                radius: 0.15,
                depth: 0.2,
                position: Vec3::new(1.5, 0.0, 1.17),
            },
        }
    }
}

/// Driver's cab: a unit cube stretched by `scale`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CockpitConfig {
    pub size: f32,
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for CockpitConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            position: Vec3::new(-1.25, 0.0, 0.75),
            scale: Vec3::new(1.2, 1.5, 1.2),
        }
    }
}

/// Cab windows: one front pane and a row of side panes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub size: f32,
    pub front_position: Vec3,
    pub front_scale: Vec3,
    /// X and Y of every side pane; Z comes from `side_heights`.
    pub side_x: f32,
    pub side_y: f32,
    /// One pane per entry. Panes below zero are turned half way round Y.
    pub side_heights: Vec<f32>,
    pub side_scale: Vec3,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            front_position: Vec3::new(-1.65, 0.0, 0.85),
            front_scale: Vec3::new(0.6, 0.8, 1.0),
            side_x: -1.25,
            side_y: 0.0,
            side_heights: vec![0.61, -0.61],
            side_scale: Vec3::new(0.8, 0.4, 1.0),
        }
    }
}

/// A set of wheels sharing one size, plus the axles on the right side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelGroupConfig {
    pub radius: f32,
    pub depth: f32,
    pub axle_radius: f32,
    /// Wheel centres; an axle is added for every centre with `y < 0`.
    pub placements: Vec<Vec3>,
}

impl WheelGroupConfig {
    /// The four small leading wheels.
    pub fn front() -> Self {
        Self {
            radius: 0.3,
            depth: 0.1,
            axle_radius: 0.06,
            placements: vec![
                Vec3::new(1.0, 0.4, -0.37),
                Vec3::new(1.0, -0.4, -0.37),
                Vec3::new(1.7, 0.4, -0.37),
                Vec3::new(1.7, -0.4, -0.37),
            ],
        }
    }

    /// The four large driving wheels.
    pub fn rear() -> Self {
        Self {
            radius: 0.45,
            depth: 0.1,
            axle_radius: 0.09,
            placements: vec![
                Vec3::new(-0.5, 0.4, -0.22),
                Vec3::new(-0.5, -0.4, -0.22),
                Vec3::new(-1.4, 0.4, -0.22),
                Vec3::new(-1.4, -0.4, -0.22),
            ],
        }
    }
}

/// The hand-authored snow plow wedge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShovelConfig {
    pub position: Vec3,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<u32>>,
}

impl Default for ShovelConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.99, 0.0, -0.3),
            vertices: vec![
                Vec3::new(0.0, -0.3, 0.5),
                Vec3::new(0.0, 0.3, 0.5),
                Vec3::new(0.7, 0.43, 0.0),
                Vec3::new(0.0, -0.3, -0.5),
                Vec3::new(0.0, 0.3, -0.5),
            ],
            faces: vec![vec![0, 1, 2], vec![3, 4, 2], vec![0, 3, 2]],
        }
    }
}

/// One material per named role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialPalette {
    pub body: MaterialSpec,
    pub wheel: MaterialSpec,
    pub window: MaterialSpec,
    pub accent: MaterialSpec,
    pub headlight: MaterialSpec,
    pub shovel: MaterialSpec,
}

impl Default for MaterialPalette {
    fn default() -> Self {
        Self {
            body: MaterialSpec::new("BodyMaterial", Color::rgb(0.24, 0.24, 0.24)),
            wheel: MaterialSpec::new("WheelMaterial", Color::rgb(0.1, 0.1, 0.1)),
            window: MaterialSpec::new("WindowMaterial", Color::rgba(0.33, 0.47, 0.53, 0.4)),
            accent: MaterialSpec::new("AccentMaterial", Color::rgb(0.3, 0.3, 0.3)),
            headlight: MaterialSpec::new("HeadlightMaterial", Color::rgba(1.0, 1.0, 0.8, 1.0))
                .metallic(0.5)
                .roughness(0.3),
            shovel: MaterialSpec::new("ShovelMaterial", Color::rgba(0.545, 0.545, 0.545, 1.0)),
        }
    }
}

/// Every tunable of the locomotive build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotiveConfig {
    /// Sides per cylinder.
    pub segments: u32,
    pub body: BodyConfig,
    pub rings: RingConfig,
    pub smokestack: SmokestackConfig,
    pub cockpit: CockpitConfig,
    pub windows: WindowConfig,
    pub headlight: CylinderPlacement,
    pub front_wheels: WheelGroupConfig,
    pub rear_wheels: WheelGroupConfig,
    /// Length of every axle; spans the full width of the vehicle.
    pub axle_depth: f32,
    pub shovel: ShovelConfig,
    pub materials: MaterialPalette,
    /// Translation applied to the merged mesh.
    pub alignment_offset: Vec3,
}

impl Default for LocomotiveConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            body: BodyConfig::default(),
            rings: RingConfig::default(),
            smokestack: SmokestackConfig::default(),
            cockpit: CockpitConfig::default(),
            windows: WindowConfig::default(),
            headlight: CylinderPlacement {
                radius: 0.2,
                depth: 0.12,
                position: Vec3::new(1.83, 0.0, 0.5),
            },
            front_wheels: WheelGroupConfig::front(),
            rear_wheels: WheelGroupConfig::rear(),
            axle_depth: 0.9,
            shovel: ShovelConfig::default(),
            materials: MaterialPalette::default(),
            alignment_offset: Vec3::new(0.0, 0.8, 0.0),
        }
    }
}

impl LocomotiveConfig {
    /// Parses a TOML document; omitted keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serializes the full config, defaults included.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
