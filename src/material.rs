//! Materials: visual parameter records and the registry that hands out handles.
//!
//! A [`MaterialSpec`] is a semantic description of a surface (color,
//! metallic, roughness). It is never turned into a shader here; that is the
//! job of a [`MaterialHost`](crate::host::MaterialHost).
//!
//! ```
//! use trainyard::{Color, MaterialRegistry, MaterialSpec};
//!
//! let mut registry = MaterialRegistry::new();
//! let steel = registry
//!     .create(MaterialSpec::new("Steel", Color::rgb(0.24, 0.24, 0.24)))
//!     .unwrap();
//! assert_eq!(registry.get(steel).unwrap().name, "Steel");
//! ```

use crate::constants::{DEFAULT_METALLIC, DEFAULT_ROUGHNESS};
use crate::error::{Result, require_unit};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Linear RGBA color, each channel in [0, 1].
///
/// Deserializes from either `[r, g, b]` (alpha 1) or `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Channels as an array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether the color is not fully opaque.
    pub fn is_translucent(&self) -> bool {
        self.a < 1.0
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl TryFrom<Vec<f32>> for Color {
    type Error = String;

    fn try_from(channels: Vec<f32>) -> std::result::Result<Self, Self::Error> {
        match channels.as_slice() {
            &[r, g, b] => Ok(Color::rgb(r, g, b)),
            &[r, g, b, a] => Ok(Color::rgba(r, g, b, a)),
            other => Err(format!(
                "a color needs 3 or 4 channels, got {}",
                other.len()
            )),
        }
    }
}

/// Visual parameters of a surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Human-readable name, carried into exports.
    pub name: String,
    /// Base color; alpha below 1 marks a translucent surface.
    pub color: Color,
    /// 0 = dielectric, 1 = metal.
    #[serde(default = "default_metallic")]
    pub metallic: f32,
    /// 0 = mirror, 1 = fully rough.
    #[serde(default = "default_roughness")]
    pub roughness: f32,
}

fn default_metallic() -> f32 {
    DEFAULT_METALLIC
}

fn default_roughness() -> f32 {
    DEFAULT_ROUGHNESS
}

impl MaterialSpec {
    /// A dielectric, fully rough material.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            metallic: DEFAULT_METALLIC,
            roughness: DEFAULT_ROUGHNESS,
        }
    }

    /// Sets the metallic factor.
    pub fn metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }

    /// Sets the roughness factor.
    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Checks every channel and factor lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        require_unit("color.r", self.color.r)?;
        require_unit("color.g", self.color.g)?;
        require_unit("color.b", self.color.b)?;
        require_unit("color.a", self.color.a)?;
        require_unit("metallic", self.metallic)?;
        require_unit("roughness", self.roughness)?;
        Ok(())
    }
}

/// Type-safe handle to a material stored in a [`MaterialRegistry`].
///
/// Handles compare by identity: two handles to visually identical specs are
/// still different handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(pub(crate) usize);

impl MaterialHandle {
    /// Position of the material in its registry.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only store of material specs.
///
/// No deduplication, no mutation, no removal: a handle stays valid for as
/// long as the registry lives.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<MaterialSpec>,
}

impl MaterialRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a spec, returning its handle.
    pub fn create(&mut self, spec: MaterialSpec) -> Result<MaterialHandle> {
        spec.validate()?;
        let handle = MaterialHandle(self.materials.len());
        debug!(name = %spec.name, index = handle.0, "registered material");
        self.materials.push(spec);
        Ok(handle)
    }

    /// Looks up a spec by handle.
    pub fn get(&self, handle: MaterialHandle) -> Option<&MaterialSpec> {
        self.materials.get(handle.0)
    }

    /// Number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// All specs with their handles, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialHandle, &MaterialSpec)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, spec)| (MaterialHandle(i), spec))
    }
}
