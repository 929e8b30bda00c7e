//! # Trainyard
//!
//! **Procedural toy locomotives, built from a handful of primitives.**
//!
//! A locomotive is assembled from cylinders, cuboids, planes and one
//! hand-authored wedge. Every part gets its own placement and material, then
//! everything is merged into a single mesh with per-face material slots.
//!
//! ## Quick Start
//!
//! ```
//! use trainyard::*;
//!
//! let loco = build_locomotive_assembly().unwrap();
//!
//! // One slot per distinct material, in the order parts first used them.
//! assert_eq!(loco.materials[0].name, "BodyMaterial");
//! assert_eq!(loco.face_materials.len(), loco.face_count());
//!
//! // Four axles: two per wheel group.
//! assert_eq!(loco.parts.iter().filter(|p| p.name.contains("_axle_")).count(), 4);
//! ```
//!
//! ## Building your own
//!
//! ```
//! use trainyard::*;
//!
//! let mut materials = MaterialRegistry::new();
//! let red = materials.create(MaterialSpec::new("Red", Color::rgb(0.8, 0.1, 0.1))).unwrap();
//!
//! let mut parts = PartCollection::new();
//! let wheel = Primitive::Cylinder { radius: 0.3, depth: 0.1, segments: 16 };
//! parts.push(Part {
//!     name: "wheel".into(),
//!     source: PartSource::Template(wheel),
//!     mesh: wheel.build().unwrap(),
//!     transform: Transform::from_position(Vec3::new(1.0, 0.4, 0.0)).rotate_x(std::f32::consts::FRAC_PI_2),
//!     material: red,
//! });
//!
//! let merged = merge(&parts, &materials, &Transform::new()).unwrap();
//! assert_eq!(merged.face_count(), 16 + 2);
//! ```
//!
//! Tweaking the reference model goes through [`LocomotiveConfig`], which also
//! loads from TOML.

mod assembler;
mod config;
pub mod constants;
mod error;
mod export;
mod host;
mod material;
mod merge;
mod mesh;
mod part;
pub mod primitives;
mod transform;

pub use assembler::{
    Assembly, LocomotiveAssembler, assemble_parts, build_locomotive_assembly,
    build_locomotive_assembly_with,
};
pub use config::{
    BodyConfig, CockpitConfig, ConfigError, CylinderPlacement, LocomotiveConfig, MaterialPalette,
    RingConfig, ShovelConfig, SmokestackConfig, WheelGroupConfig, WindowConfig,
};
pub use error::{AssemblyError, Result};
pub use export::{ExportError, export_to_path, write_mtl, write_obj, write_stl};
pub use host::{MaterialHost, PrimitiveHost, replay};
pub use material::{Color, MaterialHandle, MaterialRegistry, MaterialSpec};
pub use merge::{AssembledMesh, AssemblySummary, PartSpan, merge};
pub use mesh::{Face, MeshBuffer, Vertex3d, from_vertices_and_faces};
pub use part::{Part, PartCollection, PartSource};
pub use primitives::Primitive;
pub use transform::{Axis, AxisRotation, Transform, apply, compose};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec3};
