//! Seams for host applications that want to mirror an assembly.
//!
//! The builder never needs a host: it tessellates templates itself and
//! produces plain buffers. A scene editor or renderer that keeps its own
//! objects and shaders can implement these traits and replay the result.

use crate::material::MaterialSpec;
use crate::mesh::{Face, MeshBuffer};
use crate::part::{PartCollection, PartSource};
use crate::primitives::Primitive;
use crate::transform::Transform;
use glam::Vec3;

/// Creates scene objects on behalf of the assembler.
pub trait PrimitiveHost {
    /// Host-side object identity.
    type Object;

    /// Create a primitive of `kind` placed at `transform`.
    fn create_primitive(&mut self, kind: &Primitive, transform: &Transform) -> Self::Object;

    /// Create an object from literal geometry placed at `transform`.
    fn create_mesh(&mut self, vertices: &[Vec3], faces: &[Face], transform: &Transform)
    -> Self::Object;
}

/// Turns a semantic material description into something renderable.
pub trait MaterialHost {
    /// Host-side shader or material identity.
    type Shader;

    /// Realize one material; called once per material slot.
    fn realize(&mut self, spec: &MaterialSpec) -> Self::Shader;
}

/// Replays every part of a collection through a host, in order.
///
/// Template parts go through [`PrimitiveHost::create_primitive`] so the host
/// can use its own tessellation; explicit parts pass their literal geometry.
pub fn replay<H: PrimitiveHost>(parts: &PartCollection, host: &mut H) -> Vec<H::Object> {
    parts
        .iter()
        .map(|part| match &part.source {
            PartSource::Template(kind) => host.create_primitive(kind, &part.transform),
            PartSource::Explicit => {
                let MeshBuffer { vertices, faces } = &part.mesh;
                host.create_mesh(vertices, faces, &part.transform)
            }
        })
        .collect()
}
