//! Consolidation of a part collection into one mesh.
//!
//! Merging is a flat concatenation: each part's vertices are moved into
//! assembly space and appended, its faces are re-indexed by the running vertex
//! offset, and every face is tagged with a material slot. Slots are assigned
//! per material handle in first-seen order. A final transform is then applied
//! to every vertex of the result.

use crate::error::{AssemblyError, Result};
use crate::host::MaterialHost;
use crate::material::{MaterialHandle, MaterialRegistry, MaterialSpec};
use crate::mesh::{MeshBuffer, Vertex3d};
use crate::part::PartCollection;
use crate::transform::Transform;
use glam::Vec3;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use tracing::{debug, info, instrument};

/// Where one part ended up inside the merged buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartSpan {
    /// Part name.
    pub name: String,
    /// Vertex index range in the merged mesh.
    pub vertices: Range<usize>,
    /// Face index range in the merged mesh.
    pub faces: Range<usize>,
    /// Material slot of every face in the range.
    pub slot: u32,
}

/// The single output of an assembly build.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledMesh {
    /// Unified geometry, already in the final frame.
    pub mesh: MeshBuffer,
    /// Material slot index per face; same length as `mesh.faces`.
    pub face_materials: Vec<u32>,
    /// Distinct materials in first-seen order.
    pub materials: Vec<MaterialSpec>,
    /// Part placement inside the merged buffers, in merge order.
    pub parts: Vec<PartSpan>,
    /// Transform that was applied to every vertex after concatenation.
    pub transform: Transform,
}

/// Concatenates every part into one mesh.
///
/// Fails when a part's mesh breaks the face-index invariant, or when a part
/// carries a handle that `registry` did not issue.
#[instrument(skip_all, fields(parts = parts.len()))]
pub fn merge(
    parts: &PartCollection,
    registry: &MaterialRegistry,
    final_transform: &Transform,
) -> Result<AssembledMesh> {
    let mut mesh = MeshBuffer {
        vertices: Vec::with_capacity(parts.vertex_count()),
        faces: Vec::with_capacity(parts.face_count()),
    };
    let mut face_materials = Vec::with_capacity(parts.face_count());
    let mut materials = Vec::new();
    let mut slots: HashMap<MaterialHandle, u32> = HashMap::new();
    let mut spans = Vec::with_capacity(parts.len());

    for part in parts {
        part.mesh.validate().map_err(|err| match err {
            AssemblyError::InvalidTopology(msg) => {
                AssemblyError::InvalidTopology(format!("part `{}`: {msg}", part.name))
            }
            other => other,
        })?;

        let slot = match slots.get(&part.material) {
            Some(&slot) => slot,
            None => {
                let spec = registry.get(part.material).ok_or_else(|| {
                    AssemblyError::InvalidTopology(format!(
                        "part `{}` uses material handle {} which is not registered",
                        part.name,
                        part.material.index()
                    ))
                })?;
                let slot = materials.len() as u32;
                materials.push(spec.clone());
                slots.insert(part.material, slot);
                slot
            }
        };

        let first_face = mesh.faces.len();
        let base = mesh.append(&part.world_mesh()) as usize;
        face_materials.resize(mesh.faces.len(), slot);

        debug!(part = %part.name, base, slot, "merged part");
        spans.push(PartSpan {
            name: part.name.clone(),
            vertices: base..mesh.vertices.len(),
            faces: first_face..mesh.faces.len(),
            slot,
        });
    }

    mesh.transform(final_transform);

    let assembled = AssembledMesh {
        mesh,
        face_materials,
        materials,
        parts: spans,
        transform: *final_transform,
    };
    info!(
        vertices = assembled.vertex_count(),
        faces = assembled.face_count(),
        materials = assembled.materials.len(),
        "assembly merged"
    );
    Ok(assembled)
}

impl AssembledMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Number of polygons.
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Number of triangles after fan triangulation.
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Axis-aligned bounds of the final geometry.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.mesh.bounds()
    }

    /// Looks up a material slot by material name.
    pub fn slot_of(&self, name: &str) -> Option<u32> {
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(|i| i as u32)
    }

    /// The span of the first part with this name.
    pub fn part(&self, name: &str) -> Option<&PartSpan> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Flat-shaded triangle soup for a GPU vertex buffer.
    ///
    /// Every triangle gets its own three vertices carrying the face normal and
    /// the face's material slot, so the index list is simply `0..n`.
    pub fn vertex_buffer(&self) -> (Vec<Vertex3d>, Vec<u32>) {
        let mut vertices = Vec::with_capacity(self.triangle_count() * 3);

        for (face, &slot) in self.mesh.faces.iter().zip(&self.face_materials) {
            let normal = self.mesh.face_normal(face).to_array();
            for tri in face.triangles() {
                for i in tri {
                    let position = self.mesh.vertices[i as usize].to_array();
                    vertices.push(Vertex3d::new(position, normal, slot));
                }
            }
        }

        let indices = (0..vertices.len() as u32).collect();
        (vertices, indices)
    }

    /// Realizes each material slot through a host, in slot order.
    pub fn realize_materials<H: MaterialHost>(&self, host: &mut H) -> Vec<H::Shader> {
        self.materials.iter().map(|spec| host.realize(spec)).collect()
    }

    /// Counts and bounds, suitable for logging.
    pub fn summary(&self) -> AssemblySummary {
        let (min, max) = self.bounds();
        AssemblySummary {
            parts: self.parts.len(),
            vertices: self.vertex_count(),
            faces: self.face_count(),
            triangles: self.triangle_count(),
            materials: self.materials.iter().map(|m| m.name.clone()).collect(),
            min,
            max,
        }
    }
}

/// Headline numbers for an [`AssembledMesh`].
#[derive(Clone, Debug, PartialEq)]
pub struct AssemblySummary {
    /// Number of merged parts.
    pub parts: usize,
    /// Total vertex count.
    pub vertices: usize,
    /// Total polygon count.
    pub faces: usize,
    /// Polygon count after fan triangulation.
    pub triangles: usize,
    /// Material names in slot order.
    pub materials: Vec<String>,
    /// Lower corner of the bounding box.
    pub min: Vec3,
    /// Upper corner of the bounding box.
    pub max: Vec3,
}

impl fmt::Display for AssemblySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "parts:     {}", self.parts)?;
        writeln!(f, "vertices:  {}", self.vertices)?;
        writeln!(f, "faces:     {} ({} triangles)", self.faces, self.triangles)?;
        writeln!(f, "materials: {}", self.materials.join(", "))?;
        write!(
            f,
            "bounds:    [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}
