//! Polygon mesh buffers shared by every stage of the assembly.
//!
//! - [`MeshBuffer`]: ordered vertex positions plus N-gon faces indexing them
//! - [`Face`]: one polygon, three or more vertex indices
//! - [`Vertex3d`]: flat `Pod` vertex record for handing triangles to a GPU
//!
//! Primitive templates ([`crate::primitives`]) and the explicit builder
//! ([`MeshBuffer::from_vertices_and_faces`]) both produce a [`MeshBuffer`], so
//! the assembler and the merge step never care where geometry came from.
//!
//! # Winding Order
//!
//! Built-in primitives wind faces counter-clockwise when seen from outside.
//! Hand-authored faces are taken as given.

use crate::error::{AssemblyError, Result};
use crate::transform::Transform;
use glam::Vec3;

/// A single polygon: three or more indices into a vertex list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Face(pub Vec<u32>);

impl Face {
    /// Number of corners.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the face has no indices at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The vertex indices in winding order.
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Fan triangulation around the first corner.
    ///
    /// Valid for the convex planar polygons the templates produce.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let first = self.0.first().copied().unwrap_or_default();
        self.0
            .windows(2)
            .skip(1)
            .map(move |pair| [first, pair[0], pair[1]])
    }

    /// The same face with every index shifted by `base`.
    pub fn offset(&self, base: u32) -> Face {
        Face(self.0.iter().map(|i| i + base).collect())
    }
}

impl From<Vec<u32>> for Face {
    fn from(indices: Vec<u32>) -> Self {
        Face(indices)
    }
}

impl From<&[u32]> for Face {
    fn from(indices: &[u32]) -> Self {
        Face(indices.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Face {
    fn from(indices: [u32; N]) -> Self {
        Face(indices.to_vec())
    }
}

/// Vertex positions and the polygons built on them.
///
/// Invariant: every face index is smaller than `vertices.len()`. Buffers from
/// the templates satisfy it by construction and
/// [`MeshBuffer::from_vertices_and_faces`] checks it for hand-authored data.
/// Planarity and non-degeneracy are the author's responsibility.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions; a vertex's index is its identity.
    pub vertices: Vec<Vec3>,
    /// Polygons referencing `vertices`.
    pub faces: Vec<Face>,
}

impl MeshBuffer {
    /// Wraps buffers that are already known to be well formed.
    pub(crate) fn new_unchecked(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        debug_assert!(
            faces
                .iter()
                .flat_map(|f| f.indices())
                .all(|&i| (i as usize) < vertices.len()),
            "template produced an out-of-range face index"
        );
        Self { vertices, faces }
    }

    /// Builds a mesh from literal vertex and face data.
    ///
    /// Fails with [`AssemblyError::InvalidTopology`] when a face has fewer than
    /// three indices or references a vertex that does not exist.
    ///
    /// ```
    /// use trainyard::{MeshBuffer, Vec3};
    ///
    /// let tri = MeshBuffer::from_vertices_and_faces(
    ///     vec![Vec3::ZERO, Vec3::X, Vec3::Y],
    ///     [[0u32, 1, 2]],
    /// ).unwrap();
    /// assert_eq!(tri.face_count(), 1);
    ///
    /// let broken = MeshBuffer::from_vertices_and_faces(vec![Vec3::ZERO, Vec3::X, Vec3::Y], [[0u32, 1, 3]]);
    /// assert!(broken.is_err());
    /// ```
    pub fn from_vertices_and_faces<F>(
        vertices: Vec<Vec3>,
        faces: impl IntoIterator<Item = F>,
    ) -> Result<Self>
    where
        F: Into<Face>,
    {
        let faces: Vec<Face> = faces.into_iter().map(Into::into).collect();
        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks the face invariant.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(AssemblyError::InvalidTopology(format!(
                    "face {face_idx} has {} indices, at least 3 are required",
                    face.len()
                )));
            }
            if let Some(&bad) = face.indices().iter().find(|&&i| i as usize >= count) {
                return Err(AssemblyError::InvalidTopology(format!(
                    "face {face_idx} references vertex {bad} but only {count} vertices exist"
                )));
            }
        }
        Ok(())
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of polygons.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles after fan triangulation.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Whether the buffer holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `(min, max)`. An empty buffer yields inverted infinities.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for &p in &self.vertices {
            min = min.min(p);
            max = max.max(p);
        }

        (min, max)
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Returns the extents of the bounding box.
    pub fn size(&self) -> Vec3 {
        let (min, max) = self.bounds();
        max - min
    }

    /// Translates all vertices by the given offset.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Applies a transform to every vertex in place.
    pub fn transform(&mut self, transform: &Transform) {
        for v in &mut self.vertices {
            *v = transform.apply(*v);
        }
    }

    /// Returns a transformed copy, leaving `self` untouched.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let mut copy = self.clone();
        copy.transform(transform);
        copy
    }

    /// Appends another buffer, re-indexing its faces.
    ///
    /// Returns the vertex offset at which `other` was placed.
    pub fn append(&mut self, other: &MeshBuffer) -> u32 {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(other.faces.iter().map(|f| f.offset(base)));
        base
    }

    /// Unit normal of a face, computed with Newell's method.
    ///
    /// Robust for any planar polygon; degenerate faces yield zero.
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        let idx = face.indices();
        let mut normal = Vec3::ZERO;
        for (k, &i) in idx.iter().enumerate() {
            let current = self.vertices[i as usize];
            let next = self.vertices[idx[(k + 1) % idx.len()] as usize];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.normalize_or_zero()
    }

    /// Flat triangle index list covering every face.
    pub fn triangulate(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.triangle_count() * 3);
        for face in &self.faces {
            for tri in face.triangles() {
                indices.extend_from_slice(&tri);
            }
        }
        indices
    }
}

/// Builds a mesh from literal vertex and face data.
///
/// Free-function form of [`MeshBuffer::from_vertices_and_faces`].
pub fn from_vertices_and_faces<F>(
    vertices: Vec<Vec3>,
    faces: impl IntoIterator<Item = F>,
) -> Result<MeshBuffer>
where
    F: Into<Face>,
{
    MeshBuffer::from_vertices_and_faces(vertices, faces)
}

/// A flat-shaded vertex ready for upload to a GPU vertex buffer.
///
/// `#[repr(C)]` with [`bytemuck::Pod`], so a `&[Vertex3d]` can be handed to a
/// renderer as bytes without copying.
///
/// # Memory Layout
///
/// Each vertex occupies 28 bytes:
/// - `position`: 12 bytes (3 × f32) at offset 0
/// - `normal`: 12 bytes (3 × f32) at offset 12
/// - `material`: 4 bytes (u32) at offset 24
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Position in assembly space.
    pub position: [f32; 3],
    /// Face normal of the triangle this vertex belongs to.
    pub normal: [f32; 3],
    /// Material slot index of the owning face.
    pub material: u32,
}

impl Vertex3d {
    /// Creates a vertex from its parts.
    pub fn new(position: [f32; 3], normal: [f32; 3], material: u32) -> Self {
        Self {
            position,
            normal,
            material,
        }
    }
}
