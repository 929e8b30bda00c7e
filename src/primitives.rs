//! Parametric primitive templates.
//!
//! Each template returns a fresh [`MeshBuffer`] centred on the local origin:
//!
//! | Template          | Axis / normal | Vertices       | Faces                      |
//! |-------------------|---------------|----------------|----------------------------|
//! | [`make_cylinder`] | axis +Z       | `2 × segments` | 2 N-gon caps + N side quads|
//! | [`make_cuboid`]   | axis-aligned  | 8              | 6 quads                    |
//! | [`make_plane`]    | normal +Z     | 4              | 1 quad                     |
//!
//! Every dimension must be finite and strictly positive. Anything else is
//! reported as [`AssemblyError::InvalidParameter`] rather than clamped.

use crate::constants::{MAX_SEGMENTS, MIN_SEGMENTS};
use crate::error::{AssemblyError, Result, require_positive};
use crate::mesh::{Face, MeshBuffer};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A primitive kind together with its parameters.
///
/// This is the "kind K with parameters P" half of a host's primitive
/// contract; [`Primitive::build`] produces the geometry locally.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    /// Capped cylinder along local Z.
    Cylinder {
        /// Distance from the axis to the rim.
        radius: f32,
        /// Length along the axis.
        depth: f32,
        /// Number of sides.
        segments: u32,
    },
    /// Axis-aligned box with the given extents.
    Cuboid {
        /// Full extents on each axis.
        size: Vec3,
    },
    /// Square in the local XY plane.
    Plane {
        /// Side length.
        size: f32,
    },
}

impl Primitive {
    /// Short lowercase name of the kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Cylinder { .. } => "cylinder",
            Primitive::Cuboid { .. } => "cuboid",
            Primitive::Plane { .. } => "plane",
        }
    }

    /// Generates the template geometry.
    pub fn build(&self) -> Result<MeshBuffer> {
        match *self {
            Primitive::Cylinder {
                radius,
                depth,
                segments,
            } => make_cylinder(radius, depth, segments),
            Primitive::Cuboid { size } => make_cuboid(size),
            Primitive::Plane { size } => make_plane(size),
        }
    }
}

/// Creates a capped cylinder centred at the origin, its axis along +Z.
///
/// # Geometry Details
///
/// - **Rings**: top ring (`z = depth / 2`) at indices `0..segments`, bottom
///   ring (`z = -depth / 2`) at `segments..2 × segments`
/// - **Faces**: top cap, bottom cap, then one quad per side in angle order
///
/// ```
/// use trainyard::primitives::make_cylinder;
///
/// let wheel = make_cylinder(0.3, 0.1, 16).unwrap();
/// assert_eq!(wheel.vertex_count(), 32);
/// assert_eq!(wheel.face_count(), 18);
/// assert!(make_cylinder(-0.3, 0.1, 16).is_err());
/// ```
pub fn make_cylinder(radius: f32, depth: f32, segments: u32) -> Result<MeshBuffer> {
    require_positive("radius", radius)?;
    require_positive("depth", depth)?;
    if segments < MIN_SEGMENTS {
        return Err(AssemblyError::InvalidParameter {
            name: "segments",
            value: segments as f32,
            reason: "a cylinder needs at least 3 sides",
        });
    }
    if segments > MAX_SEGMENTS {
        return Err(AssemblyError::InvalidParameter {
            name: "segments",
            value: segments as f32,
            reason: "a cylinder takes at most 4096 sides",
        });
    }
    debug!(radius, depth, segments, "generating cylinder template");

    let half = depth * 0.5;
    let n = segments;
    let mut vertices = Vec::with_capacity(2 * n as usize);

    for z in [half, -half] {
        for seg in 0..n {
            let theta = std::f32::consts::TAU * seg as f32 / n as f32;
            vertices.push(Vec3::new(radius * theta.cos(), radius * theta.sin(), z));
        }
    }

    let mut faces = Vec::with_capacity(n as usize + 2);
    // Top cap counter-clockwise from +Z, bottom cap reversed.
    faces.push(Face((0..n).collect()));
    faces.push(Face((n..2 * n).rev().collect()));

    for seg in 0..n {
        let next = (seg + 1) % n;
        faces.push(Face(vec![n + seg, n + next, next, seg]));
    }

    Ok(MeshBuffer::new_unchecked(vertices, faces))
}

/// Creates an axis-aligned box centred at the origin with extents `size`.
///
/// Vertex `i` sits at the corner whose X, Y and Z signs are bits 0, 1 and 2
/// of `i` (clear = negative).
///
/// ```
/// use trainyard::{primitives::make_cuboid, Vec3};
///
/// let cab = make_cuboid(Vec3::new(1.2, 1.5, 1.2)).unwrap();
/// assert_eq!(cab.vertex_count(), 8);
/// assert_eq!(cab.size(), Vec3::new(1.2, 1.5, 1.2));
/// ```
pub fn make_cuboid(size: Vec3) -> Result<MeshBuffer> {
    require_positive("size.x", size.x)?;
    require_positive("size.y", size.y)?;
    require_positive("size.z", size.z)?;
    debug!(x = size.x, y = size.y, z = size.z, "generating cuboid template");

    let half = size * 0.5;
    let vertices = (0..8u32)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -half.x } else { half.x },
                if i & 2 == 0 { -half.y } else { half.y },
                if i & 4 == 0 { -half.z } else { half.z },
            )
        })
        .collect();

    #[rustfmt::skip]
    let faces = vec![
        Face(vec![0, 2, 3, 1]), // -Z
        Face(vec![4, 5, 7, 6]), // +Z
        Face(vec![0, 1, 5, 4]), // -Y
        Face(vec![2, 6, 7, 3]), // +Y
        Face(vec![0, 4, 6, 2]), // -X
        Face(vec![1, 3, 7, 5]), // +X
    ];

    Ok(MeshBuffer::new_unchecked(vertices, faces))
}

/// Creates a cube with edge length `size`.
pub fn make_cube(size: f32) -> Result<MeshBuffer> {
    require_positive("size", size)?;
    make_cuboid(Vec3::splat(size))
}

/// Creates a square in the XY plane, centred at the origin, facing +Z.
///
/// ```
/// use trainyard::primitives::make_plane;
///
/// let window = make_plane(1.0).unwrap();
/// assert_eq!(window.vertex_count(), 4);
/// assert_eq!(window.face_count(), 1);
/// ```
pub fn make_plane(size: f32) -> Result<MeshBuffer> {
    require_positive("size", size)?;
    debug!(size, "generating plane template");

    let half = size * 0.5;
    let vertices = vec![
        Vec3::new(-half, -half, 0.0),
        Vec3::new(half, -half, 0.0),
        Vec3::new(half, half, 0.0),
        Vec3::new(-half, half, 0.0),
    ];

    Ok(MeshBuffer::new_unchecked(vertices, vec![Face(vec![0, 1, 2, 3])]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn cylinder_vertices_sit_on_the_rim() {
        let mesh = make_cylinder(0.525, 0.1, 32).unwrap();
        for v in &mesh.vertices {
            assert_relative_eq!(v.truncate().length(), 0.525, epsilon = 1e-6);
            assert_relative_eq!(v.z.abs(), 0.05, epsilon = 1e-6);
        }
        mesh.validate().unwrap();
    }

    #[test]
    fn cylinder_faces_point_outwards() {
        let mesh = make_cylinder(1.0, 2.0, 8).unwrap();
        assert_near(mesh.face_normal(&mesh.faces[0]), Vec3::Z);
        assert_near(mesh.face_normal(&mesh.faces[1]), Vec3::NEG_Z);

        let side = &mesh.faces[2];
        let normal = mesh.face_normal(side);
        let centroid: Vec3 = side
            .indices()
            .iter()
            .map(|&i| mesh.vertices[i as usize])
            .sum::<Vec3>()
            / side.len() as f32;
        assert!(normal.dot(centroid) > 0.0);
    }

    #[test]
    fn cylinder_rejects_too_few_segments() {
        let err = make_cylinder(1.0, 1.0, 2).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::InvalidParameter { name: "segments", .. }
        ));
    }

    #[test]
    fn cylinder_segment_count_is_capped() {
        assert!(make_cylinder(1.0, 1.0, MAX_SEGMENTS).is_ok());
        for segments in [MAX_SEGMENTS + 1, u32::MAX] {
            assert!(matches!(
                make_cylinder(1.0, 1.0, segments),
                Err(AssemblyError::InvalidParameter { name: "segments", .. })
            ));
        }
    }

    #[test]
    fn cylinder_rejects_zero_depth() {
        assert!(matches!(
            make_cylinder(1.0, 0.0, 16),
            Err(AssemblyError::InvalidParameter { name: "depth", .. })
        ));
    }

    #[test]
    fn cuboid_faces_point_outwards() {
        let mesh = make_cuboid(Vec3::new(2.0, 3.0, 4.0)).unwrap();
        let expected = [
            Vec3::NEG_Z,
            Vec3::Z,
            Vec3::NEG_Y,
            Vec3::Y,
            Vec3::NEG_X,
            Vec3::X,
        ];
        for (face, want) in mesh.faces.iter().zip(expected) {
            assert_near(mesh.face_normal(face), want);
        }
    }

    #[test]
    fn cuboid_rejects_negative_extent() {
        assert!(matches!(
            make_cuboid(Vec3::new(1.0, -1.0, 1.0)),
            Err(AssemblyError::InvalidParameter { name: "size.y", .. })
        ));
    }

    #[test]
    fn cube_is_uniform_cuboid() {
        assert_eq!(make_cube(1.0).unwrap(), make_cuboid(Vec3::ONE).unwrap());
    }

    #[test]
    fn plane_faces_up_z() {
        let mesh = make_plane(2.0).unwrap();
        assert_eq!(mesh.size(), Vec3::new(2.0, 2.0, 0.0));
        assert_near(mesh.face_normal(&mesh.faces[0]), Vec3::Z);
    }

    #[test]
    fn primitive_enum_dispatches() {
        let p = Primitive::Plane { size: 1.0 };
        assert_eq!(p.kind_name(), "plane");
        assert_eq!(p.build().unwrap(), make_plane(1.0).unwrap());
    }
}
