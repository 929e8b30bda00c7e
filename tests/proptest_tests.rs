//! Property-based tests for the template and merge invariants.

use proptest::prelude::*;

use trainyard::primitives::{make_cuboid, make_cylinder};
use trainyard::*;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Positive dimension, avoiding degenerate near-zero sizes.
fn arb_positive_dim() -> impl Strategy<Value = f32> {
    0.01f32..100.0
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_angle() -> impl Strategy<Value = f32> {
    -std::f32::consts::PI..std::f32::consts::PI
}

const TOL: f32 = 1e-4;

/// Every face as its material name plus corner positions (as bit patterns),
/// sorted so the result ignores part order.
fn face_multiset(mesh: &AssembledMesh) -> Vec<(String, Vec<[u32; 3]>)> {
    let mut faces: Vec<_> = mesh
        .mesh
        .faces
        .iter()
        .zip(&mesh.face_materials)
        .map(|(face, &slot)| {
            let corners = face
                .indices()
                .iter()
                .map(|&i| mesh.mesh.vertices[i as usize].to_array().map(f32::to_bits))
                .collect();
            (mesh.materials[slot as usize].name.clone(), corners)
        })
        .collect();
    faces.sort();
    faces
}

// ---------------------------------------------------------------------------
// 1. Cylinder vertices stay within radius of the axis
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn cylinder_vertices_within_radius(
        radius in arb_positive_dim(),
        depth in arb_positive_dim(),
        segments in 3u32..64,
    ) {
        let mesh = make_cylinder(radius, depth, segments).unwrap();
        for v in &mesh.vertices {
            let off_axis = (v.x * v.x + v.y * v.y).sqrt();
            prop_assert!(off_axis <= radius * (1.0 + TOL));
            prop_assert!(v.z.abs() <= depth * 0.5 * (1.0 + TOL));
        }
        prop_assert!(mesh.validate().is_ok());
    }
}

// ---------------------------------------------------------------------------
// 2. Cuboid always has 8 vertices and exact extents
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn cuboid_extents_match_size(
        x in arb_positive_dim(),
        y in arb_positive_dim(),
        z in arb_positive_dim(),
    ) {
        let size = Vec3::new(x, y, z);
        let mesh = make_cuboid(size).unwrap();
        prop_assert_eq!(mesh.vertex_count(), 8);
        prop_assert_eq!(mesh.face_count(), 6);

        let extent = mesh.size();
        prop_assert!((extent - size).abs().max_element() <= size.max_element() * 1e-6);
    }
}

// ---------------------------------------------------------------------------
// 3. Non-positive dimensions are rejected, never clamped
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn non_positive_radius_is_rejected(radius in -100.0f32..=0.0, depth in arb_positive_dim()) {
        let is_invalid = matches!(
            make_cylinder(radius, depth, 16),
            Err(AssemblyError::InvalidParameter { name: "radius", .. })
        );
        prop_assert!(is_invalid);
    }
}

// ---------------------------------------------------------------------------
// 4. A pure translation moves every point by exactly the offset
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn translation_adds_offset(p in arb_vec3(), t in arb_vec3()) {
        let transform = compose(t, &[], Vec3::ONE);
        prop_assert_eq!(apply(&transform, p), p + t);
    }
}

// ---------------------------------------------------------------------------
// 5. Transform matches its matrix form
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn transform_matches_matrix(
        p in arb_vec3(),
        t in arb_vec3(),
        ax in arb_angle(),
        az in arb_angle(),
        s in (0.1f32..10.0, 0.1f32..10.0, 0.1f32..10.0),
    ) {
        let transform = compose(t, &[(Axis::X, ax), (Axis::Z, az)], Vec3::new(s.0, s.1, s.2));
        let direct = transform.apply(p);
        let via_matrix = transform.matrix().transform_point3(p);
        let scale = 1.0 + direct.abs().max_element();
        prop_assert!((direct - via_matrix).length() <= scale * 1e-4);
    }
}

// ---------------------------------------------------------------------------
// 6. Merge order changes slot order but not the merged faces
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reordering_parts_preserves_faces(seed in any::<u64>()) {
        let assembly = assemble_parts(&LocomotiveConfig::default()).unwrap();
        let forward = assembly.merge(&Transform::new()).unwrap();

        let mut shuffled = assembly.parts.clone();
        shuffled.sort_by_key(|p| {
            p.name.bytes().fold(seed, |h, b| h.rotate_left(5) ^ u64::from(b))
        });
        let reordered = merge(&shuffled, &assembly.materials, &Transform::new()).unwrap();

        prop_assert_eq!(forward.bounds(), reordered.bounds());
        prop_assert_eq!(forward.face_count(), reordered.face_count());
        prop_assert_eq!(forward.materials.len(), reordered.materials.len());
        prop_assert_eq!(face_multiset(&forward), face_multiset(&reordered));
    }
}
