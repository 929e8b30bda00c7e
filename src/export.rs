//! Writing an [`AssembledMesh`] to interchange formats.
//!
//! - **STL**: binary triangles through `stl_io`. Materials are dropped.
//! - **OBJ**: polygons kept as authored, one group per part, with `usemtl`
//!   pointing into a companion **MTL** library.
//!
//! [`export_to_path`] picks the format from the file extension.

use crate::merge::AssembledMesh;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while exporting.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("nothing to export: the mesh has no faces")]
    EmptyMesh,
}

/// Writes binary STL, one facet per fan triangle.
pub fn write_stl<W: Write>(mesh: &AssembledMesh, writer: &mut W) -> Result<(), ExportError> {
    if mesh.mesh.faces.is_empty() {
        return Err(ExportError::EmptyMesh);
    }

    let buffer = &mesh.mesh;
    let mut triangles = Vec::with_capacity(buffer.triangle_count());
    for face in &buffer.faces {
        let normal = buffer.face_normal(face).to_array();
        for tri in face.triangles() {
            triangles.push(stl_io::Triangle {
                normal: stl_io::Normal::new(normal),
                vertices: tri.map(|i| stl_io::Vertex::new(buffer.vertices[i as usize].to_array())),
            });
        }
    }

    stl_io::write_stl(writer, triangles.iter())?;
    Ok(())
}

/// Writes Wavefront OBJ text.
///
/// `mtllib` names the material library to reference, usually the file
/// written by [`write_mtl`]. Face indices are 1-based.
pub fn write_obj<W: Write>(
    mesh: &AssembledMesh,
    writer: &mut W,
    mtllib: Option<&str>,
) -> Result<(), ExportError> {
    if mesh.mesh.faces.is_empty() {
        return Err(ExportError::EmptyMesh);
    }

    writeln!(writer, "# trainyard OBJ export")?;
    writeln!(
        writer,
        "# Vertices: {}, Faces: {}",
        mesh.vertex_count(),
        mesh.face_count()
    )?;
    if let Some(lib) = mtllib {
        writeln!(writer, "mtllib {lib}")?;
    }

    for v in &mesh.mesh.vertices {
        writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }

    for span in &mesh.parts {
        writeln!(writer, "g {}", obj_name(&span.name))?;
        if let Some(material) = mesh.materials.get(span.slot as usize) {
            writeln!(writer, "usemtl {}", obj_name(&material.name))?;
        }
        for face in &mesh.mesh.faces[span.faces.clone()] {
            write!(writer, "f")?;
            for &i in face.indices() {
                write!(writer, " {}", i + 1)?;
            }
            writeln!(writer)?;
        }
    }

    Ok(())
}

/// Writes one `newmtl` block per material slot.
pub fn write_mtl<W: Write>(mesh: &AssembledMesh, writer: &mut W) -> Result<(), ExportError> {
    writeln!(writer, "# trainyard MTL export")?;
    for material in &mesh.materials {
        let c = material.color;
        writeln!(writer)?;
        writeln!(writer, "newmtl {}", obj_name(&material.name))?;
        writeln!(writer, "Kd {:.6} {:.6} {:.6}", c.r, c.g, c.b)?;
        writeln!(writer, "d {:.6}", c.a)?;
        writeln!(writer, "Pm {:.6}", material.metallic)?;
        writeln!(writer, "Pr {:.6}", material.roughness)?;
    }
    Ok(())
}

/// Writes `mesh` to `path`, choosing the format by extension.
///
/// `.obj` also writes a sibling `.mtl` file. Returns every path written.
pub fn export_to_path(
    mesh: &AssembledMesh,
    path: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ExportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let written = match extension.as_str() {
        "stl" => {
            let mut out = BufWriter::new(File::create(path)?);
            write_stl(mesh, &mut out)?;
            out.flush()?;
            vec![path.to_path_buf()]
        }
        "obj" => {
            let mtl_path = path.with_extension("mtl");
            let mtl_name = mtl_path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_owned);

            let mut out = BufWriter::new(File::create(path)?);
            write_obj(mesh, &mut out, mtl_name.as_deref())?;
            out.flush()?;

            let mut out = BufWriter::new(File::create(&mtl_path)?);
            write_mtl(mesh, &mut out)?;
            out.flush()?;
            vec![path.to_path_buf(), mtl_path]
        }
        _ => return Err(ExportError::UnsupportedFormat(path.display().to_string())),
    };

    info!(path = %path.display(), files = written.len(), "exported assembly");
    Ok(written)
}

/// OBJ and MTL names end at whitespace.
fn obj_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, MaterialRegistry, MaterialSpec};
    use crate::merge::merge;
    use crate::part::{Part, PartCollection, PartSource};
    use crate::primitives::{Primitive, make_cuboid, make_plane};
    use crate::transform::Transform;
    use glam::Vec3;
    use std::io::Cursor;

    fn sample() -> AssembledMesh {
        let mut registry = MaterialRegistry::new();
        let paint = registry
            .create(MaterialSpec::new("Engine Paint", Color::rgb(0.2, 0.3, 0.4)))
            .unwrap();
        let glass = registry
            .create(MaterialSpec::new("Glass", Color::rgba(0.3, 0.5, 0.5, 0.4)).roughness(0.1))
            .unwrap();

        let mut parts = PartCollection::new();
        parts.push(Part {
            name: "cab".into(),
            source: PartSource::Template(Primitive::Cuboid { size: Vec3::ONE }),
            mesh: make_cuboid(Vec3::ONE).unwrap(),
            transform: Transform::new(),
            material: paint,
        });
        parts.push(Part {
            name: "pane".into(),
            source: PartSource::Template(Primitive::Plane { size: 1.0 }),
            mesh: make_plane(1.0).unwrap(),
            transform: Transform::from_position(Vec3::new(0.0, 0.0, 2.0)),
            material: glass,
        });
        merge(&parts, &registry, &Transform::new()).unwrap()
    }

    #[test]
    fn stl_reads_back_with_every_triangle() {
        let mesh = sample();
        let mut buf = Vec::new();
        write_stl(&mesh, &mut buf).unwrap();
        assert_eq!(buf.len(), 80 + 4 + mesh.triangle_count() * 50);

        let read = stl_io::read_stl(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read.faces.len(), 14);
    }

    #[test]
    fn obj_keeps_quads_and_groups() {
        let mesh = sample();
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf, Some("loco.mtl")).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 12);
        assert_eq!(count("f "), 7);
        assert_eq!(count("g "), 2);
        assert!(text.contains("mtllib loco.mtl"));
        assert!(text.contains("usemtl Engine_Paint"));
        assert!(text.contains("usemtl Glass\nf 9 10 11 12"));

        for line in text.lines().filter(|l| l.starts_with("f ")) {
            assert_eq!(line.split_whitespace().count(), 5);
            for idx in line.split_whitespace().skip(1) {
                assert!(idx.parse::<u32>().unwrap() >= 1);
            }
        }
    }

    #[test]
    fn mtl_has_one_block_per_slot() {
        let mesh = sample();
        let mut buf = Vec::new();
        write_mtl(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.matches("newmtl ").count(), 2);
        assert!(text.contains("newmtl Glass\nKd 0.300000 0.500000 0.500000\nd 0.400000"));
        assert!(text.contains("Pr 0.100000"));
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let empty = merge(&PartCollection::new(), &MaterialRegistry::new(), &Transform::new())
            .unwrap();
        assert!(matches!(
            write_stl(&empty, &mut Vec::new()),
            Err(ExportError::EmptyMesh)
        ));
        assert!(matches!(
            write_obj(&empty, &mut Vec::new(), None),
            Err(ExportError::EmptyMesh)
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = export_to_path(&sample(), "loco.fbx").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(_)));
    }

    #[test]
    fn obj_export_writes_material_library() {
        let dir = std::env::temp_dir().join(format!("trainyard-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let written = export_to_path(&sample(), dir.join("loco.OBJ")).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[1], dir.join("loco.mtl"));
        let mtl = std::fs::read_to_string(&written[1]).unwrap();
        assert!(mtl.contains("newmtl Engine_Paint"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
