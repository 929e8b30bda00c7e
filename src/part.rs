//! Parts and the ordered collection the assembler fills.

use crate::material::MaterialHandle;
use crate::mesh::MeshBuffer;
use crate::primitives::Primitive;
use crate::transform::Transform;

/// Where a part's local geometry came from.
#[derive(Clone, Debug, PartialEq)]
pub enum PartSource {
    /// Generated by a primitive template.
    Template(Primitive),
    /// Supplied as literal vertex and face data.
    Explicit,
}

/// One named sub-shape of the assembly.
///
/// The mesh stays in local space; [`crate::merge`] applies `transform`.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    /// Name such as `"front_wheel_1"` or `"shovel"`.
    pub name: String,
    /// Template kind and parameters, or explicit.
    pub source: PartSource,
    /// Geometry in part-local coordinates.
    pub mesh: MeshBuffer,
    /// Local-to-assembly placement.
    pub transform: Transform,
    /// Surface material.
    pub material: MaterialHandle,
}

impl Part {
    /// The template parameters, if this part came from one.
    pub fn primitive(&self) -> Option<&Primitive> {
        match &self.source {
            PartSource::Template(p) => Some(p),
            PartSource::Explicit => None,
        }
    }

    /// The part's geometry moved into assembly space.
    pub fn world_mesh(&self) -> MeshBuffer {
        self.mesh.transformed(&self.transform)
    }
}

/// Parts in insertion order.
///
/// Order decides face order and material-slot order after merging; it has no
/// effect on the merged shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartCollection {
    parts: Vec<Part>,
}

impl PartCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a part.
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Part> {
        self.parts.iter()
    }

    /// Parts whose name starts with `prefix`.
    pub fn named<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Part> + 'a {
        self.parts.iter().filter(move |p| p.name.starts_with(prefix))
    }

    /// Total faces over all parts.
    pub fn face_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.face_count()).sum()
    }

    /// Total vertices over all parts.
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.vertex_count()).sum()
    }

    /// Reorders parts in place.
    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&Part) -> K) {
        self.parts.sort_by_key(key);
    }
}

impl FromIterator<Part> for PartCollection {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PartCollection {
    type Item = Part;
    type IntoIter = std::vec::IntoIter<Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

impl<'a> IntoIterator for &'a PartCollection {
    type Item = &'a Part;
    type IntoIter = std::slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}
