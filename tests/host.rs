//! Replaying an assembly through host seams.

use trainyard::*;

#[derive(Default)]
struct RecordingHost {
    primitives: Vec<(&'static str, Transform)>,
    meshes: Vec<(usize, usize)>,
}

impl PrimitiveHost for RecordingHost {
    type Object = usize;

    fn create_primitive(&mut self, kind: &Primitive, transform: &Transform) -> usize {
        self.primitives.push((kind.kind_name(), *transform));
        self.primitives.len() + self.meshes.len() - 1
    }

    fn create_mesh(&mut self, vertices: &[Vec3], faces: &[Face], _transform: &Transform) -> usize {
        self.meshes.push((vertices.len(), faces.len()));
        self.primitives.len() + self.meshes.len() - 1
    }
}

#[derive(Default)]
struct ShaderCache {
    realized: Vec<String>,
}

impl MaterialHost for ShaderCache {
    type Shader = String;

    fn realize(&mut self, spec: &MaterialSpec) -> String {
        self.realized.push(spec.name.clone());
        format!("shader:{}", spec.name)
    }
}

#[test]
fn replay_visits_parts_in_order() {
    let assembly = assemble_parts(&LocomotiveConfig::default()).unwrap();
    let mut host = RecordingHost::default();
    let objects = replay(&assembly.parts, &mut host);

    assert_eq!(objects, (0..assembly.parts.len()).collect::<Vec<_>>());
    assert_eq!(host.meshes, vec![(5, 3)]);

    let kinds: Vec<&str> = host.primitives.iter().map(|(k, _)| *k).collect();
    assert_eq!(kinds.iter().filter(|k| **k == "cylinder").count(), 19);
    assert_eq!(kinds.iter().filter(|k| **k == "plane").count(), 3);
    assert_eq!(kinds[6], "cuboid");
    assert_eq!(host.primitives[0].1.position, Vec3::new(0.6, 0.0, 0.5));
}

#[test]
fn materials_are_realized_once_per_slot() {
    let loco = build_locomotive_assembly().unwrap();
    let mut host = ShaderCache::default();
    let shaders = loco.realize_materials(&mut host);

    assert_eq!(shaders.len(), 6);
    assert_eq!(shaders[0], "shader:BodyMaterial");
    assert_eq!(host.realized[4], "WheelMaterial");
}
