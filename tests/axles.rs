//! The side-dependent axle rule.

use approx::assert_relative_eq;
use trainyard::*;

fn axles(assembly: &Assembly) -> Vec<&Part> {
    assembly
        .parts
        .iter()
        .filter(|p| p.name.contains("_axle_"))
        .collect()
}

#[test]
fn one_axle_per_right_side_wheel() {
    let assembly = assemble_parts(&LocomotiveConfig::default()).unwrap();
    let found = axles(&assembly);
    let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["front_axle_1", "front_axle_2", "rear_axle_1", "rear_axle_2"]);

    for axle in &found {
        assert!(axle.transform.position.y < 0.0);
    }
}

#[test]
fn axle_follows_its_wheel_directly() {
    let assembly = assemble_parts(&LocomotiveConfig::default()).unwrap();
    let parts: Vec<&Part> = assembly.parts.iter().collect();

    for (i, part) in parts.iter().enumerate() {
        if part.name.contains("_axle_") {
            let wheel = parts[i - 1];
            assert!(wheel.name.contains("_wheel_"));
            assert_eq!(wheel.transform.position, part.transform.position);
        }
    }
}

#[test]
fn axle_radius_depends_on_group() {
    let assembly = assemble_parts(&LocomotiveConfig::default()).unwrap();

    for axle in axles(&assembly) {
        let Some(&Primitive::Cylinder { radius, depth, .. }) = axle.primitive() else {
            panic!("{} is not a cylinder", axle.name);
        };
        let expected = if axle.name.starts_with("front") { 0.06 } else { 0.09 };
        assert_eq!(radius, expected, "{}", axle.name);
        assert_eq!(depth, 0.9);
    }
}

#[test]
fn axle_spans_the_track_width() {
    let loco = build_locomotive_assembly().unwrap();
    let span = loco.part("rear_axle_2").unwrap();
    let axle = &loco.mesh.vertices[span.vertices.clone()];

    let min = axle.iter().fold(Vec3::splat(f32::MAX), |a, v| a.min(*v));
    let max = axle.iter().fold(Vec3::splat(f32::MIN), |a, v| a.max(*v));
    assert_relative_eq!(max.y - min.y, 0.9, epsilon = 1e-4);
    assert_relative_eq!(max.x - min.x, 0.18, epsilon = 1e-4);
    assert_relative_eq!(max.z - min.z, 0.18, epsilon = 1e-4);
    assert_relative_eq!((min.x + max.x) * 0.5, -1.4, epsilon = 1e-4);
}

#[test]
fn left_only_wheels_get_no_axles() {
    let mut config = LocomotiveConfig::default();
    for wheel in config
        .front_wheels
        .placements
        .iter_mut()
        .chain(config.rear_wheels.placements.iter_mut())
    {
        wheel.y = wheel.y.abs();
    }

    let assembly = assemble_parts(&config).unwrap();
    assert!(axles(&assembly).is_empty());
    assert_eq!(assembly.parts.named("front_wheel").count(), 4);
}

#[test]
fn wheel_on_the_centreline_has_no_axle() {
    let mut config = LocomotiveConfig::default();
    config.front_wheels.placements = vec![Vec3::new(1.0, 0.0, -0.37)];
    config.rear_wheels.placements = vec![Vec3::new(-0.5, -0.01, -0.22)];

    let assembly = assemble_parts(&config).unwrap();
    let names: Vec<&str> = axles(&assembly).iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["rear_axle_1"]);
}
