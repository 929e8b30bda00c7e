//! The locomotive part assembler.
//!
//! Turns a [`LocomotiveConfig`] into an ordered [`PartCollection`]: one
//! template (or the explicit shovel wedge) per logical part, each with its own
//! placement and material. [`build_locomotive_assembly`] runs the whole
//! pipeline, merge included:
//!
//! ```
//! let loco = trainyard::build_locomotive_assembly().unwrap();
//! assert_eq!(loco.materials.len(), 6);
//! ```
//!
//! Cylinder templates stand along local Z. Parts that need another
//! orientation declare their rotation steps explicitly; they are applied in
//! the order written below.

use crate::config::{CylinderPlacement, LocomotiveConfig, WheelGroupConfig};
use crate::error::{Result, require_positive};
use crate::material::{MaterialHandle, MaterialRegistry};
use crate::merge::{AssembledMesh, merge};
use crate::mesh::MeshBuffer;
use crate::part::{Part, PartCollection, PartSource};
use crate::primitives::Primitive;
use crate::transform::Transform;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};
use tracing::{debug, info, instrument};

/// Parts and the registry their handles point into.
#[derive(Clone, Debug)]
pub struct Assembly {
    /// Every part in build order, still in local space.
    pub parts: PartCollection,
    /// Registry that issued the parts' material handles.
    pub materials: MaterialRegistry,
}

impl Assembly {
    /// Merges the parts, applying `final_transform` to the result.
    pub fn merge(&self, final_transform: &Transform) -> Result<AssembledMesh> {
        merge(&self.parts, &self.materials, final_transform)
    }
}

/// Handles for each material role.
#[derive(Clone, Copy, Debug)]
struct Palette {
    body: MaterialHandle,
    wheel: MaterialHandle,
    window: MaterialHandle,
    accent: MaterialHandle,
    headlight: MaterialHandle,
    shovel: MaterialHandle,
}

/// Which wheel group is being assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WheelGroup {
    Front,
    Rear,
}

impl WheelGroup {
    fn prefix(self) -> &'static str {
        match self {
            WheelGroup::Front => "front",
            WheelGroup::Rear => "rear",
        }
    }
}

/// Sequences every locomotive part into a collection.
pub struct LocomotiveAssembler<'a> {
    config: &'a LocomotiveConfig,
    registry: MaterialRegistry,
    parts: PartCollection,
}

impl<'a> LocomotiveAssembler<'a> {
    /// An assembler for the given parameters.
    pub fn new(config: &'a LocomotiveConfig) -> Self {
        Self {
            config,
            registry: MaterialRegistry::new(),
            parts: PartCollection::new(),
        }
    }

    /// Builds every part. Stops at the first invalid parameter.
    pub fn assemble(mut self) -> Result<Assembly> {
        let config = self.config;
        let palette = self.register_materials()?;

        self.add_body(&palette)?;
        self.add_rings(&palette)?;
        self.add_smokestack(&palette)?;
        self.add_cockpit(&palette)?;
        self.add_windows(&palette)?;
        self.add_headlight(&palette)?;
        self.add_wheels(WheelGroup::Front, &config.front_wheels, palette.wheel)?;
        self.add_wheels(WheelGroup::Rear, &config.rear_wheels, palette.wheel)?;
        self.add_shovel(&palette)?;

        Ok(Assembly {
            parts: self.parts,
            materials: self.registry,
        })
    }

    fn register_materials(&mut self) -> Result<Palette> {
        let config = self.config;
        let m = &config.materials;
        Ok(Palette {
            body: self.registry.create(m.body.clone())?,
            wheel: self.registry.create(m.wheel.clone())?,
            window: self.registry.create(m.window.clone())?,
            accent: self.registry.create(m.accent.clone())?,
            headlight: self.registry.create(m.headlight.clone())?,
            shovel: self.registry.create(m.shovel.clone())?,
        })
    }

    fn cylinder(&self, radius: f32, depth: f32) -> Primitive {
        Primitive::Cylinder {
            radius,
            depth,
            segments: self.config.segments,
        }
    }

    fn add_template(
        &mut self,
        name: impl Into<String>,
        primitive: Primitive,
        transform: Transform,
        material: MaterialHandle,
    ) -> Result<()> {
        let mesh = primitive.build()?;
        self.push(name.into(), PartSource::Template(primitive), mesh, transform, material)
    }

    fn push(
        &mut self,
        name: String,
        source: PartSource,
        mesh: MeshBuffer,
        transform: Transform,
        material: MaterialHandle,
    ) -> Result<()> {
        require_positive("scale.x", transform.scale.x)?;
        require_positive("scale.y", transform.scale.y)?;
        require_positive("scale.z", transform.scale.z)?;

        debug!(
            part = %name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "appended part"
        );
        self.parts.push(Part {
            name,
            source,
            mesh,
            transform,
            material,
        });
        Ok(())
    }

    fn add_body(&mut self, palette: &Palette) -> Result<()> {
        let config = self.config;
        let body = &config.body;
        let transform = Transform::from_position(body.position).rotate_z(FRAC_PI_2);
        self.add_template("body", self.cylinder(body.radius, body.depth), transform, palette.body)
    }

    fn add_rings(&mut self, palette: &Palette) -> Result<()> {
        let config = self.config;
        let rings = &config.rings;
        let center = config.body.position;

        for (i, &dx) in rings.offsets.iter().enumerate() {
            let transform =
                Transform::from_position(center + Vec3::new(dx, 0.0, 0.0)).rotate_z(FRAC_PI_2);
            self.add_template(
                format!("ring_{}", i + 1),
                self.cylinder(rings.radius, rings.depth),
                transform,
                palette.accent,
            )?;
        }
        Ok(())
    }

    fn add_smokestack(&mut self, palette: &Palette) -> Result<()> {
        let CylinderPlacement { radius, depth, position } = self.config.smokestack.base;
        self.add_template(
            "smokestack_base",
            self.cylinder(radius, depth),
            Transform::from_position(position),
            palette.body,
        )?;

        let CylinderPlacement { radius, depth, position } = self.config.smokestack.top;
        self.add_template(
            "smokestack_top",
            self.cylinder(radius, depth),
            Transform::from_position(position),
            palette.body,
        )
    }

    fn add_cockpit(&mut self, palette: &Palette) -> Result<()> {
        let config = self.config;
        let cockpit = &config.cockpit;
        let transform = Transform::from_position(cockpit.position)
            .scale(cockpit.scale)
            .rotate_y(FRAC_PI_2);
        self.add_template(
            "cockpit",
            Primitive::Cuboid {
                size: Vec3::splat(cockpit.size),
            },
            transform,
            palette.body,
        )
    }

    fn add_windows(&mut self, palette: &Palette) -> Result<()> {
        let config = self.config;
        let windows = &config.windows;
        let pane = Primitive::Plane { size: windows.size };

        let front = Transform::from_position(windows.front_position)
            .scale(windows.front_scale)
            .rotate_y(FRAC_PI_2);
        self.add_template("front_window", pane, front, palette.window)?;

        for (i, &z) in windows.side_heights.iter().enumerate() {
            let mut transform = Transform::from_position(Vec3::new(windows.side_x, windows.side_y, z))
                .scale(windows.side_scale);
            if z < 0.0 {
                transform = transform.rotate_y(PI);
            }
            self.add_template(format!("side_window_{}", i + 1), pane, transform, palette.window)?;
        }
        Ok(())
    }

    fn add_headlight(&mut self, palette: &Palette) -> Result<()> {
        let CylinderPlacement { radius, depth, position } = self.config.headlight;
        self.add_template(
            "headlight",
            self.cylinder(radius, depth),
            Transform::from_position(position).rotate_z(FRAC_PI_2),
            palette.headlight,
        )
    }

    /// Wheels turned onto their side, each followed by an axle when it sits
    /// on the right (`y < 0`).
    fn add_wheels(
        &mut self,
        group: WheelGroup,
        wheels: &WheelGroupConfig,
        material: MaterialHandle,
    ) -> Result<()> {
        let prefix = group.prefix();
        let mut axles = 0;

        for (i, &position) in wheels.placements.iter().enumerate() {
            let transform = Transform::from_position(position).rotate_x(FRAC_PI_2);
            self.add_template(
                format!("{prefix}_wheel_{}", i + 1),
                self.cylinder(wheels.radius, wheels.depth),
                transform,
                material,
            )?;

            if position.y < 0.0 {
                axles += 1;
                self.add_template(
                    format!("{prefix}_axle_{axles}"),
                    self.cylinder(wheels.axle_radius, self.config.axle_depth),
                    transform,
                    material,
                )?;
            }
        }
        Ok(())
    }

    fn add_shovel(&mut self, palette: &Palette) -> Result<()> {
        let config = self.config;
        let shovel = &config.shovel;
        let mesh = MeshBuffer::from_vertices_and_faces(
            shovel.vertices.clone(),
            shovel.faces.iter().cloned(),
        )?;
        let transform = Transform::from_position(shovel.position).rotate_x(PI);
        self.push(
            "shovel".to_string(),
            PartSource::Explicit,
            mesh,
            transform,
            palette.shovel,
        )
    }
}

/// Builds the parts for `config` without merging them.
pub fn assemble_parts(config: &LocomotiveConfig) -> Result<Assembly> {
    LocomotiveAssembler::new(config).assemble()
}

/// Builds the reference locomotive.
pub fn build_locomotive_assembly() -> Result<AssembledMesh> {
    build_locomotive_assembly_with(&LocomotiveConfig::default())
}

/// Builds and merges a locomotive from `config`.
///
/// The merged mesh is translated by `config.alignment_offset`.
#[instrument(skip_all, fields(segments = config.segments))]
pub fn build_locomotive_assembly_with(config: &LocomotiveConfig) -> Result<AssembledMesh> {
    let assembly = assemble_parts(config)?;
    info!(
        parts = assembly.parts.len(),
        materials = assembly.materials.len(),
        "locomotive parts assembled"
    );
    assembly.merge(&Transform::from_position(config.alignment_offset))
}
