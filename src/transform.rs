//! Part placement: scale, ordered axis rotations and translation.
//!
//! A [`Transform`] carries everything needed to move a part's local geometry
//! into the shared assembly frame. Rotations are declared one axis at a time
//! and are applied in the order they were declared, each one a right-handed
//! rotation about the corresponding *world* axis:
//!
//! ```
//! use trainyard::{Transform, Vec3};
//! use std::f32::consts::FRAC_PI_2;
//!
//! // Stand a Z-aligned cylinder on its side, then drop it into place.
//! let wheel = Transform::new()
//!     .position(Vec3::new(1.0, -0.4, -0.37))
//!     .rotate_x(FRAC_PI_2);
//!
//! let p = wheel.apply(Vec3::new(0.0, 0.0, 0.05));
//! assert!((p - Vec3::new(1.0, -0.45, -0.37)).length() < 1e-6);
//! ```
//!
//! # Transformation Order
//!
//! Points are transformed **Scale → Rotate → Translate** (SRT):
//! 1. scaled about the local origin
//! 2. rotated about the local origin, one declared axis step at a time
//! 3. translated to the part's position

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A world axis used to declare a single rotation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Quaternion for a right-handed rotation of `angle` radians about this axis.
    pub fn rotation(self, angle: f32) -> Quat {
        match self {
            Axis::X => Quat::from_rotation_x(angle),
            Axis::Y => Quat::from_rotation_y(angle),
            Axis::Z => Quat::from_rotation_z(angle),
        }
    }
}

/// One rotation step: an axis and an angle in radians.
pub type AxisRotation = (Axis, f32);

/// A part-local-to-assembly transformation.
///
/// The rotation is kept as a single quaternion, but it is only ever built up
/// from explicit axis steps ([`Transform::rotate_x`] and friends, or
/// [`compose`]), so the step order of each call site is preserved.
///
/// # Default Values
///
/// - `position`: `(0, 0, 0)`
/// - `rotation`: identity
/// - `scale`: `(1, 1, 1)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation applied last.
    pub position: Vec3,
    /// Accumulated rotation.
    pub rotation: Quat,
    /// Per-axis scale applied first.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pure translation.
    ///
    /// ```
    /// use trainyard::{Transform, Vec3};
    ///
    /// let t = Transform::from_position(Vec3::new(0.0, 0.8, 0.0));
    /// assert_eq!(t.apply(Vec3::X), Vec3::new(1.0, 0.8, 0.0));
    /// ```
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Rotation from Euler angles applied X, then Y, then Z about world axes.
    ///
    /// This matches the conventional XYZ Euler order used by DCC tools. Call
    /// sites that need another order should chain the `rotate_*` builders.
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        Self::new()
            .rotate_x(angles.x)
            .rotate_y(angles.y)
            .rotate_z(angles.z)
    }

    /// Sets the translation component.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Appends a rotation about the world X axis.
    pub fn rotate_x(self, angle: f32) -> Self {
        self.rotate(Axis::X, angle)
    }

    /// Appends a rotation about the world Y axis.
    pub fn rotate_y(self, angle: f32) -> Self {
        self.rotate(Axis::Y, angle)
    }

    /// Appends a rotation about the world Z axis.
    pub fn rotate_z(self, angle: f32) -> Self {
        self.rotate(Axis::Z, angle)
    }

    /// Appends a rotation step; it is applied after every step declared so far.
    pub fn rotate(mut self, axis: Axis, angle: f32) -> Self {
        self.rotation = (axis.rotation(angle) * self.rotation).normalize();
        self
    }

    /// Sets non-uniform scale factors.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the same scale factor on all axes.
    ///
    /// ```
    /// use trainyard::{Transform, Vec3};
    ///
    /// let t = Transform::new().uniform_scale(2.0);
    /// assert_eq!(t.scale, Vec3::new(2.0, 2.0, 2.0));
    /// ```
    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Transforms a point: scale, then rotate, then translate.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.rotation * (self.scale * point) + self.position
    }

    /// Transforms a direction. Translation is ignored and the result is
    /// renormalised, so non-uniform scale is handled with the inverse scale.
    pub fn apply_normal(&self, normal: Vec3) -> Vec3 {
        (self.rotation * (normal / self.scale)).normalize_or_zero()
    }

    /// 4×4 matrix equivalent to [`Transform::apply`].
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Whether this transform is a pure translation.
    pub fn is_translation(&self) -> bool {
        self.rotation == Quat::IDENTITY && self.scale == Vec3::ONE
    }
}

/// Builds a transform from a translation, ordered axis rotations and scale.
///
/// ```
/// use trainyard::{compose, Axis, Vec3};
/// use std::f32::consts::FRAC_PI_2;
///
/// let t = compose(Vec3::ZERO, &[(Axis::Z, FRAC_PI_2)], Vec3::ONE);
/// let p = t.apply(Vec3::X);
/// assert!((p - Vec3::Y).length() < 1e-6);
/// ```
pub fn compose(translation: Vec3, rotations: &[AxisRotation], scale: Vec3) -> Transform {
    rotations
        .iter()
        .fold(Transform::new(), |t, &(axis, angle)| t.rotate(axis, angle))
        .position(translation)
        .scale(scale)
}

/// Applies `transform` to `point`.
pub fn apply(transform: &Transform, point: Vec3) -> Vec3 {
    transform.apply(point)
}
