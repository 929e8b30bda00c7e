//! Shared numeric defaults.
//!
//! Literals that more than one module relies on live here so the templates,
//! the config defaults and the CLI agree.

/// Default number of sides for cylinder templates.
///
/// # Examples
/// ```
/// use trainyard::constants::{DEFAULT_SEGMENTS, MAX_SEGMENTS, MIN_SEGMENTS};
/// assert!(DEFAULT_SEGMENTS >= MIN_SEGMENTS && DEFAULT_SEGMENTS <= MAX_SEGMENTS);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Fewest sides a cylinder template accepts.
pub const MIN_SEGMENTS: u32 = 3;

/// Most sides a cylinder template accepts.
pub const MAX_SEGMENTS: u32 = 4096;

/// Default material metallic factor when none is given.
pub const DEFAULT_METALLIC: f32 = 0.0;

/// Default material roughness factor when none is given.
pub const DEFAULT_ROUGHNESS: f32 = 1.0;
