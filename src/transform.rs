//! Placement of scene objects.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position
//! and scale. Rotation is left out: host object dimensions are reported in
//! local axes with scale applied, so it never affects clipping.

use crate::math::Vec3;

/// Object placement: world position and per-axis scale.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```
/// use clip_assistant::Transform;
///
/// let mut transform = Transform::new();
/// transform.set_position_xyz(5.0, 2.0, 0.0).set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    /// Get the position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the position.
    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Set the position from x, y, z components.
    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    // ============ Scale ============

    /// Get the scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the scale.
    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::splat(s);
        self
    }

    /// Multiply the current scale uniformly.
    pub fn scale_uniform(&mut self, factor: f32) -> &mut Self {
        self.scale = self.scale * factor;
        self
    }

    /// Local extents with this transform's scale applied.
    ///
    /// Negative (mirroring) scale still yields positive extents.
    pub fn scaled_extents(&self, extents: Vec3) -> Vec3 {
        extents.mul_elements(self.scale).abs()
    }
}
