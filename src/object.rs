//! Host objects as seen by the clip calculator.

use crate::math::Vec3;

/// Kind of a host scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    #[default]
    Mesh,
    Curve,
    Surface,
    Meta,
    Font,
    Hair,
    PointCloud,
    Volume,
    GreasePencil,
    Armature,
    Lattice,
    Empty,
    Light,
    LightProbe,
    Camera,
    Speaker,
}

impl ObjectKind {
    /// True for kinds that have extents worth clipping around.
    pub fn has_geometry(&self) -> bool {
        !matches!(
            self,
            ObjectKind::Empty
                | ObjectKind::Light
                | ObjectKind::LightProbe
                | ObjectKind::Camera
                | ObjectKind::Speaker
        )
    }
}

/// Bounding extents and world position of a host object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Object3D {
    pub kind: ObjectKind,
    /// Bounding-box extents, scale applied.
    pub dimensions: Vec3,
    /// World position.
    pub location: Vec3,
}

impl Object3D {
    /// Creates a mesh object.
    pub fn new(dimensions: Vec3, location: Vec3) -> Self {
        Self {
            kind: ObjectKind::Mesh,
            dimensions,
            location,
        }
    }

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_kinds() {
        assert!(ObjectKind::Mesh.has_geometry());
        assert!(ObjectKind::Lattice.has_geometry());
        assert!(ObjectKind::GreasePencil.has_geometry());
        assert!(!ObjectKind::Camera.has_geometry());
        assert!(!ObjectKind::Empty.has_geometry());
    }

    #[test]
    fn new_object_is_a_mesh() {
        let obj = Object3D::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(obj.kind, ObjectKind::Mesh);
        assert_eq!(obj.with_kind(ObjectKind::Light).kind, ObjectKind::Light);
    }
}
