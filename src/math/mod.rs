//! Minimal vector math used by the clip calculator and the reference scene.

pub mod bounds;
pub mod vec3;

pub use bounds::Aabb;
pub use vec3::Vec3;
