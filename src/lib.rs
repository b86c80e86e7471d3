//! Automatic viewport and camera clipping distances.
//!
//! This crate picks near/far clip distances from the size and spread of the
//! selected objects, so small details are not cut by the near plane and
//! large scenes still fit inside the far plane.
//!
//! The host application owns the scene and the input loop. It reaches this
//! crate through two entry points:
//!
//! - [`compute_clip_range`]: the pure heuristic.
//! - [`ClipController`]: an on/off auto-clip mode that reacts to input
//!   events and writes ranges back through the [`ClipHost`] trait.
//!
//! # Quick Start
//!
//! ```
//! use clip_assistant::prelude::*;
//!
//! let settings = ClipSettings::default();
//! let range = compute_clip_range(
//!     10.0,
//!     Some(&[Vec3::new(2.0, 2.0, 2.0)]),
//!     &[Vec3::ZERO],
//!     &settings,
//! )?;
//! assert!(range.near() < range.far());
//! # Ok::<(), clip_assistant::ClipError>(())
//! ```

// Public API - exposed to library consumers
pub mod clip_range;
pub mod controller;
pub mod error;
pub mod math;
pub mod object;
pub mod scene;
pub mod settings;
pub mod transform;
pub mod viewport;

// Re-export commonly needed types at crate root for convenience
pub use clip_range::{compute_clip_range, compute_for_objects, ClipRange};
pub use controller::{ClipController, ClipHost, ClipUpdate, InputEvent, InputKind, Modifiers};
pub use error::{ClipError, ClipResult};
pub use object::{Object3D, ObjectKind};
pub use scene::{LoadError, Scene, SceneObject};
pub use settings::ClipSettings;
pub use transform::Transform;
pub use viewport::{OrbitViewport, ViewportCamera};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use clip_assistant::prelude::*;
/// ```
pub mod prelude {
    // Calculator
    pub use crate::clip_range::{compute_clip_range, compute_for_objects, ClipRange};
    pub use crate::error::{ClipError, ClipResult};
    pub use crate::settings::ClipSettings;

    // Host boundary
    pub use crate::controller::{
        ClipController, ClipHost, ClipUpdate, InputEvent, InputKind, Modifiers,
    };
    pub use crate::object::{Object3D, ObjectKind};

    // Reference scene
    pub use crate::scene::{Scene, SceneObject};
    pub use crate::viewport::{OrbitViewport, ViewportCamera};

    // Math
    pub use crate::math::{Aabb, Vec3};
}
