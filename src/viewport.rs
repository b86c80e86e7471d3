//! Orbit-style viewport used by the reference scene.

use crate::clip_range::ClipRange;
use crate::controller::{InputEvent, InputKind};

/// Distance multiplier for one wheel step.
pub const ZOOM_STEP: f32 = 1.2;
/// Closest allowed view distance.
pub const MIN_VIEW_DISTANCE: f32 = 1e-4;
/// Farthest allowed view distance.
pub const MAX_VIEW_DISTANCE: f32 = 1e6;

/// Camera the viewport looks through.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    pub name: String,
    pub clip: Option<ClipRange>,
}

impl ViewportCamera {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clip: None,
        }
    }
}

/// A viewport orbiting a focal point at `view_distance`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitViewport {
    view_distance: f32,
    clip: Option<ClipRange>,
    camera: Option<ViewportCamera>,
}

impl Default for OrbitViewport {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl OrbitViewport {
    /// Creates a viewport at `view_distance`, clamped to the allowed range.
    pub fn new(view_distance: f32) -> Self {
        Self {
            view_distance: clamp_distance(view_distance),
            clip: None,
            camera: None,
        }
    }

    pub fn with_camera(mut self, camera: ViewportCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    pub fn set_view_distance(&mut self, distance: f32) {
        self.view_distance = clamp_distance(distance);
    }

    /// Clip range last written to this viewport.
    pub fn clip(&self) -> Option<ClipRange> {
        self.clip
    }

    pub(crate) fn set_clip(&mut self, range: ClipRange) {
        self.clip = Some(range);
    }

    pub fn camera(&self) -> Option<&ViewportCamera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut ViewportCamera> {
        self.camera.as_mut()
    }

    /// Zooms on wheel and trackpad events. Returns true if the distance
    /// changed.
    pub fn zoom(&mut self, event: &InputEvent) -> bool {
        let before = self.view_distance;
        match event.kind {
            InputKind::WheelUp | InputKind::TrackpadZoom => {
                self.set_view_distance(before / ZOOM_STEP)
            }
            InputKind::WheelDown => self.set_view_distance(before * ZOOM_STEP),
            _ => {}
        }
        self.view_distance != before
    }
}

fn clamp_distance(distance: f32) -> f32 {
    if distance.is_nan() {
        return MIN_VIEW_DISTANCE;
    }
    distance.clamp(MIN_VIEW_DISTANCE, MAX_VIEW_DISTANCE)
}
