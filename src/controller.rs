//! Auto-clip controller and the host boundary.
//!
//! The host application owns the scene, the viewports and the input loop.
//! It exposes them through [`ClipHost`] and forwards input to
//! [`ClipController::handle_event`]. While the controller is active, every
//! navigation-like event recomputes the clip range for each viewport and
//! writes it back through the host.

use std::time::Instant;

use log::{debug, info, warn};

use crate::clip_range::{compute_for_objects, ClipRange};
use crate::error::ClipResult;
use crate::object::Object3D;
use crate::settings::ClipSettings;

/// Access to the host application's viewports and selection.
pub trait ClipHost {
    /// Number of 3D viewports to update.
    fn viewport_count(&self) -> usize;

    /// Distance from the viewport eye to its focal point.
    fn view_distance(&self, viewport: usize) -> f32;

    /// Whether the viewport looks through a scene camera.
    fn has_camera(&self, viewport: usize) -> bool;

    /// Currently selected objects, any kind.
    fn selected_objects(&self) -> Vec<Object3D>;

    fn set_viewport_clip(&mut self, viewport: usize, range: ClipRange);

    fn set_camera_clip(&mut self, viewport: usize, range: ClipRange);

    fn set_volumetric_clip(&mut self, range: ClipRange);
}

/// Kind of input event forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    WheelUp,
    WheelDown,
    TrackpadZoom,
    LeftMouse,
    MiddleMouse,
    RightMouse,
    MouseMove,
    KeyPress,
    Other,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

/// An input event as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True for events that can move the view: zooming, mouse buttons, or
    /// anything with a modifier held.
    pub fn triggers_clipping(&self) -> bool {
        matches!(
            self.kind,
            InputKind::WheelUp
                | InputKind::WheelDown
                | InputKind::TrackpadZoom
                | InputKind::LeftMouse
                | InputKind::MiddleMouse
                | InputKind::RightMouse
        ) || self.modifiers.any()
    }
}

/// Range written to one viewport during a clipping pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportClip {
    pub viewport: usize,
    pub range: ClipRange,
    /// The viewport camera received the range too.
    pub camera: bool,
}

/// Everything written to the host by one clipping pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipUpdate {
    pub viewports: Vec<ViewportClip>,
    /// Range written to volumetric effects, if enabled.
    pub volumetric: Option<ClipRange>,
}

/// Caller-owned auto-clip state.
///
/// Holds the on/off flag, the settings in use, and the last range applied.
#[derive(Debug, Clone, Default)]
pub struct ClipController {
    active: bool,
    pub settings: ClipSettings,
    last_range: Option<ClipRange>,
}

impl ClipController {
    pub fn new(settings: ClipSettings) -> Self {
        Self {
            active: false,
            settings,
            last_range: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flips auto clipping on or off and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_active(!self.active);
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        if active != self.active {
            info!(
                "auto clipping {}",
                if active { "enabled" } else { "disabled" }
            );
        }
        self.active = active;
    }

    /// Last range applied to any viewport.
    pub fn last_range(&self) -> Option<ClipRange> {
        self.last_range
    }

    /// Header text for the last applied range, when enabled in settings.
    pub fn status_label(&self) -> Option<String> {
        if !self.settings.show_clipping_distance {
            return None;
        }
        self.last_range.map(|r| r.label())
    }

    /// Reacts to one host input event.
    ///
    /// Returns `Ok(None)` when the controller is off, the event cannot move
    /// the view, or nothing with geometry is selected.
    pub fn handle_event<H: ClipHost>(
        &mut self,
        event: &InputEvent,
        host: &mut H,
    ) -> ClipResult<Option<ClipUpdate>> {
        if !self.active || !event.triggers_clipping() {
            return Ok(None);
        }

        let targets = clip_targets(host.selected_objects());
        if targets.is_empty() {
            return Ok(None);
        }
        self.apply_to(host, &targets).map(Some)
    }

    /// Runs one clipping pass over every host viewport, regardless of the
    /// active flag. An empty selection clips by view distance alone.
    pub fn apply<H: ClipHost>(&mut self, host: &mut H) -> ClipResult<ClipUpdate> {
        let targets = clip_targets(host.selected_objects());
        self.apply_to(host, &targets)
    }

    fn apply_to<H: ClipHost>(
        &mut self,
        host: &mut H,
        targets: &[Object3D],
    ) -> ClipResult<ClipUpdate> {
        self.settings.validate()?;
        let started = self.settings.debug_profiling.then(Instant::now);

        let mut update = ClipUpdate::default();
        for viewport in 0..host.viewport_count() {
            let distance = host.view_distance(viewport);
            let range = match compute_for_objects(distance, targets, &self.settings) {
                Ok(range) => range,
                Err(err) => {
                    warn!("skipping viewport {}: {}", viewport, err);
                    continue;
                }
            };

            host.set_viewport_clip(viewport, range);
            let camera = self.settings.camera_clipping && host.has_camera(viewport);
            if camera {
                host.set_camera_clip(viewport, range);
            }
            if self.settings.debug_output {
                info!(
                    "viewport {} (distance {}): clip {}",
                    viewport, distance, range
                );
            }

            update.viewports.push(ViewportClip {
                viewport,
                range,
                camera,
            });
            self.last_range = Some(range);
        }

        // Volumetrics are scene-wide; the last viewport wins.
        if self.settings.volume_clipping {
            if let Some(last) = update.viewports.last() {
                host.set_volumetric_clip(last.range);
                update.volumetric = Some(last.range);
            }
        }

        if let Some(started) = started {
            debug!(
                "clipping pass over {} viewport(s), {} target(s): {:?}",
                update.viewports.len(),
                targets.len(),
                started.elapsed()
            );
        }
        Ok(update)
    }
}

/// Selected objects that have extents worth clipping around.
fn clip_targets(selected: Vec<Object3D>) -> Vec<Object3D> {
    selected
        .into_iter()
        .filter(|o| o.kind.has_geometry())
        .collect()
}
