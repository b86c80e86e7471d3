//! User-tunable clipping settings.
//!
//! [`ClipSettings`] mirrors the preference set a host application exposes
//! for the clip assistant. The host owns storage; this crate only reads the
//! values and checks them before use.

use crate::error::{ClipError, ClipResult};

/// Lower bound for `start_factor` and `end_factor`.
pub const MIN_FACTOR: f32 = 0.01;
/// Lower bound for the manual clip start distance.
pub const MIN_START_DISTANCE: f32 = 0.000_001;
/// Lower bound for the manual clip end distance.
pub const MIN_END_DISTANCE: f32 = 0.01;

/// Settings controlling how clip distances are chosen and where they go.
///
/// Mutating `with_*` methods consume and return `Self` for chaining:
///
/// ```
/// use clip_assistant::ClipSettings;
///
/// let settings = ClipSettings::default()
///     .with_end_factor(2.0)
///     .with_camera_clipping(true);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSettings {
    /// Derive clip distances from the selected objects. When false the fixed
    /// `start_distance` / `end_distance` pair is used.
    pub use_object_scale: bool,
    /// Divider for the near distance. Higher values give a smaller clip start.
    pub start_factor: f32,
    /// Multiplier for the far distance. Higher values give a larger clip end.
    pub end_factor: f32,
    /// Manual clip start.
    pub start_distance: f32,
    /// Manual clip end.
    pub end_distance: f32,
    /// Also write the range to the active camera of each viewport.
    pub camera_clipping: bool,
    /// Also write the range to volumetric effects.
    pub volume_clipping: bool,
    /// Keep a header label with the last applied range.
    pub show_clipping_distance: bool,
    /// Log every applied range at info level.
    pub debug_output: bool,
    /// Log timings of each clipping pass at debug level.
    pub debug_profiling: bool,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            use_object_scale: true,
            start_factor: 1.0,
            end_factor: 1.0,
            start_distance: 0.001,
            end_distance: 100.0,
            camera_clipping: false,
            volume_clipping: false,
            show_clipping_distance: true,
            debug_output: false,
            debug_profiling: false,
        }
    }
}

impl ClipSettings {
    /// Settings for a fixed clip range with automatic mode switched off.
    pub fn manual(start_distance: f32, end_distance: f32) -> Self {
        Self {
            use_object_scale: false,
            start_distance,
            end_distance,
            ..Self::default()
        }
    }

    pub fn with_use_object_scale(mut self, enabled: bool) -> Self {
        self.use_object_scale = enabled;
        self
    }

    pub fn with_start_factor(mut self, factor: f32) -> Self {
        self.start_factor = factor;
        self
    }

    pub fn with_end_factor(mut self, factor: f32) -> Self {
        self.end_factor = factor;
        self
    }

    pub fn with_camera_clipping(mut self, enabled: bool) -> Self {
        self.camera_clipping = enabled;
        self
    }

    pub fn with_volume_clipping(mut self, enabled: bool) -> Self {
        self.volume_clipping = enabled;
        self
    }

    pub fn with_debug_output(mut self, enabled: bool) -> Self {
        self.debug_output = enabled;
        self
    }

    pub fn with_debug_profiling(mut self, enabled: bool) -> Self {
        self.debug_profiling = enabled;
        self
    }

    /// Checks every numeric field against its allowed range.
    ///
    /// Returns the first violation found. The fixed distances are only
    /// checked in manual mode, where they are actually used.
    pub fn validate(&self) -> ClipResult<()> {
        check_min("start_factor", self.start_factor, MIN_FACTOR)?;
        check_min("end_factor", self.end_factor, MIN_FACTOR)?;

        if !self.use_object_scale {
            check_min("start_distance", self.start_distance, MIN_START_DISTANCE)?;
            check_min("end_distance", self.end_distance, MIN_END_DISTANCE)?;
            if self.end_distance <= self.start_distance {
                return Err(ClipError::InvalidSettings(format!(
                    "end_distance ({}) must be greater than start_distance ({})",
                    self.end_distance, self.start_distance
                )));
            }
        }
        Ok(())
    }
}

fn check_min(name: &str, value: f32, min: f32) -> ClipResult<()> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(ClipError::InvalidSettings(format!(
            "{} must be finite and >= {}, got {}",
            name, min, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ClipSettings::default().validate().is_ok());
    }

    #[test]
    fn factor_below_minimum_is_rejected() {
        let settings = ClipSettings::default().with_start_factor(0.001);
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("start_factor"));
    }

    #[test]
    fn nan_factor_is_rejected() {
        let settings = ClipSettings::default().with_end_factor(f32::NAN);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn manual_distances_must_be_ordered() {
        assert!(ClipSettings::manual(0.1, 50.0).validate().is_ok());
        assert!(ClipSettings::manual(10.0, 5.0).validate().is_err());
        assert!(ClipSettings::manual(0.0, 5.0).validate().is_err());
    }

    #[test]
    fn manual_distances_ignored_in_auto_mode() {
        let settings = ClipSettings {
            start_distance: 0.0,
            end_distance: 0.0,
            ..ClipSettings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
