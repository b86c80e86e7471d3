//! Near/far clip distance heuristic.
//!
//! Given the viewport's view distance and the extents and positions of the
//! target objects, [`compute_clip_range`] picks a `(near, far)` pair that
//! keeps small objects from being cut by the near plane while keeping the
//! far plane just beyond the whole selection.
//!
//! # Formulas
//!
//! With view distance `d`:
//!
//! - `min_view_range = d / (1 + d) / 10`
//! - `max_view_range = (1 + d) * 10`
//!
//! With no targets the result is `(min_view_range, max_view_range)`.
//! Otherwise:
//!
//! - `near = (min_dim / 2) * min_view_range`
//! - `far = (max_dim + spread) * 2 * max_view_range`
//!
//! where `min_dim` is the smallest non-zero extent of any object, `max_dim`
//! the largest extent, and `spread` the distance between the component-wise
//! minimum and maximum of the object locations. Note that `spread` is not the
//! farthest pair of objects: for a diagonal layout it can overshoot it.
//!
//! `near` is then divided by `start_factor` and `far` multiplied by
//! `end_factor`.

use std::fmt;

use log::trace;

use crate::error::{ClipError, ClipResult};
use crate::math::Vec3;
use crate::object::Object3D;
use crate::settings::ClipSettings;

/// A validated clipping range, `0 < near < far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRange {
    near: f32,
    far: f32,
}

impl ClipRange {
    /// Creates a range, rejecting pairs that break `0 < near < far` or are
    /// not finite.
    pub fn new(near: f32, far: f32) -> ClipResult<Self> {
        if near.is_finite() && far.is_finite() && near > 0.0 && near < far {
            Ok(Self { near, far })
        } else {
            Err(ClipError::InvalidRange { near, far })
        }
    }

    /// Range derived from the view distance alone.
    pub fn from_view_distance(view_distance: f32) -> ClipResult<Self> {
        check_view_distance(view_distance)?;
        let bounds = ViewRange::from_distance(view_distance);
        Ok(Self {
            near: bounds.min,
            far: bounds.max,
        })
    }

    /// Near clip distance.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Returns the pair as a tuple.
    pub fn as_tuple(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    /// Short header label, e.g. `Clip: 0.0909 m | 440 m`.
    pub fn label(&self) -> String {
        format!(
            "Clip: {} | {}",
            format_distance(self.near),
            format_distance(self.far)
        )
    }
}

impl fmt::Display for ClipRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.near, self.far)
    }
}

/// Computes the clip range for a set of target objects.
///
/// `object_dimensions` of `None` or an empty slice means there are no
/// targets and only the view distance is used. Locations only feed the
/// spread term; they may be empty even when dimensions are given.
///
/// In manual mode (`settings.use_object_scale == false`) objects are not
/// inspected and the fixed distances from `settings` are returned.
///
/// # Errors
///
/// [`ClipError::InvalidViewDistance`] when `view_distance` is not finite or
/// not positive, [`ClipError::InvalidSettings`] when `settings` fail
/// [`ClipSettings::validate`].
pub fn compute_clip_range(
    view_distance: f32,
    object_dimensions: Option<&[Vec3]>,
    object_locations: &[Vec3],
    settings: &ClipSettings,
) -> ClipResult<ClipRange> {
    let dimensions = object_dimensions.unwrap_or(&[]);
    compute_from_iters(
        view_distance,
        dimensions.iter().copied(),
        object_locations.iter().copied(),
        settings,
    )
}

/// Same as [`compute_clip_range`], reading dimensions and locations
/// straight from host objects.
pub fn compute_for_objects(
    view_distance: f32,
    objects: &[Object3D],
    settings: &ClipSettings,
) -> ClipResult<ClipRange> {
    compute_from_iters(
        view_distance,
        objects.iter().map(|o| o.dimensions),
        objects.iter().map(|o| o.location),
        settings,
    )
}

fn compute_from_iters<D, L>(
    view_distance: f32,
    dimensions: D,
    locations: L,
    settings: &ClipSettings,
) -> ClipResult<ClipRange>
where
    D: IntoIterator<Item = Vec3>,
    L: IntoIterator<Item = Vec3>,
{
    check_view_distance(view_distance)?;
    settings.validate()?;

    if !settings.use_object_scale {
        return ClipRange::new(settings.start_distance, settings.end_distance);
    }

    let view_range = ViewRange::from_distance(view_distance);
    let stats = DimensionStats::collect(dimensions);
    if stats.count == 0 {
        return Ok(view_range.scaled(settings));
    }

    let spread = location_spread(locations);
    let near = stats
        .min_positive
        .map_or(0.0, |min_dim| (min_dim / 2.0) * view_range.min);
    let extent = stats.max.unwrap_or(0.0) + spread;

    let fallback = view_range.scaled(settings);
    let near = positive_or(near / settings.start_factor, fallback.near);
    // The choice between object and fallback far must not depend on `d`,
    // so only the extent decides it and overflow is clamped.
    let far = if extent.is_finite() && extent > 0.0 {
        (extent * 2.0 * view_range.max * settings.end_factor).clamp(MIN_FAR, f32::MAX)
    } else {
        trace!("extent {} unusable, falling back to {}", extent, fallback.far);
        fallback.far
    };

    Ok(ordered(near, far, fallback.near))
}

fn check_view_distance(view_distance: f32) -> ClipResult<()> {
    if view_distance.is_finite() && view_distance > 0.0 {
        Ok(())
    } else {
        Err(ClipError::InvalidViewDistance(view_distance))
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        trace!("clip value {} unusable, falling back to {}", value, fallback);
        fallback
    }
}

/// Distance-derived bounds on the clip range.
#[derive(Debug, Clone, Copy)]
struct ViewRange {
    min: f32,
    max: f32,
}

impl ViewRange {
    /// `d` must already be finite and positive.
    fn from_distance(d: f32) -> Self {
        // Clamped so a subnormal or huge distance cannot yield 0 or inf.
        Self {
            min: (d / (1.0 + d) / 10.0).max(f32::MIN_POSITIVE),
            max: ((1.0 + d) * 10.0).min(f32::MAX),
        }
    }

    /// Applies the settings factors. `far` always keeps `end_factor`; only
    /// `near` moves if the pair comes out of order.
    fn scaled(&self, settings: &ClipSettings) -> ClipRange {
        let near = self.min / settings.start_factor;
        let far = (self.max * settings.end_factor).min(f32::MAX);
        ordered(near, far, near)
    }
}

/// Floor for an object-derived far distance.
const MIN_FAR: f32 = 1e-30;

/// Ratio of near to far used when nothing else fits under `far`.
const MIN_NEAR_RATIO: f32 = 1e-3;

/// Builds a range from `far` as given, pulling `near` under it if needed:
/// first to `fallback_near`, then to a fixed fraction of `far`.
///
/// `far` must be finite and positive.
fn ordered(near: f32, far: f32, fallback_near: f32) -> ClipRange {
    if near > 0.0 && near < far {
        return ClipRange { near, far };
    }
    let pulled = near.min(fallback_near);
    let near = if pulled > 0.0 && pulled < far {
        pulled
    } else {
        (far * MIN_NEAR_RATIO).max(f32::MIN_POSITIVE)
    };
    trace!("near pulled under far {}: {}", far, near);
    ClipRange { near, far }
}

/// Extremes of the extents across all target objects.
#[derive(Debug, Clone, Copy, Default)]
struct DimensionStats {
    /// Number of dimension vectors seen.
    count: usize,
    /// Smallest strictly-positive finite component.
    min_positive: Option<f32>,
    /// Largest finite component.
    max: Option<f32>,
}

impl DimensionStats {
    fn collect<I>(dimensions: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut stats = Self::default();
        for dims in dimensions {
            stats.count += 1;
            for c in dims.to_array() {
                if !c.is_finite() {
                    continue;
                }
                stats.max = Some(stats.max.map_or(c, |m| m.max(c)));
                // Flat objects (planes, edges) have zero extents
                if c > 0.0 {
                    stats.min_positive = Some(stats.min_positive.map_or(c, |m| m.min(c)));
                }
            }
        }
        stats
    }
}

/// Distance between the component-wise min and max of `locations`.
/// Zero for fewer than two locations.
pub fn location_spread<I>(locations: I) -> f32
where
    I: IntoIterator<Item = Vec3>,
{
    let mut locations = locations.into_iter();
    let Some(first) = locations.next() else {
        return 0.0;
    };
    let (lo, hi) = locations.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    lo.distance(hi)
}

fn format_distance(value: f32) -> String {
    if value >= 100.0 {
        format!("{:.0} m", value)
    } else if value >= 1.0 {
        format!("{:.2} m", value)
    } else {
        format!("{:.4} m", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube(size: f32) -> Vec3 {
        Vec3::splat(size)
    }

    #[test]
    fn empty_targets_use_view_distance() {
        let settings = ClipSettings::default();
        for d in [1e-6, 0.01, 0.5, 1.0, 10.0, 1000.0, 1e9] {
            let range = compute_clip_range(d, None, &[], &settings).unwrap();
            assert!(range.near() > 0.0, "near for d={}", d);
            assert!(range.near() < range.far(), "order for d={}", d);

            let same = compute_clip_range(d, Some(&[]), &[], &settings).unwrap();
            assert_eq!(range, same);
        }
    }

    #[test]
    fn empty_targets_match_view_range_formula() {
        let range = compute_clip_range(10.0, None, &[], &ClipSettings::default()).unwrap();
        assert_relative_eq!(range.near(), 10.0 / 11.0 / 10.0, epsilon = 1e-7);
        assert_relative_eq!(range.far(), 110.0, epsilon = 1e-4);
    }

    #[test]
    fn single_cube_at_origin() {
        let range = compute_clip_range(
            10.0,
            Some(&[cube(2.0)]),
            &[Vec3::ZERO],
            &ClipSettings::default(),
        )
        .unwrap();

        // near = (2 / 2) * (10 / 11 / 10), far = (2 + 0) * 2 * 110
        assert_relative_eq!(range.near(), 1.0 / 11.0, epsilon = 1e-7);
        assert_relative_eq!(range.far(), 440.0, epsilon = 1e-3);
    }

    #[test]
    fn spread_extends_far() {
        let settings = ClipSettings::default();
        let single =
            compute_clip_range(10.0, Some(&[cube(2.0)]), &[Vec3::ZERO], &settings).unwrap();
        let pair = compute_clip_range(
            10.0,
            Some(&[cube(2.0), cube(2.0)]),
            &[Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)],
            &settings,
        )
        .unwrap();

        // spread of 100 times 2 * max_view_range
        assert_relative_eq!(pair.far() - single.far(), 100.0 * 2.0 * 110.0, epsilon = 0.1);
        assert_eq!(pair.near(), single.near());
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let dims = [cube(0.3), Vec3::new(4.0, 0.0, 1.5)];
        let locs = [Vec3::new(-3.0, 2.0, 7.0), Vec3::new(12.5, -1.0, 0.25)];
        let settings = ClipSettings::default().with_end_factor(1.7);

        let a = compute_clip_range(7.25, Some(&dims), &locs, &settings).unwrap();
        let b = compute_clip_range(7.25, Some(&dims), &locs, &settings).unwrap();
        assert_eq!(a.near().to_bits(), b.near().to_bits());
        assert_eq!(a.far().to_bits(), b.far().to_bits());
    }

    #[test]
    fn far_is_monotonic_in_view_distance() {
        let settings = ClipSettings::default();
        let dims = [cube(2.0), Vec3::new(0.5, 3.0, 0.0)];
        let locs = [Vec3::ZERO, Vec3::new(5.0, 5.0, 0.0)];

        let mut previous = 0.0;
        for step in 1..200 {
            let d = step as f32 * 0.37;
            let far = compute_clip_range(d, Some(&dims), &locs, &settings)
                .unwrap()
                .far();
            assert!(far >= previous, "far dropped at d={}", d);
            previous = far;
        }
    }

    #[test]
    fn far_is_monotonic_with_small_factors() {
        let settings = ClipSettings::default()
            .with_start_factor(0.01)
            .with_end_factor(0.01);
        let dims = [cube(1.0)];

        let mut previous = 0.0;
        for d in [0.5, 1.0, 10.0, 20.0, 22.0, 23.0, 30.0, 100.0, 1e4] {
            let range = compute_clip_range(d, Some(&dims), &[Vec3::ZERO], &settings).unwrap();
            // end_factor always applies: (1 + 0) * 2 * (1 + d) * 10 * 0.01
            assert_relative_eq!(range.far(), 0.2 * (1.0 + d), max_relative = 1e-5);
            assert!(range.far() >= previous, "far dropped at d={}", d);
            assert!(range.near() > 0.0 && range.near() < range.far());
            previous = range.far();
        }
    }

    #[test]
    fn huge_start_factor_keeps_near_positive() {
        let settings = ClipSettings::default().with_start_factor(1e38);
        let range = compute_clip_range(1e-3, None, &[], &settings).unwrap();
        assert!(range.near() > 0.0);
        assert!(range.near() < range.far());
    }

    #[test]
    fn huge_end_factor_clamps_far() {
        let settings = ClipSettings::default().with_end_factor(1e38);
        let range =
            compute_clip_range(1e6, Some(&[cube(1e3)]), &[Vec3::ZERO], &settings).unwrap();
        assert_eq!(range.far(), f32::MAX);
        assert!(range.near() < range.far());
    }

    #[test]
    fn tiny_extent_keeps_far_positive() {
        let dims = [cube(1e-38)];
        let range =
            compute_clip_range(1e-3, Some(&dims), &[Vec3::ZERO], &ClipSettings::default())
                .unwrap();
        assert!(range.far() >= MIN_FAR);
        assert!(range.near() > 0.0 && range.near() < range.far());
    }

    #[test]
    fn zero_dimensions_fall_back() {
        let settings = ClipSettings::default();
        let range =
            compute_clip_range(4.0, Some(&[Vec3::ZERO]), &[Vec3::ZERO], &settings).unwrap();
        let fallback = ClipRange::from_view_distance(4.0).unwrap();
        assert_eq!(range, fallback);
        assert!(range.near() > 0.0);
    }

    #[test]
    fn flat_plane_ignores_zero_extent() {
        let plane = Vec3::new(4.0, 4.0, 0.0);
        let range =
            compute_clip_range(10.0, Some(&[plane]), &[Vec3::ZERO], &ClipSettings::default())
                .unwrap();
        // min_dim is 4, not 0
        assert_relative_eq!(range.near(), 2.0 / 11.0, epsilon = 1e-6);
    }

    #[test]
    fn non_finite_dimensions_are_skipped() {
        let dims = [Vec3::new(f32::NAN, 2.0, f32::INFINITY)];
        let range =
            compute_clip_range(10.0, Some(&dims), &[Vec3::ZERO], &ClipSettings::default())
                .unwrap();
        assert_relative_eq!(range.near(), 1.0 / 11.0, epsilon = 1e-7);
        assert_relative_eq!(range.far(), 440.0, epsilon = 1e-3);
    }

    #[test]
    fn infinite_location_falls_back_for_far() {
        let dims = [cube(1.0), cube(1.0)];
        let locs = [Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0)];
        let range =
            compute_clip_range(10.0, Some(&dims), &locs, &ClipSettings::default()).unwrap();
        assert_relative_eq!(range.far(), 110.0, epsilon = 1e-4);
    }

    #[test]
    fn rejects_bad_view_distance() {
        let settings = ClipSettings::default();
        for d in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = compute_clip_range(d, None, &[], &settings).unwrap_err();
            assert!(matches!(err, ClipError::InvalidViewDistance(_)));
        }
    }

    #[test]
    fn rejects_invalid_settings() {
        let settings = ClipSettings::default().with_start_factor(0.0);
        let err = compute_clip_range(1.0, None, &[], &settings).unwrap_err();
        assert!(matches!(err, ClipError::InvalidSettings(_)));
    }

    #[test]
    fn manual_mode_ignores_objects() {
        let settings = ClipSettings::manual(0.05, 250.0);
        let range =
            compute_clip_range(3.0, Some(&[cube(1000.0)]), &[Vec3::ZERO], &settings).unwrap();
        assert_eq!(range.as_tuple(), (0.05, 250.0));
    }

    #[test]
    fn factors_scale_near_and_far() {
        let base = ClipSettings::default();
        let scaled = ClipSettings::default()
            .with_start_factor(2.0)
            .with_end_factor(3.0);

        let a = compute_clip_range(10.0, Some(&[cube(2.0)]), &[Vec3::ZERO], &base).unwrap();
        let b = compute_clip_range(10.0, Some(&[cube(2.0)]), &[Vec3::ZERO], &scaled).unwrap();
        assert_relative_eq!(b.near(), a.near() / 2.0, epsilon = 1e-7);
        assert_relative_eq!(b.far(), a.far() * 3.0, epsilon = 1e-2);
    }

    #[test]
    fn extreme_factors_keep_invariant() {
        let settings = ClipSettings::default()
            .with_start_factor(0.01)
            .with_end_factor(0.01);
        let range =
            compute_clip_range(0.001, Some(&[cube(1.0)]), &[Vec3::ZERO], &settings).unwrap();
        assert!(range.near() > 0.0);
        assert!(range.near() < range.far());
    }

    #[test]
    fn objects_and_slices_agree() {
        let objects = [
            Object3D::new(cube(2.0), Vec3::ZERO),
            Object3D::new(Vec3::new(1.0, 0.5, 3.0), Vec3::new(8.0, 1.0, -2.0)),
        ];
        let dims: Vec<Vec3> = objects.iter().map(|o| o.dimensions).collect();
        let locs: Vec<Vec3> = objects.iter().map(|o| o.location).collect();
        let settings = ClipSettings::default();

        assert_eq!(
            compute_for_objects(6.0, &objects, &settings).unwrap(),
            compute_clip_range(6.0, Some(&dims), &locs, &settings).unwrap()
        );
    }

    #[test]
    fn spread_uses_component_extremes() {
        let locs = [
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
        ];
        // min (0,0,0), max (4,3,0)
        assert_relative_eq!(location_spread(locs), 5.0, epsilon = 1e-6);
        assert_eq!(location_spread(std::iter::empty()), 0.0);
        assert_eq!(location_spread([Vec3::ONE]), 0.0);
    }

    #[test]
    fn new_rejects_bad_pairs() {
        assert!(ClipRange::new(0.1, 10.0).is_ok());
        assert!(ClipRange::new(0.0, 10.0).is_err());
        assert!(ClipRange::new(5.0, 5.0).is_err());
        assert!(ClipRange::new(0.1, f32::INFINITY).is_err());
    }

    #[test]
    fn label_adapts_precision() {
        let range = ClipRange::new(1.0 / 11.0, 440.0).unwrap();
        assert_eq!(range.label(), "Clip: 0.0909 m | 440 m");
        let range = ClipRange::new(2.5, 12.5).unwrap();
        assert_eq!(range.label(), "Clip: 2.50 m | 12.50 m");
    }
}
