//! Axis-aligned bounding boxes.

use super::vec3::Vec3;

/// An axis-aligned bounding box in local object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |aabb, p| aabb.expanded(p)))
    }

    /// Returns a box grown to include `point`.
    pub fn expanded(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Extents along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the same box moved so its centre sits at the origin.
    pub fn centered(&self) -> Self {
        let half = self.size() * 0.5;
        Self::new(-half, half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_encloses_all() {
        let aabb = Aabb::from_points([
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(3.0, -4.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 1.0, 2.0));
        assert_eq!(aabb.size(), Vec3::new(4.0, 5.0, 2.0));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn centered_keeps_size() {
        let aabb = Aabb::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(4.0, 6.0, 2.0));
        let centered = aabb.centered();
        assert_eq!(centered.size(), aabb.size());
        assert_relative_eq!(centered.center().y, 0.0);
        assert_eq!(aabb.center(), Vec3::new(3.0, 4.0, 2.0));
    }
}
