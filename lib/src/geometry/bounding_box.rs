//! Axis-aligned bounding boxes in 2D and 3D.

use super::{Point, Point3};
use crate::Coord;
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box with scaled integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Create a bounding box from explicit corners.
    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Compute the bounding box of a point sequence. `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first, first);
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    /// Expand the box to contain a point.
    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand the box to contain another box.
    pub fn merge(&mut self, other: &BoundingBox) {
        self.include(other.min);
        self.include(other.max);
    }

    /// Return a copy grown by `delta` on every side.
    pub fn inflated(&self, delta: Coord) -> Self {
        Self {
            min: Point::new(self.min.x - delta, self.min.y - delta),
            max: Point::new(self.max.x + delta, self.max.y + delta),
        }
    }

    /// Check whether two boxes overlap (touching counts).
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// A 3D axis-aligned bounding box with scaled integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox3 {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox3 {
    /// Create a bounding box from explicit corners.
    #[inline]
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Expand the box to contain a point.
    pub fn include(&mut self, p: Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Return a copy grown by `delta` on every side.
    pub fn inflated(&self, delta: Coord) -> Self {
        Self {
            min: Point3::new(self.min.x - delta, self.min.y - delta, self.min.z - delta),
            max: Point3::new(self.max.x + delta, self.max.y + delta, self.max.z + delta),
        }
    }

    /// Check whether two boxes overlap (touching counts).
    pub fn intersects(&self, other: &BoundingBox3) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(vec![
            Point::new(3, -1),
            Point::new(-5, 9),
            Point::new(0, 0),
        ])
        .unwrap();
        assert_eq!(bbox.min, Point::new(-5, -1));
        assert_eq!(bbox.max, Point::new(3, 9));
        assert!(BoundingBox::from_points(vec![]).is_none());
    }

    #[test]
    fn test_inflate_and_intersect() {
        let a = BoundingBox::new(Point::new(0, 0), Point::new(10, 10));
        let b = BoundingBox::new(Point::new(15, 0), Point::new(25, 10));
        assert!(!a.intersects(&b));
        assert!(a.inflated(5).intersects(&b));
        // Touching boxes intersect.
        let c = BoundingBox::new(Point::new(10, 0), Point::new(20, 10));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_bbox3_intersects() {
        let mut a = BoundingBox3::new(Point3::new(0, 0, 0), Point3::new(10, 10, 10));
        let b = BoundingBox3::new(Point3::new(0, 0, 20), Point3::new(10, 10, 30));
        assert!(!a.intersects(&b));
        a.include(Point3::new(0, 0, 25));
        assert!(a.intersects(&b));
    }
}
