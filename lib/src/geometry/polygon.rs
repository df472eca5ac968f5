//! Closed polygon type.
//!
//! This module provides the Polygon type representing a closed contour
//! (the edge between the last and first point is implicit).

use super::{BoundingBox, Point, Transform2D};
use serde::{Deserialize, Serialize};

/// A closed polygon defined by an ordered sequence of points.
///
/// The closing edge from the last point back to the first is implicit and is
/// not stored. Winding follows the clipper convention: counter-clockwise
/// outer contours, clockwise holes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polygon from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create an axis-aligned rectangle from its lower and upper corners,
    /// wound counter-clockwise.
    pub fn rectangle(min: Point, max: Point) -> Self {
        Self {
            points: vec![
                min,
                Point::new(max.x, min.y),
                max,
                Point::new(min.x, max.y),
            ],
        }
    }

    /// Get the points of this polygon.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get a mutable reference to the points.
    #[inline]
    pub fn points_mut(&mut self) -> &mut Vec<Point> {
        &mut self.points
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polygon has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the polygon.
    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Reverse the point order (flips the winding).
    #[inline]
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Twice the signed area, exact.
    fn signed_area_doubled(&self) -> i128 {
        let n = self.points.len();
        if n < 3 {
            return 0;
        }
        let mut sum: i128 = 0;
        let mut prev = self.points[n - 1];
        for &p in &self.points {
            sum += prev.x as i128 * p.y as i128 - p.x as i128 * prev.y as i128;
            prev = p;
        }
        sum
    }

    /// Signed area in scaled units squared. Positive for counter-clockwise
    /// winding.
    pub fn area(&self) -> f64 {
        self.signed_area_doubled() as f64 / 2.0
    }

    /// Check whether a point lies inside the polygon (even-odd rule).
    /// Points on a boundary edge may report either side.
    pub fn contains(&self, p: &Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut prev = self.points[n - 1];
        for &cur in &self.points {
            if (prev.y > p.y) != (cur.y > p.y) {
                // Side of the point relative to the edge, exact.
                let d = (cur.x - prev.x) as i128 * (p.y - prev.y) as i128
                    - (p.x - prev.x) as i128 * (cur.y - prev.y) as i128;
                if d == 0 {
                    return true;
                }
                if (d > 0) == (cur.y > prev.y) {
                    inside = !inside;
                }
            }
            prev = cur;
        }
        inside
    }

    /// Translate the polygon in place.
    pub fn translate(&mut self, v: Point) {
        for p in &mut self.points {
            *p += v;
        }
    }

    /// Return a translated copy.
    pub fn translated(&self, v: Point) -> Self {
        let mut result = self.clone();
        result.translate(v);
        result
    }

    /// Return a copy with the matrix applied to every point.
    pub fn transformed(&self, m: &Transform2D) -> Self {
        Self {
            points: self.points.iter().map(|p| m.apply(*p)).collect(),
        }
    }

    /// Compute the bounding box of the polygon's points.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().copied())
    }

    /// Iterate over the edges of the polygon, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

impl From<Vec<Point>> for Polygon {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Type alias for a collection of polygons.
pub type Polygons = Vec<Polygon>;
