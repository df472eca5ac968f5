//! Polygon-with-holes type.
//!
//! An [`ExPolygon`] is one outer contour plus zero or more holes; a set of
//! them ([`ExPolygons`]) is the unit all boolean and offset operations work
//! on.

use super::{BoundingBox, Point, Polygon, Transform2D};
use serde::{Deserialize, Serialize};

/// A polygon with holes: one exterior contour and any number of interior
/// contours.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExPolygon {
    /// The outer boundary.
    pub contour: Polygon,
    /// Holes inside the contour.
    pub holes: Vec<Polygon>,
}

impl ExPolygon {
    /// Create an ExPolygon without holes.
    #[inline]
    pub fn new(contour: Polygon) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    /// Create an ExPolygon with holes.
    #[inline]
    pub fn with_holes(contour: Polygon, holes: Vec<Polygon>) -> Self {
        Self { contour, holes }
    }

    /// Check if the contour is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contour.is_empty()
    }

    /// Net area: the contour's area minus the holes'.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| h.area().abs()).sum();
        self.contour.area().abs() - holes
    }

    /// Check whether a point lies inside the contour but outside all holes.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.contour.contains(p) && !self.holes.iter().any(|h| h.contains(p))
    }

    /// Iterate over all rings: the contour first, then the holes.
    pub fn rings(&self) -> impl Iterator<Item = &Polygon> {
        std::iter::once(&self.contour).chain(self.holes.iter())
    }

    /// Return a translated copy.
    pub fn translated(&self, v: Point) -> Self {
        Self {
            contour: self.contour.translated(v),
            holes: self.holes.iter().map(|h| h.translated(v)).collect(),
        }
    }

    /// Return a copy with the matrix applied to every point.
    pub fn transformed(&self, m: &Transform2D) -> Self {
        Self {
            contour: self.contour.transformed(m),
            holes: self.holes.iter().map(|h| h.transformed(m)).collect(),
        }
    }

    /// Bounding box of the outer contour (holes lie inside it).
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.contour.bounding_box()
    }
}

impl From<Polygon> for ExPolygon {
    #[inline]
    fn from(contour: Polygon) -> Self {
        Self::new(contour)
    }
}

/// Type alias for a collection of ExPolygons.
pub type ExPolygons = Vec<ExPolygon>;

/// Bounding box of a whole set, `None` when the set has no points.
pub fn expolygons_bounding_box(expolygons: &[ExPolygon]) -> Option<BoundingBox> {
    let mut result: Option<BoundingBox> = None;
    for expoly in expolygons {
        if let Some(bbox) = expoly.bounding_box() {
            match &mut result {
                Some(acc) => acc.merge(&bbox),
                None => result = Some(bbox),
            }
        }
    }
    result
}

/// Check whether a point is inside any ExPolygon of the set.
pub fn point_in_expolygons(p: &Point, expolygons: &[ExPolygon]) -> bool {
    expolygons.iter().any(|e| e.contains_point(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donut() -> ExPolygon {
        let outer = Polygon::rectangle(Point::new(0, 0), Point::new(100, 100));
        let mut hole = Polygon::rectangle(Point::new(25, 25), Point::new(75, 75));
        hole.reverse();
        ExPolygon::with_holes(outer, vec![hole])
    }

    #[test]
    fn test_area_with_hole() {
        let expoly = donut();
        assert_eq!(expoly.area(), 10_000.0 - 2_500.0);
    }

    #[test]
    fn test_contains_point_with_hole() {
        let expoly = donut();
        assert!(expoly.contains_point(&Point::new(10, 10)));
        assert!(!expoly.contains_point(&Point::new(50, 50))); // in the hole
        assert!(!expoly.contains_point(&Point::new(150, 50))); // outside
    }

    #[test]
    fn test_rings_order() {
        let expoly = donut();
        let rings: Vec<_> = expoly.rings().collect();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0], &expoly.contour);
    }

    #[test]
    fn test_set_bounding_box() {
        let a = ExPolygon::from(Polygon::rectangle(Point::new(0, 0), Point::new(10, 10)));
        let b = ExPolygon::from(Polygon::rectangle(Point::new(50, -20), Point::new(60, 5)));
        let bbox = expolygons_bounding_box(&[a, b]).unwrap();
        assert_eq!(bbox.min, Point::new(0, -20));
        assert_eq!(bbox.max, Point::new(60, 10));
        assert!(expolygons_bounding_box(&[]).is_none());
    }

    #[test]
    fn test_point_in_expolygons() {
        let set = vec![
            ExPolygon::from(Polygon::rectangle(Point::new(0, 0), Point::new(10, 10))),
            ExPolygon::from(Polygon::rectangle(Point::new(100, 0), Point::new(110, 10))),
        ];
        assert!(point_in_expolygons(&Point::new(5, 5), &set));
        assert!(point_in_expolygons(&Point::new(105, 5), &set));
        assert!(!point_in_expolygons(&Point::new(50, 5), &set));
    }
}
