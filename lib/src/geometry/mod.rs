//! Geometry primitives for the interlocking generator.
//!
//! This module provides the fundamental geometric types used throughout the
//! pipeline:
//! - [`Point`] and [`Point3`] - 2D and 3D points with integer coordinates (scaled)
//! - [`Polygon`] - Closed contour
//! - [`ExPolygon`] - Polygon with holes (exterior + interior contours)
//! - [`BoundingBox`] and [`BoundingBox3`] - Axis-aligned bounding boxes
//! - [`Transform2D`] - Rotation matrices applied to integer points
//!
//! ## Coordinate System
//!
//! Scaled integer coordinates are used internally to avoid floating-point
//! precision issues. Coordinates are scaled by `SCALING_FACTOR` (1,000), so
//! 1 unit = 1 micrometer.
//!
//! - Use `scale()` to convert from mm to internal units
//! - Use `unscale()` to convert from internal units to mm

mod bounding_box;
mod expolygon;
mod point;
mod polygon;
mod transform;

pub use bounding_box::{BoundingBox, BoundingBox3};
pub use expolygon::{expolygons_bounding_box, point_in_expolygons, ExPolygon, ExPolygons};
pub use point::{Point, Point3, Points};
pub use polygon::{Polygon, Polygons};
pub use transform::Transform2D;
