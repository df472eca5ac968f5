//! 2D linear transforms applied to integer points.
//!
//! The interlocking pattern is voxelized in a rotated frame; the rotation is
//! the only place floating point enters the geometry. Results are rounded to
//! the nearest integer unit, so a transform and its inverse compose to the
//! identity within one unit per coordinate.

use super::Point;
use crate::{Coord, CoordF};

/// A 2×2 matrix applied about the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    m00: CoordF,
    m01: CoordF,
    m10: CoordF,
    m11: CoordF,
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m00: 1.0,
        m01: 0.0,
        m10: 0.0,
        m11: 1.0,
    };

    /// Counter-clockwise rotation by an angle in degrees.
    pub fn rotation_degrees(angle: CoordF) -> Self {
        let rad = angle.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            m00: cos,
            m01: -sin,
            m10: sin,
            m11: cos,
        }
    }

    /// The inverse transform.
    ///
    /// The matrix must be invertible; rotations always are.
    pub fn inverse(&self) -> Self {
        let det = self.m00 * self.m11 - self.m01 * self.m10;
        Self {
            m00: self.m11 / det,
            m01: -self.m01 / det,
            m10: -self.m10 / det,
            m11: self.m00 / det,
        }
    }

    /// Apply the matrix to a point, rounding to the nearest integer unit.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let x = self.m00 * p.x as CoordF + self.m01 * p.y as CoordF;
        let y = self.m10 * p.x as CoordF + self.m11 * p.y as CoordF;
        Point::new(x.round() as Coord, y.round() as Coord)
    }
}
