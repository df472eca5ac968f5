//! # Interlock
//!
//! A Rust rewrite of the CuraEngine interlocking structure generator.
//!
//! When two sliced models assigned to different extruders meet along a shared
//! boundary, plain interlayer adhesion is often the weakest point of the
//! finished part. This library rewrites the per-layer outlines of both models
//! so that they interleave along the contact region with a dovetail-like beam
//! pattern, mechanically locking the parts together:
//!
//! - Voxelize the shell (walls plus top/bottom skin) of both models on a
//!   rotated cell grid
//! - Intersect the two shells to find the contact cells
//! - Stamp a per-cell beam template into every contact cell, for each model
//! - Union per beam band, clip against the combined model envelope, rotate
//!   back, and rewrite each model's outlines
//!
//! ## Example
//!
//! ```rust,ignore
//! use interlock::{generate_interlocking_structure, SlicedMesh};
//!
//! let mut volumes: Vec<SlicedMesh> = slice_models();
//! generate_interlocking_structure(&mut volumes);
//! // volumes now carry interleaved outlines along their shared boundaries
//! ```

// Core modules
pub mod clipper;
pub mod geometry;
pub mod interlock;
pub mod slice;
pub mod voxel;

// Re-export commonly used types
pub use geometry::{
    BoundingBox, BoundingBox3, ExPolygon, ExPolygons, Point, Point3, Polygon, Transform2D,
};
pub use interlock::generate_interlocking_structure;
pub use slice::{Layer, MeshSettings, SlicedMesh};
pub use voxel::{DilationKernel, GridPoint3, KernelShape, VoxelGrid};

/// Coordinate type used throughout the library.
/// Using i64 for integer coordinates (scaled by SCALING_FACTOR) to avoid floating-point issues.
pub type Coord = i64;

/// Floating-point coordinate type for unscaled values.
pub type CoordF = f64;

/// Scaling factor: coordinates are stored as integers scaled by this factor.
/// 1 unit = 1 micrometer, so 1mm = 1_000 units.
/// This matches CuraEngine's internal micrometer resolution.
pub const SCALING_FACTOR: f64 = 1_000.0;

/// Scale a floating-point coordinate (mm) to integer units.
#[inline]
pub fn scale(v: CoordF) -> Coord {
    (v * SCALING_FACTOR).round() as Coord
}

/// Unscale an integer coordinate to floating-point (mm).
#[inline]
pub fn unscale(v: Coord) -> CoordF {
    v as CoordF / SCALING_FACTOR
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling() {
        // 1mm should scale to 1_000
        assert_eq!(scale(1.0), 1_000);

        // And back
        assert!((unscale(1_000) - 1.0).abs() < 1e-10);

        // Test sub-millimeter precision
        assert_eq!(scale(0.001), 1); // 1 micron
        assert_eq!(scale(0.1), 100); // 100 microns
    }
}
