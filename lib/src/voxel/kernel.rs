//! Dilation kernels for voxel sets.
//!
//! A kernel is a fixed set of relative cell offsets, enumerated once at
//! construction and replayed for every visited cell. The driver builds two of
//! them per mesh pair (interface thickness, air avoidance) and reuses them
//! across all layers and both meshes.

use super::GridPoint3;
use crate::Coord;

/// The shape of a dilation kernel.
///
/// A cubic kernel covers all cells in a box around the reference cell. A
/// diamond kernel keeps only cells within a Manhattan distance of the center
/// (an L¹ ball). A prism kernel is a diamond in XY extruded straight through
/// the full Z range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelShape {
    Cube,
    Diamond,
    Prism,
}

/// A precomputed set of relative cell offsets.
///
/// Offsets along an odd dimension are symmetric about the reference cell.
/// When a kernel dimension is even, the kernel is applied off center so that
/// the reference cell is at the lower end of the interval: the offsets range
/// over `0..size-1` rather than being symmetric.
#[derive(Clone, Debug)]
pub struct DilationKernel {
    pub size: GridPoint3,
    pub shape: KernelShape,
    pub offsets: Vec<GridPoint3>,
}

impl DilationKernel {
    /// Enumerate the offsets for a kernel of the given size and shape.
    pub fn new(size: GridPoint3, shape: KernelShape) -> Self {
        // Shape membership is evaluated on the index grid around its center.
        let center = GridPoint3::new(size.x / 2, size.y / 2, size.z / 2);
        let radius: Coord = size.x.max(size.y).max(size.z) / 2;
        let radius_xy: Coord = size.x.max(size.y) / 2;

        fn axis_shift(size: Coord) -> Coord {
            if size % 2 == 0 {
                0
            } else {
                size / 2
            }
        }
        let shift = GridPoint3::new(axis_shift(size.x), axis_shift(size.y), axis_shift(size.z));

        let mut offsets = Vec::new();
        for i in 0..size.x {
            for j in 0..size.y {
                for k in 0..size.z {
                    let keep = match shape {
                        KernelShape::Cube => true,
                        KernelShape::Diamond => {
                            (i - center.x).abs() + (j - center.y).abs() + (k - center.z).abs()
                                <= radius
                        }
                        KernelShape::Prism => {
                            (i - center.x).abs() + (j - center.y).abs() <= radius_xy
                        }
                    };
                    if keep {
                        offsets.push(GridPoint3::new(i - shift.x, j - shift.y, k - shift.z));
                    }
                }
            }
        }

        Self {
            size,
            shape,
            offsets,
        }
    }
}
