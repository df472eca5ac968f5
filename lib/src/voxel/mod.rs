//! Uniform 3D cell grid utilities.
//!
//! The interlocking generator rasterizes layer outlines onto a coarse voxel
//! grid whose cell height is counted in layers rather than world units. This
//! module provides:
//!
//! - [`VoxelGrid`] - world/grid coordinate mapping for a given cell size
//! - `walk_line` - a 3D DDA that visits every cell a segment crosses
//! - `walk_polygons` / `walk_areas` - edge and interior rasterization of a
//!   polygon set placed at an integer layer index
//! - [`DilationKernel`] - precomputed offset sets for dilating visited cells
//!
//! All walkers report cells through a visitor returning `bool`; returning
//! `false` stops the walk immediately. Coordinates are mapped to cells with
//! true floor division, so negative world coordinates round toward negative
//! infinity.

mod kernel;

pub use kernel::{DilationKernel, KernelShape};

use crate::geometry::{expolygons_bounding_box, point_in_expolygons, ExPolygons, Point, Point3};
use crate::Coord;
use std::collections::HashSet;

/// A position in cell index space.
pub type GridPoint3 = Point3;

/// A uniform grid of cells of a fixed size.
///
/// The z extent of a cell is measured in layer indices, not world
/// coordinates: the walkers receive the layer number as their z input, so a
/// cell spans `cell_size.z` consecutive layers.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    cell_size: Point3,
}

impl VoxelGrid {
    /// Create a grid with the given cell size. All components must be
    /// positive.
    pub fn new(cell_size: Point3) -> Self {
        assert!(
            cell_size.x > 0 && cell_size.y > 0 && cell_size.z > 0,
            "voxel cell size must be positive: {:?}",
            cell_size
        );
        Self { cell_size }
    }

    /// The configured cell size.
    #[inline]
    pub fn cell_size(&self) -> Point3 {
        self.cell_size
    }

    /// Map a world point to the index of the cell containing it.
    #[inline]
    pub fn to_grid(&self, p: Point3) -> GridPoint3 {
        GridPoint3::new(
            p.x.div_euclid(self.cell_size.x),
            p.y.div_euclid(self.cell_size.y),
            p.z.div_euclid(self.cell_size.z),
        )
    }

    /// Map a cell index to the lower corner of the cell.
    #[inline]
    pub fn to_lower_corner(&self, g: GridPoint3) -> Point3 {
        Point3::new(
            g.x * self.cell_size.x,
            g.y * self.cell_size.y,
            g.z * self.cell_size.z,
        )
    }

    /// The XY square of a cell as a polygon (z ignored).
    pub fn cell_polygon(&self, g: GridPoint3) -> crate::geometry::Polygon {
        let c = self.to_lower_corner(g);
        crate::geometry::Polygon::rectangle(
            Point::new(c.x, c.y),
            Point::new(c.x + self.cell_size.x, c.y + self.cell_size.y),
        )
    }

    /// Walk every cell a segment crosses, in order, using a 3D DDA.
    ///
    /// The cell containing `a` is reported first. When the segment passes
    /// exactly through a cell corner, the axis with the smallest crossing
    /// parameter advances first; on equality, in x, y, z order, so each cell
    /// boundary is crossed exactly once. A degenerate segment reports the
    /// single cell containing `a`.
    ///
    /// Returns `false` if the visitor stopped the walk.
    pub fn walk_line<F>(&self, a: Point3, b: Point3, visit: &mut F) -> bool
    where
        F: FnMut(GridPoint3) -> bool,
    {
        let cell = [self.cell_size.x, self.cell_size.y, self.cell_size.z];
        let start = [a.x, a.y, a.z];
        let finish = [b.x, b.y, b.z];

        let mut g: [Coord; 3] = [0; 3];
        let mut end: [Coord; 3] = [0; 3];
        for d in 0..3 {
            g[d] = start[d].div_euclid(cell[d]);
            end[d] = finish[d].div_euclid(cell[d]);
        }

        if !visit(GridPoint3::new(g[0], g[1], g[2])) {
            return false;
        }

        // Crossing parameter per axis as the exact fraction num/den, where
        // num is the world distance to the next boundary and den = |delta|.
        let mut step: [Coord; 3] = [0; 3];
        let mut num: [Coord; 3] = [0; 3];
        let mut den: [Coord; 3] = [0; 3];
        for d in 0..3 {
            let delta = finish[d] - start[d];
            den[d] = delta.abs();
            if delta > 0 {
                step[d] = 1;
                num[d] = (g[d] + 1) * cell[d] - start[d];
            } else if delta < 0 {
                step[d] = -1;
                num[d] = start[d] - g[d] * cell[d];
            }
        }

        while g != end {
            let mut axis = usize::MAX;
            for d in 0..3 {
                if den[d] == 0 {
                    continue;
                }
                if axis == usize::MAX
                    || (num[d] as i128 * den[axis] as i128) < (num[axis] as i128 * den[d] as i128)
                {
                    axis = d;
                }
            }
            if axis == usize::MAX {
                break;
            }

            g[axis] += step[axis];
            num[axis] += cell[axis];
            if !visit(GridPoint3::new(g[0], g[1], g[2])) {
                return false;
            }
        }
        true
    }

    /// Walk every cell crossed by any edge of the polygon set placed at the
    /// integer layer index `z`.
    pub fn walk_polygons<F>(&self, polys: &ExPolygons, z: Coord, visit: &mut F) -> bool
    where
        F: FnMut(GridPoint3) -> bool,
    {
        for expoly in polys {
            for ring in expoly.rings() {
                let points = ring.points();
                if points.is_empty() {
                    continue;
                }
                let mut last = points[points.len() - 1];
                for &p in points {
                    if !self.walk_line(
                        Point3::new(last.x, last.y, z),
                        Point3::new(p.x, p.y, z),
                        visit,
                    ) {
                        return false;
                    }
                    last = p;
                }
            }
        }
        true
    }

    /// Walk every cell covered by the polygon set placed at the integer
    /// layer index `z`: interior cells via a row scanline over cell centers,
    /// boundary cells via [`Self::walk_polygons`]. Each cell is reported at
    /// most once.
    pub fn walk_areas<F>(&self, polys: &ExPolygons, z: Coord, visit: &mut F) -> bool
    where
        F: FnMut(GridPoint3) -> bool,
    {
        let mut seen: HashSet<GridPoint3> = HashSet::new();
        let mut emit = |g: GridPoint3| -> bool {
            if seen.insert(g) {
                visit(g)
            } else {
                true
            }
        };

        // Shift by half a cell so that testing a cell's lower corner against
        // the shifted polygons tests the cell center against the originals.
        let shift = Point::new(-self.cell_size.x / 2, -self.cell_size.y / 2);
        let shifted: ExPolygons = polys.iter().map(|e| e.translated(shift)).collect();

        if let Some(bbox) = expolygons_bounding_box(&shifted) {
            let gz = z.div_euclid(self.cell_size.z);
            let lo = self.to_grid(Point3::new(bbox.min.x, bbox.min.y, z));
            let hi = self.to_grid(Point3::new(bbox.max.x, bbox.max.y, z));
            for gy in lo.y..=hi.y {
                for gx in lo.x..=hi.x {
                    let corner = Point::new(gx * self.cell_size.x, gy * self.cell_size.y);
                    if point_in_expolygons(&corner, &shifted)
                        && !emit(GridPoint3::new(gx, gy, gz))
                    {
                        return false;
                    }
                }
            }
        }

        self.walk_polygons(polys, z, &mut emit)
    }

    /// Report every cell of the kernel placed at `g`.
    pub fn dilate<F>(&self, g: GridPoint3, kernel: &DilationKernel, visit: &mut F) -> bool
    where
        F: FnMut(GridPoint3) -> bool,
    {
        for &offset in &kernel.offsets {
            if !visit(g + offset) {
                return false;
            }
        }
        true
    }

    /// [`Self::walk_polygons`] with every visited cell expanded by the
    /// kernel. Duplicate reports are possible; the caller's visitor is
    /// expected to deduplicate (set insertion).
    pub fn walk_dilated_polygons<F>(
        &self,
        polys: &ExPolygons,
        z: Coord,
        kernel: &DilationKernel,
        visit: &mut F,
    ) -> bool
    where
        F: FnMut(GridPoint3) -> bool,
    {
        let mut dilated = |g: GridPoint3| -> bool { self.dilate(g, kernel, &mut *visit) };
        self.walk_polygons(polys, z, &mut dilated)
    }

    /// [`Self::walk_areas`] with every visited cell expanded by the kernel.
    pub fn walk_dilated_areas<F>(
        &self,
        polys: &ExPolygons,
        z: Coord,
        kernel: &DilationKernel,
        visit: &mut F,
    ) -> bool
    where
        F: FnMut(GridPoint3) -> bool,
    {
        let mut dilated = |g: GridPoint3| -> bool { self.dilate(g, kernel, &mut *visit) };
        self.walk_areas(polys, z, &mut dilated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ExPolygon, Polygon};

    fn grid(cx: Coord, cy: Coord, cz: Coord) -> VoxelGrid {
        VoxelGrid::new(Point3::new(cx, cy, cz))
    }

    fn collect_line(g: &VoxelGrid, a: Point3, b: Point3) -> Vec<GridPoint3> {
        let mut cells = Vec::new();
        let finished = g.walk_line(a, b, &mut |c| {
            cells.push(c);
            true
        });
        assert!(finished);
        cells
    }

    fn square_expoly(x: Coord, y: Coord, size: Coord) -> ExPolygons {
        vec![ExPolygon::from(Polygon::rectangle(
            Point::new(x, y),
            Point::new(x + size, y + size),
        ))]
    }

    #[test]
    fn test_to_grid_floor_semantics() {
        let g = grid(100, 100, 4);
        assert_eq!(g.to_grid(Point3::new(0, 0, 0)), GridPoint3::new(0, 0, 0));
        assert_eq!(g.to_grid(Point3::new(99, 199, 3)), GridPoint3::new(0, 1, 0));
        // Negative coordinates round toward negative infinity, not zero.
        assert_eq!(
            g.to_grid(Point3::new(-1, -100, -1)),
            GridPoint3::new(-1, -1, -1)
        );
        assert_eq!(
            g.to_grid(Point3::new(-200, -201, -4)),
            GridPoint3::new(-2, -3, -1)
        );
    }

    #[test]
    fn test_grid_round_trip() {
        let g = grid(100, 100, 4);
        for &cell in &[
            GridPoint3::new(0, 0, 0),
            GridPoint3::new(5, -3, 2),
            GridPoint3::new(-7, 11, -1),
        ] {
            assert_eq!(g.to_grid(g.to_lower_corner(cell)), cell);
        }
        for &p in &[
            Point3::new(1, 2, 3),
            Point3::new(-250, 199, -1),
            Point3::new(99, -99, 7),
        ] {
            let corner = g.to_lower_corner(g.to_grid(p));
            assert!(corner.x <= p.x && p.x - corner.x < 100);
            assert!(corner.y <= p.y && p.y - corner.y < 100);
            assert!(corner.z <= p.z && p.z - corner.z < 4);
        }
    }

    #[test]
    fn test_cell_polygon() {
        let g = grid(200, 200, 4);
        let poly = g.cell_polygon(GridPoint3::new(1, -1, 3));
        assert_eq!(poly.points()[0], Point::new(200, -200));
        assert_eq!(poly.points()[2], Point::new(400, 0));
        assert_eq!(poly.area(), 200.0 * 200.0);
    }

    #[test]
    fn test_walk_line_axis_aligned() {
        let g = grid(100, 100, 100);
        let cells = collect_line(&g, Point3::new(0, 0, 0), Point3::new(250, 0, 0));
        assert_eq!(
            cells,
            vec![
                GridPoint3::new(0, 0, 0),
                GridPoint3::new(1, 0, 0),
                GridPoint3::new(2, 0, 0),
            ]
        );
    }

    #[test]
    fn test_walk_line_negative_direction() {
        let g = grid(100, 100, 100);
        let cells = collect_line(&g, Point3::new(-50, 0, 0), Point3::new(-250, 0, 0));
        assert_eq!(
            cells,
            vec![
                GridPoint3::new(-1, 0, 0),
                GridPoint3::new(-2, 0, 0),
                GridPoint3::new(-3, 0, 0),
            ]
        );
    }

    #[test]
    fn test_walk_line_corner_crossing() {
        // The segment passes exactly through the corner at (100, 100): the x
        // axis advances first, so the corner is crossed through (1, 0), not
        // diagonally.
        let g = grid(100, 100, 100);
        let cells = collect_line(&g, Point3::new(0, 0, 0), Point3::new(199, 199, 0));
        assert_eq!(
            cells,
            vec![
                GridPoint3::new(0, 0, 0),
                GridPoint3::new(1, 0, 0),
                GridPoint3::new(1, 1, 0),
            ]
        );
    }

    #[test]
    fn test_walk_line_diagonal() {
        let g = grid(100, 100, 100);
        let cells = collect_line(&g, Point3::new(50, 10, 0), Point3::new(250, 90, 0));
        // Monotone in x, never leaves row 0
        assert_eq!(
            cells,
            vec![
                GridPoint3::new(0, 0, 0),
                GridPoint3::new(1, 0, 0),
                GridPoint3::new(2, 0, 0),
            ]
        );
    }

    #[test]
    fn test_walk_line_vertical() {
        let g = grid(100, 100, 4);
        let cells = collect_line(&g, Point3::new(0, 0, 0), Point3::new(0, 0, 9));
        assert_eq!(
            cells,
            vec![
                GridPoint3::new(0, 0, 0),
                GridPoint3::new(0, 0, 1),
                GridPoint3::new(0, 0, 2),
            ]
        );
    }

    #[test]
    fn test_walk_line_degenerate() {
        let g = grid(100, 100, 100);
        let cells = collect_line(&g, Point3::new(50, 50, 50), Point3::new(50, 50, 50));
        assert_eq!(cells, vec![GridPoint3::new(0, 0, 0)]);
    }

    #[test]
    fn test_walk_line_early_stop() {
        let g = grid(100, 100, 100);
        let mut count = 0;
        let finished = g.walk_line(
            Point3::new(0, 0, 0),
            Point3::new(950, 0, 0),
            &mut |_c| {
                count += 1;
                count < 2
            },
        );
        assert!(!finished);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_walk_polygons_square() {
        let g = grid(100, 100, 1);
        let polys = square_expoly(0, 0, 400);
        let mut cells = HashSet::new();
        g.walk_polygons(&polys, 0, &mut |c| {
            cells.insert(c);
            true
        });
        // The outline of a 4x4-cell square touches the outer ring of a 5x5
        // block (the corner at 400 lands in cell 4).
        assert_eq!(cells.len(), 16);
        assert!(cells.contains(&GridPoint3::new(0, 0, 0)));
        assert!(cells.contains(&GridPoint3::new(4, 4, 0)));
        assert!(!cells.contains(&GridPoint3::new(2, 2, 0)));
    }

    #[test]
    fn test_walk_areas_square() {
        let g = grid(100, 100, 1);
        let polys = square_expoly(0, 0, 400);
        let mut cells = Vec::new();
        g.walk_areas(&polys, 0, &mut |c| {
            cells.push(c);
            true
        });
        // 4x4 interior centers plus the boundary ring: the full 5x5 block.
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len(), "cells must be emitted once");
        assert_eq!(unique.len(), 25);
        assert!(unique.contains(&GridPoint3::new(2, 2, 0)));
    }

    #[test]
    fn test_walk_areas_at_layer_index() {
        // z is a layer index: with cell_size.z = 4, layer 5 lands in grid z 1.
        let g = grid(100, 100, 4);
        let polys = square_expoly(0, 0, 50);
        let mut cells = Vec::new();
        g.walk_areas(&polys, 5, &mut |c| {
            cells.push(c);
            true
        });
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|c| c.z == 1));
    }

    #[test]
    fn test_dilate_counts_and_stop() {
        let g = grid(100, 100, 4);
        let kernel = DilationKernel::new(GridPoint3::new(3, 3, 3), KernelShape::Diamond);

        let mut cells = Vec::new();
        assert!(g.dilate(GridPoint3::new(5, 5, 5), &kernel, &mut |c| {
            cells.push(c);
            true
        }));
        assert_eq!(cells.len(), 7);
        assert!(cells.contains(&GridPoint3::new(5, 5, 5)));
        assert!(cells.contains(&GridPoint3::new(4, 5, 5)));

        let mut count = 0;
        assert!(!g.dilate(GridPoint3::new(0, 0, 0), &kernel, &mut |_c| {
            count += 1;
            false
        }));
        assert_eq!(count, 1);
    }

    #[test]
    fn test_walk_dilated_polygons_covers_neighbors() {
        let g = grid(100, 100, 1);
        let kernel = DilationKernel::new(GridPoint3::new(3, 3, 3), KernelShape::Diamond);
        let polys = square_expoly(0, 0, 400);

        let mut plain = HashSet::new();
        g.walk_polygons(&polys, 0, &mut |c| {
            plain.insert(c);
            true
        });
        let mut dilated = HashSet::new();
        g.walk_dilated_polygons(&polys, 0, &kernel, &mut |c| {
            dilated.insert(c);
            true
        });

        assert!(dilated.is_superset(&plain));
        assert!(dilated.contains(&GridPoint3::new(-1, 0, 0)));
        assert!(dilated.contains(&GridPoint3::new(0, 0, 1)));
    }
}
