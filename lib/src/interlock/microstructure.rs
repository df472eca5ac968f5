//! Per-cell beam templates.
//!
//! Within one grid cell the two materials split the cell footprint into two
//! side-by-side rectangles, proportional to the two beam widths. Every other
//! beam band uses the same split rotated a quarter turn (the transpose), so
//! that stacked beams cross and lock. This is the only place material
//! assignment within a cell is decided.

use crate::geometry::{ExPolygon, ExPolygons, Point, Point3, Polygon};
use crate::Coord;

/// Build the template table `[band parity][mesh]`, each entry covering part
/// of the single-cell footprint `[0, cell_size.x] x [0, cell_size.y]`.
///
/// The two parity-0 rectangles partition the cell exactly; parity 1 is the
/// transpose.
pub(crate) fn cell_beam_templates(
    cell_size: Point3,
    beam_widths: [Coord; 2],
) -> [[ExPolygons; 2]; 2] {
    let width_sum = beam_widths[0] + beam_widths[1];
    assert!(width_sum > 0, "beam widths must sum to a positive width");

    let middle = cell_size.x * beam_widths[0] / width_sum;
    let widths = [middle, cell_size.x - middle];
    let offsets = [0, middle];

    let even: [ExPolygons; 2] = std::array::from_fn(|mesh_idx| {
        let rect = Polygon::rectangle(
            Point::new(offsets[mesh_idx], 0),
            Point::new(offsets[mesh_idx] + widths[mesh_idx], cell_size.y),
        );
        vec![ExPolygon::from(rect)]
    });

    let odd: [ExPolygons; 2] =
        std::array::from_fn(|mesh_idx| even[mesh_idx].iter().map(transposed_expolygon).collect());

    [even, odd]
}

fn transposed_expolygon(expoly: &ExPolygon) -> ExPolygon {
    ExPolygon::with_holes(
        transposed_ring(&expoly.contour),
        expoly.holes.iter().map(transposed_ring).collect(),
    )
}

/// Swap x and y of every point; reversing the order afterwards restores the
/// original winding (a bare coordinate swap mirrors the ring).
fn transposed_ring(ring: &Polygon) -> Polygon {
    let mut points: Vec<Point> = ring.points().iter().map(|p| p.transposed()).collect();
    points.reverse();
    Polygon::from_points(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipper::{intersection, total_area, union};

    const CELL: Point3 = Point3::new(1_600, 1_600, 4);

    #[test]
    fn test_templates_partition_the_cell() {
        let templates = cell_beam_templates(CELL, [800, 800]);
        let cell_area = (CELL.x * CELL.y) as f64;

        for parity in 0..2 {
            let t0 = &templates[parity][0];
            let t1 = &templates[parity][1];

            let union_area = total_area(&union(t0, t1));
            assert!((union_area - cell_area).abs() < 1.0);

            let overlap = total_area(&intersection(t0, t1));
            assert!(overlap.abs() < 1.0);
        }
    }

    #[test]
    fn test_widths_proportional_to_beams() {
        // Beam widths 3:1 split an 800-wide cell at x = 600.
        let templates = cell_beam_templates(Point3::new(800, 800, 4), [600, 200]);
        let bbox0 = templates[0][0][0].bounding_box().unwrap();
        let bbox1 = templates[0][1][0].bounding_box().unwrap();
        assert_eq!(bbox0.max.x, 600);
        assert_eq!(bbox1.min.x, 600);
        assert_eq!(bbox1.max.x, 800);
    }

    #[test]
    fn test_odd_parity_is_transposed() {
        let templates = cell_beam_templates(Point3::new(800, 800, 4), [600, 200]);
        let even = templates[0][0][0].bounding_box().unwrap();
        let odd = templates[1][0][0].bounding_box().unwrap();
        assert_eq!(odd.min.x, even.min.y);
        assert_eq!(odd.max.x, even.max.y);
        assert_eq!(odd.min.y, even.min.x);
        assert_eq!(odd.max.y, even.max.x);
    }

    #[test]
    fn test_transpose_keeps_winding() {
        let templates = cell_beam_templates(CELL, [800, 800]);
        for parity in 0..2 {
            for mesh_idx in 0..2 {
                let contour = &templates[parity][mesh_idx][0].contour;
                assert!(contour.area() > 0.0, "outer contours stay counter-clockwise");
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_beam_widths_assert() {
        cell_beam_templates(Point3::new(0, 0, 4), [0, 0]);
    }
}
