//! Interlocking structure generation.
//!
//! This module rewrites the outlines of adjacent meshes printed with
//! different extruders so that they interlock mechanically instead of relying
//! on adhesion alone. The structure consists of horizontal beams of the two
//! materials interlaced; every `BEAM_LAYER_COUNT` layers the beam direction
//! alternates by 90 degrees:
//!
//! ```text
//! Even bands:      Odd bands:
//! ######           ##OO##OO
//! OOOOOO           ##OO##OO
//! ######           ##OO##OO
//! OOOOOO           ##OO##OO
//! ```
//!
//! # Algorithm
//!
//! 1. Voxelize the shell (wall outlines plus top/bottom skin) of both meshes
//!    on a rotated cell grid, dilated by the interface kernel
//! 2. Intersect the two shell voxel sets to find the contact cells
//! 3. Optionally remove cells near the outside air, so the structure is not
//!    visible on outer surfaces
//! 4. Stamp the per-cell beam template into every contact cell, for each mesh
//!    and each beam band the cell spans
//! 5. Union per band, clip to the combined model envelope, rotate back
//! 6. Rewrite each layer as `outline ∪ own beams − other mesh's beams`

mod microstructure;

use crate::clipper::{
    closing, difference, intersection, opening, union, union_ex, xor, OffsetJoinType,
};
use crate::geometry::{ExPolygons, Point, Point3, Transform2D};
use crate::slice::SlicedMesh;
use crate::voxel::{DilationKernel, GridPoint3, KernelShape, VoxelGrid};
use crate::{scale, unscale, Coord, CoordF};
use log::debug;
use microstructure::cell_beam_templates;
use std::collections::HashSet;

// Geometry parameters of the structure (same as CuraEngine).
// TODO: promote these to user-facing settings.

/// Distance under which two models count as next to each other, so that an
/// interlocking structure is generated between them (scaled units).
const IGNORED_GAP: Coord = 100;
/// Angle of the beam pattern relative to the model axes, in degrees.
const ROTATION_DEGREES: CoordF = 22.5;
/// Number of layers in the height of a single beam.
const BEAM_LAYER_COUNT: usize = 2;
/// Thickness of the dilated contact interface, in cells.
const INTERFACE_DEPTH: Coord = 2;
/// Distance to keep between the structure and outer surfaces, in cells.
/// Zero disables air filtering.
const BOUNDARY_AVOIDANCE: Coord = 0;

/// Generate an interlocking structure between every two adjacent meshes.
///
/// A pair of meshes is processed when their outer walls are printed by
/// different extruders and their bounding boxes, inflated by the ignored gap,
/// overlap. Each processed mesh pair has its per-layer outlines rewritten in
/// place; everything else is left untouched.
pub fn generate_interlocking_structure(volumes: &mut [SlicedMesh]) {
    for mesh_a_idx in 0..volumes.len() {
        for mesh_b_idx in mesh_a_idx + 1..volumes.len() {
            let extruder_a = volumes[mesh_a_idx].settings.wall_0_extruder_nr;
            let extruder_b = volumes[mesh_b_idx].settings.wall_0_extruder_nr;
            if extruder_a == extruder_b {
                continue;
            }

            let (Some(bbox_a), Some(bbox_b)) = (
                volumes[mesh_a_idx].bounding_box(),
                volumes[mesh_b_idx].bounding_box(),
            ) else {
                continue;
            };
            if !bbox_a.inflated(IGNORED_GAP).intersects(&bbox_b) {
                // Early out for meshes that don't share any bounding box overlap.
                debug!(
                    "interlocking: meshes {} and {} are too far apart, skipping",
                    mesh_a_idx, mesh_b_idx
                );
                continue;
            }

            let beam_widths = [
                2 * scale(volumes[mesh_a_idx].settings.wall_line_width_0),
                2 * scale(volumes[mesh_b_idx].settings.wall_line_width_0),
            ];

            debug!(
                "interlocking: generating structure between meshes {} and {}",
                mesh_a_idx, mesh_b_idx
            );
            let (head, tail) = volumes.split_at_mut(mesh_b_idx);
            InterlockingGenerator::new(
                &mut head[mesh_a_idx],
                &mut tail[0],
                beam_widths,
                BOUNDARY_AVOIDANCE,
            )
            .generate();
        }
    }
}

/// State for the computation of the interlocking structure between two
/// meshes.
struct InterlockingGenerator<'a> {
    mesh_a: &'a mut SlicedMesh,
    mesh_b: &'a mut SlicedMesh,
    beam_widths: [Coord; 2],
    rotation: Transform2D,
    beam_layer_count: usize,
    grid: VoxelGrid,
    interface_kernel: DilationKernel,
    air_kernel: DilationKernel,
    air_filtering: bool,
}

impl<'a> InterlockingGenerator<'a> {
    fn new(
        mesh_a: &'a mut SlicedMesh,
        mesh_b: &'a mut SlicedMesh,
        beam_widths: [Coord; 2],
        boundary_avoidance: Coord,
    ) -> Self {
        let cell_width = beam_widths[0] + beam_widths[1];
        assert!(cell_width > 0, "beam widths must sum to a positive width");
        // A cell holds one beam of each material side by side, and two beam
        // heights so that both orientations fit in it.
        let cell_size = Point3::new(cell_width, cell_width, (2 * BEAM_LAYER_COUNT) as Coord);

        let interface_kernel = DilationKernel::new(
            GridPoint3::new(INTERFACE_DEPTH, INTERFACE_DEPTH, INTERFACE_DEPTH),
            KernelShape::Prism,
        );
        let air_kernel = DilationKernel::new(
            GridPoint3::new(boundary_avoidance, boundary_avoidance, boundary_avoidance),
            KernelShape::Diamond,
        );

        Self {
            mesh_a,
            mesh_b,
            beam_widths,
            rotation: Transform2D::rotation_degrees(ROTATION_DEGREES),
            beam_layer_count: BEAM_LAYER_COUNT,
            grid: VoxelGrid::new(cell_size),
            interface_kernel,
            air_kernel,
            air_filtering: boundary_avoidance > 0,
        }
    }

    fn generate(mut self) {
        let [shell_a, shell_b] = self.shell_voxels();
        let layer_regions = self.layer_regions();

        let mut contact: Vec<GridPoint3> = shell_a.intersection(&shell_b).copied().collect();

        if self.air_filtering {
            let mut air_cells: HashSet<GridPoint3> = HashSet::new();
            self.add_boundary_cells(&layer_regions, &self.air_kernel, &mut air_cells);
            contact.retain(|cell| !air_cells.contains(cell));
        }

        // Stamping order must not depend on hash-set iteration order for the
        // output to be reproducible across runs.
        contact.sort_unstable();
        debug!("interlocking: {} contact cells", contact.len());

        let templates = cell_beam_templates(self.grid.cell_size(), self.beam_widths);
        self.apply_to_outlines(&contact, &templates, &layer_regions);
    }

    /// Compute the voxels overlapping with the shell of both meshes.
    /// This includes the walls, but also top/bottom skin.
    fn shell_voxels(&self) -> [HashSet<GridPoint3>; 2] {
        let mut voxels_per_mesh = [HashSet::new(), HashSet::new()];
        for (mesh_idx, mesh) in [&*self.mesh_a, &*self.mesh_b].into_iter().enumerate() {
            // Rotation is applied once per layer, not per edge.
            let rotated: Vec<ExPolygons> = mesh
                .layers
                .iter()
                .map(|layer| {
                    layer
                        .polygons
                        .iter()
                        .map(|expoly| expoly.transformed(&self.rotation))
                        .collect()
                })
                .collect();
            self.add_boundary_cells(&rotated, &self.interface_kernel, &mut voxels_per_mesh[mesh_idx]);
        }
        voxels_per_mesh
    }

    /// Mark all cells containing some boundary of the given layer stack:
    /// the outlines of each layer, plus the skin where consecutive layers
    /// differ.
    fn add_boundary_cells(
        &self,
        layers: &[ExPolygons],
        kernel: &DilationKernel,
        cells: &mut HashSet<GridPoint3>,
    ) {
        let mut emplace = |cell: GridPoint3| -> bool {
            cells.insert(cell);
            true
        };

        let empty: ExPolygons = Vec::new();
        for (layer_nr, layer) in layers.iter().enumerate() {
            let z = layer_nr as Coord;
            self.grid.walk_dilated_polygons(layer, z, kernel, &mut emplace);

            let below = if layer_nr > 0 { &layers[layer_nr - 1] } else { &empty };
            let skin = xor(layer, below);
            // Remove superfluous small areas; they are covered by the edge
            // walk above anyway.
            let skin = opening(
                &skin,
                unscale(self.grid.cell_size().x / 2),
                OffsetJoinType::Miter,
            );
            self.grid.walk_dilated_areas(&skin, z, kernel, &mut emplace);
        }
    }

    /// Compute the regions occupied by both models together, per layer.
    ///
    /// A morphological close merges the meshes across small gaps so that
    /// nearly touching models read as a single volume. One ghost layer is
    /// appended on top so the skin and clipping steps for the topmost real
    /// layer never need a bounds check.
    fn layer_regions(&self) -> Vec<ExPolygons> {
        let max_layer_count = self.mesh_a.layer_count().max(self.mesh_b.layer_count());
        let mut regions = Vec::with_capacity(max_layer_count + 1);
        for layer_nr in 0..=max_layer_count {
            let mut region: ExPolygons = Vec::new();
            for mesh in [&*self.mesh_a, &*self.mesh_b] {
                if let Some(layer) = mesh.layers.get(layer_nr) {
                    region.extend(layer.polygons.iter().cloned());
                }
            }
            let region = closing(&region, unscale(IGNORED_GAP), OffsetJoinType::Miter);
            regions.push(
                region
                    .iter()
                    .map(|expoly| expoly.transformed(&self.rotation))
                    .collect(),
            );
        }
        regions
    }

    /// Stamp the beam templates into every contact cell and rewrite the mesh
    /// outlines with the result.
    fn apply_to_outlines(
        &mut self,
        contact: &[GridPoint3],
        templates: &[[ExPolygons; 2]; 2],
        layer_regions: &[ExPolygons],
    ) {
        let max_layer_count = self.mesh_a.layer_count().max(self.mesh_b.layer_count());
        let beam_layer_count = self.beam_layer_count as Coord;
        let cell_height = self.grid.cell_size().z;
        let band_count = (max_layer_count + self.beam_layer_count) / self.beam_layer_count;

        // The structure is computed once per band: beams are
        // `beam_layer_count` layers high, so every layer within a band
        // repeats the one below it.
        let mut structure_per_mesh_per_band: [Vec<ExPolygons>; 2] =
            [vec![Vec::new(); band_count], vec![Vec::new(); band_count]];

        for &cell in contact {
            let corner = self.grid.to_lower_corner(cell);
            let offset = Point::new(corner.x, corner.y);
            for mesh_idx in 0..2 {
                let mut layer_nr = corner.z;
                while layer_nr < corner.z + cell_height && layer_nr < max_layer_count as Coord {
                    // Odd-sized kernels dilate below the grid at the bottom layer.
                    if layer_nr >= 0 {
                        let band = (layer_nr / beam_layer_count) as usize;
                        let parity = band % 2;
                        structure_per_mesh_per_band[mesh_idx][band].extend(
                            templates[parity][mesh_idx]
                                .iter()
                                .map(|expoly| expoly.translated(offset)),
                        );
                    }
                    layer_nr += beam_layer_count;
                }
            }
        }

        let unrotate = self.rotation.inverse();
        for structure_per_band in &mut structure_per_mesh_per_band {
            for (band, structure) in structure_per_band.iter_mut().enumerate() {
                let mut merged = union_ex(structure);
                if !self.air_filtering {
                    // Prevent the structure from protruding out of the models.
                    let region = &layer_regions[band * self.beam_layer_count];
                    merged = intersection(region, &merged);
                }
                *structure = merged
                    .iter()
                    .map(|expoly| expoly.transformed(&unrotate))
                    .collect();
            }
        }

        for mesh_idx in 0..2 {
            let structure_per_band = &structure_per_mesh_per_band[mesh_idx];
            let other_per_band = &structure_per_mesh_per_band[1 - mesh_idx];
            let mesh: &mut SlicedMesh = if mesh_idx == 0 {
                &mut *self.mesh_a
            } else {
                &mut *self.mesh_b
            };
            for (layer_nr, layer) in mesh.layers.iter_mut().enumerate() {
                let band = layer_nr / self.beam_layer_count;
                let own = &structure_per_band[band];
                let other = &other_per_band[band];
                // Extend the outlines outward with this mesh's beams, then
                // carve out the other mesh's beams.
                layer.polygons = difference(&union(&layer.polygons, own), other);
            }
        }
    }
}
