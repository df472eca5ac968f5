//! Sliced mesh data model.
//!
//! The generator operates on the output of a slicer: per-mesh stacks of
//! layer outlines, bottom-up, plus the few settings that drive pair selection
//! and beam sizing. Layer polygons are the only thing the generator mutates.

use crate::geometry::{BoundingBox3, ExPolygons, Point3};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};

/// The per-mesh settings the generator reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshSettings {
    /// Line width of the outermost wall (mm).
    pub wall_line_width_0: CoordF,
    /// Extruder printing the outermost wall.
    pub wall_0_extruder_nr: u32,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            wall_line_width_0: 0.4,
            wall_0_extruder_nr: 0,
        }
    }
}

/// A single sliced layer: its z height and outline polygons.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// World z of the layer (scaled units).
    pub z: Coord,
    /// Outlines of the mesh at this layer.
    pub polygons: ExPolygons,
}

impl Layer {
    /// Create a layer.
    pub fn new(z: Coord, polygons: ExPolygons) -> Self {
        Self { z, polygons }
    }
}

/// A sliced mesh: an ordered bottom-up stack of layers plus settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlicedMesh {
    /// Layers indexed 0..layer_count, bottom-up.
    pub layers: Vec<Layer>,
    /// Settings the generator reads.
    pub settings: MeshSettings,
}

impl SlicedMesh {
    /// Create a mesh from its layers and settings.
    pub fn new(layers: Vec<Layer>, settings: MeshSettings) -> Self {
        Self { layers, settings }
    }

    /// Number of layers.
    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The mesh's axis-aligned bounding box, derived from the layer outlines
    /// and layer heights. `None` when no layer has any geometry.
    pub fn bounding_box(&self) -> Option<BoundingBox3> {
        let mut result: Option<BoundingBox3> = None;
        for layer in &self.layers {
            for expoly in &layer.polygons {
                for ring in expoly.rings() {
                    for p in ring.points() {
                        let p3 = Point3::new(p.x, p.y, layer.z);
                        match &mut result {
                            Some(bbox) => bbox.include(p3),
                            None => result = Some(BoundingBox3::new(p3, p3)),
                        }
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ExPolygon, Point, Polygon};

    fn square_layer(z: Coord, x: Coord, size: Coord) -> Layer {
        Layer::new(
            z,
            vec![ExPolygon::from(Polygon::rectangle(
                Point::new(x, 0),
                Point::new(x + size, size),
            ))],
        )
    }

    #[test]
    fn test_default_settings() {
        let settings = MeshSettings::default();
        assert_eq!(settings.wall_line_width_0, 0.4);
        assert_eq!(settings.wall_0_extruder_nr, 0);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = SlicedMesh::new(
            vec![square_layer(0, 0, 1_000), square_layer(200, -500, 1_000)],
            MeshSettings::default(),
        );
        let bbox = mesh.bounding_box().unwrap();
        assert_eq!(bbox.min, Point3::new(-500, 0, 0));
        assert_eq!(bbox.max, Point3::new(1_000, 1_000, 200));
    }

    #[test]
    fn test_bounding_box_empty_mesh() {
        let mesh = SlicedMesh::default();
        assert!(mesh.bounding_box().is_none());

        let empty_layers = SlicedMesh::new(
            vec![Layer::new(0, vec![]), Layer::new(200, vec![])],
            MeshSettings::default(),
        );
        assert!(empty_layers.bounding_box().is_none());
    }
}
