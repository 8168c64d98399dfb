use serde::Serialize;

use crate::geometry::{RawGeometry, Vertex};
use crate::material::Material;

/// Many unit geometries concatenated into one drawable buffer with a single
/// material.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchedGeometry {
    /// Concatenated vertices.
    pub vertices: Vec<Vertex>,
    /// Concatenated triangle indices, rebased onto `vertices`.
    pub indices: Vec<u32>,
    /// Material shared by the whole batch.
    pub material: Material,
}

impl BatchedGeometry {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` when the batch draws nothing.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Concatenate `units` into one batch, offsetting each unit's indices by the
/// vertices already emitted. No units gives an empty batch.
pub fn merge_geometries<I>(units: I, material: Material) -> BatchedGeometry
where
    I: IntoIterator<Item = RawGeometry>,
{
    let mut batch = BatchedGeometry {
        material,
        ..BatchedGeometry::default()
    };
    for unit in units {
        let base = batch.vertices.len() as u32;
        batch.vertices.extend(unit.vertices);
        batch.indices.extend(unit.indices.into_iter().map(|i| i + base));
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{box_geometry, plane_geometry};

    #[test]
    fn merging_nothing_is_an_empty_batch() {
        let batch = merge_geometries(Vec::new(), Material::solid(0x0044CC));
        assert_eq!(batch.vertex_count(), 0);
        assert_eq!(batch.triangle_count(), 0);
        assert!(batch.is_empty());
        assert_eq!(batch.material, Material::solid(0x0044CC));
    }

    #[test]
    fn indices_are_rebased() {
        let batch = merge_geometries(
            [plane_geometry(1.0, 1.0), plane_geometry(1.0, 1.0)],
            Material::default(),
        );
        assert_eq!(batch.vertex_count(), 8);
        assert_eq!(batch.triangle_count(), 4);
        assert_eq!(&batch.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn counts_add_up() {
        let units = vec![box_geometry(1.0, 1.0, 1.0); 3];
        let batch = merge_geometries(units, Material::default());
        assert_eq!(batch.vertex_count(), 72);
        assert_eq!(batch.triangle_count(), 36);
        assert!(batch.indices.iter().all(|&i| (i as usize) < batch.vertex_count()));
    }

    #[test]
    fn batch_serializes_material_as_hex() {
        let batch = merge_geometries(Vec::new(), Material::solid(0x8BC34A));
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["material"]["color"], "#8BC34A");
        assert_eq!(json["vertices"], serde_json::json!([]));
    }
}
