use tse_core::{MapGrid, RowAxis};

/// Placement of the whole map in the viewer.
///
/// Map space puts rows along `+z`; the viewer mirrors `z` and centres the
/// map on the origin. Applied as `scale * (p + offset)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransform {
    /// Per-axis scale applied last.
    pub scale: [f32; 3],
    /// Translation applied first.
    pub offset: [f32; 3],
}

impl SceneTransform {
    /// The transform for a grid laid out with the given row convention.
    /// Columns run along `x` and rows along `z`, so the axis decides which
    /// map dimension each one spans.
    pub fn for_grid(grid: &MapGrid, axis: RowAxis) -> Self {
        let (columns, rows) = match axis {
            RowAxis::Width => (grid.width, grid.height),
            RowAxis::Height => (grid.height, grid.width),
        };
        Self {
            scale: [1.0, 1.0, -1.0],
            offset: [-(columns as f32) / 2.0, 0.0, -(rows as f32) / 2.0],
        }
    }

    /// Map a render-space point into the scene.
    pub fn to_scene(self, point: [f32; 3]) -> [f32; 3] {
        std::array::from_fn(|axis| (point[axis] + self.offset[axis]) * self.scale[axis])
    }
}

#[cfg(test)]
mod tests {
    use tse_core::parse_grid;

    use super::*;

    fn grid() -> MapGrid {
        parse_grid("0 0 0 0 0 0 0 0", "0 0 0 0 0 0 0 0", "0 0 0 0 0 0 0 0", 4, 2).unwrap()
    }

    #[test]
    fn centres_and_mirrors() {
        let transform = SceneTransform::for_grid(&grid(), RowAxis::Width);
        assert_eq!(transform.offset, [-2.0, 0.0, -1.0]);
        assert_eq!(transform.to_scene([0.0, 3.0, 0.0]), [-2.0, 3.0, 1.0]);
        assert_eq!(transform.to_scene([4.0, 0.0, 2.0]), [2.0, 0.0, -1.0]);
    }

    #[test]
    fn height_rows_centre_on_the_swapped_extents() {
        let grid = grid();
        let transform = SceneTransform::for_grid(&grid, RowAxis::Height);
        assert_eq!(transform.offset, [-1.0, 0.0, -2.0]);

        let indexer = grid.indexer(RowAxis::Height);
        let first = transform.to_scene(indexer.index_to_world(0, 0.0));
        let far = indexer.index_to_world(grid.cell_count() - 1, 0.0);
        let last = transform.to_scene([far[0] + 1.0, 0.0, far[2] + 1.0]);
        assert_eq!(first, [-1.0, 0.0, 2.0]);
        assert_eq!(last, [1.0, 0.0, -2.0]);
    }
}
