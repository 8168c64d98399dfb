use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::RowAxis;
use crate::error::{SaveError, SaveResult};

/// Converts between flat array positions and grid coordinates for a fixed
/// row length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndexer {
    row_len: usize,
}

impl GridIndexer {
    /// Create an indexer whose rows hold `row_len` cells.
    ///
    /// A zero row length is treated as one so an empty grid still yields a
    /// usable indexer.
    pub fn new(row_len: usize) -> Self {
        Self {
            row_len: row_len.max(1),
        }
    }

    /// The number of cells in one row.
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Flat index to `(col, row)`.
    pub fn index_to_coord(&self, index: usize) -> (usize, usize) {
        (index % self.row_len, index / self.row_len)
    }

    /// `(col, row)` to flat index.
    pub fn coord_to_index(&self, col: usize, row: usize) -> usize {
        row * self.row_len + col
    }

    /// Flat index plus an elevation to a render-space point: the column
    /// becomes `x`, the elevation `y`, and the row `z`.
    pub fn index_to_world(&self, index: usize, elevation: f32) -> [f32; 3] {
        let (col, row) = self.index_to_coord(index);
        [col as f32, elevation, row as f32]
    }
}

/// The terrain grids of one snapshot. Index `i` refers to the same cell in
/// every array.
///
/// The arrays are shared so that clones are cheap and so that downstream
/// caches can key on array identity.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGrid {
    /// Cells along `Size.X`.
    pub width: usize,
    /// Cells along `Size.Y`.
    pub height: usize,
    /// Terrain height per cell.
    pub height_map: Arc<[i32]>,
    /// Soil moisture per cell.
    pub moisture_map: Arc<[f32]>,
    /// Water column depth per cell.
    pub water_depth_map: Arc<[f32]>,
}

impl MapGrid {
    /// Number of cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// The indexer for the given row-length convention.
    pub fn indexer(&self, axis: RowAxis) -> GridIndexer {
        match axis {
            RowAxis::Width => GridIndexer::new(self.width),
            RowAxis::Height => GridIndexer::new(self.height),
        }
    }
}

/// Decode the three whitespace-delimited grid arrays of a snapshot.
///
/// Every array must hold exactly `width * height` tokens. Nothing is
/// returned unless all three decode cleanly.
pub fn parse_grid(
    raw_heights: &str,
    raw_moisture: &str,
    raw_water_depth: &str,
    width: usize,
    height: usize,
) -> SaveResult<MapGrid> {
    let expected = width.checked_mul(height).ok_or_else(|| SaveError::Parse {
        field: "size",
        reason: format!("{width} x {height} overflows"),
    })?;

    let height_map: Vec<i32> = parse_array("heights", "integer", raw_heights, expected)?;
    let moisture_map: Vec<f32> = parse_array("moisture", "number", raw_moisture, expected)?;
    let water_depth_map: Vec<f32> =
        parse_array("water_depths", "number", raw_water_depth, expected)?;

    tracing::debug!(width, height, "decoded map grid");

    Ok(MapGrid {
        width,
        height,
        height_map: height_map.into(),
        moisture_map: moisture_map.into(),
        water_depth_map: water_depth_map.into(),
    })
}

fn parse_array<T>(
    field: &'static str,
    kind: &'static str,
    raw: &str,
    expected: usize,
) -> SaveResult<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let values = raw
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token.parse::<T>().map_err(|e| SaveError::Parse {
                field,
                reason: format!("token {i} ({token:?}) is not a valid {kind}: {e}"),
            })
        })
        .collect::<SaveResult<Vec<T>>>()?;

    if values.len() != expected {
        return Err(SaveError::Parse {
            field,
            reason: format!("expected {expected} values, found {}", values.len()),
        });
    }
    Ok(values)
}
