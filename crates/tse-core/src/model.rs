use std::sync::Arc;

use crate::config::RowAxis;
use crate::entity::Entity;
use crate::grid::{GridIndexer, MapGrid};
use crate::index::{EntityIndex, UpsertOutcome};

/// Everything the editor derives from one save.
///
/// Clones are cheap and independent: a clone keeps seeing the version it
/// was taken from, while the original moves on through
/// [`EditableModel::apply`].
#[derive(Debug, Clone)]
pub struct EditableModel {
    /// Terrain grids. Never edited.
    pub grid: Arc<MapGrid>,
    /// Editable entities.
    pub index: Arc<EntityIndex>,
    /// Row-length convention used for the grid arrays.
    pub row_axis: RowAxis,
    version: u64,
}

impl EditableModel {
    /// Wrap a decoded grid and index as version 0.
    pub fn new(grid: MapGrid, index: EntityIndex, row_axis: RowAxis) -> Self {
        Self {
            grid: Arc::new(grid),
            index: Arc::new(index),
            row_axis,
            version: 0,
        }
    }

    /// Monotonic version, bumped once per applied edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Grid indexer for this model's row convention.
    pub fn indexer(&self) -> GridIndexer {
        self.grid.indexer(self.row_axis)
    }

    /// Upsert an entity, producing the next version in place. Other holders
    /// of the previous index keep their copy untouched.
    pub fn apply(&mut self, entity: Entity) -> UpsertOutcome {
        let outcome = Arc::make_mut(&mut self.index).upsert(entity);
        self.version += 1;
        outcome
    }

    /// Functional form of [`EditableModel::apply`].
    pub fn with_entity(&self, entity: Entity) -> (Self, UpsertOutcome) {
        let mut next = self.clone();
        let outcome = next.apply(entity);
        (next, outcome)
    }
}
