use std::collections::HashMap;
use std::sync::Arc;

use tse_core::EditableModel;

use crate::batch::BatchedGeometry;
use crate::category::Category;
use crate::style::MeshStyle;

/// The inputs a category batch was built from.
///
/// Grid categories hold clones of the arrays they read and compare them by
/// pointer, so a stale key can never match a new grid. Entity categories
/// hold the revisions of their buckets.
#[derive(Debug, Clone)]
enum Dependency {
    Grid {
        row_len: usize,
        heights: Arc<[i32]>,
        other: Arc<[f32]>,
    },
    Buckets {
        lineage: u64,
        revisions: Vec<u64>,
    },
}

impl Dependency {
    fn of(category: Category, model: &EditableModel) -> Self {
        let grid = &model.grid;
        match category {
            Category::WetLand | Category::DryLand => Self::Grid {
                row_len: model.indexer().row_len(),
                heights: Arc::clone(&grid.height_map),
                other: Arc::clone(&grid.moisture_map),
            },
            Category::Water => Self::Grid {
                row_len: model.indexer().row_len(),
                heights: Arc::clone(&grid.height_map),
                other: Arc::clone(&grid.water_depth_map),
            },
            Category::GreenTrees | Category::BrownTrees | Category::Paths => Self::Buckets {
                lineage: model.index.lineage(),
                revisions: category
                    .templates()
                    .iter()
                    .map(|t| model.index.bucket_revision(t))
                    .collect(),
            },
        }
    }

    fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Grid {
                    row_len,
                    heights,
                    other: a,
                },
                Self::Grid {
                    row_len: row_len2,
                    heights: heights2,
                    other: b,
                },
            ) => row_len == row_len2 && Arc::ptr_eq(heights, heights2) && Arc::ptr_eq(a, b),
            (
                Self::Buckets { lineage, revisions },
                Self::Buckets {
                    lineage: lineage2,
                    revisions: revisions2,
                },
            ) => lineage == lineage2 && revisions == revisions2,
            _ => false,
        }
    }
}

#[derive(Debug)]
struct Entry {
    key: Dependency,
    batch: Arc<BatchedGeometry>,
}

/// Memoized category batches.
///
/// A batch is rebuilt only when the inputs its category reads have changed
/// since it was last built, so editing one tree leaves the terrain, water
/// and path batches alone.
#[derive(Debug, Default)]
pub struct BatchCache {
    style: MeshStyle,
    entries: HashMap<Category, Entry>,
    rebuilds: u64,
}

impl BatchCache {
    /// Create an empty cache drawing with `style`.
    pub fn new(style: MeshStyle) -> Self {
        Self {
            style,
            entries: HashMap::new(),
            rebuilds: 0,
        }
    }

    /// The style batches are built with.
    pub fn style(&self) -> &MeshStyle {
        &self.style
    }

    /// The batch for `category`, rebuilding it if its inputs changed.
    pub fn batch(&mut self, category: Category, model: &EditableModel) -> Arc<BatchedGeometry> {
        let key = Dependency::of(category, model);
        if let Some(entry) = self.entries.get(&category).filter(|e| e.key.matches(&key)) {
            return Arc::clone(&entry.batch);
        }

        let batch = Arc::new(category.build(model, &self.style));
        self.rebuilds += 1;
        tracing::debug!(
            %category,
            vertices = batch.vertex_count(),
            triangles = batch.triangle_count(),
            "rebuilt batch"
        );
        self.entries.insert(
            category,
            Entry {
                key,
                batch: Arc::clone(&batch),
            },
        );
        batch
    }

    /// Every category's batch, in draw order.
    pub fn all(&mut self, model: &EditableModel) -> Vec<(Category, Arc<BatchedGeometry>)> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.batch(category, model)))
            .collect()
    }

    /// How many batches have been built since creation.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Drop every cached batch.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }
}
