//! Render geometry for Timberborn save maps.
//!
//! Turns an [`EditableModel`](tse_core::EditableModel) into one merged
//! buffer per [`Category`] plus an individual mesh per beaver. Batches are
//! memoized in a [`BatchCache`] keyed on the inputs each category reads.

/// Merged geometry buffers.
pub mod batch;
/// Per-category memoization.
pub mod cache;
/// Categories and the units they are built from.
pub mod category;
/// Procedural primitives.
pub mod geometry;
/// Colours and materials.
pub mod material;
/// Whole-map placement in the viewer.
pub mod scene;
/// Geometry tunables.
pub mod style;
/// Per-cell and per-entity geometry.
pub mod unit;

/// Re-export batch types.
pub use batch::{BatchedGeometry, merge_geometries};
/// Re-export the cache.
pub use cache::BatchCache;
/// Re-export category types.
pub use category::{AGENT_TEMPLATES, AgentMesh, Category, PATH_TEMPLATES, TREE_TEMPLATES, agent_meshes};
/// Re-export geometry types.
pub use geometry::{RawGeometry, Vertex};
/// Re-export material types.
pub use material::{Color, Material, Palette};
/// Re-export the scene transform.
pub use scene::SceneTransform;
/// Re-export the style.
pub use style::MeshStyle;
/// Re-export unit types.
pub use unit::{Highlight, Unit, generate_unit_geometry};
