//! Save model for the Timberborn save editor.
//!
//! Decodes the terrain grids and the editable entities of an already-parsed
//! save into an [`EditableModel`], keeps per-template indexes consistent
//! through edits made in an [`EditSession`], and merges the result back into
//! the save document. Rendering lives in `tse-mesh`; file handling lives in
//! the CLI.

/// Editor configuration: allow-list and grid row convention.
pub mod config;
/// Reading and writing the save document.
pub mod document;
/// Entity records and ids.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Grid arrays and flat-index arithmetic.
pub mod grid;
/// Per-template entity index.
pub mod index;
/// Versioned editable model.
pub mod model;
/// Selection and edit lifecycle.
pub mod session;
/// Typed views over known entity shapes and editable field paths.
pub mod view;

/// Re-export configuration types.
pub use config::{EditorConfig, RowAxis};
/// Re-export entity types.
pub use entity::{Entity, EntityId};
/// Re-export error types.
pub use error::{SaveError, SaveResult};
/// Re-export grid types.
pub use grid::{GridIndexer, MapGrid, parse_grid};
/// Re-export index types.
pub use index::{EntityIndex, UpsertOutcome};
/// Re-export the model.
pub use model::EditableModel;
/// Re-export session types.
pub use session::{EditSession, EditState};
/// Re-export views.
pub use view::{BeaverView, BlockCoordinates, FieldPath, Need, PathView, TreeView, WorldPosition};
