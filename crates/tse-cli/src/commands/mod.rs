pub mod edit;
pub mod info;
pub mod list;
pub mod mesh;

use std::path::Path;

use serde_json::Value;
use tse_core::{EditableModel, EditorConfig};

/// A save read from disk: the raw document and the model decoded from it.
pub struct Loaded {
    pub document: Value,
    pub model: EditableModel,
}

/// Read and decode a save file.
pub fn load(path: &Path, config: &EditorConfig) -> Result<Loaded, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let document: Value = serde_json::from_str(&text)
        .map_err(|e| format!("{} is not valid JSON: {e}", path.display()))?;
    let model = tse_core::document::read(&document, config)
        .map_err(|e| format!("cannot load {}: {e}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        width = model.grid.width,
        height = model.grid.height,
        entities = model.index.len(),
        "loaded save"
    );
    Ok(Loaded { document, model })
}
