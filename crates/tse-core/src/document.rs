//! The boundary with the save document: turning an already-parsed save into
//! an [`EditableModel`] and merging edits back.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::config::EditorConfig;
use crate::entity::Entity;
use crate::error::{SaveError, SaveResult};
use crate::grid::parse_grid;
use crate::index::EntityIndex;
use crate::model::EditableModel;

/// Homepage recorded in the `Editor` field of exported saves.
pub const EDITOR_URL: &str = "https://charperbonaroo.github.io/timberborn-save-editor/";

/// Suffix appended to `GameVersion` on export.
pub const VERSION_SUFFIX: &str = "-TSE";

/// Decode the map grids and the allow-listed entities of a save.
pub fn read(snapshot: &Value, config: &EditorConfig) -> SaveResult<EditableModel> {
    let width = integer_at(snapshot, &["Singletons", "MapSize", "Size", "X"])?;
    let height = integer_at(snapshot, &["Singletons", "MapSize", "Size", "Y"])?;
    let heights = str_at(snapshot, &["Singletons", "TerrainMap", "Heights", "Array"])?;
    let moisture = str_at(
        snapshot,
        &["Singletons", "SoilMoistureSimulator", "MoistureLevels", "Array"],
    )?;
    let water = str_at(snapshot, &["Singletons", "WaterMap", "WaterDepths", "Array"])?;

    let grid = parse_grid(heights, moisture, water, width, height)?;

    let mut entities = Vec::new();
    for raw in entities_of(snapshot)? {
        let template = raw.get("TemplateName").and_then(Value::as_str);
        if template.is_some_and(|t| config.allows(t)) {
            entities.push(Entity::deserialize(raw)?);
        }
    }
    let index = EntityIndex::build(entities, &config.allowed_templates);

    Ok(EditableModel::new(grid, index, config.row_axis))
}

/// Copy of `snapshot` whose `Entities` carry the model's versions.
///
/// Entities are matched by id and replaced in place. Entities the model
/// does not hold are left as they are; entities only the model holds are
/// appended.
pub fn write(snapshot: &Value, model: &EditableModel) -> SaveResult<Value> {
    let mut out = snapshot.clone();
    let entities = out
        .get_mut("Entities")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| SaveError::MissingField("Entities".into()))?;

    let mut seen = HashSet::new();
    let mut replaced = 0usize;
    for slot in entities.iter_mut() {
        let Some(id) = slot.get("Id").and_then(Value::as_str) else {
            continue;
        };
        if let Some(entity) = model.index.get(&id.into()) {
            seen.insert(entity.id.clone());
            *slot = serde_json::to_value(entity)?;
            replaced += 1;
        }
    }

    let mut added: Vec<&Entity> = model
        .index
        .entities()
        .filter(|e| !seen.contains(&e.id))
        .collect();
    added.sort_by_key(|e| e.id.clone());
    for entity in &added {
        entities.push(serde_json::to_value(entity)?);
    }

    tracing::debug!(replaced, added = added.len(), version = model.version(), "wrote entities");
    Ok(out)
}

/// Mark a save as produced by this editor: suffix `GameVersion` (once) and
/// record the editor homepage.
pub fn stamp_export(snapshot: &mut Value) {
    let Some(root) = snapshot.as_object_mut() else {
        return;
    };
    if let Some(Value::String(version)) = root.get_mut("GameVersion") {
        let base = version
            .strip_suffix(VERSION_SUFFIX)
            .unwrap_or(version.as_str())
            .to_string();
        *version = format!("{base}{VERSION_SUFFIX}");
    }
    root.insert("Editor".into(), Value::from(EDITOR_URL));
}

fn at<'v>(snapshot: &'v Value, path: &[&str]) -> SaveResult<&'v Value> {
    path.iter()
        .try_fold(snapshot, |value, key| value.get(*key))
        .ok_or_else(|| SaveError::MissingField(path.join(".")))
}

fn integer_at(snapshot: &Value, path: &[&str]) -> SaveResult<usize> {
    at(snapshot, path)?
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| SaveError::FieldType {
            path: path.join("."),
            expected: "non-negative integer",
        })
}

fn str_at<'v>(snapshot: &'v Value, path: &[&str]) -> SaveResult<&'v str> {
    at(snapshot, path)?
        .as_str()
        .ok_or_else(|| SaveError::FieldType {
            path: path.join("."),
            expected: "string",
        })
}

fn entities_of(snapshot: &Value) -> SaveResult<&Vec<Value>> {
    snapshot
        .get("Entities")
        .and_then(Value::as_array)
        .ok_or_else(|| SaveError::MissingField("Entities".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn save() -> Value {
        json!({
            "GameVersion": "0.2.8.1-a1b2c3d",
            "Singletons": {
                "MapSize": { "Size": { "X": 3, "Y": 2 } },
                "TerrainMap": { "Heights": { "Array": "1 2 3 4 5 6" } },
                "SoilMoistureSimulator": { "MoistureLevels": { "Array": "0 0 0.5 0 0 1" } },
                "WaterMap": { "WaterDepths": { "Array": "0 0 0 0.75 0 0" } }
            },
            "Entities": [
                { "Id": "lodge", "TemplateName": "Lodge", "Components": { "Odd": [1, 2] } },
                { "Id": "a", "TemplateName": "Pine", "Components": {} },
                { "Id": "b", "TemplateName": "BeaverAdult", "Components": { "Beaver": { "Name": "Olive" } } }
            ]
        })
    }

    #[test]
    fn read_decodes_grid_and_allowed_entities() {
        let model = read(&save(), &EditorConfig::default()).unwrap();
        assert_eq!(model.grid.width, 3);
        assert_eq!(model.grid.height, 2);
        assert_eq!(&*model.grid.height_map, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(model.index.len(), 2);
        assert!(model.index.get(&"lodge".into()).is_none());
        assert_eq!(model.index.bucket("Pine"), [crate::EntityId::from("a")]);
    }

    #[test]
    fn read_reports_missing_singletons() {
        let mut snapshot = save();
        snapshot["Singletons"]
            .as_object_mut()
            .unwrap()
            .remove("WaterMap");
        let err = read(&snapshot, &EditorConfig::default()).unwrap_err();
        match err {
            SaveError::MissingField(path) => {
                assert_eq!(path, "Singletons.WaterMap.WaterDepths.Array")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_propagates_grid_errors() {
        let mut snapshot = save();
        snapshot["Singletons"]["TerrainMap"]["Heights"]["Array"] = json!("1 2");
        let err = read(&snapshot, &EditorConfig::default()).unwrap_err();
        assert!(matches!(err, SaveError::Parse { field: "heights", .. }));
    }

    #[test]
    fn write_replaces_edited_entities_in_place() {
        let snapshot = save();
        let mut model = read(&snapshot, &EditorConfig::default()).unwrap();
        let mut beaver = model.index.get(&"b".into()).unwrap().clone();
        beaver.components["Beaver"]["Name"] = json!("Hazel");
        model.apply(beaver);

        let out = write(&snapshot, &model).unwrap();
        let entities = out["Entities"].as_array().unwrap();
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0], snapshot["Entities"][0]);
        assert_eq!(entities[1], snapshot["Entities"][1]);
        assert_eq!(entities[2]["Components"]["Beaver"]["Name"], json!("Hazel"));
        assert_eq!(out["Singletons"], snapshot["Singletons"]);
    }

    #[test]
    fn write_appends_entities_missing_from_the_save() {
        let snapshot = save();
        let mut model = read(&snapshot, &EditorConfig::default()).unwrap();
        model.apply(Entity::new("z", "Birch"));
        let out = write(&snapshot, &model).unwrap();
        let entities = out["Entities"].as_array().unwrap();
        assert_eq!(entities.len(), 4);
        assert_eq!(entities[3]["Id"], json!("z"));
    }

    #[test]
    fn stamp_export_is_idempotent() {
        let mut snapshot = save();
        stamp_export(&mut snapshot);
        stamp_export(&mut snapshot);
        assert_eq!(snapshot["GameVersion"], json!("0.2.8.1-a1b2c3d-TSE"));
        assert_eq!(snapshot["Editor"], json!(EDITOR_URL));
    }
}
