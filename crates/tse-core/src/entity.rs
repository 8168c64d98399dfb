use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of an entity as written in the save (`Entities[].Id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One record of the save's `Entities` array.
///
/// Only `Id` and `TemplateName` are interpreted. Component data and any
/// other keys are carried verbatim so an edited entity serializes back with
/// everything it was read with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique id within the save.
    #[serde(rename = "Id")]
    pub id: EntityId,
    /// The template (kind) the entity was spawned from.
    #[serde(rename = "TemplateName")]
    pub template_name: String,
    /// Component payload keyed by component name.
    #[serde(rename = "Components", default)]
    pub components: Map<String, Value>,
    /// Keys other than the three above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    /// Create an entity with no components.
    pub fn new(id: impl Into<EntityId>, template_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template_name: template_name.into(),
            components: Map::new(),
            extra: Map::new(),
        }
    }

    /// Builder-style component insertion, mostly useful for fixtures.
    pub fn with_component(mut self, name: impl Into<String>, value: Value) -> Self {
        self.components.insert(name.into(), value);
        self
    }

    /// Look up a value by walking component keys and array positions.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        self.components.get(*first)?.pointer(&json_pointer(rest))
    }

    /// Mutable counterpart of [`Entity::lookup`]. Never creates structure.
    pub fn lookup_mut(&mut self, path: &[&str]) -> Option<&mut Value> {
        let (first, rest) = path.split_first()?;
        self.components
            .get_mut(*first)?
            .pointer_mut(&json_pointer(rest))
    }
}

/// RFC 6901 pointer for the given segments.
fn json_pointer(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| format!("/{}", s.replace('~', "~0").replace('/', "~1")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn beaver() -> Entity {
        Entity::new("b1", "BeaverAdult").with_component(
            "NeedManager",
            json!({ "Needs": [{ "Name": "Hunger", "Points": 0.5 }] }),
        )
    }

    #[test]
    fn lookup_walks_objects_and_arrays() {
        let entity = beaver();
        let points = entity.lookup(&["NeedManager", "Needs", "0", "Points"]);
        assert_eq!(points, Some(&json!(0.5)));
    }

    #[test]
    fn lookup_misses_are_none() {
        let entity = beaver();
        assert!(entity.lookup(&["NeedManager", "Needs", "3", "Points"]).is_none());
        assert!(entity.lookup(&["Beaver", "Name"]).is_none());
        assert!(entity.lookup(&[]).is_none());
    }

    #[test]
    fn lookup_mut_does_not_create_structure() {
        let mut entity = beaver();
        assert!(entity.lookup_mut(&["Beaver", "Name"]).is_none());
        assert!(!entity.components.contains_key("Beaver"));
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let raw = json!({
            "Id": "x",
            "TemplateName": "Pine",
            "Components": { "Growable": { "GrowthProgress": 1.0 } },
            "Flags": 7
        });
        let entity: Entity = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entity.extra.get("Flags"), Some(&json!(7)));
        assert_eq!(serde_json::to_value(&entity).unwrap(), raw);
    }

    #[test]
    fn entity_id_displays_raw() {
        assert_eq!(EntityId::from("abc-123").to_string(), "abc-123");
    }
}
