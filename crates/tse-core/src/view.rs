use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::entity::{Entity, EntityId};
use crate::error::{SaveError, SaveResult};

/// Integer block coordinates (`BlockObject.Coordinates`). `X`/`Y` lie on the
/// map plane and `Z` is the vertical level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BlockCoordinates {
    /// Column on the map plane.
    #[serde(rename = "X")]
    pub x: i32,
    /// Row on the map plane.
    #[serde(rename = "Y")]
    pub y: i32,
    /// Vertical level.
    #[serde(rename = "Z")]
    pub z: i32,
}

impl BlockCoordinates {
    /// Render-space point: the plane `(X, Y)` lands on `(x, z)` and the
    /// vertical `Z` becomes `y`.
    pub fn to_render(self) -> [f32; 3] {
        [self.x as f32, self.z as f32, self.y as f32]
    }
}

/// A floating-point position that is already in render space
/// (`Beaver.Position`, `Y` up).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WorldPosition {
    /// Render-space x.
    #[serde(rename = "X")]
    pub x: f32,
    /// Render-space y (up).
    #[serde(rename = "Y")]
    pub y: f32,
    /// Render-space z.
    #[serde(rename = "Z")]
    pub z: f32,
}

/// One entry of `NeedManager.Needs`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Need {
    /// Need identifier, e.g. `Hunger`.
    #[serde(rename = "Name")]
    pub name: String,
    /// Current satisfaction in `[0, 1]`.
    #[serde(rename = "Points")]
    pub points: f32,
}

/// Typed read of a `BeaverAdult` / `BeaverChild` entity.
#[derive(Debug, Clone, PartialEq)]
pub struct BeaverView {
    /// Entity id.
    pub id: EntityId,
    /// `true` for `BeaverAdult`.
    pub adult: bool,
    /// Display name.
    pub name: String,
    /// Render-space position.
    pub position: WorldPosition,
    /// Needs in save order.
    pub needs: Vec<Need>,
}

impl BeaverView {
    /// Read the beaver fields from an entity.
    pub fn read(entity: &Entity) -> SaveResult<Self> {
        Ok(Self {
            id: entity.id.clone(),
            adult: entity.template_name == "BeaverAdult",
            name: optional(entity, &["Beaver", "Name"])?.unwrap_or_default(),
            position: required(entity, &["Beaver", "Position"])?,
            needs: optional(entity, &["NeedManager", "Needs"])?.unwrap_or_default(),
        })
    }

    /// Position of the named need in the needs list.
    pub fn need_index(&self, name: &str) -> Option<usize> {
        self.needs.iter().position(|n| n.name.eq_ignore_ascii_case(name))
    }
}

/// Typed read of a tree entity (`Pine`, `Maple`, `Birch`).
#[derive(Debug, Clone, PartialEq)]
pub struct TreeView {
    /// Entity id.
    pub id: EntityId,
    /// Block the tree stands on.
    pub coordinates: BlockCoordinates,
    /// `WateredObject.IsDry`; absent means watered.
    pub dry: bool,
    /// `LivingNaturalResource.IsDead`; absent means alive.
    pub dead: bool,
    /// `Growable.GrowthProgress`; absent means a fresh sapling.
    pub growth_progress: f32,
}

impl TreeView {
    /// Growth above which a tree counts as fully grown.
    pub const ADULT_GROWTH: f32 = 0.9999;

    /// Read the tree fields from an entity.
    pub fn read(entity: &Entity) -> SaveResult<Self> {
        Ok(Self {
            id: entity.id.clone(),
            coordinates: required(entity, &["BlockObject", "Coordinates"])?,
            dry: optional(entity, &["WateredObject", "IsDry"])?.unwrap_or(false),
            dead: optional(entity, &["LivingNaturalResource", "IsDead"])?.unwrap_or(false),
            growth_progress: optional(entity, &["Growable", "GrowthProgress"])?.unwrap_or(0.0),
        })
    }

    /// Whether the tree has finished growing.
    pub fn is_adult(&self) -> bool {
        self.growth_progress > Self::ADULT_GROWTH
    }

    /// Dry or dead trees render brown.
    pub fn is_withered(&self) -> bool {
        self.dry || self.dead
    }
}

/// Typed read of a path tile (`DirtPath`).
#[derive(Debug, Clone, PartialEq)]
pub struct PathView {
    /// Entity id.
    pub id: EntityId,
    /// Block the tile covers.
    pub coordinates: BlockCoordinates,
}

impl PathView {
    /// Read the path fields from an entity.
    pub fn read(entity: &Entity) -> SaveResult<Self> {
        Ok(Self {
            id: entity.id.clone(),
            coordinates: required(entity, &["BlockObject", "Coordinates"])?,
        })
    }
}

fn optional<T: DeserializeOwned>(entity: &Entity, path: &[&str]) -> SaveResult<Option<T>> {
    entity
        .lookup(path)
        .map(|v| {
            T::deserialize(v).map_err(|e| SaveError::InvalidEntity {
                id: entity.id.clone(),
                reason: format!("Components.{}: {e}", path.join(".")),
            })
        })
        .transpose()
}

fn required<T: DeserializeOwned>(entity: &Entity, path: &[&str]) -> SaveResult<T> {
    optional(entity, path)?.ok_or_else(|| SaveError::InvalidEntity {
        id: entity.id.clone(),
        reason: format!("missing Components.{}", path.join(".")),
    })
}

/// The entity fields the editor is allowed to change.
///
/// Paths resolve only against structure that already exists; they never
/// create components or list entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    /// `Components.Beaver.Name`.
    BeaverName,
    /// `Components.NeedManager.Needs.<n>.Points`.
    NeedPoints(usize),
}

impl FieldPath {
    /// Run `f` on the path segments below `Components`.
    fn with_segments<R>(&self, f: impl FnOnce(&[&str]) -> R) -> R {
        match self {
            Self::BeaverName => f(&["Beaver", "Name"]),
            Self::NeedPoints(i) => f(&["NeedManager", "Needs", i.to_string().as_str(), "Points"]),
        }
    }

    /// Read the current value.
    pub fn get<'e>(&self, entity: &'e Entity) -> SaveResult<&'e Value> {
        self.with_segments(|path| entity.lookup(path))
            .ok_or_else(|| SaveError::UnknownField(self.to_string()))
    }

    /// Overwrite the value. Names must be strings; need points must be
    /// numbers and are clamped to `[0, 1]`.
    pub fn set(&self, entity: &mut Entity, value: Value) -> SaveResult<()> {
        let value = match self {
            Self::BeaverName => {
                if !value.is_string() {
                    return Err(self.type_error("string"));
                }
                value
            }
            Self::NeedPoints(_) => {
                let points = value.as_f64().ok_or_else(|| self.type_error("number"))?;
                Value::from(points.clamp(0.0, 1.0))
            }
        };

        self.with_segments(|path| entity.lookup_mut(path).map(|slot| *slot = value))
            .ok_or_else(|| SaveError::UnknownField(self.to_string()))
    }

    fn type_error(&self, expected: &'static str) -> SaveError {
        SaveError::FieldType {
            path: self.to_string(),
            expected,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Components")?;
        self.with_segments(|path| path.iter().try_for_each(|segment| write!(f, ".{segment}")))
    }
}

impl FromStr for FieldPath {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("Components.").unwrap_or(s);
        let parts: Vec<&str> = rest.split('.').collect();
        match parts.as_slice() {
            ["Beaver", "Name"] => Ok(Self::BeaverName),
            ["NeedManager", "Needs", index, "Points"] => index
                .parse()
                .map(Self::NeedPoints)
                .map_err(|_| SaveError::UnknownField(s.to_string())),
            _ => Err(SaveError::UnknownField(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn beaver() -> Entity {
        Entity::new("b1", "BeaverAdult")
            .with_component(
                "Beaver",
                json!({ "Name": "Olive", "Position": { "X": 4.5, "Y": 2.0, "Z": 7.25 } }),
            )
            .with_component(
                "NeedManager",
                json!({ "Needs": [
                    { "Name": "Hunger", "Points": 0.5 },
                    { "Name": "Thirst", "Points": 0.8 }
                ] }),
            )
    }

    fn tree(dry: bool, dead: bool, growth: f64) -> Entity {
        Entity::new("t1", "Pine")
            .with_component("BlockObject", json!({ "Coordinates": { "X": 3, "Y": 9, "Z": 2 } }))
            .with_component("WateredObject", json!({ "IsDry": dry }))
            .with_component("LivingNaturalResource", json!({ "IsDead": dead }))
            .with_component("Growable", json!({ "GrowthProgress": growth }))
    }

    #[test]
    fn beaver_view_reads_fields() {
        let view = BeaverView::read(&beaver()).unwrap();
        assert!(view.adult);
        assert_eq!(view.name, "Olive");
        assert_eq!(view.position, WorldPosition { x: 4.5, y: 2.0, z: 7.25 });
        assert_eq!(view.needs.len(), 2);
        assert_eq!(view.need_index("thirst"), Some(1));
        assert_eq!(view.need_index("Sleep"), None);
    }

    #[test]
    fn beaver_without_position_is_invalid() {
        let entity = Entity::new("b2", "BeaverChild");
        let err = BeaverView::read(&entity).unwrap_err();
        assert!(matches!(err, SaveError::InvalidEntity { .. }));
    }

    #[test]
    fn tree_view_adult_threshold() {
        assert!(TreeView::read(&tree(false, false, 1.0)).unwrap().is_adult());
        assert!(!TreeView::read(&tree(false, false, 0.9999)).unwrap().is_adult());
    }

    #[test]
    fn tree_view_withered_when_dry_or_dead() {
        assert!(!TreeView::read(&tree(false, false, 1.0)).unwrap().is_withered());
        assert!(TreeView::read(&tree(true, false, 1.0)).unwrap().is_withered());
        assert!(TreeView::read(&tree(false, true, 1.0)).unwrap().is_withered());
    }

    #[test]
    fn block_coordinates_swap_plane_into_xz() {
        let view = PathView::read(&tree(false, false, 1.0)).unwrap();
        assert_eq!(view.coordinates.to_render(), [3.0, 2.0, 9.0]);
    }

    #[test]
    fn field_path_sets_name() {
        let mut entity = beaver();
        FieldPath::BeaverName.set(&mut entity, json!("Birch")).unwrap();
        assert_eq!(FieldPath::BeaverName.get(&entity).unwrap(), &json!("Birch"));
    }

    #[test]
    fn field_path_clamps_need_points() {
        let mut entity = beaver();
        FieldPath::NeedPoints(1).set(&mut entity, json!(1.7)).unwrap();
        assert_eq!(FieldPath::NeedPoints(1).get(&entity).unwrap(), &json!(1.0));
        FieldPath::NeedPoints(0).set(&mut entity, json!(-3)).unwrap();
        assert_eq!(FieldPath::NeedPoints(0).get(&entity).unwrap(), &json!(0.0));
    }

    #[test]
    fn field_path_rejects_missing_structure() {
        let mut entity = beaver();
        let err = FieldPath::NeedPoints(5).set(&mut entity, json!(0.5)).unwrap_err();
        assert!(matches!(err, SaveError::UnknownField(_)));

        let mut bare = Entity::new("b3", "BeaverChild");
        assert!(FieldPath::BeaverName.set(&mut bare, json!("x")).is_err());
        assert!(bare.components.is_empty());
    }

    #[test]
    fn field_path_rejects_wrong_types() {
        let mut entity = beaver();
        let err = FieldPath::BeaverName.set(&mut entity, json!(3)).unwrap_err();
        assert!(matches!(err, SaveError::FieldType { expected: "string", .. }));
        let err = FieldPath::NeedPoints(0).set(&mut entity, json!("full")).unwrap_err();
        assert!(matches!(err, SaveError::FieldType { expected: "number", .. }));
    }

    #[test]
    fn field_path_parses_and_displays() {
        let path: FieldPath = "Components.NeedManager.Needs.2.Points".parse().unwrap();
        assert_eq!(path, FieldPath::NeedPoints(2));
        assert_eq!(path.to_string(), "Components.NeedManager.Needs.2.Points");
        assert_eq!("Beaver.Name".parse::<FieldPath>().unwrap(), FieldPath::BeaverName);
        assert!("Beaver.Age".parse::<FieldPath>().is_err());
    }

    #[test]
    fn field_path_reaches_the_indexed_need() {
        let mut entity = beaver();
        FieldPath::NeedPoints(1).set(&mut entity, json!(0.25)).unwrap();
        assert_eq!(entity.lookup(&["NeedManager", "Needs", "1", "Points"]), Some(&json!(0.25)));
        assert_eq!(entity.lookup(&["NeedManager", "Needs", "0", "Points"]), Some(&json!(0.5)));
        assert_eq!(FieldPath::BeaverName.to_string(), "Components.Beaver.Name");
    }
}
