use std::fmt;

use tse_core::{BeaverView, EditableModel, Entity, EntityId, EntityIndex, PathView, TreeView};

use crate::batch::{BatchedGeometry, merge_geometries};
use crate::geometry::RawGeometry;
use crate::material::Material;
use crate::style::MeshStyle;
use crate::unit::{Highlight, Unit, generate_unit_geometry};

/// Tree species drawn as cones.
pub const TREE_TEMPLATES: [&str; 3] = ["Pine", "Maple", "Birch"];
/// Templates drawn as path tiles.
pub const PATH_TEMPLATES: [&str; 1] = ["DirtPath"];
/// Templates drawn as individual agents.
pub const AGENT_TEMPLATES: [&str; 2] = ["BeaverAdult", "BeaverChild"];

/// A batched group of geometry sharing one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Terrain columns with moisture.
    WetLand,
    /// Terrain columns without moisture.
    DryLand,
    /// Water surfaces.
    Water,
    /// Healthy trees.
    GreenTrees,
    /// Dry or dead trees.
    BrownTrees,
    /// Path tiles.
    Paths,
}

impl Category {
    /// Every category, in draw order.
    pub const ALL: [Category; 6] = [
        Self::WetLand,
        Self::DryLand,
        Self::Water,
        Self::GreenTrees,
        Self::BrownTrees,
        Self::Paths,
    ];

    /// Templates whose buckets feed this category. Empty for grid-derived
    /// categories.
    pub fn templates(self) -> &'static [&'static str] {
        match self {
            Self::WetLand | Self::DryLand | Self::Water => &[],
            Self::GreenTrees | Self::BrownTrees => &TREE_TEMPLATES,
            Self::Paths => &PATH_TEMPLATES,
        }
    }

    /// Whether the category is derived from the terrain grids.
    pub fn is_terrain(self) -> bool {
        self.templates().is_empty()
    }

    /// Material from the style's palette.
    pub fn material(self, style: &MeshStyle) -> Material {
        let palette = &style.palette;
        match self {
            Self::WetLand => palette.wet_land,
            Self::DryLand => palette.dry_land,
            Self::Water => palette.water,
            Self::GreenTrees => palette.green_tree,
            Self::BrownTrees => palette.brown_tree,
            Self::Paths => palette.path,
        }
    }

    /// The units making up this category for `model`.
    pub fn units(self, model: &EditableModel) -> Vec<Unit> {
        match self {
            Self::WetLand => terrain_units(model, true),
            Self::DryLand => terrain_units(model, false),
            Self::Water => water_units(model),
            Self::GreenTrees => tree_units(&model.index, false),
            Self::BrownTrees => tree_units(&model.index, true),
            Self::Paths => path_units(&model.index),
        }
    }

    /// Generate and merge every unit of this category.
    pub fn build(self, model: &EditableModel, style: &MeshStyle) -> BatchedGeometry {
        let units = self.units(model);
        merge_geometries(
            units.iter().map(|unit| generate_unit_geometry(unit, style)),
            self.material(style),
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WetLand => "wet land",
            Self::DryLand => "dry land",
            Self::Water => "water",
            Self::GreenTrees => "green trees",
            Self::BrownTrees => "brown trees",
            Self::Paths => "paths",
        };
        f.write_str(name)
    }
}

fn terrain_units(model: &EditableModel, wet: bool) -> Vec<Unit> {
    let grid = &model.grid;
    let indexer = model.indexer();
    grid.height_map
        .iter()
        .zip(grid.moisture_map.iter())
        .enumerate()
        .filter(|(_, (_, moisture))| (**moisture > 0.0) == wet)
        .map(|(i, (&height, _))| Unit::Terrain {
            cell: indexer.index_to_world(i, 0.0),
            height: height as f32,
        })
        .collect()
}

fn water_units(model: &EditableModel) -> Vec<Unit> {
    let grid = &model.grid;
    let indexer = model.indexer();
    grid.water_depth_map
        .iter()
        .zip(grid.height_map.iter())
        .enumerate()
        .filter(|(_, (depth, _))| **depth > 0.0)
        .map(|(i, (&depth, &height))| Unit::Water {
            cell: indexer.index_to_world(i, 0.0),
            surface: depth + height as f32,
        })
        .collect()
}

fn tree_units(index: &EntityIndex, withered: bool) -> Vec<Unit> {
    index
        .get_by_templates(&TREE_TEMPLATES[..])
        .into_iter()
        .filter_map(|entity| readable(entity, TreeView::read))
        .filter(|tree| tree.is_withered() == withered)
        .map(|tree| Unit::Tree {
            base: tree.coordinates.to_render(),
            adult: tree.is_adult(),
            dead: tree.dead,
        })
        .collect()
}

fn path_units(index: &EntityIndex) -> Vec<Unit> {
    index
        .get_by_templates(&PATH_TEMPLATES[..])
        .into_iter()
        .filter_map(|entity| readable(entity, PathView::read))
        .map(|path| Unit::Path {
            base: path.coordinates.to_render(),
        })
        .collect()
}

/// Read a typed view, logging and skipping entities that lack the shape.
fn readable<T>(entity: &Entity, read: impl Fn(&Entity) -> tse_core::SaveResult<T>) -> Option<T> {
    match read(entity) {
        Ok(view) => Some(view),
        Err(e) => {
            tracing::warn!(id = %entity.id, template = %entity.template_name, "skipping entity: {e}");
            None
        }
    }
}

/// One beaver, drawn on its own so it can be picked.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentMesh {
    /// Entity the mesh belongs to.
    pub id: EntityId,
    /// Placed geometry.
    pub geometry: RawGeometry,
    /// Colour for the current highlight.
    pub material: Material,
}

/// One mesh per beaver, in bucket order (adults first).
///
/// The selected agent wins over the hovered one when both name the same id.
pub fn agent_meshes(
    index: &EntityIndex,
    selected: Option<&EntityId>,
    hovered: Option<&EntityId>,
    style: &MeshStyle,
) -> Vec<AgentMesh> {
    index
        .get_by_templates(&AGENT_TEMPLATES[..])
        .into_iter()
        .filter_map(|entity| readable(entity, BeaverView::read))
        .map(|beaver| {
            let highlight = if selected == Some(&beaver.id) {
                Highlight::Selected
            } else if hovered == Some(&beaver.id) {
                Highlight::Hovered
            } else {
                Highlight::None
            };
            let palette = &style.palette;
            let material = match highlight {
                Highlight::None => palette.agent_idle,
                Highlight::Hovered => palette.agent_hovered,
                Highlight::Selected => palette.agent_selected,
            };
            let unit = Unit::Agent {
                position: [beaver.position.x, beaver.position.y, beaver.position.z],
                adult: beaver.adult,
                highlight,
            };
            AgentMesh {
                id: beaver.id,
                geometry: generate_unit_geometry(&unit, style),
                material,
            }
        })
        .collect()
}
