use crate::geometry::{RawGeometry, box_geometry, cone_geometry, cylinder_geometry, plane_geometry};
use crate::style::MeshStyle;

/// Pointer interaction state of an individually drawn agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    /// Neither hovered nor selected.
    #[default]
    None,
    /// Under the pointer.
    Hovered,
    /// Currently being edited.
    Selected,
}

impl Highlight {
    /// Hovered and selected agents are drawn enlarged.
    pub fn is_emphasized(self) -> bool {
        self != Self::None
    }
}

/// Attributes of one cell or entity to draw. Positions are render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    /// Terrain column standing on the ground plane.
    Terrain {
        /// Column centre `[x, 0, z]`.
        cell: [f32; 3],
        /// Terrain height; also the column height.
        height: f32,
    },
    /// Water surface over a cell.
    Water {
        /// Cell centre `[x, 0, z]`.
        cell: [f32; 3],
        /// Surface elevation (terrain height plus water depth).
        surface: f32,
    },
    /// Tree standing on a block.
    Tree {
        /// Block position.
        base: [f32; 3],
        /// Fully grown.
        adult: bool,
        /// Dead trees are drawn thinner.
        dead: bool,
    },
    /// Path tile covering a block.
    Path {
        /// Block position.
        base: [f32; 3],
    },
    /// Beaver at its own float position.
    Agent {
        /// Feet position.
        position: [f32; 3],
        /// Adults are taller.
        adult: bool,
        /// Interaction state.
        highlight: Highlight,
    },
}

/// Build the local geometry for `unit` and move it into place.
pub fn generate_unit_geometry(unit: &Unit, style: &MeshStyle) -> RawGeometry {
    match *unit {
        Unit::Terrain { cell, height } => {
            box_geometry(1.0, height, 1.0).translate([cell[0], height / 2.0, cell[2]])
        }
        Unit::Water { cell, surface } => {
            plane_geometry(1.0, 1.0).translate([cell[0], surface, cell[2]])
        }
        Unit::Tree { base, adult, dead } => {
            let radius = if adult { 0.4 } else { 0.2 } * if dead { 0.5 } else { 1.0 };
            let height = if adult { 2.0 } else { 0.5 };
            cone_geometry(radius, height, 4, 4)
                .translate([base[0], base[1] + style.tree_lift, base[2]])
        }
        Unit::Path { base } => {
            plane_geometry(1.0, 1.0).translate([base[0], base[1] + style.path_lift, base[2]])
        }
        Unit::Agent {
            position,
            adult,
            highlight,
        } => {
            let emphasized = highlight.is_emphasized();
            let radius = if emphasized { 0.6 } else { 0.4 };
            let height = if adult { 1.0 } else { 0.6 } * if emphasized { 1.2 } else { 1.0 };
            let rise = style.agent_lift + if adult { 0.5 } else { 0.3 };
            cylinder_geometry(radius, radius, height, 8, 1)
                .translate([position[0], position[1] + rise, position[2]])
        }
    }
}
