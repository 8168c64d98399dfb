use crate::material::Palette;

/// Tunables for unit geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStyle {
    /// Height of path tiles above their block, against z-fighting.
    pub path_lift: f32,
    /// Offset from a tree's block to the centre of its cone.
    pub tree_lift: f32,
    /// Gap between a beaver's position and the bottom of its cylinder.
    pub agent_lift: f32,
    /// Colours.
    pub palette: Palette,
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self {
            path_lift: 0.1,
            tree_lift: 0.5,
            agent_lift: 0.1,
            palette: Palette::default(),
        }
    }
}

impl MeshStyle {
    /// Set the path lift.
    pub fn with_path_lift(mut self, lift: f32) -> Self {
        self.path_lift = lift;
        self
    }

    /// Set the tree lift.
    pub fn with_tree_lift(mut self, lift: f32) -> Self {
        self.tree_lift = lift;
        self
    }

    /// Set the agent lift.
    pub fn with_agent_lift(mut self, lift: f32) -> Self {
        self.agent_lift = lift;
        self
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
