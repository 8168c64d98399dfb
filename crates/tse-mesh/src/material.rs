use std::fmt;

use serde::Serialize;

/// A 24-bit RGB colour, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub struct Color(pub u32);

impl Color {
    /// Channels as `[r, g, b]` in `0.0..=1.0`.
    pub fn rgb(self) -> [f32; 3] {
        let channel = |shift: u32| ((self.0 >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFF_FFFF)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// The shading a batch is drawn with. One per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Material {
    /// Diffuse colour.
    pub color: Color,
}

impl Material {
    /// Flat material of one colour.
    pub const fn solid(color: u32) -> Self {
        Self {
            color: Color(color),
        }
    }
}

/// Colours used for each kind of geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Terrain columns with moisture.
    pub wet_land: Material,
    /// Terrain columns without moisture.
    pub dry_land: Material,
    /// Water surfaces.
    pub water: Material,
    /// Healthy trees.
    pub green_tree: Material,
    /// Dry or dead trees.
    pub brown_tree: Material,
    /// Path tiles.
    pub path: Material,
    /// Beavers at rest.
    pub agent_idle: Material,
    /// Beaver under the pointer.
    pub agent_hovered: Material,
    /// Selected beaver.
    pub agent_selected: Material,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wet_land: Material::solid(0x8BC34A),
            dry_land: Material::solid(0x795548),
            water: Material::solid(0x0044CC),
            green_tree: Material::solid(0x388E3C),
            brown_tree: Material::solid(0x5D4037),
            path: Material::solid(0xBCAAA4),
            agent_idle: Material::solid(0xE64A19),
            agent_hovered: Material::solid(0xFF8A65),
            agent_selected: Material::solid(0x651FFF),
        }
    }
}
