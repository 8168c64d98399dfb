use std::collections::BTreeSet;

/// Templates the editor indexes when no other allow-list is given.
pub const DEFAULT_TEMPLATES: [&str; 6] =
    ["BeaverAdult", "BeaverChild", "Maple", "Pine", "Birch", "DirtPath"];

/// Which map dimension is the length of one row in the flat grid arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowAxis {
    /// Rows run along `Size.X`; cell `i` is at column `i % X`.
    #[default]
    Width,
    /// Rows run along `Size.Y`; cell `i` is at column `i % Y`.
    Height,
}

/// Configuration for reading a save into an editable model.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Templates that are indexed and editable. Everything else passes through.
    pub allowed_templates: BTreeSet<String>,
    /// Row-length convention for the grid arrays.
    pub row_axis: RowAxis,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            allowed_templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
            row_axis: RowAxis::default(),
        }
    }
}

impl EditorConfig {
    /// Replace the allow-list.
    pub fn with_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_templates = templates.into_iter().map(Into::into).collect();
        self
    }

    /// Add one template to the allow-list.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.allowed_templates.insert(template.into());
        self
    }

    /// Set the row-length convention.
    pub fn with_row_axis(mut self, axis: RowAxis) -> Self {
        self.row_axis = axis;
        self
    }

    /// Returns `true` if the template is indexed.
    pub fn allows(&self, template: &str) -> bool {
        self.allowed_templates.contains(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = EditorConfig::default();
        assert_eq!(config.allowed_templates.len(), 6);
        assert!(config.allows("BeaverAdult"));
        assert!(config.allows("DirtPath"));
        assert!(!config.allows("Lodge"));
        assert_eq!(config.row_axis, RowAxis::Width);
    }

    #[test]
    fn config_builder_chain() {
        let config = EditorConfig::default()
            .with_templates(["Pine"])
            .with_template("Oak")
            .with_row_axis(RowAxis::Height);
        assert!(config.allows("Pine"));
        assert!(config.allows("Oak"));
        assert!(!config.allows("Maple"));
        assert_eq!(config.row_axis, RowAxis::Height);
    }
}
