use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tse_core::EditorConfig;

pub fn run(save: &Path, config: &EditorConfig) -> Result<(), String> {
    let super::Loaded { document, model } = super::load(save, config)?;

    let version = document
        .get("GameVersion")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    println!("  {} [{}]", save.display().to_string().bold(), version.dimmed());
    println!();
    println!(
        "  map {}x{} ({} cells)",
        model.grid.width,
        model.grid.height,
        model.grid.cell_count()
    );

    let flooded = model.grid.water_depth_map.iter().filter(|d| **d > 0.0).count();
    let wet = model.grid.moisture_map.iter().filter(|m| **m > 0.0).count();
    println!("  {wet} moist cells, {flooded} flooded cells");
    println!();

    let counts = model.index.counts_by_template();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Template", "Count"]);
    for template in &config.allowed_templates {
        let count = counts.get(template.as_str()).copied().unwrap_or(0);
        table.add_row(vec![template.clone(), count.to_string()]);
    }
    println!("{table}");
    println!();
    println!("  {} editable entities", model.index.len());

    Ok(())
}
