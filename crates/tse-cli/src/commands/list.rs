use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tse_core::{BeaverView, EditorConfig, Entity, PathView, TreeView};

pub fn run(save: &Path, config: &EditorConfig, templates: &[String]) -> Result<(), String> {
    let loaded = super::load(save, config)?;
    let index = &loaded.model.index;

    if let Some(unknown) = templates.iter().find(|t| !index.allows(t)) {
        return Err(format!("template \"{unknown}\" is not editable"));
    }
    let selected: Vec<&str> = if templates.is_empty() {
        config.allowed_templates.iter().map(String::as_str).collect()
    } else {
        templates.iter().map(String::as_str).collect()
    };

    let entities = index.get_by_templates(selected.as_slice());
    if entities.is_empty() {
        println!("  No entities found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Template", "Details"]);
    for entity in &entities {
        table.add_row(vec![
            entity.id.to_string(),
            entity.template_name.clone(),
            details(entity),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} entities", entities.len());

    Ok(())
}

fn details(entity: &Entity) -> String {
    if let Ok(beaver) = BeaverView::read(entity) {
        let p = beaver.position;
        return format!("{} at ({:.1}, {:.1}, {:.1})", beaver.name, p.x, p.y, p.z);
    }
    if let Ok(tree) = TreeView::read(entity) {
        let c = tree.coordinates;
        let state = match (tree.is_adult(), tree.dead, tree.dry) {
            (_, true, _) => "dead",
            (_, _, true) => "dry",
            (true, _, _) => "grown",
            _ => "growing",
        };
        return format!("{state} at ({}, {}, {})", c.x, c.y, c.z);
    }
    if let Ok(path) = PathView::read(entity) {
        let c = path.coordinates;
        return format!("at ({}, {}, {})", c.x, c.y, c.z);
    }
    "-".to_string()
}
