use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use serde_json::json;
use tse_core::EditorConfig;
use tse_mesh::{BatchCache, MeshStyle, SceneTransform, agent_meshes};

pub fn run(save: &Path, config: &EditorConfig, output: Option<&Path>) -> Result<(), String> {
    let loaded = super::load(save, config)?;
    let model = &loaded.model;

    let mut cache = BatchCache::new(MeshStyle::default());
    let batches = cache.all(model);
    let agents = agent_meshes(&model.index, None, None, cache.style());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Batch", "Color", "Vertices", "Triangles"]);
    for (category, batch) in &batches {
        table.add_row(vec![
            category.to_string(),
            batch.material.color.to_string(),
            batch.vertex_count().to_string(),
            batch.triangle_count().to_string(),
        ]);
    }
    let agent_vertices: usize = agents.iter().map(|a| a.geometry.vertex_count()).sum();
    let agent_triangles: usize = agents.iter().map(|a| a.geometry.triangle_count()).sum();
    table.add_row(vec![
        format!("beavers ({})", agents.len()),
        cache.style().palette.agent_idle.color.to_string(),
        agent_vertices.to_string(),
        agent_triangles.to_string(),
    ]);

    println!("{table}");
    println!();
    println!("  {} batches built", cache.rebuilds());

    if let Some(path) = output {
        let transform = SceneTransform::for_grid(&model.grid, model.row_axis);
        let batches: serde_json::Map<String, serde_json::Value> = batches
            .iter()
            .map(|(category, batch)| {
                serde_json::to_value(batch.as_ref()).map(|value| (category.to_string(), value))
            })
            .collect::<Result<_, _>>()
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        let agents: Vec<serde_json::Value> = agents
            .iter()
            .map(|agent| {
                json!({
                    "id": agent.id,
                    "material": agent.material,
                    "geometry": agent.geometry,
                })
            })
            .collect();
        let dump = json!({
            "scene": { "scale": transform.scale, "offset": transform.offset },
            "batches": batches,
            "agents": agents,
        });
        let text = serde_json::to_string_pretty(&dump)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        std::fs::write(path, text).map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Wrote {}", path.display());
    }

    Ok(())
}
