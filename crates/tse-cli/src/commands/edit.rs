use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, Timelike};
use serde_json::json;
use tse_core::{BeaverView, EditSession, EditorConfig, EntityId, FieldPath};
use tse_core::document::{stamp_export, write};
use tse_mesh::AGENT_TEMPLATES;

pub struct EditArgs<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub needs: &'a [String],
    pub output: Option<&'a Path>,
}

pub fn run(save: &Path, config: &EditorConfig, args: &EditArgs<'_>) -> Result<(), String> {
    if args.name.is_none() && args.needs.is_empty() {
        return Err("nothing to edit: pass --name or --need".into());
    }
    let super::Loaded { document, model } = super::load(save, config)?;

    let id = EntityId::from(args.id);
    let mut session = EditSession::open(model);
    session.select(&id).map_err(|e| e.to_string())?;

    let beaver = session
        .working()
        .filter(|e| AGENT_TEMPLATES.contains(&e.template_name.as_str()))
        .ok_or_else(|| format!("entity {id} is not a beaver"))
        .and_then(|e| BeaverView::read(e).map_err(|e| e.to_string()))?;

    if let Some(name) = args.name {
        session
            .set_field(FieldPath::BeaverName, json!(name))
            .map_err(|e| e.to_string())?;
    }
    for raw in args.needs {
        let (need, points) = parse_need(raw)?;
        let slot = beaver
            .need_index(need)
            .ok_or_else(|| format!("{} has no need \"{need}\"", beaver.name))?;
        session
            .set_field(FieldPath::NeedPoints(slot), json!(points))
            .map_err(|e| e.to_string())?;
    }

    let outcome = session.commit_working().map_err(|e| e.to_string())?;
    tracing::debug!(%id, ?outcome, "committed edit");
    let model = session.close();

    let mut exported = write(&document, &model).map_err(|e| e.to_string())?;
    stamp_export(&mut exported);

    let path = match args.output {
        Some(path) => path.to_path_buf(),
        None => default_output(save, Local::now().naive_local()),
    };
    let text = serde_json::to_string(&exported).map_err(|e| format!("JSON serialization error: {e}"))?;
    std::fs::write(&path, text).map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
    println!("  Saved {}", path.display());

    Ok(())
}

fn parse_need(raw: &str) -> Result<(&str, f64), String> {
    let (name, points) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=POINTS, got \"{raw}\""))?;
    let points: f64 = points
        .trim()
        .parse()
        .map_err(|_| format!("need points must be a number, got \"{points}\""))?;
    Ok((name.trim(), points))
}

/// `"<stem> MODDED <YYYY-MM-DD> <H>h<M>m.json"` beside the input.
fn default_output(save: &Path, now: NaiveDateTime) -> PathBuf {
    let stem = save
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "save".into());
    let name = format!(
        "{stem} MODDED {} {}h{}m.json",
        now.format("%Y-%m-%d"),
        now.hour(),
        now.minute()
    );
    save.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn default_output_name() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .unwrap();
        let path = default_output(Path::new("saves/Colony.json"), now);
        assert_eq!(path, Path::new("saves/Colony MODDED 2024-03-07 9h5m.json"));
    }

    #[test]
    fn parse_need_argument() {
        assert_eq!(parse_need("Hunger=0.25").unwrap(), ("Hunger", 0.25));
        assert_eq!(parse_need(" Thirst = 1 ").unwrap(), ("Thirst", 1.0));
        assert!(parse_need("Hunger").is_err());
        assert!(parse_need("Hunger=lots").is_err());
    }
}
