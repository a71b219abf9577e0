use sheet_core::geometry::{NoMeasurements, sample_bounds};
use sheet_core::{
    EngineConfig, Sheet, find_touching_edges, lint_sheet, resolve_corners,
};
use std::env;
use std::fs;

/// Print the touching edges, corner state and lint findings of a sheet export.
///
/// Usage: `cargo run -p sheet-core --example touch_report -- sheet.json [config.json]`
fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(sheet_path) = args.get(1) else {
        eprintln!("usage: touch_report <sheet.json> [config.json]");
        std::process::exit(2);
    };

    let config = match args.get(2) {
        Some(path) => match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| EngineConfig::from_json(&s))
        {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let sheet = match fs::read_to_string(sheet_path)
        .map_err(|e| e.to_string())
        .and_then(|s| Sheet::from_json(&s))
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{sheet_path}: {e}");
            std::process::exit(1);
        }
    };

    let bounds = sample_bounds(&sheet, &NoMeasurements, 1.0);
    if bounds.len() < sheet.len() {
        log::warn!(
            "{} widgets have no owned size and were skipped",
            sheet.len() - bounds.len()
        );
    }

    let edges = find_touching_edges(&bounds, &config.touch);
    println!("{} widgets, {} touching edges", bounds.len(), edges.len());
    for edge in &edges {
        println!(
            "  {} ↔ {}  {:?} at ({}, {}){}",
            edge.widget1,
            edge.widget2,
            edge.orientation,
            edge.x,
            edge.y,
            if edge.is_attached { "  [attached]" } else { "" }
        );
    }

    let corners = resolve_corners(&bounds, &config.touch);
    for b in &bounds {
        if let Some(c) = corners.get(&b.id).filter(|c| c.any()) {
            println!("  {} square corners: {c:?}", b.id);
        }
    }

    for diag in lint_sheet(&sheet, &bounds, &config.touch) {
        println!("  {:?} [{}] {}", diag.severity, diag.rule, diag.message);
    }
}
