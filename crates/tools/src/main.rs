use std::env;
use std::fs;
use std::path::PathBuf;

use formats::load_model_from_path;
use serde::Serialize;
use viewport::MapEngine;
use viewport::config::ViewportConfig;
use viewport::snapshot::RenderSnapshot;

const DEMO_FLEET: &str = include_str!("../assets/demo_fleet.json");

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "validate" => cmd_validate(args),
        "snapshot" => cmd_snapshot(args),
        "demo" => cmd_demo(args),
        _ => Err(usage()),
    }
}

#[derive(Serialize)]
struct ValidateReport {
    manifest: PathBuf,
    sites: usize,
    assets: usize,
    routes: usize,
}

fn cmd_validate(args: Vec<String>) -> Result<(), String> {
    // fieldmap validate <manifest.json>
    let [path] = args.as_slice() else {
        return Err(usage());
    };
    let path = PathBuf::from(path);
    let model = load_model_from_path(&path).map_err(|e| e.to_string())?;

    let report = ValidateReport {
        manifest: path,
        sites: model
            .entities()
            .iter()
            .filter(|e| matches!(e, scene::entity::Entity::Site(_)))
            .count(),
        assets: model
            .entities()
            .iter()
            .filter(|e| matches!(e, scene::entity::Entity::Asset(_)))
            .count(),
        routes: model.routes().len(),
    };
    let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn cmd_snapshot(args: Vec<String>) -> Result<(), String> {
    // fieldmap snapshot <manifest.json> [--zoom-in N] [--zoom-out N]
    //   [--pan DX,DY] [--screen WxH] [--toggle LAYER] [--select ID]
    if args.is_empty() {
        return Err(usage());
    }

    let path = PathBuf::from(&args[0]);
    let model = load_model_from_path(&path).map_err(|e| e.to_string())?;

    let mut engine = MapEngine::new(ViewportConfig::default());
    let mut screen = [800.0, 600.0];

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = args
            .get(i)
            .ok_or_else(|| format!("{flag} requires a value"))?
            .clone();
        i += 1;

        match flag {
            "--zoom-in" => {
                for _ in 0..parse_count(&value)? {
                    engine.wheel(-1.0);
                }
            }
            "--zoom-out" => {
                for _ in 0..parse_count(&value)? {
                    engine.wheel(1.0);
                }
            }
            "--pan" => {
                let (dx, dy) = parse_pan(&value)?;
                apply_pan(&mut engine, screen, dx, dy);
            }
            "--screen" => {
                screen = parse_screen(&value)?;
            }
            "--toggle" => {
                engine.toggle_layer(&value);
            }
            "--select" => {
                let id = scene::entity::EntityId::new(value.as_str());
                if !model.contains(&id) {
                    return Err(format!("unknown entity id: {value}"));
                }
                engine.select(&id, &model);
            }
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
    }

    let snapshot = RenderSnapshot::compose(&engine, &model, screen);
    let payload = serde_json::to_string_pretty(&snapshot).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn cmd_demo(args: Vec<String>) -> Result<(), String> {
    // fieldmap demo <out.json>
    let [out_path] = args.as_slice() else {
        return Err(usage());
    };
    let out_path = PathBuf::from(out_path);
    if out_path.exists() {
        return Err(format!("output already exists: {out_path:?}"));
    }
    fs::write(&out_path, DEMO_FLEET).map_err(|e| format!("write {out_path:?}: {e}"))?;
    println!("wrote demo fleet to {}", out_path.display());
    Ok(())
}

/// Drives the pan through the pointer pipeline so the snapshot reflects a
/// real gesture rather than a state poke. The gesture is cancelled rather
/// than released, so a sub-threshold pan never turns into a click.
fn apply_pan(engine: &mut MapEngine, screen: [f64; 2], dx: f64, dy: f64) {
    let start = [screen[0] / 2.0, screen[1] / 2.0];
    engine.pointer_down(start);
    engine.pointer_move([start[0] + dx, start[1] + dy]);
    engine.pointer_cancel();
}

fn parse_count(value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("expected a tick count, got {value:?}"))
}

fn parse_pan(value: &str) -> Result<(f64, f64), String> {
    let Some((dx, dy)) = value.split_once(',') else {
        return Err(format!("expected DX,DY, got {value:?}"));
    };
    let dx = dx
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("bad pan dx: {dx:?}"))?;
    let dy = dy
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("bad pan dy: {dy:?}"))?;
    Ok((dx, dy))
}

fn parse_screen(value: &str) -> Result<[f64; 2], String> {
    let Some((w, h)) = value.split_once('x') else {
        return Err(format!("expected WxH, got {value:?}"));
    };
    let w = w
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("bad screen width: {w:?}"))?;
    let h = h
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("bad screen height: {h:?}"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("screen size must be positive, got {value:?}"));
    }
    Ok([w, h])
}

fn usage() -> String {
    [
        "fieldmap - fleet map engine tooling",
        "",
        "usage:",
        "  fieldmap validate <manifest.json>",
        "  fieldmap snapshot <manifest.json> [--zoom-in N] [--zoom-out N]",
        "      [--pan DX,DY] [--screen WxH] [--toggle LAYER] [--select ID]",
        "  fieldmap demo <out.json>",
    ]
    .join("\n")
}
