use std::path::{Path, PathBuf};

use pcbclone_board::{Board, BoardDocument, LayerId, NetCode};
use pcbclone_layout::{plan_clone, run_clone as clone_board, CloneConfig, ClonePlan, Diagnostics};

use crate::error::CliError;
use crate::GridArgs;

pub struct CloneArgs {
    pub board: PathBuf,
    pub output: Option<PathBuf>,
    pub in_place: bool,
    pub report: Option<PathBuf>,
    pub grid: GridArgs,
}

pub fn run_clone(args: CloneArgs) -> Result<(), CliError> {
    let cfg = resolve_config(&args.grid)?;
    let output = match (&args.output, args.in_place) {
        (Some(path), _) => path.clone(),
        (None, true) => args.board.clone(),
        (None, false) => default_output(&args.board)?,
    };

    println!("Loading board...");
    let mut board = Board::load(&args.board)?;

    println!("Cloning layout...");
    let mut diags = Diagnostics::new();
    let result = clone_board(&mut board, &cfg, &mut diags);

    if let Some(report_path) = &args.report {
        let stats = result.as_ref().ok();
        let report = serde_json::json!({
            "stats": stats,
            "diagnostics": diags.events(),
        });
        let raw = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::processing(e.to_string()))?;
        std::fs::write(report_path, raw).map_err(|e| {
            CliError::processing(format!(
                "Could not write report {}: {e}",
                report_path.display()
            ))
        })?;
    }

    let stats = result?;
    println!(
        "Moved {} footprints ({} flipped); added {} zones, {} tracks, {} drawings.",
        stats.moved_footprints, stats.flipped_footprints, stats.zones, stats.tracks, stats.drawings
    );
    let problems = diags.problems().count();
    if problems > 0 {
        println!("{problems} warning(s) reported.");
    }

    println!("Writing output to {}...", output.display());
    board.save(&output)?;
    println!("Script completed");
    Ok(())
}

pub fn run_plan(board_path: &Path, json: bool, grid: &GridArgs) -> Result<(), CliError> {
    let cfg = resolve_config(grid)?;
    let board = Board::load(board_path)?;
    let mut diags = Diagnostics::new();
    let plan = plan_clone(&board, &cfg, &mut diags)?;

    if json {
        let raw = serde_json::to_string_pretty(&plan)
            .map_err(|e| CliError::processing(e.to_string()))?;
        println!("{raw}");
    } else {
        print_plan(&board, &plan);
    }
    Ok(())
}

fn resolve_config(args: &GridArgs) -> Result<CloneConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                CliError::input(format!("Could not read config {}: {e}", path.display()))
            })?;
            CloneConfig::from_yaml_str(&raw)?
        }
        None => CloneConfig::default(),
    };
    if let Some(modulo) = args.modulo {
        cfg.modulo = modulo;
    }
    if let Some(start) = args.start {
        cfg.template_start = start;
    }
    if let Some(step) = args.step_x {
        cfg.step_x = step;
    }
    if let Some(step) = args.step_y {
        cfg.step_y = step;
    }
    if let Some((w, h)) = args.grid {
        cfg.grid_width = w;
        cfg.grid_height = h;
    }
    if let Some(layer) = args.marker_layer {
        cfg.marker_layer = LayerId(layer);
    }
    cfg.validate()?;
    tracing::debug!(?cfg, "resolved clone config");
    Ok(cfg)
}

/// `board.json` -> `board.cloned.json`, next to the input.
fn default_output(input: &Path) -> Result<PathBuf, CliError> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CliError::input(format!("Invalid board path {}", input.display())))?;
    let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("json");
    Ok(input.with_file_name(format!("{stem}.cloned.{ext}")))
}

fn target_label(board: &Board, net: Option<NetCode>) -> String {
    match net {
        None => "-".to_string(),
        Some(code) => board.net_label(code),
    }
}

fn print_plan(board: &Board, plan: &ClonePlan) {
    println!(
        "Template area: origin ({:.3}, {:.3}) width {:.3} height {:.3}",
        plan.area.origin[0], plan.area.origin[1], plan.area.width, plan.area.height
    );
    println!("Template footprints: {}", plan.template.join(", "));
    for cell in &plan.clones {
        println!(
            "Clone {} at ({:+.3}, {:+.3}): {}",
            cell.index,
            cell.offset.x,
            cell.offset.y,
            cell.designators.join(", ")
        );
    }
    println!("Net map:");
    for (template, targets) in plan.net_map.entries() {
        let clones: Vec<String> = targets
            .iter()
            .skip(1)
            .map(|t| target_label(board, *t))
            .collect();
        println!(
            "  {} -> {}",
            target_label(board, Some(template)),
            clones.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_keeps_extension() {
        assert_eq!(
            default_output(Path::new("boards/leds.yaml")).unwrap(),
            PathBuf::from("boards/leds.cloned.yaml")
        );
    }

    #[test]
    fn flags_override_config_defaults() {
        let args = GridArgs {
            grid: Some((3, 2)),
            step_y: Some([0.0, 12.0]),
            marker_layer: Some(44),
            ..GridArgs::default()
        };
        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.cell_count(), 6);
        assert_eq!(cfg.step_y, [0.0, 12.0]);
        assert_eq!(cfg.marker_layer, LayerId(44));
        assert_eq!(cfg.modulo, 100);
    }

    #[test]
    fn zero_grid_is_an_input_error() {
        let args = GridArgs {
            grid: Some((0, 2)),
            ..GridArgs::default()
        };
        let err = resolve_config(&args).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Input);
    }
}
