use std::path::Path;
use std::process::Command;

use pcbclone_board::{Board, BoardDocument};

const BOARD: &str = r#"
nets:
  - { code: 1, name: VCC }
  - { code: 2, name: "/S2/K" }
  - { code: 3, name: "/S3/K" }
footprints:
  - fpid: "LED_SMD:LED_0805"
    position: { x: 4.0, y: 5.0 }
    rotation: 90
    pads: [{ name: "1", net: 2 }, { name: "2", net: 1 }]
    reference: { text: D201 }
    value: { text: RED }
  - fpid: "LED_SMD:LED_0805"
    position: { x: 150.0, y: 150.0 }
    pads: [{ name: "1", net: 3 }, { name: "2", net: 1 }]
    reference: { text: D301 }
    value: { text: RED }
zones:
  - layer: 41
    outline: [{ x: 0, y: 0 }, { x: 10, y: 0 }, { x: 10, y: 10 }, { x: 0, y: 10 }]
tracks:
  - { kind: segment, layer: 15, net: 2, start: { x: 2, y: 5 }, end: { x: 4, y: 5 }, width: 0.25 }
"#;

const CONFIG: &str = "grid_width: 2\ngrid_height: 1\nstep_x: [20, 0]\n";

fn write_inputs(dir: &Path) {
    std::fs::write(dir.join("board.yaml"), BOARD).unwrap();
    std::fs::write(dir.join("clone.yaml"), CONFIG).unwrap();
}

#[test]
fn clone_writes_board_and_report() {
    let exe = env!("CARGO_BIN_EXE_pcbclone");
    let temp = tempfile::tempdir().unwrap();
    write_inputs(temp.path());

    let output = Command::new(exe)
        .current_dir(temp.path())
        .args([
            "clone",
            "board.yaml",
            "--config",
            "clone.yaml",
            "--output",
            "out.json",
            "--report",
            "report.json",
        ])
        .output()
        .expect("run pcbclone");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_end().ends_with("Script completed"), "{stdout}");

    let board: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("out.json")).unwrap())
            .unwrap();
    let clone = &board["footprints"][1];
    assert_eq!(clone["reference"]["text"], "D301");
    assert_eq!(clone["position"]["x"], 24.0);
    assert_eq!(clone["position"]["y"], 5.0);
    assert_eq!(clone["rotation"], 90.0);

    let tracks = board["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1]["net"], 3);
    assert_eq!(tracks[1]["start"]["x"], 22.0);

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report["stats"]["tracks"], 1);
    assert_eq!(report["stats"]["moved_footprints"], 1);
}

#[test]
fn flags_override_config_file() {
    let exe = env!("CARGO_BIN_EXE_pcbclone");
    let temp = tempfile::tempdir().unwrap();
    write_inputs(temp.path());

    let status = Command::new(exe)
        .current_dir(temp.path())
        .args([
            "clone",
            "board.yaml",
            "--config",
            "clone.yaml",
            "--step-x",
            "-30,0",
        ])
        .status()
        .expect("run pcbclone");
    assert!(status.success());

    let board = Board::load(&temp.path().join("board.cloned.yaml")).unwrap();
    let clone = board.find_footprint("D301").unwrap();
    assert_eq!(clone.position.x, -26.0);
    assert_eq!(clone.position.y, 5.0);
}

#[test]
fn plan_prints_net_map_without_writing() {
    let exe = env!("CARGO_BIN_EXE_pcbclone");
    let temp = tempfile::tempdir().unwrap();
    write_inputs(temp.path());

    let output = Command::new(exe)
        .current_dir(temp.path())
        .args(["plan", "board.yaml", "--config", "clone.yaml"])
        .output()
        .expect("run pcbclone plan");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Template footprints: D201"), "{stdout}");
    assert!(stdout.contains("Clone 1 at (+20.000, +0.000): D301"), "{stdout}");
    assert!(stdout.contains("/S2/K -> /S3/K"), "{stdout}");
    assert!(!temp.path().join("board.cloned.yaml").exists());
}
