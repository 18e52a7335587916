mod common;

use common::rect_zone;
use pcbclone_board::{Board, Footprint, LayerId, NetCode};
use pcbclone_core::Point;
use pcbclone_layout::{
    build_net_map, collect_template, CloneConfig, CloneError, DiagnosticCode, Diagnostics,
};

fn pair_config() -> CloneConfig {
    CloneConfig {
        grid_width: 2,
        grid_height: 1,
        ..CloneConfig::default()
    }
}

/// Connector U201 in the template, its clone U301 parked outside.
fn connector_board(clone_nets: [&str; 4]) -> Board {
    let mut board = Board::default();
    let bus = board.ensure_net("/S2/BUS");
    let mut template = Footprint::new("J201", "Connector:Conn_01x04", Point::new(5.0, 5.0));
    for pad in 1..=4 {
        template = template.with_pad(&pad.to_string(), bus.0);
    }
    let mut clone = Footprint::new("J301", "Connector:Conn_01x04", Point::new(100.0, 5.0));
    for (pad, name) in clone_nets.iter().enumerate() {
        let code = board.ensure_net(name);
        clone = clone.with_pad(&(pad + 1).to_string(), code.0);
    }
    board.footprints.push(template);
    board.footprints.push(clone);
    board
        .zones
        .push(rect_zone(LayerId::COMMENTS, NetCode::UNCONNECTED, 0.0, 0.0, 10.0, 10.0));
    board
}

fn map_for(board: &Board) -> (Result<pcbclone_layout::NetMap, CloneError>, Diagnostics) {
    let cfg = pair_config();
    let mut diags = Diagnostics::new();
    let template = collect_template(board, &cfg, &mut diags).unwrap();
    let result = build_net_map(board, &template, &cfg, &mut diags);
    (result, diags)
}

fn code(board: &Board, name: &str) -> NetCode {
    board.nets.iter().find(|n| n.name == name).unwrap().code
}

#[test]
fn unanimous_mapping_logs_nothing() {
    let board = connector_board(["/S3/BUS"; 4]);
    let (map, diags) = map_for(&board);
    let map = map.unwrap();

    assert_eq!(map.get(code(&board, "/S2/BUS"), 1), Some(code(&board, "/S3/BUS")));
    assert_eq!(diags.problems().count(), 0);
}

#[test]
fn majority_wins_with_one_warning() {
    let board = connector_board(["/S3/BUS", "/S3/BUS", "/S3/ID", "/S3/BUS"]);
    let (map, diags) = map_for(&board);
    let map = map.unwrap();

    assert_eq!(map.get(code(&board, "/S2/BUS"), 1), Some(code(&board, "/S3/BUS")));
    let warnings: Vec<_> = diags.with_code(DiagnosticCode::NonUnanimousNet).collect();
    assert_eq!(warnings.len(), 1);
    let message = &warnings[0].message;
    assert!(message.contains("non-unanimous net association: /S2/BUS (clone 1)"));
    assert!(message.contains("       3: /S3/BUS"));
    assert!(message.contains("       1: /S3/ID"));
}

#[test]
fn pad_name_disagreement_aborts() {
    let mut board = connector_board(["/S3/BUS"; 4]);
    board.footprints[1].pads[2].name = "7".to_string();
    let (map, _) = map_for(&board);
    assert!(matches!(map, Err(CloneError::PadMismatch { .. })));
}

#[test]
fn pad_count_disagreement_aborts() {
    let mut board = connector_board(["/S3/BUS"; 4]);
    board.footprints[1].pads.pop();
    let (map, _) = map_for(&board);
    match map {
        Err(CloneError::PadMismatch { detail, .. }) => assert_eq!(detail, "4 pads against 3"),
        other => panic!("unexpected result {other:?}"),
    }
}
