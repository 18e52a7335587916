#![allow(dead_code)]

use pcbclone_board::{Board, Drawing, Footprint, LayerId, NetCode, Side, Track, Zone};
use pcbclone_core::Point;
use pcbclone_layout::CloneConfig;

pub const F_CU: LayerId = LayerId(15);
pub const SILK: LayerId = LayerId(37);

pub fn rect_zone(layer: LayerId, net: NetCode, x0: f64, y0: f64, x1: f64, y1: f64) -> Zone {
    Zone {
        layer,
        net,
        outline: vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ],
        priority: 0,
    }
}

/// 2x2 grid: template cell at (0,0)-(10,10), clones 1..3 parked far away.
pub fn grid_config() -> CloneConfig {
    CloneConfig {
        modulo: 100,
        template_start: 200,
        step_x: [20.0, 0.0],
        step_y: [0.0, 15.0],
        grid_width: 2,
        grid_height: 2,
        marker_layer: LayerId::COMMENTS,
    }
}

/// One LED and its series resistor per sheet, sheets 2..5.
///
/// Sheet `s` has nets `/S{s}/K` and `/S{s}/A`; VCC and GND are shared.
pub fn led_board() -> Board {
    let mut board = Board::default();
    let vcc = board.ensure_net("VCC");
    let gnd = board.ensure_net("GND");

    for sheet in 2..=5u32 {
        let k = board.ensure_net(&format!("/S{sheet}/K"));
        let a = board.ensure_net(&format!("/S{sheet}/A"));
        let (led_pos, res_pos) = if sheet == 2 {
            (Point::new(3.0, 5.0), Point::new(7.0, 5.0))
        } else {
            let park = 200.0 + f64::from(sheet) * 10.0;
            (Point::new(park, 200.0), Point::new(park, 210.0))
        };

        let mut led = Footprint::new(&format!("D{sheet}01"), "LED_SMD:LED_0805", led_pos)
            .with_pad("1", k.0)
            .with_pad("2", a.0);
        let mut res = Footprint::new(&format!("R{sheet}01"), "Resistor_SMD:R_0603", res_pos)
            .with_pad("1", a.0)
            .with_pad("2", vcc.0);
        led.value.text = "RED".to_string();
        res.value.text = "330".to_string();

        if sheet == 2 {
            led.rotation = 90.0;
            led.reference.style.offset = Point::new(0.0, -1.5);
            led.reference.style.height = 0.8;
            led.value.style.visible = false;
        }
        if sheet == 3 {
            led.side = Side::Back;
        }
        board.footprints.push(led);
        board.footprints.push(res);

        // Test point on GND so the shared net takes part in the vote.
        let mut tp = Footprint::new(&format!("TP{sheet}01"), "TestPoint:TP_1mm", led_pos + Point::new(0.0, 2.0))
            .with_pad("1", gnd.0);
        if sheet != 2 {
            tp.position = Point::new(300.0 + f64::from(sheet), 300.0);
        }
        board.footprints.push(tp);
    }

    let s2k = board.ensure_net("/S2/K");
    let s2a = board.ensure_net("/S2/A");

    board
        .zones
        .push(rect_zone(LayerId::COMMENTS, NetCode::UNCONNECTED, 0.0, 0.0, 10.0, 10.0));
    board.zones.push(rect_zone(F_CU, gnd, 1.0, 1.0, 9.0, 3.0));
    board.zones.push(rect_zone(F_CU, s2k, 1.0, 6.0, 4.0, 9.0));
    // Anchored outside the template: not copied.
    board.zones.push(rect_zone(F_CU, gnd, 50.0, 50.0, 60.0, 60.0));

    board.tracks.push(Track::segment(F_CU, s2a.0, Point::new(3.5, 5.0), Point::new(6.5, 5.0), 0.25));
    board.tracks.push(Track::segment(F_CU, vcc.0, Point::new(8.0, 5.0), Point::new(15.0, 5.0), 0.5));
    board.tracks.push(Track::via(gnd.0, Point::new(5.0, 2.0), 0.8, 0.4));
    board.tracks.push(Track::segment(F_CU, vcc.0, Point::new(50.0, 40.0), Point::new(60.0, 40.0), 0.5));

    board.drawings.push(Drawing::line(SILK, Point::new(2.0, 8.0), Point::new(8.0, 8.0), 0.12));
    board.drawings.push(Drawing::line(SILK, Point::new(80.0, 8.0), Point::new(90.0, 8.0), 0.12));

    board
}

pub fn footprint<'a>(board: &'a Board, designator: &str) -> &'a Footprint {
    board
        .footprints
        .iter()
        .find(|fp| fp.designator() == designator)
        .unwrap_or_else(|| panic!("footprint {designator} missing"))
}

pub fn net(board: &Board, name: &str) -> NetCode {
    board
        .nets
        .iter()
        .find(|n| n.name == name)
        .unwrap_or_else(|| panic!("net {name} missing"))
        .code
}
