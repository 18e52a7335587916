use pcbclone_board::{BoardDocument, NetCode};

use crate::{CloneConfig, DiagnosticCode, Diagnostics, EntityRef, NetMap, Template};

/// Net for a copy of an item on `net` in clone `clone_index`.
///
/// Unconnected items stay unconnected. Nets the vote never saw come back unconnected
/// and are reported once per source item.
fn remap_net<D>(
    doc: &D,
    net_map: &NetMap,
    net: NetCode,
    clone_index: u32,
    warned: &mut bool,
    diags: &mut Diagnostics,
    entity: impl FnOnce() -> EntityRef,
) -> NetCode
where
    D: BoardDocument + ?Sized,
{
    if !net.is_connected() {
        return NetCode::UNCONNECTED;
    }
    if let Some(mapped) = net_map.get(net, clone_index) {
        return mapped;
    }
    if !*warned {
        *warned = true;
        diags.warn(
            DiagnosticCode::UnknownNet,
            format!(
                "unknown net {} found in template; copies are left unconnected",
                doc.net_label(net)
            ),
            entity(),
        );
    }
    NetCode::UNCONNECTED
}

/// Copy the zones anchored in the template area into every clone cell.
///
/// The marker zone itself is never copied. Returns the number of zones added.
pub fn replicate_zones<D>(
    doc: &mut D,
    template: &Template,
    net_map: &NetMap,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> usize
where
    D: BoardDocument + ?Sized,
{
    let mut added = 0;
    for (idx, zone) in doc.zones().into_iter().enumerate() {
        if zone.layer == cfg.marker_layer || !doc.zone_anchored_in(&zone, &template.area) {
            continue;
        }
        let mut warned = false;
        for i in cfg.clone_indices() {
            let mut copy = zone.clone();
            copy.translate(cfg.grid_offset(i));
            copy.net = remap_net(&*doc, net_map, zone.net, i, &mut warned, diags, || {
                EntityRef::Zone(idx)
            });
            doc.add_zone(copy);
            added += 1;
        }
    }
    diags.info("zones cloned");
    added
}

/// Copy the tracks touching the template area into every clone cell.
///
/// Copies are gathered first and appended once the scan is done, so no copy is
/// ever taken as a source. Returns the number of tracks added.
pub fn replicate_tracks<D>(
    doc: &mut D,
    template: &Template,
    net_map: &NetMap,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> usize
where
    D: BoardDocument + ?Sized,
{
    let mut copies = Vec::new();
    for (idx, track) in doc.tracks().into_iter().enumerate() {
        if !doc.track_hits(&track, &template.area) {
            continue;
        }
        let mut warned = false;
        for i in cfg.clone_indices() {
            let mut copy = track.clone();
            copy.translate(cfg.grid_offset(i));
            copy.net = remap_net(&*doc, net_map, track.net, i, &mut warned, diags, || {
                EntityRef::Track(idx)
            });
            copies.push(copy);
        }
    }
    let added = copies.len();
    doc.append_tracks(copies);
    diags.info("tracks cloned");
    added
}

/// Copy the drawings touching the template area into every clone cell.
pub fn replicate_drawings<D>(
    doc: &mut D,
    template: &Template,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> usize
where
    D: BoardDocument + ?Sized,
{
    let mut copies = Vec::new();
    for drawing in doc.drawings() {
        if !doc.drawing_hits(&drawing, &template.area) {
            continue;
        }
        for i in cfg.clone_indices() {
            let mut copy = drawing.clone();
            copy.translate(cfg.grid_offset(i));
            copies.push(copy);
        }
    }
    let added = copies.len();
    doc.append_drawings(copies);
    diags.info("drawings cloned");
    added
}
