use pcbclone_core::{BoundingBox, Point};

use crate::{BoardError, Drawing, Footprint, NetCode, TextStyle, Track, Zone};

/// Access to a host-owned board.
///
/// Queries return snapshots so the cloner never holds borrows into the host while it
/// mutates. Hit tests have geometric defaults; a host with its own hit testing can
/// override them.
pub trait BoardDocument {
    fn footprints(&self) -> Vec<Footprint>;

    fn find_footprint(&self, designator: &str) -> Option<Footprint>;

    fn zones(&self) -> Vec<Zone>;

    fn tracks(&self) -> Vec<Track>;

    fn drawings(&self) -> Vec<Drawing>;

    fn net_name(&self, net: NetCode) -> Option<String>;

    /// Net name for messages; unnamed or unknown nets show as `<net N>`.
    fn net_label(&self, net: NetCode) -> String {
        self.net_name(net)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("<net {net}>"))
    }

    fn zone_anchored_in(&self, zone: &Zone, area: &BoundingBox) -> bool {
        zone.anchor().is_some_and(|p| area.contains(p))
    }

    fn track_hits(&self, track: &Track, area: &BoundingBox) -> bool {
        track.hit_test(area)
    }

    fn drawing_hits(&self, drawing: &Drawing, area: &BoundingBox) -> bool {
        drawing.hit_test(area)
    }

    /// Move the footprint to the other board side, mirroring about `pivot`.
    fn flip_footprint(&mut self, designator: &str, pivot: Point) -> Result<(), BoardError>;

    fn place_footprint(
        &mut self,
        designator: &str,
        position: Point,
        rotation: f64,
    ) -> Result<(), BoardError>;

    /// Restyle the reference and value labels. Label text is left alone.
    fn restyle_labels(
        &mut self,
        designator: &str,
        reference: &TextStyle,
        value: &TextStyle,
    ) -> Result<(), BoardError>;

    fn add_zone(&mut self, zone: Zone);

    fn append_tracks(&mut self, tracks: Vec<Track>);

    fn append_drawings(&mut self, drawings: Vec<Drawing>);
}
