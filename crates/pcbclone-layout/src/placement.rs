use pcbclone_board::BoardDocument;

use crate::netmap::find_clone;
use crate::{CloneConfig, CloneError, Template};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub moved: usize,
    pub flipped: usize,
}

/// Move every clone footprint to its grid cell, mirroring the template's side,
/// rotation and label styling.
///
/// Positions are absolute, so running this twice gives the same board.
pub fn place_clones<D>(
    doc: &mut D,
    template: &Template,
    cfg: &CloneConfig,
) -> Result<PlacementStats, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let mut stats = PlacementStats::default();
    for member in &template.members {
        let source = &member.footprint;
        for i in cfg.clone_indices() {
            let clone = find_clone(doc, member, cfg, i)?;
            let designator = clone.designator();

            if clone.side != source.side {
                doc.flip_footprint(designator, clone.position)?;
                stats.flipped += 1;
            }

            let target = source.position + cfg.grid_offset(i);
            doc.place_footprint(designator, target, source.rotation)?;
            doc.restyle_labels(designator, &source.reference.style, &source.value.style)?;
            stats.moved += 1;
        }
    }
    Ok(stats)
}
