//! Replicate a hand-laid template region of a board across a grid of clones.
//!
//! The template is the set of footprints inside the single zone on the marker layer.
//! Each clone is made of the footprints whose designators follow the template's by a
//! multiple of the configured modulo (`D201` -> `D301`, `D401`, ...). A run
//!
//! 1. locates the template and parses every designator,
//! 2. matches clones to the template and votes out a template-net -> clone-net map,
//! 3. moves the clone footprints into their grid cells,
//! 4. copies the template's zones, tracks and drawings into every cell.
//!
//! Steps 1 and 2 only read the board, so every fatal matching problem surfaces before
//! anything is changed. Later failures leave earlier edits in place.

mod config;
mod designator;
mod diagnostics;
mod error;
mod netmap;
mod placement;
mod replicate;
mod template;

use pcbclone_board::BoardDocument;
use pcbclone_core::Point;
use serde::Serialize;

pub use config::{CloneConfig, ConfigError};
pub use designator::Designator;
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, EntityRef, Severity};
pub use error::CloneError;
pub use netmap::{build_net_map, NetMap};
pub use placement::{place_clones, PlacementStats};
pub use replicate::{replicate_drawings, replicate_tracks, replicate_zones};
pub use template::{collect_template, locate_template_area, Template, TemplateArea, TemplateMember};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloneStats {
    pub clones: u32,
    pub template_footprints: usize,
    pub moved_footprints: usize,
    pub flipped_footprints: usize,
    pub zones: usize,
    pub tracks: usize,
    pub drawings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloneReport {
    pub stats: CloneStats,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloneCell {
    pub index: u32,
    pub offset: Point,
    pub designators: Vec<String>,
}

/// What a run would do, computed without touching the board.
#[derive(Debug, Clone, Serialize)]
pub struct ClonePlan {
    pub area: TemplateArea,
    pub template: Vec<String>,
    pub clones: Vec<CloneCell>,
    pub net_map: NetMap,
}

/// Clone the template across the grid, collecting diagnostics.
///
/// On failure the aborting condition is recorded as a fatal diagnostic too.
pub fn clone_layout<D>(doc: &mut D, cfg: &CloneConfig) -> Result<CloneReport, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let mut diags = Diagnostics::new();
    let stats = run_clone(doc, cfg, &mut diags)?;
    Ok(CloneReport {
        stats,
        diagnostics: diags.into_events(),
    })
}

/// Like [`clone_layout`], but diagnostics land in `diags` and survive a failure.
pub fn run_clone<D>(
    doc: &mut D,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> Result<CloneStats, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let result = clone_phases(doc, cfg, diags);
    if let Err(err) = &result {
        diags.fatal(err);
    }
    result
}

fn clone_phases<D>(
    doc: &mut D,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> Result<CloneStats, CloneError>
where
    D: BoardDocument + ?Sized,
{
    cfg.validate()?;
    let template = collect_template(&*doc, cfg, diags)?;
    let net_map = build_net_map(&*doc, &template, cfg, diags)?;

    let placed = place_clones(doc, &template, cfg)?;
    diags.info("footprints and footprint text moved and oriented according to template");

    let zones = replicate_zones(doc, &template, &net_map, cfg, diags);
    let tracks = replicate_tracks(doc, &template, &net_map, cfg, diags);
    let drawings = replicate_drawings(doc, &template, cfg, diags);

    let stats = CloneStats {
        clones: cfg.cell_count() - 1,
        template_footprints: template.members.len(),
        moved_footprints: placed.moved,
        flipped_footprints: placed.flipped,
        zones,
        tracks,
        drawings,
    };
    tracing::debug!(?stats, "clone finished");
    Ok(stats)
}

/// Locate the template and build the net map without changing the board.
pub fn plan_clone<D>(
    doc: &D,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> Result<ClonePlan, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let result = plan_phases(doc, cfg, diags);
    if let Err(err) = &result {
        diags.fatal(err);
    }
    result
}

fn plan_phases<D>(
    doc: &D,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> Result<ClonePlan, CloneError>
where
    D: BoardDocument + ?Sized,
{
    cfg.validate()?;
    let template = collect_template(doc, cfg, diags)?;
    let net_map = build_net_map(doc, &template, cfg, diags)?;

    let clones = cfg
        .clone_indices()
        .map(|i| CloneCell {
            index: i,
            offset: cfg.grid_offset(i),
            designators: template
                .members
                .iter()
                .map(|m| m.designator.offset(i * cfg.modulo).to_string())
                .collect(),
        })
        .collect();

    Ok(ClonePlan {
        area: template.area.into(),
        template: template
            .members
            .iter()
            .map(|m| m.designator.to_string())
            .collect(),
        clones,
        net_map,
    })
}
