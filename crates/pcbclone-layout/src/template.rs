use pcbclone_board::{BoardDocument, Footprint, LayerId};
use pcbclone_core::BoundingBox;
use serde::Serialize;

use crate::{CloneConfig, CloneError, DiagnosticCode, Diagnostics, Designator, EntityRef};

/// A footprint inside the marker zone, to be mirrored by its clones.
#[derive(Debug, Clone)]
pub struct TemplateMember {
    pub designator: Designator,
    pub footprint: Footprint,
}

#[derive(Debug, Clone)]
pub struct Template {
    pub area: BoundingBox,
    pub members: Vec<TemplateMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemplateArea {
    pub origin: [f64; 2],
    pub width: f64,
    pub height: f64,
}

impl From<BoundingBox> for TemplateArea {
    fn from(bb: BoundingBox) -> Self {
        Self {
            origin: bb.origin().into(),
            width: bb.width(),
            height: bb.height(),
        }
    }
}

/// Bounding box of the one zone on `marker_layer`.
pub fn locate_template_area<D>(doc: &D, marker_layer: LayerId) -> Result<BoundingBox, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let markers: Vec<_> = doc
        .zones()
        .into_iter()
        .filter(|z| z.layer == marker_layer)
        .collect();
    match markers.as_slice() {
        [] => Err(CloneError::MissingMarkerZone {
            layer: marker_layer,
        }),
        [zone] => zone
            .bounding_box()
            .ok_or(CloneError::EmptyMarkerZone {
                layer: marker_layer,
            }),
        _ => Err(CloneError::MultipleMarkerZones {
            layer: marker_layer,
            count: markers.len(),
        }),
    }
}

/// Locate the template area and collect the footprints inside it.
///
/// Every designator on the board must parse. Footprints of the template sheet lying
/// outside the area are reported; footprints inside the area from other sheets are
/// reported and still cloned.
pub fn collect_template<D>(
    doc: &D,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> Result<Template, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let area = locate_template_area(doc, cfg.marker_layer)?;
    diags.info(format!(
        "template area origin ({:.3}, {:.3}) width {:.3} height {:.3}",
        area.min.x,
        area.min.y,
        area.width(),
        area.height()
    ));

    let range = cfg.template_range();
    let mut members = Vec::new();
    for footprint in doc.footprints() {
        let designator = Designator::parse(footprint.designator())?;
        let in_range = range.contains(&designator.index);
        if !area.contains(footprint.position) {
            if in_range {
                diags.warn(
                    DiagnosticCode::OutsideTemplateArea,
                    format!("footprint {designator} is in the template range but outside the template area"),
                    EntityRef::Footprint(designator.to_string()),
                );
            }
            continue;
        }
        if !in_range {
            diags.error(
                DiagnosticCode::UnexpectedInTemplate,
                format!(
                    "unexpected footprint {designator} in the template area (expected indices {}..{})",
                    range.start, range.end
                ),
                EntityRef::Footprint(designator.to_string()),
            );
        }
        members.push(TemplateMember {
            designator,
            footprint,
        });
    }
    tracing::debug!(members = members.len(), "collected template footprints");

    Ok(Template { area, members })
}
