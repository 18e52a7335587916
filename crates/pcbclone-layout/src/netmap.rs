use std::collections::BTreeMap;

use indexmap::IndexMap;
use pcbclone_board::{BoardDocument, Footprint, NetCode};
use serde::Serialize;

use crate::{
    CloneConfig, CloneError, DiagnosticCode, Diagnostics, EntityRef, Template, TemplateMember,
};

/// Template net -> clone net, per clone index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetMap {
    cells: usize,
    map: IndexMap<NetCode, Vec<Option<NetCode>>>,
}

impl NetMap {
    fn new(cells: u32) -> Self {
        Self {
            cells: cells as usize,
            map: IndexMap::new(),
        }
    }

    fn insert(&mut self, template: NetCode, clone_index: u32, clone: NetCode) {
        let cells = self.cells;
        let slots = self.map.entry(template).or_insert_with(|| vec![None; cells]);
        slots[clone_index as usize] = Some(clone);
    }

    /// Net that `template` maps to in clone `clone_index`.
    #[must_use]
    pub fn get(&self, template: NetCode, clone_index: u32) -> Option<NetCode> {
        self.map
            .get(&template)
            .and_then(|slots| slots.get(clone_index as usize).copied().flatten())
    }

    #[must_use]
    pub fn contains(&self, template: NetCode) -> bool {
        self.map.contains_key(&template)
    }

    /// Template nets in the order they were first seen, with their per-clone targets.
    pub fn entries(&self) -> impl Iterator<Item = (NetCode, &[Option<NetCode>])> {
        self.map.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Vote counts for one clone: template net -> (clone net -> votes).
#[derive(Debug, Default)]
pub(crate) struct NetVotes {
    votes: IndexMap<NetCode, BTreeMap<NetCode, usize>>,
}

impl NetVotes {
    pub(crate) fn cast(&mut self, template: NetCode, clone: NetCode) {
        *self
            .votes
            .entry(template)
            .or_default()
            .entry(clone)
            .or_insert(0) += 1;
    }

    /// Winning clone net per template net, with all candidates and their counts.
    ///
    /// Ties go to the lowest clone net code.
    pub(crate) fn tally(
        &self,
    ) -> impl Iterator<Item = (NetCode, NetCode, &BTreeMap<NetCode, usize>)> {
        self.votes.iter().filter_map(|(template, candidates)| {
            let mut best: Option<(NetCode, usize)> = None;
            for (&code, &count) in candidates {
                if best.map_or(true, |(_, c)| count > c) {
                    best = Some((code, count));
                }
            }
            best.map(|(winner, _)| (*template, winner, candidates))
        })
    }
}

/// Look up the clone of `member` for clone `clone_index` and check it matches.
pub(crate) fn find_clone<D>(
    doc: &D,
    member: &TemplateMember,
    cfg: &CloneConfig,
    clone_index: u32,
) -> Result<Footprint, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let designator = member.designator.offset(clone_index * cfg.modulo).to_string();
    let clone = doc
        .find_footprint(&designator)
        .ok_or_else(|| CloneError::MissingClone {
            designator: designator.clone(),
        })?;
    if clone.fpid != member.footprint.fpid {
        return Err(CloneError::FootprintMismatch {
            template: member.designator.to_string(),
            clone: designator,
            expected: member.footprint.fpid.clone(),
            found: clone.fpid,
        });
    }
    Ok(clone)
}

fn vote_pads(
    votes: &mut NetVotes,
    member: &TemplateMember,
    clone: &Footprint,
) -> Result<(), CloneError> {
    let mismatch = |detail: String| CloneError::PadMismatch {
        template: member.designator.to_string(),
        clone: clone.designator().to_string(),
        detail,
    };
    let template_pads = &member.footprint.pads;
    if template_pads.len() != clone.pads.len() {
        return Err(mismatch(format!(
            "{} pads against {}",
            template_pads.len(),
            clone.pads.len()
        )));
    }
    for (t, c) in template_pads.iter().zip(&clone.pads) {
        if t.name != c.name {
            return Err(mismatch(format!("pad \"{}\" faces pad \"{}\"", t.name, c.name)));
        }
        votes.cast(t.net, c.net);
    }
    Ok(())
}

/// Match every template footprint to its clones and vote out the net mapping.
///
/// Fails on the first clone that is missing or whose footprint or pads disagree with
/// the template, before anything on the board is touched.
pub fn build_net_map<D>(
    doc: &D,
    template: &Template,
    cfg: &CloneConfig,
    diags: &mut Diagnostics,
) -> Result<NetMap, CloneError>
where
    D: BoardDocument + ?Sized,
{
    let mut net_map = NetMap::new(cfg.cell_count());
    for i in cfg.clone_indices() {
        let mut votes = NetVotes::default();
        for member in &template.members {
            let clone = find_clone(doc, member, cfg, i)?;
            vote_pads(&mut votes, member, &clone)?;
        }

        for (template_net, winner, candidates) in votes.tally() {
            if candidates.len() > 1 {
                let mut message = format!(
                    "non-unanimous net association: {} (clone {i})",
                    doc.net_label(template_net)
                );
                for (code, count) in candidates {
                    message.push_str(&format!("\n{count:>8}: {}", doc.net_label(*code)));
                }
                diags.warn(
                    DiagnosticCode::NonUnanimousNet,
                    message,
                    EntityRef::Net(template_net),
                );
            }
            net_map.insert(template_net, i, winner);
        }
    }
    tracing::debug!(nets = net_map.len(), "built net map");
    Ok(net_map)
}
