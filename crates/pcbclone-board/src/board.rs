use std::path::Path;

use pcbclone_core::{normalize_angle, Point};
use serde::{Deserialize, Serialize};

use crate::{BoardDocument, BoardError, Drawing, Footprint, Net, NetCode, TextStyle, Track, Zone};

/// In-memory board snapshot, loadable from JSON or YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub nets: Vec<Net>,
    #[serde(default)]
    pub footprints: Vec<Footprint>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub drawings: Vec<Drawing>,
}

impl Board {
    pub fn from_json_str(s: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, BoardError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a board, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let format = Format::from_path(path)?;
        let raw = std::fs::read_to_string(path).map_err(|source| BoardError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let board = match format {
            Format::Json => Self::from_json_str(&raw)?,
            Format::Yaml => Self::from_yaml_str(&raw)?,
        };
        tracing::debug!(
            path = %path.display(),
            footprints = board.footprints.len(),
            zones = board.zones.len(),
            tracks = board.tracks.len(),
            drawings = board.drawings.len(),
            "loaded board"
        );
        Ok(board)
    }

    pub fn save(&self, path: &Path) -> Result<(), BoardError> {
        let out = match Format::from_path(path)? {
            Format::Json => self.to_json_string()?,
            Format::Yaml => serde_yaml::to_string(self)?,
        };
        std::fs::write(path, out).map_err(|source| BoardError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Register a net name, returning its code. Existing names keep their code.
    pub fn ensure_net(&mut self, name: &str) -> NetCode {
        if let Some(net) = self.nets.iter().find(|n| n.name == name) {
            return net.code;
        }
        let code = NetCode(self.nets.iter().map(|n| n.code.0).max().unwrap_or(0) + 1);
        self.nets.push(Net {
            code,
            name: name.to_string(),
        });
        code
    }

    fn footprint_mut(&mut self, designator: &str) -> Result<&mut Footprint, BoardError> {
        self.footprints
            .iter_mut()
            .find(|fp| fp.designator() == designator)
            .ok_or_else(|| BoardError::UnknownFootprint(designator.to_string()))
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, BoardError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(BoardError::UnsupportedFormat(ext)),
        }
    }
}

impl BoardDocument for Board {
    fn footprints(&self) -> Vec<Footprint> {
        self.footprints.clone()
    }

    fn find_footprint(&self, designator: &str) -> Option<Footprint> {
        self.footprints
            .iter()
            .find(|fp| fp.designator() == designator)
            .cloned()
    }

    fn zones(&self) -> Vec<Zone> {
        self.zones.clone()
    }

    fn tracks(&self) -> Vec<Track> {
        self.tracks.clone()
    }

    fn drawings(&self) -> Vec<Drawing> {
        self.drawings.clone()
    }

    fn net_name(&self, net: NetCode) -> Option<String> {
        self.nets
            .iter()
            .find(|n| n.code == net)
            .map(|n| n.name.clone())
    }

    fn flip_footprint(&mut self, designator: &str, pivot: Point) -> Result<(), BoardError> {
        let fp = self.footprint_mut(designator)?;
        fp.side = fp.side.flipped();
        fp.position.mirror_y(pivot.y);
        fp.rotation = normalize_angle(-fp.rotation);
        for label in [&mut fp.reference, &mut fp.value] {
            label.style.offset.mirror_y(0.0);
            label.style.rotation = normalize_angle(-label.style.rotation);
        }
        Ok(())
    }

    fn place_footprint(
        &mut self,
        designator: &str,
        position: Point,
        rotation: f64,
    ) -> Result<(), BoardError> {
        let fp = self.footprint_mut(designator)?;
        fp.position = position;
        fp.rotation = rotation;
        Ok(())
    }

    fn restyle_labels(
        &mut self,
        designator: &str,
        reference: &TextStyle,
        value: &TextStyle,
    ) -> Result<(), BoardError> {
        let fp = self.footprint_mut(designator)?;
        fp.reference.style = *reference;
        fp.value.style = *value;
        Ok(())
    }

    fn add_zone(&mut self, zone: Zone) {
        self.zones.push(zone);
    }

    fn append_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks.extend(tracks);
    }

    fn append_drawings(&mut self, drawings: Vec<Drawing>) {
        self.drawings.extend(drawings);
    }
}
