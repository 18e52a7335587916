use pcbclone_board::{BoardError, LayerId};
use thiserror::Error;

use crate::{ConfigError, DiagnosticCode};

/// Conditions that stop a cloning run.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("designator \"{0}\" is not letters followed by digits")]
    InvalidDesignator(String),

    #[error("no zone on marker layer {layer}; draw one around the template")]
    MissingMarkerZone { layer: LayerId },

    #[error("found {count} zones on marker layer {layer}; exactly one must bound the template")]
    MultipleMarkerZones { layer: LayerId, count: usize },

    #[error("the marker zone on layer {layer} has no outline")]
    EmptyMarkerZone { layer: LayerId },

    #[error("clone footprint {designator} is not placed on the board")]
    MissingClone { designator: String },

    #[error("clone {clone} uses footprint {found}, but template {template} uses {expected}")]
    FootprintMismatch {
        template: String,
        clone: String,
        expected: String,
        found: String,
    },

    #[error("pads of clone {clone} do not line up with template {template}: {detail}")]
    PadMismatch {
        template: String,
        clone: String,
        detail: String,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl CloneError {
    #[must_use]
    pub fn code(&self) -> DiagnosticCode {
        match self {
            CloneError::Config(_) => DiagnosticCode::InvalidConfig,
            CloneError::InvalidDesignator(_) => DiagnosticCode::InvalidDesignator,
            CloneError::MissingMarkerZone { .. } | CloneError::EmptyMarkerZone { .. } => {
                DiagnosticCode::MissingMarkerZone
            }
            CloneError::MultipleMarkerZones { .. } => DiagnosticCode::MultipleMarkerZones,
            CloneError::MissingClone { .. } => DiagnosticCode::MissingClone,
            CloneError::FootprintMismatch { .. } => DiagnosticCode::FootprintMismatch,
            CloneError::PadMismatch { .. } => DiagnosticCode::PadMismatch,
            CloneError::Board(_) => DiagnosticCode::Document,
        }
    }
}
