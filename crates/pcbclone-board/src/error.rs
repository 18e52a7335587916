use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("could not read board {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write board {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse board JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse board YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported board file extension \"{0}\" (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("no footprint with designator \"{0}\" on the board")]
    UnknownFootprint(String),
}
