use std::ops::Range;

use pcbclone_board::LayerId;
use pcbclone_core::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse clone config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value for \"{field}\": {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Settings for one cloning run.
///
/// Clones are numbered row-major: clone `i` sits in column `i % grid_width` and row
/// `i / grid_width`, and its footprints carry the template's designator index plus
/// `i * modulo`. Clone 0 is the template itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneConfig {
    /// Designator spacing between consecutive sheets, e.g. 100 for D201, D301, ...
    pub modulo: u32,
    /// First designator index of the template sheet.
    pub template_start: u32,
    /// Displacement between neighbouring columns, in mm.
    pub step_x: [f64; 2],
    /// Displacement between neighbouring rows, in mm.
    pub step_y: [f64; 2],
    pub grid_width: u32,
    pub grid_height: u32,
    /// Layer holding the single zone that bounds the template.
    pub marker_layer: LayerId,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            modulo: 100,
            template_start: 200,
            step_x: [20.0, 0.0],
            step_y: [0.0, 0.0],
            grid_width: 4,
            grid_height: 1,
            marker_layer: LayerId::COMMENTS,
        }
    }
}

impl CloneConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modulo == 0 {
            return Err(invalid("modulo", "must be greater than zero"));
        }
        if self.grid_width == 0 {
            return Err(invalid("grid_width", "must be greater than zero"));
        }
        if self.grid_height == 0 {
            return Err(invalid("grid_height", "must be greater than zero"));
        }
        let cells = self
            .grid_width
            .checked_mul(self.grid_height)
            .ok_or_else(|| invalid("grid_width", "grid has too many cells"))?;
        let last = u64::from(self.template_start)
            + u64::from(self.modulo) * u64::from(cells);
        if last > u64::from(u32::MAX) {
            return Err(invalid(
                "modulo",
                "designator indices of the last clone overflow",
            ));
        }
        for (field, v) in [("step_x", self.step_x), ("step_y", self.step_y)] {
            if !v.iter().all(|c| c.is_finite()) {
                return Err(invalid(field, "components must be finite"));
            }
        }
        Ok(())
    }

    /// Number of grid cells, template included.
    #[must_use]
    pub fn cell_count(&self) -> u32 {
        self.grid_width * self.grid_height
    }

    /// Indices of the clones to produce, template excluded.
    #[must_use]
    pub fn clone_indices(&self) -> Range<u32> {
        1..self.cell_count()
    }

    /// Designator indices that belong to the template sheet.
    #[must_use]
    pub fn template_range(&self) -> Range<u32> {
        self.template_start..self.template_start + self.modulo
    }

    /// Displacement of clone `index` relative to the template.
    #[must_use]
    pub fn grid_offset(&self, index: u32) -> Point {
        let col = f64::from(index % self.grid_width);
        let row = f64::from(index / self.grid_width);
        Point::from(self.step_x) * col + Point::from(self.step_y) * row
    }
}

fn invalid(field: &'static str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn grid_offset_wraps_rows() {
        let cfg = CloneConfig {
            step_x: [20.0, 1.0],
            step_y: [2.0, 15.0],
            grid_width: 4,
            grid_height: 2,
            ..CloneConfig::default()
        };
        let p = cfg.grid_offset(5);
        assert_abs_diff_eq!(p.x, 22.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 16.0, epsilon = 1e-9);
        assert_eq!(cfg.grid_offset(0), Point::ORIGIN);
    }

    #[test]
    fn clone_indices_skip_template() {
        let cfg = CloneConfig::default();
        assert_eq!(cfg.clone_indices().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(cfg.template_range(), 200..300);
    }

    #[test]
    fn yaml_fills_defaults() {
        let cfg = CloneConfig::from_yaml_str("grid_width: 2\ngrid_height: 3\nstep_y: [0, 12.5]\n")
            .unwrap();
        assert_eq!(cfg.modulo, 100);
        assert_eq!(cfg.cell_count(), 6);
        assert_eq!(cfg.marker_layer, LayerId(41));
        assert_abs_diff_eq!(cfg.step_y[1], 12.5, epsilon = 1e-9);
    }

    #[test]
    fn rejects_zero_modulo_and_unknown_keys() {
        let err = CloneConfig::from_yaml_str("modulo: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "modulo", .. }));
        assert!(CloneConfig::from_yaml_str("clones_x: 4\n").is_err());
    }

    #[test]
    fn rejects_overflowing_designators() {
        let cfg = CloneConfig {
            modulo: u32::MAX / 2,
            grid_width: 8,
            ..CloneConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
