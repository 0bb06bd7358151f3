//! Editor configuration.

use pb_core::Real;
use pb_geometry::{GridSettings, GroupPadding};
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// Tunables for the diagram controller. Every field has a default, so a
/// partial YAML document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid_size: Real,
    pub snap_enabled: bool,
    /// Width and height floor applied on resize.
    pub min_equipment_size: Real,
    /// Offset applied to both axes by a plain paste.
    pub paste_offset: Real,
    /// Moves at or below this distance on both axes are not recorded.
    pub move_epsilon: Real,
    pub undo_capacity: usize,
    pub history_log_limit: usize,
    pub group_padding: GroupPadding,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            snap_enabled: true,
            min_equipment_size: 30.0,
            paste_offset: 50.0,
            move_epsilon: 0.1,
            undo_capacity: 100,
            history_log_limit: 1000,
            group_padding: GroupPadding::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_yaml_str(text: &str) -> EditorResult<Self> {
        let config: EditorConfig = serde_yaml::from_str(text).map_err(|e| EditorError::Config {
            what: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EditorResult<()> {
        self.grid()?;
        if !self.min_equipment_size.is_finite() || self.min_equipment_size < 0.0 {
            return Err(EditorError::Config {
                what: format!("min_equipment_size = {}", self.min_equipment_size),
            });
        }
        if !self.move_epsilon.is_finite() || self.move_epsilon < 0.0 {
            return Err(EditorError::Config {
                what: format!("move_epsilon = {}", self.move_epsilon),
            });
        }
        if self.undo_capacity == 0 {
            return Err(EditorError::Config {
                what: "undo_capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Grid settings described by this config.
    pub fn grid(&self) -> EditorResult<GridSettings> {
        let grid = GridSettings::new(self.grid_size).map_err(|_| EditorError::InvalidGridSize {
            size: self.grid_size,
        })?;
        Ok(if self.snap_enabled { grid } else { grid.disabled() })
    }
}
