//! Inspector settings, persisted as YAML.

use std::path::Path;
use std::time::Duration;

use pt_plot::SurfaceOptions;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Run loop, interaction and readout settings.
///
/// Every field has a default, so a partial file (or none) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Wall-clock period of the run timer.
    pub tick_interval_ms: u64,
    /// Simulation steps per timer tick.
    pub steps_per_tick: usize,
    /// Time axis scale per scroll unit.
    pub zoom_base: f64,
    pub hit_distance_px: f32,
    /// Pointer travel before a press on the tree becomes a drag.
    pub drag_threshold_px: f32,
    /// Names listed in the drag preview before eliding.
    pub preview_max_items: usize,
    pub value_precision: usize,
    pub time_precision: usize,
    pub label_char_width_px: f32,
    pub label_line_height_px: f32,
    /// Incremental segments blitted before the background is recaptured.
    pub segment_batch_limit: usize,
    /// Time axis growth factor while following new samples.
    pub axis_growth: f64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            steps_per_tick: 10,
            zoom_base: 1.5,
            hit_distance_px: 5.0,
            drag_threshold_px: 0.0,
            preview_max_items: 3,
            value_precision: 5,
            time_precision: 3,
            label_char_width_px: 7.0,
            label_line_height_px: 14.0,
            segment_batch_limit: 256,
            axis_growth: 1.5,
        }
    }
}

impl InspectorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions {
            hit_distance_px: self.hit_distance_px,
            zoom_base: self.zoom_base,
            segment_batch_limit: self.segment_batch_limit,
            axis_growth: self.axis_growth,
            value_precision: self.value_precision,
            time_precision: self.time_precision,
            label_char_width_px: self.label_char_width_px,
            label_line_height_px: self.label_line_height_px,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        let invalid = |msg: &str| Err(AppError::Config(msg.to_string()));
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be positive");
        }
        if self.steps_per_tick == 0 {
            return invalid("steps_per_tick must be at least 1");
        }
        if self.segment_batch_limit == 0 {
            return invalid("segment_batch_limit must be at least 1");
        }
        if self.preview_max_items == 0 {
            return invalid("preview_max_items must be at least 1");
        }
        if !(self.zoom_base > 1.0 && self.zoom_base.is_finite()) {
            return invalid("zoom_base must be greater than 1");
        }
        if !(self.axis_growth >= 1.0 && self.axis_growth.is_finite()) {
            return invalid("axis_growth must be at least 1");
        }
        if !(self.hit_distance_px >= 0.0 && self.drag_threshold_px >= 0.0) {
            return invalid("pixel distances must not be negative");
        }
        if !(self.label_char_width_px > 0.0 && self.label_line_height_px > 0.0) {
            return invalid("label metrics must be positive");
        }
        Ok(())
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> AppResult<InspectorConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: InspectorConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(path: Option<&Path>) -> AppResult<InspectorConfig> {
    match path {
        Some(path) if path.exists() => load_config(path),
        Some(path) => {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(InspectorConfig::default())
        }
        None => Ok(InspectorConfig::default()),
    }
}

pub fn save_config(path: &Path, config: &InspectorConfig) -> AppResult<()> {
    config.validate()?;
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        InspectorConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: InspectorConfig = serde_yaml::from_str("steps_per_tick: 3\n").unwrap();
        assert_eq!(config.steps_per_tick, 3);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.zoom_base, 1.5);
    }

    #[test]
    fn rejects_degenerate_values() {
        let bad = [
            InspectorConfig {
                tick_interval_ms: 0,
                ..Default::default()
            },
            InspectorConfig {
                segment_batch_limit: 0,
                ..Default::default()
            },
            InspectorConfig {
                zoom_base: 1.0,
                ..Default::default()
            },
            InspectorConfig {
                hit_distance_px: -1.0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(AppError::Config(_))));
        }
    }
}
