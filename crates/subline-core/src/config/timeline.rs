//! Timeline view and gesture tunables

use serde::{Deserialize, Serialize};

use crate::interaction::InteractionSettings;

/// Timeline configuration
///
/// Every field has a default, so a partial YAML file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Time span in milliseconds that fills one viewport width of the main track
    /// Default: 10000
    pub timeline_cutout_ms: u64,

    /// Height of a segment box on the main track
    /// Default: 80
    pub segment_height_px: f64,

    /// Height of the main track area
    /// Default: 220
    pub timeline_height_px: f64,

    /// Height of the miniature overview
    /// Default: 15
    pub mini_timeline_height_px: f64,

    /// Horizontal travel that turns a press into a drag
    /// Default: 3.0
    pub drag_threshold_px: f64,

    /// Allow resizing from the trailing edge
    /// Default: false
    pub end_handle_enabled: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            timeline_cutout_ms: 10_000,
            segment_height_px: 80.0,
            timeline_height_px: 220.0,
            mini_timeline_height_px: 15.0,
            drag_threshold_px: 3.0,
            end_handle_enabled: false,
        }
    }
}

impl TimelineConfig {
    /// Clamp values that would make the timeline unusable
    pub fn validate(&mut self) {
        if self.timeline_cutout_ms == 0 {
            log::warn!("TimelineConfig: timeline_cutout_ms must be >= 1, using 1");
            self.timeline_cutout_ms = 1;
        }
        self.segment_height_px = at_least("segment_height_px", self.segment_height_px, 1.0);
        self.timeline_height_px = at_least("timeline_height_px", self.timeline_height_px, 1.0);
        self.mini_timeline_height_px =
            at_least("mini_timeline_height_px", self.mini_timeline_height_px, 1.0);
        self.drag_threshold_px = at_least("drag_threshold_px", self.drag_threshold_px, 0.0);
    }

    pub fn interaction_settings(&self) -> InteractionSettings {
        InteractionSettings::from(self)
    }
}

fn at_least(name: &str, value: f64, min: f64) -> f64 {
    if value.is_finite() && value >= min {
        value
    } else {
        log::warn!("TimelineConfig: {} = {} is invalid, using {}", name, value, min);
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = TimelineConfig::default();
        assert_eq!(config.timeline_cutout_ms, 10_000);
        assert_eq!(config.segment_height_px, 80.0);
        assert_eq!(config.timeline_height_px, 220.0);
        assert_eq!(config.mini_timeline_height_px, 15.0);
        assert_eq!(config.drag_threshold_px, 3.0);
        assert!(!config.end_handle_enabled);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: TimelineConfig =
            serde_yaml::from_str("timeline_cutout_ms: 20000\nend_handle_enabled: true\n").unwrap();
        assert_eq!(config.timeline_cutout_ms, 20_000);
        assert!(config.end_handle_enabled);
        assert_eq!(config.segment_height_px, 80.0);
    }

    #[test]
    fn test_validate_clamps() {
        let mut config = TimelineConfig {
            timeline_cutout_ms: 0,
            segment_height_px: -5.0,
            timeline_height_px: f64::NAN,
            mini_timeline_height_px: 0.0,
            drag_threshold_px: -1.0,
            end_handle_enabled: false,
        };
        config.validate();
        assert_eq!(config.timeline_cutout_ms, 1);
        assert_eq!(config.segment_height_px, 1.0);
        assert_eq!(config.timeline_height_px, 1.0);
        assert_eq!(config.mini_timeline_height_px, 1.0);
        assert_eq!(config.drag_threshold_px, 0.0);
    }

    #[test]
    fn test_interaction_settings_follow_config() {
        let config = TimelineConfig {
            drag_threshold_px: 6.0,
            end_handle_enabled: true,
            ..TimelineConfig::default()
        };
        let settings = config.interaction_settings();
        assert_eq!(settings.drag_threshold_px, 6.0);
        assert!(settings.end_handle_enabled);
        assert_eq!(settings.segment_height_px, 80.0);
    }
}
