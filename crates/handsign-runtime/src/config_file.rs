//! JSON configuration files
//!
//! Every field is optional; missing fields keep their defaults. The loaded
//! configuration is validated before it is returned.

use std::fs;
use std::path::Path;

use handsign_core::{HandsignError, HandsignResult, LabelSet, RecognizerConfig};
use serde::{Deserialize, Serialize};

/// On-disk form of [`RecognizerConfig`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_keypoint_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_window_capacity: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesture_confidence_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_set: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box_padding_px: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degenerate_axis_range_floor: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_coordinate_bound: Option<f32>,
}

impl ConfigFile {
    /// Overlay the file on the defaults and validate
    pub fn into_config(self) -> HandsignResult<RecognizerConfig> {
        let defaults = RecognizerConfig::default();

        let label_set = match self.label_set {
            Some(labels) => LabelSet::new(labels)?,
            None => defaults.label_set,
        };

        let config = RecognizerConfig {
            hand_keypoint_count: self
                .hand_keypoint_count
                .unwrap_or(defaults.hand_keypoint_count),
            history_window_capacity: self
                .history_window_capacity
                .unwrap_or(defaults.history_window_capacity),
            gesture_confidence_threshold: self
                .gesture_confidence_threshold
                .unwrap_or(defaults.gesture_confidence_threshold),
            label_set,
            bounding_box_padding_px: self
                .bounding_box_padding_px
                .unwrap_or(defaults.bounding_box_padding_px),
            degenerate_axis_range_floor: self
                .degenerate_axis_range_floor
                .unwrap_or(defaults.degenerate_axis_range_floor),
            validity_coordinate_bound: self
                .validity_coordinate_bound
                .unwrap_or(defaults.validity_coordinate_bound),
        };

        config.validate()?;
        Ok(config)
    }
}

impl From<&RecognizerConfig> for ConfigFile {
    fn from(config: &RecognizerConfig) -> Self {
        ConfigFile {
            hand_keypoint_count: Some(config.hand_keypoint_count),
            history_window_capacity: Some(config.history_window_capacity),
            gesture_confidence_threshold: Some(config.gesture_confidence_threshold),
            label_set: Some(config.label_set.iter().map(str::to_string).collect()),
            bounding_box_padding_px: Some(config.bounding_box_padding_px),
            degenerate_axis_range_floor: Some(config.degenerate_axis_range_floor),
            validity_coordinate_bound: Some(config.validity_coordinate_bound),
        }
    }
}

/// Parse and validate a JSON configuration
pub fn parse_config(json: &str) -> HandsignResult<RecognizerConfig> {
    let file: ConfigFile =
        serde_json::from_str(json).map_err(|e| HandsignError::ConfigParse(e.to_string()))?;
    file.into_config()
}

/// Read, parse and validate a JSON configuration file
pub fn load_config(path: impl AsRef<Path>) -> HandsignResult<RecognizerConfig> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| HandsignError::ConfigIo(format!("{}: {}", path.display(), e)))?;
    parse_config(&json)
}

/// Pretty JSON for a configuration
pub fn config_to_json(config: &RecognizerConfig) -> HandsignResult<String> {
    serde_json::to_string_pretty(&ConfigFile::from(config))
        .map_err(|e| HandsignError::ConfigParse(e.to_string()))
}
