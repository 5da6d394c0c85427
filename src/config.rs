//! Panel configuration embedded in the same free-text blob as the GPS
//! lines. Values are `key=value` lines; missing or unparseable entries
//! fall back to their defaults so a half-edited panel keeps rendering.

use log::warn;
use serde::{Deserialize, Serialize};

const DETECTION_DISTANCE_KEY: &str = "DetectionDistance";
const DETECTION_DISTANCE_DEFAULT: f64 = 700.0;

const SCREEN_NUMBER_KEY: &str = "ScreenNumber";
const SCREEN_NUMBER_DEFAULT: usize = 0;

const PANEL_FILTER_KEY: &str = "PanelNameContains";
const PANEL_FILTER_DEFAULT: &str = "GPS-Map";

/// Per-target render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// World-space distance mapped to the full visible radius of the
    /// surface. Must be positive for a render pass to proceed.
    pub detection_radius: f64,
    /// Which screen of a multi-screen mobile target receives the overlay.
    pub screen_index: usize,
    /// Substring the host's discovery uses to select render targets.
    pub panel_name_filter: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            detection_radius: DETECTION_DISTANCE_DEFAULT,
            screen_index: SCREEN_NUMBER_DEFAULT,
            panel_name_filter: PANEL_FILTER_DEFAULT.to_string(),
        }
    }
}

impl MapConfig {
    /// Parses configuration out of a free-text blob. Unknown lines are
    /// ignored; unparseable values keep the key's default.
    pub fn from_custom_data(text: &str) -> Self {
        let mut config = Self::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                DETECTION_DISTANCE_KEY => match value.parse() {
                    Ok(radius) => config.detection_radius = radius,
                    Err(_) => warn!("Ignoring unparseable {DETECTION_DISTANCE_KEY}: {value}"),
                },
                SCREEN_NUMBER_KEY => match value.parse() {
                    Ok(index) => config.screen_index = index,
                    Err(_) => warn!("Ignoring unparseable {SCREEN_NUMBER_KEY}: {value}"),
                },
                PANEL_FILTER_KEY => {
                    if value.is_empty() {
                        warn!("Ignoring empty {PANEL_FILTER_KEY}");
                    } else {
                        config.panel_name_filter = value.to_string();
                    }
                }
                _ => {}
            }
        }
        config
    }

    /// Returns an updated blob with missing configuration keys prepended,
    /// or `None` when every key is already present. Writing the result
    /// back to its store is the host's responsibility.
    pub fn ensure_defaults(text: &str) -> Option<String> {
        let defaults: [(&str, String); 3] = [
            (DETECTION_DISTANCE_KEY, DETECTION_DISTANCE_DEFAULT.to_string()),
            (SCREEN_NUMBER_KEY, SCREEN_NUMBER_DEFAULT.to_string()),
            (PANEL_FILTER_KEY, PANEL_FILTER_DEFAULT.to_string()),
        ];
        let mut prefix = String::new();
        for (key, default) in &defaults {
            let present = text
                .lines()
                .any(|line| line.split_once('=').is_some_and(|(k, _)| k.trim() == *key));
            if !present {
                prefix.push_str(&format!("{key}={default}\n"));
            }
        }
        if prefix.is_empty() {
            None
        } else {
            Some(format!("{prefix}\n{text}"))
        }
    }
}
