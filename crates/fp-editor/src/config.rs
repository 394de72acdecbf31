//! Editor tuning knobs.
//!
//! Hosts can ship a JSON blob to override any subset of the defaults:
//!
//! ```json
//! { "snap_threshold": 8.0, "paste_offset": { "x": 20.0, "y": 20.0 } }
//! ```

use fp_core::{SNAP_THRESHOLD, Vec2};
use serde::{Deserialize, Serialize};

/// Offset applied per paste, in canvas pixels.
pub const PASTE_OFFSET: Vec2 = Vec2::new(40.0, 40.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Alignment snap distance in canvas pixels.
    pub snap_threshold: f64,
    /// Turn alignment snapping off entirely.
    pub snap_enabled: bool,
    /// Offset of each successive paste relative to the copied nodes.
    pub paste_offset: Vec2,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            snap_enabled: true,
            paste_offset: PASTE_OFFSET,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid editor config: {e}"))?;
        if !config.snap_threshold.is_finite() || config.snap_threshold < 0.0 {
            return Err(format!(
                "invalid editor config: snap_threshold must be a non-negative number, got {}",
                config.snap_threshold
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = EditorConfig::from_json(r#"{ "snap_threshold": 8.0 }"#).unwrap();
        assert_eq!(config.snap_threshold, 8.0);
        assert!(config.snap_enabled);
        assert_eq!(config.paste_offset, PASTE_OFFSET);

        let config =
            EditorConfig::from_json(r#"{ "paste_offset": { "x": 20.0, "y": 10.0 } }"#).unwrap();
        assert_eq!(config.paste_offset, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(EditorConfig::from_json("not json").is_err());
        let err = EditorConfig::from_json(r#"{ "snap_threshold": -1.0 }"#).unwrap_err();
        assert!(err.contains("snap_threshold"));
    }
}
