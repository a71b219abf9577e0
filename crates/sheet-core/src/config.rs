//! Engine configuration.
//!
//! Every knob has a default matching the sheet builder's shipped behaviour,
//! so an empty JSON object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};

// ─── Touch detection ─────────────────────────────────────────────────────

/// Thresholds for deciding that two widget edges touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TouchConfig {
    /// Maximum distance between two edges that still counts as touching,
    /// in world units. Default: **5**.
    pub edge_tolerance: f32,

    /// Minimum overlap along the perpendicular axis, in world units.
    /// Rejects widgets that only meet at a corner. Default: **20**.
    pub overlap_min: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            edge_tolerance: 5.0,
            overlap_min: 20.0,
        }
    }
}

// ─── Grouping ────────────────────────────────────────────────────────────

/// How `groupId` is maintained when attachments change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupPolicy {
    /// Local rules: a new pair gets a fresh group, a groupless widget is
    /// absorbed into its neighbour's group (one hop), two different groups
    /// are linked by an edge but not merged.
    #[default]
    OneHop,
    /// `groupId` is derived: connected components are recomputed after
    /// every attach/detach.
    ConnectedComponents,
}

// ─── Camera ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Screen-space padding kept around the content by "fit all". Default: **40**.
    pub fit_padding: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 3.0,
            fit_padding: 40.0,
        }
    }
}

// ─── Engine ──────────────────────────────────────────────────────────────

/// Top-level configuration for the attachment engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub touch: TouchConfig,
    pub group_policy: GroupPolicy,

    /// Delay between the last layout-affecting change and re-measurement,
    /// in milliseconds. Default: **75**.
    pub settle_delay_ms: f64,

    /// Radius of a rounded (free) shadow corner, in world units. Default: **8**.
    pub corner_radius: f32,

    pub camera: CameraConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            touch: TouchConfig::default(),
            group_policy: GroupPolicy::default(),
            settle_delay_ms: 75.0,
            corner_radius: 8.0,
            camera: CameraConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) configuration from JSON.
    ///
    /// # Errors
    /// Returns the serde error message on malformed input or out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid engine config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    /// Describes the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.touch.edge_tolerance >= 0.0) {
            return Err("touch.edgeTolerance must be >= 0".into());
        }
        if !(self.touch.overlap_min >= 0.0) {
            return Err("touch.overlapMin must be >= 0".into());
        }
        if !(self.settle_delay_ms >= 0.0) {
            return Err("settleDelayMs must be >= 0".into());
        }
        if !(self.camera.min_scale > 0.0 && self.camera.min_scale <= self.camera.max_scale) {
            return Err("camera.minScale must be > 0 and <= camera.maxScale".into());
        }
        Ok(())
    }
}
