use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed geometry constants for the positioner. Node boxes are uniform; all
/// spacing is in pixels of the output canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Horizontal gap between adjacent nodes in a row.
    pub column_gap: f32,
    /// Extra gap inserted at a sibling-cluster break.
    pub group_gap: f32,
    /// Vertical distance between row tops.
    pub row_spacing: f32,
    pub padding_x: f32,
    pub padding_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 120.0,
            column_gap: 40.0,
            group_gap: 48.0,
            row_spacing: 240.0,
            padding_x: 48.0,
            padding_y: 48.0,
        }
    }
}

/// Optional overrides file; every field falls back to the default above.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    column_gap: Option<f32>,
    group_gap: Option<f32>,
    row_spacing: Option<f32>,
    padding_x: Option<f32>,
    padding_y: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let mut config = LayoutConfig::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    // Config files are hand-edited; accept JSON5 relaxations (comments,
    // trailing commas) alongside strict JSON.
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };

    if let Some(v) = parsed.node_width {
        config.node_width = v;
    }
    if let Some(v) = parsed.node_height {
        config.node_height = v;
    }
    if let Some(v) = parsed.column_gap {
        config.column_gap = v;
    }
    if let Some(v) = parsed.group_gap {
        config.group_gap = v;
    }
    if let Some(v) = parsed.row_spacing {
        config.row_spacing = v;
    }
    if let Some(v) = parsed.padding_x {
        config.padding_x = v;
    }
    if let Some(v) = parsed.padding_y {
        config.padding_y = v;
    }
    Ok(config)
}
