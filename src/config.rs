use serde::Deserialize;
use std::fs;

/// Palette and cell geometry for rendered figures, loaded from a TOML
/// or JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Document background.
    pub background: String,
    /// Fill behind matrix cells.
    pub cell_fill: String,
    /// Matrix border stroke.
    pub cell_stroke: String,
    /// Gradient endpoints for cell coloring.
    pub color_start: String,
    pub color_end: String,
    /// Causal-mask cell color.
    pub mask_color: String,
    /// Attention-flow arrow color.
    pub arrow_color: String,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: "#0a0a1a".to_string(),
            cell_fill: "#1e3a5f".to_string(),
            cell_stroke: "#3b82f6".to_string(),
            color_start: "#fde047".to_string(),
            color_end: "#3b82f6".to_string(),
            mask_color: "#374151".to_string(),
            arrow_color: "#9ca3af".to_string(),
            cell_width: 4.0,
            cell_height: 8.0,
        }
    }
}

impl Theme {
    /// Load a theme from the given path. Supports TOML or JSON based on
    /// the file extension. Returns `None` if reading or parsing fails.
    pub fn from_path(path: &str) -> Option<Self> {
        let Ok(content) = fs::read_to_string(path) else {
            return None;
        };
        if path.ends_with(".json") {
            serde_json::from_str(&content).ok()
        } else {
            toml::from_str(&content).ok()
        }
    }
}
