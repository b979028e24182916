use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::TextHAlign;

/// Geometry used by the highlight pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighlightLineMode {
    /// Vertical line over the full content height at the point's x and a
    /// horizontal line over the full content width at its y.
    #[default]
    AxisSpanning,
    /// Two short segments centered on the point.
    Crosshair,
}

/// Renderer-level configuration.
///
/// Serializable so hosts can keep it next to their own chart settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterRenderConfig {
    #[serde(default)]
    pub highlight_line_mode: HighlightLineMode,
    /// Half arm length for [`HighlightLineMode::Crosshair`].
    #[serde(default = "default_crosshair_half_length_px")]
    pub crosshair_half_length_px: f64,
    #[serde(default)]
    pub label_align: TextHAlign,
}

impl Default for ScatterRenderConfig {
    fn default() -> Self {
        Self {
            highlight_line_mode: HighlightLineMode::default(),
            crosshair_half_length_px: default_crosshair_half_length_px(),
            label_align: TextHAlign::Center,
        }
    }
}

impl ScatterRenderConfig {
    #[must_use]
    pub fn with_highlight_line_mode(mut self, mode: HighlightLineMode) -> Self {
        self.highlight_line_mode = mode;
        self
    }

    pub fn with_crosshair_half_length_px(mut self, half_length_px: f64) -> ChartResult<Self> {
        self.crosshair_half_length_px = half_length_px;
        self.validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.crosshair_half_length_px.is_finite() || self.crosshair_half_length_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "crosshair half length must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Parses and validates a JSON config; missing fields take defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse scatter render config: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize scatter render config: {e}"))
        })
    }
}

fn default_crosshair_half_length_px() -> f64 {
    8.0
}
