use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Default highlight tint (warm orange).
    pub const HIGHLIGHT: Self = Self::rgb(1.0, 0.733, 0.451);
    /// Default mark color (sky blue).
    pub const SERIES_DEFAULT: Self = Self::rgb(0.549, 0.918, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(self)
    }
}

/// Horizontal text alignment relative to the label anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Font metrics consumed by the value-label pass.
///
/// Only the line height participates in layout; `family` and `size_px` are
/// forwarded to the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFont {
    pub family: String,
    pub size_px: f64,
    pub line_height_px: f64,
}

impl LabelFont {
    /// Font with a line height of `1.2 * size_px`.
    pub fn new(family: impl Into<String>, size_px: f64) -> ChartResult<Self> {
        Self::with_line_height(family, size_px, size_px * 1.2)
    }

    pub fn with_line_height(
        family: impl Into<String>,
        size_px: f64,
        line_height_px: f64,
    ) -> ChartResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !line_height_px.is_finite() || line_height_px < 0.0 {
            return Err(ChartError::InvalidData(
                "font line height must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            family: family.into(),
            size_px,
            line_height_px,
        })
    }
}

impl Default for LabelFont {
    fn default() -> Self {
        Self {
            family: "Sans".to_owned(),
            size_px: 7.0,
            line_height_px: 8.4,
        }
    }
}

/// Stroke dash lengths plus the offset into the pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    lengths: SmallVec<[f64; 4]>,
    phase: f64,
}

impl DashPattern {
    pub fn new(lengths: impl IntoIterator<Item = f64>, phase: f64) -> ChartResult<Self> {
        let lengths: SmallVec<[f64; 4]> = lengths.into_iter().collect();
        if lengths.is_empty() {
            return Err(ChartError::InvalidData(
                "dash pattern needs at least one length".to_owned(),
            ));
        }
        if lengths.iter().any(|len| !len.is_finite() || *len < 0.0) {
            return Err(ChartError::InvalidData(
                "dash lengths must be finite and >= 0".to_owned(),
            ));
        }
        if lengths.iter().all(|len| *len == 0.0) {
            return Err(ChartError::InvalidData(
                "dash pattern must contain a non-zero length".to_owned(),
            ));
        }
        if !phase.is_finite() {
            return Err(ChartError::InvalidData(
                "dash phase must be finite".to_owned(),
            ));
        }
        Ok(Self { lengths, phase })
    }

    #[must_use]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    #[must_use]
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, DashPattern, LabelFont};

    #[test]
    fn color_channels_are_validated() {
        assert!(Color::rgb(0.2, 0.4, 0.6).validate().is_ok());
        assert!(Color::rgba(0.0, 1.1, 0.0, 1.0).validate().is_err());
        assert!(Color::rgba(0.0, 0.0, 0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn dash_pattern_rejects_empty_and_all_zero() {
        assert!(DashPattern::new([], 0.0).is_err());
        assert!(DashPattern::new([0.0, 0.0], 0.0).is_err());
        assert!(DashPattern::new([4.0, -1.0], 0.0).is_err());
        let dash = DashPattern::new([4.0, 2.0], 1.0).expect("dash");
        assert_eq!(dash.lengths(), &[4.0, 2.0]);
        assert_eq!(dash.phase(), 1.0);
    }

    #[test]
    fn font_line_height_defaults_to_leading() {
        let font = LabelFont::new("Mono", 10.0).expect("font");
        assert!((font.line_height_px - 12.0).abs() <= 1e-9);
        assert!(LabelFont::new("Mono", 0.0).is_err());
    }
}
