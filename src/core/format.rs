use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Turns a label value into display text.
pub trait ValueFormatter {
    fn format(&self, value: f64) -> Result<String, FormatError>;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> Result<String, FormatError>,
{
    fn format(&self, value: f64) -> Result<String, FormatError> {
        self(value)
    }
}

/// Fixed-precision formatter used when neither the series nor the data
/// provider supplies one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalValueFormatter {
    pub decimals: usize,
    #[serde(default)]
    pub suffix: String,
}

impl DecimalValueFormatter {
    #[must_use]
    pub fn new(decimals: usize) -> Self {
        Self {
            decimals,
            suffix: String::new(),
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Default for DecimalValueFormatter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ValueFormatter for DecimalValueFormatter {
    fn format(&self, value: f64) -> Result<String, FormatError> {
        if !value.is_finite() {
            return Err(FormatError::NonFinite(value));
        }
        // Avoid rendering "-0.0" for tiny negatives that round to zero.
        let rendered = format!("{value:.prec$}", prec = self.decimals);
        let rendered = match rendered.strip_prefix('-') {
            Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_owned(),
            _ => rendered,
        };
        Ok(format!("{rendered}{}", self.suffix))
    }
}
