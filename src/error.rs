use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Failure reported by a value formatter for a single label.
///
/// Draw passes treat it as "skip this label", never as a pass failure.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FormatError {
    #[error("value {0} cannot be formatted")]
    NonFinite(f64),
}
