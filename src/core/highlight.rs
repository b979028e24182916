use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Transient point selection produced by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// `None` selects every series at `x_index`.
    pub series_index: Option<usize>,
    pub x_index: i64,
}

impl Highlight {
    #[must_use]
    pub const fn new(series_index: usize, x_index: i64) -> Self {
        Self {
            series_index: Some(series_index),
            x_index,
        }
    }

    #[must_use]
    pub const fn all_series(x_index: i64) -> Self {
        Self {
            series_index: None,
            x_index,
        }
    }

    /// Series indices this highlight addresses within a collection of
    /// `series_count` series. The single-series range is not bounds-checked.
    #[must_use]
    pub fn series_range(self, series_count: usize) -> Range<usize> {
        match self.series_index {
            None => 0..series_count,
            Some(index) => index..index.saturating_add(1),
        }
    }
}
