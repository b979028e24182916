use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

/// Visibility queries the draw passes use for culling and clipping.
pub trait ViewportGate {
    /// `true` when `x` is not left of the visible content.
    fn is_left_visible(&self, x: f64) -> bool;

    /// `true` when `y` lies within the visible content's vertical extent.
    fn is_vertically_visible(&self, y: f64) -> bool;

    fn content_rect(&self) -> Rect;

    /// Current horizontal zoom factor (`1.0` when unzoomed).
    fn horizontal_scale(&self) -> f64;

    /// Combined predicate shared by the mark and value-label passes.
    ///
    /// Points right of the content are intentionally not rejected.
    fn is_in_bounds(&self, x: f64, y: f64) -> bool {
        self.is_left_visible(x) && self.is_vertically_visible(y)
    }
}

impl<T: ViewportGate + ?Sized> ViewportGate for &T {
    fn is_left_visible(&self, x: f64) -> bool {
        (**self).is_left_visible(x)
    }

    fn is_vertically_visible(&self, y: f64) -> bool {
        (**self).is_vertically_visible(y)
    }

    fn content_rect(&self) -> Rect {
        (**self).content_rect()
    }

    fn horizontal_scale(&self) -> f64 {
        (**self).horizontal_scale()
    }
}

/// Default [`ViewportGate`]: a content rectangle plus the horizontal scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportHandler {
    content: Rect,
    #[serde(default = "default_scale_x")]
    scale_x: f64,
}

impl ViewportHandler {
    pub fn new(content: Rect) -> ChartResult<Self> {
        Ok(Self {
            content: content.validate()?,
            scale_x: default_scale_x(),
        })
    }

    pub fn with_scale_x(mut self, scale_x: f64) -> ChartResult<Self> {
        if !scale_x.is_finite() || scale_x <= 0.0 {
            return Err(ChartError::InvalidData(
                "horizontal scale must be finite and > 0".to_owned(),
            ));
        }
        self.scale_x = scale_x;
        Ok(self)
    }

    #[must_use]
    pub fn content(self) -> Rect {
        self.content
    }

    #[must_use]
    pub fn scale_x(self) -> f64 {
        self.scale_x
    }
}

impl ViewportGate for ViewportHandler {
    fn is_left_visible(&self, x: f64) -> bool {
        self.content.left() <= x
    }

    fn is_vertically_visible(&self, y: f64) -> bool {
        y >= self.content.top() && y <= self.content.bottom()
    }

    fn content_rect(&self) -> Rect {
        self.content
    }

    fn horizontal_scale(&self) -> f64 {
        self.scale_x
    }
}

fn default_scale_x() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::{ViewportGate, ViewportHandler};
    use crate::core::Rect;

    #[test]
    fn bounds_checks_ignore_right_edge() {
        let viewport = ViewportHandler::new(Rect::new(10.0, 10.0, 100.0, 50.0)).expect("viewport");
        assert!(viewport.is_in_bounds(10.0, 10.0));
        assert!(viewport.is_in_bounds(500.0, 60.0));
        assert!(!viewport.is_in_bounds(9.9, 30.0));
        assert!(!viewport.is_in_bounds(50.0, 60.1));
        assert!(!viewport.is_in_bounds(50.0, 9.0));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(ViewportHandler::new(Rect::new(0.0, 0.0, 0.0, 10.0)).is_err());
        let viewport = ViewportHandler::new(Rect::new(0.0, 0.0, 10.0, 10.0)).expect("viewport");
        assert!(viewport.with_scale_x(0.0).is_err());
        assert!(viewport.with_scale_x(f64::INFINITY).is_err());
        assert_eq!(viewport.with_scale_x(2.5).expect("scale").horizontal_scale(), 2.5);
    }
}
