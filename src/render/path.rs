use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    MoveTo(PixelPoint),
    LineTo(PixelPoint),
    Close,
}

/// Caller-supplied outline for `MarkShape::Custom`.
///
/// Coordinates are in the canvas space active when the path is filled; the
/// mark pass shifts the origin before filling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapePath {
    elements: Vec<PathElement>,
}

impl ShapePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.elements.push(PathElement::MoveTo(PixelPoint::new(x, y)));
        self
    }

    #[must_use]
    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.elements.push(PathElement::LineTo(PixelPoint::new(x, y)));
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.elements.push(PathElement::Close);
        self
    }

    /// Closed polygon through `points`; empty input yields an empty path.
    #[must_use]
    pub fn polygon(points: &[PixelPoint]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::new();
        };
        let mut path = Self::new().move_to(first.x, first.y);
        for point in rest {
            path = path.line_to(point.x, point.y);
        }
        path.close()
    }

    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{PathElement, ShapePath};
    use crate::core::PixelPoint;

    #[test]
    fn polygon_closes_the_outline() {
        let path = ShapePath::polygon(&[
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(4.0, 0.0),
            PixelPoint::new(2.0, 3.0),
        ]);
        assert_eq!(path.elements().len(), 4);
        assert_eq!(path.elements()[0], PathElement::MoveTo(PixelPoint::new(0.0, 0.0)));
        assert_eq!(path.elements()[3], PathElement::Close);
        assert!(ShapePath::polygon(&[]).is_empty());
    }
}
