use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{PixelPoint, Rect, ValuePoint};
use crate::error::{ChartError, ChartResult};

/// Batches smaller than this stay on the calling thread even when
/// `parallel-projection` is enabled.
#[cfg(feature = "parallel-projection")]
const PARALLEL_BATCH_THRESHOLD: usize = 4_096;

/// Value-to-pixel mapping for one axis side.
pub trait Transformer {
    fn to_pixel(&self, point: ValuePoint) -> PixelPoint;

    /// Projects `points` preserving order.
    fn to_pixel_batch(&self, points: &[ValuePoint]) -> Vec<PixelPoint> {
        points.iter().map(|point| self.to_pixel(*point)).collect()
    }
}

impl<T: Transformer + ?Sized> Transformer for &T {
    fn to_pixel(&self, point: ValuePoint) -> PixelPoint {
        (**self).to_pixel(point)
    }

    fn to_pixel_batch(&self, points: &[ValuePoint]) -> Vec<PixelPoint> {
        (**self).to_pixel_batch(points)
    }
}

/// 2D affine matrix using the `[a b; c d; tx ty]` row-vector convention:
///
/// `x' = a*x + c*y + tx`, `y' = b*x + d*y + ty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Maps the value window `[x_min, x_max] x [y_min, y_max]` onto `content`,
    /// with larger values drawn higher (pixel y grows downward).
    pub fn from_value_ranges(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        content: Rect,
    ) -> ChartResult<Self> {
        let content = content.validate()?;
        let x_span = x_max - x_min;
        let y_span = y_max - y_min;
        if !x_span.is_finite() || !y_span.is_finite() || x_span == 0.0 || y_span == 0.0 {
            return Err(ChartError::InvalidData(
                "value ranges must be finite and non-zero".to_owned(),
            ));
        }

        let scale_x = content.width / x_span;
        let scale_y = content.height / y_span;
        Ok(Self::new(
            scale_x,
            0.0,
            0.0,
            -scale_y,
            content.left() - x_min * scale_x,
            content.bottom() + y_min * scale_y,
        ))
    }

    #[must_use]
    pub fn apply(self, point: ValuePoint) -> PixelPoint {
        PixelPoint::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Default [`Transformer`] backed by a single affine matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueTransformer {
    matrix: AffineTransform,
}

impl ValueTransformer {
    #[must_use]
    pub const fn new(matrix: AffineTransform) -> Self {
        Self { matrix }
    }

    #[must_use]
    pub fn matrix(self) -> AffineTransform {
        self.matrix
    }
}

impl Transformer for ValueTransformer {
    fn to_pixel(&self, point: ValuePoint) -> PixelPoint {
        self.matrix.apply(point)
    }

    fn to_pixel_batch(&self, points: &[ValuePoint]) -> Vec<PixelPoint> {
        let matrix = self.matrix;

        #[cfg(feature = "parallel-projection")]
        {
            if points.len() >= PARALLEL_BATCH_THRESHOLD {
                return points.par_iter().map(|point| matrix.apply(*point)).collect();
            }
        }

        points.iter().map(|point| matrix.apply(*point)).collect()
    }
}
