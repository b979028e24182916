use tracing::{trace, warn};

use crate::core::{
    AnimationPhase, ColorLookup, MarkShape, PixelPoint, Rect, ScatterSeries, Transformer,
    ValuePoint, ViewportGate,
};
use crate::render::{Canvas, CanvasStateGuard, ShapePath};

use super::{ScatterChartRenderer, ScatterDataProvider, ScatterPassStats};

impl<P: ScatterDataProvider, V: ViewportGate> ScatterChartRenderer<P, V> {
    /// Draws marks for every visible, non-degenerate series.
    ///
    /// Only the first `ceil(n * phase_x)` points are visited; values are
    /// scaled by `phase_y`. Points left of or above/below the content are
    /// culled.
    pub fn draw_data<C: Canvas + ?Sized>(&self, canvas: &mut C) -> ScatterPassStats {
        let mut stats = ScatterPassStats::default();
        let Some(inputs) = self.pass_inputs("draw_data") else {
            return stats;
        };
        let drawable = |series: &ScatterSeries| series.visible && !series.is_degenerate();
        if !inputs.transformers_ready("draw_data", drawable) {
            return stats;
        }

        for (series_index, series) in inputs.data.series().iter().enumerate() {
            if !drawable(series) {
                trace!(
                    series_index,
                    visible = series.visible,
                    "skipping hidden or degenerate series"
                );
                continue;
            }
            let Some(transformer) = inputs.provider.transformer(series.axis_side) else {
                continue;
            };

            let series_stats = self.draw_series_marks(canvas, series, transformer, inputs.phase);
            trace!(
                series_index,
                marks = series_stats.marks,
                culled = series_stats.culled,
                "drew scatter marks"
            );
            stats.series_drawn += 1;
            stats.marks += series_stats.marks;
            stats.culled += series_stats.culled;
        }
        stats
    }

    fn draw_series_marks<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        series: &ScatterSeries,
        transformer: &dyn Transformer,
        phase: AnimationPhase,
    ) -> ScatterPassStats {
        let mut stats = ScatterPassStats::default();
        let revealed = phase.reveal_count(series.len());
        let phase_y = phase.phase_y();
        let values: Vec<ValuePoint> = series.points()[..revealed]
            .iter()
            .map(|point| ValuePoint::new(point.x_index as f64, point.value * phase_y))
            .collect();
        let pixels = transformer.to_pixel_batch(&values);

        let size = series.mark_size();
        let half = size / 2.0;

        let mut canvas = CanvasStateGuard::new(canvas);
        for (index, pixel) in pixels.into_iter().enumerate() {
            if !self.viewport.is_in_bounds(pixel.x, pixel.y) {
                stats.culled += 1;
                continue;
            }

            let color = series.color_at(index);
            match series.mark_shape() {
                MarkShape::Square => {
                    canvas.set_fill_color(color);
                    canvas.fill_rect(Rect::centered_square(pixel, size));
                }
                MarkShape::Circle => {
                    canvas.set_fill_color(color);
                    canvas.fill_ellipse_in_rect(Rect::centered_square(pixel, size));
                }
                MarkShape::Cross => {
                    canvas.set_stroke_color(color);
                    canvas.stroke_line_segment(pixel.offset(-half, 0.0), pixel.offset(half, 0.0));
                    canvas.stroke_line_segment(pixel.offset(0.0, -half), pixel.offset(0.0, half));
                }
                MarkShape::Triangle => {
                    canvas.set_fill_color(color);
                    canvas.fill_path(&triangle_path(pixel, half));
                }
                MarkShape::Custom(path) => {
                    if path.is_empty() {
                        warn!(
                            series = series.label(),
                            index, "custom mark shape has no path; aborting series"
                        );
                        return stats;
                    }
                    canvas.set_fill_color(color);
                    let mut shifted = CanvasStateGuard::new(&mut *canvas);
                    shifted.translate(-pixel.x, -pixel.y);
                    shifted.fill_path(path);
                }
            }
            stats.marks += 1;
        }
        stats
    }
}

/// Apex above the center, base below it.
fn triangle_path(center: PixelPoint, half: f64) -> ShapePath {
    ShapePath::polygon(&[
        center.offset(0.0, -half),
        center.offset(half, half),
        center.offset(-half, half),
    ])
}
