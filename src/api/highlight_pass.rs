use tracing::trace;

use crate::core::{Highlight, PixelPoint, ScatterSeries, ValuePoint, ViewportGate};
use crate::render::{Canvas, CanvasStateGuard};

use super::{HighlightLineMode, ScatterChartRenderer, ScatterDataProvider, ScatterPassStats};

impl<P: ScatterDataProvider, V: ViewportGate> ScatterChartRenderer<P, V> {
    /// Draws highlight lines for each selection.
    ///
    /// Selections beyond the revealed x range (`x_index > chart_x_max *
    /// phase_x`) or without a value at `x_index` are skipped silently.
    pub fn draw_highlighted<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        highlights: &[Highlight],
    ) -> ScatterPassStats {
        let mut stats = ScatterPassStats::default();
        if highlights.is_empty() {
            return stats;
        }
        let Some(inputs) = self.pass_inputs("draw_highlighted") else {
            return stats;
        };
        if !inputs.transformers_ready("draw_highlighted", |series| series.highlight_enabled) {
            return stats;
        }

        let revealed_x_max = inputs.provider.chart_x_max() * inputs.phase.phase_x();
        let phase_y = inputs.phase.phase_y();

        let mut targets: Vec<(PixelPoint, &ScatterSeries)> = Vec::new();
        for highlight in highlights {
            let series_range = highlight.series_range(inputs.data.len());
            if series_range.is_empty() {
                trace!(x_index = highlight.x_index, "highlight selects no series");
                continue;
            }

            for series_index in series_range {
                let Some(series) = inputs.data.get(series_index) else {
                    trace!(series_index, "highlight references a missing series");
                    continue;
                };
                if !series.highlight_enabled {
                    continue;
                }
                if highlight.x_index as f64 > revealed_x_max {
                    trace!(
                        x_index = highlight.x_index,
                        revealed_x_max, "highlight not revealed yet"
                    );
                    continue;
                }
                let Some(value) = series
                    .y_value_for_x_index(highlight.x_index)
                    .filter(|value| !value.is_nan())
                else {
                    trace!(
                        series_index,
                        x_index = highlight.x_index,
                        "no value at highlighted x index"
                    );
                    continue;
                };
                let Some(transformer) = inputs.provider.transformer(series.axis_side) else {
                    continue;
                };
                let pixel = transformer
                    .to_pixel(ValuePoint::new(highlight.x_index as f64, value * phase_y));
                targets.push((pixel, series));
            }
        }
        if targets.is_empty() {
            return stats;
        }

        let mut canvas = CanvasStateGuard::new(canvas);
        for (pixel, series) in targets {
            canvas.set_stroke_color(series.highlight_color);
            canvas.set_line_width(series.highlight_line_width());
            canvas.set_line_dash(series.highlight_dash.as_ref());
            self.draw_highlight_lines(&mut *canvas, pixel, series);
            stats.highlights += 1;
        }
        stats
    }

    fn draw_highlight_lines<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        point: PixelPoint,
        series: &ScatterSeries,
    ) {
        let (vertical, horizontal) = match self.config.highlight_line_mode {
            HighlightLineMode::AxisSpanning => {
                let content = self.viewport.content_rect();
                (
                    (
                        PixelPoint::new(point.x, content.top()),
                        PixelPoint::new(point.x, content.bottom()),
                    ),
                    (
                        PixelPoint::new(content.left(), point.y),
                        PixelPoint::new(content.right(), point.y),
                    ),
                )
            }
            HighlightLineMode::Crosshair => {
                let arm = self.config.crosshair_half_length_px;
                (
                    (point.offset(0.0, -arm), point.offset(0.0, arm)),
                    (point.offset(-arm, 0.0), point.offset(arm, 0.0)),
                )
            }
        };

        if series.draw_vertical_highlight_indicator {
            canvas.stroke_line_segment(vertical.0, vertical.1);
        }
        if series.draw_horizontal_highlight_indicator {
            canvas.stroke_line_segment(horizontal.0, horizontal.1);
        }
    }
}
