use tracing::{debug, trace};

use crate::core::{
    AnimationPhase, ScatterSeries, Transformer, ValueFormatter, ValuePoint, ViewportGate,
};
use crate::render::{Canvas, CanvasStateGuard};

use super::{ConnectorTracker, ScatterChartRenderer, ScatterDataProvider, ScatterPassStats};

impl<P: ScatterDataProvider, V: ViewportGate> ScatterChartRenderer<P, V> {
    /// Draws value labels above revealed, in-bounds points and, for series
    /// with `connect_value_labels`, connector lines between consecutive
    /// labels.
    ///
    /// Nothing is drawn when the chart holds at least
    /// `ceil(max_visible_value_count * horizontal_scale)` values.
    pub fn draw_values<C: Canvas + ?Sized>(&self, canvas: &mut C) -> ScatterPassStats {
        let mut stats = ScatterPassStats::default();
        let Some(inputs) = self.pass_inputs("draw_values") else {
            return stats;
        };

        let total_value_count = inputs.data.total_value_count();
        let density_limit = (inputs.provider.max_visible_value_count() as f64
            * self.viewport.horizontal_scale())
        .ceil();
        if total_value_count as f64 >= density_limit {
            debug!(
                total_value_count,
                density_limit, "too many values for labels; skipping value pass"
            );
            return stats;
        }

        let labelled = |series: &ScatterSeries| series.draw_value_labels && !series.is_degenerate();
        if !inputs.transformers_ready("draw_values", labelled) {
            return stats;
        }

        for (series_index, series) in inputs.data.series().iter().enumerate() {
            if !labelled(series) {
                continue;
            }
            let formatter: Option<&dyn ValueFormatter> = match series.value_formatter() {
                Some(formatter) => Some(&**formatter),
                None => inputs.provider.default_value_formatter(),
            };
            let Some(formatter) = formatter else {
                trace!(series_index, "no value formatter available; skipping labels");
                continue;
            };
            let Some(transformer) = inputs.provider.transformer(series.axis_side) else {
                continue;
            };

            let series_stats = if series.connect_value_labels {
                let mut clipped = CanvasStateGuard::new(&mut *canvas);
                clipped.clip_to_rect(self.viewport.content_rect());
                clipped.set_stroke_color(series.resolved_connector_color(series_index));
                let series_stats = self.draw_series_values(
                    &mut *clipped,
                    series,
                    transformer,
                    formatter,
                    inputs.phase,
                );
                clipped.stroke_path();
                series_stats
            } else {
                self.draw_series_values(canvas, series, transformer, formatter, inputs.phase)
            };

            trace!(
                series_index,
                labels = series_stats.labels,
                connectors = series_stats.connectors,
                "drew scatter value labels"
            );
            stats.series_drawn += 1;
            stats.labels += series_stats.labels;
            stats.skipped_labels += series_stats.skipped_labels;
            stats.connectors += series_stats.connectors;
        }
        stats
    }

    fn draw_series_values<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        series: &ScatterSeries,
        transformer: &dyn Transformer,
        formatter: &dyn ValueFormatter,
        phase: AnimationPhase,
    ) -> ScatterPassStats {
        let mut stats = ScatterPassStats::default();
        let phase_y = phase.phase_y();
        let line_offset = series.mark_size() + series.value_font.line_height_px;
        let revealed = phase.reveal_count(series.len());
        let mut tracker = ConnectorTracker::new();

        for index in 0..revealed {
            let Some(point) = series.point(index) else {
                break;
            };
            let pixel =
                transformer.to_pixel(ValuePoint::new(point.x_index as f64, point.value * phase_y));
            let in_bounds = self.viewport.is_in_bounds(pixel.x, pixel.y);
            let anchor = pixel.offset(0.0, -line_offset);

            if in_bounds {
                let value = if series.value_is_index {
                    index as f64
                } else {
                    point.value
                };
                match formatter.format(value) {
                    Ok(text) => {
                        canvas.draw_text(
                            &text,
                            anchor,
                            &series.value_font,
                            series.value_text_color,
                            self.config.label_align,
                        );
                        stats.labels += 1;
                    }
                    Err(err) => {
                        debug!(index, error = %err, "skipping unformattable value label");
                        stats.skipped_labels += 1;
                    }
                }
            }

            // Segments are only built when they will be stroked.
            if let Some(segment) = tracker.advance(index, anchor, in_bounds) {
                if series.connect_value_labels {
                    canvas.add_line_to_path(
                        segment.from.offset(0.0, line_offset),
                        segment.to.offset(0.0, line_offset),
                    );
                    stats.connectors += 1;
                }
            }
        }
        stats
    }
}
