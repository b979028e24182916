//! Scatter series renderer and the collaborator contracts it consumes.
//!
//! A host builds one [`ScatterChartRenderer`] per chart and calls its passes
//! once per redraw, in order: [`ScatterChartRenderer::draw_data`],
//! [`ScatterChartRenderer::draw_values`], then
//! [`ScatterChartRenderer::draw_highlighted`]. [`ScatterChartRenderer::draw_frame`]
//! runs all three.

mod chart;
mod connector_tracker;
mod highlight_pass;
mod mark_pass;
mod render_config;
mod value_label_pass;

use std::sync::Arc;

use tracing::debug;

pub use chart::{ChartBounds, DEFAULT_MAX_VISIBLE_VALUE_COUNT, ScatterChart};
pub use connector_tracker::{ConnectorSegment, ConnectorTracker};
pub use render_config::{HighlightLineMode, ScatterRenderConfig};

use crate::core::{
    AnimationPhase, AxisSide, Highlight, ScatterSeries, ScatterSeriesCollection, Transformer,
    ValueFormatter, ViewportGate, ViewportHandler,
};
use crate::render::Canvas;

/// Chart-level collaborator the renderer reads from on every pass.
pub trait ScatterDataProvider {
    /// `None` while the host has no data attached.
    fn scatter_data(&self) -> Option<&ScatterSeriesCollection>;

    fn transformer(&self, axis_side: AxisSide) -> Option<&dyn Transformer>;

    fn chart_x_max(&self) -> f64;
    fn chart_y_max(&self) -> f64;
    fn chart_y_min(&self) -> f64;

    /// Label density limit at unit horizontal scale.
    fn max_visible_value_count(&self) -> usize;

    /// Formatter for series that do not carry their own.
    fn default_value_formatter(&self) -> Option<&dyn ValueFormatter> {
        None
    }
}

impl<T: ScatterDataProvider + ?Sized> ScatterDataProvider for &T {
    fn scatter_data(&self) -> Option<&ScatterSeriesCollection> {
        (**self).scatter_data()
    }

    fn transformer(&self, axis_side: AxisSide) -> Option<&dyn Transformer> {
        (**self).transformer(axis_side)
    }

    fn chart_x_max(&self) -> f64 {
        (**self).chart_x_max()
    }

    fn chart_y_max(&self) -> f64 {
        (**self).chart_y_max()
    }

    fn chart_y_min(&self) -> f64 {
        (**self).chart_y_min()
    }

    fn max_visible_value_count(&self) -> usize {
        (**self).max_visible_value_count()
    }

    fn default_value_formatter(&self) -> Option<&dyn ValueFormatter> {
        (**self).default_value_formatter()
    }
}

impl<T: ScatterDataProvider + ?Sized> ScatterDataProvider for Arc<T> {
    fn scatter_data(&self) -> Option<&ScatterSeriesCollection> {
        (**self).scatter_data()
    }

    fn transformer(&self, axis_side: AxisSide) -> Option<&dyn Transformer> {
        (**self).transformer(axis_side)
    }

    fn chart_x_max(&self) -> f64 {
        (**self).chart_x_max()
    }

    fn chart_y_max(&self) -> f64 {
        (**self).chart_y_max()
    }

    fn chart_y_min(&self) -> f64 {
        (**self).chart_y_min()
    }

    fn max_visible_value_count(&self) -> usize {
        (**self).max_visible_value_count()
    }

    fn default_value_formatter(&self) -> Option<&dyn ValueFormatter> {
        (**self).default_value_formatter()
    }
}

/// Counters describing what one pass emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScatterPassStats {
    pub series_drawn: usize,
    pub marks: usize,
    pub culled: usize,
    pub labels: usize,
    pub skipped_labels: usize,
    pub connectors: usize,
    pub highlights: usize,
}

impl ScatterPassStats {
    fn merge(&mut self, other: Self) {
        self.series_drawn += other.series_drawn;
        self.marks += other.marks;
        self.culled += other.culled;
        self.labels += other.labels;
        self.skipped_labels += other.skipped_labels;
        self.connectors += other.connectors;
        self.highlights += other.highlights;
    }
}

/// Renders scatter series: marks, value labels with connectors, and
/// highlight lines.
///
/// The renderer never mutates chart state; every pass reads the provider,
/// animation phase and viewport at call time and keeps no state between
/// frames.
#[derive(Debug, Clone)]
pub struct ScatterChartRenderer<P, V = ViewportHandler> {
    data_provider: Option<P>,
    animator: Option<AnimationPhase>,
    viewport: V,
    config: ScatterRenderConfig,
}

/// Collaborators resolved at the start of a pass.
struct PassInputs<'a, P> {
    provider: &'a P,
    data: &'a ScatterSeriesCollection,
    phase: AnimationPhase,
}

impl<P, V> ScatterChartRenderer<P, V> {
    #[must_use]
    pub fn new(data_provider: Option<P>, animator: Option<AnimationPhase>, viewport: V) -> Self {
        Self {
            data_provider,
            animator,
            viewport,
            config: ScatterRenderConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ScatterRenderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> ScatterRenderConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ScatterRenderConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn data_provider(&self) -> Option<&P> {
        self.data_provider.as_ref()
    }

    pub fn set_data_provider(&mut self, data_provider: Option<P>) {
        self.data_provider = data_provider;
    }

    #[must_use]
    pub fn animation_phase(&self) -> Option<AnimationPhase> {
        self.animator
    }

    pub fn set_animation_phase(&mut self, animator: Option<AnimationPhase>) {
        self.animator = animator;
    }

    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: V) {
        self.viewport = viewport;
    }
}

impl<P: ScatterDataProvider, V: ViewportGate> ScatterChartRenderer<P, V> {
    /// Runs the data, value and highlight passes in host order.
    pub fn draw_frame<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        highlights: &[Highlight],
    ) -> ScatterPassStats {
        let mut stats = self.draw_data(canvas);
        stats.merge(self.draw_values(canvas));
        stats.merge(self.draw_highlighted(canvas, highlights));
        stats
    }

    fn pass_inputs(&self, pass: &'static str) -> Option<PassInputs<'_, P>> {
        let Some(provider) = self.data_provider.as_ref() else {
            debug!(pass, "no data provider attached; skipping pass");
            return None;
        };
        let Some(phase) = self.animator else {
            debug!(pass, "no animation phase attached; skipping pass");
            return None;
        };
        let Some(data) = provider.scatter_data() else {
            debug!(pass, "data provider has no scatter data; skipping pass");
            return None;
        };
        Some(PassInputs {
            provider,
            data,
            phase,
        })
    }
}

impl<P: ScatterDataProvider> PassInputs<'_, P> {
    /// `true` when every series selected by `wanted` has a transformer.
    ///
    /// Passes check this before acquiring canvas state so a missing
    /// collaborator never produces a partial frame.
    fn transformers_ready(
        &self,
        pass: &'static str,
        wanted: impl Fn(&ScatterSeries) -> bool,
    ) -> bool {
        for (series_index, series) in self.data.series().iter().enumerate() {
            if wanted(series) && self.provider.transformer(series.axis_side).is_none() {
                debug!(
                    pass,
                    series_index,
                    axis_side = ?series.axis_side,
                    "missing transformer; skipping pass"
                );
                return false;
            }
        }
        true
    }
}
