use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AffineTransform, AxisSide, DecimalValueFormatter, Rect, ScatterSeries,
    ScatterSeriesCollection, Transformer, ValueFormatter, ValueTransformer,
};
use crate::error::{ChartError, ChartResult};

use super::ScatterDataProvider;

/// Label density limit used when the host does not set one.
pub const DEFAULT_MAX_VISIBLE_VALUE_COUNT: usize = 100;

/// Aggregate chart extents consumed by the passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    #[serde(default = "default_max_visible_value_count")]
    pub max_visible_value_count: usize,
}

impl ChartBounds {
    /// Extents over every series' points; an empty collection yields zeros.
    #[must_use]
    pub fn from_collection(data: &ScatterSeriesCollection) -> Self {
        let mut x_range: Option<(i64, i64)> = None;
        let mut y_range: Option<(f64, f64)> = None;
        for series in data.series().iter().filter(|series| !series.is_empty()) {
            let points = series.points();
            let first = points[0].x_index;
            let last = points[points.len() - 1].x_index;
            x_range = Some(match x_range {
                Some((min, max)) => (min.min(first), max.max(last)),
                None => (first, last),
            });
            y_range = Some(match y_range {
                Some((min, max)) => (min.min(series.y_min()), max.max(series.y_max())),
                None => (series.y_min(), series.y_max()),
            });
        }

        let (x_min, x_max) = x_range.unwrap_or((0, 0));
        let (y_min, y_max) = y_range.unwrap_or((0.0, 0.0));
        Self {
            x_min: x_min as f64,
            x_max: x_max as f64,
            y_min,
            y_max,
            max_visible_value_count: DEFAULT_MAX_VISIBLE_VALUE_COUNT,
        }
    }

    #[must_use]
    pub fn with_max_visible_value_count(mut self, count: usize) -> Self {
        self.max_visible_value_count = count;
        self
    }
}

/// Self-contained [`ScatterDataProvider`]: owned series, one transformer per
/// axis side, and chart bounds.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    data: Option<ScatterSeriesCollection>,
    primary: Option<ValueTransformer>,
    secondary: Option<ValueTransformer>,
    bounds: ChartBounds,
    default_formatter: DecimalValueFormatter,
}

impl ScatterChart {
    /// Bounds are derived from `data`; transformers start unset.
    #[must_use]
    pub fn new(data: ScatterSeriesCollection) -> Self {
        let bounds = ChartBounds::from_collection(&data);
        Self {
            data: Some(data),
            primary: None,
            secondary: None,
            bounds,
            default_formatter: DecimalValueFormatter::default(),
        }
    }

    /// Provider with no data attached; every pass draws nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: None,
            primary: None,
            secondary: None,
            bounds: ChartBounds::from_collection(&ScatterSeriesCollection::default()),
            default_formatter: DecimalValueFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_transformer(mut self, axis_side: AxisSide, transformer: ValueTransformer) -> Self {
        match axis_side {
            AxisSide::Primary => self.primary = Some(transformer),
            AxisSide::Secondary => self.secondary = Some(transformer),
        }
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: ChartBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_max_visible_value_count(mut self, count: usize) -> Self {
        self.bounds.max_visible_value_count = count;
        self
    }

    #[must_use]
    pub fn with_default_formatter(mut self, formatter: DecimalValueFormatter) -> Self {
        self.default_formatter = formatter;
        self
    }

    #[must_use]
    pub fn data(&self) -> Option<&ScatterSeriesCollection> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut ScatterSeriesCollection> {
        self.data.as_mut()
    }

    pub fn set_data(&mut self, data: Option<ScatterSeriesCollection>) {
        self.data = data;
        self.refresh_bounds();
    }

    pub fn push_series(&mut self, series: ScatterSeries) {
        self.data
            .get_or_insert_with(ScatterSeriesCollection::default)
            .push(series);
        self.refresh_bounds();
    }

    #[must_use]
    pub fn bounds(&self) -> ChartBounds {
        self.bounds
    }

    /// Recomputes extents after the data changed, keeping the density limit.
    pub fn refresh_bounds(&mut self) {
        let max_visible_value_count = self.bounds.max_visible_value_count;
        self.bounds = match &self.data {
            Some(data) => ChartBounds::from_collection(data),
            None => ChartBounds::from_collection(&ScatterSeriesCollection::default()),
        }
        .with_max_visible_value_count(max_visible_value_count);
    }

    /// Fits transformers for both axis sides onto `content` using the chart
    /// bounds. Series on each side are fitted to their own value range.
    pub fn fit_transformers(&mut self, content: Rect) -> ChartResult<()> {
        let Some(data) = &self.data else {
            return Err(ChartError::InvalidData(
                "cannot fit transformers without data".to_owned(),
            ));
        };

        let x_min = self.bounds.x_min;
        let x_max = if self.bounds.x_max > x_min {
            self.bounds.x_max
        } else {
            x_min + 1.0
        };

        let side_ranges: Vec<(AxisSide, f64, f64)> = [AxisSide::Primary, AxisSide::Secondary]
            .into_iter()
            .filter_map(|side| {
                data.series()
                    .iter()
                    .filter(|series| series.axis_side == side && !series.is_empty())
                    .map(|series| (series.y_min(), series.y_max()))
                    .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
                    .map(|(y_min, y_max)| (side, y_min, y_max))
            })
            .collect();

        for (side, y_min, y_max) in side_ranges {
            let y_max = if y_max > y_min { y_max } else { y_min + 1.0 };
            let matrix = AffineTransform::from_value_ranges(x_min, x_max, y_min, y_max, content)?;
            debug!(axis_side = ?side, x_min, x_max, y_min, y_max, "fitted scatter transformer");
            *self.slot_mut(side) = Some(ValueTransformer::new(matrix));
        }
        Ok(())
    }

    fn slot_mut(&mut self, side: AxisSide) -> &mut Option<ValueTransformer> {
        match side {
            AxisSide::Primary => &mut self.primary,
            AxisSide::Secondary => &mut self.secondary,
        }
    }
}

impl ScatterDataProvider for ScatterChart {
    fn scatter_data(&self) -> Option<&ScatterSeriesCollection> {
        self.data.as_ref()
    }

    fn transformer(&self, axis_side: AxisSide) -> Option<&dyn Transformer> {
        let slot = match axis_side {
            AxisSide::Primary => self.primary.as_ref(),
            AxisSide::Secondary => self.secondary.as_ref(),
        };
        slot.map(|transformer| transformer as &dyn Transformer)
    }

    fn chart_x_max(&self) -> f64 {
        self.bounds.x_max
    }

    fn chart_y_max(&self) -> f64 {
        self.bounds.y_max
    }

    fn chart_y_min(&self) -> f64 {
        self.bounds.y_min
    }

    fn max_visible_value_count(&self) -> usize {
        self.bounds.max_visible_value_count
    }

    fn default_value_formatter(&self) -> Option<&dyn ValueFormatter> {
        Some(&self.default_formatter)
    }
}

fn default_max_visible_value_count() -> usize {
    DEFAULT_MAX_VISIBLE_VALUE_COUNT
}
