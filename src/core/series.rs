use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::{DataPoint, ValueFormatter};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DashPattern, LabelFont, ShapePath};

/// Which value-to-pixel transformer a series is projected through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisSide {
    #[default]
    Primary,
    Secondary,
}

/// Geometry drawn for each scatter point.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MarkShape {
    #[default]
    Square,
    Circle,
    Cross,
    Triangle,
    /// Caller outline; an empty path counts as "not configured".
    Custom(Arc<ShapePath>),
}

/// Per-point color lookup.
pub trait ColorLookup {
    fn color_at(&self, index: usize) -> Color;
}

pub type SharedValueFormatter = Arc<dyn ValueFormatter + Send + Sync>;

/// One scatter data set plus its visual configuration.
///
/// Points are kept in insertion order, which is also x order; `y_min`/`y_max`
/// are maintained on every mutation.
#[derive(Clone)]
pub struct ScatterSeries {
    label: String,
    points: Vec<DataPoint>,
    y_min: f64,
    y_max: f64,

    pub visible: bool,
    pub highlight_enabled: bool,
    pub axis_side: AxisSide,

    mark_shape: MarkShape,
    mark_size: f64,
    colors: SmallVec<[Color; 4]>,

    pub draw_value_labels: bool,
    pub value_font: LabelFont,
    pub value_text_color: Color,
    value_formatter: Option<SharedValueFormatter>,
    pub value_is_index: bool,
    pub connect_value_labels: bool,
    pub connector_color: Option<Color>,

    pub highlight_color: Color,
    highlight_line_width: f64,
    pub highlight_dash: Option<DashPattern>,
    pub draw_vertical_highlight_indicator: bool,
    pub draw_horizontal_highlight_indicator: bool,
}

impl ScatterSeries {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
            y_min: 0.0,
            y_max: 0.0,
            visible: true,
            highlight_enabled: true,
            axis_side: AxisSide::Primary,
            mark_shape: MarkShape::Square,
            mark_size: 10.0,
            colors: smallvec![Color::SERIES_DEFAULT],
            draw_value_labels: true,
            value_font: LabelFont::default(),
            value_text_color: Color::BLACK,
            value_formatter: None,
            value_is_index: false,
            connect_value_labels: false,
            connector_color: None,
            highlight_color: Color::HIGHLIGHT,
            highlight_line_width: 0.5,
            highlight_dash: None,
            draw_vertical_highlight_indicator: true,
            draw_horizontal_highlight_indicator: true,
        }
    }

    /// Builds a series from points that must be ordered by `x_index`.
    pub fn with_points(label: impl Into<String>, points: Vec<DataPoint>) -> ChartResult<Self> {
        let mut series = Self::new(label);
        series.set_points(points)?;
        Ok(series)
    }

    /// Replaces all points; rejects non-finite values and decreasing `x_index`.
    pub fn set_points(&mut self, points: Vec<DataPoint>) -> ChartResult<()> {
        for pair in points.windows(2) {
            if pair[1].x_index < pair[0].x_index {
                return Err(ChartError::InvalidData(
                    "scatter points must be ordered by x_index".to_owned(),
                ));
            }
        }
        if points.iter().any(|point| !point.value.is_finite()) {
            return Err(ChartError::InvalidData(
                "scatter point values must be finite".to_owned(),
            ));
        }
        self.points = points;
        self.recompute_range();
        Ok(())
    }

    /// Appends a point at or after the current last `x_index`.
    pub fn push(&mut self, point: DataPoint) -> ChartResult<()> {
        if !point.value.is_finite() {
            return Err(ChartError::InvalidData(
                "scatter point values must be finite".to_owned(),
            ));
        }
        if let Some(last) = self.points.last() {
            if point.x_index < last.x_index {
                return Err(ChartError::InvalidData(
                    "point x_index must be >= latest x_index".to_owned(),
                ));
            }
        }
        if self.points.is_empty() {
            self.y_min = point.value;
            self.y_max = point.value;
        } else {
            self.y_min = self.y_min.min(point.value);
            self.y_max = self.y_max.max(point.value);
        }
        self.points.push(point);
        Ok(())
    }

    fn recompute_range(&mut self) {
        let mut values = self.points.iter().map(|point| point.value);
        let Some(first) = values.next() else {
            self.y_min = 0.0;
            self.y_max = 0.0;
            return;
        };
        let (min, max) = values.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        self.y_min = min;
        self.y_max = max;
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<DataPoint> {
        self.points.get(index).copied()
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// `y_min == 0 && y_max == 0`: the mark and value passes skip the series.
    ///
    /// This also classifies a series whose values are all zero (or an empty
    /// series) as degenerate.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.y_min == 0.0 && self.y_max == 0.0
    }

    /// Value of the first point at `x_index`, if any.
    #[must_use]
    pub fn y_value_for_x_index(&self, x_index: i64) -> Option<f64> {
        let start = self.points.partition_point(|point| point.x_index < x_index);
        self.points
            .get(start)
            .filter(|point| point.x_index == x_index)
            .map(|point| point.value)
    }

    #[must_use]
    pub fn mark_shape(&self) -> &MarkShape {
        &self.mark_shape
    }

    #[must_use]
    pub fn with_mark_shape(mut self, shape: MarkShape) -> Self {
        self.mark_shape = shape;
        self
    }

    #[must_use]
    pub fn mark_size(&self) -> f64 {
        self.mark_size
    }

    pub fn with_mark_size(mut self, size: f64) -> ChartResult<Self> {
        if !size.is_finite() || size < 0.0 {
            return Err(ChartError::InvalidData(
                "mark size must be finite and >= 0".to_owned(),
            ));
        }
        self.mark_size = size;
        Ok(self)
    }

    /// Sets the color cycle used by [`ColorLookup::color_at`].
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> ChartResult<Self> {
        let colors: SmallVec<[Color; 4]> = colors.into_iter().collect();
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "series needs at least one color".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        self.colors = colors;
        Ok(self)
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[must_use]
    pub fn value_formatter(&self) -> Option<&SharedValueFormatter> {
        self.value_formatter.as_ref()
    }

    #[must_use]
    pub fn with_value_formatter(mut self, formatter: SharedValueFormatter) -> Self {
        self.value_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn highlight_line_width(&self) -> f64 {
        self.highlight_line_width
    }

    pub fn with_highlight_line_width(mut self, width: f64) -> ChartResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "highlight line width must be finite and > 0".to_owned(),
            ));
        }
        self.highlight_line_width = width;
        Ok(self)
    }

    /// Color used for value-label connectors when this series sits at
    /// `series_index` in its collection.
    #[must_use]
    pub fn resolved_connector_color(&self, series_index: usize) -> Color {
        self.connector_color.unwrap_or_else(|| self.color_at(series_index))
    }
}

impl ColorLookup for ScatterSeries {
    /// Cycles through the configured colors.
    fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }
}

impl fmt::Debug for ScatterSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScatterSeries")
            .field("label", &self.label)
            .field("points", &self.points.len())
            .field("y_min", &self.y_min)
            .field("y_max", &self.y_max)
            .field("visible", &self.visible)
            .field("axis_side", &self.axis_side)
            .field("mark_shape", &self.mark_shape)
            .field("mark_size", &self.mark_size)
            .field("draw_value_labels", &self.draw_value_labels)
            .field("connect_value_labels", &self.connect_value_labels)
            .field("has_value_formatter", &self.value_formatter.is_some())
            .finish_non_exhaustive()
    }
}

/// Ordered, exclusively owned scatter series.
#[derive(Debug, Clone, Default)]
pub struct ScatterSeriesCollection {
    series: Vec<ScatterSeries>,
}

impl ScatterSeriesCollection {
    #[must_use]
    pub fn new(series: Vec<ScatterSeries>) -> Self {
        Self { series }
    }

    pub fn push(&mut self, series: ScatterSeries) {
        self.series.push(series);
    }

    #[must_use]
    pub fn series(&self) -> &[ScatterSeries] {
        &self.series
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScatterSeries> {
        self.series.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ScatterSeries> {
        self.series.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Sum of point counts across every series, visible or not.
    #[must_use]
    pub fn total_value_count(&self) -> usize {
        self.series.iter().map(ScatterSeries::len).sum()
    }
}

impl FromIterator<ScatterSeries> for ScatterSeriesCollection {
    fn from_iter<I: IntoIterator<Item = ScatterSeries>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
