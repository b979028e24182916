pub mod animation;
pub mod format;
pub mod highlight;
pub mod series;
pub mod transform;
pub mod types;
pub mod viewport;

pub use animation::{AnimationPhase, reveal_count};
pub use format::{DecimalValueFormatter, ValueFormatter};
pub use highlight::Highlight;
pub use series::{
    AxisSide, ColorLookup, MarkShape, ScatterSeries, ScatterSeriesCollection,
    SharedValueFormatter,
};
pub use transform::{AffineTransform, Transformer, ValueTransformer};
pub use types::{DataPoint, PixelPoint, Rect, ValuePoint};
pub use viewport::{ViewportGate, ViewportHandler};
