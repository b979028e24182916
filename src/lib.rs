//! scatter-rs: scatter series rendering for a 2D charting surface.
//!
//! The crate turns data points into pixel-space marks, value labels with
//! optional connector lines, and highlight lines. Chart storage, the
//! value-to-pixel transform, viewport state, animation timing and the drawing
//! surface are consumed through small traits (see [`api::ScatterDataProvider`],
//! [`core::Transformer`], [`core::ViewportGate`] and [`render::Canvas`]), each
//! with a default implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ScatterChart, ScatterChartRenderer, ScatterDataProvider, ScatterRenderConfig};
pub use error::{ChartError, ChartResult, FormatError};
