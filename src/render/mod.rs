mod guard;
mod path;
mod primitives;
mod recording;

pub use guard::CanvasStateGuard;
pub use path::{PathElement, ShapePath};
pub use primitives::{Color, DashPattern, LabelFont, TextHAlign};
pub use recording::{DrawCommand, RecordingCanvas};

use crate::core::{PixelPoint, Rect};

/// Drawing surface the scatter passes issue commands against.
///
/// Methods are infallible: a backend that can fail records the failure itself
/// (see `CairoCanvas::last_error`) so that a pass always runs to completion
/// and keeps save/restore calls balanced.
///
/// Graphics state covers the transform, clip, colors, line width and dash
/// pattern. It is pushed by `save_state` and popped by `restore_state`; prefer
/// [`CanvasStateGuard`] over calling the pair by hand.
pub trait Canvas {
    fn save_state(&mut self);
    fn restore_state(&mut self);

    fn clip_to_rect(&mut self, rect: Rect);
    fn translate(&mut self, dx: f64, dy: f64);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    /// `None` restores a solid stroke.
    fn set_line_dash(&mut self, dash: Option<&DashPattern>);

    fn fill_rect(&mut self, rect: Rect);
    fn fill_ellipse_in_rect(&mut self, rect: Rect);
    fn fill_path(&mut self, path: &ShapePath);
    fn stroke_line_segment(&mut self, from: PixelPoint, to: PixelPoint);

    /// Appends a segment to the pending path without drawing it.
    fn add_line_to_path(&mut self, from: PixelPoint, to: PixelPoint);
    /// Strokes and clears the pending path.
    fn stroke_path(&mut self);

    /// Draws `text` with its top edge at `anchor.y`, aligned horizontally on
    /// `anchor.x`.
    fn draw_text(
        &mut self,
        text: &str,
        anchor: PixelPoint,
        font: &LabelFont,
        color: Color,
        align: TextHAlign,
    );
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoCanvas, CairoCanvasStats};
