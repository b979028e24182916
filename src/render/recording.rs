use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{PixelPoint, Rect};
use crate::render::{Canvas, Color, DashPattern, LabelFont, ShapePath, TextHAlign};

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    SaveState,
    RestoreState,
    ClipToRect(Rect),
    Translate {
        dx: f64,
        dy: f64,
    },
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f64),
    SetLineDash(Option<DashPattern>),
    FillRect(Rect),
    FillEllipse(Rect),
    FillPath(ShapePath),
    StrokeLineSegment {
        from: PixelPoint,
        to: PixelPoint,
    },
    /// Flush of the pending path built by `add_line_to_path`.
    StrokePath {
        segments: Vec<(PixelPoint, PixelPoint)>,
    },
    Text {
        text: String,
        anchor: PixelPoint,
        font_size_px: f64,
        color: Color,
        align: TextHAlign,
    },
}

impl DrawCommand {
    /// `true` for commands that put pixels on the surface.
    #[must_use]
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Self::FillRect(_)
                | Self::FillEllipse(_)
                | Self::FillPath(_)
                | Self::StrokeLineSegment { .. }
                | Self::StrokePath { .. }
                | Self::Text { .. }
        )
    }
}

/// Headless canvas that records every call.
///
/// Used by tests and by hosts that replay commands on their own surface. It
/// also tracks save/restore depth so unbalanced state handling is observable.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    pending_path: Vec<(PixelPoint, PixelPoint)>,
    depth: usize,
    max_depth: usize,
    unmatched_restores: usize,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.pending_path.clear();
        self.depth = 0;
        self.max_depth = 0;
        self.unmatched_restores = 0;
    }

    #[must_use]
    pub fn state_depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn max_state_depth(&self) -> usize {
        self.max_depth
    }

    /// Every save has been restored and no restore ran without a save.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.unmatched_restores == 0
    }

    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.commands.iter().filter(|cmd| cmd.is_paint()).count()
    }

    #[must_use]
    pub fn filled_ellipses(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillEllipse(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn stroked_segments(&self) -> Vec<(PixelPoint, PixelPoint)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokeLineSegment { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Segments of every flushed path, in flush order.
    #[must_use]
    pub fn path_segments(&self) -> Vec<(PixelPoint, PixelPoint)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokePath { segments } => Some(segments.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[must_use]
    pub fn texts(&self) -> Vec<(&str, PixelPoint)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, anchor, .. } => Some((text.as_str(), *anchor)),
                _ => None,
            })
            .collect()
    }

    /// Segments added to the path but not yet stroked.
    #[must_use]
    pub fn pending_path(&self) -> &[(PixelPoint, PixelPoint)] {
        &self.pending_path
    }
}

impl Canvas for RecordingCanvas {
    fn save_state(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::SaveState);
    }

    fn restore_state(&mut self) {
        if self.depth == 0 {
            warn!("restore_state without matching save_state");
            self.unmatched_restores += 1;
        } else {
            self.depth -= 1;
        }
        self.commands.push(DrawCommand::RestoreState);
    }

    fn clip_to_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClipToRect(rect));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn set_line_dash(&mut self, dash: Option<&DashPattern>) {
        self.commands.push(DrawCommand::SetLineDash(dash.cloned()));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    fn fill_ellipse_in_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillEllipse(rect));
    }

    fn fill_path(&mut self, path: &ShapePath) {
        self.commands.push(DrawCommand::FillPath(path.clone()));
    }

    fn stroke_line_segment(&mut self, from: PixelPoint, to: PixelPoint) {
        self.commands
            .push(DrawCommand::StrokeLineSegment { from, to });
    }

    fn add_line_to_path(&mut self, from: PixelPoint, to: PixelPoint) {
        self.pending_path.push((from, to));
    }

    fn stroke_path(&mut self) {
        let segments = std::mem::take(&mut self.pending_path);
        self.commands.push(DrawCommand::StrokePath { segments });
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: PixelPoint,
        font: &LabelFont,
        color: Color,
        align: TextHAlign,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            anchor,
            font_size_px: font.size_px,
            color,
            align,
        });
    }
}
