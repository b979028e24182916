use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;
use tracing::warn;

use crate::core::{PixelPoint, Rect};
use crate::error::{ChartError, ChartResult};
use crate::render::{Canvas, Color, DashPattern, LabelFont, PathElement, ShapePath, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoCanvasStats {
    pub fills: usize,
    pub strokes: usize,
    pub texts: usize,
}

/// Cairo + Pango + PangoCairo canvas.
///
/// Wraps a caller-owned `cairo::Context` (for example a GTK `DrawingArea`
/// callback) or an offscreen image surface created by [`CairoCanvas::offscreen`].
/// Cairo failures are logged and kept in [`CairoCanvas::last_error`]; drawing
/// continues so save/restore stay balanced.
#[derive(Debug)]
pub struct CairoCanvas {
    context: Context,
    surface: Option<ImageSurface>,
    last_error: Option<String>,
    stats: CairoCanvasStats,
    // Cairo has a single source pattern; fill and stroke colors are tracked
    // here and saved/restored alongside the context state.
    paint: PaintColors,
    paint_stack: Vec<PaintColors>,
}

#[derive(Debug, Clone, Copy)]
struct PaintColors {
    fill: Color,
    stroke: Color,
}

impl Default for PaintColors {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
        }
    }
}

impl CairoCanvas {
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self {
            context,
            surface: None,
            last_error: None,
            stats: CairoCanvasStats::default(),
            paint: PaintColors::default(),
            paint_stack: Vec::new(),
        }
    }

    /// Creates an ARGB32 surface cleared to `background`.
    pub fn offscreen(width: i32, height: i32, background: Color) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: f64::from(width),
                height: f64::from(height),
            });
        }
        background.validate()?;

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        apply_color(&context, background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        Ok(Self {
            context,
            surface: Some(surface),
            last_error: None,
            stats: CairoCanvasStats::default(),
            paint: PaintColors::default(),
            paint_stack: Vec::new(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn stats(&self) -> CairoCanvasStats {
        self.stats
    }

    fn record(&mut self, operation: &'static str, result: Result<(), cairo::Error>) {
        if let Err(err) = result {
            warn!(operation, error = %err, "cairo operation failed");
            self.last_error = Some(format!("{operation}: {err}"));
        }
    }

    fn fill_current_path(&mut self) {
        apply_color(&self.context, self.paint.fill);
        let result = self.context.fill();
        self.record("fill", result);
        self.stats.fills += 1;
    }
}

impl Canvas for CairoCanvas {
    fn save_state(&mut self) {
        let result = self.context.save();
        self.record("save", result);
        self.paint_stack.push(self.paint);
    }

    fn restore_state(&mut self) {
        let result = self.context.restore();
        self.record("restore", result);
        if let Some(paint) = self.paint_stack.pop() {
            self.paint = paint;
        }
    }

    fn clip_to_rect(&mut self, rect: Rect) {
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.context.clip();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.paint.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.paint.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_dash(&mut self, dash: Option<&DashPattern>) {
        match dash {
            Some(dash) => self.context.set_dash(dash.lengths(), dash.phase()),
            None => self.context.set_dash(&[], 0.0),
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.context.new_path();
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.fill_current_path();
    }

    fn fill_ellipse_in_rect(&mut self, rect: Rect) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let center = rect.center();
        self.context.new_path();
        let saved = self.context.save();
        self.record("save", saved);
        self.context.translate(center.x, center.y);
        self.context.scale(rect.width / 2.0, rect.height / 2.0);
        self.context.arc(0.0, 0.0, 1.0, 0.0, TAU);
        let restored = self.context.restore();
        self.record("restore", restored);
        self.fill_current_path();
    }

    fn fill_path(&mut self, path: &ShapePath) {
        self.context.new_path();
        for element in path.elements() {
            match *element {
                PathElement::MoveTo(point) => self.context.move_to(point.x, point.y),
                PathElement::LineTo(point) => self.context.line_to(point.x, point.y),
                PathElement::Close => self.context.close_path(),
            }
        }
        self.fill_current_path();
    }

    fn stroke_line_segment(&mut self, from: PixelPoint, to: PixelPoint) {
        self.context.new_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        apply_color(&self.context, self.paint.stroke);
        let result = self.context.stroke();
        self.record("stroke", result);
        self.stats.strokes += 1;
    }

    fn add_line_to_path(&mut self, from: PixelPoint, to: PixelPoint) {
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
    }

    fn stroke_path(&mut self) {
        apply_color(&self.context, self.paint.stroke);
        let result = self.context.stroke();
        self.record("stroke", result);
        self.stats.strokes += 1;
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: PixelPoint,
        font: &LabelFont,
        color: Color,
        align: TextHAlign,
    ) {
        // Text must not join a connector path that is still pending.
        let pending = self.context.copy_path();
        self.context.new_path();

        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description =
            FontDescription::from_string(&format!("{} {}", font.family, font.size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);

        let (text_width, _text_height) = layout.pixel_size();
        let x = match align {
            TextHAlign::Left => anchor.x,
            TextHAlign::Center => anchor.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => anchor.x - f64::from(text_width),
        };

        apply_color(&self.context, color);
        self.context.move_to(x, anchor.y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.stats.texts += 1;

        self.context.new_path();
        match pending {
            Ok(path) => self.context.append_path(&path),
            Err(err) => self.record("copy_path", Err(err)),
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
