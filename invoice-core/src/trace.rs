use crate::error::{RenderError, Result};
use crate::fonts::{FaceId, FontBook, FontFamily, FontStyle};
use crate::graphics::{Align, Color, PaintMode};
use crate::surface::{wrap_lines, Surface};

/// Points per millimetre. Page coordinates are millimetres while font
/// sizes stay in points, so measured widths divide by this factor.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// One recorded drawing command.
///
/// Text commands carry the cursor position they were issued at, so a
/// recorded stream pins both content and placement.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetCursor {
        x: f64,
        y: f64,
    },
    SelectFont {
        family: FontFamily,
        style: FontStyle,
        size: f64,
    },
    SetTextColor {
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        mode: PaintMode,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    },
    PaintPath {
        mode: PaintMode,
    },
    TextCell {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        text: String,
        align: Align,
        border: bool,
    },
    WrappedText {
        x: f64,
        y: f64,
        w: f64,
        line_height: f64,
        lines: Vec<String>,
        align: Align,
    },
    PushRotation {
        angle: f64,
        pivot_x: f64,
        pivot_y: f64,
    },
    PopRotation,
}

/// A [`Surface`] that records every drawing command instead of painting.
///
/// Used as the test double for the rendering collaborator and as a
/// dry-run backend. Text is measured through a real [`FontBook`], so
/// wrap and shrink decisions match what a painting backend with the
/// same metrics would do.
pub struct TraceSurface {
    page_width: f64,
    page_height: f64,
    cursor: (f64, f64),
    font: Option<(FontFamily, FontStyle, f64)>,
    rotation: Option<(f64, f64, f64)>,
    book: FontBook,
    ops: Vec<DrawOp>,
}

impl TraceSurface {
    /// A4 portrait surface (210 x 297).
    pub fn new() -> Self {
        Self::with_page_size(210.0, 297.0)
    }

    pub fn with_page_size(page_width: f64, page_height: f64) -> Self {
        TraceSurface {
            page_width,
            page_height,
            cursor: (0.0, 0.0),
            font: None,
            rotation: None,
            book: FontBook::new(),
            ops: Vec::new(),
        }
    }

    /// Register a TrueType face for use as `FontFamily::Custom`.
    pub fn register_face(&mut self, data: &[u8]) -> Result<FaceId> {
        self.book.register_face(data)
    }

    /// The commands recorded so far, in issue order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Consume the surface, returning the recorded commands.
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Whether a rotation transform is currently active.
    pub fn rotation_active(&self) -> bool {
        self.rotation.is_some()
    }

    /// The currently selected font, if any.
    pub fn current_font(&self) -> Option<(FontFamily, FontStyle, f64)> {
        self.font
    }
}

impl Default for TraceSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TraceSurface {
    fn page_width(&self) -> f64 {
        self.page_width
    }

    fn page_height(&self) -> f64 {
        self.page_height
    }

    fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
        self.ops.push(DrawOp::SetCursor { x, y });
    }

    fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    fn select_font(&mut self, family: FontFamily, style: FontStyle, size: f64) -> Result<()> {
        if !self.book.contains(family) {
            return Err(RenderError::FontUnavailable { family, style });
        }
        self.font = Some((family, style, size));
        self.ops.push(DrawOp::SelectFont { family, style, size });
        Ok(())
    }

    fn set_text_color(&mut self, color: Color) {
        self.ops.push(DrawOp::SetTextColor { color });
    }

    fn text_width(&self, text: &str) -> f64 {
        match self.font {
            Some((family, style, size)) => self
                .book
                .measure(text, family, style, size)
                .map(|w| w / PT_PER_MM)
                .unwrap_or(0.0),
            None => 0.0,
        }
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, mode: PaintMode) {
        self.ops.push(DrawOp::Rect { x, y, w, h, mode });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo { x, y });
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.ops.push(DrawOp::CurveTo { x1, y1, x2, y2, x3, y3 });
    }

    fn paint_path(&mut self, mode: PaintMode) {
        self.ops.push(DrawOp::PaintPath { mode });
    }

    fn draw_text_cell(&mut self, w: f64, h: f64, text: &str, align: Align, border: bool) {
        let (x, y) = self.cursor;
        self.ops.push(DrawOp::TextCell {
            x,
            y,
            w,
            h,
            text: text.to_string(),
            align,
            border,
        });
        self.cursor = (x + w, y);
    }

    fn draw_wrapped_text(&mut self, w: f64, line_height: f64, text: &str, align: Align) {
        let (x, y) = self.cursor;
        let lines = wrap_lines(text, w, |s| self.text_width(s));
        let line_count = lines.len() as f64;
        self.ops.push(DrawOp::WrappedText {
            x,
            y,
            w,
            line_height,
            lines,
            align,
        });
        self.cursor = (x, y + line_count * line_height);
    }

    fn push_rotation(&mut self, angle_degrees: f64, pivot_x: f64, pivot_y: f64) -> Result<()> {
        if self.rotation.is_some() {
            return Err(RenderError::UnbalancedRotation);
        }
        self.rotation = Some((angle_degrees, pivot_x, pivot_y));
        self.ops.push(DrawOp::PushRotation {
            angle: angle_degrees,
            pivot_x,
            pivot_y,
        });
        Ok(())
    }

    fn pop_rotation(&mut self) -> Result<()> {
        if self.rotation.is_none() {
            return Err(RenderError::UnbalancedRotation);
        }
        self.rotation = None;
        self.ops.push(DrawOp::PopRotation);
        Ok(())
    }
}
