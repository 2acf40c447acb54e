use crate::error::Result;
use crate::fonts::{FontFamily, FontStyle};
use crate::graphics::{Align, Color, PaintMode};

/// Abstract drawing target for one page.
///
/// Implemented by the document-rendering collaborator (and by
/// [`TraceSurface`](crate::TraceSurface) for tests and dry runs). The
/// coordinate system has its origin at the top-left corner with y
/// increasing downward; units are the collaborator's page units, A4
/// being 210 x 297.
///
/// Text operations draw with the most recently selected font and color.
/// `draw_text_cell` paints at the cursor and advances it right by the
/// cell width, so consecutive cells form a row. `draw_wrapped_text`
/// word-wraps into lines of the given width and leaves the cursor below
/// the last line, at the original x.
pub trait Surface {
    fn page_width(&self) -> f64;
    fn page_height(&self) -> f64;

    /// Move the text cursor to an absolute position.
    fn set_cursor(&mut self, x: f64, y: f64);

    /// Current cursor position.
    fn cursor(&self) -> (f64, f64);

    /// Select the font used by subsequent text operations.
    ///
    /// Fails with `FontUnavailable` when the surface cannot provide the
    /// requested family, e.g. an unregistered custom face.
    fn select_font(&mut self, family: FontFamily, style: FontStyle, size: f64) -> Result<()>;

    /// Set the fill color used by subsequent text operations.
    fn set_text_color(&mut self, color: Color);

    /// Width of `text` in page units, measured with the selected font.
    fn text_width(&self, text: &str) -> f64;

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, mode: PaintMode);

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Begin a path at (x, y). The path is painted by `paint_path`.
    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Cubic Bezier segment with control points (x1, y1) and (x2, y2)
    /// ending at (x3, y3).
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64);

    fn paint_path(&mut self, mode: PaintMode);

    /// Draw a single line of text in a cell anchored at the cursor.
    ///
    /// Advances the cursor right by `w`.
    fn draw_text_cell(&mut self, w: f64, h: f64, text: &str, align: Align, border: bool);

    /// Word-wrap `text` into lines of width `w` and draw them stacked
    /// at the cursor, each `line_height` apart.
    ///
    /// Leaves the cursor below the last line, at the original x.
    fn draw_wrapped_text(&mut self, w: f64, line_height: f64, text: &str, align: Align);

    /// Rotate the coordinate system by `angle_degrees` counterclockwise
    /// around the pivot. At most one rotation may be active; a nested
    /// push fails with `UnbalancedRotation`.
    fn push_rotation(&mut self, angle_degrees: f64, pivot_x: f64, pivot_y: f64) -> Result<()>;

    /// Restore the unrotated coordinate system.
    fn pop_rotation(&mut self) -> Result<()>;
}

/// Word-wrap `text` into lines no wider than `avail_width`.
///
/// Lines break at whitespace; a single word wider than the available
/// width is broken between characters so no line overflows. Embedded
/// newlines force a break. Always returns at least one line.
pub fn wrap_lines(text: &str, avail_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for para in text.split('\n') {
        wrap_paragraph(para.trim(), avail_width, &measure, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Word-wrap a single paragraph into lines, appending to `out`.
fn wrap_paragraph(
    text: &str,
    avail_width: f64,
    measure: &impl Fn(&str) -> f64,
    out: &mut Vec<String>,
) {
    if text.is_empty() {
        out.push(String::new());
        return;
    }
    let mut current = String::new();
    for word in text.split_whitespace() {
        let joined = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&joined) <= avail_width {
            current = joined;
            continue;
        }
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if measure(word) <= avail_width {
            current = word.to_string();
        } else {
            current = break_long_word(word, avail_width, measure, out);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Break a word wider than the line between characters.
///
/// Full pieces are pushed to `out`; the trailing piece is returned so
/// following words can continue on its line.
fn break_long_word(
    word: &str,
    avail_width: f64,
    measure: &impl Fn(&str) -> f64,
    out: &mut Vec<String>,
) -> String {
    let mut piece = String::new();
    for ch in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(ch);
        if !piece.is_empty() && measure(&candidate) > avail_width {
            out.push(piece);
            piece = ch.to_string();
        } else {
            piece = candidate;
        }
    }
    piece
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One unit per character keeps the arithmetic obvious.
    fn char_count(text: &str) -> f64 {
        text.chars().count() as f64
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_lines("hello world", 20.0, char_count);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn text_wraps_at_word_boundaries() {
        let lines = wrap_lines("alpha beta gamma", 10.0, char_count);
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        let lines = wrap_lines("", 10.0, char_count);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn newlines_force_breaks() {
        let lines = wrap_lines("one\ntwo three", 20.0, char_count);
        assert_eq!(lines, vec!["one", "two three"]);
    }

    #[test]
    fn oversized_word_breaks_between_characters() {
        let lines = wrap_lines("abcdefghij", 4.0, char_count);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn word_after_broken_word_continues_on_its_line() {
        let lines = wrap_lines("abcdef xy", 4.0, char_count);
        assert_eq!(lines, vec!["abcd", "ef", "xy"]);
    }

    #[test]
    fn whitespace_collapses_between_words() {
        let lines = wrap_lines("a    b", 10.0, char_count);
        assert_eq!(lines, vec!["a b"]);
    }
}
