use std::f64::consts::SQRT_2;

use log::{debug, trace};

use crate::columns::ColumnSpec;
use crate::error::{RenderError, Result};
use crate::fonts::{FontFamily, FontStyle};
use crate::graphics::{Align, Color, PaintMode};
use crate::invoice::{fmt_amount, InvoiceData};
use crate::surface::Surface;

/// Page margin on all sides.
const MARGIN: f64 = 10.0;
/// Vertical step between stacked address lines.
const LINE_STEP: f64 = 4.0;

const BADGE_TOP: f64 = 10.0;
const BADGE_HEIGHT: f64 = 13.0;
const BADGE_RADIUS: f64 = 2.5;
const BADGE_GAP: f64 = 2.0;
const NUMBER_BADGE_WIDTH: f64 = 50.0;
const DATE_BADGE_WIDTH: f64 = 30.0;
const PAGE_BADGE_WIDTH: f64 = 16.0;
/// The invoice number starts at this size and shrinks to fit its badge.
const NUMBER_START_SIZE: f64 = 12.0;

const STRIP_TOP: f64 = 74.0;
const STRIP_BOX_WIDTH: f64 = 62.0;
const STRIP_BOX_HEIGHT: f64 = 12.0;

const TABLE_TOP: f64 = 90.0;
const TABLE_BOTTOM: f64 = 250.0;
const TABLE_HEADER_HEIGHT: f64 = 6.0;
/// Vertical step from one item row to the next.
const ROW_HEIGHT: f64 = 4.0;

const WATERMARK_SIZE: f64 = 50.0;
const WATERMARK_Y: f64 = 190.0;

/// Smallest size the auto-shrink fit may select.
const MIN_FONT_SIZE: f64 = 4.0;

/// Control-point offset factor for a quarter-circle cubic Bezier:
/// 4/3 * (sqrt(2) - 1).
const ARC_K: f64 = 0.552_284_749_8;

/// Date format used in the date badge and the info strip.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Summary of one rendered page, returned by
/// [`InvoiceRenderer::render`].
///
/// Carries the computed totals and the number of item rows placed, so a
/// caller splitting a long invoice across pages knows where to resume.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub page_number: u32,
    pub items_rendered: usize,
    pub net_total: f64,
    pub vat_amount: f64,
    pub gross_total: f64,
}

/// Mutable bookkeeping for one render pass.
struct RenderState {
    /// Top of the next item row.
    row_y: f64,
    items_drawn: usize,
}

impl RenderState {
    fn new() -> Self {
        RenderState {
            row_y: TABLE_TOP + TABLE_HEADER_HEIGHT,
            items_drawn: 0,
        }
    }
}

/// Paints the fixed one-page invoice layout onto a [`Surface`].
///
/// Configuration is per instance; `render` itself never mutates the
/// renderer or the invoice, so one renderer can serve many invoices.
/// There is no pagination: every line item is placed on the current
/// page, and callers wanting more pages slice `line_items` themselves
/// and render again with a higher `page_number`.
#[derive(Debug, Clone)]
pub struct InvoiceRenderer {
    /// Product-table schema.
    pub columns: ColumnSpec,
    /// Font family used for the whole page.
    pub family: FontFamily,
    /// Number shown in the page badge.
    pub page_number: u32,
    /// Glyph drawn left of each total amount.
    pub currency: String,
    /// Reject negative amounts instead of rendering them.
    pub strict: bool,
}

impl Default for InvoiceRenderer {
    fn default() -> Self {
        InvoiceRenderer {
            columns: ColumnSpec::default(),
            family: FontFamily::Helvetica,
            page_number: 1,
            currency: "€".to_string(),
            strict: false,
        }
    }
}

impl InvoiceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `invoice` onto one page of `surface`.
    ///
    /// Issues a strictly ordered sequence of drawing commands; two
    /// renders of equal data produce identical sequences. On error
    /// (missing font, strict-mode rejection) nothing has been placed.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        invoice: &InvoiceData,
    ) -> Result<RenderedPage> {
        debug!(
            "rendering invoice {} ({} items)",
            invoice.invoice_number,
            invoice.line_items.len()
        );
        self.check_amounts(invoice)?;
        self.preflight_fonts(surface)?;

        // Watermark first, so page content paints over it
        if let Some(text) = &invoice.watermark_text {
            self.draw_watermark(surface, text)?;
        }

        self.draw_seller_header(surface, invoice)?;
        self.draw_badges(surface, invoice)?;
        self.draw_buyer_block(surface, invoice)?;
        self.draw_info_strip(surface, invoice)?;

        let mut state = RenderState::new();
        self.draw_table(surface, invoice, &mut state)?;
        self.draw_totals(surface, invoice)?;

        Ok(RenderedPage {
            page_number: self.page_number,
            items_rendered: state.items_drawn,
            net_total: invoice.net_total(),
            vat_amount: invoice.vat_amount(),
            gross_total: invoice.gross_total(),
        })
    }

    // ── font helpers ─────────────────────────────────────────────────

    fn bold<S: Surface>(&self, surface: &mut S, size: f64) -> Result<()> {
        surface.select_font(self.family, FontStyle::Bold, size)
    }

    fn regular<S: Surface>(&self, surface: &mut S, size: f64) -> Result<()> {
        surface.select_font(self.family, FontStyle::Regular, size)
    }

    /// Select every style the layout uses, so a missing font fails the
    /// render before anything is placed.
    fn preflight_fonts<S: Surface>(&self, surface: &mut S) -> Result<()> {
        self.bold(surface, NUMBER_START_SIZE)?;
        self.regular(surface, 9.0)?;
        Ok(())
    }

    fn check_amounts(&self, invoice: &InvoiceData) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        if invoice.tax_rate < 0.0 {
            return Err(RenderError::InvalidAmount {
                field: "tax_rate",
                value: invoice.tax_rate,
            });
        }
        for item in &invoice.line_items {
            if item.unit_price < 0.0 {
                return Err(RenderError::InvalidAmount {
                    field: "unit_price",
                    value: item.unit_price,
                });
            }
            if item.quantity < 0.0 {
                return Err(RenderError::InvalidAmount {
                    field: "quantity",
                    value: item.quantity,
                });
            }
        }
        Ok(())
    }

    // ── watermark ────────────────────────────────────────────────────

    fn draw_watermark<S: Surface>(&self, surface: &mut S, text: &str) -> Result<()> {
        surface.select_font(self.family, FontStyle::Bold, WATERMARK_SIZE)?;
        surface.set_text_color(Color::gray(0.8));

        // Rotated 45 degrees, the text spans width/sqrt(2) horizontally;
        // centering uses that projected span.
        let width = surface.text_width(text);
        let x = (surface.page_width() - width / SQRT_2) / 2.0;
        surface.push_rotation(45.0, x, WATERMARK_Y)?;
        surface.set_cursor(x, WATERMARK_Y);
        surface.draw_text_cell(width, WATERMARK_SIZE, text, Align::Left, false);
        surface.pop_rotation()?;

        surface.set_text_color(Color::black());
        debug!("watermark '{}' at x={:.2}", text, x);
        Ok(())
    }

    // ── seller header ────────────────────────────────────────────────

    fn draw_seller_header<S: Surface>(&self, surface: &mut S, invoice: &InvoiceData) -> Result<()> {
        self.bold(surface, 12.0)?;
        surface.set_cursor(MARGIN, 10.0);
        surface.draw_text_cell(90.0, 5.0, &invoice.seller.name, Align::Left, false);

        self.regular(surface, 9.0)?;
        for (i, line) in invoice.seller.lines.iter().enumerate() {
            surface.set_cursor(MARGIN, 16.0 + i as f64 * LINE_STEP);
            surface.draw_text_cell(90.0, LINE_STEP, line, Align::Left, false);
        }
        Ok(())
    }

    // ── info badges ──────────────────────────────────────────────────

    fn draw_badges<S: Surface>(&self, surface: &mut S, invoice: &InvoiceData) -> Result<()> {
        let right = surface.page_width() - MARGIN;
        let page_x = right - PAGE_BADGE_WIDTH;
        let date_x = page_x - BADGE_GAP - DATE_BADGE_WIDTH;
        let number_x = date_x - BADGE_GAP - NUMBER_BADGE_WIDTH;

        // The number keeps its starting size when it fits and steps
        // down one point at a time when it does not.
        self.bold(surface, NUMBER_START_SIZE)?;
        let width_at_start = surface.text_width(&invoice.invoice_number);
        let number_size =
            fit_font_size(NUMBER_START_SIZE, width_at_start, NUMBER_BADGE_WIDTH - 4.0);
        if number_size < NUMBER_START_SIZE {
            trace!("invoice number shrunk to {}pt", number_size);
        }

        self.draw_badge(
            surface,
            number_x,
            NUMBER_BADGE_WIDTH,
            "INVOICE NO",
            &invoice.invoice_number,
            FontStyle::Bold,
            number_size,
        )?;
        self.draw_badge(
            surface,
            date_x,
            DATE_BADGE_WIDTH,
            "DATE",
            &invoice.issue_date.format(DATE_FORMAT).to_string(),
            FontStyle::Regular,
            10.0,
        )?;
        self.draw_badge(
            surface,
            page_x,
            PAGE_BADGE_WIDTH,
            "PAGE",
            &self.page_number.to_string(),
            FontStyle::Regular,
            10.0,
        )?;
        Ok(())
    }

    /// One rounded badge: centered label row, divider, centered value row.
    fn draw_badge<S: Surface>(
        &self,
        surface: &mut S,
        x: f64,
        w: f64,
        label: &str,
        value: &str,
        value_style: FontStyle,
        value_size: f64,
    ) -> Result<()> {
        rounded_rect(surface, x, BADGE_TOP, w, BADGE_HEIGHT, BADGE_RADIUS, PaintMode::Stroke);
        surface.draw_line(x + 1.0, BADGE_TOP + 6.5, x + w - 1.0, BADGE_TOP + 6.5);

        self.bold(surface, 7.0)?;
        surface.set_cursor(x, BADGE_TOP + 1.5);
        surface.draw_text_cell(w, 4.0, label, Align::Center, false);

        surface.select_font(self.family, value_style, value_size)?;
        surface.set_cursor(x, BADGE_TOP + 7.5);
        surface.draw_text_cell(w, 5.0, value, Align::Center, false);
        Ok(())
    }

    // ── buyer block ──────────────────────────────────────────────────

    fn draw_buyer_block<S: Surface>(&self, surface: &mut S, invoice: &InvoiceData) -> Result<()> {
        self.bold(surface, 11.0)?;
        surface.set_cursor(MARGIN, 40.0);
        surface.draw_text_cell(60.0, 5.0, "INVOICE TO:", Align::Left, false);

        self.bold(surface, 10.0)?;
        surface.set_cursor(MARGIN, 46.0);
        surface.draw_text_cell(90.0, LINE_STEP, &invoice.buyer.name, Align::Left, false);

        self.regular(surface, 9.0)?;
        for (i, line) in invoice.buyer.lines.iter().enumerate() {
            surface.set_cursor(MARGIN, 51.0 + i as f64 * LINE_STEP);
            surface.draw_text_cell(90.0, LINE_STEP, line, Align::Left, false);
        }

        if !invoice.buyer_reference.is_empty() {
            self.bold(surface, 9.0)?;
            surface.set_cursor(MARGIN, 68.0);
            surface.draw_text_cell(35.0, LINE_STEP, "YOUR REFERENCE:", Align::Left, false);
            self.regular(surface, 9.0)?;
            surface.draw_text_cell(55.0, LINE_STEP, &invoice.buyer_reference, Align::Left, false);
        }
        Ok(())
    }

    // ── info strip ───────────────────────────────────────────────────

    fn draw_info_strip<S: Surface>(&self, surface: &mut S, invoice: &InvoiceData) -> Result<()> {
        let date_text = invoice.issue_date.format(DATE_FORMAT).to_string();
        let boxes = [
            ("PAYMENT METHOD", invoice.payment_method.as_str()),
            ("INVOICE DATE", date_text.as_str()),
            ("TAX ID", invoice.buyer_tax_id.as_str()),
        ];
        for (i, (label, value)) in boxes.into_iter().enumerate() {
            let x = MARGIN + i as f64 * (STRIP_BOX_WIDTH + BADGE_GAP);
            self.draw_strip_box(surface, x, label, value)?;
        }
        Ok(())
    }

    /// One rounded box of the lower strip: label over divider over value.
    fn draw_strip_box<S: Surface>(
        &self,
        surface: &mut S,
        x: f64,
        label: &str,
        value: &str,
    ) -> Result<()> {
        rounded_rect(
            surface,
            x,
            STRIP_TOP,
            STRIP_BOX_WIDTH,
            STRIP_BOX_HEIGHT,
            BADGE_RADIUS,
            PaintMode::Stroke,
        );
        surface.draw_line(x + 1.0, STRIP_TOP + 5.5, x + STRIP_BOX_WIDTH - 1.0, STRIP_TOP + 5.5);

        self.bold(surface, 8.0)?;
        surface.set_cursor(x, STRIP_TOP + 1.0);
        surface.draw_text_cell(STRIP_BOX_WIDTH, 4.0, label, Align::Center, false);

        self.regular(surface, 9.0)?;
        surface.set_cursor(x, STRIP_TOP + 6.5);
        surface.draw_text_cell(STRIP_BOX_WIDTH, 5.0, value, Align::Center, false);
        Ok(())
    }

    // ── product table ────────────────────────────────────────────────

    fn draw_table<S: Surface>(
        &self,
        surface: &mut S,
        invoice: &InvoiceData,
        state: &mut RenderState,
    ) -> Result<()> {
        let columns = self.columns.columns();
        let table_width = self.columns.total_width();
        surface.draw_rect(
            MARGIN,
            TABLE_TOP,
            table_width,
            TABLE_BOTTOM - TABLE_TOP,
            PaintMode::Stroke,
        );

        // Header labels, then the rule under them
        self.bold(surface, 9.0)?;
        let mut x = MARGIN;
        for col in columns {
            surface.set_cursor(x, TABLE_TOP + 1.0);
            surface.draw_text_cell(col.width, 4.0, &col.label, Align::Center, false);
            x += col.width;
        }
        surface.draw_line(
            MARGIN,
            TABLE_TOP + TABLE_HEADER_HEIGHT,
            MARGIN + table_width,
            TABLE_TOP + TABLE_HEADER_HEIGHT,
        );

        // Column separators span the full table height (not drawn after
        // the last column)
        let mut x = MARGIN;
        for col in &columns[..columns.len().saturating_sub(1)] {
            x += col.width;
            surface.draw_line(x, TABLE_TOP, x, TABLE_BOTTOM);
        }

        // Item rows advance by a fixed step; a description that wraps
        // past its row spills into the one below.
        self.regular(surface, 8.0)?;
        for item in &invoice.line_items {
            let mut cell_x = MARGIN;
            for col in columns {
                surface.set_cursor(cell_x, state.row_y);
                surface.draw_wrapped_text(
                    col.width,
                    ROW_HEIGHT,
                    &col.field.value_of(item),
                    col.align,
                );
                cell_x += col.width;
            }
            state.row_y += ROW_HEIGHT;
            state.items_drawn += 1;
        }
        debug!("placed {} item rows", state.items_drawn);
        Ok(())
    }

    // ── totals ───────────────────────────────────────────────────────

    fn draw_totals<S: Surface>(&self, surface: &mut S, invoice: &InvoiceData) -> Result<()> {
        let right = surface.page_width() - MARGIN;
        // label 40 + currency 8 + amount 30, flush with the right margin
        let label_x = right - 78.0;

        let vat_text = vat_label(invoice.tax_rate);
        let rows = [
            ("NET TO PAY", invoice.net_total(), FontStyle::Regular, 252.0),
            (vat_text.as_str(), invoice.vat_amount(), FontStyle::Regular, 258.0),
            ("TOTAL", invoice.gross_total(), FontStyle::Bold, 268.0),
        ];
        for (label, amount, style, y) in rows {
            surface.select_font(self.family, style, 10.0)?;
            surface.set_cursor(label_x, y);
            surface.draw_text_cell(40.0, 5.0, label, Align::Right, false);
            surface.draw_text_cell(8.0, 5.0, &self.currency, Align::Right, false);
            surface.draw_text_cell(30.0, 5.0, &fmt_amount(amount), Align::Right, false);
        }
        Ok(())
    }
}

/// Stroke or fill a rectangle with circular-arc corners.
///
/// Each corner is a single cubic Bezier whose control points sit
/// `radius * 4/3 * (sqrt(2) - 1)` from the corner tangents. The radius
/// is clamped to half the shorter side; a non-positive radius
/// degenerates to a plain rectangle.
pub fn rounded_rect<S: Surface>(
    surface: &mut S,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radius: f64,
    mode: PaintMode,
) {
    let r = radius.min(w.min(h) / 2.0).max(0.0);
    if r <= 0.0 {
        surface.draw_rect(x, y, w, h, mode);
        return;
    }
    let k = r * ARC_K;

    surface.move_to(x + r, y);
    surface.line_to(x + w - r, y);
    surface.curve_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    surface.line_to(x + w, y + h - r);
    surface.curve_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    surface.line_to(x + r, y + h);
    surface.curve_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    surface.line_to(x, y + r);
    surface.curve_to(x, y + r - k, x + r - k, y, x + r, y);
    surface.paint_path(mode);
}

/// Shrink from `start_size` in one-point steps until the text fits
/// `avail_width`, stopping at the floor of [`MIN_FONT_SIZE`]. Text that
/// cannot fit even at the floor is drawn at the floor and overflows.
///
/// Widths scale linearly with font size, so one measurement at the
/// starting size covers every candidate.
fn fit_font_size(start_size: f64, width_at_start: f64, avail_width: f64) -> f64 {
    let mut size = start_size;
    let mut width = width_at_start;
    while width > avail_width && size > MIN_FONT_SIZE {
        size = (size - 1.0).max(MIN_FONT_SIZE);
        width = width_at_start * size / start_size;
    }
    size
}

/// Label for the VAT totals row, e.g. "VAT 25 %".
fn vat_label(rate: f64) -> String {
    let pct = rate * 100.0;
    if pct.fract() == 0.0 {
        format!("VAT {:.0} %", pct)
    } else {
        format!("VAT {:.1} %", pct)
    }
}
