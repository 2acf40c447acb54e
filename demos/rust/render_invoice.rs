/// Invoice rendering example: a realistic single-page commercial
/// invoice drawn onto the recording surface.
///
/// Prints the computed totals and a breakdown of the recorded command
/// stream. Set RUST_LOG=debug to watch the layout phases.
///
/// Run with:
///   cargo run --example render_invoice -p invoice-demos
use chrono::NaiveDate;
use invoice_core::{
    fmt_amount, DrawOp, InvoiceData, InvoiceRenderer, LineItem, PartyInfo, TraceSurface,
};

// ── invoice data ──────────────────────────────────────────────────────────────

fn sample_invoice() -> InvoiceData {
    let seller = PartyInfo::new("Nordic Crate Supply ApS")
        .line("Havnegade 12")
        .line("DK-8000 Aarhus C")
        .line("VAT DK 34 56 78 90");
    let buyer = PartyInfo::new("Meridian Retail GmbH")
        .line("Lagerstrasse 4")
        .line("DE-20095 Hamburg");

    let mut invoice = InvoiceData::new("2024-1042", seller, buyer);
    invoice.issue_date = NaiveDate::from_ymd_opt(2024, 3, 18).expect("valid date");
    invoice.buyer_reference = "PO-7781".to_string();
    invoice.buyer_tax_id = "DE 812 345 678".to_string();
    invoice.payment_method = "Bank transfer".to_string();

    invoice.add_item(LineItem::new("4011", "Braeburn apples, 10 kg crate", 14.50, 12.0));
    invoice.add_item(LineItem::new("4217", "Blood oranges, 8 kg crate", 18.90, 6.0));
    invoice.add_item(LineItem::new("5023", "Sparkling water, 24 x 0.5 l", 9.80, 20.0));
    invoice.add_item(LineItem::new(
        "7105",
        "Organic cold-pressed rapeseed oil, six bottles of 750 ml in a wooden presentation crate",
        32.00,
        2.0,
    ));
    invoice.add_item(LineItem::new("8340", "Rye crispbread, 12-pack", 24.60, 4.0));
    invoice
}

// ── command stream summary ────────────────────────────────────────────────────

fn op_kind(op: &DrawOp) -> &'static str {
    match op {
        DrawOp::SetCursor { .. } => "SetCursor",
        DrawOp::SelectFont { .. } => "SelectFont",
        DrawOp::SetTextColor { .. } => "SetTextColor",
        DrawOp::Rect { .. } => "Rect",
        DrawOp::Line { .. } => "Line",
        DrawOp::MoveTo { .. } => "MoveTo",
        DrawOp::LineTo { .. } => "LineTo",
        DrawOp::CurveTo { .. } => "CurveTo",
        DrawOp::PaintPath { .. } => "PaintPath",
        DrawOp::TextCell { .. } => "TextCell",
        DrawOp::WrappedText { .. } => "WrappedText",
        DrawOp::PushRotation { .. } => "PushRotation",
        DrawOp::PopRotation => "PopRotation",
    }
}

fn print_summary(surface: &TraceSurface) {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for op in surface.ops() {
        let kind = op_kind(op);
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }
    for (kind, n) in counts {
        println!("  {:<12} x {}", kind, n);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    let invoice = sample_invoice();
    let renderer = InvoiceRenderer::new();
    let mut surface = TraceSurface::new();
    let page = renderer.render(&mut surface, &invoice).expect("render invoice");

    println!(
        "invoice {} rendered: {} commands, {} item rows",
        invoice.invoice_number,
        surface.ops().len(),
        page.items_rendered
    );
    print_summary(&surface);

    println!("net   {:>10}", fmt_amount(page.net_total));
    println!("vat   {:>10}", fmt_amount(page.vat_amount));
    println!("gross {:>10}", fmt_amount(page.gross_total));
}
