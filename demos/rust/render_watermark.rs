/// Watermark example: the same page rendered twice, once clean and once
/// with a diagonal PREVIEW watermark behind the content.
///
/// Run with:
///   cargo run --example render_watermark -p invoice-demos
use chrono::NaiveDate;
use invoice_core::{DrawOp, InvoiceData, InvoiceRenderer, LineItem, PartyInfo, TraceSurface};

fn draft_invoice() -> InvoiceData {
    let seller = PartyInfo::new("Nordic Crate Supply ApS")
        .line("Havnegade 12")
        .line("DK-8000 Aarhus C");
    let buyer = PartyInfo::new("Meridian Retail GmbH").line("DE-20095 Hamburg");

    let mut invoice = InvoiceData::new("DRAFT-117", seller, buyer);
    invoice.issue_date = NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date");
    invoice.add_item(LineItem::new("4011", "Braeburn apples, 10 kg crate", 14.50, 12.0));
    invoice.add_item(LineItem::new("5023", "Sparkling water, 24 x 0.5 l", 9.80, 20.0));
    invoice
}

fn render(invoice: &InvoiceData) -> TraceSurface {
    let mut surface = TraceSurface::new();
    InvoiceRenderer::new()
        .render(&mut surface, invoice)
        .expect("render invoice");
    surface
}

fn main() {
    env_logger::init();

    let clean = render(&draft_invoice());

    let mut invoice = draft_invoice();
    invoice.watermark_text = Some("PREVIEW".to_string());
    let marked = render(&invoice);

    println!(
        "clean page: {} commands, watermarked page: {} commands",
        clean.ops().len(),
        marked.ops().len()
    );

    for op in marked.into_ops() {
        match op {
            DrawOp::PushRotation { angle, pivot_x, pivot_y } => {
                println!("rotation of {} degrees around ({:.2}, {:.2})", angle, pivot_x, pivot_y);
            }
            DrawOp::TextCell { text, .. } if text == "PREVIEW" => {
                println!("watermark text placed");
            }
            DrawOp::PopRotation => println!("rotation restored"),
            _ => {}
        }
    }
}
