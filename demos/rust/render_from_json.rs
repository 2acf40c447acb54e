/// JSON-driven rendering example: the invoice arrives as a serialized
/// payload, the kind a web endpoint or message queue would hand over.
///
/// Omitted fields fall back to their defaults (today's date, 25 % VAT).
///
/// Run with:
///   cargo run --example render_from_json -p invoice-demos
use invoice_core::{fmt_amount, InvoiceData, InvoiceRenderer, TraceSurface};

const PAYLOAD: &str = r#"{
    "invoice_number": "2024-1108",
    "seller": {
        "name": "Nordic Crate Supply ApS",
        "lines": ["Havnegade 12", "DK-8000 Aarhus C"]
    },
    "buyer": {
        "name": "Harbour Kitchen Oy",
        "lines": ["Satamakatu 3", "FI-00160 Helsinki"]
    },
    "buyer_reference": "HK-2024-55",
    "payment_method": "Invoice, net 14 days",
    "line_items": [
        { "reference": "4011", "description": "Braeburn apples, 10 kg crate", "unit_price": 14.5, "quantity": 8.0 },
        { "reference": "8340", "description": "Rye crispbread, 12-pack", "unit_price": 24.6, "quantity": 3.0 }
    ]
}"#;

fn main() {
    env_logger::init();

    let invoice: InvoiceData = serde_json::from_str(PAYLOAD).expect("parse invoice payload");
    println!(
        "parsed invoice {} with {} items, tax rate {}",
        invoice.invoice_number,
        invoice.line_items.len(),
        invoice.tax_rate
    );

    let mut surface = TraceSurface::new();
    let page = InvoiceRenderer::new()
        .render(&mut surface, &invoice)
        .expect("render invoice");

    println!("{} commands recorded", surface.ops().len());
    println!("net   {:>10}", fmt_amount(page.net_total));
    println!("vat   {:>10}", fmt_amount(page.vat_amount));
    println!("gross {:>10}", fmt_amount(page.gross_total));
}
