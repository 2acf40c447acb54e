use chrono::NaiveDate;
use invoice_core::{
    fmt_amount, InvoiceData, InvoiceRenderer, LineItem, PartyInfo, RenderError, TraceSurface,
};
use proptest::prelude::*;

fn minimal_invoice() -> InvoiceData {
    let seller = PartyInfo::new("Seller A/S").line("Road 1");
    let buyer = PartyInfo::new("Buyer GmbH").line("Strasse 2");
    let mut invoice = InvoiceData::new("T-1", seller, buyer);
    invoice.issue_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    invoice
}

// -------------------------------------------------------
// Arithmetic
// -------------------------------------------------------

#[test]
fn line_total_multiplies_price_by_quantity() {
    let item = LineItem::new("10", "Crate", 14.5, 4.0);
    assert!((item.line_total() - 58.0).abs() < 1e-9);
}

#[test]
fn default_tax_rate_is_a_quarter() {
    assert_eq!(minimal_invoice().tax_rate, 0.25);
}

#[test]
fn net_vat_and_gross_follow_the_rate() {
    let mut invoice = minimal_invoice();
    invoice.add_item(LineItem::new("10", "Crate", 50.0, 2.0));

    assert!((invoice.net_total() - 100.0).abs() < 1e-9);
    assert!((invoice.vat_amount() - 25.0).abs() < 1e-9);
    assert!((invoice.gross_total() - 125.0).abs() < 1e-9);
}

#[test]
fn custom_tax_rate_flows_through_totals() {
    let mut invoice = minimal_invoice();
    invoice.tax_rate = 0.19;
    invoice.add_item(LineItem::new("10", "Crate", 100.0, 1.0));

    assert!((invoice.vat_amount() - 19.0).abs() < 1e-9);
    assert!((invoice.gross_total() - 119.0).abs() < 1e-9);
}

#[test]
fn zero_tax_rate_makes_gross_equal_net() {
    let mut invoice = minimal_invoice();
    invoice.tax_rate = 0.0;
    invoice.add_item(LineItem::new("10", "Crate", 33.0, 3.0));

    assert_eq!(invoice.vat_amount(), 0.0);
    assert!((invoice.gross_total() - invoice.net_total()).abs() < 1e-9);
}

#[test]
fn amounts_format_with_two_decimals() {
    assert_eq!(fmt_amount(0.0), "0.00");
    assert_eq!(fmt_amount(19.5), "19.50");
    assert_eq!(fmt_amount(1234.5), "1234.50");
    assert_eq!(fmt_amount(-50.0), "-50.00");
    assert_eq!(fmt_amount(3.333), "3.33");
}

// -------------------------------------------------------
// Strict-mode validation
// -------------------------------------------------------

#[test]
fn strict_rejects_negative_tax_rate() {
    let mut renderer = InvoiceRenderer::new();
    renderer.strict = true;

    let mut invoice = minimal_invoice();
    invoice.tax_rate = -0.1;

    let mut surface = TraceSurface::new();
    let err = renderer.render(&mut surface, &invoice).unwrap_err();
    assert!(matches!(err, RenderError::InvalidAmount { field: "tax_rate", .. }));
}

#[test]
fn strict_rejects_negative_quantity() {
    let mut renderer = InvoiceRenderer::new();
    renderer.strict = true;

    let mut invoice = minimal_invoice();
    invoice.add_item(LineItem::new("10", "Crate", 5.0, -2.0));

    let mut surface = TraceSurface::new();
    let err = renderer.render(&mut surface, &invoice).unwrap_err();
    assert!(matches!(err, RenderError::InvalidAmount { field: "quantity", .. }));
}

// -------------------------------------------------------
// JSON payloads
// -------------------------------------------------------

#[test]
fn invoice_parsed_from_json_renders_with_defaults() {
    let payload = r#"{
        "invoice_number": "J-77",
        "seller": { "name": "Seller A/S", "lines": ["Road 1"] },
        "buyer": { "name": "Buyer GmbH", "lines": [] },
        "line_items": [
            { "reference": "10", "description": "Crate", "unit_price": 40.0, "quantity": 2.0 }
        ]
    }"#;
    let invoice: InvoiceData = serde_json::from_str(payload).unwrap();
    assert_eq!(invoice.tax_rate, 0.25);

    let mut surface = TraceSurface::new();
    let page = InvoiceRenderer::new().render(&mut surface, &invoice).unwrap();
    assert_eq!(page.items_rendered, 1);
    assert!((page.net_total - 80.0).abs() < 1e-9);
    assert!((page.gross_total - 100.0).abs() < 1e-9);
}

// -------------------------------------------------------
// Properties
// -------------------------------------------------------

proptest! {
    #[test]
    fn totals_are_consistent_for_arbitrary_items(
        entries in prop::collection::vec((0.0f64..1000.0, 0.0f64..100.0), 0..12)
    ) {
        let mut invoice = minimal_invoice();
        for (i, (price, qty)) in entries.iter().enumerate() {
            invoice.add_item(LineItem::new(format!("R{}", i), "item", *price, *qty));
        }

        let expected_net: f64 = entries.iter().map(|(p, q)| p * q).sum();
        prop_assert!((invoice.net_total() - expected_net).abs() < 1e-6);
        prop_assert!((invoice.gross_total() - invoice.net_total() * 1.25).abs() < 1e-6);
        prop_assert!(
            (invoice.net_total() + invoice.vat_amount() - invoice.gross_total()).abs() < 1e-6
        );
    }

    #[test]
    fn rendering_never_fails_for_non_negative_items(
        entries in prop::collection::vec((0.0f64..1000.0, 0.0f64..100.0), 0..12)
    ) {
        let mut invoice = minimal_invoice();
        for (i, (price, qty)) in entries.iter().enumerate() {
            invoice.add_item(LineItem::new(format!("R{}", i), "item", *price, *qty));
        }

        let mut renderer = InvoiceRenderer::new();
        renderer.strict = true;
        let mut surface = TraceSurface::new();
        let page = renderer.render(&mut surface, &invoice);
        prop_assert!(page.is_ok());
        prop_assert_eq!(page.unwrap().items_rendered, entries.len());
    }
}
