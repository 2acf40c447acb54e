use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

const DEFAULT_TAX_RATE: f64 = 0.25;

/// Format a monetary amount with exactly two decimals: 100.0 -> "100.00".
pub fn fmt_amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn default_issue_date() -> NaiveDate {
    Local::now().date_naive()
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

/// A priced, quantified product entry on the invoice.
///
/// Quantity is a float so fractional units (hours, weights) price
/// correctly. Values are taken as given; strict-mode validation happens
/// in the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub reference: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: f64,
}

impl LineItem {
    pub fn new(
        reference: impl Into<String>,
        description: impl Into<String>,
        unit_price: f64,
        quantity: f64,
    ) -> Self {
        LineItem {
            reference: reference.into(),
            description: description.into(),
            unit_price,
            quantity,
        }
    }

    /// Extended price of the line: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity
    }
}

/// A named party with free-text address lines, printed in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub name: String,
    pub lines: Vec<String>,
}

impl PartyInfo {
    pub fn new(name: impl Into<String>) -> Self {
        PartyInfo {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// Append an address/info line. Chainable.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Everything needed to render one invoice.
///
/// A plain value object: the renderer reads it and never mutates it.
/// `new` applies the defaults (issue date = today, tax rate 25%); the
/// same defaults apply to fields omitted from a serialized payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    /// Free-form document number; non-numeric values like "PREVIEW" are fine.
    pub invoice_number: String,
    #[serde(default = "default_issue_date")]
    pub issue_date: NaiveDate,
    pub seller: PartyInfo,
    pub buyer: PartyInfo,
    #[serde(default)]
    pub buyer_reference: String,
    #[serde(default)]
    pub buyer_tax_id: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub watermark_text: Option<String>,
}

impl InvoiceData {
    pub fn new(invoice_number: impl Into<String>, seller: PartyInfo, buyer: PartyInfo) -> Self {
        InvoiceData {
            invoice_number: invoice_number.into(),
            issue_date: Local::now().date_naive(),
            seller,
            buyer,
            buyer_reference: String::new(),
            buyer_tax_id: String::new(),
            payment_method: String::new(),
            tax_rate: DEFAULT_TAX_RATE,
            line_items: Vec::new(),
            watermark_text: None,
        }
    }

    /// Append a line item. Chainable.
    pub fn add_item(&mut self, item: LineItem) -> &mut Self {
        self.line_items.push(item);
        self
    }

    /// Sum of all line totals, before tax.
    pub fn net_total(&self) -> f64 {
        self.line_items.iter().map(LineItem::line_total).sum()
    }

    /// Tax amount: net total times the tax rate.
    pub fn vat_amount(&self) -> f64 {
        self.net_total() * self.tax_rate
    }

    /// Tax-inclusive total: net times (1 + rate).
    pub fn gross_total(&self) -> f64 {
        self.net_total() * (1.0 + self.tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_price_times_quantity() {
        let item = LineItem::new("REF-1", "Widget", 100.0, 1.0);
        assert_eq!(item.line_total(), 100.0);
        assert_eq!(fmt_amount(item.line_total()), "100.00");

        let fractional = LineItem::new("REF-2", "Hours", 80.0, 2.5);
        assert_eq!(fmt_amount(fractional.line_total()), "200.00");
    }

    #[test]
    fn totals_apply_the_tax_rate() {
        let mut invoice = InvoiceData::new(
            "INV-1",
            PartyInfo::new("Seller"),
            PartyInfo::new("Buyer"),
        );
        invoice.add_item(LineItem::new("A", "One widget", 100.0, 1.0));

        assert_eq!(fmt_amount(invoice.net_total()), "100.00");
        assert_eq!(fmt_amount(invoice.vat_amount()), "25.00");
        assert_eq!(fmt_amount(invoice.gross_total()), "125.00");
    }

    #[test]
    fn empty_invoice_totals_are_zero() {
        let invoice = InvoiceData::new(
            "INV-2",
            PartyInfo::new("Seller"),
            PartyInfo::new("Buyer"),
        );
        assert_eq!(fmt_amount(invoice.net_total()), "0.00");
        assert_eq!(fmt_amount(invoice.vat_amount()), "0.00");
        assert_eq!(fmt_amount(invoice.gross_total()), "0.00");
    }

    #[test]
    fn new_applies_defaults() {
        let invoice = InvoiceData::new(
            "INV-3",
            PartyInfo::new("Seller").line("1 Main St"),
            PartyInfo::new("Buyer"),
        );
        assert_eq!(invoice.tax_rate, 0.25);
        assert_eq!(invoice.issue_date, Local::now().date_naive());
        assert!(invoice.line_items.is_empty());
        assert!(invoice.watermark_text.is_none());
        assert_eq!(invoice.seller.lines, vec!["1 Main St".to_string()]);
    }

    #[test]
    fn deserializing_a_minimal_payload_applies_defaults() {
        let json = r#"{
            "invoice_number": "INV-9",
            "seller": { "name": "Seller Oy", "lines": [] },
            "buyer": { "name": "Buyer GmbH", "lines": [] }
        }"#;
        let invoice: InvoiceData = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.invoice_number, "INV-9");
        assert_eq!(invoice.tax_rate, 0.25);
        assert!(invoice.line_items.is_empty());
        assert_eq!(invoice.buyer_reference, "");
    }
}
