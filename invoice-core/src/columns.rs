use serde::{Deserialize, Serialize};

use crate::graphics::Align;
use crate::invoice::{fmt_amount, LineItem};

/// Which [`LineItem`] field a product-table column displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemField {
    Reference,
    Description,
    Quantity,
    UnitPrice,
    LineTotal,
}

impl ItemField {
    /// Project the field out of an item as display text.
    pub fn value_of(&self, item: &LineItem) -> String {
        match self {
            ItemField::Reference => item.reference.clone(),
            ItemField::Description => item.description.clone(),
            ItemField::Quantity => fmt_quantity(item.quantity),
            ItemField::UnitPrice => fmt_amount(item.unit_price),
            ItemField::LineTotal => fmt_amount(item.line_total()),
        }
    }
}

/// Whole quantities print without a decimal point: 3.0 -> "3", 2.5 -> "2.5".
fn fmt_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.0}", quantity)
    } else {
        quantity.to_string()
    }
}

/// One product-table column: header label, width in page units,
/// text alignment, and the item field it displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    pub width: f64,
    pub align: Align,
    pub field: ItemField,
}

impl Column {
    pub fn new(label: impl Into<String>, width: f64, align: Align, field: ItemField) -> Self {
        Column {
            label: label.into(),
            width,
            align,
            field,
        }
    }
}

/// Ordered schema for the product table.
///
/// Columns draw left to right in the order given; nothing is keyed by
/// label, so duplicate labels are harmless. Fixed for the lifetime of a
/// render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    columns: Vec<Column>,
}

impl ColumnSpec {
    pub fn new(columns: Vec<Column>) -> Self {
        ColumnSpec { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Sum of the column widths, i.e. the table width.
    pub fn total_width(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

/// Reference, description, quantity, unit price, and line total, sized
/// for a 190-unit table (A4 with 10-unit margins). Numeric columns are
/// right-aligned; quantity is centered.
impl Default for ColumnSpec {
    fn default() -> Self {
        ColumnSpec::new(vec![
            Column::new("REF.", 25.0, Align::Left, ItemField::Reference),
            Column::new("DESCRIPTION", 90.0, Align::Left, ItemField::Description),
            Column::new("QTY", 20.0, Align::Center, ItemField::Quantity),
            Column::new("UNIT PRICE", 25.0, Align::Right, ItemField::UnitPrice),
            Column::new("TOTAL", 30.0, Align::Right, ItemField::LineTotal),
        ])
    }
}
