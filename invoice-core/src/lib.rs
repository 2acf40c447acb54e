pub mod error;
pub mod graphics;
pub mod fonts;
pub mod truetype;
pub mod surface;
pub mod trace;
pub mod invoice;
pub mod columns;
pub mod layout;

pub use columns::{Column, ColumnSpec, ItemField};
pub use error::{RenderError, Result};
pub use fonts::{FaceId, FontBook, FontFamily, FontMetrics, FontStyle};
pub use graphics::{Align, Color, PaintMode};
pub use invoice::{fmt_amount, InvoiceData, LineItem, PartyInfo};
pub use layout::{rounded_rect, InvoiceRenderer, RenderedPage};
pub use surface::{wrap_lines, Surface};
pub use trace::{DrawOp, TraceSurface};
pub use truetype::TrueTypeMetrics;
