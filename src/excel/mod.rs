//! Workbook handling for quotations
//!
//! - Render: template (.xlsx) + quotation → filled workbook bytes
//! - Template: layout → blank starter template
//! - Inspect: rendered workbook → values at the layout's coordinates

mod inspector;
mod renderer;
mod template;

pub use inspector::{InspectedQuotation, InspectedRow, QuotationInspector};
pub use renderer::{QuotationRenderer, RenderedQuotation, TemplateSource, DEFAULT_TEMPLATE};
pub use template::TemplateGenerator;
