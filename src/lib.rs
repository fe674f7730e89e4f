//! Quoteforge - fill quotation spreadsheet templates from order data
//!
//! This library writes customer, salesperson and line-item data into fixed
//! cells of a pre-designed .xlsx template and derives subtotals, tax,
//! totals, cost and margin.
//!
//! # Features
//!
//! - Declarative, versioned template layouts (field → cell) in YAML
//! - Two built-in layouts: `simple` and `cost-margin`
//! - Typed errors: I/O, malformed template, invalid data, layout, order
//! - CLI and HTTP API delivery of the rendered workbook
//!
//! # Example
//!
//! ```no_run
//! use quoteforge::excel::{QuotationRenderer, TemplateSource};
//! use quoteforge::layout::TemplateLayout;
//! use quoteforge::parser::parse_quotation;
//! use std::path::Path;
//!
//! let quotation = parse_quotation(Path::new("order.yaml"))?;
//! let renderer = QuotationRenderer::new(TemplateLayout::cost_margin());
//! let rendered = renderer.render(&TemplateSource::path("template.xlsx"), &quotation)?;
//!
//! println!("{}: grand total {}", rendered.file_name, rendered.totals.grand_total);
//! std::fs::write(&rendered.file_name, &rendered.bytes)?;
//! # Ok::<(), quoteforge::error::QuoteError>(())
//! ```

pub mod api;
pub mod cli;
pub mod delivery;
pub mod error;
pub mod excel;
pub mod layout;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use error::{QuoteError, QuoteResult};
pub use layout::TemplateLayout;
pub use types::{CustomerInfo, ItemTable, LineItem, Quotation, QuotationTotals, SalespersonInfo};
