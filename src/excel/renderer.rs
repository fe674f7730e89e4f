//! Quotation renderer: fills a template workbook in place (umya-spreadsheet)

use crate::delivery::quotation_file_name;
use crate::error::{QuoteError, QuoteResult};
use crate::layout::{CellRef, ColumnRef, TemplateLayout};
use crate::types::{today, LineItem, Quotation, QuotationTotals, SalespersonInfo};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use umya_spreadsheet::{reader, writer, Spreadsheet, Worksheet};

/// Template used when the caller supplies none
pub const DEFAULT_TEMPLATE: &str = "template.xlsx";

/// Where the template workbook comes from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Local file
    Path(PathBuf),
    /// Uploaded workbook bytes
    Bytes(Vec<u8>),
}

impl TemplateSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        TemplateSource::Path(path.as_ref().to_path_buf())
    }

    /// Read the workbook with all sheets loaded
    pub fn load(&self) -> QuoteResult<Spreadsheet> {
        match self {
            TemplateSource::Path(path) => {
                let file = File::open(path)?;
                reader::xlsx::read_reader(BufReader::new(file), true).map_err(|e| {
                    QuoteError::MalformedTemplate(format!(
                        "Failed to open template '{}': {}",
                        path.display(),
                        e
                    ))
                })
            }
            TemplateSource::Bytes(bytes) => {
                reader::xlsx::read_reader(Cursor::new(bytes.as_slice()), true).map_err(|e| {
                    QuoteError::MalformedTemplate(format!("Failed to open uploaded template: {}", e))
                })
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Path(path) => path.display().to_string(),
            TemplateSource::Bytes(bytes) => format!("<upload, {} bytes>", bytes.len()),
        }
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        TemplateSource::path(DEFAULT_TEMPLATE)
    }
}

/// A finished quotation, ready for delivery
#[derive(Debug, Clone)]
pub struct RenderedQuotation {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub totals: QuotationTotals,
    /// Item rows that received values
    pub rows_written: usize,
}

/// Writes a quotation into a template according to a layout
pub struct QuotationRenderer {
    layout: TemplateLayout,
}

impl QuotationRenderer {
    pub fn new(layout: TemplateLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Load, fill and serialize. Nothing is returned unless every step succeeds.
    pub fn render(
        &self,
        template: &TemplateSource,
        quotation: &Quotation,
    ) -> QuoteResult<RenderedQuotation> {
        debug!(
            template = %template.describe(),
            layout = %self.layout.name,
            items = quotation.items.len(),
            "rendering quotation"
        );

        let mut book = template.load()?;
        let (totals, rows_written) = self.fill(&mut book, quotation)?;
        let bytes = serialize(&book)?;

        let file_name = quotation_file_name(&quotation.customer.name, today());
        info!(
            file_name = %file_name,
            rows_written,
            bytes = bytes.len(),
            "quotation rendered"
        );

        Ok(RenderedQuotation {
            bytes,
            file_name,
            totals,
            rows_written,
        })
    }

    /// Write every block into the active sheet of `book`
    pub fn fill(
        &self,
        book: &mut Spreadsheet,
        quotation: &Quotation,
    ) -> QuoteResult<(QuotationTotals, usize)> {
        let sheet = active_sheet(book)?;

        self.write_header(sheet, quotation);
        let rows_written = self.write_items(sheet, quotation)?;

        // Totals cover the rows that reached the sheet
        let totals = if self.layout.kind.skips_blank_rows() {
            QuotationTotals::from_rows(quotation.items.iter().filter(|item| !item.is_blank()))
        } else {
            QuotationTotals::from_items(&quotation.items)
        };
        if let Some(cells) = &self.layout.totals {
            debug!(
                total_price = totals.total_price,
                total_cost = totals.total_cost,
                "writing totals"
            );
            write_number(sheet, cells.total_price, totals.total_price)?;
            write_number(sheet, cells.tax_amount, totals.tax_amount)?;
            write_number(sheet, cells.grand_total, totals.grand_total)?;
            write_number(sheet, cells.total_cost, totals.total_cost)?;
            write_number(sheet, cells.total_profit, totals.total_profit)?;
            write_number(sheet, cells.profit_margin, totals.profit_margin)?;
        }

        Ok((totals, rows_written))
    }

    fn write_header(&self, sheet: &mut Worksheet, quotation: &Quotation) {
        for (field, cell, text) in self.layout.customer.fields(&quotation.customer) {
            debug!(field, cell = %cell, "customer field");
            write_text(sheet, cell, text);
        }

        if let Some(cells) = &self.layout.salesperson {
            let blank = SalespersonInfo::default();
            let sales = quotation.salesperson.as_ref().unwrap_or(&blank);
            for (field, cell, text) in cells.fields(sales) {
                debug!(field, cell = %cell, "salesperson field");
                write_text(sheet, cell, text);
            }
        }

        if let Some(cell) = self.layout.quotation_date {
            let date = quotation.customer.quotation_date.format("%Y-%m-%d").to_string();
            write_text(sheet, cell, &date);
        }
    }

    /// Item `i` always lands on `start_row + i`; blank rows only differ in
    /// whether they are written.
    fn write_items(&self, sheet: &mut Worksheet, quotation: &Quotation) -> QuoteResult<usize> {
        let block = &self.layout.items;
        let mut written = 0;

        for (index, item) in quotation.items.iter().enumerate() {
            let row = block.row_for(index)?;

            if self.layout.kind.skips_blank_rows() && item.is_blank() {
                debug!(row, "skipping blank row");
                continue;
            }

            if let Some(date) = self.layout.quotation_date {
                let columns = self.layout.items.columns.headers();
                if date.row == row && columns.iter().any(|(col, _)| *col == date.column) {
                    warn!(
                        row,
                        cell = %date,
                        "item #{} overwrites the quotation date",
                        index + 1
                    );
                }
            }

            self.write_item(sheet, row, item)?;
            written += 1;
        }

        Ok(written)
    }

    fn write_item(&self, sheet: &mut Worksheet, row: u32, item: &LineItem) -> QuoteResult<()> {
        let columns = &self.layout.items.columns;
        let at = |col: ColumnRef| CellRef::new(col, row);

        write_text(sheet, at(columns.brand)?, &item.brand);
        write_text(sheet, at(columns.model)?, &item.model);
        write_text(sheet, at(columns.spec)?, &item.spec);
        write_number(sheet, at(columns.quantity)?, item.quantity())?;
        write_number(sheet, at(columns.unit_price)?, item.unit_price())?;
        write_number(sheet, at(columns.subtotal)?, item.subtotal_price())?;

        if let Some(col) = columns.unit_cost {
            write_number(sheet, at(col)?, item.unit_cost())?;
        }
        if let Some(col) = columns.subtotal_cost {
            write_number(sheet, at(col)?, item.subtotal_cost())?;
        }
        if let Some(col) = columns.supplier {
            write_text(sheet, at(col)?, &item.supplier);
        }

        Ok(())
    }
}

/// The sheet the template opens on, or the first one when the workbook's
/// active tab points past its sheets
fn active_sheet(book: &mut Spreadsheet) -> QuoteResult<&mut Worksheet> {
    let sheet_count = book.get_sheet_count();
    if sheet_count == 0 {
        return Err(QuoteError::MalformedTemplate(
            "Template workbook has no worksheets".to_string(),
        ));
    }

    let active_tab: u32 = book.get_workbook_view().get_active_tab().to_owned();
    let index = match usize::try_from(active_tab) {
        Ok(index) if index < sheet_count => index,
        _ => {
            warn!(active_tab, sheet_count, "active tab out of range, filling the first sheet");
            0
        }
    };

    book.get_sheet_mut(&index).ok_or_else(|| {
        QuoteError::MalformedTemplate(format!("Template sheet #{} cannot be opened", index + 1))
    })
}

/// Store text as-is (no number/boolean inference)
fn write_text(sheet: &mut Worksheet, cell: CellRef, text: &str) {
    sheet.get_cell_mut(cell.coordinate()).set_value_string(text);
}

/// Store a number, replacing any formula the template had there
fn write_number(sheet: &mut Worksheet, cell: CellRef, value: f64) -> QuoteResult<()> {
    if !value.is_finite() {
        return Err(QuoteError::InvalidData(format!(
            "Cannot write {} to {}: value is not a finite number",
            value, cell
        )));
    }
    sheet.get_cell_mut(cell.coordinate()).set_value_number(value);
    Ok(())
}

fn serialize(book: &Spreadsheet) -> QuoteResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    writer::xlsx::write_writer(book, &mut buffer)
        .map_err(|e| QuoteError::MalformedTemplate(format!("Failed to save workbook: {}", e)))?;
    Ok(buffer.into_inner())
}
