//! Starter template generator (rust_xlsxwriter)

use crate::error::{QuoteError, QuoteResult};
use crate::layout::{CellRef, TemplateLayout};
use rust_xlsxwriter::{Format, FormatAlign, Formula, Workbook, Worksheet};
use std::collections::HashSet;
use std::path::Path;

/// Item rows that get a preset subtotal formula when no totals block bounds them
const DEFAULT_PRESET_ROWS: u32 = 10;

/// Builds a blank quotation template matching a layout
///
/// Each header field gets a caption in the cell to its left, the item table
/// gets a header row above `start_row`, and the subtotal column is pre-filled
/// with `=qty*price` formulas (the renderer overwrites them with values).
pub struct TemplateGenerator {
    layout: TemplateLayout,
    subtotal_formulas: bool,
}

impl TemplateGenerator {
    pub fn new(layout: TemplateLayout) -> Self {
        Self {
            layout,
            subtotal_formulas: true,
        }
    }

    /// Leave the subtotal column empty instead of pre-filling formulas
    pub fn without_formulas(mut self) -> Self {
        self.subtotal_formulas = false;
        self
    }

    /// Generate the template and save it to disk
    pub fn generate(&self, output_path: &Path) -> QuoteResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(output_path)
            .map_err(|e| QuoteError::MalformedTemplate(format!("Failed to save template: {}", e)))
    }

    /// Generate the template in memory
    pub fn to_bytes(&self) -> QuoteResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook.save_to_buffer().map_err(|e| {
            QuoteError::MalformedTemplate(format!("Failed to serialize template: {}", e))
        })
    }

    fn build(&self) -> QuoteResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Quotation")
            .map_err(|e| QuoteError::MalformedTemplate(format!("Failed to name sheet: {}", e)))?;

        let mut used = self.value_cells();

        self.write_item_header(worksheet, &mut used)?;
        self.write_labels(worksheet, &mut used)?;
        if self.subtotal_formulas {
            self.write_subtotal_formulas(worksheet)?;
        }

        let title = CellRef::parse("A1")?;
        if !used.contains(&title) {
            let format = Format::new().set_bold().set_font_size(16);
            let (row, col) = title.zero_based();
            worksheet
                .write_string_with_format(row, col as u16, "QUOTATION", &format)
                .map_err(write_error)?;
        }

        for (col, _) in self.layout.items.columns.headers() {
            worksheet
                .set_column_width(col.index() as u16 - 1, 16)
                .map_err(write_error)?;
        }

        Ok(workbook)
    }

    /// Cells the renderer will overwrite; captions must stay clear of them
    fn value_cells(&self) -> HashSet<CellRef> {
        let layout = &self.layout;
        let mut cells: HashSet<CellRef> = layout
            .customer
            .labels()
            .into_iter()
            .map(|(cell, _)| cell)
            .collect();

        if let Some(sales) = &layout.salesperson {
            cells.extend(sales.labels().iter().map(|(cell, _)| *cell));
        }
        if let Some(totals) = &layout.totals {
            cells.extend(totals.labels().iter().map(|(cell, _)| *cell));
        }
        cells.extend(layout.quotation_date);

        cells
    }

    fn write_item_header(
        &self,
        worksheet: &mut Worksheet,
        used: &mut HashSet<CellRef>,
    ) -> QuoteResult<()> {
        let header_row = self.layout.items.start_row - 1;
        if header_row == 0 {
            return Ok(());
        }

        let format = Format::new().set_bold().set_align(FormatAlign::Center);
        for (col, caption) in self.layout.items.columns.headers() {
            let cell = CellRef::new(col, header_row)?;
            if !used.insert(cell) {
                continue;
            }
            let (row, col) = cell.zero_based();
            worksheet
                .write_string_with_format(row, col as u16, caption, &format)
                .map_err(write_error)?;
        }

        Ok(())
    }

    fn write_labels(
        &self,
        worksheet: &mut Worksheet,
        used: &mut HashSet<CellRef>,
    ) -> QuoteResult<()> {
        let layout = &self.layout;
        let mut labels = layout.customer.labels();
        if let Some(sales) = &layout.salesperson {
            labels.extend(sales.labels());
        }
        if let Some(date) = layout.quotation_date {
            labels.push((date, "Date"));
        }
        if let Some(totals) = &layout.totals {
            labels.extend(totals.labels());
        }

        let format = Format::new().set_bold();
        for (cell, caption) in labels {
            let Some(target) = cell.left() else {
                continue;
            };
            if !used.insert(target) {
                continue;
            }
            let (row, col) = target.zero_based();
            worksheet
                .write_string_with_format(row, col as u16, caption, &format)
                .map_err(write_error)?;
        }

        Ok(())
    }

    fn write_subtotal_formulas(&self, worksheet: &mut Worksheet) -> QuoteResult<()> {
        let items = &self.layout.items;
        let columns = &items.columns;
        let end_row = self
            .layout
            .totals
            .as_ref()
            .map(|t| t.total_price.row.min(t.total_cost.row))
            .filter(|row| *row > items.start_row)
            .unwrap_or(items.start_row + DEFAULT_PRESET_ROWS);

        for row in items.start_row..end_row {
            let subtotal = CellRef::new(columns.subtotal, row)?;
            let formula = format!("={}{}*{}{}", columns.quantity, row, columns.unit_price, row);
            let (r, c) = subtotal.zero_based();
            worksheet
                .write_formula(r, c as u16, Formula::new(&formula))
                .map_err(write_error)?;

            if let (Some(cost_total), Some(unit_cost)) = (columns.subtotal_cost, columns.unit_cost) {
                let cell = CellRef::new(cost_total, row)?;
                let formula = format!("={}{}*{}{}", columns.quantity, row, unit_cost, row);
                let (r, c) = cell.zero_based();
                worksheet
                    .write_formula(r, c as u16, Formula::new(&formula))
                    .map_err(write_error)?;
            }
        }

        Ok(())
    }
}

fn write_error(e: rust_xlsxwriter::XlsxError) -> QuoteError {
    QuoteError::MalformedTemplate(format!("Failed to write template cell: {}", e))
}
