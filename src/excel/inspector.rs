//! Read a rendered quotation back through its layout (calamine)

use crate::error::{QuoteError, QuoteResult};
use crate::layout::{CellRef, ColumnRef, TemplateLayout};
use crate::types::QuotationTotals;
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;

/// A rendered line-item row as found in the sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectedRow {
    pub row: u32,
    pub brand: String,
    pub model: String,
    pub spec: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Everything the layout says the sheet should hold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectedQuotation {
    pub fields: Vec<(String, String)>,
    pub rows: Vec<InspectedRow>,
    pub totals: Option<QuotationTotals>,
}

/// Values of the first worksheet of an .xlsx file
pub struct QuotationInspector {
    range: Range<Data>,
}

impl QuotationInspector {
    pub fn open(path: &Path) -> QuoteResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> QuoteResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| QuoteError::MalformedTemplate(format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| QuoteError::MalformedTemplate("Workbook has no sheets".to_string()))?
            .map_err(|e| QuoteError::MalformedTemplate(format!("Failed to read sheet: {}", e)))?;

        Ok(Self { range })
    }

    /// Raw cell value (`Data::Empty` outside the used range)
    pub fn value(&self, cell: CellRef) -> Data {
        self.range
            .get_value(cell.zero_based())
            .cloned()
            .unwrap_or(Data::Empty)
    }

    /// Cell rendered as text; numbers lose a trailing `.0`
    pub fn text(&self, cell: CellRef) -> String {
        match self.value(cell) {
            Data::Empty => String::new(),
            Data::String(s) => s,
            Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            other => other.to_string(),
        }
    }

    /// Cell as a number; text and empty cells yield `None`
    pub fn number(&self, cell: CellRef) -> Option<f64> {
        match self.value(cell) {
            Data::Float(f) => Some(f),
            Data::Int(i) => Some(i as f64),
            _ => None,
        }
    }

    pub fn is_empty(&self, cell: CellRef) -> bool {
        match self.value(cell) {
            Data::Empty => true,
            Data::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Collect header fields, item rows and totals at the layout's coordinates
    pub fn inspect(&self, layout: &TemplateLayout) -> QuoteResult<InspectedQuotation> {
        let mut fields: Vec<(String, String)> = layout
            .customer
            .labels()
            .into_iter()
            .map(|(cell, label)| (label.to_string(), self.text(cell)))
            .collect();
        if let Some(sales) = &layout.salesperson {
            fields.extend(
                sales
                    .labels()
                    .iter()
                    .map(|(cell, label)| (label.to_string(), self.text(*cell))),
            );
        }
        if let Some(date) = layout.quotation_date {
            fields.push(("Date".to_string(), self.text(date)));
        }

        let totals = layout.totals.as_ref().map(|cells| QuotationTotals {
            total_price: self.number(cells.total_price).unwrap_or(0.0),
            total_cost: self.number(cells.total_cost).unwrap_or(0.0),
            tax_amount: self.number(cells.tax_amount).unwrap_or(0.0),
            grand_total: self.number(cells.grand_total).unwrap_or(0.0),
            total_profit: self.number(cells.total_profit).unwrap_or(0.0),
            profit_margin: self.number(cells.profit_margin).unwrap_or(0.0),
        });

        Ok(InspectedQuotation {
            fields,
            rows: self.item_rows(layout)?,
            totals,
        })
    }

    /// Non-blank item rows between `start_row` and the totals block (or the sheet end)
    fn item_rows(&self, layout: &TemplateLayout) -> QuoteResult<Vec<InspectedRow>> {
        let items = &layout.items;
        let columns = &items.columns;
        let sheet_end = self.range.end().map(|(row, _)| row + 1).unwrap_or(0);
        let end_row = layout
            .totals
            .as_ref()
            .map(|t| t.total_price.row.min(t.total_cost.row) - 1)
            .filter(|row| *row >= items.start_row)
            .map_or(sheet_end, |row| row.min(sheet_end));

        let at = |col: ColumnRef, row: u32| CellRef::new(col, row);

        let mut rows = Vec::new();
        for row in items.start_row..=end_row {
            let brand = self.text(at(columns.brand, row)?);
            let model = self.text(at(columns.model, row)?);
            if brand.is_empty() && model.is_empty() {
                continue;
            }
            rows.push(InspectedRow {
                row,
                brand,
                model,
                spec: self.text(at(columns.spec, row)?),
                quantity: self.number(at(columns.quantity, row)?).unwrap_or(0.0),
                unit_price: self.number(at(columns.unit_price, row)?).unwrap_or(0.0),
                subtotal: self.number(at(columns.subtotal, row)?).unwrap_or(0.0),
            });
        }

        Ok(rows)
    }
}
